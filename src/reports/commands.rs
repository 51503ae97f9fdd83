//! Commands that mutate both daily report flavors.

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{
    domain::{self, to_json_map},
    models,
    queries::{DAILY_REPORT_COLUMNS, RECEIVABLES_COLUMNS},
};

#[async_trait]
pub trait ReportCommands {
    /// Insert or replace the receivables snapshot for a date. A single
    /// statement keyed on the unique report date, so concurrent posts for the
    /// same date cannot both insert. Returns the row and whether it was
    /// created rather than replaced. The status survives a replacement.
    async fn upsert_receivables(
        &self,
        report_date: NaiveDate,
        snapshot: domain::ReceivablesSnapshot,
    ) -> anyhow::Result<(models::ReceivablesReport, bool)>;

    /// Replace the balances and payload of an existing snapshot.
    async fn update_receivables(
        &self,
        report_date: NaiveDate,
        snapshot: domain::ReceivablesSnapshot,
    ) -> Result<models::ReceivablesReport, ReportMutationError>;

    /// Transition a snapshot to the terminal "finished" status, leaving every
    /// other field untouched.
    async fn finish_receivables(
        &self,
        report_date: NaiveDate,
    ) -> Result<models::ReceivablesReport, ReportMutationError>;

    /// Delete the snapshot for a date, reporting whether a row was removed.
    async fn delete_receivables(&self, report_date: NaiveDate) -> anyhow::Result<bool>;

    /// Persist a new structured daily report with its derived totals.
    async fn create_daily_report(
        &self,
        input: domain::DailyReportInput,
        totals: domain::DerivedTotals,
    ) -> anyhow::Result<models::DailyReport>;

    /// Replace a structured daily report, derived totals recomputed by the
    /// caller from the submitted inputs.
    async fn update_daily_report(
        &self,
        report_id: Uuid,
        input: domain::DailyReportInput,
        totals: domain::DerivedTotals,
    ) -> Result<models::DailyReport, ReportMutationError>;

    /// Delete a structured daily report, reporting whether a row was removed.
    async fn delete_daily_report(&self, report_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Debug)]
pub enum ReportMutationError {
    ReportNotFound,
    DatabaseError(anyhow::Error),
}

impl From<sqlx::Error> for ReportMutationError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::ReportNotFound,
            other => Self::DatabaseError(other.into()),
        }
    }
}

pub struct PostgresCommands<'a>(pub &'a PgPool);

#[async_trait]
impl<'a> ReportCommands for PostgresCommands<'a> {
    async fn upsert_receivables(
        &self,
        report_date: NaiveDate,
        snapshot: domain::ReceivablesSnapshot,
    ) -> anyhow::Result<(models::ReceivablesReport, bool)> {
        // An insert writes created_at and updated_at in the same statement,
        // so they compare equal exactly when the row is new.
        let row = sqlx::query_as::<_, models::ReceivablesUpsert>(&format!(
            r#"
            INSERT INTO daily_receivables
                (report_date, opening_balance, closing_balance, report_data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (report_date) DO UPDATE
            SET opening_balance = EXCLUDED.opening_balance,
                closing_balance = EXCLUDED.closing_balance,
                report_data = EXCLUDED.report_data,
                updated_at = now()
            RETURNING {}, (created_at = updated_at) AS created
            "#,
            RECEIVABLES_COLUMNS
        ))
        .bind(report_date)
        .bind(snapshot.opening_balance)
        .bind(snapshot.closing_balance)
        .bind(snapshot.report_data.clone())
        .fetch_one(self.0)
        .await
        .context("Failed to upsert receivables snapshot.")?;

        let (report, created) = row.into_parts();

        info!(%report_date, created, "Saved receivables snapshot.");

        Ok((report, created))
    }

    async fn update_receivables(
        &self,
        report_date: NaiveDate,
        snapshot: domain::ReceivablesSnapshot,
    ) -> Result<models::ReceivablesReport, ReportMutationError> {
        let updated = sqlx::query_as::<_, models::ReceivablesReport>(&format!(
            r#"
            UPDATE daily_receivables
            SET opening_balance = $2, closing_balance = $3, report_data = $4,
                updated_at = now()
            WHERE report_date = $1
            RETURNING {}
            "#,
            RECEIVABLES_COLUMNS
        ))
        .bind(report_date)
        .bind(snapshot.opening_balance)
        .bind(snapshot.closing_balance)
        .bind(snapshot.report_data.clone())
        .fetch_one(self.0)
        .await?;

        info!(%report_date, "Updated receivables snapshot.");

        Ok(updated)
    }

    async fn finish_receivables(
        &self,
        report_date: NaiveDate,
    ) -> Result<models::ReceivablesReport, ReportMutationError> {
        let finished = sqlx::query_as::<_, models::ReceivablesReport>(&format!(
            r#"
            UPDATE daily_receivables
            SET status = 'finished', updated_at = now()
            WHERE report_date = $1
            RETURNING {}
            "#,
            RECEIVABLES_COLUMNS
        ))
        .bind(report_date)
        .fetch_one(self.0)
        .await?;

        info!(%report_date, "Finished receivables snapshot.");

        Ok(finished)
    }

    async fn delete_receivables(&self, report_date: NaiveDate) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM daily_receivables WHERE report_date = $1")
            .bind(report_date)
            .execute(self.0)
            .await?;

        info!(%report_date, rows = result.rows_affected(), "Deleted receivables snapshot.");

        Ok(result.rows_affected() > 0)
    }

    async fn create_daily_report(
        &self,
        input: domain::DailyReportInput,
        totals: domain::DerivedTotals,
    ) -> anyhow::Result<models::DailyReport> {
        let persisted = sqlx::query_as::<_, models::DailyReport>(&format!(
            r#"
            INSERT INTO daily_report
                (report_date, cash_particulars, credit_particulars,
                 outbound_cash_sale, cash_correspondence, cash_bf, starting_cash,
                 total_proceedings, total_cash_payouts, total_cash_proceedings,
                 subtotal, cash_surplus_deficit, overall_sales)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            DAILY_REPORT_COLUMNS
        ))
        .bind(input.report_date)
        .bind(to_json_map(&input.cash_particulars))
        .bind(to_json_map(&input.credit_particulars))
        .bind(to_json_map(&input.outbound_cash_sale))
        .bind(to_json_map(&input.cash_correspondence))
        .bind(input.cash_bf)
        .bind(input.starting_cash)
        .bind(to_json_map(&input.total_proceedings))
        .bind(totals.total_cash_payouts)
        .bind(totals.total_cash_proceedings)
        .bind(totals.subtotal)
        .bind(totals.cash_surplus_deficit)
        .bind(totals.overall_sales)
        .fetch_one(self.0)
        .await
        .context("Failed to insert daily report.")?;

        info!(id = %persisted.id, "Persisted new daily report.");

        Ok(persisted)
    }

    async fn update_daily_report(
        &self,
        report_id: Uuid,
        input: domain::DailyReportInput,
        totals: domain::DerivedTotals,
    ) -> Result<models::DailyReport, ReportMutationError> {
        let updated = sqlx::query_as::<_, models::DailyReport>(&format!(
            r#"
            UPDATE daily_report
            SET report_date = $2, cash_particulars = $3, credit_particulars = $4,
                outbound_cash_sale = $5, cash_correspondence = $6, cash_bf = $7,
                starting_cash = $8, total_proceedings = $9, total_cash_payouts = $10,
                total_cash_proceedings = $11, subtotal = $12,
                cash_surplus_deficit = $13, overall_sales = $14, updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            DAILY_REPORT_COLUMNS
        ))
        .bind(report_id)
        .bind(input.report_date)
        .bind(to_json_map(&input.cash_particulars))
        .bind(to_json_map(&input.credit_particulars))
        .bind(to_json_map(&input.outbound_cash_sale))
        .bind(to_json_map(&input.cash_correspondence))
        .bind(input.cash_bf)
        .bind(input.starting_cash)
        .bind(to_json_map(&input.total_proceedings))
        .bind(totals.total_cash_payouts)
        .bind(totals.total_cash_proceedings)
        .bind(totals.subtotal)
        .bind(totals.cash_surplus_deficit)
        .bind(totals.overall_sales)
        .fetch_one(self.0)
        .await?;

        info!(%report_id, "Updated daily report.");

        Ok(updated)
    }

    async fn delete_daily_report(&self, report_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM daily_report WHERE id = $1")
            .bind(report_id)
            .execute(self.0)
            .await?;

        info!(%report_id, rows = result.rows_affected(), "Deleted daily report.");

        Ok(result.rows_affected() > 0)
    }
}
