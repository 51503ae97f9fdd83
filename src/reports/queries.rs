//! Queries for both daily report flavors.
//!
//! Queries fetch information from whatever storage is backing the
//! application. They never modify data.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::PostgresConnection;

use super::models;

pub const RECEIVABLES_COLUMNS: &str = "id, report_date, opening_balance, closing_balance, \
     report_data, status, created_at, updated_at";

pub const DAILY_REPORT_COLUMNS: &str = "id, report_date, cash_particulars, credit_particulars, \
     outbound_cash_sale, cash_correspondence, cash_bf, starting_cash, total_proceedings, \
     total_cash_payouts, total_cash_proceedings, subtotal, cash_surplus_deficit, overall_sales, \
     created_at, updated_at";

#[async_trait]
pub trait ReportQueries {
    /// List every receivables snapshot, most recent date first.
    async fn list_receivables(&self) -> Result<Vec<models::ReceivablesReport>>;

    /// Get the receivables snapshot for a date.
    async fn get_receivables(
        &self,
        report_date: NaiveDate,
    ) -> Result<Option<models::ReceivablesReport>>;

    /// List every structured daily report, most recent date first.
    async fn list_daily_reports(&self) -> Result<Vec<models::DailyReport>>;

    /// Get a single structured daily report by its ID.
    async fn get_daily_report(&self, report_id: Uuid) -> Result<Option<models::DailyReport>>;

    /// List the structured daily reports recorded for a date.
    async fn list_daily_reports_for_date(
        &self,
        report_date: NaiveDate,
    ) -> Result<Vec<models::DailyReport>>;
}

pub struct PostgresQueries(pub PostgresConnection);

#[async_trait]
impl ReportQueries for PostgresQueries {
    async fn list_receivables(&self) -> Result<Vec<models::ReceivablesReport>> {
        Ok(sqlx::query_as::<_, models::ReceivablesReport>(&format!(
            "SELECT {} FROM daily_receivables ORDER BY report_date DESC",
            RECEIVABLES_COLUMNS
        ))
        .fetch_all(&*self.0)
        .await?)
    }

    async fn get_receivables(
        &self,
        report_date: NaiveDate,
    ) -> Result<Option<models::ReceivablesReport>> {
        Ok(sqlx::query_as::<_, models::ReceivablesReport>(&format!(
            "SELECT {} FROM daily_receivables WHERE report_date = $1",
            RECEIVABLES_COLUMNS
        ))
        .bind(report_date)
        .fetch_optional(&*self.0)
        .await?)
    }

    async fn list_daily_reports(&self) -> Result<Vec<models::DailyReport>> {
        Ok(sqlx::query_as::<_, models::DailyReport>(&format!(
            "SELECT {} FROM daily_report ORDER BY report_date DESC, created_at DESC",
            DAILY_REPORT_COLUMNS
        ))
        .fetch_all(&*self.0)
        .await?)
    }

    async fn get_daily_report(&self, report_id: Uuid) -> Result<Option<models::DailyReport>> {
        Ok(sqlx::query_as::<_, models::DailyReport>(&format!(
            "SELECT {} FROM daily_report WHERE id = $1",
            DAILY_REPORT_COLUMNS
        ))
        .bind(report_id)
        .fetch_optional(&*self.0)
        .await?)
    }

    async fn list_daily_reports_for_date(
        &self,
        report_date: NaiveDate,
    ) -> Result<Vec<models::DailyReport>> {
        Ok(sqlx::query_as::<_, models::DailyReport>(&format!(
            "SELECT {} FROM daily_report WHERE report_date = $1 ORDER BY created_at DESC",
            DAILY_REPORT_COLUMNS
        ))
        .bind(report_date)
        .fetch_all(&*self.0)
        .await?)
    }
}
