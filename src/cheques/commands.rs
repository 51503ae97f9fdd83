//! Commands that mutate cheques and cheque-holder details.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::{domain, models};

#[async_trait]
pub trait ChequeCommands {
    /// Persist a newly issued cheque.
    async fn create_cheque(&self, cheque: domain::NewCheque) -> anyhow::Result<models::Cheque>;

    /// Replace a cheque's business fields. The status is only mutated through
    /// [`Self::set_status()`].
    async fn update_cheque(
        &self,
        cheque_number: &str,
        update: domain::ChequeUpdate,
    ) -> Result<models::Cheque, ChequeMutationError>;

    /// Set a cheque's status to the supplied value. Any string is accepted;
    /// no state machine is enforced.
    async fn set_status(
        &self,
        cheque_number: &str,
        status: &str,
    ) -> Result<models::Cheque, ChequeMutationError>;

    /// Delete a cheque by its number, reporting whether a row was removed.
    /// Holder details for the number are not cascaded.
    async fn delete_cheque(&self, cheque_number: &str) -> anyhow::Result<bool>;

    /// Insert or replace the holder details recorded for a cheque. The write
    /// is a single statement keyed on the unique cheque number.
    async fn upsert_details(
        &self,
        cheque_number: &str,
        details: domain::NewChequeDetails,
    ) -> anyhow::Result<models::ChequeDetails>;

    /// Apply a partial update to existing holder details.
    async fn patch_details(
        &self,
        cheque_number: &str,
        patch: domain::ChequeDetailsPatch,
    ) -> Result<models::ChequeDetails, ChequeMutationError>;
}

#[derive(Debug)]
pub enum ChequeMutationError {
    NotFound,
    DatabaseError(anyhow::Error),
}

impl From<sqlx::Error> for ChequeMutationError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::DatabaseError(other.into()),
        }
    }
}

pub struct PostgresCommands<'a>(pub &'a PgPool);

const CHEQUE_RETURNING: &str = "cheque_number, bank_drawn, payer, payee, amount, \
     admin_charge, net_to_payee, date_posted, status, created_at";

const DETAILS_RETURNING: &str = "cheque_number, address, phone_number, id_type, id_number, \
     date_of_issue, date_of_expiry, date_of_birth, created_at, updated_at";

#[async_trait]
impl<'a> ChequeCommands for PostgresCommands<'a> {
    async fn create_cheque(&self, cheque: domain::NewCheque) -> anyhow::Result<models::Cheque> {
        let persisted = sqlx::query_as::<_, models::Cheque>(&format!(
            r#"
            INSERT INTO cheque
                (cheque_number, bank_drawn, payer, payee, amount, admin_charge,
                 net_to_payee, date_posted, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            CHEQUE_RETURNING
        ))
        .bind(&cheque.cheque_number)
        .bind(&cheque.bank_drawn)
        .bind(&cheque.payer)
        .bind(&cheque.payee)
        .bind(cheque.amount)
        .bind(cheque.admin_charge)
        .bind(cheque.net_to_payee)
        .bind(cheque.date_posted)
        .bind(&cheque.status)
        .fetch_one(self.0)
        .await
        .context("Failed to insert cheque.")?;

        info!(cheque_number = %persisted.cheque_number, "Persisted new cheque.");

        Ok(persisted)
    }

    async fn update_cheque(
        &self,
        cheque_number: &str,
        update: domain::ChequeUpdate,
    ) -> Result<models::Cheque, ChequeMutationError> {
        let updated = sqlx::query_as::<_, models::Cheque>(&format!(
            r#"
            UPDATE cheque
            SET bank_drawn = $2, payer = $3, payee = $4, amount = $5,
                admin_charge = $6, net_to_payee = $7, date_posted = $8
            WHERE cheque_number = $1
            RETURNING {}
            "#,
            CHEQUE_RETURNING
        ))
        .bind(cheque_number)
        .bind(&update.bank_drawn)
        .bind(&update.payer)
        .bind(&update.payee)
        .bind(update.amount)
        .bind(update.admin_charge)
        .bind(update.net_to_payee)
        .bind(update.date_posted)
        .fetch_one(self.0)
        .await?;

        info!(%cheque_number, "Updated cheque.");

        Ok(updated)
    }

    async fn set_status(
        &self,
        cheque_number: &str,
        status: &str,
    ) -> Result<models::Cheque, ChequeMutationError> {
        let updated = sqlx::query_as::<_, models::Cheque>(&format!(
            r#"
            UPDATE cheque
            SET status = $2
            WHERE cheque_number = $1
            RETURNING {}
            "#,
            CHEQUE_RETURNING
        ))
        .bind(cheque_number)
        .bind(status)
        .fetch_one(self.0)
        .await?;

        info!(%cheque_number, %status, "Updated cheque status.");

        Ok(updated)
    }

    async fn delete_cheque(&self, cheque_number: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM cheque WHERE cheque_number = $1")
            .bind(cheque_number)
            .execute(self.0)
            .await?;

        info!(%cheque_number, rows = result.rows_affected(), "Deleted cheque.");

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_details(
        &self,
        cheque_number: &str,
        details: domain::NewChequeDetails,
    ) -> anyhow::Result<models::ChequeDetails> {
        let saved = sqlx::query_as::<_, models::ChequeDetails>(&format!(
            r#"
            INSERT INTO cheque_details
                (cheque_number, address, phone_number, id_type, id_number,
                 date_of_issue, date_of_expiry, date_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (cheque_number) DO UPDATE
            SET address = EXCLUDED.address,
                phone_number = EXCLUDED.phone_number,
                id_type = EXCLUDED.id_type,
                id_number = EXCLUDED.id_number,
                date_of_issue = EXCLUDED.date_of_issue,
                date_of_expiry = EXCLUDED.date_of_expiry,
                date_of_birth = EXCLUDED.date_of_birth,
                updated_at = now()
            RETURNING {}
            "#,
            DETAILS_RETURNING
        ))
        .bind(cheque_number)
        .bind(&details.address)
        .bind(&details.phone_number)
        .bind(&details.id_type)
        .bind(&details.id_number)
        .bind(details.date_of_issue)
        .bind(details.date_of_expiry)
        .bind(details.date_of_birth)
        .fetch_one(self.0)
        .await
        .context("Failed to upsert cheque details.")?;

        info!(%cheque_number, "Saved cheque details.");

        Ok(saved)
    }

    async fn patch_details(
        &self,
        cheque_number: &str,
        patch: domain::ChequeDetailsPatch,
    ) -> Result<models::ChequeDetails, ChequeMutationError> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE cheque_details SET ");

        {
            let mut fields = builder.separated(", ");

            if let Some(address) = patch.address {
                fields.push("address = ");
                fields.push_bind_unseparated(address);
            }
            if let Some(phone_number) = patch.phone_number {
                fields.push("phone_number = ");
                fields.push_bind_unseparated(phone_number);
            }
            if let Some(id_type) = patch.id_type {
                fields.push("id_type = ");
                fields.push_bind_unseparated(id_type);
            }
            if let Some(id_number) = patch.id_number {
                fields.push("id_number = ");
                fields.push_bind_unseparated(id_number);
            }
            if let Some(date_of_issue) = patch.date_of_issue {
                fields.push("date_of_issue = ");
                fields.push_bind_unseparated(date_of_issue);
            }
            if let Some(date_of_expiry) = patch.date_of_expiry {
                fields.push("date_of_expiry = ");
                fields.push_bind_unseparated(date_of_expiry);
            }
            if let Some(date_of_birth) = patch.date_of_birth {
                fields.push("date_of_birth = ");
                fields.push_bind_unseparated(date_of_birth);
            }
        }

        builder.push(", updated_at = now() WHERE cheque_number = ");
        builder.push_bind(cheque_number.to_owned());
        builder.push(format!(" RETURNING {}", DETAILS_RETURNING));

        let updated = builder
            .build_query_as::<models::ChequeDetails>()
            .fetch_optional(self.0)
            .await?;

        match updated {
            Some(details) => {
                info!(%cheque_number, "Patched cheque details.");

                Ok(details)
            }
            None => Err(ChequeMutationError::NotFound),
        }
    }
}
