//! Queries for cheques and cheque-holder details.
//!
//! Queries fetch information from whatever storage is backing the
//! application. They never modify data.

use anyhow::Result;
use async_trait::async_trait;

use crate::database::PostgresConnection;

use super::models;

#[async_trait]
pub trait ChequeQueries {
    /// List every issued cheque, most recently posted first.
    async fn list_cheques(&self) -> Result<Vec<models::Cheque>>;

    /// Get a single cheque by its number.
    async fn get_cheque(&self, cheque_number: &str) -> Result<Option<models::Cheque>>;

    /// Whether a cheque with the given number has been issued.
    async fn cheque_exists(&self, cheque_number: &str) -> Result<bool>;

    /// Get the holder details recorded for a cheque.
    async fn get_details(&self, cheque_number: &str) -> Result<Option<models::ChequeDetails>>;
}

pub struct PostgresQueries(pub PostgresConnection);

const CHEQUE_COLUMNS: &str = "cheque_number, bank_drawn, payer, payee, amount, \
     admin_charge, net_to_payee, date_posted, status, created_at";

const DETAILS_COLUMNS: &str = "cheque_number, address, phone_number, id_type, id_number, \
     date_of_issue, date_of_expiry, date_of_birth, created_at, updated_at";

#[async_trait]
impl ChequeQueries for PostgresQueries {
    async fn list_cheques(&self) -> Result<Vec<models::Cheque>> {
        Ok(sqlx::query_as::<_, models::Cheque>(&format!(
            "SELECT {} FROM cheque ORDER BY date_posted DESC, created_at DESC",
            CHEQUE_COLUMNS
        ))
        .fetch_all(&*self.0)
        .await?)
    }

    async fn get_cheque(&self, cheque_number: &str) -> Result<Option<models::Cheque>> {
        Ok(sqlx::query_as::<_, models::Cheque>(&format!(
            "SELECT {} FROM cheque WHERE cheque_number = $1",
            CHEQUE_COLUMNS
        ))
        .bind(cheque_number)
        .fetch_optional(&*self.0)
        .await?)
    }

    async fn cheque_exists(&self, cheque_number: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM cheque WHERE cheque_number = $1)")
                .bind(cheque_number)
                .fetch_one(&*self.0)
                .await?;

        Ok(exists.0)
    }

    async fn get_details(&self, cheque_number: &str) -> Result<Option<models::ChequeDetails>> {
        Ok(sqlx::query_as::<_, models::ChequeDetails>(&format!(
            "SELECT {} FROM cheque_details WHERE cheque_number = $1",
            DETAILS_COLUMNS
        ))
        .bind(cheque_number)
        .fetch_optional(&*self.0)
        .await?)
    }
}
