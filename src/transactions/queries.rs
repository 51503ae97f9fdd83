//! Queries for ledger transactions.
//!
//! Queries fetch information from whatever storage is backing the
//! application. They never modify data.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::database::PostgresConnection;

use super::models;

#[async_trait]
pub trait TransactionQueries {
    /// List every transaction recorded against an account, most recent date
    /// first.
    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<models::Transaction>>;
}

pub struct PostgresQueries(pub PostgresConnection);

#[async_trait]
impl TransactionQueries for PostgresQueries {
    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<models::Transaction>> {
        Ok(sqlx::query_as::<_, models::Transaction>(
            r#"
            SELECT id, account_id, date, debit, credit, details, created_at
            FROM ledger_transaction
            WHERE account_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(&*self.0)
        .await?)
    }
}
