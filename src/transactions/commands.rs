//! Commands that mutate ledger transactions.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{domain, models};

#[async_trait]
pub trait TransactionCommands {
    /// Persist a new transaction.
    async fn persist_transaction(
        &self,
        transaction: domain::NewTransaction,
    ) -> anyhow::Result<models::Transaction>;

    /// Replace a transaction's mutable fields.
    async fn update_transaction(
        &self,
        transaction_id: Uuid,
        update: domain::TransactionUpdate,
    ) -> Result<models::Transaction, UpdateTransactionError>;

    /// Delete a transaction by its ID, reporting whether a row was removed.
    async fn delete_transaction(&self, transaction_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Debug)]
pub enum UpdateTransactionError {
    TransactionNotFound,
    DatabaseError(anyhow::Error),
}

impl From<sqlx::Error> for UpdateTransactionError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::TransactionNotFound,
            other => Self::DatabaseError(other.into()),
        }
    }
}

pub struct PostgresCommands<'a>(pub &'a PgPool);

#[async_trait]
impl<'a> TransactionCommands for PostgresCommands<'a> {
    async fn persist_transaction(
        &self,
        transaction: domain::NewTransaction,
    ) -> anyhow::Result<models::Transaction> {
        let persisted = sqlx::query_as::<_, models::Transaction>(
            r#"
            INSERT INTO ledger_transaction (account_id, date, debit, credit, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, account_id, date, debit, credit, details, created_at
            "#,
        )
        .bind(transaction.account_id())
        .bind(transaction.date())
        .bind(transaction.debit())
        .bind(transaction.credit())
        .bind(transaction.details())
        .fetch_one(self.0)
        .await
        .context("Failed to insert transaction.")?;

        info!(id = %persisted.id, "Persisted new transaction.");

        Ok(persisted)
    }

    async fn update_transaction(
        &self,
        transaction_id: Uuid,
        update: domain::TransactionUpdate,
    ) -> Result<models::Transaction, UpdateTransactionError> {
        let updated = sqlx::query_as::<_, models::Transaction>(
            r#"
            UPDATE ledger_transaction
            SET date = $2, debit = $3, credit = $4, details = $5
            WHERE id = $1
            RETURNING id, account_id, date, debit, credit, details, created_at
            "#,
        )
        .bind(transaction_id)
        .bind(update.date())
        .bind(update.debit())
        .bind(update.credit())
        .bind(update.details())
        .fetch_one(self.0)
        .await?;

        info!(%transaction_id, "Updated transaction.");

        Ok(updated)
    }

    async fn delete_transaction(&self, transaction_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM ledger_transaction
            WHERE id = $1
            "#,
        )
        .bind(transaction_id)
        .execute(self.0)
        .await?;

        info!(%transaction_id, rows = result.rows_affected(), "Deleted transaction.");

        Ok(result.rows_affected() > 0)
    }
}
