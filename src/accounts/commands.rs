//! Commands that mutate the chart of accounts.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{domain, models};

#[async_trait]
pub trait AccountCommands {
    /// Persist a new account.
    ///
    /// The insert is keyed on the unique account name so that two concurrent
    /// requests for the same name cannot both create a row.
    async fn create_account(
        &self,
        account: domain::NewAccount,
    ) -> Result<models::Account, CreateAccountError>;

    /// Delete an account by its ID, reporting whether a row was removed.
    /// Transactions referencing the account are not cascaded.
    async fn delete_account(&self, account_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Debug)]
pub enum CreateAccountError {
    /// An account with the requested name already exists.
    DuplicateName(String),
    Unknown(anyhow::Error),
}

impl From<sqlx::Error> for CreateAccountError {
    fn from(error: sqlx::Error) -> Self {
        Self::Unknown(error.into())
    }
}

pub struct PostgresCommands<'a>(pub &'a PgPool);

#[async_trait]
impl<'a> AccountCommands for PostgresCommands<'a> {
    async fn create_account(
        &self,
        account: domain::NewAccount,
    ) -> Result<models::Account, CreateAccountError> {
        let created = sqlx::query_as::<_, models::Account>(
            r#"
            INSERT INTO account (name, balance, balance_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, balance, balance_type, created_at
            "#,
        )
        .bind(account.name())
        .bind(account.balance())
        .bind(account.balance_type())
        .fetch_optional(self.0)
        .await?;

        match created {
            Some(row) => {
                info!(id = %row.id, "Persisted new account.");

                Ok(row)
            }
            None => Err(CreateAccountError::DuplicateName(
                account.name().to_owned(),
            )),
        }
    }

    async fn delete_account(&self, account_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM account
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .execute(self.0)
        .await?;

        info!(%account_id, rows = result.rows_affected(), "Deleted account.");

        Ok(result.rows_affected() > 0)
    }
}
