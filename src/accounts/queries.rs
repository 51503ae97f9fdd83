//! Queries for chart-of-accounts information.
//!
//! Queries fetch information from whatever storage is backing the
//! application. They never modify data.

use anyhow::Result;
use async_trait::async_trait;

use crate::database::PostgresConnection;

use super::models;

#[async_trait]
pub trait AccountQueries {
    /// List every account, newest first.
    async fn list_accounts(&self) -> Result<Vec<models::Account>>;
}

pub struct PostgresQueries(pub PostgresConnection);

#[async_trait]
impl AccountQueries for PostgresQueries {
    async fn list_accounts(&self) -> Result<Vec<models::Account>> {
        Ok(sqlx::query_as::<_, models::Account>(
            r#"
            SELECT id, name, balance, balance_type, created_at
            FROM account
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&*self.0)
        .await?)
    }
}
