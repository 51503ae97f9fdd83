use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A transaction that has been persisted.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub debit: f64,
    pub credit: f64,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
