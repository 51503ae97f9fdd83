use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An account that has been persisted.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    pub balance_type: String,
    pub created_at: DateTime<Utc>,
}
