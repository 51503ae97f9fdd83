use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::super::models;

#[derive(Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub debit: f64,
    pub credit: f64,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl From<&models::Transaction> for Transaction {
    fn from(model: &models::Transaction) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            date: model.date,
            debit: model.debit,
            credit: model.credit,
            details: model.details.clone(),
            created_at: model.created_at,
        }
    }
}
