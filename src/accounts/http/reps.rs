use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::amounts::RawAmount;

use super::super::models;

// The account routes use the camel-cased field names the original API
// surface exposed; every other resource is snake_case.
#[derive(Deserialize)]
pub struct NewAccount {
    pub name: Option<String>,
    pub balance: Option<RawAmount>,
    #[serde(rename = "balanceType")]
    pub balance_type: Option<String>,
}

#[derive(Serialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    #[serde(rename = "balanceType")]
    pub balance_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<&models::Account> for Account {
    fn from(model: &models::Account) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            balance: model.balance,
            balance_type: model.balance_type.clone(),
            created_at: model.created_at,
        }
    }
}
