use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::super::models;

#[derive(Serialize)]
pub struct Cheque {
    pub cheque_number: String,
    pub bank_drawn: String,
    pub payer: String,
    pub payee: String,
    pub amount: f64,
    pub admin_charge: f64,
    pub net_to_payee: f64,
    pub date_posted: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&models::Cheque> for Cheque {
    fn from(model: &models::Cheque) -> Self {
        Self {
            cheque_number: model.cheque_number.clone(),
            bank_drawn: model.bank_drawn.clone(),
            payer: model.payer.clone(),
            payee: model.payee.clone(),
            amount: model.amount,
            admin_charge: model.admin_charge,
            net_to_payee: model.net_to_payee,
            date_posted: model.date_posted,
            status: model.status.clone(),
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ChequeDetails {
    pub cheque_number: String,
    pub address: String,
    pub phone_number: String,
    pub id_type: String,
    pub id_number: String,
    pub date_of_issue: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl From<&models::ChequeDetails> for ChequeDetails {
    fn from(model: &models::ChequeDetails) -> Self {
        Self {
            cheque_number: model.cheque_number.clone(),
            address: model.address.clone(),
            phone_number: model.phone_number.clone(),
            id_type: model.id_type.clone(),
            id_number: model.id_number.clone(),
            date_of_issue: model.date_of_issue,
            date_of_expiry: model.date_of_expiry,
            date_of_birth: model.date_of_birth,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}
