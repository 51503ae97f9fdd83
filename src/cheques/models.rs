use chrono::{DateTime, NaiveDate, Utc};

/// A cheque that has been persisted.
#[derive(Clone, Debug, sqlx::FromRow)]
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

/// Cheque-holder identity details, keyed 1:1 on the cheque number.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ChequeDetails {
    pub cheque_number: String,
    pub address: String,
    pub phone_number: String,
    pub id_type: String,
    pub id_number: String,
    pub date_of_issue: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
