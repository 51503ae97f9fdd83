use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::super::models;

#[derive(Serialize)]
pub struct ReceivablesReport {
    pub id: Uuid,
    pub report_date: NaiveDate,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub report_data: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&models::ReceivablesReport> for ReceivablesReport {
    fn from(model: &models::ReceivablesReport) -> Self {
        Self {
            id: model.id,
            report_date: model.report_date,
            opening_balance: model.opening_balance,
            closing_balance: model.closing_balance,
            report_data: model.report_data.clone(),
            status: model.status.clone(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct DailyReport {
    pub id: Uuid,
    pub report_date: NaiveDate,
    pub cash_particulars: Value,
    pub credit_particulars: Value,
    pub outbound_cash_sale: Value,
    pub cash_correspondence: Value,
    pub cash_bf: f64,
    pub starting_cash: f64,
    pub total_proceedings: Value,
    pub total_cash_payouts: f64,
    pub total_cash_proceedings: f64,
    pub subtotal: f64,
    pub cash_surplus_deficit: f64,
    pub overall_sales: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&models::DailyReport> for DailyReport {
    fn from(model: &models::DailyReport) -> Self {
        Self {
            id: model.id,
            report_date: model.report_date,
            cash_particulars: model.cash_particulars.clone(),
            credit_particulars: model.credit_particulars.clone(),
            outbound_cash_sale: model.outbound_cash_sale.clone(),
            cash_correspondence: model.cash_correspondence.clone(),
            cash_bf: model.cash_bf,
            starting_cash: model.starting_cash,
            total_proceedings: model.total_proceedings.clone(),
            total_cash_payouts: model.total_cash_payouts,
            total_cash_proceedings: model.total_cash_proceedings,
            subtotal: model.subtotal,
            cash_surplus_deficit: model.cash_surplus_deficit,
            overall_sales: model.overall_sales,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
