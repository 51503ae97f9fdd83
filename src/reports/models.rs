use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A daily receivables snapshot that has been persisted.
#[derive(Clone, Debug, sqlx::FromRow)]
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

/// The result row of the receivables upsert. `created` distinguishes a fresh
/// insert from a replacement of an existing date.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ReceivablesUpsert {
    pub id: Uuid,
    pub report_date: NaiveDate,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub report_data: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created: bool,
}

impl ReceivablesUpsert {
    pub fn into_parts(self) -> (ReceivablesReport, bool) {
        let created = self.created;

        (
            ReceivablesReport {
                id: self.id,
                report_date: self.report_date,
                opening_balance: self.opening_balance,
                closing_balance: self.closing_balance,
                report_data: self.report_data,
                status: self.status,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            created,
        )
    }
}

/// A structured daily report that has been persisted, raw category maps and
/// derived totals together.
#[derive(Clone, Debug, sqlx::FromRow)]
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
