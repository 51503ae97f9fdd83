//! Domain logic for the two daily report flavors.
//!
//! The receivables snapshot is keyed by date and carries an opaque JSON
//! payload. The structured daily report stores raw category maps alongside
//! derived totals which are recomputed from the inputs on every write and
//! never trusted from the client, with one deliberate exception: the
//! `total_proceedings` sub-totals are read as submitted for the overall-sales
//! formula.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::amounts::RawAmount;

/// The sub-totals that must be present in a submitted `total_proceedings`
/// map.
pub const REQUIRED_PROCEEDS_KEYS: [&str; 4] =
    ["Cash Sales", "Credit Sales", "Outbound Sales", "Cash Payouts"];

#[derive(Debug, Error, PartialEq)]
pub enum ReportValidationError {
    #[error("A report date is required.")]
    MissingReportDate,
    #[error("The value for {key:?} in {field} is not numeric.")]
    NonNumericEntry { field: &'static str, key: String },
    #[error("The field {field} is not numeric.")]
    NonNumericField { field: &'static str },
    #[error("The total_proceedings map is missing the required key {0:?}.")]
    MissingProceedsKey(String),
}

/// The raw body of a receivables snapshot request.
#[derive(Deserialize)]
pub struct ReceivablesData {
    pub report_date: Option<NaiveDate>,
    pub opening_balance: Option<RawAmount>,
    pub closing_balance: Option<RawAmount>,
    pub report_data: Option<Value>,
}

/// A validated receivables snapshot, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceivablesSnapshot {
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub report_data: Value,
}

impl ReceivablesSnapshot {
    pub fn from_data(data: ReceivablesData) -> Result<Self, ReportValidationError> {
        Ok(Self {
            opening_balance: coerce_scalar(data.opening_balance.as_ref(), "opening_balance")?,
            closing_balance: coerce_scalar(data.closing_balance.as_ref(), "closing_balance")?,
            report_data: normalize_report_data(data.report_data),
        })
    }
}

/// Normalize the free-form report payload to a JSON object. Anything that is
/// not an object is silently replaced with an empty one.
pub fn normalize_report_data(data: Option<Value>) -> Value {
    match data {
        Some(value @ Value::Object(_)) => value,
        _ => Value::Object(serde_json::Map::new()),
    }
}

/// The raw body of a structured daily report request. Category maps accept
/// amounts as numbers or strings.
#[derive(Deserialize)]
pub struct DailyReportData {
    pub report_date: Option<NaiveDate>,
    pub cash_particulars: Option<HashMap<String, RawAmount>>,
    pub credit_particulars: Option<HashMap<String, RawAmount>>,
    pub outbound_cash_sale: Option<HashMap<String, RawAmount>>,
    pub cash_correspondence: Option<HashMap<String, RawAmount>>,
    pub cash_bf: Option<RawAmount>,
    pub starting_cash: Option<RawAmount>,
    pub total_proceedings: Option<HashMap<String, RawAmount>>,
}

/// The validated inputs of a structured daily report.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyReportInput {
    pub report_date: NaiveDate,
    pub cash_particulars: HashMap<String, f64>,
    pub credit_particulars: HashMap<String, f64>,
    pub outbound_cash_sale: HashMap<String, f64>,
    pub cash_correspondence: HashMap<String, f64>,
    pub cash_bf: f64,
    pub starting_cash: f64,
    pub total_proceedings: HashMap<String, f64>,
}

impl DailyReportInput {
    pub fn from_data(data: DailyReportData) -> Result<Self, ReportValidationError> {
        Ok(Self {
            report_date: data
                .report_date
                .ok_or(ReportValidationError::MissingReportDate)?,
            cash_particulars: coerce_map(data.cash_particulars, "cash_particulars")?,
            credit_particulars: coerce_map(data.credit_particulars, "credit_particulars")?,
            outbound_cash_sale: coerce_map(data.outbound_cash_sale, "outbound_cash_sale")?,
            cash_correspondence: coerce_map(data.cash_correspondence, "cash_correspondence")?,
            cash_bf: coerce_scalar(data.cash_bf.as_ref(), "cash_bf")?,
            starting_cash: coerce_scalar(data.starting_cash.as_ref(), "starting_cash")?,
            total_proceedings: coerce_map(data.total_proceedings, "total_proceedings")?,
        })
    }
}

/// The five derived scalars persisted beside the raw maps.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedTotals {
    pub total_cash_payouts: f64,
    pub total_cash_proceedings: f64,
    pub subtotal: f64,
    pub cash_surplus_deficit: f64,
    pub overall_sales: f64,
}

impl DerivedTotals {
    /// Compute the derived totals from validated inputs. Runs identically on
    /// create and update. Fails when `total_proceedings` is missing one of
    /// [`REQUIRED_PROCEEDS_KEYS`], naming the key.
    pub fn compute(input: &DailyReportInput) -> Result<Self, ReportValidationError> {
        for key in REQUIRED_PROCEEDS_KEYS {
            if !input.total_proceedings.contains_key(key) {
                return Err(ReportValidationError::MissingProceedsKey(key.to_owned()));
            }
        }

        let proceeds = |key: &str| input.total_proceedings.get(key).copied().unwrap_or_default();

        let cash_sales = proceeds("Cash Sales");
        let credit_sales = proceeds("Credit Sales");
        let outbound_sales = proceeds("Outbound Sales");
        let cash_payouts = proceeds("Cash Payouts");

        let total_cash_payouts = sum_values(&input.outbound_cash_sale);
        let total_cash_proceedings = sum_values(&input.cash_particulars);
        let subtotal = total_cash_payouts + total_cash_proceedings;

        Ok(Self {
            total_cash_payouts,
            total_cash_proceedings,
            subtotal,
            cash_surplus_deficit: input.cash_bf + input.starting_cash - subtotal,
            overall_sales: cash_sales + credit_sales + outbound_sales - cash_payouts,
        })
    }
}

fn sum_values(map: &HashMap<String, f64>) -> f64 {
    map.values().sum()
}

/// Convert a category map to the JSON object persisted for it.
pub fn to_json_map(map: &HashMap<String, f64>) -> Value {
    Value::Object(
        map.iter()
            .filter_map(|(key, value)| {
                serde_json::Number::from_f64(*value).map(|n| (key.clone(), Value::Number(n)))
            })
            .collect(),
    )
}

fn coerce_scalar(
    value: Option<&RawAmount>,
    field: &'static str,
) -> Result<f64, ReportValidationError> {
    RawAmount::coerce_or_zero(value)
        .map_err(|_| ReportValidationError::NonNumericField { field })
}

fn coerce_map(
    map: Option<HashMap<String, RawAmount>>,
    field: &'static str,
) -> Result<HashMap<String, f64>, ReportValidationError> {
    map.unwrap_or_default()
        .into_iter()
        .map(|(key, raw)| match raw.coerce() {
            Ok(value) => Ok((key, value)),
            Err(_) => Err(ReportValidationError::NonNumericEntry { field, key }),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn amounts(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    fn proceeds() -> HashMap<String, f64> {
        amounts(&[
            ("Cash Sales", 100.0),
            ("Credit Sales", 40.0),
            ("Outbound Sales", 10.0),
            ("Cash Payouts", 30.0),
        ])
    }

    fn input() -> DailyReportInput {
        DailyReportInput {
            report_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            cash_particulars: amounts(&[("a", 100.0), ("b", 50.0)]),
            credit_particulars: HashMap::new(),
            outbound_cash_sale: amounts(&[("c", 30.0)]),
            cash_correspondence: HashMap::new(),
            cash_bf: 20.0,
            starting_cash: 10.0,
            total_proceedings: proceeds(),
        }
    }

    #[test]
    fn derived_totals_match_the_formulas() {
        let totals = DerivedTotals::compute(&input()).unwrap();

        assert_eq!(150.0, totals.total_cash_proceedings);
        assert_eq!(30.0, totals.total_cash_payouts);
        assert_eq!(180.0, totals.subtotal);
        assert_eq!(-150.0, totals.cash_surplus_deficit);
        assert_eq!(100.0 + 40.0 + 10.0 - 30.0, totals.overall_sales);
    }

    #[test]
    fn empty_maps_sum_to_zero() {
        let mut input = input();
        input.cash_particulars = HashMap::new();
        input.outbound_cash_sale = HashMap::new();

        let totals = DerivedTotals::compute(&input).unwrap();

        assert_eq!(0.0, totals.subtotal);
        assert_eq!(30.0, totals.cash_surplus_deficit);
    }

    #[test]
    fn missing_proceeds_key_is_named() {
        let mut input = input();
        input.total_proceedings.remove("Outbound Sales");

        let error = DerivedTotals::compute(&input).unwrap_err();

        assert_eq!(
            ReportValidationError::MissingProceedsKey("Outbound Sales".to_owned()),
            error
        );
    }

    #[test]
    fn report_data_objects_pass_through() {
        let payload = serde_json::json!({"invoices": [1, 2, 3]});

        assert_eq!(payload.clone(), normalize_report_data(Some(payload)));
    }

    #[test]
    fn non_object_report_data_becomes_empty() {
        assert_eq!(
            serde_json::json!({}),
            normalize_report_data(Some(serde_json::json!([1, 2])))
        );
        assert_eq!(serde_json::json!({}), normalize_report_data(None));
    }

    #[test]
    fn map_entries_coerce_with_key_named_errors() {
        let data = DailyReportData {
            report_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            cash_particulars: Some(HashMap::from([(
                "till".to_owned(),
                RawAmount::Text("lots".to_owned()),
            )])),
            credit_particulars: None,
            outbound_cash_sale: None,
            cash_correspondence: None,
            cash_bf: None,
            starting_cash: None,
            total_proceedings: None,
        };

        let error = DailyReportInput::from_data(data).unwrap_err();

        assert_eq!(
            ReportValidationError::NonNumericEntry {
                field: "cash_particulars",
                key: "till".to_owned(),
            },
            error
        );
    }

    #[test]
    fn blank_map_entries_coerce_to_zero() {
        let data = DailyReportData {
            report_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            cash_particulars: Some(HashMap::from([(
                "till".to_owned(),
                RawAmount::Text("".to_owned()),
            )])),
            credit_particulars: None,
            outbound_cash_sale: None,
            cash_correspondence: None,
            cash_bf: None,
            starting_cash: None,
            total_proceedings: None,
        };

        let input = DailyReportInput::from_data(data).unwrap();

        assert_eq!(Some(&0.0), input.cash_particulars.get("till"));
    }

    #[test]
    fn json_map_round_trips_values() {
        let map = amounts(&[("a", 1.5)]);

        assert_eq!(serde_json::json!({"a": 1.5}), to_json_map(&map));
    }
}
