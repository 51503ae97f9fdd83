use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::amounts::RawAmount;

/// The raw body of a transaction create or update request. Amounts may be
/// submitted as numbers or strings.
#[derive(Deserialize)]
pub struct TransactionData {
    pub date: Option<NaiveDate>,
    pub debit: Option<RawAmount>,
    pub credit: Option<RawAmount>,
    pub details: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum TransactionValidationError {
    #[error("A transaction date is required.")]
    MissingDate,
    #[error("A debit or credit amount is required.")]
    NoAmount,
    #[error("{0}")]
    NonNumericAmount(#[from] crate::amounts::NotNumeric),
}

/// A new transaction against an account. [`Self::from_data()`] enforces that
/// at least one of debit/credit is non-zero; updates use
/// [`TransactionUpdate`] which does not.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    account_id: Uuid,
    date: NaiveDate,
    debit: f64,
    credit: f64,
    details: String,
}

impl NewTransaction {
    pub fn from_data(
        account_id: Uuid,
        data: TransactionData,
    ) -> Result<Self, TransactionValidationError> {
        let (date, debit, credit, details) = coerce_fields(data)?;

        if debit == 0.0 && credit == 0.0 {
            return Err(TransactionValidationError::NoAmount);
        }

        Ok(Self {
            account_id,
            date,
            debit,
            credit,
            details,
        })
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn debit(&self) -> f64 {
        self.debit
    }

    pub fn credit(&self) -> f64 {
        self.credit
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

/// A full replacement of a transaction's mutable fields.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionUpdate {
    date: NaiveDate,
    debit: f64,
    credit: f64,
    details: String,
}

impl TransactionUpdate {
    pub fn from_data(data: TransactionData) -> Result<Self, TransactionValidationError> {
        let (date, debit, credit, details) = coerce_fields(data)?;

        Ok(Self {
            date,
            debit,
            credit,
            details,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn debit(&self) -> f64 {
        self.debit
    }

    pub fn credit(&self) -> f64 {
        self.credit
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

fn coerce_fields(
    data: TransactionData,
) -> Result<(NaiveDate, f64, f64, String), TransactionValidationError> {
    let date = data.date.ok_or(TransactionValidationError::MissingDate)?;
    let debit = RawAmount::coerce_or_zero(data.debit.as_ref())?;
    let credit = RawAmount::coerce_or_zero(data.credit.as_ref())?;
    let details = data.details.unwrap_or_default();

    Ok((date, debit, credit, details))
}

#[cfg(test)]
mod test {
    use super::*;

    fn data(debit: Option<RawAmount>, credit: Option<RawAmount>) -> TransactionData {
        TransactionData {
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            debit,
            credit,
            details: None,
        }
    }

    #[test]
    fn blank_amounts_are_rejected_on_create() {
        let error = NewTransaction::from_data(
            Uuid::new_v4(),
            data(
                Some(RawAmount::Text("".to_owned())),
                Some(RawAmount::Text("".to_owned())),
            ),
        )
        .unwrap_err();

        assert_eq!(TransactionValidationError::NoAmount, error);
    }

    #[test]
    fn debit_string_coerces_and_credit_defaults() {
        let transaction = NewTransaction::from_data(
            Uuid::new_v4(),
            data(Some(RawAmount::Text("10".to_owned())), None),
        )
        .unwrap();

        assert_eq!(10.0, transaction.debit());
        assert_eq!(0.0, transaction.credit());
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let error = NewTransaction::from_data(
            Uuid::new_v4(),
            data(Some(RawAmount::Text("ten".to_owned())), None),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            TransactionValidationError::NonNumericAmount(_)
        ));
    }

    #[test]
    fn missing_date_is_rejected() {
        let error = NewTransaction::from_data(
            Uuid::new_v4(),
            TransactionData {
                date: None,
                debit: Some(RawAmount::Number(5.0)),
                credit: None,
                details: None,
            },
        )
        .unwrap_err();

        assert_eq!(TransactionValidationError::MissingDate, error);
    }

    #[test]
    fn update_does_not_enforce_a_non_zero_amount() {
        let update = TransactionUpdate::from_data(data(None, None)).unwrap();

        assert_eq!(0.0, update.debit());
        assert_eq!(0.0, update.credit());
    }
}
