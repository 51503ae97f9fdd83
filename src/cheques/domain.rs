use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::amounts::RawAmount;

/// The raw body of a cheque create or update request.
#[derive(Deserialize)]
pub struct ChequeData {
    pub cheque_number: Option<String>,
    pub bank_drawn: Option<String>,
    pub payer: Option<String>,
    pub payee: Option<String>,
    pub amount: Option<RawAmount>,
    pub admin_charge: Option<RawAmount>,
    pub net_to_payee: Option<RawAmount>,
    pub date_posted: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChequeValidationError {
    #[error("The field {0:?} is required.")]
    MissingField(&'static str),
    #[error("{0}")]
    NonNumericAmount(#[from] crate::amounts::NotNumeric),
    #[error("{0}")]
    InvalidPhoneNumber(#[from] PhoneNumberError),
}

/// A cheque ready to be issued. Every business field is required; `status`
/// defaults to "posted" and is otherwise only mutated through the dedicated
/// status endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCheque {
    pub cheque_number: String,
    pub bank_drawn: String,
    pub payer: String,
    pub payee: String,
    pub amount: f64,
    pub admin_charge: f64,
    pub net_to_payee: f64,
    pub date_posted: NaiveDate,
    pub status: String,
}

impl NewCheque {
    pub fn from_data(data: ChequeData) -> Result<Self, ChequeValidationError> {
        let cheque_number = required_text(data.cheque_number, "cheque_number")?;
        let update = ChequeUpdate::from_fields(
            data.bank_drawn,
            data.payer,
            data.payee,
            data.amount,
            data.admin_charge,
            data.net_to_payee,
            data.date_posted,
        )?;

        Ok(Self {
            cheque_number,
            bank_drawn: update.bank_drawn,
            payer: update.payer,
            payee: update.payee,
            amount: update.amount,
            admin_charge: update.admin_charge,
            net_to_payee: update.net_to_payee,
            date_posted: update.date_posted,
            status: data
                .status
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "posted".to_owned()),
        })
    }
}

/// A full replacement of a cheque's business fields. The cheque number comes
/// from the request path and the status is untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct ChequeUpdate {
    pub bank_drawn: String,
    pub payer: String,
    pub payee: String,
    pub amount: f64,
    pub admin_charge: f64,
    pub net_to_payee: f64,
    pub date_posted: NaiveDate,
}

impl ChequeUpdate {
    pub fn from_data(data: ChequeData) -> Result<Self, ChequeValidationError> {
        Self::from_fields(
            data.bank_drawn,
            data.payer,
            data.payee,
            data.amount,
            data.admin_charge,
            data.net_to_payee,
            data.date_posted,
        )
    }

    fn from_fields(
        bank_drawn: Option<String>,
        payer: Option<String>,
        payee: Option<String>,
        amount: Option<RawAmount>,
        admin_charge: Option<RawAmount>,
        net_to_payee: Option<RawAmount>,
        date_posted: Option<NaiveDate>,
    ) -> Result<Self, ChequeValidationError> {
        Ok(Self {
            bank_drawn: required_text(bank_drawn, "bank_drawn")?,
            payer: required_text(payer, "payer")?,
            payee: required_text(payee, "payee")?,
            amount: required_amount(amount, "amount")?,
            admin_charge: required_amount(admin_charge, "admin_charge")?,
            net_to_payee: required_amount(net_to_payee, "net_to_payee")?,
            date_posted: date_posted.ok_or(ChequeValidationError::MissingField("date_posted"))?,
        })
    }
}

/// The raw body of a cheque-details request.
#[derive(Deserialize)]
pub struct ChequeDetailsData {
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_issue: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Cheque-holder identity details, upserted by cheque number.
#[derive(Clone, Debug, PartialEq)]
pub struct NewChequeDetails {
    pub address: String,
    pub phone_number: String,
    pub id_type: String,
    pub id_number: String,
    pub date_of_issue: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
}

impl NewChequeDetails {
    pub fn from_data(data: ChequeDetailsData) -> Result<Self, ChequeValidationError> {
        Ok(Self {
            address: required_text(data.address, "address")?,
            phone_number: validate_phone_number(&required_text(
                data.phone_number,
                "phone_number",
            )?)?,
            id_type: required_text(data.id_type, "id_type")?,
            id_number: required_text(data.id_number, "id_number")?,
            date_of_issue: data.date_of_issue,
            date_of_expiry: data.date_of_expiry,
            date_of_birth: data.date_of_birth,
        })
    }
}

/// A partial update of cheque-holder details. Only the fields named here may
/// be patched; anything else in the body is rejected at deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChequeDetailsPatch {
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_issue: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
}

impl ChequeDetailsPatch {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.phone_number.is_none()
            && self.id_type.is_none()
            && self.id_number.is_none()
            && self.date_of_issue.is_none()
            && self.date_of_expiry.is_none()
            && self.date_of_birth.is_none()
    }

    /// Normalize the patch, validating the phone number when present.
    pub fn validated(mut self) -> Result<Self, ChequeValidationError> {
        if let Some(phone) = self.phone_number.take() {
            self.phone_number = Some(validate_phone_number(&phone)?);
        }

        Ok(self)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PhoneNumberError {
    #[error("A phone number may only contain digits.")]
    NonDigit,
    #[error("A phone number may be at most 20 digits.")]
    TooLong,
}

pub fn validate_phone_number(raw: &str) -> Result<String, PhoneNumberError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(PhoneNumberError::NonDigit);
    }

    if trimmed.len() > 20 {
        return Err(PhoneNumberError::TooLong);
    }

    Ok(trimmed.to_owned())
}

fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ChequeValidationError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ChequeValidationError::MissingField(field))
}

fn required_amount(
    value: Option<RawAmount>,
    field: &'static str,
) -> Result<f64, ChequeValidationError> {
    match value {
        Some(amount) => Ok(amount.coerce()?),
        None => Err(ChequeValidationError::MissingField(field)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn full_data() -> ChequeData {
        ChequeData {
            cheque_number: Some("000123".to_owned()),
            bank_drawn: Some("First National".to_owned()),
            payer: Some("Acme Ltd".to_owned()),
            payee: Some("J. Doe".to_owned()),
            amount: Some(RawAmount::Text("250.00".to_owned())),
            admin_charge: Some(RawAmount::Number(5.0)),
            net_to_payee: Some(RawAmount::Number(245.0)),
            date_posted: NaiveDate::from_ymd_opt(2024, 1, 1),
            status: None,
        }
    }

    #[test]
    fn amounts_coerce_from_either_form() {
        let cheque = NewCheque::from_data(full_data()).unwrap();

        assert_eq!(250.0, cheque.amount);
        assert_eq!(5.0, cheque.admin_charge);
        assert_eq!("posted", cheque.status);
    }

    #[test]
    fn missing_field_is_named() {
        let mut data = full_data();
        data.payee = None;

        let error = NewCheque::from_data(data).unwrap_err();

        assert_eq!(ChequeValidationError::MissingField("payee"), error);
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut data = full_data();
        data.bank_drawn = Some("   ".to_owned());

        let error = NewCheque::from_data(data).unwrap_err();

        assert_eq!(ChequeValidationError::MissingField("bank_drawn"), error);
    }

    #[test]
    fn phone_number_must_be_digits() {
        assert_eq!(
            Err(PhoneNumberError::NonDigit),
            validate_phone_number("555-1234")
        );
        assert_eq!(Err(PhoneNumberError::NonDigit), validate_phone_number(""));
    }

    #[test]
    fn phone_number_is_capped_at_twenty_digits() {
        let too_long = "1".repeat(21);

        assert_eq!(
            Err(PhoneNumberError::TooLong),
            validate_phone_number(&too_long)
        );
        assert!(validate_phone_number(&"1".repeat(20)).is_ok());
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let result: Result<ChequeDetailsPatch, _> =
            serde_json::from_str(r#"{"address": "1 Main St", "cheque_number": "000123"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch: ChequeDetailsPatch = serde_json::from_str("{}").unwrap();

        assert!(patch.is_empty());
    }

    #[test]
    fn patch_validates_the_phone_number() {
        let patch: ChequeDetailsPatch =
            serde_json::from_str(r#"{"phone_number": "not a phone"}"#).unwrap();

        assert!(patch.validated().is_err());
    }
}
