//! Coercion for user-supplied monetary amounts.
//!
//! Clients submit numeric fields either as JSON numbers or as strings.
//! Blank strings and absent fields coerce to zero; any other string must
//! parse as a number.

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

#[derive(Debug, Error, PartialEq)]
#[error("the value {0:?} is not numeric")]
pub struct NotNumeric(pub String);

impl RawAmount {
    pub fn coerce(&self) -> Result<f64, NotNumeric> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }

                match trimmed.parse::<f64>() {
                    // "NaN" and "inf" parse, but are not representable in
                    // JSON and are never valid amounts.
                    Ok(value) if value.is_finite() => Ok(value),
                    _ => Err(NotNumeric(raw.clone())),
                }
            }
        }
    }

    pub fn coerce_or_zero(value: Option<&RawAmount>) -> Result<f64, NotNumeric> {
        value.map(Self::coerce).unwrap_or(Ok(0.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn number_passes_through() {
        assert_eq!(Ok(12.5), RawAmount::Number(12.5).coerce());
    }

    #[test]
    fn blank_string_is_zero() {
        assert_eq!(Ok(0.0), RawAmount::Text("".to_owned()).coerce());
        assert_eq!(Ok(0.0), RawAmount::Text("   ".to_owned()).coerce());
    }

    #[test]
    fn numeric_string_parses() {
        assert_eq!(Ok(10.0), RawAmount::Text("10".to_owned()).coerce());
        assert_eq!(Ok(-3.25), RawAmount::Text(" -3.25 ".to_owned()).coerce());
    }

    #[test]
    fn non_numeric_string_errors() {
        assert_eq!(
            Err(NotNumeric("ten".to_owned())),
            RawAmount::Text("ten".to_owned()).coerce()
        );
    }

    #[test]
    fn non_finite_strings_error() {
        assert!(RawAmount::Text("NaN".to_owned()).coerce().is_err());
        assert!(RawAmount::Text("inf".to_owned()).coerce().is_err());
    }

    #[test]
    fn missing_value_is_zero() {
        assert_eq!(Ok(0.0), RawAmount::coerce_or_zero(None));
    }

    #[test]
    fn deserializes_from_either_form() {
        let from_number: RawAmount = serde_json::from_str("42").unwrap();
        assert_eq!(Ok(42.0), from_number.coerce());

        let from_string: RawAmount = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(Ok(42.0), from_string.coerce());
    }
}
