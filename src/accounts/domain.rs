use thiserror::Error;

/// A new chart-of-accounts entry. Constructed via [`Self::new()`] which trims
/// free-text fields so that lookups by name match the stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAccount {
    name: String,
    balance: f64,
    balance_type: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum NewAccountError {
    #[error("An account name is required.")]
    MissingName,
    #[error("A balance type is required.")]
    MissingBalanceType,
}

impl NewAccount {
    pub fn new(name: &str, balance: f64, balance_type: &str) -> Result<Self, NewAccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NewAccountError::MissingName);
        }

        let balance_type = balance_type.trim();
        if balance_type.is_empty() {
            return Err(NewAccountError::MissingBalanceType);
        }

        Ok(Self {
            name: name.to_owned(),
            balance,
            balance_type: balance_type.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn balance_type(&self) -> &str {
        &self.balance_type
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let account = NewAccount::new("  Acme  ", 0.0, "debit").unwrap();

        assert_eq!("Acme", account.name());
    }

    #[test]
    fn blank_name_is_rejected() {
        let error = NewAccount::new("   ", 0.0, "debit").unwrap_err();

        assert_eq!(NewAccountError::MissingName, error);
    }

    #[test]
    fn blank_balance_type_is_rejected() {
        let error = NewAccount::new("Acme", 0.0, " ").unwrap_err();

        assert_eq!(NewAccountError::MissingBalanceType, error);
    }
}
