//! Wire-level types shared between the two services.

use serde::{Deserialize, Serialize};

/// Kind of bank account.
///
/// On the wire (JSON bodies and stored rows) the historical Spanish labels
/// are kept: `Ahorro` for savings, `Corriente` for checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Savings account (`Ahorro`).
    #[serde(rename = "Ahorro")]
    Savings,
    /// Checking account (`Corriente`).
    #[serde(rename = "Corriente")]
    Checking,
}

impl AccountType {
    /// Returns the wire/storage label for this account type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Savings => "Ahorro",
            Self::Checking => "Corriente",
        }
    }

    /// Parses a wire/storage label into an account type.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Ahorro" => Some(Self::Savings),
            "Corriente" => Some(Self::Checking),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AccountType::Savings, "Ahorro")]
    #[case(AccountType::Checking, "Corriente")]
    fn test_label_round_trip(#[case] kind: AccountType, #[case] label: &str) {
        assert_eq!(kind.as_str(), label);
        assert_eq!(AccountType::parse(label), Some(kind));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert_eq!(AccountType::parse("Plazo"), None);
        assert_eq!(AccountType::parse("ahorro"), None);
        assert_eq!(AccountType::parse(""), None);
    }

    #[test]
    fn test_serde_uses_wire_labels() {
        assert_eq!(
            serde_json::to_string(&AccountType::Savings).unwrap(),
            "\"Ahorro\""
        );
        let parsed: AccountType = serde_json::from_str("\"Corriente\"").unwrap();
        assert_eq!(parsed, AccountType::Checking);
    }
}
