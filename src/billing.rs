//! Billing card model and field validation.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Credit card details collected by the billing step.
///
/// Persisted verbatim inside the session payload once the step is
/// submitted. Validation happens at the REST boundary, never in the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub card_holder_name: String,
    pub card_number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvc: String,
}

/// A single failed field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Compiled validation rules for the card form.
pub struct CardRules {
    number: Regex,
    month: Regex,
    year: Regex,
    cvc: Regex,
}

impl Default for CardRules {
    fn default() -> Self {
        Self {
            number: Regex::new(r"^[0-9]{16}$").unwrap(),
            month: Regex::new(r"^(0[1-9]|1[0-2])$").unwrap(),
            year: Regex::new(r"^[0-9]{2}$").unwrap(),
            cvc: Regex::new(r"^[0-9]{3}$").unwrap(),
        }
    }
}

impl CardRules {
    /// Validate every field, collecting all failures rather than stopping
    /// at the first.
    pub fn validate(&self, card: &CardDetails) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if card.card_holder_name.trim().is_empty() {
            errors.push(FieldError {
                field: "card_holder_name",
                message: "Card holder name is required",
            });
        }
        if !self.number.is_match(&card.card_number) {
            errors.push(FieldError {
                field: "card_number",
                message: "Credit card number must be exactly 16 digits",
            });
        }
        if !self.month.is_match(&card.expiration_month) {
            errors.push(FieldError {
                field: "expiration_month",
                message: "Month must be between 01 and 12",
            });
        }
        if !self.year.is_match(&card.expiration_year) {
            errors.push(FieldError {
                field: "expiration_year",
                message: "Year must be two digits",
            });
        }
        if !self.cvc.is_match(&card.cvc) {
            errors.push(FieldError {
                field: "cvc",
                message: "CVC must be exactly 3 digits",
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_card() -> CardDetails {
        CardDetails {
            card_holder_name: "Gaston Che".to_string(),
            card_number: "1234567890123456".to_string(),
            expiration_month: "12".to_string(),
            expiration_year: "25".to_string(),
            cvc: "123".to_string(),
        }
    }

    #[test]
    fn valid_card_passes() {
        let rules = CardRules::default();
        assert!(rules.validate(&valid_card()).is_ok());
    }

    #[test]
    fn empty_holder_name_rejected() {
        let rules = CardRules::default();
        let card = CardDetails {
            card_holder_name: "   ".to_string(),
            ..valid_card()
        };
        let errors = rules.validate(&card).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "card_holder_name");
    }

    #[test]
    fn card_number_must_be_sixteen_digits() {
        let rules = CardRules::default();
        for bad in ["123", "12345678901234567", "1234-5678-9012-3456", ""] {
            let card = CardDetails {
                card_number: bad.to_string(),
                ..valid_card()
            };
            let errors = rules.validate(&card).unwrap_err();
            assert_eq!(errors[0].field, "card_number", "should reject {bad:?}");
        }
    }

    #[test]
    fn month_bounds() {
        let rules = CardRules::default();
        for good in ["01", "09", "10", "12"] {
            let card = CardDetails {
                expiration_month: good.to_string(),
                ..valid_card()
            };
            assert!(rules.validate(&card).is_ok(), "{good} should be accepted");
        }
        for bad in ["00", "13", "1", "012"] {
            let card = CardDetails {
                expiration_month: bad.to_string(),
                ..valid_card()
            };
            assert!(rules.validate(&card).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn year_and_cvc_shapes() {
        let rules = CardRules::default();
        let card = CardDetails {
            expiration_year: "2025".to_string(),
            cvc: "12".to_string(),
            ..valid_card()
        };
        let errors = rules.validate(&card).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["expiration_year", "cvc"]);
    }

    #[test]
    fn all_failures_reported_together() {
        let rules = CardRules::default();
        let card = CardDetails {
            card_holder_name: String::new(),
            card_number: "x".to_string(),
            expiration_month: "13".to_string(),
            expiration_year: String::new(),
            cvc: "abcd".to_string(),
        };
        let errors = rules.validate(&card).unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn card_serde_round_trip() {
        let card = valid_card();
        let json = serde_json::to_string(&card).unwrap();
        let parsed: CardDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, card);
    }
}
