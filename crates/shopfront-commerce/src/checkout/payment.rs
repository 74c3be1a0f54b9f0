//! Payment method and details.

use crate::checkout::validation::{is_digits, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "cod" | "cash-on-delivery" => Ok(PaymentMethod::CashOnDelivery),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Card fields as typed by the customer.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CardDetails {
    /// Card number; spaces are allowed.
    pub number: String,
    pub name_on_card: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    /// Card number without whitespace.
    pub fn digits(&self) -> String {
        self.number.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Last four digits of the card number.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.digits().chars().collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("**** {}", self.last4()))
            .field("name_on_card", &self.name_on_card)
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

/// The payment step of the checkout form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    /// Only checked when `method` is `Card`.
    pub card: CardDetails,
    /// Optional, display only.
    pub upi_id: Option<String>,
}

impl PaymentDetails {
    /// Card payment.
    pub fn card(
        number: impl Into<String>,
        name_on_card: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            method: PaymentMethod::Card,
            card: CardDetails {
                number: number.into(),
                name_on_card: name_on_card.into(),
                expiry: expiry.into(),
                cvv: cvv.into(),
            },
            upi_id: None,
        }
    }

    /// UPI payment.
    pub fn upi(upi_id: Option<String>) -> Self {
        Self {
            method: PaymentMethod::Upi,
            card: CardDetails::default(),
            upi_id,
        }
    }

    /// Cash on delivery.
    pub fn cash_on_delivery() -> Self {
        Self {
            method: PaymentMethod::CashOnDelivery,
            ..Self::default()
        }
    }

    /// Check card fields when paying by card. Other methods always pass.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.method != PaymentMethod::Card {
            return Ok(());
        }

        let card = &self.card;
        let digits = card.digits();

        if digits.is_empty() {
            errors.push("card_number", "Card number is required");
        } else if !is_digits(&digits, 16) {
            errors.push("card_number", "Please enter a valid card number");
        }

        if card.name_on_card.trim().is_empty() {
            errors.push("name_on_card", "Name on card is required");
        }

        let expiry = card.expiry.trim();
        if expiry.is_empty() {
            errors.push("expiry", "Expiry date is required");
        } else if !is_valid_expiry(expiry) {
            errors.push("expiry", "Please enter a valid expiry date (MM/YY)");
        }

        let cvv = card.cvv.trim();
        if cvv.is_empty() {
            errors.push("cvv", "CVV is required");
        } else if !(is_digits(cvv, 3) || is_digits(cvv, 4)) {
            errors.push("cvv", "Please enter a valid CVV");
        }

        errors.into_result()
    }

    /// What the order keeps about the payment: never the full card number.
    pub fn summary(&self) -> PaymentSummary {
        PaymentSummary {
            method: self.method,
            card_last4: (self.method == PaymentMethod::Card).then(|| self.card.last4()),
            upi_id: match self.method {
                PaymentMethod::Upi => self.upi_id.clone(),
                _ => None,
            },
        }
    }
}

/// Payment as recorded on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSummary {
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}

/// `MM/YY` with month 01-12. The date is not compared to today.
fn is_valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    if !is_digits(month, 2) || !is_digits(year, 2) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_card() -> PaymentDetails {
        PaymentDetails::card("4111 1111 1111 1111", "ASHA RAO", "09/27", "123")
    }

    #[test]
    fn test_valid_card() {
        assert!(valid_card().validate().is_ok());
    }

    #[test]
    fn test_card_number_must_be_sixteen_digits() {
        let mut payment = valid_card();
        payment.card.number = "4111 1111 1111".to_string();
        let errors = payment.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["card_number"]);
    }

    #[test]
    fn test_cvv_lengths() {
        let mut payment = valid_card();
        payment.card.cvv = "1234".to_string();
        assert!(payment.validate().is_ok());
        payment.card.cvv = "12".to_string();
        assert!(payment.validate().is_err());
        payment.card.cvv = "12a".to_string();
        assert!(payment.validate().is_err());
    }

    #[test]
    fn test_expiry_format() {
        assert!(is_valid_expiry("01/30"));
        assert!(is_valid_expiry("12/24"));
        assert!(!is_valid_expiry("13/24"));
        assert!(!is_valid_expiry("00/24"));
        assert!(!is_valid_expiry("1/24"));
        assert!(!is_valid_expiry("01/2024"));
        assert!(!is_valid_expiry("0124"));
    }

    #[test]
    fn test_missing_card_fields_aggregate() {
        let payment = PaymentDetails::card("", "", "", "");
        let errors = payment.validate().unwrap_err();
        assert_eq!(
            errors.fields(),
            vec!["card_number", "name_on_card", "expiry", "cvv"]
        );
    }

    #[test]
    fn test_other_methods_skip_card_checks() {
        assert!(PaymentDetails::upi(None).validate().is_ok());
        assert!(PaymentDetails::cash_on_delivery().validate().is_ok());
    }

    #[test]
    fn test_summary_keeps_last_four_only() {
        let summary = valid_card().summary();
        assert_eq!(summary.card_last4.as_deref(), Some("1111"));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("4111"));

        let upi = PaymentDetails::upi(Some("asha@okbank".to_string())).summary();
        assert!(upi.card_last4.is_none());
        assert_eq!(upi.upi_id.as_deref(), Some("asha@okbank"));
    }

    #[test]
    fn test_debug_redacts_card() {
        let debug = format!("{:?}", valid_card());
        assert!(!debug.contains("4111 1111"));
        assert!(!debug.contains("123\""));
        assert!(debug.contains("**** 1111"));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("cod".parse::<PaymentMethod>(), Ok(PaymentMethod::CashOnDelivery));
        assert_eq!("UPI".parse::<PaymentMethod>(), Ok(PaymentMethod::Upi));
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
