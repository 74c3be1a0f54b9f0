//! Field-level validation errors for checkout forms.

use serde::Serialize;
use std::fmt;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name (e.g., "phone").
    pub field: &'static str,
    /// Message suitable for showing to the customer.
    pub message: String,
}

/// All fields that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failing field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the failing fields.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    /// Check if a given field failed.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// True when `value` is exactly `len` ASCII digits.
pub(crate) fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Please enter a valid email address");
        errors.push("phone", "Please enter a valid 10-digit phone number");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec!["email", "phone"]);
        assert!(errors.contains("phone"));
        assert_eq!(
            errors.to_string(),
            "Please enter a valid email address; Please enter a valid 10-digit phone number"
        );
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push("cvv", "Please enter a valid CVV");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("9876543210", 10));
        assert!(!is_digits("98765 43210", 10));
        assert!(!is_digits("12345", 10));
        assert!(!is_digits("१२३४५६", 6));
    }
}
