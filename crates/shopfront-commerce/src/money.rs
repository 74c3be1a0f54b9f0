//! Money type for representing monetary values.
//!
//! Prices in the storefront are whole currency units (rupees, not paise),
//! so amounts are plain `i64`s with no minor-unit scaling. All arithmetic is
//! checked: mixing currencies or overflowing is an error, never a panic.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Whether amounts use lakh/crore digit grouping (`1,00,000`).
    fn uses_indian_grouping(&self) -> bool {
        matches!(self, Currency::INR)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in whole currency units.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for an amount in Indian rupees.
    pub fn inr(amount: i64) -> Self {
        Self::new(amount, Currency::INR)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Add another Money value.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Subtract another Money value.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount
            .checked_sub(other.amount)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a scalar.
    pub fn checked_mul(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Calculate `percent`% of this amount, rounding half away from zero.
    pub fn percentage(&self, percent: u32) -> Result<Money, CommerceError> {
        let scaled = self
            .amount
            .checked_mul(i64::from(percent))
            .ok_or(CommerceError::Overflow)?;
        let half = if scaled < 0 { -50 } else { 50 };
        let rounded = scaled.checked_add(half).ok_or(CommerceError::Overflow)? / 100;
        Ok(Money::new(rounded, self.currency))
    }

    /// Clamp negative amounts to zero.
    pub fn clamp_non_negative(&self) -> Money {
        Money::new(self.amount.max(0), self.currency)
    }

    /// Format as a display string (e.g., "₹1,24,999").
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.currency.symbol(),
            self.display_amount()
        )
    }

    /// Format the absolute amount with digit grouping but no symbol.
    pub fn display_amount(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        group_digits(&digits, self.currency.uses_indian_grouping())
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Insert thousands separators. Indian grouping keeps the last three digits
/// together and groups the rest in pairs.
fn group_digits(digits: &str, indian: bool) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let group = if indian { 2 } else { 3 };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
