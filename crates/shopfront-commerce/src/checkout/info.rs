//! Shipping information form.

use crate::checkout::validation::{is_digits, ValidationErrors};
use crate::session::Session;
use serde::{Deserialize, Serialize};

/// Where and to whom an order is delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShippingInfo {
    pub full_name: String,
    pub email: String,
    /// 10-digit mobile number.
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// 6-digit PIN code.
    pub postal_code: String,
}

impl ShippingInfo {
    /// An empty form with name and email copied from a signed-in session.
    pub fn prefilled(session: &Session) -> Self {
        Self {
            full_name: session.name().unwrap_or_default().to_string(),
            email: session.email().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Check every field, collecting all failures.
    ///
    /// Required-field failures are reported per field; format checks only
    /// run on fields that are present.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let fields = [
            ("full_name", self.full_name.trim(), "Full name is required"),
            ("email", self.email.trim(), "Email is required"),
            ("phone", self.phone.trim(), "Phone number is required"),
            ("address", self.address.trim(), "Address is required"),
            ("city", self.city.trim(), "City is required"),
            ("state", self.state.trim(), "State is required"),
            ("postal_code", self.postal_code.trim(), "Pincode is required"),
        ];

        for (field, value, required) in fields {
            if value.is_empty() {
                errors.push(field, required);
                continue;
            }
            let valid = match field {
                "email" => is_valid_email(value),
                "phone" => is_digits(value, 10),
                "postal_code" => is_digits(value, 6),
                _ => true,
            };
            if !valid {
                errors.push(field, format_message(field));
            }
        }

        errors.into_result()
    }

    /// Address formatted on one line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.postal_code
        )
    }
}

fn format_message(field: &str) -> &'static str {
    match field {
        "email" => "Please enter a valid email address",
        "phone" => "Please enter a valid 10-digit phone number",
        _ => "Please enter a valid 6-digit pincode",
    }
}

/// `local@domain.tld`: no whitespace, something before the last `@`, and a
/// dot in the domain with something on both sides.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
