//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a UserId where a ProductId is expected.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);

const ORDER_ID_PREFIX: &str = "ORD";
const ORDER_ID_SUFFIX_LEN: usize = 9;
const ORDER_ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

impl OrderId {
    /// Generate a customer-facing order number such as `ORD7K2QX9ZB4`.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ORDER_ID_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..ORDER_ID_ALPHABET.len());
                char::from(ORDER_ID_ALPHABET[idx])
            })
            .collect();
        Self(format!("{ORDER_ID_PREFIX}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "7".into();
        assert_eq!(id.as_str(), "7");
        assert_eq!(format!("{}", id), "7");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("3")).unwrap();
        assert_eq!(json, "\"3\"");
    }

    #[test]
    fn test_order_id_shape() {
        let id = OrderId::generate();
        let s = id.as_str();
        assert_eq!(s.len(), 12);
        assert!(s.starts_with("ORD"));
        assert!(s[3..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_order_ids_differ() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }
}
