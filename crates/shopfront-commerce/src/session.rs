//! Shopper identity.
//!
//! There is no authentication here: whoever builds the [`Session`] vouches
//! for it. The session is passed explicitly to the operations that care
//! (checkout prefill and order submission).

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// Who is shopping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identity {
    /// Not signed in.
    #[default]
    Guest,
    /// Signed-in customer.
    Customer {
        id: UserId,
        name: String,
        email: String,
        #[serde(default)]
        role: Role,
    },
}

/// The current shopper's session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Session {
    pub identity: Identity,
}

impl Session {
    /// A guest session.
    pub fn guest() -> Self {
        Self::default()
    }

    /// A signed-in customer session.
    pub fn customer(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            identity: Identity::Customer {
                id: id.into(),
                name: name.into(),
                email: email.into(),
                role: Role::Customer,
            },
        }
    }

    /// Set the role of a signed-in session. No effect on guests.
    pub fn with_role(mut self, new_role: Role) -> Self {
        if let Identity::Customer { role, .. } = &mut self.identity {
            *role = new_role;
        }
        self
    }

    /// Check if signed in.
    pub fn is_signed_in(&self) -> bool {
        matches!(self.identity, Identity::Customer { .. })
    }

    /// Check if the shopper is an administrator.
    pub fn is_admin(&self) -> bool {
        matches!(
            self.identity,
            Identity::Customer {
                role: Role::Admin,
                ..
            }
        )
    }

    /// Customer ID, if signed in.
    pub fn user_id(&self) -> Option<&UserId> {
        match &self.identity {
            Identity::Customer { id, .. } => Some(id),
            Identity::Guest => None,
        }
    }

    /// Display name, if signed in.
    pub fn name(&self) -> Option<&str> {
        match &self.identity {
            Identity::Customer { name, .. } => Some(name),
            Identity::Guest => None,
        }
    }

    /// Email, if signed in.
    pub fn email(&self) -> Option<&str> {
        match &self.identity {
            Identity::Customer { email, .. } => Some(email),
            Identity::Guest => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest() {
        let session = Session::guest();
        assert!(!session.is_signed_in());
        assert!(!session.is_admin());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_customer() {
        let session = Session::customer("u-1", "Asha Rao", "asha@example.com");
        assert!(session.is_signed_in());
        assert!(!session.is_admin());
        assert_eq!(session.user_id().unwrap().as_str(), "u-1");
        assert_eq!(session.email(), Some("asha@example.com"));
    }

    #[test]
    fn test_admin_role() {
        let session = Session::customer("u-2", "Admin", "admin@example.com").with_role(Role::Admin);
        assert!(session.is_admin());
        assert!(!Session::guest().with_role(Role::Admin).is_admin());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_session_json_shape() {
        let json = r#"{"identity":{"kind":"customer","id":"u-1","name":"Asha","email":"a@b.in"}}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.name(), Some("Asha"));
        assert!(!session.is_admin());
    }
}
