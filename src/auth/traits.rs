//! Trait abstraction for the auth backend to enable swapping and mocking

use crate::forms::{Identity, Role, SubmitFailure};
use async_trait::async_trait;
use std::fmt;

/// Login request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Sign-up request
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: Role,
}

impl NewAccount {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Auth backend operations, selected at composition time
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Human-readable backend name for logs
    fn name(&self) -> &'static str;

    /// Authenticate an existing account
    async fn sign_in(&self, credentials: Credentials) -> Result<Identity, SubmitFailure>;

    /// Register a new account
    async fn create_account(&self, account: NewAccount) -> Result<Identity, SubmitFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "hunter22".to_string(),
            remember_me: false,
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_new_account_display_name() {
        let account = NewAccount {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            password: "password123".to_string(),
            role: Role::JobSeeker,
        };
        assert_eq!(account.display_name(), "Ada Lovelace");
        assert!(!format!("{account:?}").contains("password123"));
    }
}
