//! Account registry held in process memory
//!
//! Emails are compared case-insensitively. Nothing survives the process.

use super::traits::{AuthService, Credentials, NewAccount};
use crate::forms::{Identity, SubmitFailure};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredAccount {
    identity: Identity,
    password: String,
}

#[derive(Debug, Default)]
pub struct InMemoryAuth {
    accounts: RwLock<HashMap<String, StoredAccount>>,
    latency: Duration,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl InMemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that waits `latency` before answering each request
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthService for InMemoryAuth {
    fn name(&self) -> &'static str {
        "in_memory"
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Identity, SubmitFailure> {
        self.wait().await;
        let key = normalize_email(&credentials.email);
        let accounts = self.accounts.read().await;

        match accounts.get(&key) {
            Some(stored) if stored.password == credentials.password => {
                let mut identity = stored.identity.clone();
                identity.authenticated_at = chrono::Utc::now();
                debug!(email = %key, "sign-in accepted");
                Ok(identity)
            }
            _ => {
                debug!(email = %key, "sign-in rejected");
                Err(SubmitFailure::InvalidCredentials)
            }
        }
    }

    async fn create_account(&self, account: NewAccount) -> Result<Identity, SubmitFailure> {
        self.wait().await;
        let key = normalize_email(&account.email);
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&key) {
            return Err(SubmitFailure::Conflict {
                email: account.email,
            });
        }

        let identity = Identity::new(&key, &account.display_name(), Some(account.role));
        accounts.insert(
            key.clone(),
            StoredAccount {
                identity: identity.clone(),
                password: account.password,
            },
        );
        debug!(email = %key, role = %account.role, "account created");
        Ok(identity)
    }
}
