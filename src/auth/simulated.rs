//! Timed stand-in backend: waits, then accepts every request

use super::traits::{AuthService, Credentials, NewAccount};
use crate::forms::{Identity, SubmitFailure};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default simulated latency for sign-in
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1500);

/// Default simulated latency for account creation
pub const DEFAULT_SIGN_UP_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct SimulatedAuth {
    login_delay: Duration,
    sign_up_delay: Duration,
}

impl SimulatedAuth {
    pub fn new(login_delay: Duration, sign_up_delay: Duration) -> Self {
        Self {
            login_delay,
            sign_up_delay,
        }
    }
}

impl Default for SimulatedAuth {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY, DEFAULT_SIGN_UP_DELAY)
    }
}

#[async_trait]
impl AuthService for SimulatedAuth {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Identity, SubmitFailure> {
        debug!(
            email = %credentials.email,
            delay_ms = self.login_delay.as_millis() as u64,
            "simulated sign-in"
        );
        tokio::time::sleep(self.login_delay).await;
        Ok(Identity::new(&credentials.email, &credentials.email, None))
    }

    async fn create_account(&self, account: NewAccount) -> Result<Identity, SubmitFailure> {
        debug!(
            email = %account.email,
            delay_ms = self.sign_up_delay.as_millis() as u64,
            "simulated sign-up"
        );
        tokio::time::sleep(self.sign_up_delay).await;
        Ok(Identity::new(
            &account.email,
            &account.display_name(),
            Some(account.role),
        ))
    }
}
