//! Auth capability and the form pipelines built on it
//!
//! Which backend is used is decided once, at composition time, from the
//! user configuration.

mod in_memory;
mod pipeline;
mod simulated;
mod traits;

pub use in_memory::InMemoryAuth;
pub use pipeline::{LoginPipeline, SignUpPipeline};
pub use simulated::{SimulatedAuth, DEFAULT_LOGIN_DELAY, DEFAULT_SIGN_UP_DELAY};
pub use traits::{AuthService, Credentials, NewAccount};

#[cfg(test)]
pub use traits::MockAuthService;

use crate::config::{AppConfig, AuthBackend};
use std::sync::Arc;
use tracing::info;

/// Build the configured auth backend
pub fn build(config: &AppConfig) -> Arc<dyn AuthService> {
    let auth: Arc<dyn AuthService> = match config.auth_backend() {
        AuthBackend::Simulated => Arc::new(SimulatedAuth::new(
            config.login_delay(),
            config.sign_up_delay(),
        )),
        AuthBackend::InMemory => Arc::new(InMemoryAuth::with_latency(config.login_delay())),
    };
    info!(backend = auth.name(), "auth backend selected");
    auth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_simulated() {
        let auth = build(&AppConfig::default());
        assert_eq!(auth.name(), "simulated");
    }

    #[test]
    fn test_in_memory_backend_selected() {
        let config = AppConfig {
            auth_backend: Some(AuthBackend::InMemory),
            ..Default::default()
        };
        assert_eq!(build(&config).name(), "in_memory");
    }
}
