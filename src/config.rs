//! Configuration handling

use crate::auth::{DEFAULT_LOGIN_DELAY, DEFAULT_SIGN_UP_DELAY};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable overriding the configured auth backend
pub const AUTH_BACKEND_ENV: &str = "JOBFINDER_AUTH_BACKEND";

/// Which auth implementation to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthBackend {
    /// Waits, then accepts everything
    #[default]
    Simulated,
    /// Process-local account registry
    InMemory,
}

impl FromStr for AuthBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "in_memory" | "in-memory" | "memory" => Ok(Self::InMemory),
            other => Err(format!("unknown auth backend: {other}")),
        }
    }
}

/// Screen shown at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartScreen {
    #[default]
    SignUp,
    Login,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Auth backend
    pub auth_backend: Option<AuthBackend>,
    /// Simulated sign-in latency in milliseconds
    pub login_delay_ms: Option<u64>,
    /// Simulated sign-up latency in milliseconds
    pub sign_up_delay_ms: Option<u64>,
    /// First screen to show
    pub start_screen: Option<StartScreen>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "jobfinder", "jobfinder")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(value) = std::env::var(AUTH_BACKEND_ENV) {
            config.apply_backend_override(&value);
        }

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn apply_backend_override(&mut self, value: &str) {
        match value.parse() {
            Ok(backend) => self.auth_backend = Some(backend),
            Err(err) => warn!(%err, env = AUTH_BACKEND_ENV, "ignoring auth backend override"),
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn auth_backend(&self) -> AuthBackend {
        self.auth_backend.unwrap_or_default()
    }

    pub fn login_delay(&self) -> Duration {
        self.login_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LOGIN_DELAY)
    }

    pub fn sign_up_delay(&self) -> Duration {
        self.sign_up_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SIGN_UP_DELAY)
    }

    pub fn start_screen(&self) -> StartScreen {
        self.start_screen.unwrap_or_default()
    }
}
