//! Application configuration loaded from environment variables.
//!
//! Optional: `BACKEND_URL`, `CLIENT_STATE_PATH`, `ADMIN_PASSWORD`, `ADMIN_MAX_ATTEMPTS`,
//!           `ADMIN_LOCKOUT_SECS`, `REQUEST_TIMEOUT_SECS`, `ORDER_PAYLOAD_SHAPE`

use crate::model::PayloadShape;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_CLIENT_STATE_PATH: &str = "~/.config/exam-shop/client_state.json";
const DEFAULT_ADMIN_PASSWORD: &str = "aasskkll12345";

#[derive(Clone)]
pub struct AppConfig {
    /// Storefront backend; `/api` is appended per call.
    pub backend_url: String,
    /// JSON file holding the client key.
    pub client_state_path: PathBuf,
    pub admin_password: String,
    /// Wrong passwords allowed before the admin gate locks.
    pub admin_max_attempts: u32,
    pub admin_lockout: Duration,
    pub request_timeout: Duration,
    pub payload_shape: PayloadShape,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend_url", &self.backend_url)
            .field("client_state_path", &self.client_state_path)
            .field("admin_password", &"<redacted>")
            .field("admin_max_attempts", &self.admin_max_attempts)
            .field("admin_lockout", &self.admin_lockout)
            .field("request_timeout", &self.request_timeout)
            .field("payload_shape", &self.payload_shape)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            client_state_path: PathBuf::from(
                shellexpand::tilde(DEFAULT_CLIENT_STATE_PATH).to_string(),
            ),
            admin_password: DEFAULT_ADMIN_PASSWORD.into(),
            admin_max_attempts: 3,
            admin_lockout: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            payload_shape: PayloadShape::Modern,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let backend_url = lookup("BACKEND_URL").unwrap_or(defaults.backend_url);
        reqwest::Url::parse(&backend_url)
            .with_context(|| format!("invalid BACKEND_URL: {backend_url}"))?;

        let client_state_path = lookup("CLIENT_STATE_PATH")
            .map(|raw| PathBuf::from(shellexpand::tilde(&raw).to_string()))
            .unwrap_or(defaults.client_state_path);

        let admin_password = lookup("ADMIN_PASSWORD")
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.admin_password);

        let admin_max_attempts = lookup("ADMIN_MAX_ATTEMPTS")
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.admin_max_attempts);

        let admin_lockout = lookup("ADMIN_LOCKOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.admin_lockout);

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let payload_shape = match lookup("ORDER_PAYLOAD_SHAPE") {
            Some(raw) => raw
                .parse::<PayloadShape>()
                .map_err(|e| anyhow!(e))
                .context("invalid ORDER_PAYLOAD_SHAPE")?,
            None => defaults.payload_shape,
        };

        Ok(Self {
            backend_url,
            client_state_path,
            admin_password,
            admin_max_attempts,
            admin_lockout,
            request_timeout,
            payload_shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.backend_url, "http://127.0.0.1:8000");
        assert_eq!(config.admin_max_attempts, 3);
        assert_eq!(config.admin_lockout, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.payload_shape, PayloadShape::Modern);
        assert!(config.client_state_path.ends_with("exam-shop/client_state.json"));
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("BACKEND_URL", "https://shop.example.com"),
            ("CLIENT_STATE_PATH", "/tmp/state.json"),
            ("ADMIN_PASSWORD", "hunter2"),
            ("ADMIN_MAX_ATTEMPTS", "5"),
            ("ADMIN_LOCKOUT_SECS", "60"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("ORDER_PAYLOAD_SHAPE", "legacy"),
        ])
        .unwrap();
        assert_eq!(config.backend_url, "https://shop.example.com");
        assert_eq!(config.client_state_path, PathBuf::from("/tmp/state.json"));
        assert_eq!(config.admin_password, "hunter2");
        assert_eq!(config.admin_max_attempts, 5);
        assert_eq!(config.admin_lockout, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.payload_shape, PayloadShape::Legacy);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = load(&[("ADMIN_MAX_ATTEMPTS", "zero"), ("ADMIN_LOCKOUT_SECS", "-1")]).unwrap();
        assert_eq!(config.admin_max_attempts, 3);
        assert_eq!(config.admin_lockout, Duration::from_secs(300));
    }

    #[test]
    fn bad_url_or_shape_is_an_error() {
        assert!(load(&[("BACKEND_URL", "::nope")]).is_err());
        let err = load(&[("ORDER_PAYLOAD_SHAPE", "v2")]).unwrap_err();
        assert!(err.to_string().contains("ORDER_PAYLOAD_SHAPE"));
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", load(&[("ADMIN_PASSWORD", "hunter2")]).unwrap());
        assert!(!rendered.contains("hunter2"));
    }
}
