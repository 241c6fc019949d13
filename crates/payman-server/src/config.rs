//! Server Configuration
//!
//! Read from the environment (after `.env` is loaded). The API credential is
//! deliberately not part of it: callers supply it through `set-api-key`.

use payman_client::{DEFAULT_BASE_URL, PaymanClient, PaymanError};

/// Name reported in the `initialize` handshake
pub const SERVER_NAME: &str = "PaymanServer";

/// Version reported in the `initialize` handshake
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Payman API root
    pub api_base_url: String,

    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.into(),
            log_filter: "info".into(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: lookup("PAYMAN_API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// HTTP client for the configured API root
    pub fn client(&self) -> Result<PaymanClient, PaymanError> {
        PaymanClient::with_base_url(self.api_base_url.trim())
    }
}
