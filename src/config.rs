//! Client configuration.
//!
//! Everything the client needs is passed in explicitly through [`ClientConfig`].
//! [`ClientConfig::from_env`] is a convenience for binaries; the library never reads
//! the environment on its own.
//!
//! Environment variables read by `from_env` (a `.env` file is loaded first if present):
//! - `OPENAI_API_KEY`
//! - `OPENAI_BASE_URL` (default `https://api.openai.com/v1`)
//! - `CHATMETER_MODEL` (default `gpt-4o-2024-08-06`)
//! - `AI_HTTP_TIMEOUT_SECS` (default 30)
//! - `CHATMETER_PRICING_FILE` (YAML pricing table merged over the built-in one)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 300;

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub pricing_file: Option<PathBuf>,
    /// Applied when a request does not set its own limit.
    pub default_max_completion_tokens: Option<u32>,
}

// keeps the key out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("pricing_file", &self.pricing_file)
            .field(
                "default_max_completion_tokens",
                &self.default_max_completion_tokens,
            )
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl ClientConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pricing_file: None,
            default_max_completion_tokens: Some(DEFAULT_MAX_COMPLETION_TOKENS),
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pricing_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pricing_file = Some(path.into());
        self
    }

    pub fn default_max_completion_tokens(mut self, max: Option<u32>) -> Self {
        self.default_max_completion_tokens = max;
        self
    }

    /// Build from process environment (after loading `.env` if one exists).
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {}", e);
            }
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut cfg = Self::new(non_empty("CHATMETER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()));
        cfg.api_key = non_empty("OPENAI_API_KEY");
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            cfg.base_url = url;
        }
        if let Some(secs) = non_empty("AI_HTTP_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            cfg.timeout = Duration::from_secs(secs.max(1));
        }
        cfg.pricing_file = non_empty("CHATMETER_PRICING_FILE").map(PathBuf::from);
        cfg
    }
}
