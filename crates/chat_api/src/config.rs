use std::collections::BTreeMap;
use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const BASE_URL_ENV: &str = "WEBTOP_CHAT_BASE_URL";
pub const TIMEOUT_ENV: &str = "WEBTOP_CHAT_TIMEOUT_SECS";

/// Transport configuration for the chat server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatApiConfig {
    /// Origin of the desktop backend; API paths are resolved against it.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional whole-request timeout. Streams stay open as long as the server
    /// keeps writing when this is unset.
    pub timeout: Option<Duration>,
}

impl Default for ChatApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl ChatApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `WEBTOP_CHAT_BASE_URL` and `WEBTOP_CHAT_TIMEOUT_SECS`.
    ///
    /// Returns `None` when no base URL is configured; an unparsable timeout is
    /// ignored.
    pub fn from_env() -> Option<Self> {
        let base_url = env_string_opt(BASE_URL_ENV)?;
        let mut config = Self::new(base_url);
        if let Some(seconds) = env_string_opt(TIMEOUT_ENV).and_then(|value| value.parse().ok()) {
            config = config.with_timeout(Duration::from_secs(seconds));
        }
        Some(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}
