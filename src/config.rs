// src/config.rs
use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_COMPLETION_URL: &str = "https://oi-server.onrender.com/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "openrouter/claude-sonnet-4";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub completion_url: String,
    pub completion_model: String,
    pub completion_api_key: Option<String>,
    pub completion_customer_id: Option<String>,
    pub session_ttl: Duration,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ttl_secs = match non_empty("SESSION_TTL_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid SESSION_TTL_SECS, using default");
                DEFAULT_SESSION_TTL_SECS
            }),
            None => DEFAULT_SESSION_TTL_SECS,
        };

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            completion_url: non_empty("COMPLETION_API_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string()),
            completion_model: non_empty("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_api_key: non_empty("COMPLETION_API_KEY"),
            completion_customer_id: non_empty("COMPLETION_CUSTOMER_ID"),
            session_ttl: Duration::from_secs(ttl_secs),
            static_dir: non_empty("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        }
    }
}
