use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{MemoError, Result};

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub list: ListConfig,
}

/// Connection settings for the remote memos service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the memos website, e.g. `https://memos.example.com`.
    pub host: Option<String>,
    /// Access token created in the memos settings page.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ListConfig {
    pub page_size: u32,
    /// Quiescence window before typed search text is applied.
    pub debounce_ms: u64,
}

impl ListConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            debounce_ms: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                host: non_empty_env("MEMO_HOST"),
                token: non_empty_env("MEMO_TOKEN"),
                timeout_secs: parse_env_or("MEMO_TIMEOUT_SECS", 30),
            },
            list: ListConfig {
                page_size: parse_env_or("MEMO_PAGE_SIZE", 20),
                debounce_ms: parse_env_or("MEMO_DEBOUNCE_MS", 300),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Check the required settings and normalize the host.
    ///
    /// The host must be an absolute http(s) URL; a trailing slash is dropped
    /// so that request paths can be appended verbatim.
    pub fn validate(mut self) -> Result<Self> {
        let host = self
            .service
            .host
            .take()
            .ok_or_else(|| MemoError::Config("MEMO_HOST is not set".to_string()))?;

        let parsed = Url::parse(&host)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MemoError::Config(format!(
                "MEMO_HOST must be an http(s) URL, got '{host}'"
            )));
        }

        if self.service.token.is_none() {
            return Err(MemoError::Config("MEMO_TOKEN is not set".to_string()));
        }

        if self.list.page_size == 0 {
            tracing::warn!("MEMO_PAGE_SIZE of 0 is not allowed. Using default.");
            self.list.page_size = ListConfig::default().page_size;
        }

        self.service.host = Some(host.trim_end_matches('/').to_string());
        Ok(self)
    }
}
