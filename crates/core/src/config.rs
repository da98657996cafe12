//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the client and the
//! REST layer. Nothing here reads process-wide environment variables; binaries read them and
//! hand the raw values to [`CoreConfig::from_env_values`].

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_REST_ADDR, DEFAULT_SYNTHESIS_URL};
use crate::{CoreError, CoreResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    synthesis_url: String,
    request_timeout: Duration,
    rest_addr: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The synthesis URL must be an absolute `http` or `https` URL; a trailing slash is dropped
    /// so request paths can be appended directly.
    pub fn new(
        synthesis_url: impl Into<String>,
        request_timeout: Duration,
        rest_addr: impl Into<String>,
    ) -> CoreResult<Self> {
        let synthesis_url = synthesis_url.into().trim().trim_end_matches('/').to_string();
        if !(synthesis_url.starts_with("http://") || synthesis_url.starts_with("https://")) {
            return Err(CoreError::InvalidConfig(format!(
                "synthesis URL must start with http:// or https:// (got {synthesis_url:?})"
            )));
        }

        if request_timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "request timeout must be greater than zero".into(),
            ));
        }

        let rest_addr = rest_addr.into().trim().to_string();
        if rest_addr.is_empty() {
            return Err(CoreError::InvalidConfig("listen address cannot be empty".into()));
        }

        Ok(Self {
            synthesis_url,
            request_timeout,
            rest_addr,
        })
    }

    /// Build a configuration from optional raw environment values, applying defaults for
    /// anything missing or blank.
    pub fn from_env_values(
        synthesis_url: Option<String>,
        request_timeout_secs: Option<String>,
        rest_addr: Option<String>,
    ) -> CoreResult<Self> {
        let synthesis_url =
            non_blank(synthesis_url).unwrap_or_else(|| DEFAULT_SYNTHESIS_URL.to_string());
        let request_timeout = request_timeout_from_env_value(request_timeout_secs)?;
        let rest_addr = non_blank(rest_addr).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());

        Self::new(synthesis_url, request_timeout, rest_addr)
    }

    pub fn synthesis_url(&self) -> &str {
        &self.synthesis_url
    }

    /// Full URL for a synthesis service path such as `/api/synthesis`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.synthesis_url, path)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            synthesis_url: DEFAULT_SYNTHESIS_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            rest_addr: DEFAULT_REST_ADDR.to_string(),
        }
    }
}

/// Parse the request timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn request_timeout_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    };

    let secs = raw.parse::<u64>().map_err(|e| {
        CoreError::InvalidConfig(format!("request timeout {raw:?} is not a whole number: {e}"))
    })?;
    if secs == 0 {
        return Err(CoreError::InvalidConfig(
            "request timeout must be greater than zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
