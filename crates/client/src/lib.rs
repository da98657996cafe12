//! # AstroLogic Client
//!
//! HTTP transport to the remote synthesis service.
//!
//! One call sends one request. There is no retry, backoff or partial result: a transport failure
//! or a non-2xx status ends that submission, and [`ClientError`]'s `Display` output is the single
//! message shown to the user.

use astrologic_core::constants::{SYNTHESIS_DATA_ONLY_PATH, SYNTHESIS_PATH};
use astrologic_core::{BirthData, CoreConfig, Synthesis, SynthesisResponse};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(reqwest::Error),
    #[error("could not reach the synthesis service: {0}")]
    Transport(reqwest::Error),
    #[error("the synthesis service failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("the synthesis service returned an unreadable response: {0}")]
    Decode(reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Client for the synthesis service endpoints.
#[derive(Clone, Debug)]
pub struct SynthesisClient {
    http: reqwest::Client,
    synthesis_url: String,
    data_only_url: String,
}

impl SynthesisClient {
    /// Builds a client using the base URL and timeout from `cfg`.
    pub fn new(cfg: &CoreConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            synthesis_url: cfg.endpoint(SYNTHESIS_PATH),
            data_only_url: cfg.endpoint(SYNTHESIS_DATA_ONLY_PATH),
        })
    }

    /// Requests charts plus the narrative reading.
    pub async fn synthesise(&self, data: &BirthData) -> ClientResult<SynthesisResponse> {
        let resp: SynthesisResponse = self.post(&self.synthesis_url, data).await?;
        if let Some(error) = &resp.error {
            tracing::warn!("synthesis service reported: {}", error);
        }
        if resp.reading.is_none() {
            tracing::info!("synthesis returned no narrative reading");
        }
        Ok(resp)
    }

    /// Requests charts only, skipping narrative generation.
    pub async fn synthesis_data_only(&self, data: &BirthData) -> ClientResult<Synthesis> {
        self.post(&self.data_only_url, data).await
    }

    async fn post<T: DeserializeOwned>(&self, url: &str, data: &BirthData) -> ClientResult<T> {
        tracing::info!("requesting synthesis from {}", url);

        let response = self
            .http
            .post(url)
            .json(data)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status.canonical_reason(), &body);
            tracing::error!("synthesis service returned {}: {}", status, message);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(ClientError::Decode)
    }
}

/// Extracts a readable message from an error response body.
///
/// The service reports errors as `{"detail": "..."}`, or for rejected request bodies as
/// `{"detail": [{"msg": "..."}, ...]}`. Anything else falls back to the status reason.
pub fn error_message(reason: Option<&str>, body: &str) -> String {
    let fallback = || reason.unwrap_or("unexpected response").to_string();

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
            detail.trim().to_string()
        }
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                fallback()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback(),
    }
}
