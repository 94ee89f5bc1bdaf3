use std::error::Error;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::Config;
use crate::payload::AskResponse;
use crate::query::Query;

/// Something that turns a question into an answer.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, query: &Query) -> Result<String, AskError>;
}

#[derive(Debug)]
pub enum AskError {
    /// Connect, send or body read failed (timeouts included)
    Transport(reqwest::Error),
    /// Body was not an `{"answer": string}` document
    Decode {
        status: StatusCode,
        source: serde_json::Error,
    },
}

impl fmt::Display for AskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "ask request failed: {err}"),
            Self::Decode { status, source } => {
                write!(f, "ask response ({status}) was not valid JSON: {source}")
            }
        }
    }
}

impl Error for AskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

#[derive(Clone)]
pub struct AskClient {
    client: Client,
    endpoint: String,
}

impl AskClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Client for `endpoint` with an optional whole-request timeout.
    pub fn build(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(&config.resolved_endpoint(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Answerer for AskClient {
    async fn answer(&self, query: &Query) -> Result<String, AskError> {
        let request = query.clone().into_request();

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        // Status is not inspected: any body that parses is an answer.
        let status = response.status();
        debug!(%status, endpoint = %self.endpoint, "ask endpoint responded");

        let body = response.text().await?;
        let parsed: AskResponse =
            serde_json::from_str(&body).map_err(|source| AskError::Decode { status, source })?;

        Ok(parsed.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_mentions_status() {
        let source = serde_json::from_str::<AskResponse>("<html>").unwrap_err();
        let err = AskError::Decode {
            status: StatusCode::BAD_GATEWAY,
            source,
        };
        let message = err.to_string();
        assert!(message.contains("502"), "{message}");
        assert!(err.source().is_some());
    }

    #[test]
    fn from_config_uses_resolved_endpoint() {
        let config = Config {
            endpoint: Some("http://10.0.0.5:5000/api/ask".to_string()),
            timeout_ms: Some(1_500),
        };
        let client = AskClient::from_config(&config).unwrap();
        // ASK_ENDPOINT may be set in the environment running the tests
        assert_eq!(client.endpoint(), config.resolved_endpoint());
    }
}
