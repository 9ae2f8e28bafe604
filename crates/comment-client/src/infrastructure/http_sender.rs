//! reqwest implementation of [`PayloadSender`].
//!
//! One request per call, no retry.  The request carries the payload as a JSON
//! body (`Content-Type: application/json`) and asks for JSON back
//! (`Accept: application/json`).  The answer counts as success only when:
//!
//! - the status is 2xx, and
//! - the body parses as JSON, except for `204 No Content`, which yields
//!   `null`.
//!
//! The client-wide timeout covers connecting, sending, and reading the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Map, Value};
use tracing::debug;

use crate::application::submit::{PayloadSender, SubmitError};
use crate::domain::target::{FormTarget, SubmitConfig};

#[derive(Debug, Clone)]
pub struct HttpPayloadSender {
    client: Client,
    timeout: Duration,
}

impl HttpPayloadSender {
    /// Builds a sender whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InvalidRequest`] if the HTTP client cannot be
    /// initialised (for example, the TLS backend fails to load).
    pub fn new(timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::InvalidRequest(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    /// Builds a sender bounded by the same timeout as the submit handler.
    ///
    /// # Errors
    ///
    /// See [`HttpPayloadSender::new`].
    pub fn from_config(config: &SubmitConfig) -> Result<Self, SubmitError> {
        Self::new(config.timeout)
    }

    fn classify(&self, e: reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.timeout)
        } else {
            SubmitError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl PayloadSender for HttpPayloadSender {
    async fn send(
        &self,
        target: &FormTarget,
        payload: &Map<String, Value>,
    ) -> Result<Value, SubmitError> {
        let method = Method::from_bytes(target.method().as_bytes())
            .map_err(|e| SubmitError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .request(method, target.url().clone())
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| SubmitError::InvalidResponse(e.to_string()))
    }
}
