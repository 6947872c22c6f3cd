//! HTTP client for the news verification service.
//!
//! Owns the only network path in the workspace: `POST /predict` to submit an
//! article and `GET /health` to probe the service. Input validation happens
//! here so an empty submission is rejected before a request is ever issued.

use async_trait::async_trait;
use reqwest::Client;
use shared::error::ApiError;
use shared::protocol::{ErrorBody, HealthResponse, PredictRequest, PredictResponse};
use thiserror::Error;
use uuid::Uuid;

/// Correlation header attached to every request and echoed into logs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Validation message for a submission with no headline and no body text.
pub const EMPTY_SUBMISSION_MESSAGE: &str = "Please provide at least a headline or body text.";

/// Shown when the service fails without a parseable error body.
pub const GENERIC_FAILURE_MESSAGE: &str = "Prediction failed";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", EMPTY_SUBMISSION_MESSAGE)]
    EmptySubmission,

    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },

    /// The service answered and reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never completed: connection refused, DNS, broken stream.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 2xx with a body that is not a prediction.
    #[error("unexpected response from prediction service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// True for the client-side validation failure that never reaches the
    /// network, as opposed to a request that was issued and failed.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::EmptySubmission)
    }
}

/// Seam between surfaces (GUI worker, CLI) and the network, so tests can
/// substitute a double.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ClientError>;
    async fn health(&self) -> Result<HealthResponse, ClientError>;
}

#[derive(Debug)]
pub struct PredictionClient {
    http: Client,
    server_url: String,
}

impl PredictionClient {
    /// Builds a client for the given base URL. The URL is validated eagerly
    /// so a misconfigured server address surfaces at startup, not on first
    /// submit. No request timeout is set; an in-flight call waits on the
    /// network layer's own behavior.
    pub fn new(server_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let server_url = server_url.as_ref().trim().trim_end_matches('/').to_string();
        url::Url::parse(&server_url).map_err(|source| ClientError::InvalidServerUrl {
            url: server_url.clone(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            server_url,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Turns a raw response body into a verdict or a typed failure. Bodies
    /// carrying an `error` field count as failures even on a 2xx status.
    fn parse_predict_body(
        status: reqwest::StatusCode,
        body: &str,
    ) -> Result<PredictResponse, ClientError> {
        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
            return Err(ApiError::from_status_message(status.as_u16(), error).into());
        }
        if !status.is_success() {
            return Err(
                ApiError::from_status_message(status.as_u16(), GENERIC_FAILURE_MESSAGE).into(),
            );
        }
        Ok(serde_json::from_str(body)?)
    }
}

#[async_trait]
impl PredictionApi for PredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ClientError> {
        if request.is_empty_submission() {
            return Err(ClientError::EmptySubmission);
        }

        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            headline_len = request.headline.len(),
            body_len = request.body.len(),
            has_url = !request.url.is_empty(),
            "submitting article for prediction"
        );

        let response = self
            .http
            .post(format!("{}/predict", self.server_url))
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        match Self::parse_predict_body(status, &body) {
            Ok(parsed) => {
                tracing::info!(
                    %request_id,
                    prediction = %parsed.prediction,
                    confidence = parsed.confidence,
                    "verdict received"
                );
                Ok(parsed)
            }
            Err(err) => {
                tracing::warn!(%request_id, status = status.as_u16(), "prediction failed: {err}");
                Err(err)
            }
        }
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.server_url))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("health check returned status {}", status.as_u16()));
            return Err(ApiError::from_status_message(status.as_u16(), message).into());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
