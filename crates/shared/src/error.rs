use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    ModelUnavailable,
    Internal,
}

/// Service-side failure as surfaced to the user: a code inferred from the
/// HTTP status and message text, plus the human-readable message itself.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Classifies a non-2xx response from its status and error message. The
    /// service only distinguishes failures by status and wording, so the
    /// mapping is message-based.
    pub fn from_status_message(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let code = if status == 400 {
            ErrorCode::Validation
        } else if lower.contains("model not available") || lower.contains("model unavailable") {
            ErrorCode::ModelUnavailable
        } else {
            ErrorCode::Internal
        };
        Self { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_400_classifies_as_validation() {
        let err =
            ApiError::from_status_message(400, "Please provide at least headline or body text");
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[test]
    fn missing_model_classifies_as_model_unavailable() {
        let err = ApiError::from_status_message(
            500,
            "Model not available. Please ensure model is trained and available locally or in S3.",
        );
        assert_eq!(err.code, ErrorCode::ModelUnavailable);
    }

    #[test]
    fn other_server_failures_classify_as_internal() {
        let err = ApiError::from_status_message(500, "prediction blew up");
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.to_string(), "prediction blew up");
    }
}
