//! UI/backend events and error modeling for the desktop controller.

use client_core::ClientError;
use shared::protocol::PredictResponse;

pub enum UiEvent {
    /// Backend worker finished starting and can accept commands.
    WorkerReady,
    /// A prediction completed; the payload is the raw service response.
    VerdictReady(PredictResponse),
    HealthOk { status: String },
    HealthFailed { reason: String },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    WorkerStartup,
    Predict,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    /// Typed classification at the client seam. Preferred over
    /// `from_message` wherever a `ClientError` value is still in hand.
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::EmptySubmission | ClientError::InvalidServerUrl { .. } => {
                UiErrorCategory::Validation
            }
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Api(_) | ClientError::Decode(_) => UiErrorCategory::Server,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Fallback classification for failures that only exist as text, e.g.
    /// worker startup errors and channel breakdowns.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("provide at least") || lower.contains("invalid") {
            UiErrorCategory::Validation
        } else if lower.contains("connection")
            || lower.contains("timed out")
            || lower.contains("dns")
            || lower.contains("network")
            || lower.contains("request failed")
            || lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if lower.contains("model") || lower.contains("prediction") {
            UiErrorCategory::Server
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn category_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Server => "Service",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{ApiError, ErrorCode};

    #[test]
    fn classifies_typed_client_errors_by_variant() {
        let validation =
            UiError::from_client_error(UiErrorContext::Predict, &ClientError::EmptySubmission);
        assert_eq!(validation.category(), UiErrorCategory::Validation);

        let api = ClientError::Api(ApiError::new(ErrorCode::ModelUnavailable, "model unavailable"));
        let server = UiError::from_client_error(UiErrorContext::Predict, &api);
        assert_eq!(server.category(), UiErrorCategory::Server);
        assert_eq!(server.message(), "model unavailable");
    }

    #[test]
    fn classifies_channel_breakdown_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unrecognized_text_falls_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::General, "something odd happened");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
    }
}
