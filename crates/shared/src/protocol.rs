use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Verdict;

/// Body of `POST /predict`. Fields are trimmed before they ever reach the
/// wire; `trimmed` is the only intended constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub headline: String,
    pub body: String,
    pub url: String,
}

impl PredictRequest {
    pub fn trimmed(headline: &str, body: &str, url: &str) -> Self {
        Self {
            headline: headline.trim().to_string(),
            body: body.trim().to_string(),
            url: url.trim().to_string(),
        }
    }

    /// True when neither primary text field carries content. Such a request
    /// must be rejected client-side, never submitted.
    pub fn is_empty_submission(&self) -> bool {
        self.headline.is_empty() && self.body.is_empty()
    }
}

/// Raw prediction label as the service emits it: a string for fitted text
/// labels, a number for class indices. Untagged so either shape decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionLabel {
    Text(String),
    Int(i64),
    Float(f64),
}

impl PredictionLabel {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_wire(&self.to_string())
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionLabel::Text(s) => f.write_str(s),
            PredictionLabel::Int(n) => write!(f, "{n}"),
            PredictionLabel::Float(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySplit {
    pub fake: f64,
    pub real: f64,
}

/// Successful response of `POST /predict`, consumed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: PredictionLabel,
    pub confidence: f64,
    pub probabilities: ProbabilitySplit,
}

/// Failure body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_all_request_fields() {
        let request = PredictRequest::trimmed("  headline ", "\tbody\n", " https://x ");
        assert_eq!(request.headline, "headline");
        assert_eq!(request.body, "body");
        assert_eq!(request.url, "https://x");
    }

    #[test]
    fn empty_submission_ignores_url() {
        let request = PredictRequest::trimmed("  ", "", "https://example.com/article");
        assert!(request.is_empty_submission());

        let with_headline = PredictRequest::trimmed("Breaking", "", "");
        assert!(!with_headline.is_empty_submission());

        let with_body = PredictRequest::trimmed("", "some text", "");
        assert!(!with_body.is_empty_submission());
    }

    #[test]
    fn decodes_string_and_numeric_prediction_labels() {
        let text: PredictResponse = serde_json::from_str(
            r#"{"prediction":"fake","confidence":0.87,"probabilities":{"fake":0.87,"real":0.13}}"#,
        )
        .expect("text label");
        assert_eq!(text.prediction, PredictionLabel::Text("fake".to_string()));
        assert_eq!(text.prediction.verdict(), Verdict::Fake);

        let numeric: PredictResponse = serde_json::from_str(
            r#"{"prediction":1,"confidence":0.95,"probabilities":{"fake":0.05,"real":0.95}}"#,
        )
        .expect("numeric label");
        assert_eq!(numeric.prediction, PredictionLabel::Int(1));
        assert_eq!(numeric.prediction.verdict(), Verdict::Real);
    }

    #[test]
    fn unexpected_label_maps_to_other_verdict() {
        let response: PredictResponse = serde_json::from_str(
            r#"{"prediction":"unexpected","confidence":0.5,"probabilities":{"fake":0.5,"real":0.5}}"#,
        )
        .expect("decode");
        assert_eq!(
            response.prediction.verdict(),
            Verdict::Other("unexpected".to_string())
        );
    }

    #[test]
    fn error_body_round_trips() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"model unavailable"}"#).expect("decode");
        assert_eq!(body.error, "model unavailable");
    }
}
