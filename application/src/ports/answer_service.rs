//! Answer service port
//!
//! Defines the interface for asking the remote answer-providing service.

use async_trait::async_trait;
use hometown_domain::{Question, Resolution};
use thiserror::Error;

/// A well-formed answer from the service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Answer {
    /// The answer text, used verbatim as the assistant message
    pub text: String,
    /// Names of the documents the answer was drawn from, when reported
    pub sources: Vec<String>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn into_resolution(self) -> Resolution {
        Resolution::Answered(self.text)
    }
}

/// Errors that can occur while asking the answer service
///
/// A malformed payload (the request went through but no answer string
/// could be extracted) is kept apart from transport failures because the
/// two resolve to different transcript entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("{0}")]
    Transport(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("The request timed out.")]
    Timeout,

    #[error("Malformed response: {0}")]
    MalformedPayload(String),
}

impl AnswerError {
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, AnswerError::MalformedPayload(_))
    }

    /// Classify this failure for the transcript
    pub fn into_resolution(self) -> Resolution {
        match self {
            AnswerError::MalformedPayload(_) => Resolution::NoData,
            other => Resolution::TransportFailure(other.to_string()),
        }
    }
}

/// Gateway to the answer service
///
/// One call is one unary request yielding one terminal outcome.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask a question and wait for the answer
    async fn ask(&self, question: &Question) -> Result<Answer, AnswerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hometown_domain::NO_DATA_TEXT;

    #[test]
    fn test_malformed_payload_maps_to_no_data() {
        let resolution = AnswerError::MalformedPayload("missing field `answer`".into())
            .into_resolution();
        assert_eq!(resolution, Resolution::NoData);
        assert_eq!(resolution.text(), NO_DATA_TEXT);
    }

    #[test]
    fn test_transport_maps_to_error_text() {
        let resolution = AnswerError::Transport("connection refused".into()).into_resolution();
        assert_eq!(
            resolution,
            Resolution::TransportFailure("connection refused".into())
        );
        assert_eq!(resolution.text(), "Error: connection refused");
    }

    #[test]
    fn test_timeout_and_invalid_request_are_transport_failures() {
        assert_eq!(
            AnswerError::Timeout.into_resolution().text(),
            "Error: The request timed out."
        );
        assert!(matches!(
            AnswerError::InvalidRequest("relative URL without a base".into()).into_resolution(),
            Resolution::TransportFailure(_)
        ));
    }

    #[test]
    fn test_answer_into_resolution() {
        let answer = Answer::new("Hi").with_sources(vec!["market.md".into()]);
        assert_eq!(answer.sources, vec!["market.md".to_string()]);
        assert_eq!(answer.into_resolution(), Resolution::Answered("Hi".into()));
    }
}
