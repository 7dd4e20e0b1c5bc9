//! `POST {"question": ...}` → `{"answer": ...}` client

use async_trait::async_trait;
use hometown_application::{Answer, AnswerError, AnswerService, ServiceConfig};
use hometown_domain::Question;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while setting up the HTTP client
#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Answer service adapter speaking JSON over HTTP
pub struct HttpAnswerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnswerClient {
    /// Create a client for the configured endpoint.
    ///
    /// The endpoint is not validated here: a malformed URL surfaces as an
    /// [`AnswerError::InvalidRequest`] on the first `ask`.
    pub fn new(config: &ServiceConfig) -> Result<Self, HttpClientError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("hometown-chat/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl AnswerService for HttpAnswerClient {
    async fn ask(&self, question: &Question) -> Result<Answer, AnswerError> {
        debug!("POST {} ({} bytes)", self.endpoint, question.content().len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AskRequest {
                question: question.content(),
            })
            .send()
            .await
            .map_err(classify_error)?;

        // The service reports its own errors as JSON bodies without an
        // `answer` field; the status code alone does not decide the outcome.
        let status = response.status();
        if !status.is_success() {
            warn!(
                "Answer service replied {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
        }

        let body = response.bytes().await.map_err(classify_error)?;
        parse_answer(&body)
    }
}

/// Extract the answer from a response body.
///
/// Anything other than a JSON object with a string `answer` field is a
/// malformed payload: a missing field and a wrongly-typed one are not
/// distinguished. `sources`, when present, is read leniently.
pub fn parse_answer(body: &[u8]) -> Result<Answer, AnswerError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AnswerError::MalformedPayload(format!("body is not JSON: {}", e)))?;

    let text = value
        .get("answer")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AnswerError::MalformedPayload("no string field `answer` in response".to_string())
        })?;

    let sources = value
        .get("sources")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Answer::new(text).with_sources(sources))
}

fn classify_error(e: reqwest::Error) -> AnswerError {
    if e.is_timeout() {
        AnswerError::Timeout
    } else if e.is_builder() {
        AnswerError::InvalidRequest(describe(&e))
    } else {
        AnswerError::Transport(describe(&e))
    }
}

/// Flatten an error and its sources into one line
fn describe(e: &(dyn std::error::Error + 'static)) -> String {
    let mut description = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
