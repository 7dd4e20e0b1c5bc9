//! HTTP adapter for the answer service.
//!
//! Provides [`HttpAnswerClient`], a `reqwest` client that implements the
//! [`AnswerService`](hometown_application::AnswerService) port.

mod answer_client;

pub use answer_client::{HttpAnswerClient, HttpClientError, parse_answer};
