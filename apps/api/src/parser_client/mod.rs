//! Parser client: the only outbound HTTP surface of the service.
//!
//! Talks to the sibling extraction service: `GET /resume/parse` turns an
//! uploaded object into text + metadata, `POST /session/chat` relays a
//! question to an existing session.
//!
//! One attempt per call. No retry on timeout, transport failure or 5xx.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::metadata::Metadata;

#[cfg(test)]
pub mod stub;

/// Hard ceiling on a single parser round-trip.
pub const PARSE_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("parser did not answer within {0:?}")]
    Timeout(Duration),

    #[error("failed to reach parser: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("parser responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode parser response: {0}")]
    Decode(String),
}

impl From<ParserError> for AppError {
    fn from(err: ParserError) -> Self {
        match &err {
            ParserError::Timeout(_) => AppError::UpstreamTimeout(err.to_string()),
            ParserError::Unreachable(_) => AppError::UpstreamUnavailable(err.to_string()),
            ParserError::Status { status, .. } if *status >= 500 => {
                AppError::UpstreamUnavailable(err.to_string())
            }
            ParserError::Status { .. } | ParserError::Decode(_) => {
                AppError::UpstreamProtocol(err.to_string())
            }
        }
    }
}

/// What the parser extracted from one document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParsedResume {
    pub text_content: String,
    pub session_id: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    session_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub session_id: String,
}

/// The parser contract. `AppState` carries it as `Arc<dyn ResumeParser>`.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, file_name: &str, auth_token: &str) -> Result<ParsedResume, ParserError>;

    async fn chat(&self, session_id: &str, question: &str) -> Result<ChatReply, ParserError>;
}

#[derive(Clone)]
pub struct HttpResumeParser {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpResumeParser {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ParserError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ParserError::Unreachable)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> ParserError {
        if err.is_timeout() {
            ParserError::Timeout(self.timeout)
        } else {
            ParserError::Unreachable(err)
        }
    }

    /// Reads the full body and decodes it, rejecting non-success statuses first.
    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ParserError> {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!("Parser returned {}: {}", status, body);
            return Err(ParserError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ParserError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ResumeParser for HttpResumeParser {
    async fn parse(&self, file_name: &str, auth_token: &str) -> Result<ParsedResume, ParserError> {
        let url = format!("{}/resume/parse", self.base_url);
        debug!("Calling parser for {file_name}");

        let response = self
            .client
            .get(&url)
            .query(&[("fileName", file_name)])
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, auth_token)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.read_json(response).await
    }

    async fn chat(&self, session_id: &str, question: &str) -> Result<ChatReply, ParserError> {
        let url = format!("{}/session/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                session_id,
                message: question,
            })
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.read_json(response).await
    }
}
