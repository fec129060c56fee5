use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};

use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Short, known-good input used to check the service before a run.
pub const SELF_CHECK_TEXT: &str = "こんにちは";

const LEADING_WRAPPERS: &[char] = &['_', '"', '\'', '（', '('];
const TRAILING_WRAPPERS: &[char] = &['_', '"', '\'', '）', ')'];

#[derive(Debug)]
pub enum TranslationError {
    Unreachable(reqwest::Error),
    Timeout,
    Status(StatusCode),
    MalformedBody(String),
    EmptyResponse,
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslationError::Timeout
        } else if err.is_decode() {
            TranslationError::MalformedBody(err.to_string())
        } else {
            TranslationError::Unreachable(err)
        }
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Unreachable(e) => write!(f, "service unreachable: {}", e),
            TranslationError::Timeout => write!(f, "request timed out"),
            TranslationError::Status(status) => write!(f, "service answered {}", status),
            TranslationError::MalformedBody(e) => write!(f, "malformed response: {}", e),
            TranslationError::EmptyResponse => write!(f, "service returned an empty translation"),
        }
    }
}

impl std::error::Error for TranslationError {}

/// HTTP client for an OpenAI-style chat completion endpoint.
#[derive(Debug, Clone)]
pub struct TranslatorClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl TranslatorClient {
    pub fn new(endpoint: &str, model: &str, timeout: Duration) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TranslationError::Unreachable)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a single translation request, without retrying.
    ///
    /// # Errors
    ///
    /// - [`TranslationError::Unreachable`] when the connection fails
    /// - [`TranslationError::Timeout`] when the configured timeout elapses
    /// - [`TranslationError::Status`] for any non-2xx answer
    /// - [`TranslationError::MalformedBody`] when the reply has no content
    /// - [`TranslationError::EmptyResponse`] when nothing is left after
    ///   cleaning the reply
    pub async fn request(&self, source_title: &str) -> Result<String, TranslationError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt(source_title),
            }],
            temperature: 0.0,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status(status));
        }

        let text = response.text().await?;
        let res: ChatResponse =
            serde_json::from_str(&text).map_err(|e| TranslationError::MalformedBody(e.to_string()))?;

        let content = res
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TranslationError::MalformedBody("no choices in response".to_string()))?;

        let cleaned = clean_response(&content);
        if cleaned.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        Ok(cleaned.to_string())
    }

    /// Translates [`SELF_CHECK_TEXT`] once. Used before touching any file.
    pub async fn self_check(&self) -> Result<String, TranslationError> {
        self.request(SELF_CHECK_TEXT).await
    }
}

pub fn prompt(source_title: &str) -> String {
    format!("请将以下日文翻译成中文：'{}'", source_title)
}

/// Strips quotes, brackets and underscores the model likes to wrap its
/// answer in.
pub fn clean_response(text: &str) -> &str {
    text.trim()
        .trim_start_matches(|c: char| c.is_whitespace() || LEADING_WRAPPERS.contains(&c))
        .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_WRAPPERS.contains(&c))
}
