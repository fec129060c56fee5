//! # Translator Module
//!
//! Turns a Japanese source title into a Chinese one by asking an OpenAI-style
//! chat completion endpoint. The service is slow and unreliable, so every
//! lookup goes through a small policy:
//!
//! - up to [`MAX_ATTEMPTS`] requests, back to back, each bounded by the
//!   client's timeout
//! - if every attempt fails the source title is used unchanged
//!   ([`Translation::Fallback`]) and the errors are handed back to the caller
//!   for logging; nothing is raised
//! - with translation switched off no request is made at all
//!   ([`Translation::Passthrough`])
//!
//! Before a run the caller is expected to use
//! [`TranslatorClient::self_check`]; unlike per-title failures, a failing
//! self-check is fatal.

mod client;

pub use client::SELF_CHECK_TEXT;
pub use client::TranslationError;
pub use client::TranslatorClient;
pub use client::clean_response;
pub use client::prompt;

use crate::config::Settings;

pub const MAX_ATTEMPTS: usize = 3;

/// Outcome of translating one title.
#[derive(Debug)]
pub enum Translation {
    Translated(String),
    Fallback {
        text: String,
        errors: Vec<TranslationError>,
    },
    Passthrough(String),
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Translation::Translated(text) => text,
            Translation::Fallback { text, .. } => text,
            Translation::Passthrough(text) => text,
        }
    }

    /// Only real translations are worth remembering across runs.
    pub fn is_durable(&self) -> bool {
        matches!(self, Translation::Translated(_))
    }
}

#[derive(Debug, Clone)]
pub enum Translator {
    Remote(TranslatorClient),
    Passthrough,
}

impl Translator {
    pub fn from_settings(settings: &Settings) -> Result<Self, TranslationError> {
        if !settings.translate {
            return Ok(Translator::Passthrough);
        }

        let client = TranslatorClient::new(&settings.api_url, &settings.model, settings.timeout)?;
        Ok(Translator::Remote(client))
    }

    pub async fn translate(&self, source_title: &str) -> Translation {
        let client = match self {
            Translator::Remote(client) => client,
            Translator::Passthrough => return Translation::Passthrough(source_title.to_string()),
        };

        let mut errors = Vec::with_capacity(MAX_ATTEMPTS);
        for _ in 0..MAX_ATTEMPTS {
            match client.request(source_title).await {
                Ok(text) => return Translation::Translated(text),
                Err(e) => errors.push(e),
            }
        }

        Translation::Fallback {
            text: source_title.to_string(),
            errors,
        }
    }
}
