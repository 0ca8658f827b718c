//! Text translation for the dashboard.
//!
//! Translation is best effort: callers always get text back. When the
//! target is English, or the API cannot be reached, the input is returned
//! unchanged.

mod error;
mod microsoft;

pub use error::TranslationError;
pub use microsoft::{MicrosoftTranslator, TranslatorConfig};

use async_trait::async_trait;
use std::sync::Mutex;

/// Language the stored content is written in.
pub const SOURCE_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
    /// Defaults to [`SOURCE_LANGUAGE`]
    pub source_language: Option<String>,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: None,
        }
    }

    pub fn source(&self) -> &str {
        self.source_language.as_deref().unwrap_or(SOURCE_LANGUAGE)
    }

    /// Nothing to do for English targets or blank text.
    pub fn is_passthrough(&self) -> bool {
        self.target_language.eq_ignore_ascii_case(SOURCE_LANGUAGE) || self.text.trim().is_empty()
    }
}

#[async_trait]
pub trait TranslationServiceTrait: Send + Sync {
    /// Never fails; returns the input text when translation is not possible.
    async fn translate(&self, request: TranslateRequest) -> String;
}

/// Test double that tags the text with the target language.
#[derive(Default)]
pub struct FakeTranslator {
    calls: Mutex<Vec<TranslateRequest>>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that reached the "API", i.e. were not passed through.
    pub fn calls(&self) -> Vec<TranslateRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TranslationServiceTrait for FakeTranslator {
    async fn translate(&self, request: TranslateRequest) -> String {
        if request.is_passthrough() {
            return request.text;
        }
        let tagged = format!("[{}] {}", request.target_language, request.text);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        tagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn english_target_is_passed_through() {
        let fake = FakeTranslator::new();
        let out = fake.translate(TranslateRequest::new("Portfolio", "en")).await;
        assert_eq!(out, "Portfolio");
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn source_defaults_to_english() {
        let mut request = TranslateRequest::new("x", "fr");
        assert_eq!(request.source(), "en");
        request.source_language = Some("de".to_string());
        assert_eq!(request.source(), "de");
        assert!(TranslateRequest::new("  ", "fr").is_passthrough());
        assert!(TranslateRequest::new("Hello", "EN").is_passthrough());
    }
}
