//! Microsoft Translator v3 client.

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{TranslateRequest, TranslationError, TranslationServiceTrait};

pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";
pub const DEFAULT_REGION: &str = "eastus";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub region: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

#[derive(Serialize)]
struct TextItem<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct TranslationItem {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

pub struct MicrosoftTranslator {
    http: reqwest::Client,
    config: TranslatorConfig,
}

impl MicrosoftTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslationError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    fn build_request(&self, key: &str, request: &TranslateRequest) -> reqwest::RequestBuilder {
        let url = format!("{}/translate", self.config.endpoint.trim_end_matches('/'));
        self.http
            .post(url)
            .query(&[
                ("api-version", "3.0"),
                ("from", request.source()),
                ("to", request.target_language.as_str()),
            ])
            .header("Ocp-Apim-Subscription-Key", key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .json(&[TextItem {
                text: &request.text,
            }])
    }

    async fn request(&self, request: &TranslateRequest) -> Result<String, TranslationError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(TranslationError::MissingKey)?;

        let response = self.build_request(key, request).send().await?;

        if !response.status().is_success() {
            return Err(TranslationError::Status(response.status().as_u16()));
        }

        let items: Vec<TranslationItem> = response.json().await?;
        first_translation(items)
    }
}

fn first_translation(items: Vec<TranslationItem>) -> Result<String, TranslationError> {
    items
        .into_iter()
        .next()
        .and_then(|item| item.translations.into_iter().next())
        .map(|t| t.text)
        .filter(|text| !text.is_empty())
        .ok_or(TranslationError::EmptyReply)
}

#[async_trait]
impl TranslationServiceTrait for MicrosoftTranslator {
    async fn translate(&self, request: TranslateRequest) -> String {
        if request.is_passthrough() {
            return request.text;
        }
        match self.request(&request).await {
            Ok(text) => {
                debug!("Translated {} chars to {}", request.text.len(), request.target_language);
                text
            }
            Err(err) => {
                warn!("Translation to {} failed, returning input: {}", request.target_language, err);
                request.text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_translator() -> MicrosoftTranslator {
        MicrosoftTranslator::new(TranslatorConfig {
            endpoint: "https://api.example.com/".to_string(),
            ..TranslatorConfig::default()
        })
        .unwrap()
    }

    fn query_of(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn builds_v3_url() {
        let request = example_translator()
            .build_request("key", &TranslateRequest::new("Hello", "de"))
            .build()
            .unwrap();
        assert_eq!(request.url().path(), "/translate");
        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/translate?api-version=3.0&from=en&to=de"
        );
    }

    #[test]
    fn language_codes_are_encoded_as_single_values() {
        let request = example_translator()
            .build_request("key", &TranslateRequest::new("Hello", "de&api-version=2.0"))
            .build()
            .unwrap();
        let pairs = query_of(&request);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&("to".to_string(), "de&api-version=2.0".to_string())));
        assert_eq!(
            pairs.iter().filter(|(k, _)| k == "api-version").count(),
            1
        );
    }

    #[test]
    fn reads_first_translation() {
        let items: Vec<TranslationItem> =
            serde_json::from_str(r#"[{"translations":[{"text":"Hallo","to":"de"}]}]"#).unwrap();
        assert_eq!(first_translation(items).unwrap(), "Hallo");

        let empty: Vec<TranslationItem> = serde_json::from_str("[]").unwrap();
        assert!(matches!(
            first_translation(empty),
            Err(TranslationError::EmptyReply)
        ));
    }

    #[tokio::test]
    async fn missing_key_echoes_input() {
        let translator = MicrosoftTranslator::new(TranslatorConfig::default()).unwrap();
        let out = translator
            .translate(TranslateRequest::new("Balanced portfolio", "de"))
            .await;
        assert_eq!(out, "Balanced portfolio");
    }

    #[tokio::test]
    async fn unreachable_endpoint_echoes_input() {
        let translator = MicrosoftTranslator::new(TranslatorConfig {
            api_key: Some("test-key".to_string()),
            endpoint: "http://127.0.0.1:9".to_string(),
            ..TranslatorConfig::default()
        })
        .unwrap();
        let out = translator
            .translate(TranslateRequest::new("Cash", "fr"))
            .await;
        assert_eq!(out, "Cash");
    }
}
