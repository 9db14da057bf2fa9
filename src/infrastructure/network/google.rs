//! Google Translate API v2 adapter
//!
//! Authenticates with an API key passed as the `key` query parameter.
//! Also serves as a detection provider through the `/detect` endpoint.

use crate::domain::error::ProviderError;
use crate::domain::model::LanguageCode;
use crate::domain::traits::{DetectionProvider, TranslationProvider};
use crate::infrastructure::network::http::{ensure_success, join_url};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

const GOOGLE_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

pub struct GoogleTranslateProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    capabilities: Vec<LanguageCode>,
    min_confidence: f64,
}

impl GoogleTranslateProvider {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            ProviderError::NotConfigured("Google Translate API key not set".to_string())
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| GOOGLE_ENDPOINT.to_string()),
            api_key,
            capabilities: Vec::new(),
            min_confidence: 0.0,
        })
    }

    pub fn with_capabilities(mut self, capabilities: Vec<LanguageCode>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    async fn post(&self, url: &str, body: &Value) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn capabilities(&self) -> &[LanguageCode] {
        &self.capabilities
    }

    async fn translate_once(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, ProviderError> {
        let mut body = json!({
            "q": text,
            "target": target.as_str(),
            "format": "text"
        });
        // Omitting `source` switches Google to auto-detection
        if !source.is_auto() {
            body["source"] = json!(source.as_str());
        }

        debug!("POST {} ({} -> {})", self.endpoint, source, target);
        let raw = self.post(&self.endpoint, &body).await?;
        parse_translate_response(&raw)
    }
}

#[async_trait]
impl DetectionProvider for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn detect(&self, text: &str) -> Result<LanguageCode, ProviderError> {
        let url = join_url(&self.endpoint, "detect");
        let raw = self.post(&url, &json!({ "q": text })).await?;
        parse_detect_response(&raw, self.min_confidence)
    }
}

pub fn parse_translate_response(body: &str) -> Result<String, ProviderError> {
    let json: Value = serde_json::from_str(body)?;
    json["data"]["translations"][0]["translatedText"]
        .as_str()
        .map(str::to_string)
        .ok_or(ProviderError::MissingField("data.translations[0].translatedText"))
}

pub fn parse_detect_response(body: &str, min_confidence: f64) -> Result<LanguageCode, ProviderError> {
    let json: Value = serde_json::from_str(body)?;
    let guess = &json["data"]["detections"][0][0];
    let language = match guess["language"].as_str() {
        Some(language) => language,
        None => return Ok(LanguageCode::auto()),
    };
    let confidence = guess["confidence"].as_f64().unwrap_or(1.0);
    if confidence < min_confidence {
        return Ok(LanguageCode::auto());
    }
    Ok(LanguageCode::new(language))
}
