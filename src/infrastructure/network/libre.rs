use crate::domain::error::ProviderError;
use crate::domain::model::LanguageCode;
use crate::domain::traits::{DetectionProvider, TranslationProvider};
use crate::infrastructure::network::http::{ensure_success, join_url};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

// LibreTranslate API request/response structures
#[derive(Serialize, Debug)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[derive(Serialize, Debug)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct DetectGuess {
    language: String,
    #[serde(default)]
    confidence: f64,
}

/// LibreTranslate adapter, also usable as a detection provider.
#[derive(Clone)]
pub struct LibreTranslateProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    capabilities: Vec<LanguageCode>,
    min_confidence: f64,
}

impl LibreTranslateProvider {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            capabilities: Vec::new(),
            min_confidence: 0.0,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<LanguageCode>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Guesses below this confidence count as "no answer" when detecting.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn name(&self) -> &str {
        "libretranslate"
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
        let url = join_url(&self.endpoint, "translate");
        let body = TranslateRequest {
            q: text,
            // LibreTranslate accepts "auto" as a source
            source: source.as_str(),
            target: target.as_str(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!("POST {} ({} -> {})", url, source, target);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        parse_translate_response(&response.text().await?)
    }
}

#[async_trait]
impl DetectionProvider for LibreTranslateProvider {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn detect(&self, text: &str) -> Result<LanguageCode, ProviderError> {
        let url = join_url(&self.endpoint, "detect");
        let body = DetectRequest {
            q: text,
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        parse_detect_response(&response.text().await?, self.min_confidence)
    }
}

/// Pull `translatedText` out of a `/translate` response body, verbatim.
pub fn parse_translate_response(body: &str) -> Result<String, ProviderError> {
    let parsed: TranslateResponse = serde_json::from_str(body)?;
    parsed
        .translated_text
        .ok_or(ProviderError::MissingField("translatedText"))
}

/// Take the first guess of a `/detect` response.
///
/// An empty list or a guess under `min_confidence` yields `auto`.
pub fn parse_detect_response(body: &str, min_confidence: f64) -> Result<LanguageCode, ProviderError> {
    let guesses: Vec<DetectGuess> = serde_json::from_str(body)?;
    Ok(match guesses.first() {
        Some(guess) if guess.confidence >= min_confidence => LanguageCode::new(&guess.language),
        _ => LanguageCode::auto(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_keeps_whitespace() {
        let text = parse_translate_response(r#"{"translatedText":"  Hello \n"}"#).unwrap();
        assert_eq!(text, "  Hello \n");
    }

    #[test]
    fn test_parse_translate_missing_field() {
        let err = parse_translate_response(r#"{"error":"bad"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MissingField("translatedText")));
    }

    #[test]
    fn test_parse_translate_malformed() {
        let err = parse_translate_response("<html>").unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[test]
    fn test_parse_detect_takes_first() {
        let body = r#"[{"language":"zh","confidence":92.0},{"language":"ja","confidence":40.0}]"#;
        assert_eq!(parse_detect_response(body, 0.0).unwrap().as_str(), "zh");
    }

    #[test]
    fn test_parse_detect_empty_and_low_confidence() {
        assert!(parse_detect_response("[]", 0.0).unwrap().is_auto());
        let body = r#"[{"language":"fr","confidence":10.0}]"#;
        assert!(parse_detect_response(body, 50.0).unwrap().is_auto());
    }

    #[test]
    fn test_request_omits_missing_api_key() {
        let body = TranslateRequest {
            q: "hi",
            source: "auto",
            target: "zh",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["format"], "text");
        assert!(json.get("api_key").is_none());
    }
}
