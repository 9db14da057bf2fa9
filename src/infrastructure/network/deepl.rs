// DeepL translation adapter
use crate::domain::error::ProviderError;
use crate::domain::model::LanguageCode;
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::network::http::{ensure_success, join_url};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com";
const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com";

#[derive(Serialize, Debug)]
struct DeepLRequest<'a> {
    text: [&'a str; 1],
    target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DeepLResponse {
    translations: Option<Vec<DeepLTranslation>>,
}

#[derive(Deserialize, Debug)]
struct DeepLTranslation {
    text: Option<String>,
}

pub struct DeepLProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    capabilities: Vec<LanguageCode>,
}

impl DeepLProvider {
    /// Free-tier keys end in `:fx` and live on a separate host.
    pub fn new(
        client: Client,
        api_key: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::NotConfigured("DeepL API key not set".to_string()))?;

        let endpoint = endpoint.unwrap_or_else(|| {
            if api_key.ends_with(":fx") {
                DEEPL_FREE_ENDPOINT.to_string()
            } else {
                DEEPL_PRO_ENDPOINT.to_string()
            }
        });

        Ok(Self {
            client,
            endpoint,
            api_key,
            capabilities: Vec::new(),
        })
    }

    pub fn with_capabilities(mut self, capabilities: Vec<LanguageCode>) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// DeepL wants upper-case codes and a regional variant for some targets.
fn target_code(code: &LanguageCode) -> String {
    match code.as_str() {
        "en" => "EN-US".to_string(),
        "pt" => "PT-BR".to_string(),
        "zh" => "ZH-HANS".to_string(),
        other => other.to_ascii_uppercase(),
    }
}

fn source_code(code: &LanguageCode) -> Option<String> {
    if code.is_auto() {
        None
    } else {
        Some(code.as_str().to_ascii_uppercase())
    }
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &str {
        "deepl"
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
        let url = join_url(&self.endpoint, "v2/translate");
        let body = DeepLRequest {
            text: [text],
            target_lang: target_code(target),
            source_lang: source_code(source),
        };

        debug!("POST {} ({} -> {})", url, source, target);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        parse_response(&response.text().await?)
    }
}

pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let parsed: DeepLResponse = serde_json::from_str(body)?;
    parsed
        .translations
        .and_then(|list| list.into_iter().next())
        .and_then(|t| t.text)
        .ok_or(ProviderError::MissingField("translations[0].text"))
}
