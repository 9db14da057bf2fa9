// Build provider and detector chains from configuration
use crate::domain::model::LanguageCode;
use crate::domain::traits::{DetectionProvider, TranslationProvider};
use crate::infrastructure::config::{
    Config, DetectorKind, ProviderConfig, ProviderKind, DEFAULT_LT_ENDPOINT,
};
use crate::infrastructure::network::deepl::DeepLProvider;
use crate::infrastructure::network::google::GoogleTranslateProvider;
use crate::infrastructure::network::libre::LibreTranslateProvider;
use crate::infrastructure::network::local::LocalDetector;
use reqwest::Client;
use std::sync::Arc;
use tracing::warn;

fn capabilities(entry: &ProviderConfig) -> Vec<LanguageCode> {
    entry
        .languages
        .iter()
        .map(|s| LanguageCode::new(s))
        .filter(|c| !c.is_auto())
        .collect()
}

fn libre_from(client: &Client, entry: &ProviderConfig) -> LibreTranslateProvider {
    let endpoint = entry
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_LT_ENDPOINT.to_string());
    LibreTranslateProvider::new(client.clone(), endpoint, entry.api_key.clone())
}

/// Translation providers in configured priority order.
///
/// Entries that cannot be built (missing credentials) are skipped with a
/// warning rather than failing startup.
pub fn build_providers(config: &Config, client: &Client) -> Vec<Arc<dyn TranslationProvider>> {
    let mut providers: Vec<Arc<dyn TranslationProvider>> = Vec::new();

    for entry in &config.providers {
        let caps = capabilities(entry);
        match entry.kind {
            ProviderKind::Libre => {
                providers.push(Arc::new(libre_from(client, entry).with_capabilities(caps)));
            }
            ProviderKind::Deepl => {
                match DeepLProvider::new(client.clone(), entry.api_key.clone(), entry.endpoint.clone())
                {
                    Ok(p) => providers.push(Arc::new(p.with_capabilities(caps))),
                    Err(e) => warn!("Skipping DeepL provider: {}", e),
                }
            }
            ProviderKind::Google => {
                match GoogleTranslateProvider::new(
                    client.clone(),
                    entry.api_key.clone(),
                    entry.endpoint.clone(),
                ) {
                    Ok(p) => providers.push(Arc::new(p.with_capabilities(caps))),
                    Err(e) => warn!("Skipping Google provider: {}", e),
                }
            }
        }
    }

    providers
}

/// Detection providers in configured priority order.
///
/// `min_detect_confidence` is expressed on a 0..1 scale; LibreTranslate
/// reports percentages, so it is scaled for that backend.
pub fn build_detectors(config: &Config, client: &Client) -> Vec<Arc<dyn DetectionProvider>> {
    let min = config.min_detect_confidence;
    let mut detectors: Vec<Arc<dyn DetectionProvider>> = Vec::new();

    for kind in &config.detectors {
        match kind {
            DetectorKind::Libre => match config.provider(ProviderKind::Libre) {
                Some(entry) => {
                    let libre = libre_from(client, entry);
                    detectors.push(Arc::new(libre.with_min_confidence(min * 100.0)));
                }
                None => warn!("Skipping LibreTranslate detector: no libre provider configured"),
            },
            DetectorKind::Google => {
                let entry = config.provider(ProviderKind::Google);
                match GoogleTranslateProvider::new(
                    client.clone(),
                    entry.and_then(|e| e.api_key.clone()),
                    entry.and_then(|e| e.endpoint.clone()),
                ) {
                    Ok(p) => detectors.push(Arc::new(p.with_min_confidence(min))),
                    Err(e) => warn!("Skipping Google detector: {}", e),
                }
            }
            DetectorKind::Local => {
                detectors.push(Arc::new(LocalDetector::new().with_min_confidence(min)));
            }
        }
    }

    detectors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unkeyed_providers_are_skipped() {
        let mut config = Config::default();
        config.providers.push(ProviderConfig::new(ProviderKind::Deepl));
        config.providers.push(ProviderConfig::new(ProviderKind::Google));

        let providers = build_providers(&config, &Client::new());
        let names: Vec<_> = providers.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["libretranslate"]);
    }

    #[test]
    fn test_provider_order_follows_config() {
        let mut config = Config::default();
        let mut google = ProviderConfig::new(ProviderKind::Google);
        google.api_key = Some("g".to_string());
        let mut deepl = ProviderConfig::new(ProviderKind::Deepl);
        deepl.api_key = Some("d:fx".to_string());
        config.providers = vec![google, config.providers[0].clone(), deepl];

        let providers = build_providers(&config, &Client::new());
        let names: Vec<_> = providers.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["google", "libretranslate", "deepl"]);
    }

    #[test]
    fn test_capabilities_are_applied() {
        let mut config = Config::default();
        config.providers[0].languages = vec!["zh".to_string(), "en".to_string()];

        let providers = build_providers(&config, &Client::new());
        assert!(providers[0].accepts(&LanguageCode::new("zh")));
        assert!(!providers[0].accepts(&LanguageCode::new("th")));
    }

    #[test]
    fn test_default_detectors() {
        let detectors = build_detectors(&Config::default(), &Client::new());
        let names: Vec<_> = detectors.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["libretranslate", "local"]);
    }

    #[test]
    fn test_libre_detector_needs_libre_provider() {
        let mut deepl = ProviderConfig::new(ProviderKind::Deepl);
        deepl.api_key = Some("d:fx".to_string());
        let mut config = Config::default();
        config.providers = vec![deepl];

        let detectors = build_detectors(&config, &Client::new());
        let names: Vec<_> = detectors.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["local"]);
    }

    #[test]
    fn test_libre_detector_uses_configured_endpoint() {
        let mut config = Config::default();
        config.providers[0].endpoint = Some("http://localhost:5000".to_string());
        config.detectors = vec![DetectorKind::Libre];

        let detectors = build_detectors(&config, &Client::new());
        assert_eq!(detectors.len(), 1);
        assert_eq!(detectors[0].name(), "libretranslate");
    }

    #[test]
    fn test_google_detector_without_key_is_skipped() {
        let mut config = Config::default();
        config.detectors = vec![DetectorKind::Google, DetectorKind::Local];
        let detectors = build_detectors(&config, &Client::new());
        assert_eq!(detectors.len(), 1);
    }
}
