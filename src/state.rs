use crate::application::cascade::CascadeResolver;
use crate::application::detect::LanguageDetector;
use crate::application::relay::Relay;
use crate::application::session::TranslationSession;
use crate::domain::error::RelayError;
use crate::domain::traits::PairStore;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::registry::{build_detectors, build_providers};
use crate::infrastructure::storage::pairs::MemoryPairStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<TranslationSession>,
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, RelayError> {
        Self::with_store(config, Arc::new(MemoryPairStore::new()))
    }

    pub fn with_store(config: Config, pairs: Arc<dyn PairStore>) -> Result<Self, RelayError> {
        config.validate()?;
        let http_client = create_client(config.timeout())?;

        let providers = build_providers(&config, &http_client);
        if providers.is_empty() {
            return Err(RelayError::Config(
                "no translation provider could be configured".to_string(),
            ));
        }

        let session = Arc::new(TranslationSession::new(
            LanguageDetector::new(build_detectors(&config, &http_client)),
            CascadeResolver::new(providers, config.pivot()),
            pairs,
            config.fallback_prefix.clone(),
        ));
        let relay = Arc::new(Relay::new(
            session.clone(),
            config.supported(),
            config.max_message_chars,
        ));

        Ok(Self {
            config: Arc::new(config),
            session,
            relay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::{ProviderConfig, ProviderKind};

    #[test]
    fn test_default_state_builds() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.session.cascade().provider_names(), vec!["libretranslate"]);
        assert_eq!(state.session.cascade().pivot().as_str(), "en");
    }

    #[test]
    fn test_only_unkeyed_providers_is_an_error() {
        let mut config = Config::default();
        config.providers = vec![ProviderConfig::new(ProviderKind::Deepl)];
        assert!(matches!(
            AppState::new(config),
            Err(RelayError::Config(_))
        ));
    }
}
