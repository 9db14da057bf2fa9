use crate::domain::model::LanguageCode;
use crate::domain::traits::DetectionProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Asks detection providers in priority order; first non-empty answer wins.
#[derive(Clone)]
pub struct LanguageDetector {
    providers: Vec<Arc<dyn DetectionProvider>>,
}

impl LanguageDetector {
    pub fn new(providers: Vec<Arc<dyn DetectionProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Never fails: returns the `auto` sentinel when no provider answers.
    pub async fn detect(&self, text: &str) -> LanguageCode {
        for provider in &self.providers {
            match provider.detect(text).await {
                Ok(code) if !code.is_auto() => {
                    debug!("{} detected {}", provider.name(), code);
                    return code;
                }
                Ok(_) => debug!("{} returned no language", provider.name()),
                Err(e) => warn!("{} detection failed: {}", provider.name(), e),
            }
        }
        LanguageCode::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::network::mock::MockDetector;

    #[tokio::test]
    async fn test_first_answer_wins() {
        let failing = Arc::new(MockDetector::new(None));
        let empty = Arc::new(MockDetector::new(Some("")));
        let zh = Arc::new(MockDetector::new(Some("zh-TW")));
        let never = Arc::new(MockDetector::new(Some("en")));
        let detector = LanguageDetector::new(vec![
            failing.clone(),
            empty.clone(),
            zh.clone(),
            never.clone(),
        ]);

        assert_eq!(detector.detect("你好").await.as_str(), "zh");
        assert_eq!(failing.call_count(), 1);
        assert_eq!(empty.call_count(), 1);
        assert_eq!(zh.call_count(), 1);
        assert_eq!(never.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_failing_yields_auto() {
        let detector = LanguageDetector::new(vec![
            Arc::new(MockDetector::new(None)),
            Arc::new(MockDetector::new(Some("unknown"))),
        ]);
        assert!(detector.detect("???").await.is_auto());
    }

    #[tokio::test]
    async fn test_no_providers_yields_auto() {
        assert!(LanguageDetector::new(Vec::new()).detect("hi").await.is_auto());
    }
}
