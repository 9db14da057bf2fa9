use crate::application::pivot::PivotTranslator;
use crate::domain::model::{LanguageCode, TranslationOutcome, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered, first-success-wins chain of pivot-capable providers.
///
/// Providers are tried strictly one after another in configured order and
/// every call starts again from the top; no failure state is kept between
/// calls.
#[derive(Clone)]
pub struct CascadeResolver {
    providers: Vec<Arc<dyn TranslationProvider>>,
    pivot: LanguageCode,
}

impl CascadeResolver {
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>, pivot: LanguageCode) -> Self {
        Self { providers, pivot }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn pivot(&self) -> &LanguageCode {
        &self.pivot
    }

    pub async fn resolve_request(&self, request: &TranslationRequest) -> TranslationOutcome {
        self.resolve(&request.text, &request.source_hint, &request.target)
            .await
    }

    pub async fn resolve(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> TranslationOutcome {
        for provider in &self.providers {
            if !provider.accepts(target) || !provider.accepts(source) {
                debug!("{} does not handle {} -> {}", provider.name(), source, target);
                continue;
            }

            let outcome = PivotTranslator::new(provider.as_ref(), &self.pivot)
                .translate(text, source, target)
                .await;
            if outcome.is_translated() {
                info!("{} resolved {} -> {}", provider.name(), source, target);
                return outcome;
            }
            debug!("{} unresolved, moving on", provider.name());
        }

        TranslationOutcome::Unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::network::mock::{MockProvider, MockReply};

    fn code(s: &str) -> LanguageCode {
        LanguageCode::new(s)
    }

    #[tokio::test]
    async fn test_failing_provider_falls_through_in_order() {
        let a = Arc::new(MockProvider::new("a").default_reply(MockReply::Fail));
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::text("Hello")));
        let cascade = CascadeResolver::new(vec![a.clone(), b.clone()], code("en"));

        let outcome = cascade.resolve("你好", &code("zh"), &code("en")).await;

        assert_eq!(outcome, TranslationOutcome::Translated("Hello".to_string()));
        // pivot equals the target, so A gets exactly one direct attempt
        assert_eq!(a.call_count(), 1);
        assert_eq!(b.call_count(), 1);
    }

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let a = Arc::new(MockProvider::new("a").default_reply(MockReply::text("Hi")));
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::text("Hello")));
        let cascade = CascadeResolver::new(vec![a.clone(), b.clone()], code("en"));

        let outcome = cascade.resolve("你好", &code("zh"), &code("en")).await;

        assert_eq!(outcome, TranslationOutcome::Translated("Hi".to_string()));
        assert_eq!(b.call_count(), 0);
    }

    #[tokio::test]
    async fn test_echoing_provider_is_not_accepted() {
        let a = Arc::new(MockProvider::new("a").default_reply(MockReply::Echo));
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::text("Bonjour")));
        let cascade = CascadeResolver::new(vec![a.clone(), b], code("en"));

        let outcome = cascade.resolve("Hello there", &code("en"), &code("fr")).await;

        assert_eq!(outcome, TranslationOutcome::Translated("Bonjour".to_string()));
        assert_eq!(a.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_skipped() {
        let a = Arc::new(MockProvider::new("a").default_reply(MockReply::NotConfigured));
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::text("Hello")));
        let cascade = CascadeResolver::new(vec![a, b], code("en"));

        assert!(cascade
            .resolve("你好", &code("zh"), &code("en"))
            .await
            .is_translated());
    }

    #[tokio::test]
    async fn test_capability_filter() {
        let a = Arc::new(
            MockProvider::new("a")
                .with_capabilities(&["zh", "en"])
                .default_reply(MockReply::text("wrong")),
        );
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::text("สวัสดี")));
        let cascade = CascadeResolver::new(vec![a.clone(), b], code("en"));

        let outcome = cascade.resolve("你好", &code("zh"), &code("th")).await;

        assert_eq!(outcome, TranslationOutcome::Translated("สวัสดี".to_string()));
        assert_eq!(a.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_exhausted_is_unresolved() {
        let a = Arc::new(MockProvider::new("a"));
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::Echo));
        let cascade = CascadeResolver::new(vec![a.clone(), b.clone()], code("en"));

        let outcome = cascade.resolve("你好", &code("zh"), &code("ja")).await;

        assert_eq!(outcome, TranslationOutcome::Unresolved);
        // direct + first pivot hop for each provider
        assert_eq!(a.call_count(), 2);
        assert_eq!(b.call_count(), 2);
    }

    #[tokio::test]
    async fn test_each_call_restarts_from_the_top() {
        let a = Arc::new(MockProvider::new("a"));
        let b = Arc::new(MockProvider::new("b").default_reply(MockReply::text("Hello")));
        let cascade = CascadeResolver::new(vec![a.clone(), b], code("en"));

        cascade.resolve("你好", &code("zh"), &code("en")).await;
        cascade.resolve("再见", &code("zh"), &code("en")).await;

        assert_eq!(a.call_count(), 2);
    }
}
