use crate::domain::model::{is_usable, LanguageCode, TranslationOutcome};
use crate::domain::traits::TranslationProvider;
use tracing::{debug, warn};

/// Wraps one provider with a bridge-through-pivot strategy.
///
/// Direct translation first; if that fails or echoes the input, translate
/// `source → pivot → target`. The pivot hop is skipped when the pivot equals
/// either endpoint.
pub struct PivotTranslator<'a> {
    provider: &'a dyn TranslationProvider,
    pivot: &'a LanguageCode,
}

impl<'a> PivotTranslator<'a> {
    pub fn new(provider: &'a dyn TranslationProvider, pivot: &'a LanguageCode) -> Self {
        Self { provider, pivot }
    }

    pub async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> TranslationOutcome {
        if source == target {
            return TranslationOutcome::Translated(text.to_string());
        }

        if let Some(out) = self.attempt(text, source, target).await {
            return TranslationOutcome::Translated(out);
        }

        if !self.can_pivot(source, target) {
            return TranslationOutcome::Unresolved;
        }

        debug!(
            "{}: bridging {} -> {} via {}",
            self.provider.name(),
            source,
            target,
            self.pivot
        );
        let Some(bridge) = self.attempt(text, source, self.pivot).await else {
            return TranslationOutcome::Unresolved;
        };
        match self.attempt(&bridge, self.pivot, target).await {
            Some(out) => TranslationOutcome::Translated(out),
            None => TranslationOutcome::Unresolved,
        }
    }

    fn can_pivot(&self, source: &LanguageCode, target: &LanguageCode) -> bool {
        !self.pivot.is_auto()
            && self.pivot != source
            && self.pivot != target
            && self.provider.accepts(self.pivot)
    }

    /// One provider call; errors and echoes both count as "no result".
    async fn attempt(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Option<String> {
        match self.provider.translate_once(text, source, target).await {
            Ok(out) if is_usable(text, &out) => Some(out),
            Ok(_) => {
                debug!(
                    "{}: {} -> {} returned no usable text",
                    self.provider.name(),
                    source,
                    target
                );
                None
            }
            Err(e) => {
                warn!(
                    "{}: {} -> {} failed: {}",
                    self.provider.name(),
                    source,
                    target,
                    e
                );
                None
            }
        }
    }
}
