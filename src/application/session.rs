use crate::application::cascade::CascadeResolver;
use crate::application::detect::LanguageDetector;
use crate::application::direction::{resolve_direction, resolve_target, Direction};
use crate::domain::model::{LanguageCode, LanguagePair, TranslationOutcome, TranslationRequest};
use crate::domain::traits::PairStore;
use futures_util::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Substituted for anything that would otherwise be an empty message
pub const EMPTY_PLACEHOLDER: &str = "(empty result)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Translated,
    /// Detected language already equals the target; text returned untouched
    SameLanguage,
    /// Every provider failed; text is the annotated original
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub text: String,
    pub detected: LanguageCode,
    pub target: Option<LanguageCode>,
    pub direction: Option<Direction>,
    pub kind: ResolutionKind,
}

/// Entry point for the transport: detection, routing, cascade and the
/// terminal fallback in one call that never fails.
pub struct TranslationSession {
    detector: LanguageDetector,
    cascade: CascadeResolver,
    pairs: Arc<dyn PairStore>,
    fallback_prefix: String,
}

impl TranslationSession {
    pub fn new(
        detector: LanguageDetector,
        cascade: CascadeResolver,
        pairs: Arc<dyn PairStore>,
        fallback_prefix: impl Into<String>,
    ) -> Self {
        Self {
            detector,
            cascade,
            pairs,
            fallback_prefix: fallback_prefix.into(),
        }
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    pub fn cascade(&self) -> &CascadeResolver {
        &self.cascade
    }

    pub fn pairs(&self) -> &Arc<dyn PairStore> {
        &self.pairs
    }

    /// Translate `raw` for a user with `pair`.
    ///
    /// Always returns a non-empty string. On total failure that is the
    /// original text behind the fallback marker; callers should treat it as
    /// a degraded success, not an error.
    pub async fn translate_for_user(&self, pair: &LanguagePair, raw: &str) -> String {
        self.resolve_for_user(pair, raw).await.text
    }

    /// Like [`translate_for_user`](Self::translate_for_user), reading the
    /// pair from the store. `None` if the user has not paired yet.
    pub async fn translate_for(&self, user_id: &str, raw: &str) -> Option<String> {
        let pair = self.pairs.get(user_id)?;
        Some(self.translate_for_user(&pair, raw).await)
    }

    pub async fn resolve_for_user(&self, pair: &LanguagePair, raw: &str) -> Resolution {
        if raw.trim().is_empty() {
            return Resolution {
                text: EMPTY_PLACEHOLDER.to_string(),
                detected: LanguageCode::auto(),
                target: None,
                direction: None,
                kind: ResolutionKind::Fallback,
            };
        }

        let span = info_span!("message", id = %Uuid::new_v4());
        match AssertUnwindSafe(self.run(pair, raw))
            .catch_unwind()
            .instrument(span)
            .await
        {
            Ok(resolution) => resolution,
            Err(_) => {
                error!("translation pipeline panicked; returning original text");
                self.fallback(raw, LanguageCode::auto(), None, None)
            }
        }
    }

    async fn run(&self, pair: &LanguagePair, raw: &str) -> Resolution {
        let detected = self.detector.detect(raw).await;
        let direction = resolve_direction(pair, &detected);
        let target = resolve_target(pair, &detected);

        if detected == target {
            info!("{} message needs no translation", detected);
            return Resolution {
                text: raw.to_string(),
                detected,
                target: Some(target),
                direction: Some(direction),
                kind: ResolutionKind::SameLanguage,
            };
        }

        let request = match TranslationRequest::new(raw, detected.clone(), target.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!("{}", e);
                return self.fallback(raw, detected, Some(target), Some(direction));
            }
        };

        match self.cascade.resolve_request(&request).await {
            TranslationOutcome::Translated(text) => Resolution {
                text,
                detected,
                target: Some(target),
                direction: Some(direction),
                kind: ResolutionKind::Translated,
            },
            TranslationOutcome::Unresolved => {
                warn!("all providers failed for {} -> {}", detected, target);
                self.fallback(raw, detected, Some(target), Some(direction))
            }
        }
    }

    fn fallback(
        &self,
        raw: &str,
        detected: LanguageCode,
        target: Option<LanguageCode>,
        direction: Option<Direction>,
    ) -> Resolution {
        Resolution {
            text: format!("{}{}", self.fallback_prefix, raw),
            detected,
            target,
            direction,
            kind: ResolutionKind::Fallback,
        }
    }
}
