use crate::domain::error::ProviderError;
use crate::domain::model::{LanguageCode, LanguagePair};
use async_trait::async_trait;

/// Trait for translation backends
///
/// One implementation per provider (LibreTranslate, DeepL, Google, ...).
/// Adapters make exactly one attempt per call; retrying belongs to the
/// cascade.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Name used in logs and status output
    fn name(&self) -> &str;

    /// Languages this provider accepts as source or target.
    /// An empty slice means "anything".
    fn capabilities(&self) -> &[LanguageCode] {
        &[]
    }

    fn accepts(&self, code: &LanguageCode) -> bool {
        let caps = self.capabilities();
        code.is_auto() || caps.is_empty() || caps.contains(code)
    }

    /// Translate once. `source` may be the `auto` sentinel.
    ///
    /// The provider's text is returned verbatim, whitespace included.
    async fn translate_once(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, ProviderError>;
}

/// Trait for language detection backends
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Best guess for `text`; an empty/`auto` code counts as no answer.
    async fn detect(&self, text: &str) -> Result<LanguageCode, ProviderError>;
}

/// Per-user language pair storage
///
/// Implementations own the data; callers only take snapshots.
pub trait PairStore: Send + Sync {
    fn get(&self, user_id: &str) -> Option<LanguagePair>;

    fn set(&self, user_id: &str, pair: LanguagePair);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
