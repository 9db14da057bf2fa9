// Offline trigram detector, used when no detection endpoint answers
use crate::domain::error::ProviderError;
use crate::domain::model::LanguageCode;
use crate::domain::traits::DetectionProvider;
use async_trait::async_trait;
use whatlang::Lang;

#[derive(Debug, Clone, Default)]
pub struct LocalDetector {
    min_confidence: f64,
}

impl LocalDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// whatlang confidence is in `0.0..=1.0`
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn detect_sync(&self, text: &str) -> LanguageCode {
        let info = match whatlang::detect(text) {
            Some(info) if info.confidence() >= self.min_confidence => info,
            _ => return LanguageCode::auto(),
        };

        let code = match info.lang() {
            Lang::Eng => "en",
            Lang::Cmn => "zh",
            Lang::Jpn => "ja",
            Lang::Kor => "ko",
            Lang::Tha => "th",
            Lang::Vie => "vi",
            Lang::Fra => "fr",
            Lang::Deu => "de",
            Lang::Spa => "es",
            Lang::Ita => "it",
            Lang::Por => "pt",
            Lang::Rus => "ru",
            Lang::Ukr => "uk",
            Lang::Ara => "ar",
            Lang::Hin => "hi",
            Lang::Nld => "nl",
            Lang::Tur => "tr",
            Lang::Pol => "pl",
            Lang::Swe => "sv",
            // no two-letter mapping; let the direction policy treat it as unknown
            _ => return LanguageCode::auto(),
        };
        LanguageCode::new(code)
    }
}

#[async_trait]
impl DetectionProvider for LocalDetector {
    fn name(&self) -> &str {
        "local"
    }

    async fn detect(&self, text: &str) -> Result<LanguageCode, ProviderError> {
        Ok(self.detect_sync(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_common_scripts() {
        let detector = LocalDetector::new();
        assert_eq!(
            detector
                .detect_sync("This is a longer English sentence to ensure correct detection.")
                .as_str(),
            "en"
        );
        assert_eq!(detector.detect_sync("今天天气很好，我们一起去公园散步吧").as_str(), "zh");
    }

    #[test]
    fn test_empty_text_is_auto() {
        assert!(LocalDetector::new().detect_sync("").is_auto());
    }
}
