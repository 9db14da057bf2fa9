//! Scripted providers for exercising the pipeline without network access
//!
//! Replies are chosen per `(source, target)` route with a fallback default,
//! and every call is recorded so tests can assert on order and count.
//!
//! ```ignore
//! let provider = MockProvider::new("a")
//!     .route("zh", "en", MockReply::text("Hello"))
//!     .default_reply(MockReply::Fail);
//! ```

use crate::domain::error::ProviderError;
use crate::domain::model::LanguageCode;
use crate::domain::traits::{DetectionProvider, TranslationProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Return this text verbatim
    Text(String),
    /// Return the input unchanged
    Echo,
    /// Append the target code: "hello" → "hello_fr"
    Suffix,
    /// Fail with a transport-like error
    Fail,
    /// Fail as an adapter without credentials would
    NotConfigured,
    /// Panic inside the provider
    Panic,
}

impl MockReply {
    pub fn text(s: &str) -> Self {
        MockReply::Text(s.to_string())
    }
}

/// One recorded `translate_once` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub provider: String,
    pub text: String,
    pub source: String,
    pub target: String,
}

/// Call log shared by several providers to pin cross-provider order
pub type CallJournal = Arc<Mutex<Vec<MockCall>>>;

pub struct MockProvider {
    name: String,
    routes: HashMap<(String, String), MockReply>,
    default: MockReply,
    capabilities: Vec<LanguageCode>,
    delay: Duration,
    calls: Mutex<Vec<MockCall>>,
    journal: Option<CallJournal>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            routes: HashMap::new(),
            default: MockReply::Fail,
            capabilities: Vec::new(),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn route(mut self, source: &str, target: &str, reply: MockReply) -> Self {
        self.routes
            .insert((source.to_string(), target.to_string()), reply);
        self
    }

    pub fn default_reply(mut self, reply: MockReply) -> Self {
        self.default = reply;
        self
    }

    pub fn with_capabilities(mut self, codes: &[&str]) -> Self {
        self.capabilities = codes.iter().map(|c| LanguageCode::new(c)).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
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
        let call = MockCall {
            provider: self.name.clone(),
            text: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        };
        if let Some(journal) = &self.journal {
            if let Ok(mut entries) = journal.lock() {
                entries.push(call.clone());
            }
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let key = (source.to_string(), target.to_string());
        match self.routes.get(&key).unwrap_or(&self.default) {
            MockReply::Text(s) => Ok(s.clone()),
            MockReply::Echo => Ok(text.to_string()),
            MockReply::Suffix => Ok(format!("{}_{}", text, target)),
            MockReply::Fail => Err(ProviderError::Status {
                status: 503,
                body: "mock failure".to_string(),
            }),
            MockReply::NotConfigured => Err(ProviderError::NotConfigured(self.name.clone())),
            MockReply::Panic => panic!("mock provider {} panicked", self.name),
        }
    }
}

/// Detector returning a fixed answer (`None` = always fail)
pub struct MockDetector {
    answer: Option<LanguageCode>,
    calls: Mutex<usize>,
}

impl MockDetector {
    pub fn new(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(LanguageCode::new),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or(0)
    }
}

#[async_trait]
impl DetectionProvider for MockDetector {
    fn name(&self) -> &str {
        "mock-detector"
    }

    async fn detect(&self, _text: &str) -> Result<LanguageCode, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        self.answer.clone().ok_or(ProviderError::Timeout)
    }
}
