//! lingo-relay: bidirectional chat translation relay
//!
//! Messages are detected, routed by the user's language pair, and translated
//! through an ordered cascade of providers with a pivot-language fallback.
//! The session facade never fails: on total failure the original text is
//! returned behind a marker.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;

pub use application::relay::{ChatEvent, Relay, Reply};
pub use application::session::{Resolution, ResolutionKind, TranslationSession};
pub use domain::error::{ProviderError, RelayError};
pub use domain::model::{LanguageCode, LanguagePair, SupportedLanguages, TranslationOutcome};
pub use state::AppState;
