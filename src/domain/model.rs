use crate::domain::error::RelayError;
use serde::{Deserialize, Serialize};
use std::fmt;

const AUTO: &str = "auto";

// 语言代码 (e.g. "zh", "en")，"auto" 表示未检测/未指定
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Build a code from any spelling a provider or user might hand us.
    ///
    /// Region and script subtags are dropped (`zh-CN` → `zh`, `en_US` → `en`)
    /// and blank or "unknown"-like values collapse to the `auto` sentinel.
    pub fn new(code: &str) -> Self {
        let base = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match base.as_str() {
            "" | AUTO | "unknown" | "und" => Self::auto(),
            _ => Self(base),
        }
    }

    pub fn auto() -> Self {
        Self(AUTO.to_string())
    }

    pub fn is_auto(&self) -> bool {
        self.0 == AUTO
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LanguageCode {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of languages users may pair, configured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLanguages {
    codes: Vec<LanguageCode>,
}

impl SupportedLanguages {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<LanguageCode> = Vec::new();
        for code in codes {
            let code = LanguageCode::new(code.as_ref());
            if !code.is_auto() && !out.contains(&code) {
                out.push(code);
            }
        }
        Self { codes: out }
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.codes.contains(code)
    }

    /// Parse a user-supplied code, rejecting anything outside the set.
    pub fn parse(&self, raw: &str) -> Result<LanguageCode, RelayError> {
        let code = LanguageCode::new(raw);
        if self.contains(&code) {
            Ok(code)
        } else {
            Err(RelayError::InvalidPair(format!(
                "unsupported language code `{}`",
                raw.trim()
            )))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageCode> {
        self.codes.iter()
    }

    /// Comma-separated listing for user-facing messages.
    pub fn joined(&self) -> String {
        self.codes
            .iter()
            .map(LanguageCode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// 用户语言配对：mine = 自己的语言, friend = 朋友的语言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub mine: LanguageCode,
    pub friend: LanguageCode,
}

impl LanguagePair {
    /// Validate both sides against the supported set.
    pub fn parse(
        mine: &str,
        friend: &str,
        supported: &SupportedLanguages,
    ) -> Result<Self, RelayError> {
        Ok(Self {
            mine: supported.parse(mine)?,
            friend: supported.parse(friend)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_hint: LanguageCode,
    pub target: LanguageCode,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_hint: LanguageCode,
        target: LanguageCode,
    ) -> Result<Self, RelayError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RelayError::InvalidRequest("text is empty".to_string()));
        }
        if target.is_auto() {
            return Err(RelayError::InvalidRequest(
                "target language must be concrete".to_string(),
            ));
        }
        Ok(Self {
            text,
            source_hint,
            target,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Unresolved,
}

impl TranslationOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated(_))
    }
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A provider result is usable only if it is non-empty and not an echo of
/// its input once whitespace is normalised.
pub fn is_usable(input: &str, output: &str) -> bool {
    let out = normalize_whitespace(output);
    !out.is_empty() && out != normalize_whitespace(input)
}
