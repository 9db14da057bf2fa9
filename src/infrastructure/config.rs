use crate::domain::error::RelayError;
use crate::domain::model::{LanguageCode, SupportedLanguages};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LT_ENDPOINT: &str = "https://libretranslate.de";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
    #[serde(default = "default_pivot_language")]
    pub pivot_language: String,
    /// Per-call timeout for every provider request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fallback_prefix")]
    pub fallback_prefix: String,
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
    #[serde(default)]
    pub min_detect_confidence: f64,
    #[serde(default = "default_detectors")]
    pub detectors: Vec<DetectorKind>,
    #[serde(default)]
    pub logging: Logging,
    /// Translation providers in priority order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Libre,
    Deepl,
    Google,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    Libre,
    Google,
    Local,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Restrict the provider to these codes (empty = no restriction)
    #[serde(default)]
    pub languages: Vec<String>,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            endpoint: None,
            api_key: None,
            languages: Vec::new(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supported_languages: default_supported_languages(),
            pivot_language: default_pivot_language(),
            timeout_secs: default_timeout_secs(),
            fallback_prefix: default_fallback_prefix(),
            max_message_chars: default_max_message_chars(),
            min_detect_confidence: 0.0,
            detectors: default_detectors(),
            logging: Logging::default(),
            providers: default_providers(),
        }
    }
}

// Defaults
fn default_supported_languages() -> Vec<String> {
    ["zh", "en", "ja", "th", "ko", "vi", "fr", "de", "es"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_pivot_language() -> String {
    "en".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_fallback_prefix() -> String {
    "⚠️ (untranslated) ".to_string()
}
fn default_max_message_chars() -> usize {
    5000
}
fn default_detectors() -> Vec<DetectorKind> {
    vec![DetectorKind::Libre, DetectorKind::Local]
}
fn default_providers() -> Vec<ProviderConfig> {
    let mut libre = ProviderConfig::new(ProviderKind::Libre);
    libre.endpoint = Some(DEFAULT_LT_ENDPOINT.to_string());
    vec![libre]
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

impl Config {
    pub fn supported(&self) -> SupportedLanguages {
        SupportedLanguages::new(&self.supported_languages)
    }

    pub fn pivot(&self) -> LanguageCode {
        LanguageCode::new(&self.pivot_language)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// First provider entry of the given kind, if any
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.kind == kind)
    }

    fn provider_mut_or_push(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        let idx = match self.providers.iter().position(|p| p.kind == kind) {
            Some(idx) => idx,
            None => {
                self.providers.push(ProviderConfig::new(kind));
                self.providers.len() - 1
            }
        };
        &mut self.providers[idx]
    }

    /// Apply environment-style overrides from an arbitrary lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get("LT_ENDPOINT") {
            self.provider_mut_or_push(ProviderKind::Libre).endpoint = Some(endpoint);
        }
        if let Some(key) = get("LT_API_KEY") {
            self.provider_mut_or_push(ProviderKind::Libre).api_key = Some(key);
        }
        if let Some(key) = get("DEEPL_API_KEY") {
            self.provider_mut_or_push(ProviderKind::Deepl).api_key = Some(key);
        }
        if let Some(key) = get("GOOGLE_TRANSLATE_API_KEY") {
            self.provider_mut_or_push(ProviderKind::Google).api_key = Some(key);
        }
        if let Some(raw) = get("LINGO_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(e) => eprintln!("Warning: ignoring LINGO_TIMEOUT_SECS={}: {}", raw, e),
            }
        }
        if let Some(pivot) = get("LINGO_PIVOT") {
            self.pivot_language = pivot.trim().to_string();
        }
        if let Some(list) = get("LINGO_SUPPORTED") {
            self.supported_languages = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    pub fn validate(&self) -> Result<(), RelayError> {
        if self.timeout_secs == 0 {
            return Err(RelayError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.supported().is_empty() {
            return Err(RelayError::Config(
                "supported_languages must not be empty".to_string(),
            ));
        }
        if self.pivot().is_auto() {
            return Err(RelayError::Config(
                "pivot_language must be a concrete language code".to_string(),
            ));
        }
        if self.providers.is_empty() {
            return Err(RelayError::Config(
                "at least one translation provider is required".to_string(),
            ));
        }
        if self.max_message_chars == 0 {
            return Err(RelayError::Config(
                "max_message_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lingo-relay").join("config.toml"))
}

/// Load config from `path` (or the default location), then apply env overrides.
///
/// A missing default file yields defaults; a missing explicit file is an error.
/// An unparsable file falls back to defaults with a warning.
pub fn load_config(path: Option<&Path>) -> Result<Config, RelayError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with environment lookups served by `lookup`
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, RelayError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(RelayError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            read_config_file(path)?
        }
        None => match get_config_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => Config::default(),
        },
    };

    config.apply_env_with(lookup);
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config, RelayError> {
    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

/// Write a sample config to `path` (or the default location).
///
/// Returns the written path; an existing file is left untouched.
pub fn generate_config_sample(path: Option<&Path>) -> Result<PathBuf, RelayError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path().ok_or_else(|| {
            RelayError::Config("Cannot determine config directory".to_string())
        })?,
    };

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| RelayError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| RelayError::Config(format!("Failed to write config file: {}", e)))?;

    Ok(path)
}
