use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid language pair: {0}")]
    InvalidPair(String),

    #[error("Invalid translation request: {0}")]
    InvalidRequest(String),
}

/// Failure of a single provider call.
///
/// Recovered inside the pivot translator and the cascade; it never reaches
/// the caller of the session facade.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is missing field `{0}`")]
    MissingField(&'static str),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}
