//! Configuration for the remote extraction service.

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model used for extraction requests.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Explicitly constructed configuration for the remote adapter.
///
/// The credential is optional at construction time: a missing key is a
/// local, pre-flight failure raised only when an extraction is actually
/// attempted, so batches that never touch the remote path still succeed.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Access credential; `None` means not configured.
    pub api_key: Option<String>,

    /// Model identifier appended to the endpoint.
    pub model: String,

    /// Service base URL.
    pub endpoint: String,
}

impl RemoteConfig {
    /// Build a config from the environment, tolerating a missing credential.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Build a config with an explicit credential (for tests and embedders).
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}
