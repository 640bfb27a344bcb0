//! Client configuration for the generative AI facade.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::error::Result;

/// Default API endpoint for Google's Generative AI service
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default API version
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Fallback environment variable holding the API key.
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "GOOGLE_BASE_URL";

/// Options forwarded to the client when it is built.
///
/// The facade always merges its own API key into this value, so the key set
/// here is overwritten when the config is handed to [`crate::GoogleGenAI`].
#[derive(Clone, PartialEq, Eq, TypedBuilder)]
#[builder(doc)]
pub struct ClientConfig {
    /// API key sent with every request
    #[builder(default, setter(into))]
    pub api_key: String,

    /// Scheme and host of the API, without a trailing slash
    #[builder(default = String::from(DEFAULT_BASE_URL), setter(into))]
    pub base_url: String,

    /// API version path segment
    #[builder(default = String::from(DEFAULT_API_VERSION), setter(into))]
    pub api_version: String,

    /// Per-request timeout applied by the HTTP client
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,

    /// Extra headers sent with every request
    #[builder(default)]
    pub headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Builds a config from the environment.
    ///
    /// # Environment Variables
    ///
    /// * `GEMINI_API_KEY` - The API key, falling back to `GOOGLE_API_KEY`
    /// * `GOOGLE_BASE_URL` - Optional base URL override
    ///
    /// # Errors
    ///
    /// Returns an error if neither key variable is set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).or_else(|_| std::env::var(FALLBACK_API_KEY_ENV))?;
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::builder().api_key(api_key).base_url(base_url).build())
    }

    /// Returns a copy of this config carrying the given API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Base URL joined with the API version, without a trailing slash.
    pub fn versioned_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"******")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}
