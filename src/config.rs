//! Configuration types for the conversion client.
//!
//! All client behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config between the CLI and library callers and to diff two runs
//! to understand why their behaviour differs.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// Default address of the conversion service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Language code used before (or without) a successful catalog load.
///
/// Must be a key of the service's catalog — the reference service always
/// offers English.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for a [`crate::controller::ConversionController`].
///
/// Built via [`ClientConfig::builder()`] or [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2audio::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://tts.example.net:5000")
///     .language("fr")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the conversion service, without a trailing slash.
    /// Default: `http://localhost:5000`.
    pub base_url: String,

    /// Language selected at startup. Default: `"en"`.
    ///
    /// May precede the catalog load; once the catalog is loaded the
    /// controller only accepts codes the catalog knows.
    pub language: String,

    /// Timeout for the conversion request in seconds. Default: 120.
    ///
    /// This is the transport layer's timeout, not a workflow-level one — the
    /// controller itself never aborts a running conversion. Text-to-speech on
    /// a whole book takes a while; keep this generous.
    pub convert_timeout_secs: u64,

    /// Timeout for the one-off catalog fetch in seconds. Default: 10.
    ///
    /// Short on purpose: a dead service should degrade the language selector
    /// quickly instead of stalling startup.
    pub catalog_timeout_secs: u64,

    /// Timeout for downloading the finished audio in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            convert_timeout_secs: 120,
            catalog_timeout_secs: 10,
            download_timeout_secs: 120,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Service base URL; a trailing slash is stripped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config.language = code.into();
        self
    }

    pub fn convert_timeout_secs(mut self, secs: u64) -> Self {
        self.config.convert_timeout_secs = secs.max(1);
        self
    }

    pub fn catalog_timeout_secs(mut self, secs: u64) -> Self {
        self.config.catalog_timeout_secs = secs.max(1);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let c = &self.config;
        if c.base_url.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "base_url must not be empty".into(),
            ));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(ConvertError::InvalidConfig(format!(
                "base_url must be an HTTP/HTTPS URL, got '{}'",
                c.base_url
            )));
        }
        if c.language.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "language must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
