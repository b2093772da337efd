//! Language catalog cache: the one-time `GET /api/languages` fetch.
//!
//! ## Why degrade instead of fail?
//!
//! The catalog only feeds the language selector. A controller that cannot
//! list languages can still validate files, hold a selection, and convert
//! with the default language — so a failed fetch logs a warning and yields an
//! empty catalog rather than killing startup. There is no retry and no
//! refresh: the catalog is assumed static for the session.

use crate::error::ConvertError;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Mapping from language code (e.g. `"fr"`) to display name (e.g.
/// `"French"`), as served by `GET /api/languages`.
///
/// Read-only after construction. A `BTreeMap` keeps listings in a stable
/// order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: BTreeMap<String, String>,
}

impl LanguageCatalog {
    /// An empty catalog — the degraded state after a failed fetch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `code` is one of the catalog's keys.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Display name for `code`, if the catalog knows it.
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Iterate `(code, display name)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, String)> for LanguageCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Fetch the catalog from the service.
///
/// One `GET {base_url}/api/languages`; the reply is a flat JSON object of
/// code → display name.
pub async fn fetch_languages(
    client: &reqwest::Client,
    base_url: &str,
    timeout_secs: u64,
) -> Result<LanguageCatalog, ConvertError> {
    let url = format!("{base_url}/api/languages");
    debug!("Fetching language catalog from {url}");

    let response = client
        .get(&url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
        .map_err(|e| ConvertError::CatalogUnavailable {
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(ConvertError::CatalogUnavailable {
            reason: format!("HTTP {}", response.status()),
        });
    }

    let entries: BTreeMap<String, String> =
        response
            .json()
            .await
            .map_err(|e| ConvertError::CatalogUnavailable {
                reason: e.to_string(),
            })?;

    debug!("Catalog loaded: {} languages", entries.len());
    Ok(LanguageCatalog { entries })
}

/// Fetch the catalog, degrading to empty on any failure.
///
/// This is the startup path: called exactly once per controller lifetime.
pub async fn load_languages(
    client: &reqwest::Client,
    base_url: &str,
    timeout_secs: u64,
) -> LanguageCatalog {
    match fetch_languages(client, base_url, timeout_secs).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Language catalog load failed, continuing without it: {e}");
            LanguageCatalog::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LanguageCatalog {
        [
            ("en".to_string(), "English".to_string()),
            ("fr".to_string(), "French".to_string()),
            ("ar".to_string(), "Arabic".to_string()),
            ("es".to_string(), "Spanish".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn contains_and_display_name() {
        let c = sample();
        assert!(c.contains("fr"));
        assert_eq!(c.display_name("fr"), Some("French"));
        assert!(!c.contains("de"));
        assert_eq!(c.display_name("de"), None);
    }

    #[test]
    fn iteration_is_code_ordered() {
        let catalog = sample();
        let codes: Vec<&str> = catalog.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec!["ar", "en", "es", "fr"]);
    }

    #[test]
    fn empty_catalog_knows_nothing() {
        let c = LanguageCatalog::empty();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(!c.contains("en"));
    }
}
