//! Licence lookup against a remote licence registry
//!
//! The registry is any service that answers `GET {base}/licenses` with a JSON
//! array of `{ "spdx_id": ..., "url": ... }` objects (the GitHub licenses API
//! by default). When it cannot be reached the resolver falls back to a small
//! local table, which always contains MIT.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::RegistryError;
use crate::types::Licence;

pub const DEFAULT_REGISTRY_URL: &str = "https://api.github.com";
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);
pub const UNLICENSED: &str = "UNLICENSED";
pub const MIT_FALLBACK_URL: &str = "https://opensource.org/licenses/MIT";

/// One entry of the registry's licence list. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LicenceEntry {
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Source of known licences
pub trait LicenceRegistry {
    fn fetch_licences(&self) -> Result<Vec<LicenceEntry>, RegistryError>;
}

impl<T: LicenceRegistry + ?Sized> LicenceRegistry for &T {
    fn fetch_licences(&self) -> Result<Vec<LicenceEntry>, RegistryError> {
        (**self).fetch_licences()
    }
}

/// Blocking HTTP client for the licence registry
#[derive(Debug, Clone)]
pub struct HttpLicenceRegistry {
    base_url: String,
    timeout: Duration,
}

impl HttpLicenceRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpLicenceRegistry {
            base_url: base_url.into(),
            timeout: DEFAULT_REGISTRY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn licences_url(&self) -> String {
        format!("{}/licenses", self.base_url.trim_end_matches('/'))
    }
}

impl Default for HttpLicenceRegistry {
    fn default() -> Self {
        HttpLicenceRegistry::new(DEFAULT_REGISTRY_URL)
    }
}

impl LicenceRegistry for HttpLicenceRegistry {
    fn fetch_licences(&self) -> Result<Vec<LicenceEntry>, RegistryError> {
        let url = self.licences_url();
        debug!("Fetching licence list from {}", url);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("umbpack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        let response = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;
        let licences: Vec<LicenceEntry> = serde_json::from_str(&body)?;
        debug!("Registry returned {} licences", licences.len());
        Ok(licences)
    }
}

/// Outcome of a single lookup
#[derive(Debug)]
pub struct Resolution {
    /// `None` when the identifier could not be matched
    pub licence: Option<Licence>,
    /// Set when the registry could not be used for this lookup
    pub registry_error: Option<RegistryError>,
}

impl Resolution {
    fn resolved(licence: Licence) -> Self {
        Resolution {
            licence: Some(licence),
            registry_error: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.licence.is_some()
    }
}

pub struct LicenceResolver<R> {
    registry: R,
    fallbacks: BTreeMap<String, String>,
}

impl<R: LicenceRegistry> LicenceResolver<R> {
    /// Resolver with the built-in fallback table (MIT only)
    pub fn new(registry: R) -> Self {
        let mut fallbacks = BTreeMap::new();
        fallbacks.insert("MIT".to_string(), MIT_FALLBACK_URL.to_string());
        LicenceResolver {
            registry,
            fallbacks,
        }
    }

    /// Add fallback entries used when the registry is unavailable or has no
    /// match. Built-in entries can be overridden.
    pub fn with_fallbacks(mut self, extra: impl IntoIterator<Item = (String, String)>) -> Self {
        for (id, url) in extra {
            self.fallbacks.retain(|known, _| !known.eq_ignore_ascii_case(&id));
            self.fallbacks.insert(id, url);
        }
        self
    }

    pub fn resolve(&self, identifier: &str) -> Resolution {
        if identifier.eq_ignore_ascii_case(UNLICENSED) {
            return Resolution::resolved(Licence::new(UNLICENSED, ""));
        }

        let registry_error = match self.registry.fetch_licences() {
            Ok(licences) => {
                let matched = licences.into_iter().find_map(|entry| match entry {
                    LicenceEntry {
                        spdx_id: Some(id),
                        url: Some(url),
                    } if id.eq_ignore_ascii_case(identifier) => Some(url),
                    _ => None,
                });
                if let Some(url) = matched {
                    return Resolution::resolved(Licence::new(identifier, url));
                }
                debug!("Licence '{}' not found in registry", identifier);
                None
            }
            Err(e) => {
                warn!("Unable to retrieve licence list: {}", e);
                Some(e)
            }
        };

        let licence = self.fallback(identifier);
        Resolution {
            licence,
            registry_error,
        }
    }

    fn fallback(&self, identifier: &str) -> Option<Licence> {
        self.fallbacks
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(identifier))
            .map(|(_, url)| Licence::new(identifier, url.clone()))
    }
}
