//! Values gathered while setting up a package

use semver::Version;
use serde::{Deserialize, Serialize};

/// A resolved licence: the identifier as entered plus its reference URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Licence {
    pub name: String,
    pub url: String,
}

impl Licence {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Licence {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Everything `umbpack init` collects before a manifest is assembled.
///
/// Every field is required, so a `PackageSetup` only exists once all
/// prompts have been answered (or defaulted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSetup {
    pub name: String,
    pub description: String,
    pub version: Version,
    pub url: String,
    /// Minimum Umbraco version; only major/minor/patch end up in the manifest
    pub umbraco_version: Version,
    pub author: String,
    pub website: String,
    pub licence: Licence,
}
