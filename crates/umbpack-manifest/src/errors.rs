use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or writing a package manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("The folder '{}' does not exist", .0.display())]
    MissingFolder(PathBuf),
}

/// A version string that is not valid semver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' is not a valid semantic version: {reason}")]
pub struct VersionError {
    pub input: String,
    pub reason: String,
}

/// Failures talking to the licence registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("licence registry request failed: {0}")]
    Transport(String),

    #[error("licence registry returned status {0}")]
    Status(u16),

    #[error("failed to decode licence list: {0}")]
    Decode(#[from] serde_json::Error),
}
