//! Error types for the umbpack commands

use std::io;
use thiserror::Error;
use umbpack_manifest::ManifestError;

/// Errors that end an `umbpack init` session
#[derive(Error, Debug)]
pub enum InitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Input ended before a valid value was entered for '{0}'")]
    InputClosed(String),
}

impl InitError {
    pub fn is_missing_folder(&self) -> bool {
        matches!(self, InitError::Manifest(ManifestError::MissingFolder(_)))
    }
}
