//! Semantic version validation for the version prompts.

use semver::Version;

use crate::errors::VersionError;

/// Parse a strict `major.minor.patch[-pre][+build]` version.
///
/// Surrounding whitespace is ignored. Partial versions (`1.0`), wildcards
/// (`1.x`) and prefixes (`v1.0.0`) are rejected.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    Version::parse(input.trim()).map_err(|e| VersionError {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
