//! umbpack manifest building
//!
//! Everything needed to turn answers to the `umbpack init` questions into a
//! package.xml file: version validation, licence lookup, the manifest
//! document itself and writing it to disk.
//!
//! No terminal I/O happens here; prompting lives in the CLI crate.

pub mod assembler;
pub mod document;
pub mod errors;
pub mod licence;
pub mod manifest;
pub mod manifest_writer;
pub mod types;
pub mod version;

pub use assembler::assemble;
pub use errors::{ManifestError, RegistryError, VersionError};
pub use licence::{HttpLicenceRegistry, LicenceEntry, LicenceRegistry, LicenceResolver, Resolution};
pub use manifest::ManifestDocument;
pub use manifest_writer::{resolve_target_path, target_path, write_to_path};
pub use types::{Licence, PackageSetup};
pub use version::parse_version;

// Callers build `PackageSetup` with semver versions
pub use semver;
