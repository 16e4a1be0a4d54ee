//! Target path resolution and serialization for package.xml

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::manifest::ManifestDocument;

pub const DEFAULT_FILENAME: &str = "package.xml";

/// Work out where the manifest goes.
///
/// - blank: `./package.xml`
/// - has an extension: used as the file path
/// - anything else: a folder, `package.xml` is appended
pub fn target_path(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Path::new(".").join(DEFAULT_FILENAME),
        Some(raw) => {
            let path = Path::new(raw);
            if path.extension().is_some() {
                path.to_path_buf()
            } else {
                path.join(DEFAULT_FILENAME)
            }
        }
    }
}

/// Folder the manifest will be written into. A bare file name lives in the
/// current directory.
pub fn target_folder(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Like [`target_path`], but fails when the folder does not exist.
pub fn resolve_target_path(raw: Option<&str>) -> Result<PathBuf, ManifestError> {
    let path = target_path(raw);
    let folder = target_folder(&path);
    if !folder.is_dir() {
        return Err(ManifestError::MissingFolder(folder.to_path_buf()));
    }
    debug!("Manifest target: {:?}", path);
    Ok(path)
}

/// Write the manifest, replacing any existing file
pub fn write_to_path(document: &ManifestDocument, output_path: &Path) -> Result<(), ManifestError> {
    debug!("Writing manifest to: {:?}", output_path);
    fs::write(output_path, document.to_xml_string())?;
    info!("Manifest written successfully to: {:?}", output_path);
    Ok(())
}
