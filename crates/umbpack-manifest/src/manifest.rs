//! The package.xml document
//!
//! `ManifestDocument` is built once by [`crate::assembler::assemble`] and never
//! changed afterwards; it only exposes read access and rendering.

use crate::document::{XmlElement, XML_DECLARATION};

/// Root element name expected by the Umbraco packager
pub const ROOT_ELEMENT: &str = "umbPackage";

/// Empty sections that follow `info`, in schema order.
///
/// Downstream packing fills these in, so they are always written even when
/// there is nothing in them.
pub const PLACEHOLDER_SECTIONS: [&str; 8] = [
    "DocumentTypes",
    "Templates",
    "Stylesheets",
    "Macros",
    "DictionaryItems",
    "Languages",
    "DataTypes",
    "Actions",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    root: XmlElement,
}

impl ManifestDocument {
    pub(crate) fn from_root(root: XmlElement) -> Self {
        ManifestDocument { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn info(&self) -> Option<&XmlElement> {
        self.root.child("info")
    }

    /// The `info` section as shown to the user before confirming
    pub fn preview(&self) -> String {
        self.info().map(XmlElement::render).unwrap_or_default()
    }

    /// Full document text including the XML declaration
    pub fn to_xml_string(&self) -> String {
        format!("{}\n{}", XML_DECLARATION, self.root.render())
    }

    /// Names of the top-level sections, in document order
    pub fn section_names(&self) -> Vec<&str> {
        self.root
            .children()
            .iter()
            .map(|section| section.name.as_str())
            .collect()
    }
}
