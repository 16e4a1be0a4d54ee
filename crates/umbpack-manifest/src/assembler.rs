//! Builds the package.xml skeleton from a completed [`PackageSetup`]

use crate::document::XmlElement;
use crate::manifest::{ManifestDocument, PLACEHOLDER_SECTIONS, ROOT_ELEMENT};
use crate::types::PackageSetup;

/// Assemble the manifest document for `setup`.
///
/// The same setup always yields the same document. Prerelease and build
/// metadata of the Umbraco version are not part of `requirements`.
pub fn assemble(setup: PackageSetup) -> ManifestDocument {
    let PackageSetup {
        name,
        description,
        version,
        url,
        umbraco_version,
        author,
        website,
        licence,
    } = setup;

    let requirements = XmlElement::new("requirements")
        .with_attribute("type", "strict")
        .with_children([
            XmlElement::text("major", umbraco_version.major),
            XmlElement::text("minor", umbraco_version.minor),
            XmlElement::text("patch", umbraco_version.patch),
        ]);

    let package = XmlElement::new("package").with_children([
        XmlElement::text("name", name),
        XmlElement::text("version", version),
        XmlElement::text("iconUrl", ""),
        XmlElement::text("licence", licence.name).with_attribute("url", licence.url),
        XmlElement::text("url", url),
        requirements,
    ]);

    let author = XmlElement::new("author").with_children([
        XmlElement::text("name", author),
        XmlElement::text("website", website),
    ]);

    let info = XmlElement::new("info").with_children([
        package,
        author,
        XmlElement::new("contributors"),
        XmlElement::cdata("readme", description),
    ]);

    let root = XmlElement::new(ROOT_ELEMENT)
        .with_child(XmlElement::new("files"))
        .with_child(info)
        .with_children(PLACEHOLDER_SECTIONS.iter().map(|s| XmlElement::new(*s)));

    ManifestDocument::from_root(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Licence;
    use semver::Version;

    fn sample_setup() -> PackageSetup {
        PackageSetup {
            name: "MyPkg".to_string(),
            description: String::new(),
            version: Version::new(1, 2, 3),
            url: "https://example.com".to_string(),
            umbraco_version: Version::new(8, 0, 0),
            author: "alice".to_string(),
            website: "https://example.com".to_string(),
            licence: Licence::new("MIT", "https://opensource.org/licenses/MIT"),
        }
    }

    fn text_at<'a>(doc: &'a ManifestDocument, path: &[&str]) -> Option<&'a str> {
        let mut node = doc.root();
        for name in path {
            node = node.child(name)?;
        }
        node.value()
    }

    #[test]
    fn test_section_order() {
        let doc = assemble(sample_setup());
        assert_eq!(
            doc.section_names(),
            vec![
                "files",
                "info",
                "DocumentTypes",
                "Templates",
                "Stylesheets",
                "Macros",
                "DictionaryItems",
                "Languages",
                "DataTypes",
                "Actions",
            ]
        );
    }

    #[test]
    fn test_placeholders_present_and_empty() {
        let doc = assemble(sample_setup());
        for name in PLACEHOLDER_SECTIONS.iter().chain(["files"].iter()) {
            let section = doc.root().child(name);
            assert!(section.is_some_and(XmlElement::is_empty), "{} missing", name);
        }
        let contributors = doc.info().and_then(|info| info.child("contributors"));
        assert!(contributors.is_some_and(XmlElement::is_empty));
    }

    #[test]
    fn test_package_fields() {
        let doc = assemble(sample_setup());
        assert_eq!(text_at(&doc, &["info", "package", "name"]), Some("MyPkg"));
        assert_eq!(text_at(&doc, &["info", "package", "version"]), Some("1.2.3"));
        assert_eq!(text_at(&doc, &["info", "package", "iconUrl"]), Some(""));
        assert_eq!(text_at(&doc, &["info", "package", "licence"]), Some("MIT"));
        assert_eq!(text_at(&doc, &["info", "author", "name"]), Some("alice"));
        assert_eq!(text_at(&doc, &["info", "readme"]), Some(""));

        let licence = doc
            .info()
            .and_then(|i| i.child("package"))
            .and_then(|p| p.child("licence"));
        assert_eq!(
            licence.and_then(|l| l.attribute("url")),
            Some("https://opensource.org/licenses/MIT")
        );
    }

    #[test]
    fn test_requirements_drop_prerelease() {
        let mut setup = sample_setup();
        setup.umbraco_version = Version::parse("8.6.1-rc.1+build.5").unwrap_or(Version::new(0, 0, 0));
        let doc = assemble(setup);

        let requirements = doc
            .info()
            .and_then(|i| i.child("package"))
            .and_then(|p| p.child("requirements"));
        assert_eq!(requirements.and_then(|r| r.attribute("type")), Some("strict"));
        assert_eq!(
            text_at(&doc, &["info", "package", "requirements", "major"]),
            Some("8")
        );
        assert_eq!(
            text_at(&doc, &["info", "package", "requirements", "minor"]),
            Some("6")
        );
        assert_eq!(
            text_at(&doc, &["info", "package", "requirements", "patch"]),
            Some("1")
        );
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let first = assemble(sample_setup());
        let second = assemble(sample_setup());
        assert_eq!(first, second);
        assert_eq!(first.to_xml_string(), second.to_xml_string());
    }

    #[test]
    fn test_xml_is_well_formed() {
        let mut setup = sample_setup();
        setup.description = "Uses <div> & ]]> markers\u{1}".to_string();
        setup.name = "Fish & Chips\u{7}".to_string();
        let xml = assemble(setup).to_xml_string();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<umbPackage>"));
        let Ok(parsed) = roxmltree::Document::parse(&xml) else {
            panic!("manifest should parse: {}", xml);
        };
        let readme = parsed
            .descendants()
            .find(|n| n.has_tag_name("readme"))
            .map(|n| n.children().filter_map(|c| c.text()).collect::<String>());
        assert_eq!(readme.as_deref(), Some("Uses <div> & ]]> markers"));

        let name = parsed
            .descendants()
            .find(|n| n.has_tag_name("name"))
            .and_then(|n| n.text());
        assert_eq!(name, Some("Fish & Chips"));
    }

    #[test]
    fn test_preview_is_info_section() {
        let doc = assemble(sample_setup());
        let preview = doc.preview();
        assert!(preview.starts_with("<info>"));
        assert!(preview.ends_with("</info>"));
        assert!(!preview.contains("DocumentTypes"));
    }
}
