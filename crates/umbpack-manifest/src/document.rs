//! Minimal ordered XML element tree used for package.xml
//!
//! Only what the manifest needs: elements, attributes, escaped text and
//! CDATA sections. Rendering uses two-space indentation and writes empty
//! elements as `<name />`.

use std::fmt::Write as _;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const INDENT: &str = "  ";

/// Content of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlContent {
    /// Rendered as `<name />`
    Empty,
    /// Escaped character data; an empty string renders as `<name></name>`
    Text(String),
    /// Unescaped character data wrapped in one or more CDATA sections
    CData(String),
    Elements(Vec<XmlElement>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub content: XmlContent,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            content: XmlContent::Empty,
        }
    }

    pub fn text(name: impl Into<String>, text: impl ToString) -> Self {
        XmlElement::new(name).with_content(XmlContent::Text(text.to_string()))
    }

    pub fn cdata(name: impl Into<String>, data: impl Into<String>) -> Self {
        XmlElement::new(name).with_content(XmlContent::CData(data.into()))
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_content(mut self, content: XmlContent) -> Self {
        self.content = content;
        self
    }

    /// Append a child element, turning empty content into a child list
    pub fn with_child(mut self, child: XmlElement) -> Self {
        match &mut self.content {
            XmlContent::Elements(children) => children.push(child),
            _ => self.content = XmlContent::Elements(vec![child]),
        }
        self
    }

    pub fn with_children(self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        children.into_iter().fold(self, XmlElement::with_child)
    }

    pub fn children(&self) -> &[XmlElement] {
        match &self.content {
            XmlContent::Elements(children) => children,
            _ => &[],
        }
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children().iter().find(|c| c.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text or CDATA content, if any
    pub fn value(&self) -> Option<&str> {
        match &self.content {
            XmlContent::Text(text) | XmlContent::CData(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, XmlContent::Empty)
            || matches!(&self.content, XmlContent::Elements(c) if c.is_empty())
    }

    /// Render this element (and its subtree) without an XML declaration
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_indented(&mut out, 0);
        out
    }

    fn write_indented(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape_attribute(value));
        }

        match &self.content {
            XmlContent::Empty => out.push_str(" />"),
            XmlContent::Elements(children) if children.is_empty() => out.push_str(" />"),
            XmlContent::Text(text) => {
                let _ = write!(out, ">{}</{}>", escape_text(text), self.name);
            }
            XmlContent::CData(data) => {
                let _ = write!(out, ">{}</{}>", cdata_sections(data), self.name);
            }
            XmlContent::Elements(children) => {
                out.push('>');
                for child in children {
                    out.push('\n');
                    child.write_indented(out, depth + 1);
                }
                let _ = write!(out, "\n{}</{}>", indent, self.name);
            }
        }
    }
}

/// Characters allowed in an XML 1.0 document
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r') || (ch >= ' ' && ch != '\u{FFFE}' && ch != '\u{FFFF}')
}

/// Drop characters XML 1.0 cannot represent, even as references
pub fn strip_invalid_chars(text: &str) -> String {
    text.chars().filter(|&ch| is_xml_char(ch)).collect()
}

/// Escape `&`, `<` and `>` in character data. Characters XML cannot carry
/// are dropped.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars().filter(|&ch| is_xml_char(ch)) {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape an attribute value for use inside double quotes
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Wrap `data` in CDATA sections.
///
/// A literal `]]>` would terminate the section early, so it is split across
/// two sections (`]]` ends the first, `>` starts the second). Parsers join
/// adjacent sections back into the original text.
pub fn cdata_sections(data: &str) -> String {
    let data = strip_invalid_chars(data);
    format!("<![CDATA[{}]]>", data.replace("]]>", "]]]]><![CDATA[>"))
}
