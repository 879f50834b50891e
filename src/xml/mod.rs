//! Minimal owned XML tree
//!
//! Extension capture, element mapping and serialization all operate on this
//! tree rather than on parser events. It exposes exactly what they need:
//! local name, prefix and namespace of every element and attribute, ordered
//! attributes, ordered children, inner text and inner markup.
//!
//! - `reader`: builds a tree from text using quick-xml's namespace-aware reader
//! - `writer`: serializes a tree, declaring namespaces as they are needed

mod reader;
mod writer;

pub use self::reader::parse_document;
pub use self::writer::{write_document, write_fragment};

use crate::Result;
use crate::config::NamespaceBinding;

/// Compare two namespace URIs, treating "no namespace" and `""` as equal
pub fn namespace_matches(left: Option<&str>, right: Option<&str>) -> bool {
    left.unwrap_or("") == right.unwrap_or("")
}

/// An attribute with its resolved namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Prefix as written (`dc` in `dc:creator`)
    pub prefix: Option<String>,
    /// Local name (`creator` in `dc:creator`)
    pub local_name: String,
    /// Resolved namespace URI; unprefixed attributes have none
    pub namespace: Option<String>,
    /// Unescaped value
    pub value: String,
}

impl XmlAttribute {
    /// Create an attribute with no namespace
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local_name: local_name.into(),
            namespace: None,
            value: value.into(),
        }
    }

    /// Create a namespaced attribute
    pub fn qualified(
        prefix: Option<&str>,
        local_name: impl Into<String>,
        namespace: Option<&str>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local_name: local_name.into(),
            namespace: namespace.map(str::to_string),
            value: value.into(),
        }
    }

    /// Name as written, including the prefix
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.local_name)
    }
}

/// A child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Character data (stored unescaped)
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment
    Comment(String),
    /// Pre-serialized markup spliced into output without escaping
    Raw(String),
}

/// An element with its attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Prefix as written
    pub prefix: Option<String>,
    /// Local name
    pub local_name: String,
    /// Resolved namespace URI
    pub namespace: Option<String>,
    /// Namespace declarations made on this element (`xmlns`, `xmlns:p`)
    pub declarations: Vec<NamespaceBinding>,
    /// Attributes in document order
    pub attributes: Vec<XmlAttribute>,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element with no namespace
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Default::default()
        }
    }

    /// Create an element in a namespace
    pub fn qualified(
        prefix: Option<&str>,
        local_name: impl Into<String>,
        namespace: Option<&str>,
    ) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local_name: local_name.into(),
            namespace: namespace.map(str::to_string),
            ..Default::default()
        }
    }

    /// Create an element holding a single text value
    pub fn text_element(
        local_name: impl Into<String>,
        namespace: Option<&str>,
        text: impl Into<String>,
    ) -> Self {
        let mut element = Self::qualified(None, local_name, namespace);
        element.push_text(text);
        element
    }

    /// Parse a complete document and return its root element
    pub fn parse(xml: &str) -> Result<Self> {
        parse_document(xml)
    }

    /// Name as written, including the prefix
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.local_name)
    }

    /// Whether this element has the given local name and namespace
    pub fn is(&self, local_name: &str, namespace: Option<&str>) -> bool {
        self.local_name == local_name && namespace_matches(self.namespace.as_deref(), namespace)
    }

    /// Value of the attribute with the given local name and namespace
    pub fn attribute(&self, local_name: &str, namespace: Option<&str>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| {
                a.local_name == local_name && namespace_matches(a.namespace.as_deref(), namespace)
            })
            .map(|a| a.value.as_str())
    }

    /// Append an attribute with no namespace
    pub fn set_attribute(&mut self, local_name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(XmlAttribute::new(local_name, value));
    }

    /// Append an attribute if the value is present
    pub fn set_optional_attribute(&mut self, local_name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set_attribute(local_name, value);
        }
    }

    /// Declare a namespace on this element
    pub fn declare(&mut self, binding: NamespaceBinding) {
        self.declarations.push(binding);
    }

    /// Child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element with the given local name and namespace
    pub fn child(&self, local_name: &str, namespace: Option<&str>) -> Option<&XmlElement> {
        self.child_elements().find(|c| c.is(local_name, namespace))
    }

    /// All child elements with the given local name and namespace
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
        namespace: Option<&'a str>,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.child_elements().filter(move |c| c.is(local_name, namespace))
    }

    /// Inner text of the first matching child; an empty child counts as absent
    pub fn child_text(&self, local_name: &str, namespace: Option<&str>) -> Option<String> {
        self.child(local_name, namespace)
            .map(XmlElement::inner_text)
            .filter(|text| !text.is_empty())
    }

    /// Append a child element
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append a text child; empty text adds nothing
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Append pre-serialized markup; empty markup adds nothing
    pub fn push_raw(&mut self, markup: impl Into<String>) {
        let markup = markup.into();
        if !markup.is_empty() {
            self.children.push(XmlNode::Raw(markup));
        }
    }

    /// Append `<name>text</name>` in the given namespace if `text` is present
    pub fn push_text_child(&mut self, local_name: &str, namespace: Option<&str>, text: Option<&str>) {
        if let Some(text) = text {
            self.push_child(Self::text_element(local_name, namespace, text));
        }
    }

    /// Text and CDATA directly inside this element, ignoring child elements
    pub fn own_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text of all descendant text and CDATA nodes
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Serialized markup of the children, without this element's own tags
    ///
    /// Namespaces used inside the fragment are declared within it, so the
    /// result can be re-parsed or spliced elsewhere on its own.
    pub fn inner_xml(&self) -> Result<String> {
        write_fragment(&self.children)
    }

    /// Serialize this element (and its subtree) without an XML declaration
    pub fn to_xml_string(&self) -> Result<String> {
        write_document(self, None, None)
    }
}

/// Number of children of a node, used by content-mode classification
pub(crate) fn node_child_count(node: &XmlNode) -> usize {
    match node {
        XmlNode::Element(element) => element.children.len(),
        _ => 0,
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for child in &element.children {
        match child {
            XmlNode::Text(text) | XmlNode::CData(text) => out.push_str(text),
            XmlNode::Element(inner) => collect_text(inner, out),
            XmlNode::Comment(_) | XmlNode::Raw(_) => {}
        }
    }
}

pub(crate) fn qualify(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local_name}"),
        _ => local_name.to_string(),
    }
}
