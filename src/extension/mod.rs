//! Foreign ("extension") content preserved across parse and serialize
//!
//! Every schema element owns an [`ExtensionSet`]: the attributes and child
//! elements it found while parsing but does not map itself. Serializing the
//! element replays them, after all mapped children, in discovery order.
//!
//! - `exclusion`: the (local name, namespace) keys an element maps itself
//! - `capture`: building an [`ExtensionSet`] from a parsed element and
//!   replaying it onto an element being serialized

mod capture;
mod exclusion;

pub use self::capture::{capture, emit};
pub use self::exclusion::{ExclusionKey, ExclusionSet};

use crate::{FeedError, Result};

/// Whether a captured node was an attribute or a child element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An attribute of the owning element
    Attribute,
    /// A child element of the owning element
    Element,
}

/// How a captured value is replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Plain value, written as escaped text
    Text,
    /// Serialized markup, spliced back without re-escaping
    Xml,
}

/// One captured attribute or child element
///
/// Immutable once built; a prefix can only be carried together with a
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionNode {
    kind: NodeKind,
    local_name: String,
    prefix: Option<String>,
    namespace: Option<String>,
    content_mode: ContentMode,
    value: String,
}

impl ExtensionNode {
    /// Build a node
    ///
    /// An empty namespace is treated as no namespace.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] if `local_name` is empty, if a
    /// prefix is given without a namespace, or if an attribute is given
    /// [`ContentMode::Xml`].
    pub fn new(
        kind: NodeKind,
        local_name: impl Into<String>,
        prefix: Option<&str>,
        namespace: Option<&str>,
        content_mode: ContentMode,
        value: impl Into<String>,
    ) -> Result<Self> {
        let local_name = local_name.into();
        if local_name.is_empty() {
            return Err(FeedError::Configuration(
                "extension node local name cannot be empty".to_string(),
            ));
        }

        let namespace = namespace.filter(|ns| !ns.is_empty());
        let prefix = prefix.filter(|p| !p.is_empty());
        if prefix.is_some() && namespace.is_none() {
            return Err(FeedError::Configuration(format!(
                "extension node '{}' has prefix '{}' but no namespace",
                local_name,
                prefix.unwrap_or_default()
            )));
        }

        if kind == NodeKind::Attribute && content_mode == ContentMode::Xml {
            return Err(FeedError::Configuration(format!(
                "extension attribute '{local_name}' cannot carry markup"
            )));
        }

        Ok(Self {
            kind,
            local_name,
            prefix: prefix.map(str::to_string),
            namespace: namespace.map(str::to_string),
            content_mode,
            value: value.into(),
        })
    }

    /// Build an attribute node (always [`ContentMode::Text`])
    pub fn attribute(
        local_name: impl Into<String>,
        prefix: Option<&str>,
        namespace: Option<&str>,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            NodeKind::Attribute,
            local_name,
            prefix,
            namespace,
            ContentMode::Text,
            value,
        )
    }

    /// Build a child element node
    pub fn element(
        local_name: impl Into<String>,
        prefix: Option<&str>,
        namespace: Option<&str>,
        content_mode: ContentMode,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            NodeKind::Element,
            local_name,
            prefix,
            namespace,
            content_mode,
            value,
        )
    }

    /// Attribute or child element
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Local name
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Prefix as originally written
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Namespace URI
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Text or markup
    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    /// Captured value: inner text, attribute value or inner markup
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this node has the given local name and namespace
    pub fn is(&self, local_name: &str, namespace: Option<&str>) -> bool {
        self.local_name == local_name
            && crate::xml::namespace_matches(self.namespace.as_deref(), namespace)
    }
}

/// Ordered extension content of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    nodes: Vec<ExtensionNode>,
}

impl ExtensionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node after all existing ones
    pub fn push(&mut self, node: ExtensionNode) {
        self.nodes.push(node);
    }

    /// Nodes in discovery order
    pub fn nodes(&self) -> &[ExtensionNode] {
        &self.nodes
    }

    /// Iterate in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, ExtensionNode> {
        self.nodes.iter()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node with the given local name and namespace
    pub fn find(&self, local_name: &str, namespace: Option<&str>) -> Option<&ExtensionNode> {
        self.nodes.iter().find(|n| n.is(local_name, namespace))
    }

    /// Captured attributes in discovery order
    pub fn attributes(&self) -> impl Iterator<Item = &ExtensionNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Attribute)
    }

    /// Captured child elements in discovery order
    pub fn elements(&self) -> impl Iterator<Item = &ExtensionNode> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Element)
    }
}

impl From<Vec<ExtensionNode>> for ExtensionSet {
    fn from(nodes: Vec<ExtensionNode>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<ExtensionNode> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = ExtensionNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ExtensionSet {
    type Item = &'a ExtensionNode;
    type IntoIter = std::slice::Iter<'a, ExtensionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
