//! Capture of unmapped content and its replay on serialization

use super::{ContentMode, ExclusionSet, ExtensionNode, ExtensionSet, NodeKind};
use crate::xml::{XmlAttribute, XmlElement, XmlNode, node_child_count};

/// Collect every attribute and child element of `element` not named in `exclusions`
///
/// Attributes are captured first, then child elements, each in document
/// order. Attributes are always [`ContentMode::Text`]. A child element is
/// classified as [`ContentMode::Xml`] (its inner markup is stored verbatim)
/// when it has more than one child node, or a single child node that itself
/// has children; otherwise its inner text is stored as [`ContentMode::Text`].
///
/// That classification is a structural guess with no schema behind it: plain
/// text interrupted by a comment or CDATA section is classified as markup.
///
/// Capture never fails. A node that cannot be represented is skipped with a
/// warning so that unknown extensions never block parsing the mapped schema.
///
/// # Example
///
/// ```
/// use feedkit::{ExclusionSet, XmlElement, capture};
///
/// let item = XmlElement::parse(
///     r#"<item xmlns:dc="http://purl.org/dc/elements/1.1/">
///          <title>Hello</title>
///          <dc:creator>Jane</dc:creator>
///        </item>"#,
/// )
/// .unwrap();
///
/// let set = capture(&item, &ExclusionSet::new().with("title", None));
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.nodes()[0].value(), "Jane");
/// ```
pub fn capture(element: &XmlElement, exclusions: &ExclusionSet) -> ExtensionSet {
    let mut set = ExtensionSet::new();

    for attr in &element.attributes {
        if exclusions.contains(&attr.local_name, attr.namespace.as_deref()) {
            continue;
        }
        match ExtensionNode::attribute(
            attr.local_name.as_str(),
            attr.prefix.as_deref(),
            attr.namespace.as_deref(),
            attr.value.as_str(),
        ) {
            Ok(node) => set.push(node),
            Err(e) => {
                tracing::warn!(element = %element.local_name, attribute = %attr.local_name, error = %e, "Skipping extension attribute");
            }
        }
    }

    for child in element.child_elements() {
        if exclusions.contains(&child.local_name, child.namespace.as_deref()) {
            continue;
        }
        match capture_child(child) {
            Ok(node) => set.push(node),
            Err(e) => {
                tracing::warn!(element = %element.local_name, child = %child.local_name, error = %e, "Skipping extension element");
            }
        }
    }

    if !set.is_empty() {
        tracing::debug!(
            element = %element.local_name,
            captured = set.len(),
            "Captured extension content"
        );
    }
    set
}

fn capture_child(child: &XmlElement) -> crate::Result<ExtensionNode> {
    let (mode, value) = match classify(child) {
        ContentMode::Xml => (ContentMode::Xml, child.inner_xml()?),
        ContentMode::Text => (ContentMode::Text, child.inner_text()),
    };
    ExtensionNode::element(
        child.local_name.as_str(),
        child.prefix.as_deref(),
        child.namespace.as_deref(),
        mode,
        value,
    )
}

fn classify(child: &XmlElement) -> ContentMode {
    match child.children.as_slice() {
        [] => ContentMode::Text,
        [only] if node_child_count(only) == 0 => ContentMode::Text,
        _ => ContentMode::Xml,
    }
}

/// Append every node of `set` to `target`, in order, after its current children
///
/// Callers append their mapped children first so extension content never
/// interleaves with them. Text values are escaped on output; markup values
/// are spliced in unchanged.
pub fn emit(set: &ExtensionSet, target: &mut XmlElement) {
    for node in set {
        match node.kind() {
            NodeKind::Attribute => target.attributes.push(XmlAttribute::qualified(
                node.prefix(),
                node.local_name(),
                node.namespace(),
                node.value(),
            )),
            NodeKind::Element => {
                let mut child =
                    XmlElement::qualified(node.prefix(), node.local_name(), node.namespace());
                match node.content_mode() {
                    ContentMode::Text => child.push_text(node.value()),
                    ContentMode::Xml => child.push_raw(node.value()),
                }
                target.children.push(XmlNode::Element(child));
            }
        }
    }
}
