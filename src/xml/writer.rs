//! Tree serialization through quick-xml's writer
//!
//! Every element and prefixed attribute gets a namespace declaration when its
//! binding is not already in scope. Declarations the tree carries explicitly
//! are written first, in order, so re-parsing and re-writing output is stable.

use std::fmt::Display;

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

use super::{XmlElement, XmlNode, qualify};
use crate::config::NamespaceBinding;
use crate::{FeedError, Result};

/// Serialize a root element, optionally preceded by an XML declaration line
pub fn write_document(
    root: &XmlElement,
    declaration: Option<&str>,
    indent: Option<usize>,
) -> Result<String> {
    let mut writer = match indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };
    if let Some(declaration) = declaration {
        writer.get_mut().extend_from_slice(declaration.as_bytes());
        writer.get_mut().push(b'\n');
    }

    let mut scope = Vec::new();
    write_element(&mut writer, root, &mut scope)?;
    into_string(writer)
}

/// Default namespace assumed around a fragment; no real URI can match it
const UNKNOWN_DEFAULT: &str = "\0";

/// Serialize a sequence of sibling nodes with no enclosing element
///
/// The markup may later be spliced under any default namespace, so every
/// unprefixed element states its own (`xmlns=""` when it has none).
pub fn write_fragment(nodes: &[XmlNode]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let mut scope = vec![NamespaceBinding {
        prefix: None,
        uri: UNKNOWN_DEFAULT.to_string(),
    }];
    for node in nodes {
        write_node(&mut writer, node, &mut scope)?;
    }
    into_string(writer)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    node: &XmlNode,
    scope: &mut Vec<NamespaceBinding>,
) -> Result<()> {
    match node {
        XmlNode::Element(element) => write_element(writer, element, scope),
        XmlNode::Text(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error),
        XmlNode::CData(text) if text.contains("]]>") => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error),
        XmlNode::CData(text) => writer
            .write_event(Event::CData(BytesCData::new(text.as_str())))
            .map_err(write_error),
        XmlNode::Comment(text) => writer
            .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
            .map_err(write_error),
        XmlNode::Raw(markup) => {
            writer.get_mut().extend_from_slice(markup.as_bytes());
            Ok(())
        }
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &XmlElement,
    scope: &mut Vec<NamespaceBinding>,
) -> Result<()> {
    let mark = scope.len();
    let name = element.qualified_name();

    let mut declarations = element.declarations.clone();
    scope.extend(element.declarations.iter().cloned());
    require_binding(
        scope,
        &mut declarations,
        element.prefix.as_deref(),
        element.namespace.as_deref().unwrap_or(""),
    );

    let mut attributes = Vec::with_capacity(element.attributes.len());
    for attr in &element.attributes {
        let prefix = match (attr.prefix.as_deref(), attr.namespace.as_deref()) {
            (Some(prefix), Some(uri)) => {
                require_binding(scope, &mut declarations, Some(prefix), uri);
                Some(prefix.to_string())
            }
            (None, Some(uri)) if !uri.is_empty() => {
                let prefix = prefix_for(scope, uri).unwrap_or_else(|| format!("ns{}", scope.len()));
                require_binding(scope, &mut declarations, Some(prefix.as_str()), uri);
                Some(prefix)
            }
            (prefix, _) => prefix.map(str::to_string),
        };
        attributes.push((qualify(prefix.as_deref(), &attr.local_name), attr.value.as_str()));
    }

    let mut start = BytesStart::new(name.as_str());
    for binding in &declarations {
        let key = match &binding.prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        start.push_attribute((key.as_str(), binding.uri.as_str()));
    }
    for (key, value) in &attributes {
        start.push_attribute((key.as_str(), *value));
    }

    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(write_error)?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(write_error)?;
        for child in &element.children {
            write_node(writer, child, scope)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))
            .map_err(write_error)?;
    }

    scope.truncate(mark);
    Ok(())
}

/// Add a declaration unless `prefix` already resolves to `uri` in scope
fn require_binding(
    scope: &mut Vec<NamespaceBinding>,
    declarations: &mut Vec<NamespaceBinding>,
    prefix: Option<&str>,
    uri: &str,
) {
    // `xml` is bound by definition and a prefix cannot be undeclared in XML 1.0
    if prefix == Some("xml") || (prefix.is_some() && uri.is_empty()) {
        return;
    }
    if lookup(scope, prefix) == uri {
        return;
    }
    let binding = NamespaceBinding {
        prefix: prefix.map(str::to_string),
        uri: uri.to_string(),
    };
    scope.push(binding.clone());
    declarations.push(binding);
}

fn lookup<'a>(scope: &'a [NamespaceBinding], prefix: Option<&str>) -> &'a str {
    scope
        .iter()
        .rev()
        .find(|b| b.prefix.as_deref() == prefix)
        .map(|b| b.uri.as_str())
        .unwrap_or("")
}

fn prefix_for(scope: &[NamespaceBinding], uri: &str) -> Option<String> {
    scope
        .iter()
        .rev()
        .filter(|b| b.uri == uri)
        .filter_map(|b| b.prefix.clone())
        .find(|prefix| lookup(scope, Some(prefix)) == uri)
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| FeedError::Format(format!("serialized XML is not UTF-8: {e}")))
}

fn write_error(e: impl Display) -> FeedError {
    FeedError::Io(std::io::Error::other(e.to_string()))
}
