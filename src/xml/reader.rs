//! Tree construction from quick-xml's namespace-aware reader

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;

use super::{XmlAttribute, XmlElement, XmlNode};
use crate::config::{NamespaceBinding, XML_NAMESPACE};
use crate::{FeedError, Result};

/// Parse a complete document and return its root element
///
/// Whitespace-only text nodes are dropped unless an enclosing element sets
/// `xml:space="preserve"`; all other text is kept exactly as written (after
/// entity unescaping). Comments and CDATA sections inside the
/// root are preserved, while the XML declaration, DOCTYPE and processing
/// instructions are skipped.
///
/// # Errors
///
/// Returns [`FeedError::Format`] if the text is not well-formed XML, uses an
/// undeclared prefix, or has no root element.
///
/// # Security
///
/// quick-xml (0.37) never parses `<!ENTITY>` declarations, so only the five
/// predefined entities and character references are ever expanded.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        let (resolved, event) = reader.read_resolved_event().map_err(|e| {
            FeedError::Format(format!("XML parse error at position {position}: {e}"))
        })?;
        let namespace = namespace_of(resolved, "element")?;

        match event {
            Event::Start(start) => {
                let element = open_element(&reader, &start, namespace)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start, namespace)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    FeedError::Format("unexpected closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| FeedError::Format(format!("invalid character data: {e}")))?;
                if text.trim().is_empty() && !preserves_space(&stack) {
                    continue;
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Text(text.into_owned())),
                    None => {
                        return Err(FeedError::Format(
                            "text content outside the root element".to_string(),
                        ));
                    }
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    parent.children.push(XmlNode::CData(text));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&comment).into_owned();
                    parent.children.push(XmlNode::Comment(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(FeedError::Format(
            "unexpected end of document: unclosed elements".to_string(),
        ));
    }

    root.ok_or_else(|| FeedError::Format("document has no root element".to_string()))
}

/// Nearest `xml:space` in scope asks for whitespace to be kept
fn preserves_space(stack: &[XmlElement]) -> bool {
    stack
        .iter()
        .rev()
        .find_map(|element| element.attribute("space", Some(XML_NAMESPACE)))
        .is_some_and(|value| value == "preserve")
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(FeedError::Format(
            "document has more than one root element".to_string(),
        )),
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
) -> Result<XmlElement> {
    let name = start.name();
    let mut element = XmlElement {
        prefix: name.prefix().map(|p| lossy(p.as_ref())),
        local_name: lossy(start.local_name().as_ref()),
        namespace,
        ..Default::default()
    };

    for attr_result in start.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(e) => {
                tracing::warn!(element = %element.local_name, error = %e, "Skipping malformed attribute");
                continue;
            }
        };
        let value = attr
            .unescape_value()
            .map_err(|e| FeedError::Format(format!("invalid attribute value: {e}")))?
            .into_owned();

        if let Some(declaration) = attr.key.as_namespace_binding() {
            let prefix = match declaration {
                PrefixDeclaration::Default => None,
                PrefixDeclaration::Named(prefix) => Some(lossy(prefix)),
            };
            element.declarations.push(NamespaceBinding { prefix, uri: value });
            continue;
        }

        let (resolved, local_name) = reader.resolve_attribute(attr.key);
        let namespace = namespace_of(resolved, "attribute")?;
        element.attributes.push(XmlAttribute {
            prefix: attr.key.prefix().map(|p| lossy(p.as_ref())),
            local_name: lossy(local_name.as_ref()),
            namespace,
            value,
        });
    }

    Ok(element)
}

fn namespace_of(resolved: ResolveResult<'_>, what: &str) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) if uri.is_empty() => Ok(None),
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(lossy(uri))),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => Ok(Some(XML_NAMESPACE.to_string())),
        ResolveResult::Unknown(prefix) => Err(FeedError::Format(format!(
            "{what} uses undeclared namespace prefix '{}'",
            lossy(&prefix)
        ))),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_namespaces() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <title type="text">Example</title>
  <dc:rights dc:lang="en">CC</dc:rights>
</feed>"#,
        )
        .unwrap();

        assert_eq!(root.local_name, "feed");
        assert_eq!(root.namespace.as_deref(), Some("http://www.w3.org/2005/Atom"));
        assert_eq!(root.declarations.len(), 2);
        assert!(root.attributes.is_empty());

        let title = root.child("title", Some("http://www.w3.org/2005/Atom")).unwrap();
        assert_eq!(title.attribute("type", None), Some("text"));
        assert_eq!(title.inner_text(), "Example");

        let rights = root
            .child("rights", Some("http://purl.org/dc/elements/1.1/"))
            .unwrap();
        assert_eq!(rights.prefix.as_deref(), Some("dc"));
        let attr = &rights.attributes[0];
        assert_eq!(attr.prefix.as_deref(), Some("dc"));
        assert_eq!(attr.namespace.as_deref(), Some("http://purl.org/dc/elements/1.1/"));
    }

    #[test]
    fn test_xml_prefix_is_predeclared() {
        let root = parse_document(r#"<feed xml:lang="en-US"/>"#).unwrap();
        assert_eq!(root.attribute("lang", Some(XML_NAMESPACE)), Some("en-US"));
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let root = parse_document("<a>\n  <b> x </b>\n</a>").unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.child("b", None).unwrap().inner_text(), " x ");
    }

    #[test]
    fn test_xml_space_preserve_keeps_whitespace() {
        let root = parse_document(
            r#"<a>
  <p xml:space="preserve"><b>a</b> <i>b</i><r xml:space="default"> <s/></r></p>
  <q><b>a</b> <i>b</i></q>
</a>"#,
        )
        .unwrap();
        let p = root.child("p", None).unwrap();
        assert_eq!(p.children.len(), 4);
        assert!(matches!(&p.children[1], XmlNode::Text(t) if t == " "));
        assert_eq!(p.child("r", None).unwrap().children.len(), 1);
        assert_eq!(root.child("q", None).unwrap().children.len(), 2);
    }

    #[test]
    fn test_entities_unescaped() {
        let root = parse_document(r#"<a t="&lt;b&gt;">Tom &amp; Jerry</a>"#).unwrap();
        assert_eq!(root.attribute("t", None), Some("<b>"));
        assert_eq!(root.inner_text(), "Tom & Jerry");
    }

    #[test]
    fn test_rejects_undeclared_prefix() {
        let err = parse_document("<a><x:b/></a>").unwrap_err();
        assert!(err.to_string().contains("undeclared namespace prefix"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("").is_err());
        assert!(parse_document("<a>").is_err());
    }
}
