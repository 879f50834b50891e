//! Atom constructs shared by feeds and entries

use std::sync::LazyLock;

use super::atom_text;
use crate::Result;
use crate::config::ATOM_NAMESPACE;
use crate::dispatch::{ElementKind, VersionedElement, unsupported};
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::validation::{
    check_email, check_numeric, check_url_scheme, check_vocabulary, require_text,
};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

/// Values of a text construct's `type` attribute
pub const TEXT_TYPES: &[&str] = &["text", "html", "xhtml"];

static TEXT_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with_names(None, &["type", "src"]));

static PERSON_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(Some(ATOM_NAMESPACE), &["name", "uri", "email"])
});

static LINK_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(None, &["href", "rel", "type", "hreflang", "title", "length"])
});

static CATEGORY_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with_names(None, &["term", "scheme", "label"]));

static GENERATOR_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with_names(None, &["uri", "version"]));

fn attr(element: &XmlElement, name: &str) -> Option<String> {
    element.attribute(name, None).map(str::to_string)
}

/// A text construct: `title`, `subtitle`, `summary`, `content` or `rights`
///
/// For `type="xhtml"` the value is the markup inside the element (normally
/// a single XHTML `<div>`), kept verbatim. Otherwise it is the element's
/// text, which for `html` is escaped markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomText {
    /// `type` attribute; absent means `text`
    pub kind: Option<String>,
    pub value: Option<String>,
    /// Out-of-line content reference, only meaningful on `<content>`
    pub src: Option<String>,
    pub extensions: ExtensionSet,
}

impl AtomText {
    /// Plain text
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Escaped HTML
    pub fn html(value: impl Into<String>) -> Self {
        Self {
            kind: Some("html".to_string()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Whether the value is XHTML markup
    pub fn is_xhtml(&self) -> bool {
        self.kind.as_deref() == Some("xhtml")
    }
}

impl VersionedElement for AtomText {
    const KIND: ElementKind = ElementKind::AtomText;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        let kind = attr(element, "type");
        let value = if kind.as_deref() == Some("xhtml") {
            element.inner_xml()?
        } else {
            element.inner_text()
        };

        // Children are the content itself, so only attributes can be extensions
        let shell = XmlElement {
            prefix: element.prefix.clone(),
            local_name: element.local_name.clone(),
            namespace: element.namespace.clone(),
            attributes: element.attributes.clone(),
            ..Default::default()
        };

        Ok(Self {
            kind,
            value: (!value.is_empty()).then_some(value),
            src: attr(element, "src"),
            extensions: capture(&shell, &TEXT_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Atom10 => {
                let tag = Self::KIND.tag();
                if ctx.validate_content {
                    check_vocabulary(tag, "type", self.kind.as_deref(), TEXT_TYPES)?;
                    check_url_scheme(tag, "src", self.src.as_deref(), &[])?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Atom10 => {
                let mut element =
                    XmlElement::qualified(None, Self::KIND.tag(), Some(ATOM_NAMESPACE));
                element.set_optional_attribute("type", self.kind.as_deref());
                element.set_optional_attribute("src", self.src.as_deref());
                if let Some(value) = &self.value {
                    if self.is_xhtml() {
                        element.push_raw(value.as_str());
                    } else {
                        element.push_text(value.as_str());
                    }
                }
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// A person construct: `author` or `contributor`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomPerson {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub email: Option<String>,
    pub extensions: ExtensionSet,
}

impl AtomPerson {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl VersionedElement for AtomPerson {
    const KIND: ElementKind = ElementKind::AtomPerson;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            name: atom_text(element, "name"),
            uri: atom_text(element, "uri"),
            email: atom_text(element, "email"),
            extensions: capture(element, &PERSON_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Atom10 => {
                let tag = Self::KIND.tag();
                require_text(tag, "name", self.name.as_deref())?;
                if ctx.validate_content {
                    check_url_scheme(tag, "uri", self.uri.as_deref(), &[])?;
                    check_email(tag, "email", self.email.as_deref())?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Atom10 => {
                let mut element =
                    XmlElement::qualified(None, Self::KIND.tag(), Some(ATOM_NAMESPACE));
                element.push_text_child("name", Some(ATOM_NAMESPACE), self.name.as_deref());
                element.push_text_child("uri", Some(ATOM_NAMESPACE), self.uri.as_deref());
                element.push_text_child("email", Some(ATOM_NAMESPACE), self.email.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<link href="..." rel="..."/>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomLink {
    pub href: Option<String>,
    pub rel: Option<String>,
    pub mime_type: Option<String>,
    pub hreflang: Option<String>,
    pub title: Option<String>,
    pub length: Option<String>,
    pub extensions: ExtensionSet,
}

impl AtomLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Link with an explicit relation
    pub fn with_rel(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            rel: Some(rel.into()),
            ..Self::new(href)
        }
    }

    /// Relation, defaulting to `alternate` when absent
    pub fn relation(&self) -> &str {
        self.rel.as_deref().unwrap_or("alternate")
    }
}

impl VersionedElement for AtomLink {
    const KIND: ElementKind = ElementKind::AtomLink;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            href: attr(element, "href"),
            rel: attr(element, "rel"),
            mime_type: attr(element, "type"),
            hreflang: attr(element, "hreflang"),
            title: attr(element, "title"),
            length: attr(element, "length"),
            extensions: capture(element, &LINK_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Atom10 => {
                let tag = Self::KIND.tag();
                require_text(tag, "href", self.href.as_deref())?;
                if ctx.validate_content {
                    check_url_scheme(tag, "href", self.href.as_deref(), &[])?;
                    check_numeric::<u64>(tag, "length", self.length.as_deref())?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Atom10 => {
                let mut element =
                    XmlElement::qualified(None, Self::KIND.tag(), Some(ATOM_NAMESPACE));
                element.set_optional_attribute("href", self.href.as_deref());
                element.set_optional_attribute("rel", self.rel.as_deref());
                element.set_optional_attribute("type", self.mime_type.as_deref());
                element.set_optional_attribute("hreflang", self.hreflang.as_deref());
                element.set_optional_attribute("title", self.title.as_deref());
                element.set_optional_attribute("length", self.length.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<category term="..."/>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomCategory {
    pub term: Option<String>,
    pub scheme: Option<String>,
    pub label: Option<String>,
    pub extensions: ExtensionSet,
}

impl AtomCategory {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }
}

impl VersionedElement for AtomCategory {
    const KIND: ElementKind = ElementKind::AtomCategory;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            term: attr(element, "term"),
            scheme: attr(element, "scheme"),
            label: attr(element, "label"),
            extensions: capture(element, &CATEGORY_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Atom10 => {
                let tag = Self::KIND.tag();
                require_text(tag, "term", self.term.as_deref())?;
                if ctx.validate_content {
                    check_url_scheme(tag, "scheme", self.scheme.as_deref(), &[])?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Atom10 => {
                let mut element =
                    XmlElement::qualified(None, Self::KIND.tag(), Some(ATOM_NAMESPACE));
                element.set_optional_attribute("term", self.term.as_deref());
                element.set_optional_attribute("scheme", self.scheme.as_deref());
                element.set_optional_attribute("label", self.label.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<generator uri="..." version="...">Name</generator>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomGenerator {
    pub uri: Option<String>,
    pub version: Option<String>,
    pub value: Option<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for AtomGenerator {
    const KIND: ElementKind = ElementKind::AtomGenerator;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        let value = element.own_text();
        Ok(Self {
            uri: attr(element, "uri"),
            version: attr(element, "version"),
            value: (!value.is_empty()).then_some(value),
            extensions: capture(element, &GENERATOR_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Atom10 => {
                if ctx.validate_content {
                    check_url_scheme(Self::KIND.tag(), "uri", self.uri.as_deref(), &[])?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Atom10 => {
                let mut element =
                    XmlElement::qualified(None, Self::KIND.tag(), Some(ATOM_NAMESPACE));
                element.set_optional_attribute("uri", self.uri.as_deref());
                element.set_optional_attribute("version", self.version.as_deref());
                if let Some(value) = &self.value {
                    element.push_text(value.as_str());
                }
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}
