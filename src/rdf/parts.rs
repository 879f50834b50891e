//! RSS 1.0 `<item>`, `<image>` and `<textinput>` siblings of the channel

use std::sync::LazyLock;

use super::{about_names, push_about, rss10_text};
use crate::Result;
use crate::config::{RDF_NAMESPACE, RSS10_NAMESPACE};
use crate::dispatch::{ElementKind, VersionedElement, unsupported};
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::validation::{check_max_length, check_url_scheme, link_schemes, require_text};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

static ITEM_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| about_names(&["title", "link", "description"]));

static IMAGE_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| about_names(&["title", "url", "link"]));

static TEXT_INPUT_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| about_names(&["title", "description", "name", "link"]));

/// `<item rdf:about="...">`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdfItem {
    pub about: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub extensions: ExtensionSet,
}

impl RdfItem {
    /// Create an item whose `about` is its link
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            about: Some(link.clone()),
            title: Some(title.into()),
            link: Some(link),
            ..Default::default()
        }
    }
}

impl VersionedElement for RdfItem {
    const KIND: ElementKind = ElementKind::RdfItem;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            about: element.attribute("about", Some(RDF_NAMESPACE)).map(str::to_string),
            title: rss10_text(element, "title"),
            link: rss10_text(element, "link"),
            description: rss10_text(element, "description"),
            extensions: capture(element, &ITEM_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rdf10 => {
                let tag = Self::KIND.tag();
                require_text(tag, "about", self.about.as_deref())?;
                require_text(tag, "title", self.title.as_deref())?;
                require_text(tag, "link", self.link.as_deref())?;
                if ctx.validate_content {
                    check_max_length(tag, "title", self.title.as_deref(), 100)?;
                    check_max_length(tag, "link", self.link.as_deref(), 500)?;
                    check_max_length(tag, "description", self.description.as_deref(), 500)?;
                    check_url_scheme(tag, "about", self.about.as_deref(), &[])?;
                    check_url_scheme(tag, "link", self.link.as_deref(), link_schemes(ctx.version))?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rdf10 => {
                let mut element = XmlElement::qualified(None, Self::KIND.tag(), Some(RSS10_NAMESPACE));
                push_about(&mut element, self.about.as_deref());
                element.push_text_child("title", Some(RSS10_NAMESPACE), self.title.as_deref());
                element.push_text_child("link", Some(RSS10_NAMESPACE), self.link.as_deref());
                element.push_text_child(
                    "description",
                    Some(RSS10_NAMESPACE),
                    self.description.as_deref(),
                );
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<image rdf:about="...">`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdfImage {
    pub about: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub link: Option<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RdfImage {
    const KIND: ElementKind = ElementKind::RdfImage;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            about: element.attribute("about", Some(RDF_NAMESPACE)).map(str::to_string),
            title: rss10_text(element, "title"),
            url: rss10_text(element, "url"),
            link: rss10_text(element, "link"),
            extensions: capture(element, &IMAGE_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rdf10 => {
                let tag = Self::KIND.tag();
                require_text(tag, "about", self.about.as_deref())?;
                require_text(tag, "title", self.title.as_deref())?;
                require_text(tag, "url", self.url.as_deref())?;
                require_text(tag, "link", self.link.as_deref())?;
                if ctx.validate_content {
                    let schemes = link_schemes(ctx.version);
                    check_max_length(tag, "title", self.title.as_deref(), 40)?;
                    check_url_scheme(tag, "about", self.about.as_deref(), &[])?;
                    check_url_scheme(tag, "url", self.url.as_deref(), schemes)?;
                    check_url_scheme(tag, "link", self.link.as_deref(), schemes)?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rdf10 => {
                let mut element = XmlElement::qualified(None, Self::KIND.tag(), Some(RSS10_NAMESPACE));
                push_about(&mut element, self.about.as_deref());
                element.push_text_child("title", Some(RSS10_NAMESPACE), self.title.as_deref());
                element.push_text_child("url", Some(RSS10_NAMESPACE), self.url.as_deref());
                element.push_text_child("link", Some(RSS10_NAMESPACE), self.link.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<textinput rdf:about="...">`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdfTextInput {
    pub about: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub link: Option<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RdfTextInput {
    const KIND: ElementKind = ElementKind::RdfTextInput;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            about: element.attribute("about", Some(RDF_NAMESPACE)).map(str::to_string),
            title: rss10_text(element, "title"),
            description: rss10_text(element, "description"),
            name: rss10_text(element, "name"),
            link: rss10_text(element, "link"),
            extensions: capture(element, &TEXT_INPUT_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rdf10 => {
                let tag = Self::KIND.tag();
                require_text(tag, "about", self.about.as_deref())?;
                require_text(tag, "title", self.title.as_deref())?;
                require_text(tag, "description", self.description.as_deref())?;
                require_text(tag, "name", self.name.as_deref())?;
                require_text(tag, "link", self.link.as_deref())?;
                if ctx.validate_content {
                    check_url_scheme(tag, "about", self.about.as_deref(), &[])?;
                    check_url_scheme(tag, "link", self.link.as_deref(), link_schemes(ctx.version))?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rdf10 => {
                let mut element = XmlElement::qualified(None, Self::KIND.tag(), Some(RSS10_NAMESPACE));
                push_about(&mut element, self.about.as_deref());
                element.push_text_child("title", Some(RSS10_NAMESPACE), self.title.as_deref());
                element.push_text_child(
                    "description",
                    Some(RSS10_NAMESPACE),
                    self.description.as_deref(),
                );
                element.push_text_child("name", Some(RSS10_NAMESPACE), self.name.as_deref());
                element.push_text_child("link", Some(RSS10_NAMESPACE), self.link.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}
