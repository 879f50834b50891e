//! RSS 1.0 `<channel>`

use std::sync::LazyLock;

use super::{about_names, push_about, push_resource, resource_of, rss10_text};
use crate::Result;
use crate::config::{RDF_NAMESPACE, RSS10_NAMESPACE};
use crate::dispatch::{ElementKind, VersionedElement, unsupported};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::validation::{check_max_length, check_url_scheme, link_schemes, require_text};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::{XmlAttribute, XmlElement};

static CHANNEL_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    about_names(&["title", "link", "description", "image", "items", "textinput"])
});

/// `<channel rdf:about="...">`
///
/// Unlike RSS 0.9x/2.0 the channel does not contain its items, image or
/// text input. It refers to them by URI, and the elements themselves are
/// siblings under `rdf:RDF`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdfChannel {
    pub about: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// `rdf:resource` of the channel's `<image>` reference
    pub image: Option<String>,
    /// `rdf:resource` of every `<rdf:li>` in `<items><rdf:Seq>`
    pub items: Vec<String>,
    /// `rdf:resource` of the channel's `<textinput>` reference
    pub text_input: Option<String>,
    pub extensions: ExtensionSet,
}

impl RdfChannel {
    /// Create a channel whose `about` is its link
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let link = link.into();
        Self {
            about: Some(link.clone()),
            title: Some(title.into()),
            link: Some(link),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

impl VersionedElement for RdfChannel {
    const KIND: ElementKind = ElementKind::RdfChannel;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        let items = element
            .child("items", Some(RSS10_NAMESPACE))
            .and_then(|items| items.child("Seq", Some(RDF_NAMESPACE)))
            .map(|seq| {
                seq.children_named("li", Some(RDF_NAMESPACE))
                    .filter_map(resource_of)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            about: element.attribute("about", Some(RDF_NAMESPACE)).map(str::to_string),
            title: rss10_text(element, "title"),
            link: rss10_text(element, "link"),
            description: rss10_text(element, "description"),
            image: element.child("image", Some(RSS10_NAMESPACE)).and_then(resource_of),
            items,
            text_input: element
                .child("textinput", Some(RSS10_NAMESPACE))
                .and_then(resource_of),
            extensions: capture(element, &CHANNEL_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rdf10 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }
        let tag = Self::KIND.tag();
        require_text(tag, "about", self.about.as_deref())?;
        require_text(tag, "title", self.title.as_deref())?;
        require_text(tag, "link", self.link.as_deref())?;
        require_text(tag, "description", self.description.as_deref())?;
        if self.items.is_empty() {
            return Err(ValidationError::new(tag, "items", "at least one item is required").into());
        }

        if ctx.validate_content {
            check_max_length(tag, "title", self.title.as_deref(), 40)?;
            check_max_length(tag, "description", self.description.as_deref(), 500)?;
            check_max_length(tag, "link", self.link.as_deref(), 500)?;
            check_url_scheme(tag, "about", self.about.as_deref(), &[])?;
            check_url_scheme(tag, "link", self.link.as_deref(), link_schemes(ctx.version))?;
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rdf10 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }

        let mut element = XmlElement::qualified(None, Self::KIND.tag(), Some(RSS10_NAMESPACE));
        push_about(&mut element, self.about.as_deref());
        element.push_text_child("title", Some(RSS10_NAMESPACE), self.title.as_deref());
        element.push_text_child("link", Some(RSS10_NAMESPACE), self.link.as_deref());
        element.push_text_child(
            "description",
            Some(RSS10_NAMESPACE),
            self.description.as_deref(),
        );
        push_resource(&mut element, "image", self.image.as_deref());

        let mut seq = XmlElement::qualified(Some("rdf"), "Seq", Some(RDF_NAMESPACE));
        for resource in &self.items {
            let mut li = XmlElement::qualified(Some("rdf"), "li", Some(RDF_NAMESPACE));
            li.attributes.push(XmlAttribute::qualified(
                Some("rdf"),
                "resource",
                Some(RDF_NAMESPACE),
                resource.as_str(),
            ));
            seq.push_child(li);
        }
        let mut items = XmlElement::qualified(None, "items", Some(RSS10_NAMESPACE));
        items.push_child(seq);
        element.push_child(items);

        push_resource(&mut element, "textinput", self.text_input.as_deref());
        emit(&self.extensions, &mut element);
        Ok(element)
    }
}
