//! RDF Site Summary (RSS 1.0) documents
//!
//! The root is `rdf:RDF`; channel, image, items and text input are its
//! children, all in the RSS 1.0 namespace and identified by `rdf:about`.

mod channel;
mod parts;

pub use self::channel::RdfChannel;
pub use self::parts::{RdfImage, RdfItem, RdfTextInput};

use std::sync::LazyLock;

use crate::config::{RDF_NAMESPACE, RSS10_NAMESPACE};
use crate::dispatch::{
    ElementKind, VersionedElement, append_all, append_optional, unsupported, validate_all,
    validate_optional,
};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::{XmlAttribute, XmlElement};
use crate::Result;

static ROOT_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        Some(RSS10_NAMESPACE),
        &["channel", "image", "item", "textinput"],
    )
});

/// Exclusions for an RSS 1.0 element: its mapped children plus `rdf:about`
pub(crate) fn about_names(children: &[&str]) -> ExclusionSet {
    ExclusionSet::new()
        .with_names(Some(RSS10_NAMESPACE), children)
        .with("about", Some(RDF_NAMESPACE))
}

pub(crate) fn rss10_text(element: &XmlElement, name: &str) -> Option<String> {
    element.child_text(name, Some(RSS10_NAMESPACE))
}

/// `rdf:resource` of a reference element; an unprefixed `resource` is tolerated
pub(crate) fn resource_of(element: &XmlElement) -> Option<String> {
    element
        .attribute("resource", Some(RDF_NAMESPACE))
        .or_else(|| element.attribute("resource", None))
        .map(str::to_string)
}

pub(crate) fn push_about(element: &mut XmlElement, about: Option<&str>) {
    if let Some(about) = about {
        element.attributes.push(XmlAttribute::qualified(
            Some("rdf"),
            "about",
            Some(RDF_NAMESPACE),
            about,
        ));
    }
}

/// Append `<name rdf:resource="..."/>` if `resource` is present
pub(crate) fn push_resource(element: &mut XmlElement, name: &str, resource: Option<&str>) {
    if let Some(resource) = resource {
        let mut reference = XmlElement::qualified(None, name, Some(RSS10_NAMESPACE));
        reference.attributes.push(XmlAttribute::qualified(
            Some("rdf"),
            "resource",
            Some(RDF_NAMESPACE),
            resource,
        ));
        element.push_child(reference);
    }
}

/// The `rdf:RDF` document root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdfFeed {
    pub channel: Option<RdfChannel>,
    pub image: Option<RdfImage>,
    pub items: Vec<RdfItem>,
    pub text_input: Option<RdfTextInput>,
    pub extensions: ExtensionSet,
}

impl RdfFeed {
    /// Wrap a channel and its items, listing every item in the channel's sequence
    pub fn new(mut channel: RdfChannel, items: Vec<RdfItem>) -> Self {
        channel.items = items.iter().filter_map(|item| item.about.clone()).collect();
        Self {
            channel: Some(channel),
            items,
            ..Default::default()
        }
    }

    /// Every channel reference must name a sibling element
    fn check_references(&self, channel: &RdfChannel) -> Result<()> {
        let tag = ElementKind::RdfChannel.tag();
        for resource in &channel.items {
            if !self.items.iter().any(|item| item.about.as_ref() == Some(resource)) {
                return Err(ValidationError::new(
                    tag,
                    "items",
                    format!("'{resource}' does not refer to an item"),
                )
                .into());
            }
        }
        if let Some(image) = &channel.image {
            if self.image.as_ref().and_then(|i| i.about.as_ref()) != Some(image) {
                return Err(ValidationError::new(
                    tag,
                    "image",
                    format!("'{image}' does not refer to the image"),
                )
                .into());
            }
        }
        if let Some(input) = &channel.text_input {
            if self.text_input.as_ref().and_then(|t| t.about.as_ref()) != Some(input) {
                return Err(ValidationError::new(
                    tag,
                    "textinput",
                    format!("'{input}' does not refer to the text input"),
                )
                .into());
            }
        }
        Ok(())
    }
}

impl VersionedElement for RdfFeed {
    const KIND: ElementKind = ElementKind::RdfFeed;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            channel: element
                .child("channel", Some(RSS10_NAMESPACE))
                .map(RdfChannel::from_xml)
                .transpose()?,
            image: element
                .child("image", Some(RSS10_NAMESPACE))
                .map(RdfImage::from_xml)
                .transpose()?,
            items: element
                .children_named("item", Some(RSS10_NAMESPACE))
                .map(RdfItem::from_xml)
                .collect::<Result<_>>()?,
            text_input: element
                .child("textinput", Some(RSS10_NAMESPACE))
                .map(RdfTextInput::from_xml)
                .transpose()?,
            extensions: capture(element, &ROOT_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rdf10 => {
                let channel = self
                    .channel
                    .as_ref()
                    .ok_or_else(|| ValidationError::missing(Self::KIND.tag(), "channel"))?;
                channel.validate(ctx)?;
                validate_optional(self.image.as_ref(), ctx)?;
                validate_all(&self.items, ctx)?;
                validate_optional(self.text_input.as_ref(), ctx)?;
                if ctx.validate_content {
                    self.check_references(channel)?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rdf10 => {
                let mut element =
                    XmlElement::qualified(Some("rdf"), Self::KIND.tag(), Some(RDF_NAMESPACE));
                append_optional(&mut element, self.channel.as_ref(), version)?;
                append_optional(&mut element, self.image.as_ref(), version)?;
                append_all(&mut element, &self.items, version)?;
                append_optional(&mut element, self.text_input.as_ref(), version)?;
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}
