//! Per-version validation and serialization dispatch
//!
//! Every schema element implements [`VersionedElement`]. Its `validate` and
//! `to_xml` match on the [`SpecVersion`] explicitly: each version the element
//! exists in gets its own arm, and every other version falls through to an
//! arm returning [`unsupported`]. There is no default that silently accepts a
//! version, so e.g. an RSS `<enclosure>` can never validate against RSS 0.91.

use std::fmt;

use crate::config::FormatConfig;
use crate::error::ValidationError;
use crate::version::{FeedFormat, SpecVersion, ValidationContext};
use crate::xml::XmlElement;
use crate::{FeedError, Result};

/// Closed set of element kinds the model knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `<rss>` document root
    RssFeed,
    /// RSS `<channel>`
    RssChannel,
    /// RSS `<item>`
    RssItem,
    /// Item `<enclosure>` (0.92+)
    RssEnclosure,
    /// Item `<guid>` (2.0 only)
    RssGuid,
    /// Item `<source>` (0.92+)
    RssSource,
    /// Channel `<cloud>` (0.92+)
    RssCloud,
    /// Channel or item `<category>`
    RssCategory,
    /// Channel `<image>`
    RssImage,
    /// Channel `<textInput>`
    RssTextInput,
    /// Channel `<skipHours>`
    RssSkipHours,
    /// Channel `<skipDays>`
    RssSkipDays,
    /// `<rdf:RDF>` document root
    RdfFeed,
    /// RSS 1.0 `<channel>`
    RdfChannel,
    /// RSS 1.0 `<item>`
    RdfItem,
    /// RSS 1.0 `<image>`
    RdfImage,
    /// RSS 1.0 `<textinput>`
    RdfTextInput,
    /// Atom `<feed>` document root
    AtomFeed,
    /// Atom `<entry>`
    AtomEntry,
    /// Text construct (`title`, `subtitle`, `summary`, `content`, `rights`)
    AtomText,
    /// Person construct (`author`, `contributor`)
    AtomPerson,
    /// Atom `<link>`
    AtomLink,
    /// Atom `<category>`
    AtomCategory,
    /// Atom `<generator>`
    AtomGenerator,
}

impl ElementKind {
    /// Local name of the element as written
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::RssFeed => "rss",
            ElementKind::RssChannel | ElementKind::RdfChannel => "channel",
            ElementKind::RssItem | ElementKind::RdfItem => "item",
            ElementKind::RssEnclosure => "enclosure",
            ElementKind::RssGuid => "guid",
            ElementKind::RssSource => "source",
            ElementKind::RssCloud => "cloud",
            ElementKind::RssCategory | ElementKind::AtomCategory => "category",
            ElementKind::RssImage | ElementKind::RdfImage => "image",
            ElementKind::RssTextInput => "textInput",
            ElementKind::RdfTextInput => "textinput",
            ElementKind::RssSkipHours => "skipHours",
            ElementKind::RssSkipDays => "skipDays",
            ElementKind::RdfFeed => "RDF",
            ElementKind::AtomFeed => "feed",
            ElementKind::AtomEntry => "entry",
            ElementKind::AtomText => "text",
            ElementKind::AtomPerson => "person",
            ElementKind::AtomLink => "link",
            ElementKind::AtomGenerator => "generator",
        }
    }

    /// Document family the element belongs to
    pub fn format(self) -> FeedFormat {
        match self {
            ElementKind::RssFeed
            | ElementKind::RssChannel
            | ElementKind::RssItem
            | ElementKind::RssEnclosure
            | ElementKind::RssGuid
            | ElementKind::RssSource
            | ElementKind::RssCloud
            | ElementKind::RssCategory
            | ElementKind::RssImage
            | ElementKind::RssTextInput
            | ElementKind::RssSkipHours
            | ElementKind::RssSkipDays => FeedFormat::Rss,
            ElementKind::RdfFeed
            | ElementKind::RdfChannel
            | ElementKind::RdfItem
            | ElementKind::RdfImage
            | ElementKind::RdfTextInput => FeedFormat::Rdf,
            ElementKind::AtomFeed
            | ElementKind::AtomEntry
            | ElementKind::AtomText
            | ElementKind::AtomPerson
            | ElementKind::AtomLink
            | ElementKind::AtomCategory
            | ElementKind::AtomGenerator => FeedFormat::Atom,
        }
    }

    /// Whether the element exists in `version`
    pub fn supported_in(self, version: SpecVersion) -> bool {
        match self {
            ElementKind::RssEnclosure
            | ElementKind::RssSource
            | ElementKind::RssCloud
            | ElementKind::RssCategory => {
                matches!(version, SpecVersion::Rss092 | SpecVersion::Rss201)
            }
            ElementKind::RssGuid => version == SpecVersion::Rss201,
            _ => self.format() == version.format(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.format(), self.tag())
    }
}

/// The "not supported in this version" failure for `kind`
pub fn unsupported(kind: ElementKind, version: SpecVersion) -> FeedError {
    tracing::trace!(element = %kind, %version, "Element not supported in version");
    ValidationError::unsupported(kind.tag(), version).into()
}

/// Capability shared by every schema element
pub trait VersionedElement: Sized {
    /// Which element this is
    const KIND: ElementKind;

    /// Build from a parsed element
    ///
    /// Permissive: missing optional children are left absent and unmapped
    /// content is kept as extension content. Only malformed date text fails.
    fn from_xml(element: &XmlElement) -> Result<Self>;

    /// Check the element against `ctx.version`
    ///
    /// Presence of version-required fields is always checked; value-level
    /// rules only when `ctx.validate_content` is set. Owned sub-elements are
    /// validated before the element's own checks finish.
    fn validate(&self, ctx: &ValidationContext) -> Result<()>;

    /// Serialize for `version` without validating
    ///
    /// Mapped children come first, extension content last.
    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement>;
}

/// Validate every member in order, stopping at the first failure
pub fn validate_all<'a, T, I>(items: I, ctx: &ValidationContext) -> Result<()>
where
    T: VersionedElement + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().try_for_each(|item| item.validate(ctx))
}

/// Validate an optional sub-element if present
pub fn validate_optional<T: VersionedElement>(
    item: Option<&T>,
    ctx: &ValidationContext,
) -> Result<()> {
    item.map_or(Ok(()), |item| item.validate(ctx))
}

/// Serialize every member in order and append them to `parent`
pub fn append_all<'a, T, I>(parent: &mut XmlElement, items: I, version: SpecVersion) -> Result<()>
where
    T: VersionedElement + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        parent.push_child(item.to_xml(version)?);
    }
    Ok(())
}

/// Serialize an optional sub-element if present
pub fn append_optional<T: VersionedElement>(
    parent: &mut XmlElement,
    item: Option<&T>,
    version: SpecVersion,
) -> Result<()> {
    if let Some(item) = item {
        parent.push_child(item.to_xml(version)?);
    }
    Ok(())
}

/// Serialize an element, validating it first when the configuration asks to
pub fn save<T: VersionedElement>(
    element: &T,
    version: SpecVersion,
    config: &FormatConfig,
) -> Result<XmlElement> {
    if config.validate_on_save {
        element.validate(&ValidationContext::content(version))?;
    }
    element.to_xml(version)
}
