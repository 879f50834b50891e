//! Atom 1.0 (RFC 4287) documents

mod entry;
mod parts;

pub use self::entry::AtomEntry;
pub use self::parts::{AtomCategory, AtomGenerator, AtomLink, AtomPerson, AtomText, TEXT_TYPES};

use std::sync::LazyLock;

use crate::{FeedError, Result};
use crate::config::ATOM_NAMESPACE;
use crate::dispatch::{
    ElementKind, VersionedElement, append_all, unsupported, validate_all, validate_optional,
};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::temporal::{DateDialect, TemporalValue, parse_optional};
use crate::validation::{check_date, check_url_scheme, require, require_text};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

static FEED_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        Some(ATOM_NAMESPACE),
        &[
            "id",
            "title",
            "updated",
            "subtitle",
            "author",
            "contributor",
            "generator",
            "icon",
            "logo",
            "rights",
            "link",
            "category",
            "entry",
        ],
    )
});

pub(crate) fn atom_text(element: &XmlElement, name: &str) -> Option<String> {
    element.child_text(name, Some(ATOM_NAMESPACE))
}

/// Build `T` from the first Atom child called `name`
pub(crate) fn named<T: VersionedElement>(element: &XmlElement, name: &str) -> Option<Result<T>> {
    element.child(name, Some(ATOM_NAMESPACE)).map(T::from_xml)
}

/// Serialize a construct under the element name its parent gives it
///
/// Text and person constructs have no name of their own; `title`, `author`
/// and friends are all the same shape.
pub(crate) fn append_named<T: VersionedElement>(
    parent: &mut XmlElement,
    name: &str,
    item: Option<&T>,
    version: SpecVersion,
) -> Result<()> {
    if let Some(item) = item {
        let mut element = item.to_xml(version)?;
        element.local_name = name.to_string();
        parent.push_child(element);
    }
    Ok(())
}

/// Validate constructs that take their element name from the parent
///
/// A failure reported against the construct's own kind is renamed to `name`,
/// so a bad `<author>` is reported as `author` rather than `person`.
pub(crate) fn validate_named<'a, T, I>(
    name: &str,
    items: I,
    ctx: &ValidationContext,
) -> Result<()>
where
    T: VersionedElement + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        item.validate(ctx).map_err(|err| match err {
            FeedError::Validation(mut e) if e.element == T::KIND.tag() => {
                e.element = name.to_string();
                FeedError::Validation(e)
            }
            other => other,
        })?;
    }
    Ok(())
}

/// The Atom `<feed>` document root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomFeed {
    /// Permanent, universally unique identifier (an IRI)
    pub id: Option<String>,
    /// Human-readable title
    pub title: Option<AtomText>,
    /// Last significant modification
    pub updated: Option<TemporalValue>,
    /// Description or subtitle
    pub subtitle: Option<AtomText>,
    /// Feed-level authors; required unless every entry names its own
    pub authors: Vec<AtomPerson>,
    /// People who contributed to the feed
    pub contributors: Vec<AtomPerson>,
    /// Agent that produced the feed
    pub generator: Option<AtomGenerator>,
    /// Small square image IRI
    pub icon: Option<String>,
    /// Wide image IRI
    pub logo: Option<String>,
    /// Rights held in and over the feed
    pub rights: Option<AtomText>,
    /// Related resources; the `self` link points at the feed itself
    pub links: Vec<AtomLink>,
    /// Categories the feed belongs to
    pub categories: Vec<AtomCategory>,
    /// Entries in document order
    pub entries: Vec<AtomEntry>,
    /// Foreign content captured from `<feed>`
    pub extensions: ExtensionSet,
}

impl AtomFeed {
    /// Create a feed with its three required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, updated: TemporalValue) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(AtomText::text(title)),
            updated: Some(updated),
            ..Default::default()
        }
    }

    /// A feed needs an author unless every entry carries its own
    fn check_authorship(&self) -> Result<()> {
        if self.authors.is_empty() && !self.entries.iter().all(AtomEntry::has_author) {
            return Err(ValidationError::missing(Self::KIND.tag(), "author").into());
        }
        Ok(())
    }
}

impl VersionedElement for AtomFeed {
    const KIND: ElementKind = ElementKind::AtomFeed;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        let people = |name: &str| {
            element
                .children_named(name, Some(ATOM_NAMESPACE))
                .map(AtomPerson::from_xml)
                .collect::<Result<Vec<_>>>()
        };

        Ok(Self {
            id: atom_text(element, "id"),
            title: named(element, "title").transpose()?,
            updated: parse_optional(atom_text(element, "updated"), DateDialect::Iso8601)?,
            subtitle: named(element, "subtitle").transpose()?,
            authors: people("author")?,
            contributors: people("contributor")?,
            generator: named(element, "generator").transpose()?,
            icon: atom_text(element, "icon"),
            logo: atom_text(element, "logo"),
            rights: named(element, "rights").transpose()?,
            links: element
                .children_named("link", Some(ATOM_NAMESPACE))
                .map(AtomLink::from_xml)
                .collect::<Result<_>>()?,
            categories: element
                .children_named("category", Some(ATOM_NAMESPACE))
                .map(AtomCategory::from_xml)
                .collect::<Result<_>>()?,
            entries: element
                .children_named("entry", Some(ATOM_NAMESPACE))
                .map(AtomEntry::from_xml)
                .collect::<Result<_>>()?,
            extensions: capture(element, &FEED_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Atom10 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }
        let tag = Self::KIND.tag();
        require_text(tag, "id", self.id.as_deref())?;
        require(tag, "title", self.title.as_ref())?;
        require(tag, "updated", self.updated.as_ref())?;
        self.check_authorship()?;

        validate_named("title", self.title.as_ref(), ctx)?;
        validate_named("subtitle", self.subtitle.as_ref(), ctx)?;
        validate_named("rights", self.rights.as_ref(), ctx)?;
        validate_optional(self.generator.as_ref(), ctx)?;
        validate_named("author", &self.authors, ctx)?;
        validate_named("contributor", &self.contributors, ctx)?;
        validate_all(&self.links, ctx)?;
        validate_all(&self.categories, ctx)?;
        validate_all(&self.entries, ctx)?;

        if ctx.validate_content {
            check_url_scheme(tag, "id", self.id.as_deref(), &[])?;
            check_url_scheme(tag, "icon", self.icon.as_deref(), &[])?;
            check_url_scheme(tag, "logo", self.logo.as_deref(), &[])?;
            check_date(tag, "updated", self.updated.as_ref(), DateDialect::Iso8601)?;
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Atom10 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }

        let mut element = XmlElement::qualified(None, Self::KIND.tag(), Some(ATOM_NAMESPACE));
        element.push_text_child("id", Some(ATOM_NAMESPACE), self.id.as_deref());
        append_named(&mut element, "title", self.title.as_ref(), version)?;
        append_named(&mut element, "subtitle", self.subtitle.as_ref(), version)?;
        if let Some(updated) = &self.updated {
            let text = updated.to_iso8601();
            element.push_text_child("updated", Some(ATOM_NAMESPACE), Some(text.as_str()));
        }
        for author in &self.authors {
            append_named(&mut element, "author", Some(author), version)?;
        }
        for contributor in &self.contributors {
            append_named(&mut element, "contributor", Some(contributor), version)?;
        }
        if let Some(generator) = &self.generator {
            element.push_child(generator.to_xml(version)?);
        }
        element.push_text_child("icon", Some(ATOM_NAMESPACE), self.icon.as_deref());
        element.push_text_child("logo", Some(ATOM_NAMESPACE), self.logo.as_deref());
        append_named(&mut element, "rights", self.rights.as_ref(), version)?;
        append_all(&mut element, &self.links, version)?;
        append_all(&mut element, &self.categories, version)?;
        append_all(&mut element, &self.entries, version)?;
        emit(&self.extensions, &mut element);
        Ok(element)
    }
}
