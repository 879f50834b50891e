//! Atom `<entry>`

use std::sync::LazyLock;

use super::parts::{AtomCategory, AtomLink, AtomPerson, AtomText};
use super::{append_named, atom_text, named, validate_named};
use crate::Result;
use crate::config::ATOM_NAMESPACE;
use crate::dispatch::{ElementKind, VersionedElement, append_all, unsupported, validate_all};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::temporal::{DateDialect, TemporalValue, parse_optional};
use crate::validation::{check_date, check_url_scheme, require, require_text};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

static ENTRY_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        Some(ATOM_NAMESPACE),
        &[
            "id",
            "title",
            "updated",
            "published",
            "summary",
            "content",
            "author",
            "contributor",
            "link",
            "category",
            "rights",
        ],
    )
});

/// An Atom entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomEntry {
    pub id: Option<String>,
    pub title: Option<AtomText>,
    pub updated: Option<TemporalValue>,
    pub published: Option<TemporalValue>,
    pub summary: Option<AtomText>,
    pub content: Option<AtomText>,
    pub authors: Vec<AtomPerson>,
    pub contributors: Vec<AtomPerson>,
    pub links: Vec<AtomLink>,
    pub categories: Vec<AtomCategory>,
    pub rights: Option<AtomText>,
    pub extensions: ExtensionSet,
}

impl AtomEntry {
    /// Create an entry with its three required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, updated: TemporalValue) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(AtomText::text(title)),
            updated: Some(updated),
            ..Default::default()
        }
    }

    /// Whether the entry names at least one author of its own
    pub fn has_author(&self) -> bool {
        !self.authors.is_empty()
    }
}

impl VersionedElement for AtomEntry {
    const KIND: ElementKind = ElementKind::AtomEntry;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        let text = |name: &str| named::<AtomText>(element, name).transpose();
        let people = |name: &str| {
            element
                .children_named(name, Some(ATOM_NAMESPACE))
                .map(AtomPerson::from_xml)
                .collect::<Result<Vec<_>>>()
        };

        Ok(Self {
            id: atom_text(element, "id"),
            title: text("title")?,
            updated: parse_optional(atom_text(element, "updated"), DateDialect::Iso8601)?,
            published: parse_optional(atom_text(element, "published"), DateDialect::Iso8601)?,
            summary: text("summary")?,
            content: text("content")?,
            authors: people("author")?,
            contributors: people("contributor")?,
            links: element
                .children_named("link", Some(ATOM_NAMESPACE))
                .map(AtomLink::from_xml)
                .collect::<Result<_>>()?,
            categories: element
                .children_named("category", Some(ATOM_NAMESPACE))
                .map(AtomCategory::from_xml)
                .collect::<Result<_>>()?,
            rights: text("rights")?,
            extensions: capture(element, &ENTRY_NAMES),
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

        validate_named("title", self.title.as_ref(), ctx)?;
        validate_named("summary", self.summary.as_ref(), ctx)?;
        validate_named("content", self.content.as_ref(), ctx)?;
        validate_named("rights", self.rights.as_ref(), ctx)?;
        validate_named("author", &self.authors, ctx)?;
        validate_named("contributor", &self.contributors, ctx)?;
        validate_all(&self.links, ctx)?;
        validate_all(&self.categories, ctx)?;

        if ctx.validate_content {
            check_url_scheme(tag, "id", self.id.as_deref(), &[])?;
            check_date(tag, "updated", self.updated.as_ref(), DateDialect::Iso8601)?;
            check_date(tag, "published", self.published.as_ref(), DateDialect::Iso8601)?;

            let has_alternate = self.links.iter().any(|l| l.relation() == "alternate");
            if self.content.is_none() && !has_alternate {
                return Err(ValidationError::new(
                    tag,
                    "content",
                    "an entry without content needs an alternate link",
                )
                .into());
            }
            if self.content.as_ref().is_some_and(|c| c.src.is_some()) && self.summary.is_none() {
                return Err(ValidationError::new(
                    tag,
                    "summary",
                    "an entry with out-of-line content needs a summary",
                )
                .into());
            }
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
        for (name, date) in [("updated", &self.updated), ("published", &self.published)] {
            if let Some(date) = date {
                let text = date.to_iso8601();
                element.push_text_child(name, Some(ATOM_NAMESPACE), Some(text.as_str()));
            }
        }
        for author in &self.authors {
            append_named(&mut element, "author", Some(author), version)?;
        }
        for contributor in &self.contributors {
            append_named(&mut element, "contributor", Some(contributor), version)?;
        }
        append_all(&mut element, &self.links, version)?;
        append_all(&mut element, &self.categories, version)?;
        append_named(&mut element, "summary", self.summary.as_ref(), version)?;
        append_named(&mut element, "content", self.content.as_ref(), version)?;
        append_named(&mut element, "rights", self.rights.as_ref(), version)?;
        emit(&self.extensions, &mut element);
        Ok(element)
    }
}
