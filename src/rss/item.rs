//! RSS `<item>` and the elements that only appear inside it

use std::sync::LazyLock;

use super::parts::RssCategory;
use crate::Result;
use crate::dispatch::{
    ElementKind, VersionedElement, append_all, append_optional, unsupported, validate_all,
    validate_optional,
};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::temporal::{DateDialect, TemporalValue, parse_optional};
use crate::validation::{
    check_date, check_max_length, check_numeric, check_url_scheme, check_vocabulary,
    link_schemes, require_text,
};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

static ITEM_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        None,
        &[
            "title",
            "link",
            "description",
            "author",
            "comments",
            "pubDate",
            "enclosure",
            "guid",
            "source",
            "category",
        ],
    )
});

static ENCLOSURE_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with_names(None, &["url", "length", "type"]));

static GUID_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with("isPermaLink", None));

static SOURCE_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with("url", None));

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// `<enclosure url="..." length="..." type="..."/>` (RSS 0.92+)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssEnclosure {
    pub url: Option<String>,
    pub length: Option<String>,
    pub mime_type: Option<String>,
    pub extensions: ExtensionSet,
}

impl RssEnclosure {
    pub fn new(url: impl Into<String>, length: u64, mime_type: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            length: Some(length.to_string()),
            mime_type: Some(mime_type.into()),
            ..Default::default()
        }
    }
}

impl VersionedElement for RssEnclosure {
    const KIND: ElementKind = ElementKind::RssEnclosure;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            url: element.attribute("url", None).map(str::to_string),
            length: element.attribute("length", None).map(str::to_string),
            mime_type: element.attribute("type", None).map(str::to_string),
            extensions: capture(element, &ENCLOSURE_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }
        let tag = Self::KIND.tag();
        require_text(tag, "url", self.url.as_deref())?;
        require_text(tag, "length", self.length.as_deref())?;
        require_text(tag, "type", self.mime_type.as_deref())?;

        if ctx.validate_content {
            check_url_scheme(tag, "url", self.url.as_deref(), link_schemes(ctx.version))?;
            check_numeric::<u64>(tag, "length", self.length.as_deref())?;
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.set_optional_attribute("url", self.url.as_deref());
                element.set_optional_attribute("length", self.length.as_deref());
                element.set_optional_attribute("type", self.mime_type.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<guid isPermaLink="...">` (RSS 2.0 only)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssGuid {
    pub value: Option<String>,
    /// Kept as written so an invalid flag can be reported rather than lost
    pub is_perma_link: Option<String>,
    pub extensions: ExtensionSet,
}

impl RssGuid {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Whether the guid is a URL; RSS 2.0 defaults a missing flag to true
    pub fn is_perma_link(&self) -> bool {
        self.is_perma_link.as_deref().map(str::trim) != Some("false")
    }
}

impl VersionedElement for RssGuid {
    const KIND: ElementKind = ElementKind::RssGuid;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            value: non_empty(element.own_text()),
            is_perma_link: element.attribute("isPermaLink", None).map(str::to_string),
            extensions: capture(element, &GUID_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rss201 => {
                let tag = Self::KIND.tag();
                require_text(tag, "value", self.value.as_deref())?;
                if ctx.validate_content {
                    check_vocabulary(
                        tag,
                        "isPermaLink",
                        self.is_perma_link.as_deref(),
                        &["true", "false"],
                    )?;
                    if self.is_perma_link() {
                        check_url_scheme(tag, "value", self.value.as_deref(), &[])?;
                    }
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.set_optional_attribute("isPermaLink", self.is_perma_link.as_deref());
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

/// `<source url="...">Channel name</source>` (RSS 0.92+)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssSource {
    pub url: Option<String>,
    pub value: Option<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RssSource {
    const KIND: ElementKind = ElementKind::RssSource;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            url: element.attribute("url", None).map(str::to_string),
            value: non_empty(element.own_text()),
            extensions: capture(element, &SOURCE_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let tag = Self::KIND.tag();
                require_text(tag, "url", self.url.as_deref())?;
                if ctx.validate_content {
                    check_url_scheme(tag, "url", self.url.as_deref(), link_schemes(ctx.version))?;
                }
                Ok(())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.set_optional_attribute("url", self.url.as_deref());
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

/// A channel `<item>`
///
/// Which fields are legal depends on the version: 0.91 items only carry
/// title, link and description; 0.92 adds enclosure, source and category;
/// 2.0 adds author, comments, pubDate and guid. A field set on an item that
/// its version does not define is a validation failure, and serializing it
/// fails with the sub-element's unsupported error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssItem {
    /// Item title
    pub title: Option<String>,
    /// URL of the item
    pub link: Option<String>,
    /// Item synopsis
    pub description: Option<String>,
    /// Email of the author (2.0 only)
    pub author: Option<String>,
    /// URL of the comments page (2.0 only)
    pub comments: Option<String>,
    /// Publication date (2.0 only)
    pub pub_date: Option<TemporalValue>,
    /// Attached media object (0.92+)
    pub enclosure: Option<RssEnclosure>,
    /// Unique identifier (2.0 only)
    pub guid: Option<RssGuid>,
    /// Channel the item came from (0.92+)
    pub source: Option<RssSource>,
    /// Item categories (0.92+)
    pub categories: Vec<RssCategory>,
    /// Foreign content captured from `<item>`
    pub extensions: ExtensionSet,
}

impl RssItem {
    /// Create an item with a title and link
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            ..Default::default()
        }
    }

    fn reject_field(&self, field: &str, present: bool, version: SpecVersion) -> Result<()> {
        if present {
            return Err(ValidationError::new(
                Self::KIND.tag(),
                field,
                format!("not defined in {version}"),
            )
            .into());
        }
        Ok(())
    }

    fn validate_091(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        require_text(tag, "title", self.title.as_deref())?;
        require_text(tag, "link", self.link.as_deref())?;

        // 2.0-only scalar fields have no element of their own to refuse them
        self.reject_field("author", self.author.is_some(), ctx.version)?;
        self.reject_field("comments", self.comments.is_some(), ctx.version)?;
        self.reject_field("pubDate", self.pub_date.is_some(), ctx.version)?;

        validate_optional(self.enclosure.as_ref(), ctx)?;
        validate_optional(self.guid.as_ref(), ctx)?;
        validate_optional(self.source.as_ref(), ctx)?;
        validate_all(&self.categories, ctx)?;

        if ctx.validate_content {
            check_max_length(tag, "title", self.title.as_deref(), 100)?;
            check_max_length(tag, "link", self.link.as_deref(), 500)?;
            check_max_length(tag, "description", self.description.as_deref(), 500)?;
            check_url_scheme(tag, "link", self.link.as_deref(), link_schemes(ctx.version))?;
        }
        Ok(())
    }

    fn validate_092(&self, ctx: &ValidationContext) -> Result<()> {
        self.require_title_or_description()?;
        self.reject_field("author", self.author.is_some(), ctx.version)?;
        self.reject_field("comments", self.comments.is_some(), ctx.version)?;
        self.reject_field("pubDate", self.pub_date.is_some(), ctx.version)?;

        validate_optional(self.enclosure.as_ref(), ctx)?;
        validate_optional(self.guid.as_ref(), ctx)?;
        validate_optional(self.source.as_ref(), ctx)?;
        validate_all(&self.categories, ctx)?;

        if ctx.validate_content {
            let tag = Self::KIND.tag();
            check_url_scheme(tag, "link", self.link.as_deref(), link_schemes(ctx.version))?;
        }
        Ok(())
    }

    fn validate_201(&self, ctx: &ValidationContext) -> Result<()> {
        self.require_title_or_description()?;

        validate_optional(self.enclosure.as_ref(), ctx)?;
        validate_optional(self.guid.as_ref(), ctx)?;
        validate_optional(self.source.as_ref(), ctx)?;
        validate_all(&self.categories, ctx)?;

        if ctx.validate_content {
            let tag = Self::KIND.tag();
            let schemes = link_schemes(ctx.version);
            check_url_scheme(tag, "link", self.link.as_deref(), schemes)?;
            check_url_scheme(tag, "comments", self.comments.as_deref(), schemes)?;
            check_date(tag, "pubDate", self.pub_date.as_ref(), DateDialect::Rfc822)?;
        }
        Ok(())
    }

    fn require_title_or_description(&self) -> Result<()> {
        let has = |v: &Option<String>| v.as_deref().is_some_and(|v| !v.trim().is_empty());
        if has(&self.title) || has(&self.description) {
            Ok(())
        } else {
            Err(ValidationError::new(
                Self::KIND.tag(),
                "title",
                "either title or description is required",
            )
            .into())
        }
    }
}

impl VersionedElement for RssItem {
    const KIND: ElementKind = ElementKind::RssItem;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            title: element.child_text("title", None),
            link: element.child_text("link", None),
            description: element.child_text("description", None),
            author: element.child_text("author", None),
            comments: element.child_text("comments", None),
            pub_date: parse_optional(element.child_text("pubDate", None), DateDialect::Rfc822)?,
            enclosure: element
                .child("enclosure", None)
                .map(RssEnclosure::from_xml)
                .transpose()?,
            guid: element.child("guid", None).map(RssGuid::from_xml).transpose()?,
            source: element.child("source", None).map(RssSource::from_xml).transpose()?,
            categories: element
                .children_named("category", None)
                .map(RssCategory::from_xml)
                .collect::<Result<_>>()?,
            extensions: capture(element, &ITEM_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rss091 => self.validate_091(ctx),
            SpecVersion::Rss092 => self.validate_092(ctx),
            SpecVersion::Rss201 => self.validate_201(ctx),
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }

        let mut element = XmlElement::new(Self::KIND.tag());
        element.push_text_child("title", None, self.title.as_deref());
        element.push_text_child("link", None, self.link.as_deref());
        element.push_text_child("description", None, self.description.as_deref());
        element.push_text_child("author", None, self.author.as_deref());
        element.push_text_child("comments", None, self.comments.as_deref());
        if let Some(date) = &self.pub_date {
            element.push_text_child("pubDate", None, Some(date.to_rfc822().as_str()));
        }
        append_optional(&mut element, self.enclosure.as_ref(), version)?;
        append_optional(&mut element, self.guid.as_ref(), version)?;
        append_optional(&mut element, self.source.as_ref(), version)?;
        append_all(&mut element, &self.categories, version)?;
        emit(&self.extensions, &mut element);
        Ok(element)
    }
}
