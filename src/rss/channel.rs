//! RSS `<channel>`

use std::sync::LazyLock;

use super::item::RssItem;
use super::parts::{RssCategory, RssCloud, RssImage, RssSkipDays, RssSkipHours, RssTextInput};
use crate::Result;
use crate::dispatch::{
    ElementKind, VersionedElement, append_all, append_optional, unsupported, validate_all,
    validate_optional,
};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::temporal::{DateDialect, TemporalValue, parse_optional};
use crate::validation::{
    check_date, check_max_length, check_numeric, check_url_scheme, link_schemes, require,
    require_text,
};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

static CHANNEL_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        None,
        &[
            "title",
            "link",
            "description",
            "language",
            "copyright",
            "managingEditor",
            "webMaster",
            "rating",
            "docs",
            "generator",
            "pubDate",
            "lastBuildDate",
            "ttl",
            "cloud",
            "category",
            "image",
            "textInput",
            "textinput",
            "skipHours",
            "skipDays",
            "item",
        ],
    )
});

/// An RSS `<channel>` with its items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssChannel {
    /// Channel name
    pub title: Option<String>,
    /// URL of the site the channel describes
    pub link: Option<String>,
    /// Phrase or sentence describing the channel
    pub description: Option<String>,
    /// Language code; required in 0.91
    pub language: Option<String>,
    /// Copyright notice
    pub copyright: Option<String>,
    /// Email of the person responsible for editorial content
    pub managing_editor: Option<String>,
    /// Email of the person responsible for technical issues
    pub web_master: Option<String>,
    /// PICS rating
    pub rating: Option<String>,
    /// URL of the format documentation
    pub docs: Option<String>,
    /// Program that generated the channel
    pub generator: Option<String>,
    /// Publication date of the content
    pub pub_date: Option<TemporalValue>,
    /// Last time the content changed
    pub last_build_date: Option<TemporalValue>,
    /// Minutes the channel may be cached (2.0 only)
    pub ttl: Option<String>,
    /// Change-notification endpoint (0.92+)
    pub cloud: Option<RssCloud>,
    /// Channel categories (2.0 only)
    pub categories: Vec<RssCategory>,
    /// Channel image; required in 0.91
    pub image: Option<RssImage>,
    /// Text input box shown with the channel
    pub text_input: Option<RssTextInput>,
    /// Hours aggregators may skip
    pub skip_hours: Option<RssSkipHours>,
    /// Days aggregators may skip
    pub skip_days: Option<RssSkipDays>,
    /// Items in document order
    pub items: Vec<RssItem>,
    /// Foreign content captured from `<channel>`
    pub extensions: ExtensionSet,
}

impl RssChannel {
    /// Create a channel with the fields every version requires
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    fn validate_common(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        require_text(tag, "title", self.title.as_deref())?;
        require_text(tag, "link", self.link.as_deref())?;
        require_text(tag, "description", self.description.as_deref())?;

        validate_optional(self.cloud.as_ref(), ctx)?;
        validate_optional(self.image.as_ref(), ctx)?;
        validate_optional(self.text_input.as_ref(), ctx)?;
        validate_optional(self.skip_hours.as_ref(), ctx)?;
        validate_optional(self.skip_days.as_ref(), ctx)?;
        validate_all(&self.items, ctx)?;

        if ctx.validate_content {
            let schemes = link_schemes(ctx.version);
            check_url_scheme(tag, "link", self.link.as_deref(), schemes)?;
            check_url_scheme(tag, "docs", self.docs.as_deref(), schemes)?;
            check_date(tag, "pubDate", self.pub_date.as_ref(), DateDialect::Rfc822)?;
            check_date(tag, "lastBuildDate", self.last_build_date.as_ref(), DateDialect::Rfc822)?;
        }
        Ok(())
    }

    fn validate_091(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        require_text(tag, "language", self.language.as_deref())?;
        require(tag, "image", self.image.as_ref())?;
        self.reject_201_fields(ctx.version)?;
        self.validate_common(ctx)?;

        if ctx.validate_content {
            check_max_length(tag, "title", self.title.as_deref(), 100)?;
            check_max_length(tag, "description", self.description.as_deref(), 500)?;
            check_max_length(tag, "link", self.link.as_deref(), 500)?;
            check_max_length(tag, "copyright", self.copyright.as_deref(), 100)?;
            check_max_length(tag, "managingEditor", self.managing_editor.as_deref(), 100)?;
            check_max_length(tag, "webMaster", self.web_master.as_deref(), 100)?;
            check_max_length(tag, "rating", self.rating.as_deref(), 500)?;
        }
        Ok(())
    }

    fn validate_092(&self, ctx: &ValidationContext) -> Result<()> {
        self.reject_201_fields(ctx.version)?;
        self.validate_common(ctx)
    }

    fn validate_201(&self, ctx: &ValidationContext) -> Result<()> {
        validate_all(&self.categories, ctx)?;
        self.validate_common(ctx)?;
        if ctx.validate_content {
            check_numeric::<u32>(Self::KIND.tag(), "ttl", self.ttl.as_deref())?;
        }
        Ok(())
    }

    /// Fields that only exist on a 2.0 channel
    fn reject_201_fields(&self, version: SpecVersion) -> Result<()> {
        let present = [
            ("ttl", self.ttl.is_some()),
            ("category", !self.categories.is_empty()),
        ];
        match present.iter().find(|(_, set)| *set) {
            Some((field, _)) => Err(ValidationError::new(
                Self::KIND.tag(),
                *field,
                format!("not defined in {version}"),
            )
            .into()),
            None => Ok(()),
        }
    }
}

impl VersionedElement for RssChannel {
    const KIND: ElementKind = ElementKind::RssChannel;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        let text = |name: &str| element.child_text(name, None);
        let text_input = element
            .child("textInput", None)
            .or_else(|| element.child("textinput", None));

        Ok(Self {
            title: text("title"),
            link: text("link"),
            description: text("description"),
            language: text("language"),
            copyright: text("copyright"),
            managing_editor: text("managingEditor"),
            web_master: text("webMaster"),
            rating: text("rating"),
            docs: text("docs"),
            generator: text("generator"),
            pub_date: parse_optional(text("pubDate"), DateDialect::Rfc822)?,
            last_build_date: parse_optional(text("lastBuildDate"), DateDialect::Rfc822)?,
            ttl: text("ttl"),
            cloud: element.child("cloud", None).map(RssCloud::from_xml).transpose()?,
            categories: element
                .children_named("category", None)
                .map(RssCategory::from_xml)
                .collect::<Result<_>>()?,
            image: element.child("image", None).map(RssImage::from_xml).transpose()?,
            text_input: text_input.map(RssTextInput::from_xml).transpose()?,
            skip_hours: element
                .child("skipHours", None)
                .map(RssSkipHours::from_xml)
                .transpose()?,
            skip_days: element
                .child("skipDays", None)
                .map(RssSkipDays::from_xml)
                .transpose()?,
            items: element
                .children_named("item", None)
                .map(RssItem::from_xml)
                .collect::<Result<_>>()?,
            extensions: capture(element, &CHANNEL_NAMES),
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
        for (name, value) in [
            ("title", &self.title),
            ("link", &self.link),
            ("description", &self.description),
            ("language", &self.language),
            ("copyright", &self.copyright),
            ("managingEditor", &self.managing_editor),
            ("webMaster", &self.web_master),
            ("rating", &self.rating),
            ("docs", &self.docs),
            ("generator", &self.generator),
        ] {
            element.push_text_child(name, None, value.as_deref());
        }
        for (name, date) in [
            ("pubDate", &self.pub_date),
            ("lastBuildDate", &self.last_build_date),
        ] {
            if let Some(date) = date {
                element.push_text_child(name, None, Some(date.to_rfc822().as_str()));
            }
        }
        element.push_text_child("ttl", None, self.ttl.as_deref());
        append_optional(&mut element, self.cloud.as_ref(), version)?;
        append_all(&mut element, &self.categories, version)?;
        append_optional(&mut element, self.image.as_ref(), version)?;
        append_optional(&mut element, self.text_input.as_ref(), version)?;
        append_optional(&mut element, self.skip_hours.as_ref(), version)?;
        append_optional(&mut element, self.skip_days.as_ref(), version)?;
        append_all(&mut element, &self.items, version)?;
        emit(&self.extensions, &mut element);
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_091() -> RssChannel {
        let mut channel = RssChannel::new("News", "http://example.com/", "Daily news");
        channel.language = Some("en-us".into());
        channel.image = Some(RssImage::new(
            "http://example.com/logo.gif",
            "News",
            "http://example.com/",
        ));
        channel
    }

    #[test]
    fn test_091_requires_language_and_image() {
        let ctx = ValidationContext::structure(SpecVersion::Rss091);
        assert!(channel_091().validate(&ctx).is_ok());

        let mut channel = channel_091();
        channel.language = None;
        assert_eq!(
            channel.validate(&ctx).unwrap_err().as_validation().unwrap().field.as_deref(),
            Some("language")
        );

        let bare = RssChannel::new("News", "http://example.com/", "Daily news");
        assert!(bare.validate(&ValidationContext::structure(SpecVersion::Rss201)).is_ok());
    }

    #[test]
    fn test_cloud_unsupported_in_091() {
        let mut channel = channel_091();
        channel.cloud = Some(RssCloud::default());
        let err = channel
            .validate(&ValidationContext::structure(SpecVersion::Rss091))
            .unwrap_err();
        assert!(err.is_unsupported_version());
    }

    #[test]
    fn test_ttl_only_in_201() {
        let mut channel = RssChannel::new("News", "http://example.com/", "Daily news");
        channel.ttl = Some("60".into());
        assert!(channel.validate(&ValidationContext::content(SpecVersion::Rss201)).is_ok());
        assert!(channel.validate(&ValidationContext::structure(SpecVersion::Rss092)).is_err());

        channel.ttl = Some("an hour".into());
        assert!(channel.validate(&ValidationContext::content(SpecVersion::Rss201)).is_err());
        assert!(channel.validate(&ValidationContext::structure(SpecVersion::Rss201)).is_ok());
    }

    #[test]
    fn test_accepts_lowercase_text_input() {
        let element = XmlElement::parse(
            "<channel><title>T</title><textinput><title>Go</title></textinput></channel>",
        )
        .unwrap();
        let channel = RssChannel::from_xml(&element).unwrap();
        assert_eq!(channel.text_input.unwrap().title.as_deref(), Some("Go"));
        assert!(channel.extensions.is_empty());
    }

    #[test]
    fn test_unsupported_outside_rss() {
        let channel = channel_091();
        assert!(
            channel
                .validate(&ValidationContext::structure(SpecVersion::Atom10))
                .unwrap_err()
                .is_unsupported_version()
        );
        assert!(channel.to_xml(SpecVersion::Rdf10).is_err());
    }
}
