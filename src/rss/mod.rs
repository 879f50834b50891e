//! RSS 0.91, 0.92 and 2.0.1 documents
//!
//! An `<rss version="...">` root wraps a single [`RssChannel`]. Which
//! elements are legal, and which fields they require, depends on the
//! version the document is validated or serialized against:
//!
//! | Element       | 0.91 | 0.92 | 2.0.1 |
//! |---------------|------|------|-------|
//! | `<image>`     | required | yes | yes |
//! | `<cloud>`     |      | yes  | yes   |
//! | `<enclosure>` |      | yes  | yes   |
//! | `<source>`    |      | yes  | yes   |
//! | `<guid>`      |      |      | yes   |
//! | `<ttl>`       |      |      | yes   |

mod channel;
mod item;
mod parts;

pub use self::channel::RssChannel;
pub use self::item::{RssEnclosure, RssGuid, RssItem, RssSource};
pub use self::parts::{
    CLOUD_PROTOCOLS_092, CLOUD_PROTOCOLS_201, RssCategory, RssCloud, RssImage, RssSkipDays,
    RssSkipHours, RssTextInput, SKIP_DAY_NAMES,
};

use std::sync::LazyLock;

use crate::dispatch::{ElementKind, VersionedElement, unsupported};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;
use crate::{FeedError, Result};

static ROOT_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new()
        .with("version", None)
        .with("channel", None)
});

/// The `<rss>` document root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssFeed {
    /// The `version` attribute as written, if any
    pub version: Option<String>,
    pub channel: Option<RssChannel>,
    pub extensions: ExtensionSet,
}

impl RssFeed {
    /// Wrap a channel
    pub fn new(channel: RssChannel) -> Self {
        Self {
            channel: Some(channel),
            ..Default::default()
        }
    }

    /// Version named by the `version` attribute
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Format`] if the attribute is missing or names a
    /// version this crate does not know.
    pub fn declared_version(&self) -> Result<SpecVersion> {
        let value = self
            .version
            .as_deref()
            .ok_or_else(|| FeedError::Format("<rss> has no version attribute".to_string()))?;
        SpecVersion::from_rss_attribute(value)
            .ok_or_else(|| FeedError::Format(format!("unsupported RSS version '{value}'")))
    }
}

impl VersionedElement for RssFeed {
    const KIND: ElementKind = ElementKind::RssFeed;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            version: element.attribute("version", None).map(str::to_string),
            channel: element
                .child("channel", None)
                .map(RssChannel::from_xml)
                .transpose()?,
            extensions: capture(element, &ROOT_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let channel = self
                    .channel
                    .as_ref()
                    .ok_or_else(|| ValidationError::missing(Self::KIND.tag(), "channel"))?;
                channel.validate(ctx)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    /// The `version` attribute is always written from `version`
    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.set_attribute("version", version.as_str());
                if let Some(channel) = &self.channel {
                    element.push_child(channel.to_xml(version)?);
                }
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}
