//! Whole-document recognition, loading, validation and saving

use std::io::Write;

use crate::atom::AtomFeed;
use crate::config::{ATOM_NAMESPACE, FormatConfig, RDF_NAMESPACE, RSS10_NAMESPACE};
use crate::dispatch::{VersionedElement, save};
use crate::rdf::RdfFeed;
use crate::rss::RssFeed;
use crate::version::{FeedFormat, SpecVersion, ValidationContext};
use crate::xml::{XmlElement, write_document};
use crate::{FeedError, Result};

/// The root aggregate of one of the supported formats
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    Rss(RssFeed),
    Rdf(RdfFeed),
    Atom(AtomFeed),
}

impl Feed {
    /// Family of the wrapped root
    pub fn format(&self) -> FeedFormat {
        match self {
            Feed::Rss(_) => FeedFormat::Rss,
            Feed::Rdf(_) => FeedFormat::Rdf,
            Feed::Atom(_) => FeedFormat::Atom,
        }
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match self {
            Feed::Rss(feed) => feed.validate(ctx),
            Feed::Rdf(feed) => feed.validate(ctx),
            Feed::Atom(feed) => feed.validate(ctx),
        }
    }

    fn to_root(&self, version: SpecVersion, config: &FormatConfig) -> Result<XmlElement> {
        match self {
            Feed::Rss(feed) => save(feed, version, config),
            Feed::Rdf(feed) => save(feed, version, config),
            Feed::Atom(feed) => save(feed, version, config),
        }
    }
}

/// Work out which format and version a parsed root element is
///
/// # Errors
///
/// Returns [`FeedError::Format`] if the root is none of `<rss version=...>`,
/// `rdf:RDF` carrying an RSS 1.0 channel, or an Atom `<feed>`.
pub fn recognize(root: &XmlElement) -> Result<SpecVersion> {
    if root.is("rss", None) {
        let declared = root.attribute("version", None).unwrap_or_default();
        return SpecVersion::from_rss_attribute(declared.trim()).ok_or_else(|| {
            FeedError::Format(format!("unrecognized document root: RSS version '{declared}'"))
        });
    }
    if root.is("RDF", Some(RDF_NAMESPACE)) && root.child("channel", Some(RSS10_NAMESPACE)).is_some()
    {
        return Ok(SpecVersion::Rdf10);
    }
    if root.is("feed", Some(ATOM_NAMESPACE)) {
        return Ok(SpecVersion::Atom10);
    }
    Err(FeedError::Format(format!(
        "unrecognized document root <{}>",
        root.qualified_name()
    )))
}

/// A feed document and the version it was recognized as
///
/// # Example
///
/// ```
/// use feedkit::{FeedDocument, FormatConfig, SpecVersion};
///
/// let doc = FeedDocument::parse(
///     r#"<rss version="2.0"><channel>
///          <title>News</title>
///          <link>http://example.com/</link>
///          <description>Daily news</description>
///        </channel></rss>"#,
/// )
/// .unwrap();
///
/// assert_eq!(doc.recognized_version(), Some(SpecVersion::Rss201));
/// doc.validate(true).unwrap();
/// let xml = doc.save(&FormatConfig::rss()).unwrap();
/// assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    feed: Option<Feed>,
    version: Option<SpecVersion>,
}

impl FeedDocument {
    /// An empty document with no recognized version
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an in-memory feed to be validated or saved as `version`
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] if `version` belongs to a
    /// different format than `feed`.
    pub fn from_feed(feed: Feed, version: SpecVersion) -> Result<Self> {
        if feed.format() != version.format() {
            return Err(FeedError::Configuration(format!(
                "{version} cannot describe a {} feed",
                feed.format()
            )));
        }
        Ok(Self {
            feed: Some(feed),
            version: Some(version),
        })
    }

    /// Parse a document from text
    pub fn parse(xml: &str) -> Result<Self> {
        let mut document = Self::new();
        document.load(xml)?;
        Ok(document)
    }

    /// Replace this document with one parsed from `xml`
    ///
    /// The recognized version is cleared before anything else happens and
    /// is only set once the whole document has been mapped, so a failed (or
    /// unwinding) load never leaves a recognized version behind.
    pub fn load(&mut self, xml: &str) -> Result<()> {
        self.version = None;
        self.feed = None;

        let root = XmlElement::parse(xml)?;
        let version = recognize(&root)?;
        tracing::debug!(%version, root = %root.qualified_name(), "Recognized document root");

        let feed = match version.format() {
            FeedFormat::Rss => Feed::Rss(RssFeed::from_xml(&root)?),
            FeedFormat::Rdf => Feed::Rdf(RdfFeed::from_xml(&root)?),
            FeedFormat::Atom => Feed::Atom(AtomFeed::from_xml(&root)?),
        };

        self.feed = Some(feed);
        self.version = Some(version);
        Ok(())
    }

    /// Version recognized by the last successful load, if any
    pub fn recognized_version(&self) -> Option<SpecVersion> {
        self.version
    }

    pub fn feed(&self) -> Option<&Feed> {
        self.feed.as_ref()
    }

    pub fn feed_mut(&mut self) -> Option<&mut Feed> {
        self.feed.as_mut()
    }

    /// Validate against the recognized version
    ///
    /// Required fields are always checked; value-level rules only when
    /// `validate_content` is set. The first failure is returned.
    pub fn validate(&self, validate_content: bool) -> Result<()> {
        let (feed, version) = self.loaded()?;
        feed.validate(&ValidationContext::new(version, validate_content))
    }

    /// Serialize as the recognized version
    pub fn save(&self, config: &FormatConfig) -> Result<String> {
        let (_, version) = self.loaded()?;
        self.save_as(version, config)
    }

    /// Serialize as another version of the same format, e.g. RSS 2.0 as 0.92
    ///
    /// # Errors
    ///
    /// [`FeedError::Configuration`] if `version` or `config` belong to a
    /// different format, validation errors when `config.validate_on_save` is
    /// set, and the unsupported-version error if the feed holds an element
    /// `version` does not define.
    pub fn save_as(&self, version: SpecVersion, config: &FormatConfig) -> Result<String> {
        let (feed, _) = self.loaded()?;
        if feed.format() != version.format() || config.format != version.format() {
            return Err(FeedError::Configuration(format!(
                "cannot save a {} feed as {version} with a {} configuration",
                feed.format(),
                config.format
            )));
        }

        let mut root = feed.to_root(version, config)?;
        let mut declarations = config.namespaces.clone();
        declarations.append(&mut root.declarations);
        root.declarations = declarations;

        write_document(&root, Some(config.xml_declaration().as_str()), config.indent)
    }

    /// Serialize into `writer`
    pub fn save_to<W: Write>(&self, config: &FormatConfig, mut writer: W) -> Result<()> {
        let xml = self.save(config)?;
        writer.write_all(xml.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn loaded(&self) -> Result<(&Feed, SpecVersion)> {
        match (&self.feed, self.version) {
            (Some(feed), Some(version)) => Ok((feed, version)),
            _ => Err(FeedError::Configuration(
                "document holds no recognized feed".to_string(),
            )),
        }
    }
}
