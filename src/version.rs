//! Syndication formats and spec versions

use std::fmt;

/// The three document families this crate models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedFormat {
    /// RSS 0.91, 0.92 and 2.0.1
    Rss,
    /// RDF Site Summary 1.0
    Rdf,
    /// Atom 1.0 (RFC 4287)
    Atom,
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedFormat::Rss => "RSS",
            FeedFormat::Rdf => "RDF",
            FeedFormat::Atom => "Atom",
        })
    }
}

/// A format + version combination that gates which fields are required or legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecVersion {
    /// Netscape/UserLand RSS 0.91
    Rss091,
    /// UserLand RSS 0.92
    Rss092,
    /// RSS 2.0.1 (RSS Advisory Board)
    Rss201,
    /// RDF Site Summary 1.0
    Rdf10,
    /// Atom 1.0
    Atom10,
}

impl SpecVersion {
    /// Every supported version, oldest RSS first
    pub const ALL: [SpecVersion; 5] = [
        SpecVersion::Rss091,
        SpecVersion::Rss092,
        SpecVersion::Rss201,
        SpecVersion::Rdf10,
        SpecVersion::Atom10,
    ];

    /// The document family this version belongs to
    pub fn format(self) -> FeedFormat {
        match self {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => FeedFormat::Rss,
            SpecVersion::Rdf10 => FeedFormat::Rdf,
            SpecVersion::Atom10 => FeedFormat::Atom,
        }
    }

    /// Version string as written in documents (`<rss version="...">`)
    pub fn as_str(self) -> &'static str {
        match self {
            SpecVersion::Rss091 => "0.91",
            SpecVersion::Rss092 => "0.92",
            SpecVersion::Rss201 => "2.0",
            SpecVersion::Rdf10 | SpecVersion::Atom10 => "1.0",
        }
    }

    /// Map an `<rss version="...">` attribute to a version
    ///
    /// "2.0" and "2.0.1" both select [`SpecVersion::Rss201`].
    pub fn from_rss_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "0.91" => Some(SpecVersion::Rss091),
            "0.92" => Some(SpecVersion::Rss092),
            "2.0" | "2.0.1" => Some(SpecVersion::Rss201),
            _ => None,
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::Rss201 => f.write_str("RSS 2.0.1"),
            other => write!(f, "{} {}", other.format(), other.as_str()),
        }
    }
}

/// Parameters threaded through a single `validate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Version the element is checked against
    pub version: SpecVersion,
    /// Also check value-level rules (lengths, URL schemes, numbers, vocabularies)
    pub validate_content: bool,
}

impl ValidationContext {
    /// Create a context
    pub fn new(version: SpecVersion, validate_content: bool) -> Self {
        Self {
            version,
            validate_content,
        }
    }

    /// Presence checks only
    pub fn structure(version: SpecVersion) -> Self {
        Self::new(version, false)
    }

    /// Presence and content checks
    pub fn content(version: SpecVersion) -> Self {
        Self::new(version, true)
    }
}
