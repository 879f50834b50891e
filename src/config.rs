//! Per-format serialization configuration

use crate::version::{FeedFormat, SpecVersion};

/// Atom 1.0 namespace
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
/// RDF syntax namespace
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RSS 1.0 namespace used by RDF Site Summary elements
pub const RSS10_NAMESPACE: &str = "http://purl.org/rss/1.0/";
/// Dublin Core elements namespace
pub const DUBLIN_CORE_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
/// Namespace bound to the reserved `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A prefix → namespace declaration written on the document root
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceBinding {
    /// Prefix, or `None` for the default namespace
    pub prefix: Option<String>,
    /// Namespace URI
    pub uri: String,
}

impl NamespaceBinding {
    /// Create a prefixed binding
    pub fn prefixed(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            uri: uri.into(),
        }
    }

    /// Create a default-namespace binding
    pub fn default_namespace(uri: impl Into<String>) -> Self {
        Self {
            prefix: None,
            uri: uri.into(),
        }
    }
}

/// Serialization settings for one document format
///
/// # Example
///
/// ```
/// use feedkit::FormatConfig;
///
/// let config = FormatConfig::rss().validate_on_save(true).indent(2);
/// assert!(config.validate_on_save);
/// assert_eq!(config.encoding, "UTF-8");
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatConfig {
    /// Document family this configuration applies to
    pub format: FeedFormat,

    /// Encoding label written in the XML declaration
    ///
    /// Output is always UTF-8; this only controls the declared label.
    #[cfg_attr(feature = "serde", serde(default = "default_encoding"))]
    pub encoding: String,

    /// Indentation width, or `None` for compact output
    #[cfg_attr(feature = "serde", serde(default))]
    pub indent: Option<usize>,

    /// Run `validate` with content checks before every save
    ///
    /// Default: `false` (invalid in-memory state is serialized as-is)
    #[cfg_attr(feature = "serde", serde(default))]
    pub validate_on_save: bool,

    /// Namespace declarations written on the document root
    #[cfg_attr(feature = "serde", serde(default))]
    pub namespaces: Vec<NamespaceBinding>,
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

impl FormatConfig {
    fn base(format: FeedFormat) -> Self {
        Self {
            format,
            encoding: default_encoding(),
            indent: None,
            validate_on_save: false,
            namespaces: Vec::new(),
        }
    }

    /// Defaults for RSS 0.91/0.92/2.0 documents
    pub fn rss() -> Self {
        Self::base(FeedFormat::Rss)
    }

    /// Defaults for RDF 1.0 documents
    pub fn rdf() -> Self {
        let mut config = Self::base(FeedFormat::Rdf);
        config.namespaces = vec![
            NamespaceBinding::prefixed("rdf", RDF_NAMESPACE),
            NamespaceBinding::default_namespace(RSS10_NAMESPACE),
        ];
        config
    }

    /// Defaults for Atom 1.0 documents
    pub fn atom() -> Self {
        let mut config = Self::base(FeedFormat::Atom);
        config.namespaces = vec![NamespaceBinding::default_namespace(ATOM_NAMESPACE)];
        config
    }

    /// Defaults for the format a version belongs to
    pub fn for_version(version: SpecVersion) -> Self {
        match version.format() {
            FeedFormat::Rss => Self::rss(),
            FeedFormat::Rdf => Self::rdf(),
            FeedFormat::Atom => Self::atom(),
        }
    }

    /// Set validate-on-save
    pub fn validate_on_save(mut self, enabled: bool) -> Self {
        self.validate_on_save = enabled;
        self
    }

    /// Set the indentation width
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Set the declared encoding label
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Declare an extra prefix on the document root (e.g. `dc`)
    pub fn declare(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.push(NamespaceBinding::prefixed(prefix, uri));
        self
    }

    /// The XML declaration line written before the root element
    pub fn xml_declaration(&self) -> String {
        format!("<?xml version=\"1.0\" encoding=\"{}\"?>", self.encoding)
    }
}
