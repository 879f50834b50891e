#![doc = include_str!("../README.md")]

/// Atom 1.0 (RFC 4287) documents
pub mod atom;
mod config;
/// Per-version validation and serialization dispatch
pub mod dispatch;
mod document;
mod error;
/// Foreign ("extension") content preserved across parse and serialize
pub mod extension;
/// RDF Site Summary (RSS 1.0) documents
pub mod rdf;
/// RSS 0.91, 0.92 and 2.0.1 documents
pub mod rss;
mod temporal;
/// Field-level validation rules shared by all elements
pub mod validation;
mod version;
/// Minimal owned XML tree
pub mod xml;

pub use config::{
    ATOM_NAMESPACE, DUBLIN_CORE_NAMESPACE, FormatConfig, NamespaceBinding, RDF_NAMESPACE,
    RSS10_NAMESPACE, XML_NAMESPACE,
};
pub use dispatch::{ElementKind, VersionedElement};
pub use document::{Feed, FeedDocument, recognize};
pub use error::{FeedError, Result, UNSUPPORTED_VERSION_MESSAGE, ValidationError};
pub use extension::{
    ContentMode, ExclusionKey, ExclusionSet, ExtensionNode, ExtensionSet, NodeKind, capture, emit,
};
pub use temporal::{DateDialect, TemporalValue};
pub use version::{FeedFormat, SpecVersion, ValidationContext};
pub use xml::{XmlAttribute, XmlElement, XmlNode};
