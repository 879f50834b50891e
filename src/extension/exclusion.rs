//! Keys naming schema-mapped content that extension capture skips

use std::collections::HashSet;

/// A (local name, namespace URI) pair; `""` stands for "no namespace"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExclusionKey {
    /// Local name of the mapped child element or attribute
    pub local_name: String,
    /// Namespace URI, empty for no/default namespace
    pub namespace: String,
}

impl ExclusionKey {
    /// Create a key; `None` and `Some("")` produce the same key
    pub fn new(local_name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: namespace.unwrap_or("").to_string(),
        }
    }
}

/// The set of names an element maps itself
///
/// # Example
///
/// ```
/// use feedkit::ExclusionSet;
///
/// let exclusions = ExclusionSet::new()
///     .with_names(None, &["title", "link", "description"])
///     .with("about", Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#"));
///
/// assert!(exclusions.contains("title", None));
/// assert!(exclusions.contains("title", Some("")));
/// assert!(!exclusions.contains("title", Some("http://purl.org/dc/elements/1.1/")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    keys: HashSet<ExclusionKey>,
}

impl ExclusionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one key
    #[must_use]
    pub fn with(mut self, local_name: &str, namespace: Option<&str>) -> Self {
        self.insert(ExclusionKey::new(local_name, namespace));
        self
    }

    /// Add several local names sharing one namespace
    #[must_use]
    pub fn with_names(mut self, namespace: Option<&str>, local_names: &[&str]) -> Self {
        for name in local_names {
            self.insert(ExclusionKey::new(*name, namespace));
        }
        self
    }

    /// Add one key in place
    pub fn insert(&mut self, key: ExclusionKey) -> bool {
        self.keys.insert(key)
    }

    /// Whether the (local name, namespace) pair is mapped
    pub fn contains(&self, local_name: &str, namespace: Option<&str>) -> bool {
        self.keys
            .contains(&ExclusionKey::new(local_name, namespace))
    }

    /// Whether the key is mapped
    pub fn contains_key(&self, key: &ExclusionKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the keys in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &ExclusionKey> {
        self.keys.iter()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for (local_name, namespace) in iter {
            set.insert(ExclusionKey::new(local_name, Some(namespace)));
        }
        set
    }
}

impl FromIterator<ExclusionKey> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ExclusionKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
