//! Field-level validation rules shared by all elements
//!
//! Each check names the element and field it guards so a failure reports
//! exactly what was violated. Presence checks run for every `validate` call;
//! the remaining checks only run when content validation is requested.

use std::str::FromStr;

use url::Url;

use crate::error::ValidationError;
use crate::temporal::{DateDialect, TemporalValue};
use crate::version::SpecVersion;
use crate::Result;

/// Link schemes allowed by RSS 0.91/0.92 and RDF 1.0
pub const LEGACY_LINK_SCHEMES: &[&str] = &["http", "ftp"];

/// Link schemes allowed by RSS 2.0.1
pub const RSS2_LINK_SCHEMES: &[&str] = &["http", "https", "ftp", "news", "mailto"];

/// Link schemes accepted for a version
///
/// Atom places no restriction on schemes beyond being an absolute IRI, so it
/// returns an empty list (meaning "any").
pub fn link_schemes(version: SpecVersion) -> &'static [&'static str] {
    match version {
        SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rdf10 => LEGACY_LINK_SCHEMES,
        SpecVersion::Rss201 => RSS2_LINK_SCHEMES,
        SpecVersion::Atom10 => &[],
    }
}

/// A text field is present and not empty
pub fn require_text(element: &str, field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::missing(element, field).into()),
    }
}

/// A structured field is present
pub fn require<T>(element: &str, field: &str, value: Option<&T>) -> Result<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::missing(element, field).into()),
    }
}

/// A text field, when present, has at most `max` characters
///
/// # Examples
///
/// ```
/// use feedkit::validation::check_max_length;
///
/// assert!(check_max_length("item", "title", Some("short"), 100).is_ok());
/// assert!(check_max_length("item", "title", Some("x".repeat(101).as_str()), 100).is_err());
/// assert!(check_max_length("item", "title", None, 100).is_ok());
/// ```
pub fn check_max_length(element: &str, field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::new(
            element,
            field,
            format!("exceeds maximum length of {max} characters"),
        )
        .into()),
        _ => Ok(()),
    }
}

/// A URL field, when present, parses and uses one of `allowed` schemes
///
/// An empty `allowed` list accepts any scheme.
///
/// # Examples
///
/// ```
/// use feedkit::validation::{check_url_scheme, LEGACY_LINK_SCHEMES, RSS2_LINK_SCHEMES};
///
/// let link = Some("https://example.com/");
/// assert!(check_url_scheme("channel", "link", link, LEGACY_LINK_SCHEMES).is_err());
/// assert!(check_url_scheme("channel", "link", link, RSS2_LINK_SCHEMES).is_ok());
/// assert!(check_url_scheme("channel", "link", Some("not a url"), RSS2_LINK_SCHEMES).is_err());
/// ```
pub fn check_url_scheme(
    element: &str,
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let url = Url::parse(value.trim()).map_err(|e| {
        ValidationError::new(element, field, format!("'{value}' is not a valid URL: {e}"))
    })?;
    if !allowed.is_empty() && !allowed.contains(&url.scheme()) {
        return Err(ValidationError::new(
            element,
            field,
            format!(
                "URL scheme '{}' is not allowed (expected one of: {})",
                url.scheme(),
                allowed.join(", ")
            ),
        )
        .into());
    }
    Ok(())
}

/// A field, when present, parses as a number of type `T`
pub fn check_numeric<T: FromStr>(element: &str, field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.trim().parse::<T>().is_err() => Err(ValidationError::new(
            element,
            field,
            format!("'{v}' is not a valid number"),
        )
        .into()),
        _ => Ok(()),
    }
}

/// A numeric field, when present, parses and is at most `max`
pub fn check_numeric_max(element: &str, field: &str, value: Option<&str>, max: u32) -> Result<()> {
    let Some(v) = value else {
        return Ok(());
    };
    match v.trim().parse::<u32>() {
        Ok(n) if n <= max => Ok(()),
        Ok(_) => Err(ValidationError::new(element, field, format!("exceeds maximum of {max}")).into()),
        Err(_) => Err(ValidationError::new(element, field, format!("'{v}' is not a valid number")).into()),
    }
}

/// A field, when present, is one of a closed set of values
pub fn check_vocabulary(
    element: &str,
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<()> {
    match value {
        Some(v) if !allowed.contains(&v.trim()) => Err(ValidationError::new(
            element,
            field,
            format!("'{v}' is not one of: {}", allowed.join(", ")),
        )
        .into()),
        _ => Ok(()),
    }
}

/// A date field, when present, survives a round trip through its dialect
pub fn check_date(
    element: &str,
    field: &str,
    value: Option<&TemporalValue>,
    dialect: DateDialect,
) -> Result<()> {
    match value {
        Some(date) if !date.is_representable(dialect) => Err(ValidationError::new(
            element,
            field,
            format!("{} cannot be written exactly in this date format", date.instant()),
        )
        .into()),
        _ => Ok(()),
    }
}

/// An email field, when present, looks like `local@domain`
pub fn check_email(element: &str, field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) => match v.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ValidationError::new(element, field, format!("'{v}' is not an email address")).into()),
        },
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeedError;
    use chrono::{TimeZone, Utc};

    fn field_of(result: Result<()>) -> Option<String> {
        match result {
            Err(FeedError::Validation(err)) => err.field,
            _ => None,
        }
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("channel", "title", Some("News")).is_ok());
        assert_eq!(field_of(require_text("channel", "title", None)).as_deref(), Some("title"));
        assert!(require_text("channel", "title", Some("   ")).is_err());
    }

    #[test]
    fn test_link_schemes_per_version() {
        assert_eq!(link_schemes(SpecVersion::Rss091), &["http", "ftp"]);
        assert_eq!(link_schemes(SpecVersion::Rss092), &["http", "ftp"]);
        assert!(link_schemes(SpecVersion::Rss201).contains(&"mailto"));
        assert!(link_schemes(SpecVersion::Atom10).is_empty());
    }

    #[test]
    fn test_check_url_scheme_any() {
        assert!(check_url_scheme("link", "href", Some("tag:example.com,2005:1"), &[]).is_ok());
        assert!(check_url_scheme("link", "href", Some("/relative"), &[]).is_err());
    }

    #[test]
    fn test_check_numeric() {
        assert!(check_numeric::<u32>("channel", "ttl", Some("60")).is_ok());
        assert!(check_numeric::<u32>("channel", "ttl", Some("sixty")).is_err());
        assert!(check_numeric::<u64>("enclosure", "length", Some("-1")).is_err());
        assert!(check_numeric::<u16>("cloud", "port", None).is_ok());
    }

    #[test]
    fn test_check_numeric_max() {
        assert!(check_numeric_max("image", "width", Some("144"), 144).is_ok());
        assert!(check_numeric_max("image", "width", Some("145"), 144).is_err());
        assert!(check_numeric_max("image", "width", Some("wide"), 144).is_err());
    }

    #[test]
    fn test_check_vocabulary() {
        let days = ["Monday", "Tuesday"];
        assert!(check_vocabulary("skipDays", "day", Some("Monday"), &days).is_ok());
        assert!(check_vocabulary("skipDays", "day", Some("monday"), &days).is_err());
    }

    #[test]
    fn test_check_date() {
        let whole = TemporalValue::utc(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert!(check_date("item", "pubDate", Some(&whole), DateDialect::Rfc822).is_ok());

        let ancient = TemporalValue::utc(Utc.with_ymd_and_hms(999, 1, 1, 0, 0, 0).unwrap());
        assert!(check_date("item", "pubDate", Some(&ancient), DateDialect::Rfc822).is_err());
    }

    #[test]
    fn test_check_email() {
        assert!(check_email("author", "email", Some("jane@example.com")).is_ok());
        assert!(check_email("author", "email", Some("jane")).is_err());
        assert!(check_email("author", "email", Some("@example.com")).is_err());
    }
}
