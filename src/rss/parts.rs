//! Channel-level RSS sub-elements: category, cloud, image, textInput, skipHours, skipDays

use std::sync::LazyLock;

use crate::Result;
use crate::dispatch::{ElementKind, VersionedElement, unsupported};
use crate::error::ValidationError;
use crate::extension::{ExclusionSet, ExtensionSet, capture, emit};
use crate::validation::{
    check_max_length, check_numeric, check_numeric_max, check_url_scheme, check_vocabulary,
    link_schemes, require_text,
};
use crate::version::{SpecVersion, ValidationContext};
use crate::xml::XmlElement;

/// Cloud protocols defined by RSS 0.92
pub const CLOUD_PROTOCOLS_092: &[&str] = &["xml-rpc", "soap"];
/// Cloud protocols defined by RSS 2.0.1
pub const CLOUD_PROTOCOLS_201: &[&str] = &["xml-rpc", "soap", "http-post"];

/// Values allowed in `<skipDays><day>`
pub const SKIP_DAY_NAMES: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MAX_SKIP_HOURS: usize = 24;
const MAX_SKIP_DAYS: usize = 7;

static CATEGORY_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with("domain", None));

static CLOUD_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        None,
        &["domain", "port", "path", "registerProcedure", "protocol"],
    )
});

static IMAGE_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(
        None,
        &["url", "title", "link", "width", "height", "description"],
    )
});

static TEXT_INPUT_NAMES: LazyLock<ExclusionSet> = LazyLock::new(|| {
    ExclusionSet::new().with_names(None, &["title", "description", "name", "link"])
});

static SKIP_HOURS_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with("hour", None));

static SKIP_DAYS_NAMES: LazyLock<ExclusionSet> =
    LazyLock::new(|| ExclusionSet::new().with("day", None));

fn attr(element: &XmlElement, name: &str) -> Option<String> {
    element.attribute(name, None).map(str::to_string)
}

fn text(element: &XmlElement, name: &str) -> Option<String> {
    element.child_text(name, None)
}

/// `<category domain="...">value</category>` (RSS 0.92+)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssCategory {
    pub domain: Option<String>,
    pub value: Option<String>,
    pub extensions: ExtensionSet,
}

impl RssCategory {
    /// Create a category with a value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

impl VersionedElement for RssCategory {
    const KIND: ElementKind = ElementKind::RssCategory;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        // Text content is the value; any child elements are extensions
        let value = element.own_text();
        Ok(Self {
            domain: attr(element, "domain"),
            value: (!value.is_empty()).then_some(value),
            extensions: capture(element, &CATEGORY_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        match ctx.version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {
                require_text(Self::KIND.tag(), "value", self.value.as_deref())
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.set_optional_attribute("domain", self.domain.as_deref());
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

/// `<cloud>` subscription endpoint (RSS 0.92+)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssCloud {
    pub domain: Option<String>,
    pub port: Option<String>,
    pub path: Option<String>,
    pub register_procedure: Option<String>,
    pub protocol: Option<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RssCloud {
    const KIND: ElementKind = ElementKind::RssCloud;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            domain: attr(element, "domain"),
            port: attr(element, "port"),
            path: attr(element, "path"),
            register_procedure: attr(element, "registerProcedure"),
            protocol: attr(element, "protocol"),
            extensions: capture(element, &CLOUD_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        let protocols = match ctx.version {
            SpecVersion::Rss092 => CLOUD_PROTOCOLS_092,
            SpecVersion::Rss201 => CLOUD_PROTOCOLS_201,
            other => return Err(unsupported(Self::KIND, other)),
        };
        let tag = Self::KIND.tag();
        require_text(tag, "domain", self.domain.as_deref())?;
        require_text(tag, "port", self.port.as_deref())?;
        require_text(tag, "path", self.path.as_deref())?;
        require_text(tag, "registerProcedure", self.register_procedure.as_deref())?;
        require_text(tag, "protocol", self.protocol.as_deref())?;

        if ctx.validate_content {
            check_numeric::<u16>(tag, "port", self.port.as_deref())?;
            check_vocabulary(tag, "protocol", self.protocol.as_deref(), protocols)?;
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.set_optional_attribute("domain", self.domain.as_deref());
                element.set_optional_attribute("port", self.port.as_deref());
                element.set_optional_attribute("path", self.path.as_deref());
                element.set_optional_attribute(
                    "registerProcedure",
                    self.register_procedure.as_deref(),
                );
                element.set_optional_attribute("protocol", self.protocol.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// Channel `<image>` (all RSS versions)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssImage {
    pub url: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub description: Option<String>,
    pub extensions: ExtensionSet,
}

impl RssImage {
    /// Create an image with its three required fields
    pub fn new(url: impl Into<String>, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            link: Some(link.into()),
            ..Default::default()
        }
    }
}

impl VersionedElement for RssImage {
    const KIND: ElementKind = ElementKind::RssImage;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            url: text(element, "url"),
            title: text(element, "title"),
            link: text(element, "link"),
            width: text(element, "width"),
            height: text(element, "height"),
            description: text(element, "description"),
            extensions: capture(element, &IMAGE_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        match ctx.version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                require_text(tag, "url", self.url.as_deref())?;
                require_text(tag, "title", self.title.as_deref())?;
                require_text(tag, "link", self.link.as_deref())?;
            }
            other => return Err(unsupported(Self::KIND, other)),
        }

        if ctx.validate_content {
            if ctx.version == SpecVersion::Rss091 {
                check_max_length(tag, "title", self.title.as_deref(), 100)?;
                check_max_length(tag, "url", self.url.as_deref(), 500)?;
                check_max_length(tag, "link", self.link.as_deref(), 500)?;
                check_max_length(tag, "description", self.description.as_deref(), 100)?;
            }
            let schemes = link_schemes(ctx.version);
            check_url_scheme(tag, "url", self.url.as_deref(), schemes)?;
            check_url_scheme(tag, "link", self.link.as_deref(), schemes)?;
            check_numeric_max(tag, "width", self.width.as_deref(), 144)?;
            check_numeric_max(tag, "height", self.height.as_deref(), 400)?;
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.push_text_child("url", None, self.url.as_deref());
                element.push_text_child("title", None, self.title.as_deref());
                element.push_text_child("link", None, self.link.as_deref());
                element.push_text_child("width", None, self.width.as_deref());
                element.push_text_child("height", None, self.height.as_deref());
                element.push_text_child("description", None, self.description.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// Channel `<textInput>` (all RSS versions; `<textinput>` is accepted on input)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssTextInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub link: Option<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RssTextInput {
    const KIND: ElementKind = ElementKind::RssTextInput;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            title: text(element, "title"),
            description: text(element, "description"),
            name: text(element, "name"),
            link: text(element, "link"),
            extensions: capture(element, &TEXT_INPUT_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        match ctx.version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                require_text(tag, "title", self.title.as_deref())?;
                require_text(tag, "description", self.description.as_deref())?;
                require_text(tag, "name", self.name.as_deref())?;
                require_text(tag, "link", self.link.as_deref())?;
            }
            other => return Err(unsupported(Self::KIND, other)),
        }

        if ctx.validate_content {
            if ctx.version == SpecVersion::Rss091 {
                check_max_length(tag, "title", self.title.as_deref(), 100)?;
                check_max_length(tag, "description", self.description.as_deref(), 500)?;
                check_max_length(tag, "name", self.name.as_deref(), 20)?;
                check_max_length(tag, "link", self.link.as_deref(), 500)?;
            }
            check_url_scheme(tag, "link", self.link.as_deref(), link_schemes(ctx.version))?;
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                element.push_text_child("title", None, self.title.as_deref());
                element.push_text_child("description", None, self.description.as_deref());
                element.push_text_child("name", None, self.name.as_deref());
                element.push_text_child("link", None, self.link.as_deref());
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<skipHours>`: hours of the day (GMT) aggregators may skip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssSkipHours {
    pub hours: Vec<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RssSkipHours {
    const KIND: ElementKind = ElementKind::RssSkipHours;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            hours: element
                .children_named("hour", None)
                .map(XmlElement::inner_text)
                .collect(),
            extensions: capture(element, &SKIP_HOURS_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        match ctx.version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }

        if ctx.validate_content {
            if self.hours.len() > MAX_SKIP_HOURS {
                return Err(ValidationError::new(
                    tag,
                    "hour",
                    format!("at most {MAX_SKIP_HOURS} hours may be listed"),
                )
                .into());
            }
            for hour in &self.hours {
                check_numeric_max(tag, "hour", Some(hour.as_str()), 23)?;
            }
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                for hour in &self.hours {
                    element.push_text_child("hour", None, Some(hour.as_str()));
                }
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}

/// `<skipDays>`: days of the week aggregators may skip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssSkipDays {
    pub days: Vec<String>,
    pub extensions: ExtensionSet,
}

impl VersionedElement for RssSkipDays {
    const KIND: ElementKind = ElementKind::RssSkipDays;

    fn from_xml(element: &XmlElement) -> Result<Self> {
        Ok(Self {
            days: element
                .children_named("day", None)
                .map(XmlElement::inner_text)
                .collect(),
            extensions: capture(element, &SKIP_DAYS_NAMES),
        })
    }

    fn validate(&self, ctx: &ValidationContext) -> Result<()> {
        let tag = Self::KIND.tag();
        match ctx.version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {}
            other => return Err(unsupported(Self::KIND, other)),
        }

        if ctx.validate_content {
            if self.days.len() > MAX_SKIP_DAYS {
                return Err(ValidationError::new(
                    tag,
                    "day",
                    format!("at most {MAX_SKIP_DAYS} days may be listed"),
                )
                .into());
            }
            for day in &self.days {
                check_vocabulary(tag, "day", Some(day.as_str()), SKIP_DAY_NAMES)?;
            }
        }
        Ok(())
    }

    fn to_xml(&self, version: SpecVersion) -> Result<XmlElement> {
        match version {
            SpecVersion::Rss091 | SpecVersion::Rss092 | SpecVersion::Rss201 => {
                let mut element = XmlElement::new(Self::KIND.tag());
                for day in &self.days {
                    element.push_text_child("day", None, Some(day.as_str()));
                }
                emit(&self.extensions, &mut element);
                Ok(element)
            }
            other => Err(unsupported(Self::KIND, other)),
        }
    }
}
