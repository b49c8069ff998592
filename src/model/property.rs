//! Page property values.

use super::rich_text::RichText;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Page properties keyed by name, in the order the API returned them.
pub type Properties = IndexMap<String, PropertyValue>;

/// A typed page property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// The page title
    Title {
        /// Title runs
        #[serde(default)]
        title: Vec<RichText>,
    },

    /// Free text
    RichText {
        /// Text runs
        #[serde(default)]
        rich_text: Vec<RichText>,
    },

    /// Date or date range
    Date {
        /// Date payload, null when unset
        #[serde(default)]
        date: Option<DateValue>,
    },

    /// URL
    Url {
        /// URL, null when unset
        #[serde(default)]
        url: Option<String>,
    },

    /// Any property type this crate does not model
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Create a title property.
    pub fn title(text: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichText::new(text)],
        }
    }

    /// Create a rich text property.
    pub fn rich_text(text: impl Into<String>) -> Self {
        PropertyValue::RichText {
            rich_text: vec![RichText::new(text)],
        }
    }

    /// Create a date property with a start date.
    pub fn date(start: impl Into<String>) -> Self {
        PropertyValue::Date {
            date: Some(DateValue {
                start: start.into(),
                end: None,
                time_zone: None,
            }),
        }
    }

    /// Create a URL property.
    pub fn url(url: impl Into<String>) -> Self {
        PropertyValue::Url {
            url: Some(url.into()),
        }
    }

    /// Wire name of the property type.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Date { .. } => "date",
            PropertyValue::Url { .. } => "url",
            PropertyValue::Unsupported => "unsupported",
        }
    }
}

/// Date property payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    /// ISO 8601 start date or datetime
    pub start: String,

    /// ISO 8601 end, for ranges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// IANA time zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}
