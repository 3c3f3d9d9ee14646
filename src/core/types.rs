use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::core::presets::RangeSpec;

/// Display format used when a column does not configure one.
pub const DEFAULT_DATE_FORMAT: &str = "DD MMM YYYY";

/// Separator between the two dates of a range token.
pub const DEFAULT_RANGE_SEPARATOR: &str = " - ";

/// Option value the server maps to an `IS NULL` match.
pub const NONE_OR_NULL: &str = "noneornull";

/// Kind of filter control attached to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Text,
    Select,
    #[serde(alias = "selectmulti", alias = "selectmultifrommulti")]
    MultiSelect,
    Date,
    #[serde(alias = "date_range")]
    DateRange,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Date => "date",
            Self::DateRange => "daterange",
        }
    }

    /// Select and multiselect share the alternation token grammar.
    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "select" => Ok(Self::Select),
            "multiselect" | "selectmulti" | "selectmultifrommulti" => Ok(Self::MultiSelect),
            "date" => Ok(Self::Date),
            "daterange" | "date_range" => Ok(Self::DateRange),
            _ => Err(format!("Unknown filter kind: {}", s)),
        }
    }
}

/// One entry of a select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The option standing for rows whose value is missing.
    pub fn none_or_null() -> Self {
        Self::new(NONE_OR_NULL, "None")
    }
}

/// How the server combines the values of a multi-value selection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Combinator {
    #[strum(serialize = "AND")]
    And,
    #[default]
    #[strum(serialize = "OR")]
    Or,
}

/// Which half of a date filter a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum PickerRole {
    #[strum(serialize = "from")]
    From,
    #[strum(serialize = "to")]
    To,
}

impl PickerRole {
    pub fn paired(&self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::From,
        }
    }
}

/// Per-column filter configuration supplied by the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilterSpec {
    pub kind: FilterKind,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub include_and_or: bool,
    #[serde(default)]
    pub ranges: Vec<RangeSpec>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub range_separator: Option<String>,
}

impl ColumnFilterSpec {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
            multiple: kind == FilterKind::MultiSelect,
            include_and_or: false,
            ranges: Vec::new(),
            date_format: None,
            range_separator: None,
        }
    }

    pub fn text() -> Self {
        Self::new(FilterKind::Text)
    }

    pub fn select(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(FilterKind::Select)
        }
    }

    pub fn multiselect(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(FilterKind::MultiSelect)
        }
    }

    pub fn date() -> Self {
        Self::new(FilterKind::Date)
    }

    pub fn date_range() -> Self {
        Self::new(FilterKind::DateRange)
    }

    pub fn with_and_or(mut self) -> Self {
        self.include_and_or = true;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<RangeSpec>) -> Self {
        self.ranges = ranges;
        self
    }

    /// Whether more than one option may be selected at once
    pub fn is_multiple(&self) -> bool {
        self.multiple || self.kind == FilterKind::MultiSelect
    }

    /// Raw option values in definition order
    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }

    pub fn range_separator(&self) -> &str {
        self.range_separator
            .as_deref()
            .unwrap_or(DEFAULT_RANGE_SEPARATOR)
    }
}
