//! Configuration options for HTML normalization.

use std::fmt;
use std::str::FromStr;

use crate::error::NormalizeError;

/// The canonical heading level every `h1`..`h6` is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeadingLevel {
    /// `<h1>`
    H1,
    /// `<h2>`
    #[default]
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
}

/// Tag names recognized as headings, in level order.
pub(crate) const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl HeadingLevel {
    /// Lowercase tag name for this level, e.g. `"h2"`.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        HEADING_TAGS[self.as_u8() as usize - 1]
    }

    /// Numeric level in `1..=6`.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = NormalizeError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            6 => Ok(Self::H6),
            other => Err(NormalizeError::InvalidHeadingLevel(other.to_string())),
        }
    }
}

impl FromStr for HeadingLevel {
    type Err = NormalizeError;

    /// Accepts `"2"` as well as `"h2"`/`"H2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('h')
            .or_else(|| trimmed.strip_prefix('H'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .map_err(|_| NormalizeError::InvalidHeadingLevel(s.to_string()))
            .and_then(|level| Self::try_from(level).map_err(|_| NormalizeError::InvalidHeadingLevel(s.to_string())))
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Options controlling how a document is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizeOptions {
    /// Level all headings are rewritten to.
    pub heading_level: HeadingLevel,
    /// Flatten `<ol>` the same way as `<ul>`.
    pub flatten_ordered_lists: bool,
    /// Append a trailing `"\n"` to every paragraph.
    pub paragraph_breaks: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            heading_level: HeadingLevel::H2,
            flatten_ordered_lists: false,
            paragraph_breaks: true,
        }
    }
}

impl NormalizeOptions {
    /// Set the canonical heading level.
    #[must_use]
    pub const fn with_heading_level(mut self, level: HeadingLevel) -> Self {
        self.heading_level = level;
        self
    }

    /// Enable or disable flattening of ordered lists.
    #[must_use]
    pub const fn with_flatten_ordered_lists(mut self, enabled: bool) -> Self {
        self.flatten_ordered_lists = enabled;
        self
    }

    /// Enable or disable the trailing line break on paragraphs.
    #[must_use]
    pub const fn with_paragraph_breaks(mut self, enabled: bool) -> Self {
        self.paragraph_breaks = enabled;
        self
    }

    /// Whether `tag_name` is a list container under these options.
    pub(crate) fn is_list_container(&self, tag_name: &str) -> bool {
        tag_name == "ul" || (self.flatten_ordered_lists && tag_name == "ol")
    }
}
