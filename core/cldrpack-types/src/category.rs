//! The closed set of CLDR data categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FormatError;

/// A CLDR data domain distributed as its own JSON file per locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Date/time formatting, including calendar data.
    Dates,
    /// Number formatting symbols and patterns.
    Numbers,
    /// Display names for languages, scripts, territories and variants.
    LocaleNames,
    /// Unit formatting.
    Units,
    /// Exemplar characters and ellipsis patterns.
    Characters,
    /// Quotation delimiters.
    Delimiters,
    /// Text orientation.
    Layout,
    /// List joining patterns.
    ListPatterns,
    /// Capitalization context transforms.
    ContextTransforms,
    /// POSIX yes/no messages.
    Posix,
    /// Rule-based number formatting. Present only for locales with custom rules.
    Rbnf,
    /// Text segmentation (line/sentence break suppressions).
    Segments,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 12] = [
        Category::Dates,
        Category::Numbers,
        Category::LocaleNames,
        Category::Units,
        Category::Characters,
        Category::Delimiters,
        Category::Layout,
        Category::ListPatterns,
        Category::ContextTransforms,
        Category::Posix,
        Category::Rbnf,
        Category::Segments,
    ];

    /// Stable lowercase tag, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Dates => "dates",
            Category::Numbers => "numbers",
            Category::LocaleNames => "localenames",
            Category::Units => "units",
            Category::Characters => "characters",
            Category::Delimiters => "delimiters",
            Category::Layout => "layout",
            Category::ListPatterns => "listpatterns",
            Category::ContextTransforms => "contexttransforms",
            Category::Posix => "posix",
            Category::Rbnf => "rbnf",
            Category::Segments => "segments",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FormatError::UnknownCategory(s.to_string()))
    }
}
