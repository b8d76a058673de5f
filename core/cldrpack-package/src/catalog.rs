//! The fixed set of CLDR packages.

use std::fmt;
use std::path::Path;

use cldrpack_types::Category;
use serde::{Deserialize, Serialize};

/// How a package's data is shaped, which also fixes its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Locale-keyed data, one record per locale.
    Standard,
    /// Locale-independent supplemental data.
    Supplemental,
    /// Locale-keyed segmentation data.
    Segments,
}

impl PackageKind {
    pub const ALL: [PackageKind; 3] = [
        PackageKind::Standard,
        PackageKind::Supplemental,
        PackageKind::Segments,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PackageKind::Standard => "standard",
            PackageKind::Supplemental => "supplemental",
            PackageKind::Segments => "segments",
        }
    }

    /// File extension, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            PackageKind::Standard => "cldrstd",
            PackageKind::Supplemental => "cldrsup",
            PackageKind::Segments => "cldrseg",
        }
    }

    /// The kind whose extension `path` carries.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Whether documents of this kind are keyed by locale.
    #[must_use]
    pub const fn is_locale_keyed(self) -> bool {
        !matches!(self, PackageKind::Supplemental)
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One of the packages the CLDR JSON data is grouped into.
#[derive(Debug, PartialEq, Eq)]
pub struct Package {
    name: &'static str,
    kind: PackageKind,
    description: &'static str,
    categories: &'static [Category],
}

const NAME_PREFIX: &str = "cldr-";

const CALENDAR: &[Category] = &[Category::Dates];
const MISC: &[Category] = &[
    Category::Characters,
    Category::Delimiters,
    Category::Layout,
    Category::ListPatterns,
    Category::ContextTransforms,
    Category::Posix,
];

const fn standard(name: &'static str, description: &'static str, categories: &'static [Category]) -> Package {
    Package {
        name,
        kind: PackageKind::Standard,
        description,
        categories,
    }
}

static PACKAGES: [Package; 18] = [
    Package {
        name: "cldr-core",
        kind: PackageKind::Supplemental,
        description: "Basic CLDR supplemental data.",
        categories: &[],
    },
    standard("cldr-cal-buddhist", "Data for the Buddhist calendar.", CALENDAR),
    standard("cldr-cal-chinese", "Data for the Chinese calendar.", CALENDAR),
    standard("cldr-cal-coptic", "Data for the Coptic calendar.", CALENDAR),
    standard("cldr-cal-dangi", "Data for the Dangi calendar.", CALENDAR),
    standard("cldr-cal-ethiopic", "Data for the Ethiopic calendar.", CALENDAR),
    standard("cldr-cal-hebrew", "Data for the Hebrew calendar.", CALENDAR),
    standard("cldr-cal-indian", "Data for the Indian calendar.", CALENDAR),
    standard("cldr-cal-islamic", "Data for the Islamic calendar.", CALENDAR),
    standard("cldr-cal-japanese", "Data for the Japanese calendar.", CALENDAR),
    standard("cldr-cal-persian", "Data for the Persian calendar.", CALENDAR),
    standard("cldr-cal-roc", "Data for the Republic of China calendar.", CALENDAR),
    standard(
        "cldr-dates",
        "Data for date/time formatting, including data for the Gregorian calendar.",
        CALENDAR,
    ),
    standard(
        "cldr-localenames",
        "Translated display names for languages, scripts, territories and variants.",
        &[Category::LocaleNames],
    ),
    standard("cldr-misc", "Other CLDR data not defined elsewhere.", MISC),
    standard(
        "cldr-numbers",
        "Data for number formatting, including rule-based number formatting.",
        &[Category::Numbers, Category::Rbnf],
    ),
    Package {
        name: "cldr-segments-modern",
        kind: PackageKind::Segments,
        description: "Line breaking data from Unicode's ULI project.",
        categories: &[Category::Segments],
    },
    standard("cldr-units", "Data for units formatting.", &[Category::Units]),
];

impl Package {
    /// Every package, in catalog order.
    #[must_use]
    pub fn all() -> &'static [Package] {
        &PACKAGES
    }

    /// Looks a package up by full name (`cldr-dates`) or short name (`dates`).
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Package> {
        let full = name.strip_prefix(NAME_PREFIX).unwrap_or(name);
        PACKAGES.iter().find(|p| p.short_name() == full)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name without the `cldr-` prefix.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.strip_prefix(NAME_PREFIX).unwrap_or(self.name)
    }

    #[must_use]
    pub const fn kind(&self) -> PackageKind {
        self.kind
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Categories whose documents this package is built from.
    #[must_use]
    pub const fn categories(&self) -> &'static [Category] {
        self.categories
    }

    #[must_use]
    pub fn declares(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// File name of the built package, e.g. `cldr-dates.cldrstd`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.extension())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
