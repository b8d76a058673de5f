//! Locale identities as they appear in CLDR `identity` blocks.
//!
//! A locale code is a dash-joined sequence of subtags. Only the language is
//! required; script, territory and variant are recognised by position and
//! shape, so the code is unambiguous without separators per field:
//!
//! | Subtag    | Shape                                              |
//! |-----------|----------------------------------------------------|
//! | language  | 2-8 ASCII letters (`fr`, `haw`, `root`)            |
//! | script    | 4 ASCII letters (`Latn`, `Hant`)                   |
//! | territory | 2 ASCII letters or 3 digits (`US`, `419`)          |
//! | variant   | 5-8 alphanumerics, or a digit + 3 alphanumerics    |
//!
//! Case is preserved exactly as given by the source data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FormatError;

/// A parsed locale code.
///
/// Every value that can be constructed formats to a code that parses back to
/// an equal value, because the subtag shapes above are pairwise disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId {
    language: String,
    script: Option<String>,
    territory: Option<String>,
    variant: Option<String>,
}

impl LocaleId {
    /// Builds a locale identity from its parts, validating each subtag.
    pub fn new(
        language: impl Into<String>,
        script: Option<String>,
        territory: Option<String>,
        variant: Option<String>,
    ) -> Result<Self, FormatError> {
        let id = Self {
            language: language.into(),
            script,
            territory,
            variant,
        };
        let reason = if !is_language(&id.language) {
            Some("language subtag must be 2-8 ASCII letters")
        } else if id.script.as_deref().is_some_and(|s| !is_script(s)) {
            Some("script subtag must be 4 ASCII letters")
        } else if id.territory.as_deref().is_some_and(|t| !is_territory(t)) {
            Some("territory subtag must be 2 ASCII letters or 3 digits")
        } else if id.variant.as_deref().is_some_and(|v| !is_variant(v)) {
            Some("variant subtag must be 5-8 alphanumerics or a digit followed by 3 alphanumerics")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(FormatError::InvalidLocaleCode {
                code: id.to_code(),
                reason: reason.into(),
            }),
            None => Ok(id),
        }
    }

    /// Shorthand for a language-only locale.
    pub fn language_only(language: impl Into<String>) -> Result<Self, FormatError> {
        Self::new(language, None, None, None)
    }

    /// Parses a dash-joined locale code such as `sr-Latn-BA` or `ca-ES-VALENCIA`.
    pub fn parse(code: &str) -> Result<Self, FormatError> {
        let invalid = |reason: String| FormatError::InvalidLocaleCode {
            code: code.to_string(),
            reason,
        };

        let mut subtags = code.split('-');
        let language = subtags
            .next()
            .filter(|s| is_language(s))
            .ok_or_else(|| invalid("language subtag must be 2-8 ASCII letters".into()))?;

        let mut script = None;
        let mut territory = None;
        let mut variant = None;

        for subtag in subtags {
            if variant.is_some() {
                return Err(invalid(format!("unexpected subtag {subtag:?} after variant")));
            }
            if script.is_none() && territory.is_none() && is_script(subtag) {
                script = Some(subtag.to_string());
            } else if territory.is_none() && is_territory(subtag) {
                territory = Some(subtag.to_string());
            } else if is_variant(subtag) {
                variant = Some(subtag.to_string());
            } else {
                return Err(invalid(format!("unrecognised subtag {subtag:?}")));
            }
        }

        Ok(Self {
            language: language.to_string(),
            script,
            territory,
            variant,
        })
    }

    /// Formats this identity back into its dash-joined code.
    #[must_use]
    pub fn to_code(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    #[must_use]
    pub fn territory(&self) -> Option<&str> {
        self.territory.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

fn is_language(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_script(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_territory(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant(s: &str) -> bool {
    let alnum = s.bytes().all(|b| b.is_ascii_alphanumeric());
    match s.len() {
        5..=8 => alnum,
        4 => alnum && s.as_bytes()[0].is_ascii_digit(),
        _ => false,
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        for subtag in [&self.script, &self.territory, &self.variant]
            .into_iter()
            .flatten()
        {
            write!(f, "-{subtag}")?;
        }
        Ok(())
    }
}

impl FromStr for LocaleId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleId> for String {
    fn from(id: LocaleId) -> Self {
        id.to_code()
    }
}
