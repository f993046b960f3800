//! Locale codes and the supported locale set.
//!
//! A [`Locale`] is a lowercase language code such as `en` or `pt-br`. It is
//! used verbatim as the first path segment of localized URLs, so the grammar is
//! deliberately narrow: ASCII lowercase letters and digits, optionally joined
//! by single `-` separators.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::LocaleError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Parse and validate a locale code.
    pub fn parse(code: &str) -> Result<Self, LocaleError> {
        let invalid = |reason| LocaleError::InvalidCode {
            code: code.to_string(),
            reason,
        };
        if code.is_empty() {
            return Err(invalid("empty code"));
        }
        if code.split('-').any(str::is_empty) {
            return Err(invalid("empty subtag"));
        }
        if !code
            .chars()
            .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid("expected lowercase ascii letters, digits or '-'"));
        }
        Ok(Self(code.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Locale, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Locale::parse(&s).map_err(de::Error::custom)
    }
}

/// Ordered set of supported locales with exactly one default.
///
/// Declaration order matters: it is the order in which `Accept-Language`
/// negotiation tests candidates (see [`crate::negotiate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default: usize,
}

impl LocaleSet {
    pub fn new(locales: Vec<Locale>, default: &Locale) -> Result<Self, LocaleError> {
        if locales.is_empty() {
            return Err(LocaleError::EmptySet);
        }
        for (i, l) in locales.iter().enumerate() {
            if locales[..i].contains(l) {
                return Err(LocaleError::Duplicate(l.to_string()));
            }
        }
        let default = locales
            .iter()
            .position(|l| l == default)
            .ok_or_else(|| LocaleError::DefaultNotSupported(default.to_string()))?;
        Ok(Self { locales, default })
    }

    /// Build a set from raw codes, validating each.
    pub fn from_codes<S: AsRef<str>>(codes: &[S], default: &str) -> Result<Self, LocaleError> {
        let locales = codes
            .iter()
            .map(|c| Locale::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(locales, &Locale::parse(default)?)
    }

    #[inline]
    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default]
    }

    /// Exact, case-sensitive membership test returning the matching locale.
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.as_str() == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl Default for LocaleSet {
    /// `{en, es}` with `en` as default.
    fn default() -> Self {
        Self {
            locales: vec![Locale("en".into()), Locale("es".into())],
            default: 0,
        }
    }
}
