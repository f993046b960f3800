//! Error types for locale configuration and catalog loading.
//!
//! Request handling itself never fails; these only surface while building a
//! [`crate::Router`] or loading a [`crate::Catalog`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocaleError {
    #[error("invalid locale code '{code}': {reason}")]
    InvalidCode { code: String, reason: &'static str },

    #[error("locale set is empty")]
    EmptySet,

    #[error("duplicate locale '{0}' in locale set")]
    Duplicate(String),

    #[error("default locale '{0}' is not part of the supported set")]
    DefaultNotSupported(String),

    #[error("unsupported redirect status {0} (expected 302, 307 or 308)")]
    RedirectStatus(u16),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read translations at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse translations at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("translations root for locale '{0}' must be a JSON object")]
    NotAnObject(String),
}
