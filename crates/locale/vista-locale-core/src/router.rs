//! Locale prefix router.
//!
//! `Router::route` is the whole request-time contract: given a path, the raw
//! query string and the `Accept-Language` value it decides whether the request
//! passes through or is redirected to a locale-prefixed path. It holds no
//! mutable state and is `Send + Sync`, so a single instance can be shared by
//! every in-flight request.

use serde::{Deserialize, Serialize};

use crate::error::LocaleError;
use crate::locale::{Locale, LocaleSet};
use crate::negotiate::preferred_locale;
use crate::path::{classify, first_segment, PathClass};

/// Serializable router configuration. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Supported locale codes, in negotiation order.
    pub supported: Vec<String>,
    /// Default locale; must be listed in `supported`.
    pub default: String,
    /// Redirect status code: 302, 307 or 308.
    pub redirect_status: u16,
    /// Path prefixes that are never localized (asset and API namespaces).
    pub reserved_prefixes: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".into(), "es".into()],
            default: "en".into(),
            redirect_status: 307,
            reserved_prefixes: [
                "/_assets",
                "/_static",
                "/api",
                "/@vite",
                "/@fs",
                "/__sourcemaps",
                "/favicon",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedirectStatus {
    Found,
    Temporary,
    Permanent,
}

impl RedirectStatus {
    #[inline]
    pub fn code(self) -> u16 {
        match self {
            Self::Found => 302,
            Self::Temporary => 307,
            Self::Permanent => 308,
        }
    }
}

impl TryFrom<u16> for RedirectStatus {
    type Error = LocaleError;
    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            302 => Ok(Self::Found),
            307 => Ok(Self::Temporary),
            308 => Ok(Self::Permanent),
            other => Err(LocaleError::RedirectStatus(other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// Value for the `Location` header: `/<locale>/` or `/<locale><path>`,
    /// with the original query string appended when present.
    pub location: String,
    pub locale: Locale,
    pub status: RedirectStatus,
}

/// Outcome of routing one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Not a localizable page; forward unchanged.
    Asset,
    /// Already prefixed with a supported locale; forward and record it.
    Localized(Locale),
    /// Missing or unknown locale prefix.
    Redirect(Redirect),
}

impl RouteDecision {
    pub fn locale(&self) -> Option<&Locale> {
        match self {
            Self::Asset => None,
            Self::Localized(l) => Some(l),
            Self::Redirect(r) => Some(&r.locale),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        !matches!(self, Self::Redirect(_))
    }
}

/// Request-scoped locale state.
///
/// A request is `Resolved` only once its path carries a supported prefix; a
/// redirect leaves the current request `Unresolved` and the follow-up request
/// arrives resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocaleState {
    Unresolved,
    Resolved(Locale),
}

impl From<&RouteDecision> for LocaleState {
    fn from(decision: &RouteDecision) -> Self {
        match decision {
            RouteDecision::Localized(l) => LocaleState::Resolved(l.clone()),
            RouteDecision::Asset | RouteDecision::Redirect(_) => LocaleState::Unresolved,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Router {
    locales: LocaleSet,
    status: RedirectStatus,
    reserved_prefixes: Vec<String>,
}

impl Router {
    pub fn new(cfg: &RouterConfig) -> Result<Self, LocaleError> {
        Ok(Self {
            locales: LocaleSet::from_codes(&cfg.supported, &cfg.default)?,
            status: RedirectStatus::try_from(cfg.redirect_status)?,
            reserved_prefixes: cfg.reserved_prefixes.clone(),
        })
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn redirect_status(&self) -> RedirectStatus {
        self.status
    }

    /// Decide what to do with a request.
    ///
    /// `path` is the URI path without query; `query` is the raw query string
    /// without the leading `?`.
    pub fn route(
        &self,
        path: &str,
        query: Option<&str>,
        accept_language: Option<&str>,
    ) -> RouteDecision {
        if classify(path, &self.reserved_prefixes) == PathClass::Asset {
            return RouteDecision::Asset;
        }

        if let Some(locale) = first_segment(path).and_then(|seg| self.locales.get(seg)) {
            return RouteDecision::Localized(locale.clone());
        }

        let locale = preferred_locale(&self.locales, accept_language).clone();
        let location = redirect_location(&locale, path, query);
        log::debug!(
            "redirecting {path} -> {location} (accept-language: {:?})",
            accept_language
        );
        RouteDecision::Redirect(Redirect {
            location,
            locale,
            status: self.status,
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self {
            locales: LocaleSet::default(),
            status: RedirectStatus::Temporary,
            reserved_prefixes: RouterConfig::default().reserved_prefixes,
        }
    }
}

fn redirect_location(locale: &Locale, path: &str, query: Option<&str>) -> String {
    let mut location = String::with_capacity(path.len() + locale.as_str().len() + 2);
    location.push('/');
    location.push_str(locale.as_str());
    if path.is_empty() || path == "/" {
        location.push('/');
    } else {
        if !path.starts_with('/') {
            location.push('/');
        }
        location.push_str(path);
    }
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(q);
    }
    location
}
