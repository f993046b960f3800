//! vista-locale-core: locale negotiation and prefix routing (host-agnostic)
//!
//! Everything here is pure and synchronous. Host adapters (the axum layer in
//! `vista-locale-axum`) feed a request path and `Accept-Language` value into
//! [`Router::route`] and apply the returned [`RouteDecision`].

pub mod error;
pub mod locale;
pub mod negotiate;
pub mod path;
pub mod router;
pub mod translations;

pub use error::{CatalogError, LocaleError};
pub use locale::{Locale, LocaleSet};
pub use negotiate::preferred_locale;
pub use path::{classify, first_segment, PathClass};
pub use router::{LocaleState, Redirect, RedirectStatus, RouteDecision, Router, RouterConfig};
pub use translations::{Catalog, Translator};
