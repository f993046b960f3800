//! axum adapter for `vista-locale-core`.
//!
//! [`layer`] installs the locale router in front of every route of an
//! `axum::Router`. Requests whose path already carries a supported locale get a
//! [`ResolvedLocale`] request extension; unprefixed page requests are answered
//! with a redirect; assets pass through untouched.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, LOCATION, VARY},
        HeaderValue, StatusCode,
    },
    middleware::{self, Next},
    response::Response,
};
use vista_locale_core::{Locale, Redirect, RouteDecision, Router};

/// Request extension carrying the locale taken from the path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

/// Wrap `app` so every request is routed through `router` first.
pub fn layer<S>(app: axum::Router<S>, router: Arc<Router>) -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    app.layer(middleware::from_fn_with_state(router, route_locale))
}

/// Middleware function; usable directly with `from_fn_with_state`.
pub async fn route_locale(
    State(router): State<Arc<Router>>,
    mut req: Request,
    next: Next,
) -> Response {
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let decision = router.route(req.uri().path(), req.uri().query(), accept_language);

    match decision {
        RouteDecision::Asset => next.run(req).await,
        RouteDecision::Localized(locale) => {
            req.extensions_mut().insert(ResolvedLocale(locale));
            next.run(req).await
        }
        RouteDecision::Redirect(redirect) => match redirect_response(&redirect) {
            Some(res) => {
                tracing::debug!(
                    path = %req.uri().path(),
                    location = %redirect.location,
                    locale = %redirect.locale,
                    "locale redirect"
                );
                res
            }
            None => {
                tracing::warn!(
                    location = %redirect.location,
                    "redirect target is not a valid header value; passing through"
                );
                next.run(req).await
            }
        },
    }
}

fn redirect_response(redirect: &Redirect) -> Option<Response> {
    let location = HeaderValue::from_str(&redirect.location).ok()?;
    let status = StatusCode::from_u16(redirect.status.code()).ok()?;
    let mut res = Response::new(Body::empty());
    *res.status_mut() = status;
    res.headers_mut().insert(LOCATION, location);
    res.headers_mut()
        .insert(VARY, HeaderValue::from_static("accept-language"));
    Some(res)
}
