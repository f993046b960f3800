//! Minimal localized page shell.
//!
//! Real page markup belongs to the rendering pipeline; this shell exists so
//! the server answers localized routes with translated content and the data
//! attributes the motion controller consumes.

use std::sync::Arc;

use askama::Template;

use axum::{
    extract::{Extension, State},
    http::{header::CONTENT_LANGUAGE, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use vista_locale_axum::ResolvedLocale;
use vista_locale_core::{LocaleSet, Translator};

use crate::SiteState;

pub async fn render_page(
    State(state): State<Arc<SiteState>>,
    locale: Option<Extension<ResolvedLocale>>,
    uri: Uri,
) -> Response {
    let Some(Extension(ResolvedLocale(locale))) = locale else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    let rest = uri
        .path()
        .strip_prefix('/')
        .and_then(|p| p.strip_prefix(locale.as_str()))
        .filter(|r| !r.is_empty())
        .unwrap_or("/");
    let shell = ShellTemplate::new(state.catalog.translator(&locale), &state.locales, rest);
    let html = match shell.render() {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, locale = %locale, "page render failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response();
        }
    };

    let mut res = Html(html).into_response();
    if let Ok(v) = HeaderValue::from_str(locale.as_str()) {
        res.headers_mut().insert(CONTENT_LANGUAGE, v);
    }
    res
}

const STATS: [(&str, &str); 3] = [
    ("120+", "stats.projects"),
    ("98%", "stats.clients"),
    ("12", "stats.years"),
];

/// The localized page shell. Every interpolation is HTML-escaped.
#[derive(Template)]
#[template(path = "shell.html")]
pub struct ShellTemplate<'a> {
    t: Translator<'a>,
    lang: &'a str,
    locales: &'a LocaleSet,
    /// Path after the locale prefix, starting with `/`.
    rest: &'a str,
    stats: &'a [(&'a str, &'a str)],
}

impl<'a> ShellTemplate<'a> {
    pub fn new(t: Translator<'a>, locales: &'a LocaleSet, rest: &'a str) -> Self {
        Self {
            t,
            lang: t.locale().as_str(),
            locales,
            rest,
            stats: &STATS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vista_locale_core::{Catalog, Locale};

    #[test]
    fn shell_renders_translations_and_alternates() {
        let en = Locale::parse("en").unwrap();
        let mut catalog = Catalog::new(en.clone());
        catalog
            .insert(
                &en,
                json!({ "hero": { "title": "Fast & friendly", "subtitle": "<b>bold</b>" } }),
            )
            .unwrap();
        let locales = LocaleSet::default();
        let html = ShellTemplate::new(catalog.translator(&en), &locales, "/about")
            .render()
            .unwrap();
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("Fast &amp; friendly"));
        assert!(html.contains("&lt;b&gt;bold&lt;"));
        assert!(!html.contains("<b>bold"));
        assert!(html.contains("hreflang=\"es\" href=\"/es"));
        assert!(html.contains("about\">"));
        // Missing keys render verbatim.
        assert!(html.contains("<title>meta.title</title>"));
        assert!(html.contains("<strong data-counter>120+</strong>"));
        assert!(html.contains("<h1 data-animate=\"fadeUp\">"));
        assert!(html.contains("src=\"/_assets/motion.js\""));
    }
}
