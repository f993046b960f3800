//! vista-site: HTTP server for the localized marketing site.
//!
//! Request flow: tracing span → locale router (`vista-locale-axum`) → static
//! assets under `/_assets`, the `/api` namespace, or the localized page shell.

pub mod config;
pub mod pages;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use axum::routing::get;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use vista_locale_core::{Catalog, LocaleSet, Router};

pub use config::SiteConfig;

/// Shared, read-only state for page handlers.
#[derive(Debug)]
pub struct SiteState {
    pub catalog: Catalog,
    pub locales: LocaleSet,
}

/// Build the full application from a config.
pub fn build_app(cfg: &SiteConfig) -> Result<axum::Router> {
    let router = Router::new(&cfg.locales).context("invalid [locales] configuration")?;
    let catalog = Catalog::load_dir(&cfg.i18n_dir, router.locales())
        .context("failed to load translations")?;
    let state = Arc::new(SiteState {
        catalog,
        locales: router.locales().clone(),
    });

    let app = axum::Router::new()
        .route("/api/health", get(health))
        .nest_service("/_assets", ServeDir::new(&cfg.static_dir))
        .fallback(pages::render_page)
        .with_state(state);

    Ok(vista_locale_axum::layer(app, Arc::new(router)).layer(TraceLayer::new_for_http()))
}

async fn health() -> &'static str {
    "ok"
}

/// Install the global tracing subscriber.
///
/// `LOG_FORMAT=json` selects JSON output, anything else pretty output; the
/// filter comes from `RUST_LOG` (default `info`). Returns an error if a global
/// subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let result = match format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init(),
    };
    result.map_err(|e| anyhow!("tracing init failed: {e}"))
}
