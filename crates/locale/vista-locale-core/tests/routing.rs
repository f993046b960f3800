use vista_locale_core::{
    LocaleState, RedirectStatus, RouteDecision, Router, RouterConfig,
};

fn redirect_location(decision: &RouteDecision) -> &str {
    match decision {
        RouteDecision::Redirect(r) => &r.location,
        other => panic!("expected redirect, got {other:?}"),
    }
}

#[test]
fn root_redirects_to_preferred_locale_home() {
    let router = Router::default();
    let d = router.route("/", None, None);
    assert_eq!(redirect_location(&d), "/en/");

    let d = router.route("/", None, Some("es-ES,es;q=0.9"));
    assert_eq!(redirect_location(&d), "/es/");
    if let RouteDecision::Redirect(r) = d {
        assert_eq!(r.status, RedirectStatus::Temporary);
        assert_eq!(r.status.code(), 307);
        assert_eq!(r.locale.as_str(), "es");
    }
}

#[test]
fn unprefixed_pages_get_exactly_one_locale_prefix() {
    let router = Router::default();
    for path in ["/about", "/pricing/", "/de/about", "/EN/contact", "/blog/2024/post"] {
        let d = router.route(path, None, Some("en-US"));
        let location = redirect_location(&d);
        assert_eq!(location, format!("/en{path}"));
        let prefixes = router
            .locales()
            .iter()
            .filter(|l| location.starts_with(&format!("/{l}/")))
            .count();
        assert_eq!(prefixes, 1, "{location} must carry one locale prefix");
    }
}

#[test]
fn prefixed_pages_pass_through_and_resolve() {
    let router = Router::default();
    for (path, code) in [("/en/", "en"), ("/es", "es"), ("/es/about/team", "es")] {
        let d = router.route(path, None, Some("es"));
        assert!(d.is_pass_through());
        assert_eq!(d.locale().map(|l| l.as_str()), Some(code));
        assert!(matches!(LocaleState::from(&d), LocaleState::Resolved(_)));
    }
}

#[test]
fn assets_are_never_redirected() {
    let router = Router::default();
    for path in [
        "/favicon.ico",
        "/favicon.svg",
        "/_assets/index.abc123.js",
        "/_assets/fonts",
        "/api/contact",
        "/@vite/client",
        "/_static/logo",
        "/_static",
        "/@fs/home/site/src/main",
        "/__sourcemaps/app",
        "/images/hero.webp",
        "/es/brochure.pdf",
        "/bundle.js.map",
    ] {
        for header in [None, Some("es"), Some("fr")] {
            assert_eq!(router.route(path, None, header), RouteDecision::Asset, "{path}");
        }
    }
}

#[test]
fn redirect_targets_are_idempotent() {
    let router = Router::default();
    let headers = [None, Some("es-MX"), Some("EN-us"), Some("ja"), Some("")];
    let paths = ["/", "", "/about", "/x/y/z/", "/ES", "//double", "/apiary"];
    for header in headers {
        for path in paths {
            let d = router.route(path, Some("ref=nav"), header);
            let location = redirect_location(&d);
            let (target_path, target_query) = location
                .split_once('?')
                .map_or((location, None), |(p, q)| (p, Some(q)));
            assert_eq!(target_query, Some("ref=nav"));
            let again = router.route(target_path, target_query, header);
            assert!(
                again.is_pass_through(),
                "{path} -> {location} redirected again: {again:?}"
            );
        }
    }
}

#[test]
fn configured_status_and_prefixes_apply() {
    let cfg = RouterConfig {
        supported: vec!["en".into(), "es".into(), "pt".into()],
        default: "es".into(),
        redirect_status: 302,
        reserved_prefixes: vec!["/internal".into()],
    };
    let router = Router::new(&cfg).unwrap();
    assert_eq!(router.route("/internal/health", None, None), RouteDecision::Asset);
    // Without the default list, /api is just another page.
    match router.route("/api", None, Some("pt-BR")) {
        RouteDecision::Redirect(r) => {
            assert_eq!(r.location, "/pt/api");
            assert_eq!(r.status.code(), 302);
        }
        other => panic!("unexpected {other:?}"),
    }
    match router.route("/", None, Some("en-GB")) {
        RouteDecision::Redirect(r) => assert_eq!(r.location, "/en/"),
        other => panic!("unexpected {other:?}"),
    }
    match router.route("/", None, None) {
        RouteDecision::Redirect(r) => assert_eq!(r.location, "/es/"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn router_config_deserializes_with_defaults() {
    let cfg: RouterConfig = serde_json::from_str(r#"{ "redirect_status": 308 }"#).unwrap();
    assert_eq!(cfg.supported, vec!["en".to_string(), "es".to_string()]);
    assert_eq!(cfg.default, "en");
    let router = Router::new(&cfg).unwrap();
    assert_eq!(router.redirect_status(), RedirectStatus::Permanent);
}
