//! Request path classification.
//!
//! Only page paths are localizable. Static files (anything whose last segment
//! carries an extension) and reserved namespaces pass through the router
//! untouched, whatever locale state the request is in.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Static asset, file or reserved namespace. Never redirected.
    Asset,
    /// A localizable page path.
    Page,
}

/// Classify `path` (without query string) against the reserved prefixes.
pub fn classify<S: AsRef<str>>(path: &str, reserved_prefixes: &[S]) -> PathClass {
    if has_extension(path)
        || reserved_prefixes
            .iter()
            .any(|p| matches_prefix(path, p.as_ref()))
    {
        PathClass::Asset
    } else {
        PathClass::Page
    }
}

/// First path segment, `None` for the root path.
///
/// `"/es/about"` yields `Some("es")`; `"/"` and `""` yield `None`.
pub fn first_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        return None;
    }
    rest.split('/').next()
}

/// True when the last segment has a non-empty suffix after a dot.
/// Trailing-slash paths are directories, never files.
fn has_extension(path: &str) -> bool {
    if path.ends_with('/') {
        return false;
    }
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rfind('.') {
        Some(dot) => dot + 1 < last.len(),
        None => false,
    }
}

/// Prefix match on a segment boundary: `/api` matches `/api`, `/api/x` and
/// `/api.json` but not `/apiary`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESERVED: &[&str] = &["/_assets", "/api", "/favicon", "/@vite"];

    #[test]
    fn files_with_extensions_are_assets() {
        assert_eq!(classify("/logo.svg", RESERVED), PathClass::Asset);
        assert_eq!(classify("/es/brochure.pdf", RESERVED), PathClass::Asset);
        assert_eq!(classify("/robots.txt", RESERVED), PathClass::Asset);
    }

    #[test]
    fn trailing_slash_and_bare_dots_are_pages() {
        assert_eq!(classify("/v1.2/", RESERVED), PathClass::Page);
        assert_eq!(classify("/about.", RESERVED), PathClass::Page);
        assert_eq!(classify("/about", RESERVED), PathClass::Page);
        assert_eq!(classify("/", RESERVED), PathClass::Page);
    }

    #[test]
    fn reserved_prefixes_match_on_segment_boundary() {
        assert_eq!(classify("/api", RESERVED), PathClass::Asset);
        assert_eq!(classify("/api/contact", RESERVED), PathClass::Asset);
        assert_eq!(classify("/_assets/app", RESERVED), PathClass::Asset);
        assert_eq!(classify("/favicon", RESERVED), PathClass::Asset);
        assert_eq!(classify("/@vite/client", RESERVED), PathClass::Asset);
        assert_eq!(classify("/apiary", RESERVED), PathClass::Page);
    }

    #[test]
    fn first_segment_extraction() {
        assert_eq!(first_segment("/"), None);
        assert_eq!(first_segment(""), None);
        assert_eq!(first_segment("/es"), Some("es"));
        assert_eq!(first_segment("/es/about/team"), Some("es"));
        assert_eq!(first_segment("//x"), Some(""));
    }
}
