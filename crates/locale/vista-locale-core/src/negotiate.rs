//! `Accept-Language` negotiation.
//!
//! Matching is a case-insensitive substring test of each supported code
//! against the whole header value. Non-default locales are tried in declared
//! order and the first hit wins; when none match (or the header is absent) the
//! default locale is returned. A header naming the default locale therefore
//! resolves to it too, since that is the fallback.

use crate::locale::{Locale, LocaleSet};

pub fn preferred_locale<'a>(set: &'a LocaleSet, accept_language: Option<&str>) -> &'a Locale {
    let default = set.default_locale();
    let Some(header) = accept_language else {
        return default;
    };
    let header = header.to_ascii_lowercase();
    set.iter()
        .filter(|l| *l != default)
        .find(|l| header.contains(l.as_str()))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(header: Option<&str>) -> String {
        preferred_locale(&LocaleSet::default(), header).to_string()
    }

    #[test]
    fn absent_or_unrecognized_header_uses_default() {
        assert_eq!(pick(None), "en");
        assert_eq!(pick(Some("")), "en");
        assert_eq!(pick(Some("fr-FR,fr;q=0.9,de;q=0.5")), "en");
    }

    #[test]
    fn spanish_is_detected_case_insensitively() {
        assert_eq!(pick(Some("es")), "es");
        assert_eq!(pick(Some("ES-mx")), "es");
        assert_eq!(pick(Some("en-US,en;q=0.9,es;q=0.8")), "es");
    }

    #[test]
    fn english_header_resolves_to_english() {
        assert_eq!(pick(Some("en-GB,en;q=0.9")), "en");
    }

    #[test]
    fn declared_order_breaks_ties_between_non_defaults() {
        let set = LocaleSet::from_codes(&["en", "pt", "es"], "en").unwrap();
        assert_eq!(preferred_locale(&set, Some("es-ES,pt-BR")).as_str(), "pt");
        let set = LocaleSet::from_codes(&["en", "es", "pt"], "en").unwrap();
        assert_eq!(preferred_locale(&set, Some("es-ES,pt-BR")).as_str(), "es");
    }
}
