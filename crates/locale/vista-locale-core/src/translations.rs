//! Translation catalog.
//!
//! Each locale owns one JSON tree (one `<code>.json` file per locale). Keys are
//! dotted paths into that tree (`"hero.title"`, `"stats.0.label"`). Lookups
//! never fail: a missing locale resource or key falls back to the default
//! locale's tree, and a key missing there too is returned verbatim so that it
//! shows up in rendered output instead of breaking the page.

use std::path::Path;

use hashbrown::HashMap;
use serde_json::Value as JsonValue;

use crate::error::CatalogError;
use crate::locale::{Locale, LocaleSet};

#[derive(Debug, Clone)]
pub struct Catalog {
    default: Locale,
    trees: HashMap<String, JsonValue>,
}

impl Catalog {
    /// Empty catalog; every lookup returns the key until trees are inserted.
    pub fn new(default: Locale) -> Self {
        Self {
            default,
            trees: HashMap::new(),
        }
    }

    /// Insert (or replace) the tree for `locale`. The root must be an object.
    pub fn insert(&mut self, locale: &Locale, tree: JsonValue) -> Result<(), CatalogError> {
        if !tree.is_object() {
            return Err(CatalogError::NotAnObject(locale.to_string()));
        }
        self.trees.insert(locale.to_string(), tree);
        Ok(())
    }

    /// Load `<dir>/<code>.json` for every locale in `locales`.
    ///
    /// A missing file for a non-default locale is logged and skipped (lookups
    /// for it fall back to the default tree). The default locale's file is
    /// required.
    pub fn load_dir(dir: &Path, locales: &LocaleSet) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(locales.default_locale().clone());
        for locale in locales.iter() {
            let path = dir.join(format!("{locale}.json"));
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err)
                    if err.kind() == std::io::ErrorKind::NotFound
                        && locale != locales.default_locale() =>
                {
                    log::warn!(
                        "no translations for locale '{locale}' at {}; using '{}'",
                        path.display(),
                        locales.default_locale()
                    );
                    continue;
                }
                Err(source) => return Err(CatalogError::Io { path, source }),
            };
            let tree: JsonValue = serde_json::from_str(&raw)
                .map_err(|source| CatalogError::Parse {
                    path: path.clone(),
                    source,
                })?;
            catalog.insert(locale, tree)?;
            log::debug!("loaded translations for '{locale}' from {}", path.display());
        }
        Ok(catalog)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    pub fn has_locale(&self, code: &str) -> bool {
        self.trees.contains_key(code)
    }

    /// Translate `key` for `locale`, falling back to the default locale and
    /// finally to the key itself.
    pub fn t(&self, locale: &str, key: &str) -> String {
        self.trees
            .get(locale)
            .and_then(|tree| lookup(tree, key))
            .or_else(|| {
                self.trees
                    .get(self.default.as_str())
                    .and_then(|tree| lookup(tree, key))
            })
            .unwrap_or_else(|| key.to_string())
    }

    /// Bind the catalog to one locale, for template code.
    pub fn translator<'a>(&'a self, locale: &'a Locale) -> Translator<'a> {
        Translator {
            catalog: self,
            locale,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    locale: &'a Locale,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }

    pub fn t(&self, key: &str) -> String {
        self.catalog.t(self.locale.as_str(), key)
    }
}

/// Walk a dotted key through objects (by name) and arrays (by index).
/// Empty strings, objects, arrays and null count as missing.
fn lookup(tree: &JsonValue, key: &str) -> Option<String> {
    let mut node = tree;
    for seg in key.split('.') {
        node = match node {
            JsonValue::Object(map) => map.get(seg)?,
            JsonValue::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    match node {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_objects_and_arrays() {
        let tree = json!({
            "nav": { "home": "Home" },
            "stats": [ { "label": "Clients" } ],
            "years": 12,
            "empty": ""
        });
        assert_eq!(lookup(&tree, "nav.home").as_deref(), Some("Home"));
        assert_eq!(lookup(&tree, "stats.0.label").as_deref(), Some("Clients"));
        assert_eq!(lookup(&tree, "years").as_deref(), Some("12"));
        assert_eq!(lookup(&tree, "nav"), None);
        assert_eq!(lookup(&tree, "empty"), None);
        assert_eq!(lookup(&tree, "nav.home.deeper"), None);
        assert_eq!(lookup(&tree, "stats.x.label"), None);
    }

    #[test]
    fn insert_rejects_non_object_roots() {
        let mut catalog = Catalog::new(Locale::parse("en").unwrap());
        let err = catalog.insert(&Locale::parse("en").unwrap(), json!(["x"]));
        assert!(matches!(err, Err(CatalogError::NotAnObject(code)) if code == "en"));
    }
}
