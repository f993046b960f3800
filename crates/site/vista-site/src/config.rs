//! Site configuration (TOML).
//!
//! Every field is optional. Relative directories are resolved against the
//! directory containing the config file.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vista_locale_core::RouterConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Directory holding one `<locale>.json` translation tree per locale.
    pub i18n_dir: PathBuf,
    /// Directory served under `/_assets`.
    pub static_dir: PathBuf,
    /// Locale routing (`[locales]` table).
    pub locales: RouterConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            i18n_dir: PathBuf::from("i18n"),
            static_dir: PathBuf::from("static"),
            locales: RouterConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&raw, base)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(raw: &str, base: &Path) -> Result<Self> {
        let mut cfg: SiteConfig = toml::from_str(raw)?;
        cfg.i18n_dir = resolve(base, &cfg.i18n_dir);
        cfg.static_dir = resolve(base, &cfg.static_dir);
        Ok(cfg)
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = SiteConfig::from_toml_str("", Path::new("")).unwrap();
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn relative_dirs_resolve_against_config_dir() {
        let raw = r#"
            bind = "0.0.0.0:3000"
            i18n_dir = "translations"
            static_dir = "/srv/static"

            [locales]
            default = "es"
            redirect_status = 302
        "#;
        let cfg = SiteConfig::from_toml_str(raw, Path::new("/etc/vista")).unwrap();
        assert_eq!(cfg.bind.port(), 3000);
        assert_eq!(cfg.i18n_dir, PathBuf::from("/etc/vista/translations"));
        assert_eq!(cfg.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(cfg.locales.default, "es");
        assert_eq!(cfg.locales.supported, vec!["en".to_string(), "es".to_string()]);
        assert_eq!(cfg.locales.redirect_status, 302);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(SiteConfig::from_toml_str("bind = 12", Path::new("")).is_err());
    }
}
