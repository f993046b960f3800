//! Typed element configuration parsed from data attributes.
//!
//! Hosts pass an element's `dataset` map (keys as the DOM exposes them:
//! `animate`, `stagger`, `staggerItem`, `parallax`, `counter`,
//! `counterDuration`). Parsing happens once at registration and never fails:
//! malformed values fall back to defaults and are reported as warnings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::counter::parse_leading_digits;

pub type Dataset = BTreeMap<String, String>;

pub const ATTR_ANIMATE: &str = "animate";
pub const ATTR_STAGGER: &str = "stagger";
pub const ATTR_STAGGER_ITEM: &str = "staggerItem";
pub const ATTR_PARALLAX: &str = "parallax";
pub const ATTR_COUNTER: &str = "counter";
pub const ATTR_COUNTER_DURATION: &str = "counterDuration";

/// What the host knows about an element at registration time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSource {
    #[serde(default)]
    pub dataset: Dataset,
    /// Text content; only read for counters.
    #[serde(default)]
    pub text: Option<String>,
}

impl ElementSource {
    pub fn new<K, V>(attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            dataset: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Recognized `data-animate` values. The value is echoed back onto the
/// element when it enters so CSS can select on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    #[default]
    FadeIn,
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    ZoomIn,
    SlideUp,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 7] = [
        Self::FadeIn,
        Self::FadeUp,
        Self::FadeDown,
        Self::FadeLeft,
        Self::FadeRight,
        Self::ZoomIn,
        Self::SlideUp,
    ];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::FadeUp => "fadeUp",
            Self::FadeDown => "fadeDown",
            Self::FadeLeft => "fadeLeft",
            Self::FadeRight => "fadeRight",
            Self::ZoomIn => "zoomIn",
            Self::SlideUp => "slideUp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementSpec {
    /// Reveal animation, if the element is flagged with `data-animate` or is
    /// a stagger item.
    pub reveal: Option<AnimationKind>,
    /// Value stamped back into `data-animate` when the reveal enters. Keeps
    /// the author's string, so custom CSS animations survive.
    pub animate_name: Option<String>,
    pub stagger_item: bool,
    pub stagger_group: bool,
    /// Requested counter duration (before magnitude capping), if a counter.
    pub counter_duration_ms: Option<u32>,
    /// Parallax speed factor, if flagged.
    pub parallax_speed: Option<f64>,
}

impl ElementSpec {
    /// Parse a dataset. Returns the parsed config plus human-readable warnings for
    /// every value that had to fall back to a default.
    pub fn from_dataset(dataset: &Dataset, cfg: &MotionConfig) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let stagger_item = dataset.contains_key(ATTR_STAGGER_ITEM);
        let (reveal, animate_name) = match dataset.get(ATTR_ANIMATE).map(String::as_str) {
            Some("") => (Some(AnimationKind::FadeIn), AnimationKind::FadeIn.as_str().to_string()),
            Some(raw) => {
                let kind = AnimationKind::parse(raw).unwrap_or_else(|| {
                    log::debug!("custom data-animate '{raw}', reveal timing follows fadeIn");
                    AnimationKind::FadeIn
                });
                (Some(kind), raw.to_string())
            }
            None if stagger_item => (Some(AnimationKind::FadeIn), AnimationKind::FadeIn.as_str().to_string()),
            None => (None, String::new()),
        };
        let animate_name = reveal.map(|_| animate_name);

        let counter_duration_ms = if dataset.contains_key(ATTR_COUNTER) {
            let requested = match dataset.get(ATTR_COUNTER_DURATION) {
                None => cfg.counter_default_duration_ms,
                Some(raw) => match parse_leading_digits(raw.trim()) {
                    Some((ms, _)) => u32::try_from(ms).unwrap_or(u32::MAX),
                    None => {
                        warnings.push(format!(
                            "malformed data-counter-duration '{raw}', using {}",
                            cfg.counter_default_duration_ms
                        ));
                        cfg.counter_default_duration_ms
                    }
                },
            };
            Some(requested)
        } else {
            None
        };

        let parallax_speed = dataset.get(ATTR_PARALLAX).map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return cfg.parallax_default_speed;
            }
            match raw.parse::<f64>() {
                Ok(speed) if speed.is_finite() => speed,
                _ => {
                    warnings.push(format!(
                        "malformed data-parallax '{raw}', using {}",
                        cfg.parallax_default_speed
                    ));
                    cfg.parallax_default_speed
                }
            }
        });

        let spec = Self {
            reveal,
            animate_name,
            stagger_item,
            stagger_group: dataset.contains_key(ATTR_STAGGER),
            counter_duration_ms,
            parallax_speed,
        };
        (spec, warnings)
    }

    /// True when the element takes part in no animation at all.
    pub fn is_inert(&self) -> bool {
        self.reveal.is_none() && self.counter_duration_ms.is_none() && self.parallax_speed.is_none()
    }
}
