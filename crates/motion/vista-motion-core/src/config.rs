//! Controller configuration.
//!
//! Deserializable from partial JSON; every field falls back to the documented
//! default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Options handed to the host when it creates a viewport observer.
///
/// Both fields are required when the object is given; an omitted object takes
/// the per-observer default from [`MotionConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Visible fraction of the element required to count as intersecting.
    pub threshold: f64,
    /// CSS margin applied to the viewport (`top right bottom left`).
    pub root_margin: String,
}

impl ObserverOptions {
    pub fn reveal_default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -100px 0px".into(),
        }
    }

    pub fn counter_default() -> Self {
        Self {
            threshold: 0.5,
            root_margin: "0px".into(),
        }
    }
}

/// Class names toggled by reveal animations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealClasses {
    /// Applied when the element is first seen; removed shortly after entry.
    pub initial: String,
    /// Applied on the frame after the element is seen.
    pub enter: String,
}

impl Default for RevealClasses {
    fn default() -> Self {
        Self {
            initial: "animate-out".into(),
            enter: "animate-in".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub reveal: ObserverOptions,
    /// Stop observing an element after its first reveal.
    pub reveal_once: bool,
    pub counter: ObserverOptions,
    /// Delay added per stagger item index.
    pub stagger_step_ms: f64,
    /// Counter duration when `data-counter-duration` is absent.
    pub counter_default_duration_ms: u32,
    /// Speed used when `data-parallax` is empty or malformed.
    pub parallax_default_speed: f64,
    /// How long the initial class stays on after the enter class lands.
    pub initial_class_hold_ms: f64,
    pub classes: RevealClasses,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal: ObserverOptions::reveal_default(),
            reveal_once: true,
            counter: ObserverOptions::counter_default(),
            stagger_step_ms: 100.0,
            counter_default_duration_ms: 2000,
            parallax_default_speed: 0.5,
            initial_class_hold_ms: 10.0,
            classes: RevealClasses::default(),
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        for opts in [&self.reveal, &self.counter] {
            if !(0.0..=1.0).contains(&opts.threshold) {
                return Err(MotionError::Threshold(opts.threshold));
            }
        }
        for (field, value) in [
            ("stagger_step_ms", self.stagger_step_ms),
            ("initial_class_hold_ms", self.initial_class_hold_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MotionError::NonNegative { field, value });
            }
        }
        if !self.parallax_default_speed.is_finite() {
            return Err(MotionError::NonNegative {
                field: "parallax_default_speed",
                value: self.parallax_default_speed,
            });
        }
        for (which, class) in [
            ("initial", &self.classes.initial),
            ("enter", &self.classes.enter),
        ] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(MotionError::ClassName(which));
            }
        }
        Ok(())
    }
}
