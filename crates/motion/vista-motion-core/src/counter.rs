//! Animated numeric counters.
//!
//! A counter element's text is a leading run of digits plus an arbitrary
//! suffix (`"99+"`, `"40%"`, `"12"`). Once visible it counts from 0 to the
//! target with an ease-out quartic curve, re-appending the suffix on every
//! frame and snapping to the exact target at the end.

use serde::{Deserialize, Serialize};

use crate::easing::ease_out_quart;
use crate::phase::Phase;

/// Leading ASCII digit run of `s` and the remainder. `None` when `s` does not
/// start with a digit. Values too large for `u64` saturate.
pub(crate) fn parse_leading_digits(s: &str) -> Option<(u64, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse::<u64>().unwrap_or(u64::MAX);
    Some((value, &s[end..]))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterText {
    pub value: u64,
    pub suffix: String,
}

/// Split counter text into value and suffix. Surrounding whitespace is
/// ignored; text without leading digits parses as value 0 with no suffix.
pub fn parse_counter_text(text: &str) -> CounterText {
    match parse_leading_digits(text.trim()) {
        Some((value, suffix)) => CounterText {
            value,
            suffix: suffix.to_string(),
        },
        None => CounterText {
            value: 0,
            suffix: String::new(),
        },
    }
}

/// Pick a duration for `value`: small numbers count faster. `requested_ms` is
/// the configured or per-element duration and acts as an upper bound.
pub fn counter_duration_ms(value: u64, requested_ms: u32) -> u32 {
    let cap = if value <= 5 {
        600
    } else if value <= 20 {
        800
    } else {
        value.saturating_mul(50).min(2000) as u32
    };
    requested_ms.min(cap)
}

/// Counter state machine. Drive it with [`CounterAnimation::advance`] using
/// the time elapsed since the counter was triggered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterAnimation {
    pub phase: Phase,
    pub target: u64,
    pub suffix: String,
    pub duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, suffix: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            phase: Phase::Pending,
            target,
            suffix: suffix.into(),
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// Build from element text, or `None` when the text has no positive
    /// leading number (the counter is skipped).
    pub fn from_text(text: &str, requested_ms: u32) -> Option<Self> {
        let CounterText { value, suffix } = parse_counter_text(text);
        if value == 0 {
            return None;
        }
        Some(Self::new(
            value,
            suffix,
            counter_duration_ms(value, requested_ms) as f64,
        ))
    }

    /// Fraction of the duration elapsed, clamped to `[0, 1]`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Pure step: returns the next state and the text to display, if any.
    /// A completed counter yields no further output.
    pub fn advance(self, elapsed_ms: f64) -> (Self, Option<String>) {
        if self.phase == Phase::Complete {
            return (self, None);
        }
        let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        let progress = self.progress(elapsed_ms);
        if progress < 1.0 {
            let current = (self.target as f64 * ease_out_quart(progress)).floor() as u64;
            let text = format!("{current}{}", self.suffix);
            (
                Self {
                    phase: Phase::Running,
                    ..self
                },
                Some(text),
            )
        } else {
            let text = format!("{}{}", self.target, self.suffix);
            (
                Self {
                    phase: Phase::Complete,
                    ..self
                },
                Some(text),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_value_and_suffix() {
        assert_eq!(
            parse_counter_text("99+"),
            CounterText {
                value: 99,
                suffix: "+".into()
            }
        );
        assert_eq!(parse_counter_text("40%").suffix, "%");
        assert_eq!(parse_counter_text(" 12 \n").value, 12);
        assert_eq!(parse_counter_text("007").value, 7);
        assert_eq!(parse_counter_text("10k clients").suffix, "k clients");
    }

    #[test]
    fn text_without_leading_digits_is_zero() {
        assert_eq!(
            parse_counter_text("no-number"),
            CounterText {
                value: 0,
                suffix: String::new()
            }
        );
        assert_eq!(parse_counter_text("").value, 0);
        assert_eq!(parse_counter_text("+99").value, 0);
        assert!(CounterAnimation::from_text("no-number", 2000).is_none());
        assert!(CounterAnimation::from_text("0+", 2000).is_none());
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(parse_counter_text("99999999999999999999999").value, u64::MAX);
        assert_eq!(counter_duration_ms(u64::MAX, 5000), 2000);
    }

    #[test]
    fn duration_by_magnitude() {
        assert_eq!(counter_duration_ms(3, 2000), 600);
        assert_eq!(counter_duration_ms(5, 2000), 600);
        assert_eq!(counter_duration_ms(15, 2000), 800);
        assert_eq!(counter_duration_ms(20, 2000), 800);
        assert_eq!(counter_duration_ms(21, 2000), 1050);
        assert_eq!(counter_duration_ms(100, 2000), 2000);
        // Override only ever shortens.
        assert_eq!(counter_duration_ms(100, 500), 500);
        assert_eq!(counter_duration_ms(3, 5000), 600);
    }

    #[test]
    fn advance_runs_to_exact_target() {
        let anim = CounterAnimation::from_text("99+", 2000).unwrap();
        assert_eq!(anim.duration_ms, 2000.0);

        let (anim, text) = anim.advance(0.0);
        assert_eq!(anim.phase, Phase::Running);
        assert_eq!(text.as_deref(), Some("0+"));

        let (anim, text) = anim.advance(1000.0);
        // 99 * 0.9375 = 92.8 -> 92
        assert_eq!(text.as_deref(), Some("92+"));

        let (anim, text) = anim.advance(2500.0);
        assert_eq!(anim.phase, Phase::Complete);
        assert_eq!(text.as_deref(), Some("99+"));

        let (anim, text) = anim.advance(3000.0);
        assert_eq!(anim.phase, Phase::Complete);
        assert_eq!(text, None);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let (anim, text) = CounterAnimation::new(7, "", 0.0).advance(0.0);
        assert_eq!(anim.phase, Phase::Complete);
        assert_eq!(text.as_deref(), Some("7"));
    }

    #[test]
    fn negative_or_nan_elapsed_is_treated_as_start() {
        let anim = CounterAnimation::new(50, "%", 1000.0);
        assert_eq!(anim.clone().advance(-16.0).1.as_deref(), Some("0%"));
        assert_eq!(anim.advance(f64::NAN).1.as_deref(), Some("0%"));
    }
}
