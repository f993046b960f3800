//! Reveal-on-scroll state machine.
//!
//! Entering the viewport primes the element with the initial class. The next
//! frame adds the enter class and stamps `data-animate` with the kind; once
//! the hold time has passed the initial class is removed, letting the CSS
//! transition run from the primed state.

use serde::{Deserialize, Serialize};

use crate::element::AnimationKind;
use crate::phase::Phase;

/// Visual effect produced by one reveal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutput {
    /// Add the initial class.
    Prime,
    /// Add the enter class and set `data-animate`.
    Enter(AnimationKind),
    /// Remove the initial class.
    Settle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealAnimation {
    pub phase: Phase,
    pub kind: AnimationKind,
    /// Elapsed time (since trigger) at which the enter class landed.
    pub entered_at_ms: Option<f64>,
}

impl RevealAnimation {
    /// Start a reveal; the returned output must be applied immediately.
    pub fn trigger(kind: AnimationKind) -> (Self, RevealOutput) {
        (
            Self {
                phase: Phase::Pending,
                kind,
                entered_at_ms: None,
            },
            RevealOutput::Prime,
        )
    }

    /// Pure step with the time elapsed since trigger.
    pub fn advance(self, elapsed_ms: f64, hold_ms: f64) -> (Self, Option<RevealOutput>) {
        match self.phase {
            Phase::Pending => {
                let kind = self.kind;
                (
                    Self {
                        phase: Phase::Running,
                        entered_at_ms: Some(elapsed_ms),
                        ..self
                    },
                    Some(RevealOutput::Enter(kind)),
                )
            }
            Phase::Running => {
                let entered = self.entered_at_ms.unwrap_or(elapsed_ms);
                if elapsed_ms - entered >= hold_ms {
                    (
                        Self {
                            phase: Phase::Complete,
                            ..self
                        },
                        Some(RevealOutput::Settle),
                    )
                } else {
                    (self, None)
                }
            }
            Phase::Complete => (self, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sequence() {
        let (anim, out) = RevealAnimation::trigger(AnimationKind::FadeUp);
        assert_eq!(out, RevealOutput::Prime);
        assert_eq!(anim.phase, Phase::Pending);

        let (anim, out) = anim.advance(16.0, 10.0);
        assert_eq!(out, Some(RevealOutput::Enter(AnimationKind::FadeUp)));
        assert_eq!(anim.phase, Phase::Running);

        let (anim, out) = anim.advance(20.0, 10.0);
        assert_eq!(out, None);
        assert_eq!(anim.phase, Phase::Running);

        let (anim, out) = anim.advance(26.0, 10.0);
        assert_eq!(out, Some(RevealOutput::Settle));
        assert_eq!(anim.phase, Phase::Complete);

        let (anim, out) = anim.advance(100.0, 10.0);
        assert_eq!(out, None);
        assert_eq!(anim.phase, Phase::Complete);
    }

    #[test]
    fn enter_always_waits_one_frame() {
        let (anim, _) = RevealAnimation::trigger(AnimationKind::FadeIn);
        // Even with zero hold the enter and settle land on separate frames.
        let (anim, out) = anim.advance(0.0, 0.0);
        assert!(matches!(out, Some(RevealOutput::Enter(_))));
        let (_, out) = anim.advance(0.0, 0.0);
        assert_eq!(out, Some(RevealOutput::Settle));
    }
}
