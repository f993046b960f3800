use serde::{Deserialize, Serialize};

/// Lifecycle shared by the reveal and counter state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Triggered, no frame advanced yet.
    Pending,
    /// At least one frame applied, not finished.
    Running,
    /// Final output applied; further advances are no-ops.
    Complete,
}

impl Phase {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }

    /// True while the animation still needs frames.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Complete)
    }
}
