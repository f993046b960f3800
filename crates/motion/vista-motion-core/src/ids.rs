//! Identifiers for observed elements and the controller's observers.

use serde::{Deserialize, Serialize};

/// Host-assigned handle for one DOM element. Opaque to the controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// The controller owns one viewport observer per kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverKind {
    /// Reveal and stagger-item animations.
    Reveal,
    /// Numeric counters.
    Counter,
}

impl ObserverKind {
    pub const ALL: [ObserverKind; 2] = [ObserverKind::Reveal, ObserverKind::Counter];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Counter => "counter",
        }
    }
}
