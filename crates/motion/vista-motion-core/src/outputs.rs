//! Output contract from the controller.
//!
//! Each controller entry point returns an [`Outputs`] holding only what the
//! host must do now: element changes, observer commands and semantic events.
//! `request_frame` tells the host to schedule another [`tick`] on the next
//! animation frame.
//!
//! [`tick`]: crate::MotionController::tick

use serde::{Deserialize, Serialize};

use crate::config::ObserverOptions;
use crate::ids::{ElementId, ObserverKind};

/// One mutation of one element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub element: ElementId,
    pub op: ChangeOp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeOp {
    AddClass { class: String },
    RemoveClass { class: String },
    SetAttribute { name: String, value: String },
    SetText { text: String },
    SetStyle { property: String, value: String },
}

/// Instructions for the host's viewport observers and scroll listener.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObserverCommand {
    /// Create the observer for `observer` with `options`; emitted once,
    /// before the first `Observe` for that observer.
    Create {
        observer: ObserverKind,
        options: ObserverOptions,
    },
    Observe {
        observer: ObserverKind,
        element: ElementId,
    },
    Unobserve {
        observer: ObserverKind,
        element: ElementId,
    },
    /// Drop the observer and every remaining observation.
    Disconnect { observer: ObserverKind },
    /// Start delivering scroll offsets (passive listener).
    AttachScroll,
    DetachScroll,
}

/// Discrete signals, for diagnostics and tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MotionEvent {
    RevealStarted { element: ElementId },
    RevealCompleted { element: ElementId },
    CounterStarted {
        element: ElementId,
        target: u64,
        duration_ms: f64,
    },
    CounterCompleted { element: ElementId },
    CounterSkipped { element: ElementId, text: String },
    ConfigWarning { element: ElementId, message: String },
    TornDown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    pub changes: Vec<Change>,
    pub observers: Vec<ObserverCommand>,
    pub events: Vec<MotionEvent>,
    pub request_frame: bool,
}

impl Outputs {
    pub fn clear(&mut self) {
        self.changes.clear();
        self.observers.clear();
        self.events.clear();
        self.request_frame = false;
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
            && self.observers.is_empty()
            && self.events.is_empty()
            && !self.request_frame
    }

    pub(crate) fn push(&mut self, element: ElementId, op: ChangeOp) {
        self.changes.push(Change { element, op });
    }

    /// Text changes for `element`, in emission order.
    pub fn texts_for(&self, element: ElementId) -> impl Iterator<Item = &str> {
        self.changes.iter().filter_map(move |c| match &c.op {
            ChangeOp::SetText { text } if c.element == element => Some(text.as_str()),
            _ => None,
        })
    }
}
