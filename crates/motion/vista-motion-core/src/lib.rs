//! vista-motion-core: viewport-driven animation controller (engine-agnostic)
//!
//! The controller never touches a DOM. Hosts (the wasm adapter, tests) feed it
//! element registrations, intersection entries, scroll offsets and frame
//! timestamps; every entry point returns an [`Outputs`] describing the class,
//! attribute, text and style changes to apply plus the observer commands to
//! execute.

pub mod config;
pub mod controller;
pub mod counter;
pub mod easing;
pub mod element;
pub mod error;
pub mod ids;
pub mod outputs;
pub mod parallax;
pub mod phase;
pub mod reveal;

pub use config::{MotionConfig, ObserverOptions, RevealClasses};
pub use controller::{IntersectionEntry, MotionController, ObserverSpec};
pub use counter::{counter_duration_ms, parse_counter_text, CounterAnimation, CounterText};
pub use easing::ease_out_quart;
pub use element::{AnimationKind, Dataset, ElementSource, ElementSpec};
pub use error::MotionError;
pub use ids::{ElementId, ObserverKind};
pub use outputs::{Change, ChangeOp, MotionEvent, ObserverCommand, Outputs};
pub use parallax::{parallax_translation, ParallaxDriver};
pub use phase::Phase;
pub use reveal::RevealAnimation;
