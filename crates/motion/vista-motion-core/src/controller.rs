//! The motion controller: owns observer subscriptions, in-flight animations
//! and the parallax scroll guard for one page.
//!
//! Methods:
//! - register / register_stagger_group (attach elements, emit observe commands)
//! - on_intersections (trigger reveals and counters)
//! - on_scroll (coalesced parallax scheduling)
//! - tick (advance animations by one frame)
//! - unobserve / teardown (release subscriptions)
//!
//! Every method clears the previous [`Outputs`] and returns the new one.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::config::{MotionConfig, ObserverOptions};
use crate::counter::CounterAnimation;
use crate::element::{AnimationKind, ElementSource, ElementSpec};
use crate::error::MotionError;
use crate::ids::{ElementId, ObserverKind};
use crate::outputs::{ChangeOp, MotionEvent, ObserverCommand, Outputs};
use crate::parallax::{translate_y, ParallaxDriver};
use crate::phase::Phase;
use crate::reveal::{RevealAnimation, RevealOutput};

/// One visibility callback delivered by a host observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub observer: ObserverKind,
    pub element: ElementId,
    pub is_intersecting: bool,
}

/// What the host needs to construct one observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverSpec {
    pub observer: ObserverKind,
    pub options: ObserverOptions,
}

#[derive(Debug)]
struct Registered {
    spec: ElementSpec,
    text: Option<String>,
}

#[derive(Debug)]
struct ActiveReveal {
    element: ElementId,
    anim: RevealAnimation,
    triggered_at: f64,
}

#[derive(Debug)]
struct ActiveCounter {
    element: ElementId,
    anim: CounterAnimation,
    triggered_at: f64,
}

/// Observer bookkeeping. An element is observed by a kind iff it is in that
/// kind's set; commands are emitted only on actual transitions.
#[derive(Debug, Default)]
struct Subscriptions {
    created: Vec<ObserverKind>,
    observed: HashMap<ObserverKind, HashSet<ElementId>>,
}

impl Subscriptions {
    fn contains(&self, kind: ObserverKind, id: ElementId) -> bool {
        self.observed.get(&kind).is_some_and(|s| s.contains(&id))
    }

    fn observe(&mut self, kind: ObserverKind, id: ElementId, cfg: &MotionConfig, out: &mut Outputs) {
        if !self.created.contains(&kind) {
            self.created.push(kind);
            out.observers.push(ObserverCommand::Create {
                observer: kind,
                options: options_for(cfg, kind).clone(),
            });
        }
        if self.observed.entry(kind).or_default().insert(id) {
            log::debug!("observe element {} ({})", id.0, kind.name());
            out.observers.push(ObserverCommand::Observe {
                observer: kind,
                element: id,
            });
        }
    }

    fn unobserve(&mut self, kind: ObserverKind, id: ElementId, out: &mut Outputs) {
        if self.observed.get_mut(&kind).is_some_and(|s| s.remove(&id)) {
            out.observers.push(ObserverCommand::Unobserve {
                observer: kind,
                element: id,
            });
        }
    }

    fn disconnect_all(&mut self, out: &mut Outputs) {
        for kind in self.created.drain(..) {
            out.observers.push(ObserverCommand::Disconnect { observer: kind });
        }
        self.observed.clear();
    }
}

fn options_for(cfg: &MotionConfig, kind: ObserverKind) -> &ObserverOptions {
    match kind {
        ObserverKind::Reveal => &cfg.reveal,
        ObserverKind::Counter => &cfg.counter,
    }
}

#[derive(Debug)]
pub struct MotionController {
    cfg: MotionConfig,
    elements: HashMap<ElementId, Registered>,
    subscriptions: Subscriptions,
    reveals: Vec<ActiveReveal>,
    counters: Vec<ActiveCounter>,
    parallax: ParallaxDriver,
    scroll_attached: bool,
    torn_down: bool,
    outputs: Outputs,
}

impl MotionController {
    pub fn new(cfg: MotionConfig) -> Self {
        Self {
            cfg,
            elements: HashMap::new(),
            subscriptions: Subscriptions::default(),
            reveals: Vec::new(),
            counters: Vec::new(),
            parallax: ParallaxDriver::new(),
            scroll_attached: false,
            torn_down: false,
            outputs: Outputs::default(),
        }
    }

    /// Like [`MotionController::new`] but rejects invalid configuration.
    pub fn try_new(cfg: MotionConfig) -> Result<Self, MotionError> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    pub fn config(&self) -> &MotionConfig {
        &self.cfg
    }

    /// Observer construction parameters, one per observer kind.
    pub fn observer_specs(&self) -> Vec<ObserverSpec> {
        ObserverKind::ALL
            .into_iter()
            .map(|observer| ObserverSpec {
                observer,
                options: options_for(&self.cfg, observer).clone(),
            })
            .collect()
    }

    pub fn is_observing(&self, kind: ObserverKind, id: ElementId) -> bool {
        self.subscriptions.contains(kind, id)
    }

    /// Number of reveal and counter animations still needing frames.
    pub fn active_animations(&self) -> usize {
        self.reveals.len() + self.counters.len()
    }

    pub fn parallax(&self) -> &ParallaxDriver {
        &self.parallax
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Register (or re-register) an element from its dataset and text.
    pub fn register(&mut self, id: ElementId, source: &ElementSource) -> &Outputs {
        self.outputs.clear();
        if self.torn_down {
            return &self.outputs;
        }
        if self.elements.contains_key(&id) {
            self.release(id);
        }

        let (spec, warnings) = ElementSpec::from_dataset(&source.dataset, &self.cfg);
        for message in warnings {
            log::warn!("element {}: {message}", id.0);
            self.outputs
                .events
                .push(MotionEvent::ConfigWarning { element: id, message });
        }

        if spec.is_inert() && !spec.stagger_group {
            log::debug!("element {} carries no motion attributes", id.0);
        }
        if spec.stagger_group {
            log::debug!("element {} is a stagger container", id.0);
        }
        if spec.reveal.is_some() {
            self.subscriptions
                .observe(ObserverKind::Reveal, id, &self.cfg, &mut self.outputs);
        }
        if spec.counter_duration_ms.is_some() {
            self.subscriptions
                .observe(ObserverKind::Counter, id, &self.cfg, &mut self.outputs);
        }
        if let Some(speed) = spec.parallax_speed {
            self.parallax.add(id, speed);
            if !self.scroll_attached {
                self.scroll_attached = true;
                self.outputs.observers.push(ObserverCommand::AttachScroll);
            }
        }

        self.elements.insert(
            id,
            Registered {
                spec,
                text: source.text.clone(),
            },
        );
        &self.outputs
    }

    /// Assign cascading delays to the items of one stagger container, in
    /// document order, and observe each item for reveal. Unknown ids are
    /// registered as plain stagger items.
    pub fn register_stagger_group(&mut self, items: &[ElementId]) -> &Outputs {
        self.outputs.clear();
        if self.torn_down {
            return &self.outputs;
        }
        for (index, &id) in items.iter().enumerate() {
            let delay = format!("{}ms", index as f64 * self.cfg.stagger_step_ms);
            let registered = self.elements.entry(id).or_insert_with(|| Registered {
                spec: ElementSpec {
                    reveal: None,
                    animate_name: None,
                    stagger_item: true,
                    stagger_group: false,
                    counter_duration_ms: None,
                    parallax_speed: None,
                },
                text: None,
            });
            registered.spec.stagger_item = true;
            registered.spec.reveal.get_or_insert(AnimationKind::FadeIn);
            registered
                .spec
                .animate_name
                .get_or_insert_with(|| AnimationKind::FadeIn.as_str().to_string());

            for property in ["transition-delay", "animation-delay"] {
                self.outputs.push(
                    id,
                    ChangeOp::SetStyle {
                        property: property.to_string(),
                        value: delay.clone(),
                    },
                );
            }
            self.subscriptions
                .observe(ObserverKind::Reveal, id, &self.cfg, &mut self.outputs);
        }
        &self.outputs
    }

    /// Handle a batch of observer callbacks delivered at `now_ms`.
    pub fn on_intersections(&mut self, now_ms: f64, entries: &[IntersectionEntry]) -> &Outputs {
        self.outputs.clear();
        if self.torn_down {
            return &self.outputs;
        }
        for entry in entries {
            if !entry.is_intersecting
                || !self.subscriptions.contains(entry.observer, entry.element)
            {
                continue;
            }
            match entry.observer {
                ObserverKind::Reveal => self.trigger_reveal(entry.element, now_ms),
                ObserverKind::Counter => self.trigger_counter(entry.element, now_ms),
            }
        }
        self.outputs.request_frame = self.active_animations() > 0;
        &self.outputs
    }

    fn trigger_reveal(&mut self, id: ElementId, now_ms: f64) {
        if self.reveals.iter().any(|r| r.element == id) {
            return;
        }
        let kind = self
            .elements
            .get(&id)
            .and_then(|r| r.spec.reveal)
            .unwrap_or_default();
        let (anim, _prime) = RevealAnimation::trigger(kind);
        self.outputs.push(
            id,
            ChangeOp::AddClass {
                class: self.cfg.classes.initial.clone(),
            },
        );
        self.outputs
            .events
            .push(MotionEvent::RevealStarted { element: id });
        self.reveals.push(ActiveReveal {
            element: id,
            anim,
            triggered_at: now_ms,
        });
        if self.cfg.reveal_once {
            self.subscriptions
                .unobserve(ObserverKind::Reveal, id, &mut self.outputs);
        }
        log::debug!("reveal {} ({}) at {now_ms}", id.0, kind.as_str());
    }

    fn trigger_counter(&mut self, id: ElementId, now_ms: f64) {
        // Counters fire at most once: release the observation either way.
        self.subscriptions
            .unobserve(ObserverKind::Counter, id, &mut self.outputs);

        let Some(registered) = self.elements.get(&id) else {
            return;
        };
        let text = registered.text.clone().unwrap_or_default();
        let requested = registered
            .spec
            .counter_duration_ms
            .unwrap_or(self.cfg.counter_default_duration_ms);

        match CounterAnimation::from_text(&text, requested) {
            Some(anim) => {
                self.outputs.events.push(MotionEvent::CounterStarted {
                    element: id,
                    target: anim.target,
                    duration_ms: anim.duration_ms,
                });
                log::debug!(
                    "counter {} -> {}{} over {}ms",
                    id.0,
                    anim.target,
                    anim.suffix,
                    anim.duration_ms
                );
                self.counters.push(ActiveCounter {
                    element: id,
                    anim,
                    triggered_at: now_ms,
                });
            }
            None => {
                log::warn!("counter {}: no leading number in {text:?}, skipping", id.0);
                self.outputs
                    .events
                    .push(MotionEvent::CounterSkipped { element: id, text });
            }
        }
    }

    /// Record a scroll offset; `request_frame` is set only by the event that
    /// raised the pending flag.
    pub fn on_scroll(&mut self, offset: f64) -> &Outputs {
        self.outputs.clear();
        if self.torn_down {
            return &self.outputs;
        }
        self.outputs.request_frame = self.parallax.on_scroll(offset);
        &self.outputs
    }

    /// Advance every in-flight animation to `now_ms` and flush any pending
    /// parallax recomputation.
    pub fn tick(&mut self, now_ms: f64) -> &Outputs {
        self.outputs.clear();
        if self.torn_down {
            return &self.outputs;
        }

        let hold = self.cfg.initial_class_hold_ms;
        let mut reveals = std::mem::take(&mut self.reveals);
        for active in reveals.iter_mut() {
            let (anim, out) = active.anim.clone().advance(now_ms - active.triggered_at, hold);
            active.anim = anim;
            match out {
                Some(RevealOutput::Enter(kind)) => {
                    let value = self
                        .elements
                        .get(&active.element)
                        .and_then(|r| r.spec.animate_name.clone())
                        .unwrap_or_else(|| kind.as_str().to_string());
                    self.outputs.push(
                        active.element,
                        ChangeOp::AddClass {
                            class: self.cfg.classes.enter.clone(),
                        },
                    );
                    self.outputs.push(
                        active.element,
                        ChangeOp::SetAttribute {
                            name: "data-animate".into(),
                            value,
                        },
                    );
                }
                Some(RevealOutput::Settle) => {
                    self.outputs.push(
                        active.element,
                        ChangeOp::RemoveClass {
                            class: self.cfg.classes.initial.clone(),
                        },
                    );
                    self.outputs.events.push(MotionEvent::RevealCompleted {
                        element: active.element,
                    });
                }
                Some(RevealOutput::Prime) | None => {}
            }
        }
        reveals.retain(|r| r.anim.phase.is_active());
        self.reveals = reveals;

        let mut counters = std::mem::take(&mut self.counters);
        for active in counters.iter_mut() {
            let (anim, text) = active.anim.clone().advance(now_ms - active.triggered_at);
            active.anim = anim;
            if let Some(text) = text {
                self.outputs.push(active.element, ChangeOp::SetText { text });
            }
            if active.anim.phase == Phase::Complete {
                log::debug!("counter {} {}", active.element.0, active.anim.phase.name());
                self.outputs.events.push(MotionEvent::CounterCompleted {
                    element: active.element,
                });
            }
        }
        counters.retain(|c| c.anim.phase.is_active());
        self.counters = counters;

        if let Some(frame) = self.parallax.on_frame() {
            for (id, px) in frame {
                self.outputs.push(
                    id,
                    ChangeOp::SetStyle {
                        property: "transform".into(),
                        value: translate_y(px),
                    },
                );
            }
        }

        self.outputs.request_frame = self.active_animations() > 0;
        &self.outputs
    }

    /// Stop observing `id`. Animations already started run to completion.
    pub fn unobserve(&mut self, id: ElementId) -> &Outputs {
        self.outputs.clear();
        if !self.torn_down {
            for kind in ObserverKind::ALL {
                self.subscriptions.unobserve(kind, id, &mut self.outputs);
            }
        }
        &self.outputs
    }

    /// Release every subscription and listener and drop pending work. The
    /// controller ignores all input afterwards.
    pub fn teardown(&mut self) -> &Outputs {
        self.outputs.clear();
        if self.torn_down {
            return &self.outputs;
        }
        self.subscriptions.disconnect_all(&mut self.outputs);
        if self.scroll_attached {
            self.scroll_attached = false;
            self.outputs.observers.push(ObserverCommand::DetachScroll);
        }
        self.reveals.clear();
        self.counters.clear();
        self.parallax.clear();
        self.elements.clear();
        self.torn_down = true;
        self.outputs.events.push(MotionEvent::TornDown);
        log::debug!("motion controller torn down");
        &self.outputs
    }

    /// Drop an element's observations, parallax entry and in-flight work
    /// before it is re-registered.
    fn release(&mut self, id: ElementId) {
        for kind in ObserverKind::ALL {
            self.subscriptions.unobserve(kind, id, &mut self.outputs);
        }
        self.parallax.remove(id);
        self.reveals.retain(|r| r.element != id);
        self.counters.retain(|c| c.element != id);
        self.elements.remove(&id);
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal_source() -> ElementSource {
        ElementSource::new([("animate", "fadeUp")])
    }

    #[test]
    fn observer_is_created_once() {
        let mut ctl = MotionController::default();
        let out = ctl.register(ElementId(1), &reveal_source()).clone();
        assert_eq!(
            out.observers,
            vec![
                ObserverCommand::Create {
                    observer: ObserverKind::Reveal,
                    options: ObserverOptions::reveal_default(),
                },
                ObserverCommand::Observe {
                    observer: ObserverKind::Reveal,
                    element: ElementId(1),
                },
            ]
        );
        let out = ctl.register(ElementId(2), &reveal_source());
        assert_eq!(
            out.observers,
            vec![ObserverCommand::Observe {
                observer: ObserverKind::Reveal,
                element: ElementId(2),
            }]
        );
    }

    #[test]
    fn inert_elements_are_not_observed() {
        let mut ctl = MotionController::default();
        let out = ctl.register(ElementId(1), &ElementSource::new([("title", "x")]));
        assert!(out.is_empty());
        assert!(!ctl.is_observing(ObserverKind::Reveal, ElementId(1)));
    }

    #[test]
    fn reregister_replaces_previous_subscriptions() {
        let mut ctl = MotionController::default();
        ctl.register(ElementId(1), &reveal_source());
        let out = ctl
            .register(ElementId(1), &ElementSource::new([("parallax", "0.2")]))
            .clone();
        assert!(out.observers.contains(&ObserverCommand::Unobserve {
            observer: ObserverKind::Reveal,
            element: ElementId(1),
        }));
        assert!(out.observers.contains(&ObserverCommand::AttachScroll));
        assert!(!ctl.is_observing(ObserverKind::Reveal, ElementId(1)));
    }

    #[test]
    fn try_new_rejects_bad_threshold() {
        let mut cfg = MotionConfig::default();
        cfg.counter.threshold = 2.0;
        assert!(matches!(
            MotionController::try_new(cfg),
            Err(MotionError::Threshold(_))
        ));
    }

    #[test]
    fn observer_specs_follow_config() {
        let ctl = MotionController::default();
        let specs = ctl.observer_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].observer, ObserverKind::Reveal);
        assert_eq!(specs[0].options.root_margin, "0px 0px -100px 0px");
        assert_eq!(specs[1].options.threshold, 0.5);
    }
}
