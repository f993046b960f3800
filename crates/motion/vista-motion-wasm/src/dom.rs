//! Browser driver: binds a [`MotionController`] to the live document.
//!
//! [`start`] scans the page for motion attributes, registers every element
//! with the controller and then executes whatever the controller asks for:
//! observer commands become `IntersectionObserver` calls, `AttachScroll`
//! installs a passive scroll listener, `request_frame` schedules a
//! `requestAnimationFrame`, and element changes are written to the DOM.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use vista_motion_core::element::{
    ATTR_ANIMATE, ATTR_COUNTER, ATTR_COUNTER_DURATION, ATTR_PARALLAX, ATTR_STAGGER,
    ATTR_STAGGER_ITEM,
};
use vista_motion_core::{
    ChangeOp, ElementId, ElementSource, IntersectionEntry, MotionController, ObserverCommand,
    ObserverKind, ObserverOptions, Outputs,
};

use crate::parse_config;

/// Attribute holding the controller id assigned to a bound element.
pub const ID_ATTR: &str = "data-motion-id";

const SELECTOR: &str = "[data-animate], [data-stagger-item], [data-counter], [data-parallax]";

/// DOM attribute name paired with its `dataset` key.
const DATA_ATTRS: [(&str, &str); 6] = [
    ("data-animate", ATTR_ANIMATE),
    ("data-stagger", ATTR_STAGGER),
    ("data-stagger-item", ATTR_STAGGER_ITEM),
    ("data-parallax", ATTR_PARALLAX),
    ("data-counter", ATTR_COUNTER),
    ("data-counter-duration", ATTR_COUNTER_DURATION),
];

type IntersectionCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Callbacks {
    reveal: IntersectionCallback,
    counter: IntersectionCallback,
    scroll: Closure<dyn FnMut()>,
    frame: Closure<dyn FnMut(f64)>,
}

impl Callbacks {
    fn intersection(&self, kind: ObserverKind) -> &Function {
        match kind {
            ObserverKind::Reveal => self.reveal.as_ref().unchecked_ref(),
            ObserverKind::Counter => self.counter.as_ref().unchecked_ref(),
        }
    }
}

struct Dom {
    window: Window,
    elements: Vec<HtmlElement>,
    observers: Vec<(ObserverKind, IntersectionObserver)>,
    callbacks: Option<Callbacks>,
    frame_requested: Option<i32>,
}

impl Dom {
    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id.0 as usize)
    }

    fn observer(&self, kind: ObserverKind) -> Option<&IntersectionObserver> {
        self.observers
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, o)| o)
    }

    fn callbacks(&self) -> Result<&Callbacks, JsValue> {
        self.callbacks
            .as_ref()
            .ok_or_else(|| JsValue::from_str("motion driver is stopped"))
    }

    fn apply(&mut self, out: &Outputs) -> Result<(), JsValue> {
        for cmd in &out.observers {
            self.command(cmd)?;
        }
        for change in &out.changes {
            let Some(el) = self.element(change.element) else {
                continue;
            };
            match &change.op {
                ChangeOp::AddClass { class } => el.class_list().add_1(class)?,
                ChangeOp::RemoveClass { class } => el.class_list().remove_1(class)?,
                ChangeOp::SetAttribute { name, value } => el.set_attribute(name, value)?,
                ChangeOp::SetText { text } => el.set_text_content(Some(text.as_str())),
                ChangeOp::SetStyle { property, value } => el.style().set_property(property, value)?,
            }
        }
        if out.request_frame && self.frame_requested.is_none() {
            let handle = self
                .window
                .request_animation_frame(self.callbacks()?.frame.as_ref().unchecked_ref())?;
            self.frame_requested = Some(handle);
        }
        Ok(())
    }

    fn command(&mut self, cmd: &ObserverCommand) -> Result<(), JsValue> {
        match cmd {
            ObserverCommand::Create { observer, options } => {
                let created = new_observer(self.callbacks()?.intersection(*observer), options)?;
                self.observers.push((*observer, created));
            }
            ObserverCommand::Observe { observer, element } => {
                if let (Some(o), Some(el)) = (self.observer(*observer), self.element(*element)) {
                    o.observe(el);
                }
            }
            ObserverCommand::Unobserve { observer, element } => {
                if let (Some(o), Some(el)) = (self.observer(*observer), self.element(*element)) {
                    o.unobserve(el);
                }
            }
            ObserverCommand::Disconnect { observer } => {
                if let Some(o) = self.observer(*observer) {
                    o.disconnect();
                }
                self.observers.retain(|(k, _)| k != observer);
            }
            ObserverCommand::AttachScroll => {
                let opts = AddEventListenerOptions::new();
                opts.set_passive(true);
                self.window
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        "scroll",
                        self.callbacks()?.scroll.as_ref().unchecked_ref(),
                        &opts,
                    )?;
            }
            ObserverCommand::DetachScroll => {
                self.window.remove_event_listener_with_callback(
                    "scroll",
                    self.callbacks()?.scroll.as_ref().unchecked_ref(),
                )?;
            }
        }
        Ok(())
    }
}

fn new_observer(
    callback: &Function,
    options: &ObserverOptions,
) -> Result<IntersectionObserver, JsValue> {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);
    IntersectionObserver::new_with_options(callback, &init)
}

struct Driver {
    core: MotionController,
    dom: Dom,
}

impl Driver {
    fn step<F>(&mut self, f: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut MotionController) -> &Outputs,
    {
        let Driver { core, dom } = self;
        dom.apply(f(core))
    }

    /// Register every element carrying a motion attribute, then assign
    /// stagger delays container by container.
    fn scan(&mut self, document: &Document) -> Result<(), JsValue> {
        let nodes = document.query_selector_all(SELECTOR)?;
        for i in 0..nodes.length() {
            let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            let id = ElementId(self.dom.elements.len() as u32);
            el.set_attribute(ID_ATTR, &id.0.to_string())?;
            let source = element_source(&el);
            self.dom.elements.push(el);
            self.step(|core| core.register(id, &source))?;
        }

        let containers = document.query_selector_all("[data-stagger]")?;
        for i in 0..containers.length() {
            let Some(container) = containers.get(i).and_then(|n| n.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let items = container.query_selector_all("[data-stagger-item]")?;
            let ids: Vec<ElementId> = (0..items.length())
                .filter_map(|j| items.get(j))
                .filter_map(|n| n.dyn_into::<Element>().ok())
                .filter_map(|el| element_id(&el))
                .collect();
            self.step(|core| core.register_stagger_group(&ids))?;
        }
        Ok(())
    }
}

fn element_source(el: &HtmlElement) -> ElementSource {
    let source = ElementSource::new(
        DATA_ATTRS
            .iter()
            .filter_map(|(attr, key)| el.get_attribute(attr).map(|v| (*key, v))),
    );
    match el.text_content() {
        Some(text) if el.has_attribute("data-counter") => source.with_text(text),
        _ => source,
    }
}

fn element_id(el: &Element) -> Option<ElementId> {
    el.get_attribute(ID_ATTR)?.parse().ok().map(ElementId)
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        web_sys::console::warn_2(&JsValue::from_str("vista-motion:"), &e);
    }
}

fn intersection_callback(driver: Weak<RefCell<Driver>>, kind: ObserverKind) -> IntersectionCallback {
    Closure::new(move |entries: Array, _observer: IntersectionObserver| {
        let Some(driver) = driver.upgrade() else {
            return;
        };
        let Ok(mut d) = driver.try_borrow_mut() else {
            return;
        };
        let entries: Vec<IntersectionEntry> = entries
            .iter()
            .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|e| {
                Some(IntersectionEntry {
                    observer: kind,
                    element: element_id(&e.target())?,
                    is_intersecting: e.is_intersecting(),
                })
            })
            .collect();
        let now = d.dom.now();
        report(d.step(|core| core.on_intersections(now, &entries)));
    })
}

fn scroll_callback(driver: Weak<RefCell<Driver>>) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        let Some(driver) = driver.upgrade() else {
            return;
        };
        let Ok(mut d) = driver.try_borrow_mut() else {
            return;
        };
        let offset = d.dom.window.scroll_y().unwrap_or(0.0);
        report(d.step(|core| core.on_scroll(offset)));
    })
}

fn frame_callback(driver: Weak<RefCell<Driver>>) -> Closure<dyn FnMut(f64)> {
    Closure::new(move |now: f64| {
        let Some(driver) = driver.upgrade() else {
            return;
        };
        let Ok(mut d) = driver.try_borrow_mut() else {
            return;
        };
        d.dom.frame_requested = None;
        report(d.step(|core| core.tick(now)));
    })
}

/// A running driver. Dropping it (or calling `stop`) releases every observer,
/// the scroll listener and any pending frame.
#[wasm_bindgen]
pub struct MotionHandle {
    driver: Option<Rc<RefCell<Driver>>>,
}

#[wasm_bindgen]
impl MotionHandle {
    /// Number of elements bound to the controller.
    #[wasm_bindgen]
    pub fn elements(&self) -> u32 {
        self.driver
            .as_ref()
            .and_then(|d| d.try_borrow().ok().map(|d| d.dom.elements.len() as u32))
            .unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn stop(&mut self) -> Result<(), JsError> {
        let Some(driver) = self.driver.take() else {
            return Ok(());
        };
        let mut d = driver
            .try_borrow_mut()
            .map_err(|_| JsError::new("stop: driver is busy"))?;
        d.step(|core| core.teardown())
            .map_err(|e| JsError::new(&format!("stop error: {e:?}")))?;
        if let Some(handle) = d.dom.frame_requested.take() {
            report(d.dom.window.cancel_animation_frame(handle));
        }
        d.dom.callbacks = None;
        Ok(())
    }
}

impl Drop for MotionHandle {
    fn drop(&mut self) {
        if self.stop().is_err() {
            web_sys::console::warn_1(&JsValue::from_str("vista-motion: stop failed on drop"));
        }
    }
}

/// Bind a controller to the current document. `config` is a `MotionConfig`
/// JSON object or undefined/null for defaults.
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<MotionHandle, JsError> {
    console_error_panic_hook::set_once();

    let core = MotionController::try_new(parse_config(config)?)
        .map_err(|e| JsError::new(&format!("config error: {e}")))?;
    let window = web_sys::window().ok_or_else(|| JsError::new("start: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("start: no document"))?;

    let driver = Rc::new(RefCell::new(Driver {
        core,
        dom: Dom {
            window,
            elements: Vec::new(),
            observers: Vec::new(),
            callbacks: None,
            frame_requested: None,
        },
    }));
    let weak = Rc::downgrade(&driver);
    driver.borrow_mut().dom.callbacks = Some(Callbacks {
        reveal: intersection_callback(weak.clone(), ObserverKind::Reveal),
        counter: intersection_callback(weak.clone(), ObserverKind::Counter),
        scroll: scroll_callback(weak.clone()),
        frame: frame_callback(weak),
    });
    driver
        .borrow_mut()
        .scan(&document)
        .map_err(|e| JsError::new(&format!("start error: {e:?}")))?;

    Ok(MotionHandle {
        driver: Some(driver),
    })
}
