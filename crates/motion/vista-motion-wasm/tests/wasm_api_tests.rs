#![cfg(target_arch = "wasm32")]
use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen as swb;
use vista_motion_core::{ChangeOp, MotionEvent, ObserverCommand, ObserverKind, Outputs};
use vista_motion_wasm::{abi_version, VistaMotion};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn js(v: serde_json::Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn outputs(v: JsValue) -> Outputs {
    swb::from_value(v).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    assert!(VistaMotion::new(JsValue::UNDEFINED).is_ok());
    assert!(VistaMotion::new(JsValue::NULL).is_ok());
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let cfg = js(json!({ "reveal": { "threshold": 3.0, "root_margin": "0px" } }));
    assert!(VistaMotion::new(cfg).is_err());
}

#[wasm_bindgen_test]
fn register_and_reveal() {
    let mut m = VistaMotion::new(JsValue::UNDEFINED).unwrap();
    let out = outputs(
        m.register(1, js(json!({ "dataset": { "animate": "fadeLeft" } })))
            .unwrap(),
    );
    assert!(out.observers.contains(&ObserverCommand::Observe {
        observer: ObserverKind::Reveal,
        element: vista_motion_core::ElementId(1),
    }));

    let entries = js(json!([{ "observer": "reveal", "element": 1, "is_intersecting": true }]));
    let out = outputs(m.on_intersections(0.0, entries).unwrap());
    assert!(out.request_frame);

    let out = outputs(m.tick(16.0).unwrap());
    assert!(out.changes.iter().any(|c| c.op
        == ChangeOp::SetAttribute {
            name: "data-animate".into(),
            value: "fadeLeft".into(),
        }));
}

#[wasm_bindgen_test]
fn entries_must_be_an_array() {
    let mut m = VistaMotion::new(JsValue::UNDEFINED).unwrap();
    assert!(m.on_intersections(0.0, js(json!({ "element": 1 }))).is_err());
}

#[wasm_bindgen_test]
fn counter_and_teardown() {
    let mut m = VistaMotion::new(JsValue::UNDEFINED).unwrap();
    m.register(2, js(json!({ "dataset": { "counter": "" }, "text": "5" })))
        .unwrap();
    let entries = js(json!([{ "observer": "counter", "element": 2, "is_intersecting": true }]));
    m.on_intersections(0.0, entries).unwrap();
    let out = outputs(m.tick(600.0).unwrap());
    assert_eq!(out.texts_for(vista_motion_core::ElementId(2)).collect::<Vec<_>>(), vec!["5"]);

    let out = outputs(m.teardown().unwrap());
    assert_eq!(out.events, vec![MotionEvent::TornDown]);
}
