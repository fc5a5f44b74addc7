#![cfg(target_arch = "wasm32")]

use particle_bg::{start_animation, stop_animation, ParticleBackground};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn background_canvas() -> Option<web_sys::HtmlCanvasElement> {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id("particle-background")
        .and_then(|e| e.dyn_into().ok())
}

#[wasm_bindgen_test]
fn start_inserts_a_background_canvas() {
    let bg = ParticleBackground::new().unwrap();
    assert!(bg.start().unwrap());

    let canvas = background_canvas().expect("canvas inserted");
    let style = canvas.style();
    assert_eq!(style.get_property_value("pointer-events").unwrap(), "none");
    assert_eq!(style.get_property_value("z-index").unwrap(), "-1");
    assert_eq!(style.get_property_value("position").unwrap(), "fixed");

    let window = web_sys::window().unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(canvas.width(), w);
    assert!(bg.is_running());

    assert!(bg.stop());
    assert!(background_canvas().is_none());
}

#[wasm_bindgen_test]
fn double_start_keeps_one_canvas() {
    let bg = ParticleBackground::new().unwrap();
    bg.start().unwrap();
    assert!(!bg.start().unwrap());

    let count = web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .query_selector_all("#particle-background")
        .unwrap()
        .length();
    assert_eq!(count, 1);
    bg.stop();
}

#[wasm_bindgen_test]
fn stop_without_start_is_safe() {
    let bg = ParticleBackground::new().unwrap();
    assert!(!bg.stop());
    stop_animation();
    assert!(background_canvas().is_none());
}

#[wasm_bindgen_test]
fn page_functions_share_one_instance() {
    start_animation().unwrap();
    start_animation().unwrap();
    assert!(background_canvas().is_some());
    stop_animation();
    assert!(background_canvas().is_none());
}

#[wasm_bindgen_test]
fn window_events_after_stop_are_ignored() {
    let window = web_sys::window().unwrap();
    let bg = ParticleBackground::new().unwrap();
    bg.start().unwrap();
    let count = bg.particle_count();
    assert!(bg.stop());

    window
        .dispatch_event(&web_sys::Event::new("resize").unwrap())
        .unwrap();
    window
        .dispatch_event(&web_sys::MouseEvent::new("mousemove").unwrap())
        .unwrap();

    assert!(!bg.is_running());
    assert_eq!(bg.particle_count(), count);
    assert!(background_canvas().is_none());
}
