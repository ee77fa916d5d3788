//! Browser bridge for the letterdrift typing scene.
//!
//! The page calls `scene_init` once, forwards keyboard/pointer/resize events
//! as they happen, and calls `scene_tick` from `requestAnimationFrame`. After
//! each tick it reads the packed frame from wasm memory at
//! `get_frame_ptr()` (`get_frame_len()` floats).

use std::cell::RefCell;

use letterdrift::InputEvent;
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::SceneRunner;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => Some(f(runner)),
        None => {
            log::warn!("scene not initialized; call scene_init() first");
            None
        }
    })
}

#[wasm_bindgen]
pub fn scene_init(config_json: &str, width: f32, height: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match SceneRunner::from_json(config_json, width, height) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("letterdrift: initialized");
        }
        Err(err) => log::error!("letterdrift: cannot start scene: {}", err),
    }
}

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Forward a `KeyboardEvent.key`. Returns true when the key was consumed, so
/// the page can call `preventDefault`.
#[wasm_bindgen]
pub fn scene_key(key: &str) -> bool {
    with_runner(|r| r.key(key)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn scene_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    with_runner(|r| r.input(InputEvent::Resize { width, height }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_text() -> String {
    with_runner(|r| r.text()).unwrap_or_default()
}
