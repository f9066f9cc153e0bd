#[cfg(target_arch = "wasm32")]
use std::cell::Cell;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
use js_sys::{Function, Reflect};

#[cfg(target_arch = "wasm32")]
const BOOT_GLOBAL: &str = "__SVG_STUDIO_BOOT";

#[cfg(target_arch = "wasm32")]
thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

/// Runs `action` against the page's boot overlay object, if the page
/// defined one.
#[cfg(target_arch = "wasm32")]
fn with_overlay<F: FnOnce(&js_sys::Object)>(action: F) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(value) = Reflect::get(&window, &JsValue::from_str(BOOT_GLOBAL)) else {
        return;
    };
    if value.is_null() || value.is_undefined() {
        return;
    }
    let Ok(overlay) = value.dyn_into::<js_sys::Object>() else {
        return;
    };
    action(&overlay);
}

#[cfg(target_arch = "wasm32")]
fn invoke(method: &str, args: &[&str]) {
    with_overlay(|overlay| {
        let Ok(value) = Reflect::get(overlay, &JsValue::from_str(method)) else {
            return;
        };
        let Ok(func) = value.dyn_into::<Function>() else {
            return;
        };
        let array: js_sys::Array = args.iter().map(|arg| JsValue::from_str(arg)).collect();
        let _ = func.apply(overlay, &array);
    });
}

pub(crate) fn set_phase(label: &str, detail: &str) {
    #[cfg(target_arch = "wasm32")]
    invoke("setPhase", &[label, detail]);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (label, detail);
}

pub(crate) fn fail(code: &str, message: &str, hint: &str) {
    #[cfg(target_arch = "wasm32")]
    invoke("fail", &[code, message, hint]);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (code, message, hint);
}

pub(crate) fn ready() {
    #[cfg(target_arch = "wasm32")]
    {
        if READY_SENT.with(|flag| flag.replace(true)) {
            return;
        }
        invoke("ready", &[]);
    }
}
