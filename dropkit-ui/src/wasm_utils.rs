//! WASM utilities for browser interop
//!
//! # Event Listener Cleanup Pattern
//!
//! A JavaScript listener backed by a Rust `Closure` has to keep that closure
//! alive for as long as it is attached. [`DomEventListener`] owns both and
//! removes the listener in `Drop`, so the listener lives exactly as long as
//! the value does:
//!
//! ```ignore
//! let listener = DomEventListener::new(window.into(), "resize", false, callback);
//! drop(listener); // detached
//! ```
//!
//! The dropdown keeps one listener per [`ListenerKind`] inside an
//! `OpenSession`, stored in a `Signal`; taking the session out of the signal
//! detaches everything it holds.
//!
//! [`ListenerKind`]: dropkit_core::ListenerKind

use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

/// An event listener that removes itself when dropped.
pub struct DomEventListener {
    target: web_sys_x::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(wasm_bindgen_x::JsValue)>,
}

impl DomEventListener {
    /// Attach `callback` to `target`. Passive listeners promise never to call
    /// `preventDefault`, which keeps scrolling off the main thread.
    pub fn new(
        target: web_sys_x::EventTarget,
        event_name: &'static str,
        passive: bool,
        callback: impl FnMut(wasm_bindgen_x::JsValue) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(wasm_bindgen_x::JsValue)> =
            Closure::wrap(Box::new(callback));

        let options = web_sys_x::AddEventListenerOptions::new();
        options.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            tracing::warn!("Failed to attach {event_name} listener: {e:?}");
        }

        Self {
            target,
            event_name,
            callback,
        }
    }

    pub fn event_name(&self) -> &'static str {
        self.event_name
    }
}

impl Drop for DomEventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Call a zero-argument method such as `showPopover` by name.
///
/// Returns false when the method is missing or throws.
pub fn call_method(target: &web_sys_x::Element, method: &str) -> bool {
    let Ok(value) = js_sys_x::Reflect::get(target, &method.into()) else {
        return false;
    };
    let Some(func) = value.dyn_ref::<js_sys_x::Function>() else {
        return false;
    };
    func.call0(target).is_ok()
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
