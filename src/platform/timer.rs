//! Recurring tick timer
//!
//! The callback is created once by the caller and kept alive for the page
//! lifetime; an [`Interval`] only owns the timer id. Dropping it clears the
//! timer, so it is safe to drop from inside its own callback.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// A running `setInterval` timer, cleared on drop
#[derive(Debug)]
pub struct Interval {
    id: i32,
}

impl Interval {
    /// Start calling `callback` every `ms` milliseconds
    pub fn start(callback: &js_sys::Function, ms: u32) -> Option<Self> {
        let window = web_sys::window()?;
        match window.set_interval_with_callback_and_timeout_and_arguments_0(callback, ms as i32) {
            Ok(id) => {
                log::debug!("Tick timer {} started ({}ms)", id, ms);
                Some(Self { id })
            }
            Err(e) => {
                log::error!("Could not start tick timer: {:?}", e);
                None
            }
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
            log::debug!("Tick timer {} cleared", self.id);
        }
    }
}

/// Turn a Rust closure into a JS function that lives for the page lifetime
pub fn leak_callback(f: impl FnMut() + 'static) -> js_sys::Function {
    let closure = Closure::<dyn FnMut()>::new(f);
    let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    closure.forget();
    function
}
