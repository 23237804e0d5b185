//! Platform abstraction layer
//!
//! Browser-only glue, kept out of the simulation:
//! - Recurring tick timer with RAII cancellation
//! - LocalStorage access
//! - Small DOM helpers for the HUD

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod timer;

/// Seed for a new run when none is supplied
#[cfg(target_arch = "wasm32")]
pub fn fresh_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a new run when none is supplied
#[cfg(not(target_arch = "wasm32"))]
pub fn fresh_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
