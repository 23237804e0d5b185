//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one 16ms frame)
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use rect::Rect;
pub use state::{
    Coin, Enemy, Facing, GamePhase, Platform, PlatformKind, PlatformerState, Player, RngState,
    RunnerState,
};
pub use tick::{TickInput, advance_platformer, advance_runner, tick_platformer, tick_runner};
