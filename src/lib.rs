//! Frog Hop - an endless runner and a camera-follow platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world generation)
//! - `input`: Held-key tracking and per-variant tick input
//! - `session`: Owns the active game, runs ticks, handles restart
//! - `renderer`: Pure draw list + HUD text, canvas painter on the web
//! - `platform`: Browser glue (timers, storage, listeners)
//! - `autopilot`: Demo input for headless and attract runs

pub mod autopilot;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Game, Session};
pub use settings::{GameVariant, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed update interval in milliseconds (~60 Hz, no delta scaling)
    pub const TICK_MS: u32 = 16;

    /// Play area
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Falling this far below the play area ends the run
    pub const DEATH_MARGIN: f32 = 100.0;

    /// Entity sizes
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const ENEMY_SIZE: f32 = 32.0;

    /// Physics, tuned per 16ms tick
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_FORCE: f32 = -15.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const FRICTION: f32 = 0.8;

    /// Runner scroll speed (units per tick at 1.0x)
    pub const WORLD_SPEED: f32 = 2.5;
    pub const SPEED_STEP: f32 = 0.002;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.5;

    pub const COIN_SCORE: u64 = 100;

    /// Player spawn point
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 400.0;

    /// Ground strip
    pub const GROUND_Y: f32 = 550.0;
    pub const GROUND_WIDTH: f32 = 100.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Enemies stand on the ground
    pub const ENEMY_Y: f32 = GROUND_Y - ENEMY_SIZE;

    pub const FLOATING_WIDTH: f32 = 80.0;
    pub const FLOATING_HEIGHT: f32 = 20.0;

    /// Extra margin around the screen for collision candidates
    pub const WINDOW_MARGIN: f32 = 50.0;

    /// Runner extends the world when the offset gets this close to the frontier
    pub const LOOKAHEAD: f32 = 3000.0;
    /// Runner evicts entities this far behind the scroll offset
    pub const EVICT_BEHIND: f32 = 1000.0;

    /// Animation counter periods
    pub const PLAYER_ANIM_PERIOD: u32 = 60;
    pub const COIN_ANIM_PERIOD: u32 = 120;
    pub const ENEMY_ANIM_PERIOD: u32 = 60;

    /// Platformer level width
    pub const LEVEL_WIDTH: f32 = 4000.0;
}

/// Screen-space horizontal window used for collision candidates.
///
/// An entity at screen x `screen_x` with width `width` is a candidate when
/// `-width - margin < screen_x < GAME_WIDTH + margin`.
#[inline]
pub fn in_window(screen_x: f32, width: f32) -> bool {
    use consts::{GAME_WIDTH, WINDOW_MARGIN};
    screen_x > -width - WINDOW_MARGIN && screen_x < GAME_WIDTH + WINDOW_MARGIN
}
