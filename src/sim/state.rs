//! Game state and core simulation types
//!
//! Each variant owns one explicit state struct. Everything a tick reads or
//! writes lives here, so a clone is a complete snapshot.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::worldgen;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended (fell off the world or touched an enemy)
    GameOver,
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The frog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Per-tick velocity (runner keeps x at 0)
    pub vel: Vec2,
    /// Resting on top of a platform
    pub grounded: bool,
    pub facing: Facing,
    /// Animation counter, mod `PLAYER_ANIM_PERIOD`
    pub anim_frame: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            grounded: false,
            facing: Facing::Right,
            anim_frame: 0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn advance_anim(&mut self) {
        self.anim_frame = (self.anim_frame + 1) % PLAYER_ANIM_PERIOD;
    }
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Floating,
}

/// A one-way platform; only landing from above is resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub fn ground(id: u32, x: f32) -> Self {
        Self {
            id,
            kind: PlatformKind::Ground,
            pos: Vec2::new(x, GROUND_Y),
            width: GROUND_WIDTH,
            height: GROUND_HEIGHT,
        }
    }

    pub fn floating(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: PlatformKind::Floating,
            pos: Vec2::new(x, y),
            width: FLOATING_WIDTH,
            height: FLOATING_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.width, self.height)
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    /// Flips to true once; only a restart clears it
    pub collected: bool,
    /// Animation counter, mod `COIN_ANIM_PERIOD`
    pub anim_frame: u32,
}

impl Coin {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            collected: false,
            anim_frame: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, COIN_SIZE, COIN_SIZE)
    }

    pub fn advance_anim(&mut self) {
        self.anim_frame = (self.anim_frame + 1) % COIN_ANIM_PERIOD;
    }
}

/// An enemy
///
/// In the runner, touching an active enemy ends the run. In the platformer
/// enemies carry a patrol velocity but are purely decorative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel_x: f32,
    pub active: bool,
    /// Animation counter, mod `ENEMY_ANIM_PERIOD`
    pub anim_frame: u32,
}

impl Enemy {
    pub fn new(id: u32, x: f32, vel_x: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, ENEMY_Y),
            vel_x,
            active: true,
            anim_frame: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, ENEMY_SIZE, ENEMY_SIZE)
    }

    pub fn advance_anim(&mut self) {
        self.anim_frame = (self.anim_frame + 1) % ENEMY_ANIM_PERIOD;
    }
}

/// RNG state wrapper for serialization
///
/// Each generation batch draws from its own PCG stream, so a batch is fully
/// determined by `(seed, stream)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// RNG for the next batch; advances the stream
    pub fn next_batch(&mut self) -> Pcg32 {
        let rng = self.to_rng();
        self.stream += 1;
        rng
    }
}

/// Endless runner state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Horizontal scroll distance
    pub world_offset: f32,
    /// Scroll speed factor, grows to `MAX_SPEED_MULTIPLIER`
    pub speed_multiplier: f32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Player x is a fixed screen coordinate
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    /// Next entity ID
    next_id: u32,
}

impl RunnerState {
    /// Create a new run with a freshly generated world
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            world_offset: 0.0,
            speed_multiplier: 1.0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::default(),
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        };

        worldgen::generate_runner_world(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Furthest generated platform x (0 when there are none)
    pub fn frontier(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.pos.x)
            .fold(0.0, f32::max)
    }

    /// Distance travelled in meters, as shown on the game-over screen
    pub fn distance_m(&self) -> u64 {
        (self.world_offset / 10.0).floor() as u64
    }
}

/// Camera-follow platformer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformerState {
    /// Level seed; the layout never changes for a given seed
    pub seed: u64,
    pub level_width: f32,
    /// Left edge of the view in world space, never negative
    pub camera_x: f32,
    pub score: u64,
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Player position is in world space
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    next_id: u32,
}

impl PlatformerState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            level_width: LEVEL_WIDTH,
            camera_x: 0.0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::default(),
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        };

        worldgen::generate_platformer_level(&mut state);

        state
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the run in place, keeping the level layout
    pub fn restart(&mut self) {
        self.camera_x = 0.0;
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.player = Player::default();
        for coin in &mut self.coins {
            coin.collected = false;
            coin.anim_frame = 0;
        }
        for enemy in &mut self.enemies {
            enemy.anim_frame = 0;
        }
    }

    /// Coins still waiting to be picked up
    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }
}
