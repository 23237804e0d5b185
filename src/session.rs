//! Game session
//!
//! A [`Session`] owns exactly one game and the held-key set. It is the only
//! writer of game state; the view reads the game after each tick. The driver
//! (a 16ms browser interval, or a plain loop natively) calls [`Session::tick`]
//! and stops calling it once [`Session::is_running`] turns false.

use serde::{Deserialize, Serialize};

use crate::input::HeldKeys;
use crate::settings::GameVariant;
use crate::sim::{
    Coin, Enemy, GamePhase, Platform, PlatformerState, Player, RunnerState, TickInput,
    tick_platformer, tick_runner,
};

/// The active game, one state struct per variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Game {
    Runner(RunnerState),
    Platformer(PlatformerState),
}

impl Game {
    pub fn new(variant: GameVariant, seed: u64) -> Self {
        match variant {
            GameVariant::Runner => Game::Runner(RunnerState::new(seed)),
            GameVariant::Platformer => Game::Platformer(PlatformerState::new(seed)),
        }
    }

    pub fn variant(&self) -> GameVariant {
        match self {
            Game::Runner(_) => GameVariant::Runner,
            Game::Platformer(_) => GameVariant::Platformer,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            Game::Runner(s) => s.phase,
            Game::Platformer(s) => s.phase,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            Game::Runner(s) => s.score,
            Game::Platformer(s) => s.score,
        }
    }

    pub fn time_ticks(&self) -> u64 {
        match self {
            Game::Runner(s) => s.time_ticks,
            Game::Platformer(s) => s.time_ticks,
        }
    }

    pub fn player(&self) -> &Player {
        match self {
            Game::Runner(s) => &s.player,
            Game::Platformer(s) => &s.player,
        }
    }

    /// World x at the left edge of the screen
    pub fn view_x(&self) -> f32 {
        match self {
            Game::Runner(s) => s.world_offset,
            Game::Platformer(s) => s.camera_x,
        }
    }

    /// Player x on screen
    pub fn player_screen_x(&self) -> f32 {
        match self {
            // Runner player x is already a screen coordinate
            Game::Runner(s) => s.player.pos.x,
            Game::Platformer(s) => s.player.pos.x - s.camera_x,
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        match self {
            Game::Runner(s) => &s.platforms,
            Game::Platformer(s) => &s.platforms,
        }
    }

    pub fn coins(&self) -> &[Coin] {
        match self {
            Game::Runner(s) => &s.coins,
            Game::Platformer(s) => &s.coins,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        match self {
            Game::Runner(s) => &s.enemies,
            Game::Platformer(s) => &s.enemies,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput) {
        match self {
            Game::Runner(s) => tick_runner(s, input),
            Game::Platformer(s) => tick_platformer(s, input),
        }
    }

    /// Runner: fresh world from `seed`. Platformer: same level, run reset.
    pub fn restart(&mut self, seed: u64) {
        match self {
            Game::Runner(s) => *s = RunnerState::new(seed),
            Game::Platformer(s) => s.restart(),
        }
    }
}

/// One player's session: the game plus the keys they are holding
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    keys: HeldKeys,
}

impl Session {
    pub fn new(variant: GameVariant, seed: u64) -> Self {
        log::info!("Starting {} with seed {}", variant.as_str(), seed);
        Self {
            game: Game::new(variant, seed),
            keys: HeldKeys::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn keys(&self) -> &HeldKeys {
        &self.keys
    }

    pub fn key_down(&mut self, code: &str) -> bool {
        self.keys.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.keys.key_up(code)
    }

    /// Forget held keys (focus lost)
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// True while ticks still change the game
    pub fn is_running(&self) -> bool {
        self.game.phase() == GamePhase::Playing
    }

    /// Run exactly one frame update from the held keys and report the phase
    /// after it
    pub fn tick(&mut self) -> GamePhase {
        let input = TickInput::from_keys(&self.keys, self.game.variant());
        self.tick_with(&input)
    }

    /// Run one frame update with explicit input (autopilot, replays)
    pub fn tick_with(&mut self, input: &TickInput) -> GamePhase {
        self.game.tick(input);
        self.game.phase()
    }

    /// Tick until `max_ticks` have run or the game ends; returns ticks run
    pub fn run_ticks(&mut self, max_ticks: u32) -> u32 {
        let mut ran = 0;
        while ran < max_ticks && self.is_running() {
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Reset to the playing state
    pub fn restart(&mut self, seed: u64) {
        self.game.restart(seed);
        log::info!(
            "{} restarted (seed {})",
            self.game.variant().as_str(),
            seed
        );
    }

    /// Replace the game with a new one of `variant`
    pub fn switch_variant(&mut self, variant: GameVariant, seed: u64) {
        log::info!("Switching to {} with seed {}", variant.as_str(), seed);
        self.game = Game::new(variant, seed);
        self.keys.clear();
    }
}
