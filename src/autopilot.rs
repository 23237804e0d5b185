//! Demo autopilot
//!
//! Produces tick input from the current state so the game can play itself
//! (headless native runs, attract mode). Simple look-ahead heuristics only.

use crate::consts::*;
use crate::session::Game;
use crate::sim::{PlatformKind, TickInput};

/// Jump when an enemy's left edge is this close ahead of the player
const RUNNER_JUMP_LEAD: f32 = 20.0;
/// Platformer looks this far past its leading edge for ground
const GAP_LOOKAHEAD: f32 = 20.0;

/// Pick the input a cautious player would hold this tick
pub fn demo_input(game: &Game) -> TickInput {
    match game {
        Game::Runner(s) => {
            let player_right = s.player.pos.x + PLAYER_SIZE;
            let threat = s.enemies.iter().filter(|e| e.active).any(|e| {
                let gap = e.pos.x - s.world_offset - player_right;
                (0.0..=RUNNER_JUMP_LEAD).contains(&gap)
            });
            TickInput {
                jump: threat,
                ..Default::default()
            }
        }
        Game::Platformer(s) => {
            let probe = s.player.pos.x + PLAYER_SIZE + GAP_LOOKAHEAD;
            let ground_ahead = s.platforms.iter().any(|p| {
                p.kind == PlatformKind::Ground && p.pos.x <= probe && probe < p.pos.x + p.width
            });
            TickInput {
                jump: !ground_ahead,
                left: false,
                right: true,
            }
        }
    }
}
