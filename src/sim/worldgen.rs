//! Procedural world generation
//!
//! The runner world is generated in batches ahead of the scroll offset and
//! evicted behind it. The platformer level is generated once per seed.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coin, Enemy, Platform, PlatformerState, RunnerState};
use crate::consts::*;

/// Probability that a floating platform slot gets a platform
const FLOATING_SPAWN_CHANCE: f32 = 0.7;

/// Slot spacing for runner content
const FLOATING_SPACING: f32 = 120.0;
const COIN_SPACING: f32 = 80.0;
const ENEMY_SPACING: f32 = 150.0;

/// Height ranges (top edge)
const FLOATING_Y_MIN: f32 = 300.0;
const FLOATING_Y_RANGE: f32 = 200.0;
const COIN_Y_MIN: f32 = 200.0;
const COIN_Y_RANGE: f32 = 300.0;

/// Counts for one runner batch
struct BatchSize {
    ground: u32,
    floating: u32,
    coins: u32,
    enemies: u32,
}

const INITIAL_BATCH: BatchSize = BatchSize {
    ground: 300,
    floating: 150,
    coins: 200,
    enemies: 100,
};

const EXTENSION_BATCH: BatchSize = BatchSize {
    ground: 100,
    floating: 50,
    coins: 50,
    enemies: 25,
};

/// Roll a floating platform slot: Some(y) if a platform spawns
fn roll_floating(rng: &mut Pcg32) -> Option<f32> {
    // Both draws happen every slot so the stream stays aligned
    let spawn = rng.random::<f32>() > 1.0 - FLOATING_SPAWN_CHANCE;
    let y = FLOATING_Y_MIN + rng.random::<f32>() * FLOATING_Y_RANGE;
    spawn.then_some(y)
}

fn roll_coin_y(rng: &mut Pcg32) -> f32 {
    COIN_Y_MIN + rng.random::<f32>() * COIN_Y_RANGE
}

/// Append one batch of runner content.
///
/// `ground_x`, `floating_x`, `coin_x` and `enemy_x` are the x of the first
/// slot of each entity class.
fn push_runner_batch(
    state: &mut RunnerState,
    size: &BatchSize,
    ground_x: f32,
    floating_x: f32,
    coin_x: f32,
    enemy_x: f32,
) {
    let mut rng = state.rng_state.next_batch();

    for i in 0..size.ground {
        let id = state.next_entity_id();
        state
            .platforms
            .push(Platform::ground(id, ground_x + i as f32 * GROUND_WIDTH));
    }

    for i in 0..size.floating {
        if let Some(y) = roll_floating(&mut rng) {
            let id = state.next_entity_id();
            let x = floating_x + i as f32 * FLOATING_SPACING;
            state.platforms.push(Platform::floating(id, x, y));
        }
    }

    for i in 0..size.coins {
        let id = state.next_entity_id();
        let x = coin_x + i as f32 * COIN_SPACING;
        let y = roll_coin_y(&mut rng);
        state.coins.push(Coin::new(id, x, y));
    }

    for i in 0..size.enemies {
        let id = state.next_entity_id();
        let x = enemy_x + i as f32 * ENEMY_SPACING;
        state.enemies.push(Enemy::new(id, x, 0.0));
    }
}

/// Generate the starting runner world
pub fn generate_runner_world(state: &mut RunnerState) {
    push_runner_batch(state, &INITIAL_BATCH, 0.0, 200.0, 150.0, 400.0);

    log::debug!(
        "Runner world seeded ({}): {} platforms, {} coins, {} enemies",
        state.seed,
        state.platforms.len(),
        state.coins.len(),
        state.enemies.len()
    );
}

/// True when `offset` is within `LOOKAHEAD` of the frontier. Ticks pass the
/// offset they started with.
pub fn needs_extension(state: &RunnerState, offset: f32) -> bool {
    offset > state.frontier() - LOOKAHEAD
}

/// Append a batch beyond the current frontier, then evict what is far behind
pub fn extend_runner_world(state: &mut RunnerState) {
    let frontier = state.frontier();
    push_runner_batch(
        state,
        &EXTENSION_BATCH,
        frontier + 100.0,
        frontier + 200.0,
        frontier + 150.0,
        frontier + 400.0,
    );
    let evicted = evict_behind(state);

    log::debug!(
        "World extended past {} (offset {:.0}, evicted {}): {} platforms, {} coins, {} enemies",
        frontier,
        state.world_offset,
        evicted,
        state.platforms.len(),
        state.coins.len(),
        state.enemies.len()
    );
}

/// Drop entities whose right edge is more than `EVICT_BEHIND` behind the
/// scroll offset. Returns how many were removed.
pub fn evict_behind(state: &mut RunnerState) -> usize {
    let cutoff = state.world_offset - EVICT_BEHIND;
    let before = state.platforms.len() + state.coins.len() + state.enemies.len();

    state.platforms.retain(|p| p.pos.x + p.width >= cutoff);
    state.coins.retain(|c| c.pos.x + COIN_SIZE >= cutoff);
    state.enemies.retain(|e| e.pos.x + ENEMY_SIZE >= cutoff);

    before - (state.platforms.len() + state.coins.len() + state.enemies.len())
}

/// Platformer level tuning
const SAFE_START: f32 = 600.0;
const SAFE_END: f32 = 300.0;
const GAP_CHANCE: f64 = 0.15;
const LEDGE_SPACING: f32 = 180.0;
const LEDGE_START: f32 = 300.0;
const LEDGE_Y_MAX: f32 = 460.0;
/// A ledge top is at most this far above the previous ledge (or the ground).
/// A standing jump clears about 133 units.
const MAX_LEDGE_CLIMB: f32 = 100.0;
const GROUND_COIN_SPACING: f32 = 400.0;
const GROUND_COIN_Y: f32 = 505.0;
const PATROL_SPACING: f32 = 500.0;
const PATROL_START: f32 = 700.0;
const PATROL_SPEED: f32 = 1.0;

/// Generate the fixed platformer level for `state.seed`
pub fn generate_platformer_level(state: &mut PlatformerState) {
    let mut rng = Pcg32::new(state.seed, 0);
    let width = state.level_width;

    // Ground with the odd single-tile gap, never two in a row
    let tiles = (width / GROUND_WIDTH) as u32;
    let mut last_was_gap = false;
    for i in 0..tiles {
        let x = i as f32 * GROUND_WIDTH;
        let gap_allowed = !last_was_gap && x >= SAFE_START && x + GROUND_WIDTH <= width - SAFE_END;
        let gap = rng.random_bool(GAP_CHANCE) && gap_allowed;
        last_was_gap = gap;
        if !gap {
            let id = state.next_entity_id();
            state.platforms.push(Platform::ground(id, x));
        }
    }

    // Ledges, each with a coin floating above it, climbing in reachable steps
    let mut x = LEDGE_START;
    let mut prev_top = GROUND_Y;
    while x + FLOATING_WIDTH <= width - GROUND_WIDTH {
        let highest = (prev_top - MAX_LEDGE_CLIMB).max(FLOATING_Y_MIN);
        let y = highest + rng.random::<f32>() * (LEDGE_Y_MAX - highest);
        prev_top = y;
        let id = state.next_entity_id();
        state.platforms.push(Platform::floating(id, x, y));

        let coin_x = x + (FLOATING_WIDTH - COIN_SIZE) / 2.0;
        let id = state.next_entity_id();
        state.coins.push(Coin::new(id, coin_x, y - 40.0));

        x += LEDGE_SPACING;
    }

    // Coins at walking height
    let mut x = 250.0;
    while x + COIN_SIZE <= width {
        let id = state.next_entity_id();
        state.coins.push(Coin::new(id, x, GROUND_COIN_Y));
        x += GROUND_COIN_SPACING;
    }

    // Patrolling enemies (decorative)
    let mut x = PATROL_START;
    while x + ENEMY_SIZE <= width {
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, x, dir * PATROL_SPEED));
        x += PATROL_SPACING;
    }

    log::debug!(
        "Platformer level {} generated: {} platforms, {} coins, {} enemies",
        state.seed,
        state.platforms.len(),
        state.coins.len(),
        state.enemies.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;

    #[test]
    fn test_initial_runner_layout() {
        let state = RunnerState::new(1234);
        let ground: Vec<_> = state
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Ground)
            .collect();
        assert_eq!(ground.len(), 300);
        assert_eq!(ground[0].pos.x, 0.0);
        assert_eq!(ground[299].pos.x, 29_900.0);

        let floating = state.platforms.len() - ground.len();
        assert!(floating <= 150);
        // 70% of 150 slots; generous bounds so no seed is flaky
        assert!(floating > 60, "only {} floating platforms", floating);

        for p in state.platforms.iter().filter(|p| p.kind == PlatformKind::Floating) {
            assert!(p.pos.y >= 300.0 && p.pos.y < 500.0);
            assert_eq!((p.pos.x - 200.0) % 120.0, 0.0);
        }

        assert_eq!(state.coins.len(), 200);
        assert_eq!(state.coins[1].pos.x - state.coins[0].pos.x, 80.0);
        assert!(state.coins.iter().all(|c| c.pos.y >= 200.0 && c.pos.y < 500.0));

        assert_eq!(state.enemies.len(), 100);
        assert_eq!(state.enemies[0].pos, glam::Vec2::new(400.0, 518.0));
        assert_eq!(state.enemies[1].pos.x, 550.0);
        assert!(state.enemies.iter().all(|e| e.active));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = RunnerState::new(99);
        let b = RunnerState::new(99);
        assert_eq!(a, b);

        let c = RunnerState::new(100);
        assert_ne!(a.coins, c.coins);
    }

    #[test]
    fn test_needs_extension_threshold() {
        let mut state = RunnerState::new(5);
        let frontier = state.frontier();
        assert_eq!(frontier, 29_900.0);

        assert!(!needs_extension(&state, frontier - LOOKAHEAD));
        assert!(needs_extension(&state, frontier - LOOKAHEAD + 0.5));
    }

    #[test]
    fn test_extension_is_contiguous() {
        let mut state = RunnerState::new(5);
        state.world_offset = 27_000.0;
        let ground_before = state
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Ground)
            .count();

        extend_runner_world(&mut state);

        let mut ground_x: Vec<f32> = state
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Ground)
            .map(|p| p.pos.x)
            .collect();
        ground_x.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in ground_x.windows(2) {
            assert_eq!(pair[1] - pair[0], GROUND_WIDTH);
        }
        assert_eq!(state.frontier(), 29_900.0 + 100.0 * 100.0);

        // Ground behind offset - 1000 was evicted
        let ground_after = ground_x.len();
        assert!(ground_after < ground_before + 100);
        assert!(ground_x[0] + GROUND_WIDTH >= 26_000.0);
    }

    #[test]
    fn test_eviction_keeps_visible_entities() {
        let mut state = RunnerState::new(8);
        state.world_offset = 5_000.0;
        evict_behind(&mut state);

        for p in &state.platforms {
            assert!(p.pos.x + p.width >= state.world_offset - EVICT_BEHIND);
        }
        // Ground under and just left of the screen survives
        for x in [4_900.0, 5_000.0, 5_800.0] {
            assert!(
                state
                    .platforms
                    .iter()
                    .any(|p| p.kind == PlatformKind::Ground && p.pos.x == x)
            );
        }
        assert!(state.coins.iter().all(|c| c.pos.x + COIN_SIZE >= 4_000.0));
        assert!(state.enemies.iter().all(|e| e.pos.x + ENEMY_SIZE >= 4_000.0));
    }

    #[test]
    fn test_platformer_level_is_deterministic() {
        let a = PlatformerState::new(77);
        let b = PlatformerState::new(77);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.enemies, b.enemies);
    }

    /// Height a standing jump lifts the player, tick by tick
    fn jump_rise() -> f32 {
        let mut vy = JUMP_FORCE;
        let mut rise = 0.0;
        loop {
            vy += GRAVITY;
            if vy >= 0.0 {
                return rise;
            }
            rise -= vy;
        }
    }

    #[test]
    fn test_ledges_are_reachable() {
        assert!(MAX_LEDGE_CLIMB < jump_rise());

        for seed in 0..20 {
            let state = PlatformerState::new(seed);
            let mut prev_top = GROUND_Y;
            for ledge in state
                .platforms
                .iter()
                .filter(|p| p.kind == PlatformKind::Floating)
            {
                assert!(ledge.pos.y >= FLOATING_Y_MIN && ledge.pos.y <= LEDGE_Y_MAX);
                assert!(
                    prev_top - ledge.pos.y <= MAX_LEDGE_CLIMB + 1e-3,
                    "seed {} ledge at {} climbs {} from {}",
                    seed,
                    ledge.pos.x,
                    prev_top - ledge.pos.y,
                    prev_top
                );
                prev_top = ledge.pos.y;
            }
        }
    }

    #[test]
    fn test_platformer_spawn_area_is_solid() {
        for seed in 0..20 {
            let state = PlatformerState::new(seed);
            for i in 0..6 {
                let x = i as f32 * GROUND_WIDTH;
                assert!(
                    state
                        .platforms
                        .iter()
                        .any(|p| p.kind == PlatformKind::Ground && p.pos.x == x),
                    "seed {} missing ground at {}",
                    seed,
                    x
                );
            }
            assert!(state.enemies.iter().all(|e| e.vel_x.abs() == 1.0));
            assert!(!state.coins.is_empty());
        }
    }
}
