//! Fixed timestep simulation tick
//!
//! One call advances a game by exactly one 16ms frame. Physics constants are
//! tuned per tick, so there is no delta time.

use super::rect::Rect;
use super::state::{Facing, GamePhase, Platform, PlatformerState, Player, RunnerState};
use super::worldgen;
use crate::consts::*;
use crate::in_window;

/// Input commands for a single tick, sampled from held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key held (level triggered, no debounce)
    pub jump: bool,
    /// Move left held (platformer only)
    pub left: bool,
    /// Move right held (platformer only)
    pub right: bool,
}

/// Start a jump if the player is standing on something
fn try_jump(player: &mut Player, input: &TickInput) {
    if input.jump && player.grounded {
        player.vel.y = JUMP_FORCE;
        player.grounded = false;
    }
}

/// Gravity is applied every tick, grounded or not; landing cancels it
fn integrate(player: &mut Player) {
    player.vel.y += GRAVITY;
    player.pos += player.vel;
}

/// The player came down onto the platform from above
#[inline]
fn lands_from_above(player: &Player, platform: &Rect) -> bool {
    player.vel.y >= 0.0 && player.pos.y < platform.top()
}

/// Resolve one-way landings against candidate platform rects, given in the
/// same space as the player.
fn resolve_landing(player: &mut Player, candidates: impl Iterator<Item = Rect>) {
    player.grounded = false;
    for platform in candidates {
        if player.rect().overlaps(&platform) && lands_from_above(player, &platform) {
            player.pos.y = platform.top() - PLAYER_SIZE;
            player.vel.y = 0.0;
            player.grounded = true;
        }
    }
}

#[inline]
fn fell_off_world(player: &Player) -> bool {
    player.pos.y > GAME_HEIGHT + DEATH_MARGIN
}

/// Platforms near the view, translated into screen space
fn runner_candidates(platforms: &[Platform], offset: f32) -> impl Iterator<Item = Rect> + '_ {
    platforms
        .iter()
        .map(move |p| p.rect().shifted_x(offset))
        .filter(|r| in_window(r.left(), r.size.x))
}

/// Advance the runner by one tick
pub fn tick_runner(state: &mut RunnerState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Everything this tick is resolved against the tick-start scroll offset
    let offset = state.world_offset;
    let multiplier = state.speed_multiplier;

    // Scroll, accelerate, score distance
    state.world_offset += WORLD_SPEED * multiplier;
    state.speed_multiplier = (multiplier + SPEED_STEP).min(MAX_SPEED_MULTIPLIER);
    state.score += multiplier.floor() as u64;

    // Pickups and hazards are tested against where the player started the tick
    let player_rect = state.player.rect();

    // Player physics
    let player = &mut state.player;
    try_jump(player, input);
    integrate(player);
    resolve_landing(player, runner_candidates(&state.platforms, offset));

    if fell_off_world(&state.player) {
        end_runner(state, "fell");
        return;
    }
    state.player.advance_anim();

    // Coins
    for coin in &mut state.coins {
        if coin.collected {
            continue;
        }
        let rect = coin.rect().shifted_x(offset);
        if in_window(rect.left(), 0.0) && rect.overlaps(&player_rect) {
            coin.collected = true;
            state.score += COIN_SCORE;
            continue;
        }
        coin.advance_anim();
    }

    // Enemies: any contact is fatal
    let mut hit = false;
    for enemy in &mut state.enemies {
        if !enemy.active {
            continue;
        }
        let rect = enemy.rect().shifted_x(offset);
        if in_window(rect.left(), 0.0) && rect.overlaps(&player_rect) {
            hit = true;
            break;
        }
        enemy.advance_anim();
    }
    if hit {
        end_runner(state, "hit an enemy");
        return;
    }

    if worldgen::needs_extension(state, offset) {
        worldgen::extend_runner_world(state);
    }
}

fn end_runner(state: &mut RunnerState, cause: &str) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Runner over ({}) after {} ticks: score {}, distance {}m, speed {:.1}x",
        cause,
        state.time_ticks,
        state.score,
        state.distance_m(),
        state.speed_multiplier
    );
}

/// Horizontal steering with friction when no direction is held
fn steer(player: &mut Player, input: &TickInput) {
    if input.left {
        player.vel.x = -MOVE_SPEED;
        player.facing = Facing::Left;
    } else if input.right {
        player.vel.x = MOVE_SPEED;
        player.facing = Facing::Right;
    } else {
        player.vel.x *= FRICTION;
    }
}

/// Advance the platformer by one tick
pub fn tick_platformer(state: &mut PlatformerState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // The camera follows the position the player had before this tick
    let prev_x = state.player.pos.x;
    let camera = state.camera_x;
    let player_rect = state.player.rect();

    let player = &mut state.player;
    steer(player, input);
    try_jump(player, input);
    integrate(player);

    let max_x = state.level_width - PLAYER_SIZE;
    if player.pos.x < 0.0 || player.pos.x > max_x {
        player.pos.x = player.pos.x.clamp(0.0, max_x);
        player.vel.x = 0.0;
    }

    resolve_landing(
        player,
        state
            .platforms
            .iter()
            .filter(|p| in_window(p.pos.x - camera, p.width))
            .map(Platform::rect),
    );

    if fell_off_world(&state.player) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Platformer over after {} ticks: score {}, {} coins left",
            state.time_ticks,
            state.score,
            state.coins_remaining()
        );
        return;
    }
    state.player.advance_anim();

    for coin in &mut state.coins {
        if coin.collected {
            continue;
        }
        if in_window(coin.pos.x - camera, 0.0) && coin.rect().overlaps(&player_rect) {
            coin.collected = true;
            state.score += COIN_SCORE;
            continue;
        }
        coin.advance_anim();
    }

    // Decorative: patrol velocity is never integrated and contact is harmless
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        enemy.advance_anim();
    }

    state.camera_x = (prev_x - GAME_WIDTH / 2.0).max(0.0);
}

/// Pure runner step: returns the next snapshot, leaving `state` untouched
pub fn advance_runner(state: &RunnerState, input: &TickInput) -> RunnerState {
    let mut next = state.clone();
    tick_runner(&mut next, input);
    next
}

/// Pure platformer step: returns the next snapshot, leaving `state` untouched
pub fn advance_platformer(state: &PlatformerState, input: &TickInput) -> PlatformerState {
    let mut next = state.clone();
    tick_platformer(&mut next, input);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy};
    use glam::Vec2;

    const JUMP: TickInput = TickInput {
        jump: true,
        left: false,
        right: false,
    };

    /// Runner with the player standing on a single platform under it
    fn runner_on_ledge() -> RunnerState {
        let mut state = RunnerState::new(1);
        state.coins.clear();
        state.enemies.clear();
        state.platforms = vec![Platform::floating(9_000, 90.0, 420.0)];
        state.player.pos.y = 420.0 - PLAYER_SIZE;
        state.player.grounded = true;
        state
    }

    #[test]
    fn test_first_runner_tick() {
        let mut state = RunnerState::new(12345);
        tick_runner(&mut state, &TickInput::default());

        assert!((state.player.vel.y - 0.8).abs() < 1e-6);
        assert!((state.player.pos.y - 400.8).abs() < 1e-4);
        assert_eq!(state.score, 1);
        assert!((state.world_offset - 2.5).abs() < 1e-6);
        assert!((state.speed_multiplier - 1.002).abs() < 1e-6);
        assert!(!state.player.grounded);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        let mut state = runner_on_ledge();
        state.player.pos.y = 395.0;
        state.player.vel.y = 2.0;
        state.player.grounded = false;

        tick_runner(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.y, 420.0 - PLAYER_SIZE);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_standing_is_stable() {
        let mut state = runner_on_ledge();
        for _ in 0..5 {
            tick_runner(&mut state, &TickInput::default());
            assert_eq!(state.player.pos.y, 388.0);
            assert!(state.player.grounded);
        }
    }

    #[test]
    fn test_rising_player_passes_through_platform() {
        let mut state = runner_on_ledge();
        state.player.pos.y = 410.0;
        state.player.vel.y = -10.0;
        state.player.grounded = false;

        tick_runner(&mut state, &TickInput::default());
        assert!(!state.player.grounded);
        assert!((state.player.vel.y - -9.2).abs() < 1e-5);
    }

    #[test]
    fn test_held_jump_retriggers() {
        let mut state = runner_on_ledge();
        let mut jumps = 0;
        for _ in 0..120 {
            let was_grounded = state.player.grounded;
            tick_runner(&mut state, &JUMP);
            if was_grounded && state.player.vel.y < 0.0 {
                jumps += 1;
            }
        }
        assert!(jumps >= 2, "expected repeated jumps, got {}", jumps);
    }

    #[test]
    fn test_fall_ends_run_and_freezes_state() {
        let mut state = RunnerState::new(2);
        state.platforms.clear();
        state.player.pos.y = 699.5;

        tick_runner(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen = state.clone();
        for _ in 0..10 {
            tick_runner(&mut state, &JUMP);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_enemy_contact_is_fatal() {
        let mut state = runner_on_ledge();
        state.enemies.push(Enemy::new(9_001, 110.0, 0.0));
        state.enemies[0].pos.y = 380.0;

        tick_runner(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.enemies[0].anim_frame, 0);
    }

    #[test]
    fn test_coin_taken_from_tick_start_position() {
        let mut state = runner_on_ledge();
        state.platforms.clear();
        state.player.pos.y = 400.0;
        state.player.vel.y = 10.0;
        state.player.grounded = false;
        state.coins.push(Coin::new(9_002, 105.0, 385.0));

        tick_runner(&mut state, &TickInput::default());
        // Already below the coin after moving, but it overlapped at tick start
        assert!(state.player.pos.y > 405.0);
        assert!(state.coins[0].collected);
        assert_eq!(state.score, 1 + COIN_SCORE);
    }

    #[test]
    fn test_jumping_away_does_not_dodge_enemy() {
        let mut state = runner_on_ledge();
        state.enemies.push(Enemy::new(9_001, 110.0, 0.0));
        state.enemies[0].pos.y = 410.0;

        tick_runner(&mut state, &JUMP);
        assert!(state.player.pos.y + PLAYER_SIZE < 410.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_enemy_out_of_reach_animates() {
        let mut state = runner_on_ledge();
        state.enemies.push(Enemy::new(9_001, 600.0, 0.0));

        tick_runner(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies[0].anim_frame, 1);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = runner_on_ledge();
        state.coins.push(Coin::new(9_002, 105.0, 380.0));
        state.coins.push(Coin::new(9_003, 700.0, 380.0));
        let score = state.score;

        tick_runner(&mut state, &TickInput::default());
        assert!(state.coins[0].collected);
        assert_eq!(state.coins[0].anim_frame, 0);
        assert_eq!(state.coins[1].anim_frame, 1);
        // 1 for distance + coin bonus
        assert_eq!(state.score, score + 1 + COIN_SCORE);

        let after = state.score;
        tick_runner(&mut state, &TickInput::default());
        assert!(state.coins[0].collected);
        assert_eq!(state.score, after + 1);
    }

    #[test]
    fn test_speed_caps() {
        let mut state = runner_on_ledge();
        state.speed_multiplier = MAX_SPEED_MULTIPLIER - 0.001;
        tick_runner(&mut state, &TickInput::default());
        assert_eq!(state.speed_multiplier, MAX_SPEED_MULTIPLIER);
        let score = state.score;
        tick_runner(&mut state, &TickInput::default());
        assert_eq!(state.speed_multiplier, MAX_SPEED_MULTIPLIER);
        assert_eq!(state.score, score + 2);
    }

    #[test]
    fn test_world_extends_during_play() {
        let mut state = RunnerState::new(3);
        state.enemies.clear();
        state.world_offset = 26_901.0;
        let frontier = state.frontier();

        tick_runner(&mut state, &TickInput::default());
        assert!(state.frontier() > frontier);
    }

    #[test]
    fn test_advance_leaves_input_untouched() {
        let state = RunnerState::new(4);
        let next = advance_runner(&state, &JUMP);
        assert_eq!(state, RunnerState::new(4));
        assert_eq!(next.time_ticks, 1);
    }

    #[test]
    fn test_runner_determinism() {
        let mut a = RunnerState::new(99_999);
        let mut b = RunnerState::new(99_999);
        let inputs = [TickInput::default(), JUMP, TickInput::default(), JUMP];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick_runner(&mut a, input);
            tick_runner(&mut b, input);
        }
        assert_eq!(a, b);
    }

    /// Platformer with the player resting on flat ground
    fn platformer_on_ground() -> PlatformerState {
        let mut state = PlatformerState::new(5);
        state.platforms = (0..40)
            .map(|i| Platform::ground(10_000 + i, i as f32 * GROUND_WIDTH))
            .collect();
        state.coins.clear();
        state.player.pos.y = GROUND_Y - PLAYER_SIZE;
        state.player.grounded = true;
        state
    }

    #[test]
    fn test_platformer_steering_and_friction() {
        let mut state = platformer_on_ground();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let right = TickInput {
            right: true,
            ..Default::default()
        };

        tick_platformer(&mut state, &right);
        assert_eq!(state.player.vel.x, MOVE_SPEED);
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.player.pos.x, PLAYER_START_X + MOVE_SPEED);

        tick_platformer(&mut state, &TickInput::default());
        assert!((state.player.vel.x - MOVE_SPEED * FRICTION).abs() < 1e-6);
        assert_eq!(state.player.facing, Facing::Right);

        tick_platformer(&mut state, &left);
        assert_eq!(state.player.vel.x, -MOVE_SPEED);
        assert_eq!(state.player.facing, Facing::Left);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_platformer_clamps_to_level() {
        let mut state = platformer_on_ground();
        state.player.pos.x = 2.0;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick_platformer(&mut state, &left);
        assert_eq!(state.player.pos.x, 0.0);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn test_camera_lags_one_tick() {
        let mut state = platformer_on_ground();
        state.player.pos.x = 1_000.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };

        tick_platformer(&mut state, &right);
        assert_eq!(state.camera_x, 1_000.0 - GAME_WIDTH / 2.0);
        assert_eq!(state.player.pos.x, 1_005.0);

        tick_platformer(&mut state, &right);
        assert_eq!(state.camera_x, 1_005.0 - GAME_WIDTH / 2.0);
    }

    #[test]
    fn test_camera_never_negative() {
        let mut state = platformer_on_ground();
        for _ in 0..30 {
            tick_platformer(&mut state, &TickInput::default());
            assert_eq!(state.camera_x, 0.0);
        }
    }

    #[test]
    fn test_platformer_enemies_are_harmless() {
        let mut state = platformer_on_ground();
        state.enemies = vec![Enemy::new(20_000, PLAYER_START_X, 1.0)];

        for _ in 0..10 {
            tick_platformer(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies[0].pos.x, PLAYER_START_X);
        assert_eq!(state.enemies[0].anim_frame, 10);
    }

    #[test]
    fn test_platformer_coin_pickup() {
        let mut state = platformer_on_ground();
        state.coins = vec![Coin::new(20_001, 110.0, 510.0)];

        tick_platformer(&mut state, &TickInput::default());
        assert!(state.coins[0].collected);
        assert_eq!(state.score, COIN_SCORE);
        assert_eq!(state.coins_remaining(), 0);
    }

    #[test]
    fn test_platformer_coin_taken_from_tick_start_position() {
        let mut state = platformer_on_ground();
        // Touching the player's left side; the player walks away this tick
        state.coins = vec![Coin::new(20_001, 85.0, 520.0)];
        let right = TickInput {
            right: true,
            ..Default::default()
        };

        tick_platformer(&mut state, &right);
        assert_eq!(state.player.pos.x, PLAYER_START_X + MOVE_SPEED);
        assert!(state.coins[0].collected);
        assert_eq!(state.score, COIN_SCORE);
    }

    #[test]
    fn test_platformer_fall_into_gap() {
        let mut state = platformer_on_ground();
        state.platforms.clear();
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 200 {
            tick_platformer(&mut state, &TickInput::default());
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.player.pos.y > GAME_HEIGHT + DEATH_MARGIN);
    }

    #[test]
    fn test_advance_platformer_is_pure() {
        let state = PlatformerState::new(8);
        let next = advance_platformer(&state, &JUMP);
        assert_eq!(state, PlatformerState::new(8));
        assert_eq!(next.time_ticks, 1);
        assert_ne!(next.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
    }
}
