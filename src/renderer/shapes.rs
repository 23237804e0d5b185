//! Sprite generation from game state

use super::{Sprite, SpriteKind};
use crate::consts::*;
use crate::session::Game;
use crate::settings::Settings;
use crate::sim::Rect;

const CLOUD_COUNT: u32 = 30;
const CLOUD_SPACING: f32 = 300.0;
const CLOUD_PARALLAX: f32 = 0.3;
const CLOUD_SIZE: f32 = 48.0;
/// Platforms are drawn a little further off-screen than they collide
const PLATFORM_DRAW_MARGIN: f32 = 100.0;

/// Background clouds scrolling at a fraction of the view speed
fn clouds(view_x: f32, reduced_motion: bool) -> impl Iterator<Item = Sprite> {
    let scroll = if reduced_motion { 0.0 } else { view_x * CLOUD_PARALLAX };
    (0..CLOUD_COUNT).map(move |i| {
        // Remainder keeps the sign of the dividend, so clouds wrap in from the left edge
        let x = (i as f32 * CLOUD_SPACING - scroll) % (GAME_WIDTH + 400.0);
        let y = 50.0 + (i % 3) as f32 * 40.0;
        Sprite::new(SpriteKind::Cloud, Rect::new(x, y, CLOUD_SIZE, CLOUD_SIZE))
    })
}

/// Coin bob and spin from its animation counter
fn coin_sprite(rect: Rect, anim_frame: u32, reduced_motion: bool) -> Sprite {
    let mut sprite = Sprite::new(SpriteKind::Coin, rect);
    if !reduced_motion {
        let t = anim_frame as f32;
        sprite.scale = 1.0 + (t * 0.1).sin() * 0.1;
        sprite.rotation_deg = t * 3.0;
    }
    sprite
}

/// Build the full back-to-front draw list for the current state
pub fn draw_list(game: &Game, settings: &Settings) -> Vec<Sprite> {
    let view_x = game.view_x();
    let mut sprites: Vec<Sprite> = clouds(view_x, settings.reduced_motion).collect();

    for platform in game.platforms() {
        let rect = platform.rect().shifted_x(view_x);
        if rect.left() > -platform.width - PLATFORM_DRAW_MARGIN
            && rect.left() < GAME_WIDTH + PLATFORM_DRAW_MARGIN
        {
            sprites.push(Sprite::new(SpriteKind::Platform(platform.kind), rect));
        }
    }

    for coin in game.coins().iter().filter(|c| !c.collected) {
        let rect = coin.rect().shifted_x(view_x);
        if crate::in_window(rect.left(), 0.0) {
            sprites.push(coin_sprite(rect, coin.anim_frame, settings.reduced_motion));
        }
    }

    for enemy in game.enemies().iter().filter(|e| e.active) {
        let rect = enemy.rect().shifted_x(view_x);
        if crate::in_window(rect.left(), 0.0) {
            sprites.push(Sprite::new(SpriteKind::Enemy, rect));
        }
    }

    let player = game.player();
    let rect = Rect::new(
        game.player_screen_x(),
        player.pos.y,
        PLAYER_SIZE,
        PLAYER_SIZE,
    );
    sprites.push(Sprite::new(
        SpriteKind::Player {
            grounded: player.grounded,
            facing: player.facing,
        },
        rect,
    ));

    sprites
}
