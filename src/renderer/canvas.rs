//! Canvas 2D painter (web only)

use web_sys::CanvasRenderingContext2d;

use super::{Palette, Sprite, SpriteKind};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::Facing;

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    palette: Palette,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, palette: Palette) -> Self {
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Self { ctx, palette }
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Clear to sky and draw every sprite back to front
    pub fn paint(&self, sprites: &[Sprite]) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(self.palette.sky);
        ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

        for sprite in sprites {
            match sprite.kind {
                SpriteKind::Platform(kind) => {
                    let r = sprite.rect;
                    ctx.set_fill_style_str(self.palette.platform(kind));
                    ctx.fill_rect(
                        r.pos.x as f64,
                        r.pos.y as f64,
                        r.size.x as f64,
                        r.size.y as f64,
                    );
                }
                SpriteKind::Cloud => self.glyph(sprite, "\u{2601}\u{fe0f}", false),
                SpriteKind::Coin => self.glyph(sprite, "\u{1fa99}", false),
                SpriteKind::Enemy => self.glyph(sprite, "\u{1f47e}", false),
                SpriteKind::Player { grounded, facing } => {
                    // Airborne frog is drawn slightly stretched
                    let mut sprite = *sprite;
                    if !grounded {
                        sprite.scale = 1.1;
                    }
                    self.glyph(&sprite, "\u{1f438}", facing == Facing::Left);
                }
            }
        }
    }

    /// Draw an emoji centered in the sprite rect with its transform
    fn glyph(&self, sprite: &Sprite, text: &str, mirror: bool) {
        let ctx = &self.ctx;
        let r = sprite.rect;
        let cx = (r.pos.x + r.size.x / 2.0) as f64;
        let cy = (r.pos.y + r.size.y / 2.0) as f64;

        ctx.save();
        let placed = ctx
            .translate(cx, cy)
            .and_then(|_| ctx.rotate((sprite.rotation_deg as f64).to_radians()))
            .and_then(|_| {
                let sx = (if mirror { -sprite.scale } else { sprite.scale }) as f64;
                ctx.scale(sx, sprite.scale as f64)
            });
        if placed.is_ok() {
            ctx.set_font(&format!("{}px sans-serif", r.size.y.round()));
            ctx.set_fill_style_str(self.palette.text);
            let _ = ctx.fill_text(text, 0.0, 0.0);
        }
        ctx.restore();
    }
}
