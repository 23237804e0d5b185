//! HUD and game-over text

use crate::session::Game;
use crate::sim::GamePhase;

/// Strings shown around the play area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub instructions: String,
    /// Present only once the run has ended
    pub game_over: Option<Vec<String>>,
}

pub fn hud(game: &Game) -> HudText {
    let score = format!("Score: {}", game.score());
    let hint = game.variant().instructions();

    let (instructions, summary) = match game {
        Game::Runner(s) => (
            format!("{} Speed: {:.1}x", hint, s.speed_multiplier),
            vec![
                format!("Final Score: {}", s.score),
                format!("Distance: {}m", s.distance_m()),
                format!("Max Speed: {:.1}x", s.speed_multiplier),
            ],
        ),
        Game::Platformer(s) => (
            format!(
                "{} Coins: {}/{}",
                hint,
                s.coins.len() - s.coins_remaining(),
                s.coins.len()
            ),
            vec![
                format!("Final Score: {}", s.score),
                format!(
                    "Coins: {}/{}",
                    s.coins.len() - s.coins_remaining(),
                    s.coins.len()
                ),
            ],
        ),
    };

    let game_over = (game.phase() == GamePhase::GameOver).then(|| {
        let mut lines = vec!["Game Over!".to_string()];
        lines.extend(summary);
        lines
    });

    HudText {
        score,
        instructions,
        game_over,
    }
}
