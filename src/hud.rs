//! Score and end-of-run overlay text

use crate::sim::{GamePhase, GameState};

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const WIN_TEXT: &str = "You Win!";
pub const RESTART_HINT: &str = "Press 'r' to restart";

/// Text to draw over the current frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub score: String,
    /// Big centred message once the run has ended
    pub banner: Option<&'static str>,
    pub hint: Option<&'static str>,
}

impl Overlay {
    pub fn for_state(state: &GameState) -> Self {
        let banner = match state.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(GAME_OVER_TEXT),
            GamePhase::Won => Some(WIN_TEXT),
        };
        Self {
            score: format!("Score: {}", state.score),
            banner,
            hint: banner.map(|_| RESTART_HINT),
        }
    }

    /// All lines, top to bottom
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![self.score.as_str()];
        lines.extend(self.banner);
        lines.extend(self.hint);
        lines
    }
}
