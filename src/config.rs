use std::str::FromStr;

use tracing::warn;

use crate::dir::Pos;
use crate::error::{GameError, GameResult};

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 36;
pub const DEFAULT_ENEMIES: usize = 5;
pub const PENALTY_SECS: f32 = 3.0;
pub const DEFAULT_FPS: u64 = 30;
pub const DEFAULT_HOLD_MS: u64 = 0;

/// Settings for one level session and the loop that drives it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub enemies: usize,
    pub penalty_secs: f32,
    /// Goal cell; bottom-right when unset.
    pub goal: Option<Pos>,
    pub seed: Option<u64>,
    pub fps: u64,
    /// How long a key counts as held after its last press or repeat. Zero
    /// means only during the frame the event arrived in, so a tap moves one
    /// cell and the terminal's key repeat keeps a held key moving.
    pub hold_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            enemies: DEFAULT_ENEMIES,
            penalty_secs: PENALTY_SECS,
            goal: None,
            seed: None,
            fps: DEFAULT_FPS,
            hold_ms: DEFAULT_HOLD_MS,
        }
    }
}

impl Config {
    /// Defaults overridden by `MAZE_SEED`, `MAZE_FPS` and `MAZE_HOLD_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(seed) = parse_var::<u64>(&lookup, "MAZE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(fps) = parse_var::<u64>(&lookup, "MAZE_FPS").filter(|v| *v > 0) {
            config.fps = fps;
        }
        if let Some(hold) = parse_var::<u64>(&lookup, "MAZE_HOLD_MS") {
            config.hold_ms = hold;
        }
        config
    }

    pub fn goal(&self) -> Pos {
        self.goal.unwrap_or(Pos::new(
            self.rows.saturating_sub(1),
            self.cols.saturating_sub(1),
        ))
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        let goal = self.goal();
        if goal.row >= self.rows || goal.col >= self.cols {
            return Err(GameError::InvalidConfig(format!(
                "goal ({}, {}) lies outside the {}x{} grid",
                goal.row, goal.col, self.rows, self.cols
            )));
        }
        if !(self.penalty_secs.is_finite() && self.penalty_secs >= 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "penalty duration must be a non-negative number of seconds, got {}",
                self.penalty_secs
            )));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}
