use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{GameError, GameResult};

pub const LOG_FILE_VAR: &str = "MAZE_LOG";
pub const LOG_LEVEL_VAR: &str = "MAZE_LOG_LEVEL";

/// Installs a file-backed subscriber when `MAZE_LOG` names a path. The
/// terminal is owned by the game, so nothing is logged to stdout.
pub fn init_from_env() -> GameResult<bool> {
    match std::env::var_os(LOG_FILE_VAR) {
        Some(path) => init(Path::new(&path)).map(|_| true),
        None => Ok(false),
    }
}

pub fn init(path: &Path) -> GameResult<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_LEVEL_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))
}
