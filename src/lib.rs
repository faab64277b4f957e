//! A single maze-chase level: the maze is carved one step per frame, then
//! the player hunts for the goal while wandering enemies send them back to
//! the start.

pub mod agent;
pub mod audio;
pub mod config;
pub mod dir;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod maze;
pub mod random;
pub mod render;

pub use config::Config;
pub use dir::{Dir, Pos};
pub use error::{GameError, GameResult};
pub use game::{Game, GameEvent};
pub use input::DirectionInput;
pub use random::{RandomSource, RngSource, ScriptedSource};
