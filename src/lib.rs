//! Laser Invaders: a deterministic arcade-shooter core.
//!
//! - `geometry`: rectangles, clamping, injected randomness
//! - `config`: tuning values, loadable from JSON
//! - `entities`: pure data
//! - `compute`: factories, per-frame updaters and the `tick` driver
//! - `input`: key state → input flags
//! - `render`: collaborator traits and the event dispatcher

pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod render;

pub use compute::{init_state, tick};
pub use config::{ConfigError, GameConfig};
pub use entities::{Frame, GameEvent, GameState, GameStatus, Schedule};
