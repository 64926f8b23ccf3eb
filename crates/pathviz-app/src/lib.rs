//! Render-agnostic interaction layer for the pathfinding visualizer.
//!
//! [`Controller`] owns the grid, the start/end cells and the running search,
//! and applies user input expressed as [`Msg`] values. Frontends decide how
//! often to send [`Msg::Tick`]; each tick advances the search by
//! [`AppConfig::steps_per_tick`] expansions.

pub mod config;
pub mod controller;

pub use config::{AppConfig, DEFAULT_COLS, DEFAULT_ROWS};
pub use controller::{Controller, Mode, Msg, Notice, Phase};
