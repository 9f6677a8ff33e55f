//! Tile-grid snake: a fixed-timestep movement and collision engine plus a
//! terminal frontend that drives it once per frame.

pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
