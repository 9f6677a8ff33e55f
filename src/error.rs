//! Error types for configuration and settings loading.
//!
//! The movement engine itself never fails once constructed; everything here
//! happens before the first frame.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::snake::GridCell;

/// Invalid engine configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("step duration must be greater than zero")]
    ZeroStepDuration,

    #[error("initial snake length must be at least 1")]
    ZeroInitialLength,

    #[error("initial snake length {length} does not fit a {width}x{height} grid")]
    InitialLengthTooLong { length: usize, width: u16, height: u16 },

    #[error("{what} {cell} lies outside the {width}x{height} grid")]
    CellOutOfBounds {
        what: &'static str,
        cell: GridCell,
        width: u16,
        height: u16,
    },
}

/// Failure while loading the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings at {path}: {error}")]
    Io { error: io::Error, path: PathBuf },

    #[error("malformed settings at {path}: {error}")]
    Parse {
        error: serde_json::Error,
        path: PathBuf,
    },

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}
