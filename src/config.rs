use std::time::Duration;

use ratatui::style::Color;

use crate::error::ConfigError;
use crate::input::Direction;
use crate::snake::GridCell;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` is a playable cell. Cells are 1-based.
    #[must_use]
    pub fn contains(self, cell: GridCell) -> bool {
        cell.column >= 1
            && cell.row >= 1
            && cell.column <= i32::from(self.width)
            && cell.row <= i32::from(self.height)
    }

    /// Iterates over every playable cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = GridCell> {
        let width = i32::from(self.width);
        let height = i32::from(self.height);
        (1..=height).flat_map(move |row| (1..=width).map(move |column| GridCell::new(column, row)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Everything the movement engine needs to start a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid: GridSize,
    /// Simulated time per one-cell move.
    pub step_duration: Duration,
    pub initial_length: usize,
    /// Cell of the head when a run starts.
    pub start_cell: GridCell,
    /// `Direction::None` keeps the snake still until the first turn.
    pub start_direction: Direction,
    pub apple_start: GridCell,
    /// Fixed RNG seed for reproducible apple placement.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            step_duration: Duration::from_millis(DEFAULT_STEP_DURATION_MS),
            initial_length: DEFAULT_INITIAL_LENGTH,
            start_cell: DEFAULT_START_CELL,
            start_direction: Direction::None,
            apple_start: DEFAULT_APPLE_START,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Checks that a run can be laid out on the configured grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if self.step_duration.is_zero() {
            return Err(ConfigError::ZeroStepDuration);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        for (what, cell) in [("start cell", self.start_cell), ("apple start", self.apple_start)] {
            if !self.grid.contains(cell) {
                return Err(ConfigError::CellOutOfBounds {
                    what,
                    cell,
                    width,
                    height,
                });
            }
        }

        let tail = crate::snake::trailing_cells(
            self.start_cell,
            crate::snake::facing_for(self.start_direction),
            self.initial_length,
        )
        .last();
        if tail.is_some_and(|cell| !self.grid.contains(cell)) {
            return Err(ConfigError::InitialLengthTooLong {
                length: self.initial_length,
                width,
                height,
            });
        }

        Ok(())
    }
}

pub const DEFAULT_GRID_WIDTH: u16 = 17;
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Default time per one-cell move in milliseconds.
pub const DEFAULT_STEP_DURATION_MS: u64 = 150;

pub const DEFAULT_INITIAL_LENGTH: usize = 4;
pub const DEFAULT_START_CELL: GridCell = GridCell::new(5, 6);
pub const DEFAULT_APPLE_START: GridCell = GridCell::new(14, 6);

/// Frame pacing of the terminal loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Terminal columns used per grid cell (terminal cells are roughly 1:2).
pub const CELL_WIDTH: u16 = 2;

/// Color palette of the playfield.
#[derive(Debug)]
pub struct Palette {
    pub tile_light: Color,
    pub tile_dark: Color,
    pub background: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub apple: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
}

/// Checkerboard greens on a light-blue backdrop.
pub const PALETTE: Palette = Palette {
    tile_light: Color::Rgb(0x4C, 0xDC, 0x0E),
    tile_dark: Color::Rgb(0x44, 0xB6, 0x13),
    background: Color::Rgb(0x10, 0x99, 0xBB),
    snake_head: Color::Rgb(0x1E, 0x2A, 0x78),
    snake_body: Color::Rgb(0x2F, 0x4F, 0xC4),
    apple: Color::Rgb(0xD7, 0x26, 0x1E),
    border: Color::Rgb(0xCB, 0xED, 0xBC),
    hud_label: Color::White,
    hud_value: Color::Rgb(0xFF, 0xE0, 0x66),
    hud_accent: Color::Rgb(0xFF, 0x8C, 0x1A),
};

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶▶";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_APPLE: &str = "●●";
pub const GLYPH_TILE: &str = "  ";

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::ConfigError;
    use crate::input::Direction;
    use crate::snake::GridCell;

    use super::{EngineConfig, GridSize};

    #[test]
    fn grid_bounds_are_one_based() {
        let grid = GridSize {
            width: 17,
            height: 15,
        };

        assert!(grid.contains(GridCell::new(1, 1)));
        assert!(grid.contains(GridCell::new(17, 15)));
        assert!(!grid.contains(GridCell::new(0, 5)));
        assert!(!grid.contains(GridCell::new(18, 5)));
        assert!(!grid.contains(GridCell::new(5, 0)));
        assert!(!grid.contains(GridCell::new(5, 16)));
    }

    #[test]
    fn grid_cells_enumerates_every_cell_once() {
        let grid = GridSize {
            width: 3,
            height: 2,
        };

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.total_cells());
        assert_eq!(cells.first(), Some(&GridCell::new(1, 1)));
        assert_eq!(cells.last(), Some(&GridCell::new(3, 2)));
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_step_duration_is_rejected() {
        let config = EngineConfig {
            step_duration: Duration::ZERO,
            ..EngineConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroStepDuration));
    }

    #[test]
    fn start_cell_outside_grid_is_rejected() {
        let config = EngineConfig {
            start_cell: GridCell::new(18, 6),
            ..EngineConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::CellOutOfBounds {
                what: "start cell",
                ..
            })
        ));
    }

    #[test]
    fn snake_that_does_not_fit_behind_its_head_is_rejected() {
        let config = EngineConfig {
            initial_length: 6,
            start_cell: GridCell::new(5, 6),
            start_direction: Direction::Right,
            ..EngineConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InitialLengthTooLong { length: 6, .. })
        ));
    }
}
