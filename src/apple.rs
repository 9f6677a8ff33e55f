use rand::Rng;

use crate::config::GridSize;
use crate::snake::{GridCell, Snake};

/// The single apple on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    pub cell: GridCell,
}

impl Apple {
    #[must_use]
    pub fn at(cell: GridCell) -> Self {
        Self { cell }
    }

    /// Score granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        1
    }

    /// Places an apple on a free cell, or returns `None` when the snake
    /// covers the whole grid.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<Self> {
        free_cell(rng, grid, snake).map(Self::at)
    }
}

/// Picks a cell uniformly at random among cells the snake does not occupy.
#[must_use]
pub fn free_cell<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<GridCell> {
    let candidates: Vec<GridCell> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{GridCell, Snake};

    use super::{Apple, free_cell};

    #[test]
    fn apple_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(GridCell::new(4, 1), Direction::Right, 4);
        let grid = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let cell = free_cell(&mut rng, grid, &snake).expect("grid has free cells");
            assert!(!snake.occupies(cell));
            assert!(grid.contains(cell));
        }
    }

    #[test]
    fn last_free_cell_is_always_chosen() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Snake::new(GridCell::new(3, 1), Direction::Right, 3);
        let grid = GridSize {
            width: 4,
            height: 1,
        };

        assert_eq!(
            Apple::spawn(&mut rng, grid, &snake),
            Some(Apple::at(GridCell::new(4, 1)))
        );
    }

    #[test]
    fn full_grid_has_no_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = Snake::new(GridCell::new(2, 1), Direction::Right, 2);
        let grid = GridSize {
            width: 2,
            height: 1,
        };

        assert_eq!(free_cell(&mut rng, grid, &snake), None);
    }
}
