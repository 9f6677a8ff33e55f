use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::{Direction, direction_change_is_valid};

/// One tile of the movement grid, addressed by 1-based column and row.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub column: i32,
    pub row: i32,
}

impl GridCell {
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns the neighbouring cell in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            column: self.column + dc,
            row: self.row + dr,
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Orientation used to lay out a snake that starts without a heading.
#[must_use]
pub fn facing_for(direction: Direction) -> Direction {
    if direction.is_none() {
        Direction::Right
    } else {
        direction
    }
}

/// Cells of a straight snake of `length` whose head is at `head`, facing `facing`.
pub fn trailing_cells(
    head: GridCell,
    facing: Direction,
    length: usize,
) -> impl Iterator<Item = GridCell> {
    let back = facing.opposite();
    std::iter::successors(Some(head), move |cell| Some(cell.stepped(back))).take(length)
}

/// Ordered snake body plus its heading state.
///
/// The body front is the head. The active heading only changes inside
/// [`Snake::advance`], i.e. when the head sits on a tile center.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<GridCell>,
    heading: Direction,
    queued: Direction,
    /// Last non-`None` heading; reversal checks use it.
    facing: Direction,
    pending_growth: usize,
}

impl Snake {
    /// Creates a straight snake of `length` cells (at least one) ending at
    /// `head`, trailing away from `direction`.
    #[must_use]
    pub fn new(head: GridCell, direction: Direction, length: usize) -> Self {
        let facing = facing_for(direction);
        Self {
            body: trailing_cells(head, facing, length.max(1)).collect(),
            heading: direction,
            queued: direction,
            facing,
            pending_growth: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<GridCell>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            heading: direction,
            queued: direction,
            facing: facing_for(direction),
            pending_growth: 0,
        })
    }

    /// Queues a heading for the next step. Returns false when the request
    /// would reverse the snake into itself.
    pub fn queue_direction(&mut self, requested: Direction) -> bool {
        if !direction_change_is_valid(self.facing, requested) {
            return false;
        }
        self.queued = requested;
        true
    }

    /// Adds one segment at the tail on the next move.
    pub fn grow_next(&mut self) {
        self.pending_growth += 1;
    }

    /// Commits the queued heading and moves the head one cell. Trailing
    /// segments follow their predecessors' previous cells.
    ///
    /// Returns false when the head cell did not change, in which case the
    /// body is left untouched.
    pub fn advance(&mut self) -> bool {
        self.heading = self.queued;
        if !self.heading.is_none() {
            self.facing = self.heading;
        }

        let head = self.head();
        let next = head.stepped(self.heading);
        if next == head {
            return false;
        }

        self.body.push_front(next);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
        }
        true
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> GridCell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: GridCell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Heading used by the most recent move.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading that the next move will commit.
    #[must_use]
    pub fn queued_heading(&self) -> Direction {
        self.queued
    }

    /// Direction the head points at, even while stationary.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Segments owed from eaten apples that have not been placed yet.
    #[must_use]
    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &GridCell> {
        self.body.iter()
    }
}
