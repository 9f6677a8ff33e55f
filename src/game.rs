use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::apple::{Apple, free_cell};
use crate::config::{EngineConfig, GridSize};
use crate::error::ConfigError;
use crate::input::{Direction, GameInput};
use crate::snake::{GridCell, Snake};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    Over,
}

/// Inputs to the lifecycle transition table.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusEvent {
    TogglePause,
    Collision,
    Restart,
}

impl GameStatus {
    /// Applies one lifecycle event. Only a restart leaves `Over`.
    #[must_use]
    pub fn next(self, event: StatusEvent) -> Self {
        match (self, event) {
            (_, StatusEvent::Restart) => Self::Running,
            (Self::Running, StatusEvent::TogglePause) => Self::Paused,
            (Self::Paused, StatusEvent::TogglePause) => Self::Running,
            (Self::Running, StatusEvent::Collision) => Self::Over,
            (status, _) => status,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OverReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no apple can be placed.
    BoardFilled,
}

/// Something observable that happened during a step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    Moved { head: GridCell },
    AppleEaten { cell: GridCell, score: u32 },
    GameOver { reason: OverReason, score: u32 },
}

/// Result of one `tick` call.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TickReport {
    /// Discrete steps consumed from the accumulator.
    pub steps: u32,
    pub events: Vec<GameEvent>,
}

/// Fixed-timestep snake simulation on a bounded tile grid.
///
/// Driven from a single frame loop: `set_direction` and `tick` take
/// `&mut self` and must not be interleaved from separate threads.
#[derive(Debug, Clone)]
pub struct GridMovementEngine {
    config: EngineConfig,
    snake: Snake,
    apple: Apple,
    score: u32,
    high_score: u32,
    new_high_score: bool,
    status: GameStatus,
    over_reason: Option<OverReason>,
    accumulator: Duration,
    step_count: u64,
    rng: StdRng,
}

impl GridMovementEngine {
    /// Validates `config` and starts the first run.
    ///
    /// Apple placement is seeded from `config.seed` when present.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::new(
            config.start_cell,
            config.start_direction,
            config.initial_length,
        );
        let mut engine = Self {
            apple: Apple::at(config.apple_start),
            snake,
            config,
            score: 0,
            high_score: 0,
            new_high_score: false,
            status: GameStatus::Running,
            over_reason: None,
            accumulator: Duration::ZERO,
            step_count: 0,
            rng,
        };
        engine.restart();
        Ok(engine)
    }

    /// Starts a new run with a straight snake of `initial_length` cells whose
    /// head is at `start_cell`, heading `start_direction`.
    ///
    /// The high score is left alone; only a finished run can raise it.
    pub fn initialize(
        &mut self,
        initial_length: usize,
        start_cell: GridCell,
        start_direction: Direction,
    ) {
        self.snake = Snake::new(start_cell, start_direction, initial_length);
        self.apple = self.starting_apple();
        self.score = 0;
        self.new_high_score = false;
        self.status = self.status.next(StatusEvent::Restart);
        self.over_reason = None;
        self.accumulator = Duration::ZERO;
        self.step_count = 0;

        info!(
            length = self.snake.len(),
            head = %start_cell,
            heading = ?start_direction,
            apple = %self.apple.cell,
            "run started"
        );
    }

    /// Starts a new run from the configured start position.
    pub fn restart(&mut self) {
        let EngineConfig {
            initial_length,
            start_cell,
            start_direction,
            ..
        } = self.config;
        self.initialize(initial_length, start_cell, start_direction);
    }

    fn starting_apple(&mut self) -> Apple {
        let configured = self.config.apple_start;
        if self.config.grid.contains(configured) && !self.snake.occupies(configured) {
            return Apple::at(configured);
        }

        free_cell(&mut self.rng, self.config.grid, &self.snake)
            .map_or(Apple::at(configured), Apple::at)
    }

    /// Queues a heading for the next step. Reversals are ignored.
    ///
    /// Accepted while paused; ignored once the run is over.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status == GameStatus::Over {
            return;
        }

        let accepted = self.snake.queue_direction(requested);
        debug!(?requested, accepted, "direction request");
    }

    /// Flips between running and paused. Does nothing once the run is over.
    pub fn toggle_pause(&mut self) {
        self.status = self.status.next(StatusEvent::TogglePause);
        debug!(status = ?self.status, "pause toggled");
    }

    /// Applies one external input event. `Quit` is left to the caller.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.set_direction(direction),
            GameInput::Pause => self.toggle_pause(),
            GameInput::Restart => self.restart(),
            GameInput::Quit => {}
        }
    }

    /// Advances the simulation by `delta` of wall-clock time.
    ///
    /// Time only accrues while running. Each full `step_duration` in the
    /// accumulator moves the snake one cell.
    pub fn tick(&mut self, delta: Duration) -> TickReport {
        let mut report = TickReport::default();
        if self.status != GameStatus::Running {
            return report;
        }

        let step = self.config.step_duration;
        self.accumulator = self.accumulator.saturating_add(delta);
        while self.accumulator >= step {
            self.accumulator -= step;
            report.steps = report.steps.saturating_add(1);

            if !self.step(&mut report.events) {
                // Stationary until a heading arrives: the rest of the backlog
                // would only repeat this step.
                self.skip_idle_steps(&mut report);
                break;
            }

            if self.status == GameStatus::Over {
                self.accumulator = Duration::ZERO;
                break;
            }
        }

        report
    }

    /// Runs one step. Returns false when the head did not change cell.
    fn step(&mut self, events: &mut Vec<GameEvent>) -> bool {
        self.step_count = self.step_count.saturating_add(1);

        // No discrete move means nothing to shift, eat, or hit.
        if !self.snake.advance() {
            return false;
        }

        let head = self.snake.head();
        debug!(step = self.step_count, head = %head, "snake moved");
        events.push(GameEvent::Moved { head });

        if head == self.apple.cell {
            self.eat_apple(events);
        }

        if self.status == GameStatus::Over {
            return true;
        }

        if !self.config.grid.contains(head) {
            self.end_run(OverReason::WallCollision, events);
        } else if self.snake.head_overlaps_body() {
            self.end_run(OverReason::SelfCollision, events);
        }
        true
    }

    /// Consumes every whole step left in the accumulator without moving.
    fn skip_idle_steps(&mut self, report: &mut TickReport) {
        let step_nanos = self.config.step_duration.as_nanos();
        let backlog = self.accumulator.as_nanos();
        let skipped = backlog / step_nanos;
        let remainder = backlog % step_nanos;

        // The remainder is below the accumulator, so it fits a `Duration`.
        self.accumulator = Duration::new(
            (remainder / 1_000_000_000) as u64,
            (remainder % 1_000_000_000) as u32,
        );
        report.steps = report
            .steps
            .saturating_add(u32::try_from(skipped).unwrap_or(u32::MAX));
        self.step_count = self
            .step_count
            .saturating_add(u64::try_from(skipped).unwrap_or(u64::MAX));
    }

    fn eat_apple(&mut self, events: &mut Vec<GameEvent>) {
        let eaten = self.apple.cell;
        self.score += self.apple.points();
        self.snake.grow_next();
        info!(cell = %eaten, score = self.score, "apple eaten");
        events.push(GameEvent::AppleEaten {
            cell: eaten,
            score: self.score,
        });

        match Apple::spawn(&mut self.rng, self.config.grid, &self.snake) {
            Some(apple) => self.apple = apple,
            None => self.end_run(OverReason::BoardFilled, events),
        }
    }

    fn end_run(&mut self, reason: OverReason, events: &mut Vec<GameEvent>) {
        self.status = self.status.next(StatusEvent::Collision);
        self.over_reason = Some(reason);
        self.new_high_score = self.score > self.high_score;
        self.high_score = self.high_score.max(self.score);

        info!(
            ?reason,
            score = self.score,
            high_score = self.high_score,
            steps = self.step_count,
            "game over"
        );
        events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
    }

    /// Moves the apple to `cell`. Scenario hook for scripted runs and
    /// tests; normal play relocates the apple itself.
    ///
    /// Cells outside the grid or under the snake are refused and leave the
    /// apple where it was.
    pub fn place_apple(&mut self, cell: GridCell) -> bool {
        if !self.config.grid.contains(cell) || self.snake.occupies(cell) {
            debug!(cell = %cell, "apple placement refused");
            return false;
        }

        self.apple = Apple::at(cell);
        true
    }

    /// Fraction of the current step already accumulated, in `[0, 1)`.
    #[must_use]
    pub fn step_progress(&self) -> f32 {
        (self.accumulator.as_secs_f32() / self.config.step_duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Occupied cells, head first.
    pub fn segments(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.snake.segments().copied()
    }

    #[must_use]
    pub fn apple(&self) -> GridCell {
        self.apple.cell
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True once a finished run has beaten the previous high score.
    /// A tie does not count.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn over_reason(&self) -> Option<OverReason> {
        self.over_reason
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Steps taken in the current run, including stationary ones.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// True before the first move of a run that started without a heading.
    #[must_use]
    pub fn is_waiting_for_first_move(&self) -> bool {
        self.status == GameStatus::Running
            && self.snake.heading().is_none()
            && self.snake.queued_heading().is_none()
    }
}
