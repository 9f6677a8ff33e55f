use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_WIDTH, GLYPH_APPLE, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_TILE, GridSize, PALETTE,
};
use crate::game::{GameStatus, GridMovementEngine};
use crate::input::Direction;
use crate::snake::GridCell;
use crate::ui::hud::{HUD_WIDTH, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_hint};

/// Renders the full game frame from immutable engine state.
pub fn render(frame: &mut Frame<'_>, engine: &GridMovementEngine) {
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(PALETTE.background)),
        area,
    );

    let grid = engine.grid();
    let board_width = grid.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let board_height = grid.height.saturating_add(2);

    let [board_area, hud_area] = Layout::horizontal([
        Constraint::Length(board_width),
        Constraint::Length(HUD_WIDTH),
    ])
    .flex(Flex::Center)
    .spacing(2)
    .areas(area);
    let [board_area] = Layout::vertical([Constraint::Length(board_height)])
        .flex(Flex::Center)
        .areas(board_area);

    let block = Block::bordered()
        .border_style(Style::new().fg(PALETTE.border).bg(PALETTE.background));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_tiles(frame, inner, grid);
    render_apple(frame, inner, grid, engine.apple());
    render_snake(frame, inner, engine);
    render_hud(frame, hud_area, engine);

    if engine.is_waiting_for_first_move() {
        render_start_hint(frame, board_area);
        return;
    }

    match engine.status() {
        GameStatus::Paused => render_pause_menu(frame, board_area),
        GameStatus::Over => render_game_over_menu(
            frame,
            board_area,
            engine.score(),
            engine.high_score(),
            engine.is_new_high_score(),
            engine.over_reason(),
        ),
        GameStatus::Running => {}
    }
}

fn render_tiles(frame: &mut Frame<'_>, inner: Rect, grid: GridSize) {
    let buffer = frame.buffer_mut();
    for cell in grid.cells() {
        let Some((x, y)) = logical_to_terminal(inner, grid, cell) else {
            continue;
        };

        let color = if (cell.column + cell.row) % 2 == 0 {
            PALETTE.tile_light
        } else {
            PALETTE.tile_dark
        };
        buffer.set_string(x, y, GLYPH_TILE, Style::new().bg(color));
    }
}

fn render_apple(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, apple: GridCell) {
    let Some((x, y)) = logical_to_terminal(inner, grid, apple) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_APPLE, Style::new().fg(PALETTE.apple));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, engine: &GridMovementEngine) {
    let grid = engine.grid();
    let buffer = frame.buffer_mut();

    // Tail first so the head wins on overlap after a self collision.
    let segments: Vec<GridCell> = engine.segments().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(engine.snake().facing()),
                Style::new()
                    .fg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(PALETTE.snake_body));
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right | Direction::None => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a 1-based grid cell to the terminal position of its left column.
fn logical_to_terminal(inner: Rect, grid: GridSize, cell: GridCell) -> Option<(u16, u16)> {
    if !grid.contains(cell) {
        return None;
    }

    let column = u16::try_from(cell.column - 1).ok()?;
    let row = u16::try_from(cell.row - 1).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_WIDTH));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
