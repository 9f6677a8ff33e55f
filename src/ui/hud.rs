use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;
use crate::game::GridMovementEngine;

/// Terminal columns reserved for the side panel.
pub const HUD_WIDTH: u16 = 20;

const KEY_LEGEND: [(&str, &str); 4] = [
    ("Move", "arrows"),
    ("Pause", "SPACE"),
    ("Restart", "ENTER"),
    ("Quit", "Q"),
];

/// Renders the score panel and key legend next to the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, engine: &GridMovementEngine) {
    let [scores_area, legend_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Length(6)])
            .spacing(1)
            .areas(area);

    let inner_width = usize::from(HUD_WIDTH.saturating_sub(2));
    // The high score only moves at game over, so a live run must beat it.
    let is_new_high = engine.is_new_high_score() || engine.score() > engine.high_score();
    let score_style = if is_new_high {
        Style::new()
            .fg(PALETTE.hud_accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(PALETTE.hud_value)
    };

    let scores = vec![
        stat_line("Score", engine.score().to_string(), score_style, inner_width),
        stat_line(
            "High score",
            engine.high_score().max(engine.score()).to_string(),
            Style::new().fg(PALETTE.hud_value),
            inner_width,
        ),
        stat_line(
            "Length",
            engine.snake().len().to_string(),
            Style::new().fg(PALETTE.hud_value),
            inner_width,
        ),
    ];
    frame.render_widget(
        Paragraph::new(scores).block(panel_block(" snake ")),
        scores_area,
    );

    let legend: Vec<Line<'_>> = KEY_LEGEND
        .iter()
        .map(|(action, key)| {
            stat_line(
                action,
                (*key).to_owned(),
                Style::new().fg(PALETTE.hud_value),
                inner_width,
            )
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).block(panel_block(" keys ")),
        legend_area,
    );
}

fn panel_block(title: &str) -> Block<'_> {
    Block::bordered()
        .title(title)
        .style(Style::new().fg(PALETTE.hud_label).bg(PALETTE.background))
}

/// One `label ..... value` row padded to `width` display columns.
fn stat_line(label: &str, value: String, value_style: Style, width: usize) -> Line<'static> {
    let gap = width
        .saturating_sub(label.width())
        .saturating_sub(value.width())
        .max(1);

    Line::from(vec![
        Span::styled(label.to_owned(), Style::new().fg(PALETTE.hud_label)),
        Span::raw(" ".repeat(gap)),
        Span::styled(value, value_style),
    ])
}
