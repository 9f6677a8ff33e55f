use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::PALETTE;
use crate::game::OverReason;

/// Draws a one-line prompt on the bottom border of the board.
pub fn render_start_hint(frame: &mut Frame<'_>, board: Rect) {
    if board.height == 0 {
        return;
    }

    let row = Rect {
        y: board.bottom().saturating_sub(1),
        height: 1,
        ..board
    };
    frame.render_widget(
        Paragraph::new(Line::from(" press an arrow key "))
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.hud_value)),
        row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
///
/// `is_new_high` marks a run that beat the previous best.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    is_new_high: bool,
    reason: Option<OverReason>,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let title = if reason == Some(OverReason::BoardFilled) {
        "YOU WIN"
    } else {
        "GAME OVER"
    };
    let lines = vec![
        Line::from(title).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {high_score}")),
        Line::from(reason_text(reason)),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("Press ENTER to restart"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn reason_text(reason: Option<OverReason>) -> &'static str {
    match reason {
        Some(OverReason::WallCollision) => "Cause: hit wall",
        Some(OverReason::SelfCollision) => "Cause: hit yourself",
        Some(OverReason::BoardFilled) => "Board filled",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
