mod error;
mod intake;
mod loading;
mod quiz;
mod result;

use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::SessionState;

pub const TITLE: &str = "QUIZ APP";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        SessionState::Intake(form) => intake::render(frame, area, form),
        SessionState::Loading { .. } => loading::render(frame, area),
        SessionState::Error { reason } => error::render(frame, area, reason),
        SessionState::InProgress(progress) => quiz::render(frame, area, progress, app.user()),
        SessionState::Result(summary) => result::render(frame, area, summary),
    }

    if let Some(notice) = app.notice() {
        render_notice(frame, area, notice);
    }
}

/// Centered box of the given size, clamped to `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn title_line() -> Line<'static> {
    Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold()))
}

fn render_notice(frame: &mut Frame, area: Rect, notice: &str) {
    let popup = centered(area, 56, 7);
    let content = vec![
        Line::from(Span::styled(notice, Style::default().fg(Color::Yellow).bold())),
        Line::from(""),
        Line::from("press any key".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Notice ")
                .padding(Padding::uniform(1)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
