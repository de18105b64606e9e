//! Fetch failure screen.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use super::title_line;

pub fn render(frame: &mut Frame, area: Rect, reason: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(9),
        Constraint::Percentage(35),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        title_line(),
        Line::from(""),
        Line::from(Span::styled(
            format!("Error: {reason}"),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Try Again  ·  [Q] quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
}
