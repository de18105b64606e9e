//! Name and email entry.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::{Field, IntakeForm};

use super::title_line;

pub fn render(frame: &mut Frame, area: Rect, form: &IntakeForm) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        title_line(),
        Line::from(""),
        Line::from("Enter your details to start".fg(Color::DarkGray)),
        Line::from(""),
        field_line("Name", &form.name, form.focus == Field::Name),
        Line::from(""),
        field_line("Email", &form.email, form.focus == Field::Email),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Start Quiz  ·  [Tab] switch field  ·  [Esc] quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let (label_style, value_style) = if focused {
        (
            Style::default().fg(Color::Cyan).bold(),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::White),
        )
    };
    let cursor = if focused { "_" } else { " " };

    Line::from(vec![
        Span::styled(format!("{label:>5}: "), label_style),
        Span::styled(value, value_style),
        Span::styled(cursor, value_style),
    ])
}
