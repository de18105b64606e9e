use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::models::{AnsweredQuestion, QuizSummary};

use super::TITLE;

/// Columns taken by the marker, the question number and the block padding.
const BREAKDOWN_PREFIX_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, summary: &QuizSummary) {
    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_score(frame, chunks[0], summary);
    render_breakdown(frame, chunks[1], summary);
    render_controls(frame, chunks[2]);
}

/// Verdict and colour for a score, banded on tenths of the total.
fn grade(score: usize, total: usize) -> (&'static str, Color) {
    if total == 0 {
        return ("No questions", Color::DarkGray);
    }
    match score * 10 / total {
        9.. => ("Excellent", Color::Green),
        7..=8 => ("Well done", Color::Cyan),
        5..=6 => ("Not bad", Color::Yellow),
        _ => ("Keep practicing", Color::Red),
    }
}

fn render_score(frame: &mut Frame, area: Rect, summary: &QuizSummary) {
    let (verdict, color) = grade(summary.score, summary.total);
    let content = vec![
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("You Scored {} out of {}", summary.score, summary.total),
            Style::default().fg(color).bold(),
        )),
        Line::from(vec![
            Span::styled(verdict, Style::default().fg(color)),
            Span::styled(
                format!("  ·  {:.0}%", summary.percentage()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, summary: &QuizSummary) {
    let room = (area.width as usize).saturating_sub(BREAKDOWN_PREFIX_WIDTH);
    let lines: Vec<Line> = summary
        .answers
        .iter()
        .enumerate()
        .map(|(index, answer)| outcome_line(index + 1, answer, room))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((summary.scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn outcome_line(number: usize, answer: &AnsweredQuestion, room: usize) -> Line<'static> {
    let mark = if answer.is_correct {
        Span::styled(" ✓ ", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled(" ✗ ", Style::default().fg(Color::Red).bold())
    };

    Line::from(vec![
        mark,
        Span::styled(format!("Q{number:<3} "), Style::default().fg(Color::DarkGray)),
        Span::styled(preview(&answer.text, room), Style::default().fg(Color::Gray)),
    ])
}

/// First `room` characters of `text`, with an ellipsis when cut.
fn preview(text: &str, room: usize) -> String {
    if text.chars().count() <= room {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(room.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let hint = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled("r", key),
        Span::styled(" Reset  ·  ", hint),
        Span::styled("j/k", key),
        Span::styled(" scroll  ·  ", hint),
        Span::styled("q", key),
        Span::styled(" quit", hint),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
