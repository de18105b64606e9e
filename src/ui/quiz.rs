use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::{OptionStatus, QuizProgress, UserDetails};

use super::TITLE;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, progress: &QuizProgress, user: Option<&UserDetails>) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], user);
    render_question_text(frame, chunks[1], progress);
    render_options(frame, chunks[2], progress);
    render_progress(frame, chunks[3], progress);
    render_controls(frame, chunks[4], progress.is_locked());
}

fn render_header(frame: &mut Frame, area: Rect, user: Option<&UserDetails>) {
    let mut spans = vec![Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())];
    if let Some(user) = user {
        spans.push(Span::styled(
            format!("  ·  {}", user.name),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, progress: &QuizProgress) {
    let text = format!(
        "{}. {}",
        progress.current_question_number(),
        progress.current_question().text
    );
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, progress: &QuizProgress) {
    let options = &progress.current_question().options;
    let selected = progress.selected_option();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = !progress.is_locked() && index == selected;
        let (marker, style) = match progress.option_status(index) {
            OptionStatus::Correct => ("✓", Style::default().fg(Color::Green).bold()),
            OptionStatus::Wrong => ("✗", Style::default().fg(Color::Red).bold()),
            OptionStatus::Unmarked if is_selected => (">", Style::default().fg(Color::Cyan).bold()),
            OptionStatus::Unmarked => (" ", Style::default().fg(Color::Gray)),
        };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{label}. "), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, progress: &QuizProgress) {
    let text = format!(
        "{} of {} questions",
        progress.current_question_number(),
        progress.total_questions()
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, locked: bool) {
    let hint = if locked {
        "n next  ·  q quit"
    } else {
        "j/k navigate  ·  enter answer  ·  1-4 pick  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
