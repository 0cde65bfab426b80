use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, AppState},
    util::{accuracy, format_elapsed},
    words::PoolOrigin,
};

use super::{HORIZONTAL_MARGIN, PREVIEW_ROWS, VERTICAL_MARGIN};

/// A UI screen boundary: renders one `AppState`.
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct WelcomeScreen;

impl Screen for WelcomeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let pool = app.session.pool();
        let limit = app.session.session_limit();

        let mut lines = vec![
            Line::from(Span::styled("Word Match", bold.fg(Color::Cyan))),
            Line::from(""),
            Line::from("1. press enter to start a session"),
            Line::from("2. each round shows an English word and up to four translations"),
            Line::from("3. pick the matching translation with 1-4 or the arrow keys + enter"),
            Line::from(format!("4. one point per correct answer, {limit} words per session")),
            Line::from("5. your score and time are shown at the end"),
            Line::from(""),
        ];

        let source = match &app.origin {
            PoolOrigin::File(path) => format!("word list: {}", path.display()),
            PoolOrigin::Bundled(list) => format!("word list: built-in '{list}'"),
            PoolOrigin::Fallback { reason } => {
                format!("could not load word list ({reason}); using built-in words")
            }
        };
        let source_style = if app.origin.is_fallback() {
            Style::default().fg(Color::Yellow)
        } else {
            dim
        };
        lines.push(Line::from(Span::styled(source, source_style)));
        lines.push(Line::from(Span::styled(
            format!("{} words available", pool.len()),
            bold,
        )));
        lines.push(Line::from(""));

        let preview = pool.preview(PREVIEW_ROWS);
        let term_width = preview.iter().map(|e| e.term.width()).max().unwrap_or(0);
        for entry in preview {
            let pad = " ".repeat(term_width.saturating_sub(entry.term.width()));
            lines.push(Line::from(vec![
                Span::styled(format!("{}{pad}", entry.term), bold),
                Span::styled("   ", dim),
                Span::raw(entry.translation.clone()),
            ]));
        }

        if let Some(notice) = &app.notice {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([Constraint::Min(1), Constraint::Length(1)].as_ref())
            .split(area);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);
        legend("(enter) start / (esc)ape").render(chunks[1], buf);
    }
}

/// Quiz and answer-feedback screens share one layout.
pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = &app.session;
        let Some(round) = session.current_round() else {
            return;
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let choice_lines = round.choices.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1), // score board
                    Constraint::Length(1), // progress
                    Constraint::Min(1),    // spacer
                    Constraint::Length(1), // term
                    Constraint::Length(1), // spacer
                    Constraint::Length(choice_lines),
                    Constraint::Length(1), // spacer
                    Constraint::Length(1), // feedback
                    Constraint::Min(1),    // spacer
                    Constraint::Length(1), // legend
                ]
                .as_ref(),
            )
            .split(area);

        let limit = session.session_limit();
        Paragraph::new(Span::styled(
            format!(
                "score {}   word {}/{}   {}",
                session.score(),
                (session.round_index() + 1).min(limit),
                limit,
                format_elapsed(session.elapsed())
            ),
            bold,
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(session.progress().clamp(0.0, 1.0))
            .label(format!("{}/{}", session.round_index(), limit))
            .render(chunks[1], buf);

        Paragraph::new(Span::styled(
            round.word.term.clone(),
            bold.fg(Color::Blue),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        // Left-align choices inside a centered column so numbers line up.
        let widest = round
            .choices
            .iter()
            .map(|c| c.width() + 5)
            .max()
            .unwrap_or(0) as u16;
        let column = centered_column(chunks[5], widest);

        let submitted = app.state == AppState::Feedback;
        let lines: Vec<Line> = round
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let is_answer = round.is_correct(choice);
                let is_selected = round.selected.as_deref() == Some(choice.as_str());
                let style = match (submitted, is_answer, is_selected) {
                    (true, true, _) => bold.fg(Color::Green),
                    (true, false, true) => bold.fg(Color::Red),
                    (true, false, false) => dim,
                    (false, _, _) if i == app.cursor => {
                        bold.add_modifier(Modifier::REVERSED)
                    }
                    (false, _, _) => Style::default(),
                };
                let marker = if !submitted && i == app.cursor { ">" } else { " " };
                Line::from(Span::styled(format!("{marker} {}. {choice}", i + 1), style))
            })
            .collect();
        Paragraph::new(lines).render(column, buf);

        if let Some(feedback) = &app.feedback {
            let (text, style) = if feedback.verdict.correct {
                ("✓ correct!".to_string(), bold.fg(Color::Green))
            } else {
                (
                    format!("✗ wrong, the answer is {}", feedback.verdict.answer),
                    bold.fg(Color::Red),
                )
            };
            Paragraph::new(Span::styled(text, style))
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
        }

        let legend_text = if submitted {
            "(enter) next / (r)eset / (esc)ape"
        } else {
            "(1-4) answer / (↑↓ enter) choose / (r)eset / (esc)ape"
        };
        legend(legend_text).render(chunks[9], buf);
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Some(summary) = app.final_summary.or_else(|| app.session.summary()) else {
            return;
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Min(1),
                    Constraint::Length(4),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        let pct = accuracy(summary.score, summary.session_limit)
            .map_or(String::new(), |a| format!("  ({a}%)"));
        let lines = vec![
            Line::from(Span::styled("Session complete!", bold.fg(Color::Green))),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "final score: {}/{}{pct}",
                    summary.score, summary.session_limit
                ),
                bold,
            )),
            Line::from(Span::styled(
                format!("time: {}", format_elapsed(summary.elapsed)),
                bold,
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        legend("(n)ew session / (r)eset / (esc)ape").render(chunks[3], buf);
    }
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
}

fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// The renderer for the current state. Feedback reuses the quiz layout.
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Welcome => Box::new(WelcomeScreen),
        AppState::Quiz | AppState::Feedback => Box::new(QuizScreen),
        AppState::Summary => Box::new(SummaryScreen),
    }
}
