use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

use crate::{
    app::App,
    feedback::FeedbackSink,
    sentence::SentenceSource,
    session::{Session, Status},
};

const HORIZONTAL_MARGIN: u16 = 5;
const LEGEND: &str = "(ctrl+r) retry / (ctrl+n) new / (esc)ape";

pub fn status_style(status: Status) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);

    match status {
        Status::Unvisited => dim_bold_style,
        Status::Current => dim_bold_style.add_modifier(Modifier::UNDERLINED),
        Status::Correct => bold_style.fg(Color::Green),
        Status::Incorrect => bold_style.fg(Color::Red),
    }
}

/// One styled span per sentence position
pub fn sentence_spans(session: &Session) -> Vec<Span<'static>> {
    session
        .chars()
        .iter()
        .zip(session.statuses())
        .map(|(&c, &status)| {
            let text = match (c, status) {
                // a missed space would otherwise be invisible
                (' ', Status::Incorrect) => "·".to_owned(),
                (c, _) => c.to_string(),
            };
            Span::styled(text, status_style(status))
        })
        .collect()
}

/// Each word together with the spaces that follow it
fn word_chunks(chars: &[char]) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (i, pair) in chars.windows(2).enumerate() {
        if pair[0].is_whitespace() && !pair[1].is_whitespace() {
            chunks.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < chars.len() {
        chunks.push(start..chars.len());
    }
    chunks
}

/// Lay the sentence out in lines of at most `width` cells.
///
/// Spaces stay at the end of the line they follow and are never trimmed, so
/// every position (the current one included) has a visible cell. Words wider
/// than a line are split.
pub fn sentence_lines(session: &Session, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let chars = session.chars();
    let spans = sentence_spans(session);
    let char_width = |c: char| c.width().unwrap_or(0);

    let mut lines = Vec::new();
    let mut line: Vec<Span<'static>> = Vec::new();
    let mut line_width = 0;

    for chunk in word_chunks(chars) {
        let chunk_width: usize = chars[chunk.clone()].iter().map(|&c| char_width(c)).sum();
        if line_width > 0 && line_width + chunk_width > width {
            lines.push(Line::from(std::mem::take(&mut line)));
            line_width = 0;
        }

        for idx in chunk {
            let w = char_width(chars[idx]);
            if line_width > 0 && line_width + w > width {
                lines.push(Line::from(std::mem::take(&mut line)));
                line_width = 0;
            }
            line.push(spans[idx].clone());
            line_width += w;
        }
    }

    if !line.is_empty() {
        lines.push(Line::from(line));
    }
    lines
}

pub fn stats_line(session: &Session) -> String {
    format!(
        "total {}   correct {}   incorrect {}   correctness {}%",
        session.len(),
        session.correct_count(),
        session.incorrect_count(),
        session.correctness_percent()
    )
}

impl<S: SentenceSource, F: FeedbackSink> Widget for &App<S, F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let lines = sentence_lines(session, max_chars_per_line as usize);
        let prompt_occupied_lines = lines.len().max(1) as u16;

        let padding = area.height.saturating_sub(prompt_occupied_lines + 4) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1), // padding
                Constraint::Length(1), // stats
                Constraint::Length(1), // completion banner
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let sentence = Paragraph::new(lines).alignment(if prompt_occupied_lines == 1 {
            // a one-line sentence sits centered
            Alignment::Center
        } else {
            Alignment::Left
        });
        sentence.render(chunks[1], buf);

        Paragraph::new(Span::styled(stats_line(session), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if session.is_complete() && !session.is_empty() {
            Paragraph::new(Span::styled(
                format!(
                    "complete! {} correct, {} incorrect, {}%",
                    session.correct_count(),
                    session.incorrect_count(),
                    session.correctness_percent()
                ),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        }

        Paragraph::new(Span::styled(LEGEND, italic_style)).render(chunks[6], buf);
    }
}
