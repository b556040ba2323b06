use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{LyricLine, SongData};

/// Frames cycled by the loading indicator.
const SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];

/// Render one lyric line as its two-row block: chords above lyrics. Both
/// strings are emitted untouched; an empty chord string still produces a
/// (blank) row so consecutive blocks keep the same rhythm.
pub(crate) fn chord_block(line: &LyricLine) -> [Line<'static>; 2] {
    let chord_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    [
        Line::from(Span::styled(line.chords.clone(), chord_style)),
        Line::from(Span::raw(line.lyrics.clone())),
    ]
}

/// All rows of the chord sheet, with one spacer row between blocks.
pub(crate) fn chord_sheet_lines(song: &SongData) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(song.lines.len() * 3);
    for (idx, line) in song.lines.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(chord_block(line));
    }
    lines
}

/// Widest row of the sheet, in characters.
pub(crate) fn widest_line(song: &SongData) -> usize {
    song.lines
        .iter()
        .flat_map(|line| [line.chords.chars().count(), line.lyrics.chars().count()])
        .max()
        .unwrap_or(0)
}

pub(crate) fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the message panels.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn sample_song() -> SongData {
        SongData {
            song_title: "Wonderwall".to_string(),
            artist: "Oasis".to_string(),
            lines: vec![
                LyricLine::new("Em7        G", "Today is gonna be the day"),
                LyricLine::new("", "That they're gonna throw it back to you"),
                LyricLine::new("Cadd9   Dsus4   A7sus4", "[Guitar Solo]"),
            ],
        }
    }

    #[test]
    fn every_line_becomes_a_two_row_block() {
        let song = sample_song();
        let rows = chord_sheet_lines(&song);

        assert_eq!(rows.len(), song.lines.len() * 3 - 1);
        for (idx, line) in song.lines.iter().enumerate() {
            assert_eq!(line_text(&rows[idx * 3]), line.chords);
            assert_eq!(line_text(&rows[idx * 3 + 1]), line.lyrics);
        }
    }

    #[test]
    fn empty_chords_still_reserve_a_row() {
        let block = chord_block(&LyricLine::new("", "no chords here"));
        assert_eq!(line_text(&block[0]), "");
        assert_eq!(line_text(&block[1]), "no chords here");
    }

    #[test]
    fn empty_song_has_no_rows() {
        let song = SongData {
            song_title: "Silence".to_string(),
            artist: "Nobody".to_string(),
            lines: Vec::new(),
        };
        assert!(chord_sheet_lines(&song).is_empty());
        assert_eq!(widest_line(&song), 0);
    }

    #[test]
    fn widest_line_counts_characters() {
        assert_eq!(widest_line(&sample_song()), 39);
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
    }
}
