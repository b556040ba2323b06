use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Placeholder shown while the query field is empty.
pub(crate) const QUERY_PLACEHOLDER: &str = "Enter a song to find its chords...";
/// Label drawn in front of the query text.
pub(crate) const QUERY_PROMPT: &str = "Search: ";

/// Free-text query field. The value is submitted exactly as typed.
#[derive(Default, Clone)]
pub(crate) struct QueryInput {
    value: String,
}

impl QueryInput {
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append a character, rejecting control characters.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }

    /// Column offset of the cursor relative to the start of the field.
    pub(crate) fn cursor_offset(&self) -> u16 {
        (QUERY_PROMPT.chars().count() + self.value.chars().count()) as u16
    }

    /// Render the field. Disabled fields are dimmed and never show the
    /// placeholder highlight.
    pub(crate) fn build_line(&self, enabled: bool) -> Line<'static> {
        let label_style = if enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value = if self.value.is_empty() {
            Span::styled(QUERY_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else if enabled {
            Span::raw(self.value.clone())
        } else {
            Span::styled(self.value.clone(), Style::default().fg(Color::DarkGray))
        };

        Line::from(vec![Span::styled(QUERY_PROMPT, label_style), value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_whitespace_verbatim() {
        let mut input = QueryInput::default();
        for ch in "  yesterday ".chars() {
            assert!(input.push_char(ch));
        }
        assert_eq!(input.value(), "  yesterday ");
    }

    #[test]
    fn rejects_control_characters() {
        let mut input = QueryInput::default();
        assert!(!input.push_char('\u{7}'));
        assert!(input.is_empty());
    }

    #[test]
    fn placeholder_when_empty() {
        let input = QueryInput::default();
        let line = input.build_line(true);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, format!("{QUERY_PROMPT}{QUERY_PLACEHOLDER}"));
        assert_eq!(input.cursor_offset(), QUERY_PROMPT.len() as u16);
    }
}
