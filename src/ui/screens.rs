use std::cmp::min;

/// Cursor over the suggestion list.
#[derive(Default, Clone)]
pub(crate) struct SuggestionCursor {
    pub(crate) selected: usize,
}

impl SuggestionCursor {
    pub(crate) fn reset(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let len = len as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }
}

/// Scroll offsets for the chord sheet. Rows and columns are clamped so the
/// last row and the widest line always remain reachable.
#[derive(Default, Clone, Copy)]
pub(crate) struct SheetScroll {
    pub(crate) row: u16,
    pub(crate) column: u16,
}

impl SheetScroll {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn scroll_rows(&mut self, delta: isize, total_rows: usize) {
        self.row = shift(self.row, delta, total_rows.saturating_sub(1));
    }

    pub(crate) fn scroll_columns(&mut self, delta: isize, widest: usize) {
        self.column = shift(self.column, delta, widest.saturating_sub(1));
    }

    pub(crate) fn to_top(&mut self) {
        self.row = 0;
    }

    pub(crate) fn to_bottom(&mut self, total_rows: usize) {
        self.row = min(total_rows.saturating_sub(1), u16::MAX as usize) as u16;
    }

    /// Offsets in the `(y, x)` order `Paragraph::scroll` expects.
    pub(crate) fn offsets(&self) -> (u16, u16) {
        (self.row, self.column)
    }
}

fn shift(current: u16, delta: isize, max: usize) -> u16 {
    let max = min(max, u16::MAX as usize) as isize;
    (current as isize + delta).clamp(0, max) as u16
}
