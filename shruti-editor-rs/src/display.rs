//! The character display collaborator.
//!
//! The editor writes whole rows of exactly [`LCD_WIDTH`] characters and an
//! optional cursor column. How the characters reach glass (HD44780, OLED
//! emulation, a test buffer) is up to the [`TextDisplay`] implementation.

use heapless::String;

/// Characters per display row.
pub const LCD_WIDTH: usize = 16;

/// Number of display rows.
pub const LCD_ROWS: usize = 2;

/// One display row.
pub type LcdLine = String<LCD_WIDTH>;

/// A fixed-geometry character display.
pub trait TextDisplay {
    /// Replace row `row` with `text`.
    ///
    /// `cursor` is a column hint for a blinking cursor on that row, `None`
    /// hides the cursor if it was on that row.
    fn print(&mut self, row: usize, text: &str, cursor: Option<usize>);
}

/// In-memory display contents: two padded rows and one cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    rows: [LcdLine; LCD_ROWS],
    cursor: Option<(usize, usize)>,
}

impl TextBuffer {
    /// An empty (all-blank) buffer.
    pub fn new() -> Self {
        let mut buffer = Self::default();
        for row in 0..LCD_ROWS {
            buffer.print(row, "", None);
        }
        buffer
    }

    /// Text of `row`, always [`LCD_WIDTH`] characters. Out-of-range rows
    /// read as empty.
    pub fn row(&self, row: usize) -> &str {
        self.rows.get(row).map(|line| line.as_str()).unwrap_or("")
    }

    /// Cursor position as `(row, column)`.
    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }
}

impl TextDisplay for TextBuffer {
    fn print(&mut self, row: usize, text: &str, cursor: Option<usize>) {
        let Some(line) = self.rows.get_mut(row) else {
            return;
        };
        line.clear();
        for c in text.chars().take(LCD_WIDTH) {
            let _ = line.push(c);
        }
        while line.len() < LCD_WIDTH {
            let _ = line.push(' ');
        }

        match cursor {
            Some(column) if column < LCD_WIDTH => self.cursor = Some((row, column)),
            _ => {
                if matches!(self.cursor, Some((r, _)) if r == row) {
                    self.cursor = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_blank() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.row(0), "                ");
        assert_eq!(buffer.row(1).len(), LCD_WIDTH);
        assert_eq!(buffer.cursor(), None);
    }

    #[test]
    fn print_pads_and_truncates() {
        let mut buffer = TextBuffer::new();
        buffer.print(0, "filter", None);
        buffer.print(1, "ABCDEFGHIJKLMNOPQRST", None);
        assert_eq!(buffer.row(0), "filter          ");
        assert_eq!(buffer.row(1), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn cursor_follows_the_last_hint() {
        let mut buffer = TextBuffer::new();
        buffer.print(1, "load  exit  save", Some(6));
        assert_eq!(buffer.cursor(), Some((1, 6)));

        // A hint-less print of another row keeps the cursor.
        buffer.print(0, "load/save", None);
        assert_eq!(buffer.cursor(), Some((1, 6)));

        // A hint-less print of the cursor row hides it.
        buffer.print(1, "load  exit  save", None);
        assert_eq!(buffer.cursor(), None);
    }

    #[test]
    fn out_of_range_rows_are_ignored() {
        let mut buffer = TextBuffer::new();
        buffer.print(LCD_ROWS, "nope", Some(0));
        assert_eq!(buffer, TextBuffer::new());
        assert_eq!(buffer.row(5), "");
    }
}
