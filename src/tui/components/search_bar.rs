//! # SearchBar Component
//!
//! Single-line query input.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace/delete, cursor movement)
//! - Reject blank submissions (emits `SearchEvent::Blank`, never `Submit`)
//! - Offer a clear affordance while the buffer is non-empty (Ctrl+U or click)
//! - Track focus so the parent can route keys and place the terminal cursor
//!
//! The buffer survives a successful submit, like a browser search form.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search images and photos";
const CLEAR_LABEL: &str = " ✕ Ctrl+U ";

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Non-blank submission, raw (untrimmed) buffer contents
    Submit(String),
    /// Enter pressed with a blank or whitespace-only buffer
    Blank,
    ContentChanged,
    Cleared,
}

pub struct SearchBar {
    pub buffer: String,
    /// Cursor position as byte offset in buffer
    cursor: usize,
    pub focused: bool,
    /// Where the clear button was drawn last frame, for click hit-testing
    clear_button: Option<Rect>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            focused: true,
            clear_button: None,
        }
    }

    /// Empty the buffer and take focus.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.focused = true;
    }

    /// Replace the buffer, cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// The clear affordance is only offered while there is something to clear.
    pub fn shows_clear_button(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// True if a click at (col, row) hit the clear button.
    pub fn hit_clear_button(&self, col: u16, row: u16) -> bool {
        self.clear_button
            .is_some_and(|r| r.contains(ratatui::layout::Position { x: col, y: row }))
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Slice of the buffer to display so the cursor stays inside `width` columns.
    fn visible_window(&self, width: usize) -> (&str, u16) {
        let before = &self.buffer[..self.cursor];
        let mut start = 0;
        while before[start..].width() >= width && start < self.cursor {
            start += before[start..].chars().next().map_or(1, char::len_utf8);
        }
        let cursor_col = before[start..].width() as u16;
        (&self.buffer[start..], cursor_col)
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Search ");

        self.clear_button = None;
        if self.shows_clear_button() {
            block = block.title(Line::from(CLEAR_LABEL).alignment(Alignment::Right));
            let label_width = CLEAR_LABEL.width() as u16;
            if area.width > label_width + 2 {
                self.clear_button = Some(Rect::new(
                    area.x + area.width - label_width - 1,
                    area.y,
                    label_width,
                    1,
                ));
            }
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        if self.buffer.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .block(block);
            frame.render_widget(placeholder, area);
            if self.focused {
                frame.set_cursor_position((area.x + 1, area.y + 1));
            }
            return;
        }

        let (visible, cursor_col) = self.visible_window(inner_width.max(1));
        let input = Paragraph::new(visible.to_string())
            .style(Style::default().fg(Color::Green))
            .block(block);
        frame.render_widget(input, area);

        if self.focused {
            frame.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line input: newlines become spaces
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                (self.cursor > 0).then(|| {
                    self.cursor = self.prev_boundary();
                    SearchEvent::ContentChanged
                })
            }
            TuiEvent::CursorRight => {
                (self.cursor < self.buffer.len()).then(|| {
                    self.cursor = self.next_boundary();
                    SearchEvent::ContentChanged
                })
            }
            TuiEvent::ClearInput => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.clear();
                Some(SearchEvent::Cleared)
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    Some(SearchEvent::Blank)
                } else {
                    Some(SearchEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> SearchBar {
        let mut bar = SearchBar::new();
        for c in text.chars() {
            bar.handle_event(&TuiEvent::InputChar(c));
        }
        bar
    }

    fn render_text(bar: &mut SearchBar, width: u16) -> String {
        let backend = TestBackend::new(width, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut bar = typed("cat");
        assert_eq!(bar.buffer, "cat");
        assert_eq!(
            bar.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::ContentChanged)
        );
        assert_eq!(bar.buffer, "ca");
    }

    #[test]
    fn test_submit_emits_raw_untrimmed_text() {
        let mut bar = typed("  cats ");
        assert_eq!(
            bar.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Submit("  cats ".to_string()))
        );
        assert_eq!(bar.buffer, "  cats ", "buffer survives submit");
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut bar = typed("   ");
        assert_eq!(bar.handle_event(&TuiEvent::Submit), Some(SearchEvent::Blank));

        let mut empty = SearchBar::new();
        assert_eq!(empty.handle_event(&TuiEvent::Submit), Some(SearchEvent::Blank));
    }

    #[test]
    fn test_clear_empties_and_focuses() {
        let mut bar = typed("dogs");
        bar.blur();
        assert_eq!(bar.handle_event(&TuiEvent::ClearInput), Some(SearchEvent::Cleared));
        assert!(bar.buffer.is_empty());
        assert!(bar.focused);
        assert_eq!(bar.handle_event(&TuiEvent::ClearInput), None);
    }

    #[test]
    fn test_cursor_editing_mid_buffer() {
        let mut bar = typed("ct");
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(bar.buffer, "cat");
        bar.handle_event(&TuiEvent::Delete);
        assert_eq!(bar.buffer, "ca");
    }

    #[test]
    fn test_set_text_puts_cursor_at_end() {
        let mut bar = SearchBar::new();
        bar.set_text("red");
        bar.handle_event(&TuiEvent::InputChar('s'));
        assert_eq!(bar.buffer, "reds");
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut bar = typed("café");
        bar.handle_event(&TuiEvent::Backspace);
        assert_eq!(bar.buffer, "caf");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut bar = SearchBar::new();
        bar.handle_event(&TuiEvent::Paste("red\nfox".to_string()));
        assert_eq!(bar.buffer, "red fox");
    }

    #[test]
    fn test_clear_button_only_when_non_empty() {
        let mut bar = SearchBar::new();
        let text = render_text(&mut bar, 50);
        assert!(text.contains("Search images and photos"));
        assert!(!text.contains("Ctrl+U"));

        let mut bar = typed("owl");
        let text = render_text(&mut bar, 50);
        assert!(text.contains("owl"));
        assert!(text.contains("Ctrl+U"));
        assert!(bar.hit_clear_button(40, 0));
        assert!(!bar.hit_clear_button(5, 1));
    }

    #[test]
    fn test_long_buffer_scrolls_to_cursor() {
        let bar = typed("abcdefghij");
        let (visible, col) = bar.visible_window(4);
        assert!(visible.ends_with("hij"));
        assert!(col < 4);
    }
}
