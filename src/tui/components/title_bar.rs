//! # TitleBar Component
//!
//! Top status bar: app name, current query, how much of the result set is
//! on screen, and a loading marker.
//!
//! Stateless: all fields are props copied from `App` each frame.
//!
//! ```text
//!  imgseek | "cats" | 24 of 500 images | page 2 | Loading...
//!  imgseek | Type a query and press Enter
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub query: Option<&'a str>,
    pub shown: usize,
    pub total: u32,
    pub page: u32,
    pub is_loading: bool,
}

impl TitleBar<'_> {
    pub fn text(&self) -> String {
        let mut parts = vec![" imgseek".to_string()];
        match self.query {
            Some(q) => {
                parts.push(format!("\"{q}\""));
                parts.push(format!("{} of {} images", self.shown, self.total));
                parts.push(format!("page {}", self.page));
            }
            None => parts.push("Type a query and press Enter".to_string()),
        }
        if self.is_loading {
            parts.push("Loading...".to_string());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_title() {
        let bar = TitleBar {
            query: None,
            shown: 0,
            total: 0,
            page: 1,
            is_loading: false,
        };
        assert_eq!(bar.text(), " imgseek | Type a query and press Enter");
    }

    #[test]
    fn test_title_with_query_and_loading() {
        let bar = TitleBar {
            query: Some("cats"),
            shown: 24,
            total: 500,
            page: 2,
            is_loading: true,
        };
        assert_eq!(
            bar.text(),
            " imgseek | \"cats\" | 24 of 500 images | page 2 | Loading..."
        );
    }
}
