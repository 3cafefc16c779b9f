//! # Lightbox Component
//!
//! Overlay showing one image at full resolution.
//!
//! ```text
//!   (closed) ──select──▶ Loading ──details arrive──▶ Loaded ──Esc/q/Enter/click outside──▶ (closed)
//!                           └──────────────Esc/q/Enter/click outside─────────────────────────▲
//! ```
//!
//! "Closed" is the absence of a `LightboxState` (`Option::None` in `TuiState`).
//! The state owns the gallery's `ScrollLock`, so closing by any path unlocks
//! the grid.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::search::ImageDetails;
use crate::tui::components::gallery::ScrollLock;
use crate::tui::event::TuiEvent;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, PartialEq)]
pub enum LightboxPhase {
    /// Full-resolution image still downloading; loader shown
    Loading,
    /// Download finished (or failed, with the reason)
    Loaded(Result<ImageDetails, String>),
}

#[derive(Debug)]
pub struct LightboxState {
    pub full_url: String,
    pub caption: String,
    pub phase: LightboxPhase,
    /// Overlay drawn last frame, for click-outside detection
    overlay: Rect,
    _scroll_lock: ScrollLock,
}

/// Events emitted by the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    Close,
}

impl LightboxState {
    pub fn open(full_url: String, caption: String, scroll_lock: ScrollLock) -> Self {
        Self {
            full_url,
            caption,
            phase: LightboxPhase::Loading,
            overlay: Rect::default(),
            _scroll_lock: scroll_lock,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, LightboxPhase::Loaded(_))
    }

    /// Apply a finished download. Ignored if it belongs to a different image.
    pub fn finish_loading(&mut self, url: &str, result: Result<ImageDetails, String>) {
        if url != self.full_url {
            return;
        }
        self.phase = LightboxPhase::Loaded(result);
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<LightboxEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::InputChar('q') => {
                Some(LightboxEvent::Close)
            }
            // Clicking the backdrop closes; clicks on the image itself do nothing
            TuiEvent::MouseClick(col, row) => {
                let inside = self.overlay.contains(Position { x: *col, y: *row });
                (!inside).then_some(LightboxEvent::Close)
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        let overlay = centered_rect(70, 60, area);
        self.overlay = overlay;
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Image ")
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(Span::styled(
                self.caption.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        match &self.phase {
            LightboxPhase::Loading => {
                let spinner = SPINNER[spinner_frame % SPINNER.len()];
                lines.push(Line::from(Span::styled(
                    format!("{spinner} Loading full image..."),
                    Style::default().fg(Color::Yellow),
                )));
            }
            LightboxPhase::Loaded(Ok(details)) => {
                let kind = details.content_type.as_deref().unwrap_or("unknown type");
                lines.push(Line::from(vec![
                    Span::styled("Size: ", dim),
                    Span::raw(details.size_label()),
                ]));
                lines.push(Line::from(vec![Span::styled("Type: ", dim), Span::raw(kind.to_string())]));
            }
            LightboxPhase::Loaded(Err(reason)) => {
                lines.push(Line::from(Span::styled(
                    format!("Could not load image: {reason}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(self.full_url.clone(), dim)));

        let body = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::gallery::GalleryViewState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(lightbox: &mut LightboxState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| lightbox.render(f, f.area(), 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn open(gallery: &GalleryViewState) -> LightboxState {
        LightboxState::open(
            "https://img.test/1_1280.jpg".to_string(),
            "tag1, sample".to_string(),
            gallery.lock_scroll(),
        )
    }

    #[test]
    fn test_open_shows_loader_then_details() {
        let gallery = GalleryViewState::new();
        let mut lightbox = open(&gallery);
        assert!(!lightbox.is_loaded());
        assert!(render_text(&mut lightbox).contains("Loading full image"));

        lightbox.finish_loading(
            "https://img.test/1_1280.jpg",
            Ok(ImageDetails {
                content_type: Some("image/jpeg".to_string()),
                byte_len: 2048,
            }),
        );
        assert!(lightbox.is_loaded());
        let text = render_text(&mut lightbox);
        assert!(!text.contains("Loading full image"));
        assert!(text.contains("2.0 KB"));
        assert!(text.contains("image/jpeg"));
    }

    #[test]
    fn test_details_for_other_image_are_ignored() {
        let gallery = GalleryViewState::new();
        let mut lightbox = open(&gallery);
        lightbox.finish_loading("https://img.test/other.jpg", Err("nope".to_string()));
        assert_eq!(lightbox.phase, LightboxPhase::Loading);
    }

    #[test]
    fn test_failed_load_moves_to_loaded() {
        let gallery = GalleryViewState::new();
        let mut lightbox = open(&gallery);
        lightbox.finish_loading("https://img.test/1_1280.jpg", Err("HTTP 404".to_string()));
        assert!(lightbox.is_loaded());
        assert!(render_text(&mut lightbox).contains("Could not load image"));
    }

    #[test]
    fn test_close_keys() {
        let gallery = GalleryViewState::new();
        let mut lightbox = open(&gallery);
        for event in [TuiEvent::Escape, TuiEvent::Submit, TuiEvent::InputChar('q')] {
            assert_eq!(lightbox.handle_event(&event), Some(LightboxEvent::Close));
        }
        assert_eq!(lightbox.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_backdrop_click_closes_but_image_click_does_not() {
        let gallery = GalleryViewState::new();
        let mut lightbox = open(&gallery);
        render_text(&mut lightbox);
        assert_eq!(lightbox.handle_event(&TuiEvent::MouseClick(40, 12)), None);
        assert_eq!(
            lightbox.handle_event(&TuiEvent::MouseClick(0, 0)),
            Some(LightboxEvent::Close)
        );
    }

    #[test]
    fn test_closing_restores_gallery_scroll() {
        let gallery = GalleryViewState::new();
        let lightbox = open(&gallery);
        assert!(gallery.is_scroll_locked());
        drop(lightbox);
        assert!(!gallery.is_scroll_locked());
    }
}
