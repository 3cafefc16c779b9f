//! # Toasts
//!
//! Stateless rendering of the notification sink: a stack of transient toasts
//! in the top-right corner, plus the centered fatal report with its reload
//! action.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notify::{Notification, NotificationKind};
use crate::tui::components::lightbox::centered_rect;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

fn kind_style(kind: NotificationKind) -> (Color, &'static str) {
    match kind {
        NotificationKind::Info => (Color::Blue, " Info "),
        NotificationKind::Success => (Color::Green, " Success "),
        NotificationKind::Warning => (Color::Yellow, " Warning "),
        NotificationKind::Error => (Color::Red, " Error "),
    }
}

/// Draw toasts newest-first from the top-right of `area`, as many as fit.
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &[Notification]) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;
    let mut y = area.y;

    for toast in toasts.iter().rev() {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let (color, title) = kind_style(toast.kind);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.as_str())
                .wrap(Wrap { trim: true })
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .title(title),
                ),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}

/// Draw the blocking error report.
pub fn render_fatal(frame: &mut Frame, area: Rect, report: &Notification) {
    let rect = centered_rect(50, 30, area);
    frame.render_widget(Clear, rect);

    let (color, _) = kind_style(report.kind);
    let block = Block::bordered()
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(" Oops! ")
        .title_bottom(Line::from(" r Reload  Esc Dismiss ").centered());

    let body = Paragraph::new(vec![
        Line::default(),
        Line::from(report.message.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(body, rect);
}
