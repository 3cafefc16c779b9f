use std::time::Instant;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::toast::{render_fatal, render_toasts};
use crate::tui::components::{Gallery, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LOAD_MORE_LABEL: &str = " ▶ Load more (m) ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize, now: Instant) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, search_area, gallery_area, footer_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar {
        query: app.gallery.query.as_ref().map(|q| q.as_str()),
        shown: app.gallery.items.len(),
        total: app.gallery.total_available,
        page: app.page,
        is_loading: app.is_loading,
    };
    title_bar.render(frame, title_area);

    // Overlays own the keyboard, so the input shows no cursor under them
    let overlay_open = tui.lightbox.is_some() || app.notifications.fatal_report().is_some();
    tui.search_bar.focused = tui.focus == Focus::Search && !overlay_open;
    tui.search_area = search_area;
    tui.search_bar.render(frame, search_area);

    if app.gallery.items.is_empty() {
        draw_empty_state(frame, gallery_area, app.is_loading, spinner_frame);
        tui.gallery.area = Rect::default();
    } else {
        let focused = tui.focus == Focus::Gallery && !overlay_open;
        Gallery::new(&mut tui.gallery, &app.gallery.items, focused).render(frame, gallery_area);
    }

    draw_footer(frame, footer_area, app, tui, spinner_frame, now);

    if let Some(lightbox) = tui.lightbox.as_mut() {
        lightbox.render(frame, frame.area(), spinner_frame);
    }

    render_toasts(frame, gallery_area, app.notifications.toasts());

    if let Some(report) = app.notifications.fatal_report() {
        render_fatal(frame, frame.area(), report);
    }
}

fn draw_empty_state(frame: &mut Frame, area: Rect, is_loading: bool, spinner_frame: usize) {
    let text = if is_loading {
        Line::from(Span::styled(
            format!("{} Searching...", SPINNER[spinner_frame % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "Type a query above and press Enter",
            Style::default().fg(Color::DarkGray),
        ))
    };
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
        area,
    );
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
}

/// Footer: load more button (or loader) on the left, scroll controls on the right.
fn draw_footer(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
    now: Instant,
) {
    tui.load_more_rect = None;
    let button_width = LOAD_MORE_LABEL.chars().count() as u16;
    let [left, right] =
        Layout::horizontal([Constraint::Length(button_width), Constraint::Min(0)]).areas(area);

    if app.is_loading && !app.gallery.items.is_empty() {
        let loader = Span::styled(
            format!(" {} Loading", SPINNER[spinner_frame % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        );
        frame.render_widget(Line::from(loader), left);
    } else if app.can_load_more() {
        let button = Span::styled(
            LOAD_MORE_LABEL,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Line::from(button), left);
        tui.load_more_rect = Some(left);
    }

    tui.scroll.render(frame, right, now);
}
