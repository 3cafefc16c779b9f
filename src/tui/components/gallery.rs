//! # Gallery Component
//!
//! Responsive grid of image tiles, one per accumulated `ImageItem`, in order.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `GalleryViewState` lives in `TuiState` (selection, scroll, cached geometry)
//! - `Gallery` is created each frame with borrowed items
//!
//! Tiles are `TILE_HEIGHT` rows tall; the column count is derived from the
//! available width so the grid reflows on resize.
//!
//! ## Scroll lock
//!
//! While an overlay (the lightbox) is open the grid must not scroll. The
//! overlay holds a `ScrollLock` guard acquired from the view; dropping the
//! guard releases the lock, whichever way the overlay goes away.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::search::ImageItem;
use crate::tui::event::TuiEvent;

pub const TILE_HEIGHT: u16 = 5;
pub const MIN_TILE_WIDTH: u16 = 26;

// ============================================================================
// Scroll Lock
// ============================================================================

/// Proof that scrolling is locked. Unlocks on drop.
#[derive(Debug)]
pub struct ScrollLock {
    flag: Rc<Cell<bool>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

// ============================================================================
// Persistent State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridGeometry {
    pub columns: u16,
    pub tile_width: u16,
    pub content_height: u16,
    pub viewport_height: u16,
}

impl GridGeometry {
    pub fn compute(width: u16, viewport_height: u16, item_count: usize) -> Self {
        // Leave one column for the scrollbar
        let usable = width.saturating_sub(1).max(1);
        let columns = (usable / MIN_TILE_WIDTH).max(1);
        let tile_width = usable / columns;
        let rows = item_count.div_ceil(columns as usize) as u16;
        Self {
            columns,
            tile_width,
            content_height: rows.saturating_mul(TILE_HEIGHT),
            viewport_height,
        }
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Rectangle of tile `index` inside the scroll canvas.
    pub fn tile_rect(&self, index: usize) -> Rect {
        let columns = self.columns.max(1) as usize;
        let row = (index / columns) as u16;
        let col = (index % columns) as u16;
        Rect::new(col * self.tile_width, row * TILE_HEIGHT, self.tile_width, TILE_HEIGHT)
    }
}

/// Persistent state for the gallery grid.
pub struct GalleryViewState {
    pub selected: Option<usize>,
    pub scroll_state: ScrollViewState,
    pub geometry: GridGeometry,
    /// Screen area drawn last frame, for mouse hit-testing
    pub area: Rect,
    locked: Rc<Cell<bool>>,
}

/// Events emitted by the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    ItemSelected { full_url: String, caption: String },
}

impl GalleryViewState {
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_state: ScrollViewState::default(),
            geometry: GridGeometry::default(),
            area: Rect::default(),
            locked: Rc::new(Cell::new(false)),
        }
    }

    /// Lock scrolling until the returned guard is dropped.
    pub fn lock_scroll(&self) -> ScrollLock {
        self.locked.set(true);
        ScrollLock {
            flag: Rc::clone(&self.locked),
        }
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.locked.get()
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }

    fn set_offset(&mut self, y: u16) {
        if self.is_scroll_locked() {
            return;
        }
        let y = y.min(self.geometry.max_offset());
        self.scroll_state.set_offset(Position { x: 0, y });
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.offset()) + delta).clamp(0, i32::from(u16::MAX));
        self.set_offset(target as u16);
    }

    pub fn scroll_to_top(&mut self) {
        self.set_offset(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.set_offset(self.geometry.max_offset());
    }

    /// Keep the selected tile inside the viewport.
    fn scroll_to_selected(&mut self) {
        let Some(index) = self.selected else { return };
        let rect = self.geometry.tile_rect(index);
        let offset = self.offset();
        let viewport = self.geometry.viewport_height;
        if rect.y < offset {
            self.set_offset(rect.y);
        } else if rect.y + rect.height > offset + viewport {
            self.set_offset((rect.y + rect.height).saturating_sub(viewport));
        }
    }

    /// Move the selection by `delta` tiles, clamped to `len`.
    fn move_selection(&mut self, delta: i64, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as i64;
        let next = if self.selected.is_none() {
            0
        } else {
            (current + delta).clamp(0, len as i64 - 1)
        };
        self.selected = Some(next as usize);
        self.scroll_to_selected();
    }

    /// Index of the tile under screen position (col, row), if any.
    pub fn hit_test(&self, col: u16, row: u16, len: usize) -> Option<usize> {
        if !self.area.contains(Position { x: col, y: row }) || self.geometry.tile_width == 0 {
            return None;
        }
        let canvas_y = row - self.area.y + self.offset();
        let canvas_x = col - self.area.x;
        let tile_col = canvas_x / self.geometry.tile_width;
        if tile_col >= self.geometry.columns {
            return None;
        }
        let tile_row = canvas_y / TILE_HEIGHT;
        let index = tile_row as usize * self.geometry.columns as usize + tile_col as usize;
        (index < len).then_some(index)
    }

    /// Route a key/mouse event. `items` are the tiles currently shown.
    pub fn handle_event(&mut self, event: &TuiEvent, items: &[ImageItem]) -> Option<GalleryEvent> {
        let columns = i64::from(self.geometry.columns.max(1));
        match event {
            TuiEvent::CursorLeft => self.move_selection(-1, items.len()),
            TuiEvent::CursorRight => self.move_selection(1, items.len()),
            TuiEvent::CursorUp => self.move_selection(-columns, items.len()),
            TuiEvent::CursorDown => self.move_selection(columns, items.len()),
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => {
                self.scroll_by(-i32::from(self.geometry.viewport_height.max(1)))
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_by(i32::from(self.geometry.viewport_height.max(1)))
            }
            TuiEvent::Submit => {
                return self.selected.and_then(|i| items.get(i)).map(selected_event);
            }
            TuiEvent::MouseClick(col, row) => {
                let index = self.hit_test(*col, *row, items.len())?;
                self.selected = Some(index);
                return Some(selected_event(&items[index]));
            }
            _ => {}
        }
        None
    }
}

impl Default for GalleryViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn selected_event(item: &ImageItem) -> GalleryEvent {
    GalleryEvent::ItemSelected {
        full_url: item.full_url.clone(),
        caption: item.caption.clone(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Transient render wrapper for the gallery grid.
pub struct Gallery<'a> {
    state: &'a mut GalleryViewState,
    items: &'a [ImageItem],
    focused: bool,
}

impl<'a> Gallery<'a> {
    pub fn new(state: &'a mut GalleryViewState, items: &'a [ImageItem], focused: bool) -> Self {
        Self {
            state,
            items,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;
        self.state.geometry = GridGeometry::compute(area.width, area.height, self.items.len());
        if self.state.selected.is_some_and(|i| i >= self.items.len()) {
            self.state.selected = None;
        }

        // Clamp after reflow so a shrinking grid never leaves us past the end
        let max = self.state.geometry.max_offset();
        if self.state.offset() > max {
            self.state.scroll_state.set_offset(Position { x: 0, y: max });
        }

        let geometry = self.state.geometry;
        let canvas_width = geometry.columns * geometry.tile_width;
        let mut scroll_view = ScrollView::new(Size::new(canvas_width, geometry.content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (index, item) in self.items.iter().enumerate() {
            let rect = geometry.tile_rect(index);
            let is_selected = self.focused && self.state.selected == Some(index);
            scroll_view.render_widget(tile(item, index, is_selected, rect.width), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

fn tile(item: &ImageItem, index: usize, selected: bool, width: u16) -> Paragraph<'static> {
    let inner = width.saturating_sub(2) as usize;
    let (border, text) = if selected {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::Blue).add_modifier(Modifier::DIM),
            Style::default().fg(Color::Gray),
        )
    };

    let caption = if item.caption.is_empty() {
        "(untitled)"
    } else {
        item.caption.as_str()
    };
    let mut lines: Vec<Line> = textwrap::wrap(caption, inner.max(1))
        .into_iter()
        .take(2)
        .map(|l| Line::from(Span::styled(l.into_owned(), text)))
        .collect();
    while lines.len() < 2 {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        truncate_width(file_name(&item.preview_url), inner),
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Line::from(format!(" #{} ", index + 1)).alignment(Alignment::Left)),
    )
}

/// Last path segment of a URL, which is what identifies a preview file.
fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Truncate to `max_width` display columns, adding "..." if needed.
pub fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
