//! # Scroll Controls
//!
//! Quick-jump controls to the top and bottom of the gallery.
//!
//! Which controls show is a small state machine driven by scroll position,
//! plus a time-based suppression window that hides the bottom control right
//! after a "load more" (the gallery is jumping to the bottom anyway, and the
//! control would flicker).
//!
//! ```text
//!   at top && bottom shown && !suppressed  →  BottomOnly
//!   scrolled to bottom (content overflows) →  TopOnly
//!   at bottom && top shown                 →  TopOnly
//!   neither top nor bottom                 →  Both
//!   otherwise                              →  unchanged
//! ```
//!
//! Jumps are instantaneous, so the grid can go from top to bottom without
//! passing through the middle; reaching the bottom shows the top control on
//! its own. Content that fits the viewport is both at top and at bottom and
//! shows nothing new.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const SUPPRESS_WINDOW: Duration = Duration::from_millis(1500);
/// Rows from an edge that still count as "at" that edge.
pub const EDGE_THRESHOLD: u16 = 2;

const TOP_LABEL: &str = " ▲ Top (t) ";
const BOTTOM_LABEL: &str = " ▼ Bottom (b) ";

/// Where the viewport sits within the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPosition {
    pub at_top: bool,
    pub at_bottom: bool,
}

impl ScrollPosition {
    pub fn from_metrics(offset: u16, viewport_height: u16, content_height: u16) -> Self {
        let remaining = content_height
            .saturating_sub(offset)
            .saturating_sub(viewport_height);
        Self {
            at_top: offset < EDGE_THRESHOLD,
            at_bottom: remaining < EDGE_THRESHOLD,
        }
    }

    pub const TOP: Self = Self { at_top: true, at_bottom: false };
    pub const MIDDLE: Self = Self { at_top: false, at_bottom: false };
    pub const BOTTOM: Self = Self { at_top: false, at_bottom: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Controls {
    #[default]
    Hidden,
    TopOnly,
    BottomOnly,
    Both,
}

impl Controls {
    pub fn shows_top(self) -> bool {
        matches!(self, Controls::TopOnly | Controls::Both)
    }

    pub fn shows_bottom(self) -> bool {
        matches!(self, Controls::BottomOnly | Controls::Both)
    }

    pub fn next(self, position: ScrollPosition, suppressed: bool) -> Controls {
        if position.at_top && self.shows_bottom() && !suppressed {
            Controls::BottomOnly
        } else if position.at_bottom && (!position.at_top || self.shows_top()) {
            Controls::TopOnly
        } else if !position.at_top && !position.at_bottom {
            Controls::Both
        } else {
            self
        }
    }
}

/// What the footer should actually draw right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleControls {
    pub top: bool,
    pub bottom: bool,
}

#[derive(Debug, Default)]
pub struct ScrollAffordance {
    controls: Controls,
    suppress_until: Option<Instant>,
    /// Screen rects drawn last frame, for click hit-testing
    top_rect: Option<Rect>,
    bottom_rect: Option<Rect>,
}

/// A click on one of the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollJump {
    Top,
    Bottom,
}

impl ScrollAffordance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Hide the bottom control for `SUPPRESS_WINDOW`.
    pub fn suppress(&mut self, now: Instant) {
        self.suppress_until = Some(now + SUPPRESS_WINDOW);
    }

    pub fn observe(&mut self, position: ScrollPosition, now: Instant) {
        let suppressed = self.is_suppressed(now);
        if !suppressed {
            self.suppress_until = None;
        }
        self.controls = self.controls.next(position, suppressed);
    }

    pub fn visible(&self, now: Instant) -> VisibleControls {
        VisibleControls {
            top: self.controls.shows_top(),
            bottom: self.controls.shows_bottom() && !self.is_suppressed(now),
        }
    }

    /// Back to nothing shown (new query).
    pub fn reset(&mut self) {
        self.controls = Controls::Hidden;
        self.suppress_until = None;
    }

    /// Draws the visible controls right-aligned into a one-row `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, now: Instant) {
        self.top_rect = None;
        self.bottom_rect = None;
        let visible = self.visible(now);
        let style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let mut x = area.x + area.width;
        let mut place = |label: &str| -> Option<Rect> {
            let w = label.chars().count() as u16;
            if x < area.x + w {
                return None;
            }
            x -= w;
            let rect = Rect::new(x, area.y, w, 1);
            frame.render_widget(Paragraph::new(Line::from(Span::styled(label.to_string(), style))), rect);
            Some(rect)
        };
        if visible.bottom {
            self.bottom_rect = place(BOTTOM_LABEL);
        }
        if visible.top {
            self.top_rect = place(TOP_LABEL);
        }
    }

    pub fn hit_test(&self, col: u16, row: u16) -> Option<ScrollJump> {
        let pos = ratatui::layout::Position { x: col, y: row };
        if self.top_rect.is_some_and(|r| r.contains(pos)) {
            Some(ScrollJump::Top)
        } else if self.bottom_rect.is_some_and(|r| r.contains(pos)) {
            Some(ScrollJump::Bottom)
        } else {
            None
        }
    }
}
