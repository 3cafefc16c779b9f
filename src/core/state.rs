//! # Application State
//!
//! Core business state for imgseek. Domain logic only, no TUI types.
//! Presentation state (scroll offsets, lightbox, input buffer) lives in `tui`.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn SearchProvider>  // image search backend
//! ├── gallery: GalleryState             // query + accumulated items + totals
//! ├── page: u32                         // 1-based cursor for the current query
//! ├── per_page: u32                     // page size sent to the provider
//! ├── is_loading: bool                  // a gallery fetch is in flight
//! ├── generation: u64                   // bumped per new query, tags fetches
//! └── notifications: Notifications      // toasts + fatal report
//! ```
//!
//! `GalleryState` is never mutated in place. Every change goes through
//! `GalleryState::apply`, which returns the next snapshot. The merge/reset
//! invariants live there and nowhere else.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::notify::Notifications;
use crate::search::{ImageItem, SearchPage, SearchProvider};

pub const DEFAULT_PER_PAGE: u32 = 12;

// ============================================================================
// Query
// ============================================================================

/// A trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

/// Raised when a blank or whitespace-only query is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError;

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query must not be blank")
    }
}

impl std::error::Error for ValidationError {}

impl Query {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError);
        }
        Ok(Query(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Gallery State
// ============================================================================

/// Accumulated results for the current query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryState {
    /// `None` is the idle state.
    pub query: Option<Query>,
    /// Append-only within a query, in arrival order.
    pub items: Vec<ImageItem>,
    /// Server-reported total for the current query.
    pub total_available: u32,
    /// `total_available` as it was right before the latest fetch completed.
    /// Equal to `total_available` after a query's first page.
    pub previous_total_available: u32,
}

/// The only ways a `GalleryState` can change.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryTransition {
    /// Switch to a new query (or back to idle with `None`).
    /// A no-op when the query is unchanged.
    SetQuery(Option<Query>),
    /// Append a freshly fetched page.
    MergePage(SearchPage),
}

impl GalleryState {
    pub fn apply(&self, transition: GalleryTransition) -> GalleryState {
        match transition {
            GalleryTransition::SetQuery(query) if query == self.query => self.clone(),
            // Totals belong to the query they were reported for
            GalleryTransition::SetQuery(query) => GalleryState {
                query,
                ..GalleryState::default()
            },
            GalleryTransition::MergePage(page) => {
                // A query's first page is its baseline: nothing is "new" yet
                let previous_total_available = if self.items.is_empty() {
                    page.total
                } else {
                    self.total_available
                };
                let mut items = Vec::with_capacity(self.items.len() + page.hits.len());
                items.extend(self.items.iter().cloned());
                items.extend(page.hits);
                GalleryState {
                    query: self.query.clone(),
                    items,
                    total_available: page.total,
                    previous_total_available,
                }
            }
        }
    }

    /// True when another page exists beyond what has been fetched.
    pub fn has_more(&self) -> bool {
        !self.items.is_empty() && (self.items.len() as u64) < u64::from(self.total_available)
    }

    /// True when the fetched items already cover the reported total.
    pub fn is_exhausted(&self) -> bool {
        !self.items.is_empty() && (self.items.len() as u64) >= u64::from(self.total_available)
    }

    /// Newly reported images since the previous fetch (saturating at zero).
    pub fn new_since_previous(&self) -> u32 {
        self.total_available
            .saturating_sub(self.previous_total_available)
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub provider: Arc<dyn SearchProvider>,
    pub gallery: GalleryState,
    pub page: u32,
    pub per_page: u32,
    pub is_loading: bool,
    /// Bumped on every new query; responses carrying an older value are dropped.
    pub generation: u64,
    pub notifications: Notifications,
}

impl App {
    pub fn new(provider: Arc<dyn SearchProvider>, per_page: u32, toast_duration: Duration) -> Self {
        Self {
            provider,
            gallery: GalleryState::default(),
            page: 1,
            per_page,
            is_loading: false,
            generation: 0,
            notifications: Notifications::new(toast_duration),
        }
    }

    pub fn from_config(provider: Arc<dyn SearchProvider>, config: &ResolvedConfig) -> Self {
        Self::new(provider, config.per_page, config.toast_duration)
    }

    /// "Load more" is offered only when idle and more results exist.
    pub fn can_load_more(&self) -> bool {
        !self.is_loading && self.gallery.has_more()
    }

    /// Drop everything back to the startup state. Keeps the provider and settings.
    pub fn reset(&mut self) {
        self.gallery = GalleryState::default();
        self.page = 1;
        self.is_loading = false;
        self.generation += 1;
        self.notifications.clear();
    }
}
