//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing query, counts and loading marker
//! - `toast`: Notification stack and the fatal error report
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBar`: Single-line query input with a clear affordance
//! - `Gallery`: Scrollable grid of image tiles with selection
//! - `LightboxState`: Full-image overlay, owns the gallery scroll lock
//! - `ScrollAffordance`: Jump-to-top/bottom controls
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (function parameters), not by
//! directly accessing global state. This makes dependencies explicit and
//! components testable.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! Gallery::new(&mut tui.gallery, &app.gallery.items, focused).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! gallery.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── search_bar.rs       (Query input)
//! ├── gallery.rs          (Image grid + scroll lock)
//! ├── lightbox.rs         (Full image overlay)
//! ├── scroll_controls.rs  (Top/bottom jump controls)
//! └── toast.rs            (Notifications)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod gallery;
pub mod lightbox;
pub mod scroll_controls;
pub mod search_bar;
pub mod toast;

pub use gallery::{Gallery, GalleryEvent, GalleryViewState};
pub use lightbox::{LightboxEvent, LightboxState};
pub use scroll_controls::{ScrollAffordance, ScrollJump, ScrollPosition};
pub use search_bar::{SearchBar, SearchEvent};
