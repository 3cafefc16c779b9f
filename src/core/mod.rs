//! # Core Application Logic
//!
//! This module contains imgseek's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (gallery data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │   search   │
//!             │  Adapter   │          │  provider  │
//!             │ (ratatui)  │          │ (reqwest)  │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App` and the `GalleryState` snapshot with its transitions
//! - [`action`]: The `Action` enum, `Effect`, and `update()`
//! - [`notify`]: Toasts and the fatal report
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod notify;
pub mod state;
