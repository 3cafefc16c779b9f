//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard/mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event routing
//!
//! Events go to the first layer that claims them:
//!
//! 1. fatal report (`r` reloads, Esc dismisses, everything else swallowed)
//! 2. lightbox (Esc/`q`/Enter/click outside closes)
//! 3. mouse clicks, by hit-testing last frame's rects
//! 4. the focused pane (search bar or gallery)
//!
//! ## Redraw Strategy
//!
//! Draws every ~80ms while something animates (fetch or lightbox loader, or
//! toasts waiting to expire); otherwise sleeps up to 500ms and only redraws
//! on events.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, FetchTicket, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::search::{
    ImageDetails, PixabayProvider, SearchError, SearchProvider, SearchRequest,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    GalleryEvent, GalleryViewState, LightboxEvent, LightboxState, ScrollAffordance, ScrollJump,
    ScrollPosition, SearchBar, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the query. Esc or Tab moves to the gallery.
    Search,
    /// Arrows move the selection. Typing jumps back to the search bar.
    Gallery,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_bar: SearchBar,
    pub gallery: GalleryViewState,
    /// Lightbox overlay (None = closed)
    pub lightbox: Option<LightboxState>,
    pub scroll: ScrollAffordance,
    pub focus: Focus,
    // Hit-test rects from the last frame
    pub search_area: Rect,
    pub load_more_rect: Option<Rect>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            gallery: GalleryViewState::new(),
            lightbox: None,
            scroll: ScrollAffordance::new(),
            focus: Focus::Search, // User expects to type immediately
            search_area: Rect::default(),
            load_more_rect: None,
        }
    }

    fn open_lightbox(&mut self, full_url: String, caption: String) {
        let lock = self.gallery.lock_scroll();
        self.lightbox = Some(LightboxState::open(full_url, caption, lock));
    }

    /// Back to the startup presentation.
    fn reset(&mut self) {
        // The lightbox holds a lock on the old gallery view; drop it first
        self.lightbox = None;
        self.gallery = GalleryViewState::new();
        self.search_bar.clear();
        self.scroll.reset();
        self.focus = Focus::Search;
    }

    /// A new query replaces the grid: selection, scroll and controls start over.
    fn start_new_results(&mut self) {
        self.gallery.selected = None;
        self.gallery.scroll_to_top();
        self.scroll.reset();
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages from background tasks to the event loop.
#[derive(Debug)]
enum BackgroundEvent {
    Core(Action),
    Details {
        url: String,
        result: Result<ImageDetails, String>,
    },
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the search provider from resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn SearchProvider>, SearchError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        SearchError::Config(
            "Pixabay API key must be set (config file, PIXABAY_API_KEY env var, or --api-key)"
                .to_string(),
        )
    })?;
    let provider = PixabayProvider::new(api_key, Some(config.base_url.clone()))
        .with_filters(config.image_type.clone(), config.orientation.clone());
    Ok(Arc::new(provider))
}

/// State the event loop threads through effect handling.
struct Runtime {
    tx: mpsc::Sender<BackgroundEvent>,
    /// The in-flight gallery fetch, aborted when superseded
    fetch: Option<AbortHandle>,
    /// Jump the grid to the bottom once the next frame has measured it
    scroll_to_bottom_pending: bool,
    should_quit: bool,
}

impl Runtime {
    /// Forget the fetch handle once the current generation's response is in.
    /// A superseded task's late response leaves the live handle alone.
    fn settle_fetch(&mut self, app: &App, action: &Action) {
        let ticket = match action {
            Action::PageLoaded { ticket, .. } | Action::PageFailed { ticket, .. } => ticket,
            _ => return,
        };
        if ticket.generation == app.generation {
            self.fetch = None;
        }
    }

    fn abort_fetch(&mut self) {
        if let Some(handle) = self.fetch.take() {
            debug!("Aborting in-flight fetch");
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig, initial_query: Option<String>) -> std::io::Result<()> {
    let provider = build_provider(&config).map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Using search provider: {}", provider.name());
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for results from background tasks
    let (tx, rx) = mpsc::channel();
    let mut rt = Runtime {
        tx,
        fetch: None,
        scroll_to_bottom_pending: false,
        should_quit: false,
    };

    if let Some(query) = initial_query {
        tui.search_bar.set_text(&query);
        dispatch(&mut app, &mut tui, &mut rt, Action::Submit(query));
    }

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        if app.notifications.expire(now) {
            needs_redraw = true;
        }

        let lightbox_loading = tui.lightbox.as_ref().is_some_and(|lb| !lb.is_loaded());
        let animating = app.is_loading
            || lightbox_loading
            || !app.notifications.toasts().is_empty()
            || tui.scroll.is_suppressed(now);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame, now))?;
            needs_redraw = false;

            // Geometry is only known after a draw
            if rt.scroll_to_bottom_pending {
                tui.gallery.scroll_to_bottom();
                rt.scroll_to_bottom_pending = false;
                needs_redraw = true;
            }
            let geometry = tui.gallery.geometry;
            let position = ScrollPosition::from_metrics(
                tui.gallery.offset(),
                geometry.viewport_height,
                geometry.content_height,
            );
            tui.scroll.observe(position, now);
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            handle_event(&mut app, &mut tui, &mut rt, event);
            if rt.should_quit {
                break;
            }
        }

        if rt.should_quit {
            break;
        }

        // Handle background task results
        while let Ok(message) = rx.try_recv() {
            needs_redraw = true;
            match message {
                BackgroundEvent::Core(action) => {
                    debug!("Event loop received: {:?}", action);
                    if let Action::PageLoaded { ticket, .. } = &action
                        && ticket.page > 1
                        && ticket.generation == app.generation
                    {
                        rt.scroll_to_bottom_pending = true;
                    }
                    rt.settle_fetch(&app, &action);
                    dispatch(&mut app, &mut tui, &mut rt, action);
                }
                BackgroundEvent::Details { url, result } => {
                    if let Some(lightbox) = tui.lightbox.as_mut() {
                        lightbox.finish_loading(&url, result);
                    }
                }
            }
        }

        if rt.should_quit {
            break;
        }
    }

    rt.abort_fetch();
    ratatui::restore();
    Ok(())
}

/// Run an action through the core and perform the resulting effect.
fn dispatch(app: &mut App, tui: &mut TuiState, rt: &mut Runtime, action: Action) {
    let is_load_more = matches!(action, Action::LoadMore);
    match update(app, action) {
        Effect::None => {}
        Effect::Quit => rt.should_quit = true,
        Effect::FetchPage(ticket) => {
            if is_load_more {
                tui.scroll.suppress(Instant::now());
            } else {
                tui.start_new_results();
            }
            rt.abort_fetch();
            rt.fetch = Some(spawn_fetch(app, ticket, rt.tx.clone()));
        }
        Effect::ClearSearchInput => {
            tui.search_bar.clear();
            tui.search_bar.blur();
            tui.focus = Focus::Gallery;
        }
        Effect::Reset => {
            rt.abort_fetch();
            rt.scroll_to_bottom_pending = false;
            tui.reset();
        }
    }
}

fn handle_event(app: &mut App, tui: &mut TuiState, rt: &mut Runtime, event: TuiEvent) {
    match event {
        // Resize just needs a redraw (already flagged)
        TuiEvent::Resize => return,
        // Ctrl+C always quits regardless of what is open
        TuiEvent::ForceQuit => {
            dispatch(app, tui, rt, Action::Quit);
            return;
        }
        _ => {}
    }

    if app.notifications.fatal_report().is_some() {
        match event {
            TuiEvent::InputChar('r') | TuiEvent::InputChar('R') => {
                dispatch(app, tui, rt, Action::Reload)
            }
            TuiEvent::Escape => dispatch(app, tui, rt, Action::DismissNotice),
            _ => {}
        }
        return;
    }

    if let Some(lightbox) = tui.lightbox.as_mut() {
        if lightbox.handle_event(&event) == Some(LightboxEvent::Close) {
            debug!("Lightbox closed");
            tui.lightbox = None;
        }
        return;
    }

    if let TuiEvent::MouseClick(col, row) = event {
        handle_click(app, tui, rt, col, row, &event);
        return;
    }

    match event {
        // Scrolling always goes to the gallery regardless of focus
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.gallery.handle_event(&event, &app.gallery.items);
        }
        TuiEvent::JumpTop => jump(tui, ScrollJump::Top),
        TuiEvent::JumpBottom => jump(tui, ScrollJump::Bottom),
        TuiEvent::ToggleFocus => toggle_focus(app, tui),
        _ => match tui.focus {
            Focus::Search => handle_search_key(app, tui, rt, &event),
            Focus::Gallery => handle_gallery_key(app, tui, rt, &event),
        },
    }
}

fn handle_click(
    app: &mut App,
    tui: &mut TuiState,
    rt: &mut Runtime,
    col: u16,
    row: u16,
    event: &TuiEvent,
) {
    let pos = Position { x: col, y: row };
    if tui.load_more_rect.is_some_and(|r| r.contains(pos)) {
        dispatch(app, tui, rt, Action::LoadMore);
    } else if let Some(target) = tui.scroll.hit_test(col, row) {
        jump(tui, target);
    } else if tui.search_bar.hit_clear_button(col, row) {
        tui.search_bar.clear();
        tui.focus = Focus::Search;
    } else if tui.search_area.contains(pos) {
        tui.focus = Focus::Search;
    } else if let Some(GalleryEvent::ItemSelected { full_url, caption }) =
        tui.gallery.handle_event(event, &app.gallery.items)
    {
        tui.focus = Focus::Gallery;
        open_lightbox(app, tui, rt, full_url, caption);
    }
}

fn handle_search_key(app: &mut App, tui: &mut TuiState, rt: &mut Runtime, event: &TuiEvent) {
    if matches!(event, TuiEvent::Escape) {
        tui.focus = Focus::Gallery;
        return;
    }
    match tui.search_bar.handle_event(event) {
        Some(SearchEvent::Submit(text)) => {
            dispatch(app, tui, rt, Action::Submit(text));
            if !app.gallery.items.is_empty() || app.is_loading {
                tui.focus = Focus::Gallery;
            }
        }
        Some(SearchEvent::Blank) => dispatch(app, tui, rt, Action::BlankSubmit),
        Some(SearchEvent::ContentChanged) | Some(SearchEvent::Cleared) | None => {}
    }
}

fn handle_gallery_key(app: &mut App, tui: &mut TuiState, rt: &mut Runtime, event: &TuiEvent) {
    match event {
        TuiEvent::InputChar('m') => dispatch(app, tui, rt, Action::LoadMore),
        TuiEvent::InputChar('t') => jump(tui, ScrollJump::Top),
        TuiEvent::InputChar('b') => jump(tui, ScrollJump::Bottom),
        TuiEvent::InputChar('q') => dispatch(app, tui, rt, Action::Quit),
        // Any other typing goes back to the search bar
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace | TuiEvent::ClearInput => {
            tui.focus = Focus::Search;
            tui.search_bar.focus();
            tui.search_bar.handle_event(event);
        }
        TuiEvent::Escape => {}
        _ => {
            if let Some(GalleryEvent::ItemSelected { full_url, caption }) =
                tui.gallery.handle_event(event, &app.gallery.items)
            {
                open_lightbox(app, tui, rt, full_url, caption);
            }
        }
    }
}

fn toggle_focus(app: &App, tui: &mut TuiState) {
    tui.focus = match tui.focus {
        Focus::Search if !app.gallery.items.is_empty() => Focus::Gallery,
        Focus::Search => Focus::Search,
        Focus::Gallery => Focus::Search,
    };
    if tui.focus == Focus::Gallery && tui.gallery.selected.is_none() {
        tui.gallery.selected = Some(0);
    }
}

fn jump(tui: &mut TuiState, target: ScrollJump) {
    match target {
        ScrollJump::Top => tui.gallery.scroll_to_top(),
        ScrollJump::Bottom => tui.gallery.scroll_to_bottom(),
    }
}

fn open_lightbox(app: &App, tui: &mut TuiState, rt: &Runtime, full_url: String, caption: String) {
    info!("Opening lightbox for {}", full_url);
    tui.open_lightbox(full_url.clone(), caption);
    spawn_details(app, full_url, rt.tx.clone());
}

fn spawn_fetch(app: &App, ticket: FetchTicket, tx: mpsc::Sender<BackgroundEvent>) -> AbortHandle {
    info!(
        "Spawning fetch for {:?} page {} (generation {})",
        ticket.query, ticket.page, ticket.generation
    );
    let provider = app.provider.clone();
    let per_page = app.per_page;

    let handle = tokio::spawn(async move {
        let request = SearchRequest {
            query: &ticket.query,
            page: ticket.page,
            per_page,
        };
        let result = provider.search(request).await;
        let action = match result {
            Ok(page) => {
                debug!("Fetched {} hits (total {})", page.hits.len(), page.total);
                Action::PageLoaded { ticket, page }
            }
            Err(error) => Action::PageFailed { ticket, error },
        };
        if tx.send(BackgroundEvent::Core(action)).is_err() {
            warn!("Failed to send fetch result: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn spawn_details(app: &App, url: String, tx: mpsc::Sender<BackgroundEvent>) {
    let provider = app.provider.clone();
    tokio::spawn(async move {
        let result = provider
            .fetch_details(&url)
            .await
            .map_err(|e| e.to_string());
        if let Err(e) = &result {
            warn!("Image details failed for {}: {}", url, e);
        }
        if tx.send(BackgroundEvent::Details { url, result }).is_err() {
            warn!("Failed to send image details: receiver dropped");
        }
    });
}
