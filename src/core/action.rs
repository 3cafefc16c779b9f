//! # Actions
//!
//! Everything that can happen in imgseek becomes an `Action`.
//! User presses Enter in the search bar? That's `Action::Submit(text)`.
//! A page arrives? That's `Action::PageLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Fetch ordering
//!
//! Only one gallery fetch is in flight at a time. Load more is ignored while
//! loading. A new query bumps `generation`; a response whose ticket carries an
//! older generation is dropped, so responses always apply in request order.

use log::{debug, info, warn};

use crate::core::state::{App, GalleryTransition, Query};
use crate::search::{SearchError, SearchPage};

pub const MSG_BLANK_QUERY: &str = "Please enter what you are looking for.";
pub const MSG_NOTHING_FOUND: &str = "Unfortunately, we could not find anything for your query.";
pub const MSG_ALL_FOUND: &str = "That's all we found for your query at the moment.";
pub const MSG_FETCH_FAILED: &str = "Something went wrong! Please try to reload.";

/// Identifies one gallery fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

#[derive(Debug)]
pub enum Action {
    /// Search input submitted non-blank text (raw, untrimmed).
    Submit(String),
    /// Search input submitted blank text.
    BlankSubmit,
    LoadMore,
    PageLoaded { ticket: FetchTicket, page: SearchPage },
    PageFailed { ticket: FetchTicket, error: SearchError },
    /// Start over from a clean slate.
    Reload,
    DismissNotice,
    Quit,
}

/// I/O the adapter must perform after an `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchPage(FetchTicket),
    /// Empty and unfocus the search input.
    ClearSearchInput,
    /// Abort in-flight work and reset presentation state.
    Reset,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => submit(app, &raw),
        Action::BlankSubmit => {
            app.notifications.warning(MSG_BLANK_QUERY);
            Effect::None
        }
        Action::LoadMore => load_more(app),
        Action::PageLoaded { ticket, page } => page_loaded(app, ticket, page),
        Action::PageFailed { ticket, error } => page_failed(app, ticket, error),
        Action::Reload => {
            info!("Reload requested, resetting state");
            app.reset();
            Effect::Reset
        }
        Action::DismissNotice => {
            app.notifications.dismiss_fatal();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, raw: &str) -> Effect {
    let query = match Query::parse(raw) {
        Ok(q) => q,
        Err(e) => {
            debug!("Rejected submission: {}", e);
            app.notifications.warning(MSG_BLANK_QUERY);
            return Effect::None;
        }
    };

    if app.gallery.query.as_ref() == Some(&query) {
        // Nothing on screen and nothing pending: the first page never arrived
        if app.gallery.items.is_empty() && !app.is_loading {
            info!("Retrying query with no results on screen: {:?}", query.as_str());
            app.page = 1;
            app.generation += 1;
            return start_fetch(app);
        }
        let gallery = &app.gallery;
        if gallery.total_available == gallery.previous_total_available {
            app.notifications
                .info(format!("No new images for the query \"{query}\""));
        } else {
            let extra = gallery.new_since_previous();
            app.notifications
                .success(format!("We've found {extra} extra images for \"{query}\""));
        }
        return Effect::None;
    }

    info!("New query: {:?}", query.as_str());
    app.gallery = app
        .gallery
        .apply(GalleryTransition::SetQuery(Some(query)));
    app.page = 1;
    app.generation += 1;
    start_fetch(app)
}

fn load_more(app: &mut App) -> Effect {
    if !app.can_load_more() {
        debug!(
            "Load more ignored (loading={}, has_more={})",
            app.is_loading,
            app.gallery.has_more()
        );
        return Effect::None;
    }
    app.page += 1;
    start_fetch(app)
}

fn start_fetch(app: &mut App) -> Effect {
    let Some(query) = app.gallery.query.as_ref() else {
        return Effect::None;
    };
    app.is_loading = true;
    Effect::FetchPage(FetchTicket {
        generation: app.generation,
        query: query.as_str().to_string(),
        page: app.page,
    })
}

fn is_stale(app: &App, ticket: &FetchTicket) -> bool {
    if ticket.generation != app.generation {
        debug!(
            "Dropping stale response for {:?} page {} (generation {} != {})",
            ticket.query, ticket.page, ticket.generation, app.generation
        );
        return true;
    }
    false
}

fn page_loaded(app: &mut App, ticket: FetchTicket, page: SearchPage) -> Effect {
    if is_stale(app, &ticket) {
        return Effect::None;
    }
    app.is_loading = false;

    let no_hits = page.hits.is_empty();
    app.gallery = app.gallery.apply(GalleryTransition::MergePage(page));

    if no_hits {
        info!("No results for {:?}, returning to idle", ticket.query);
        app.notifications.warning(MSG_NOTHING_FOUND);
        app.gallery = app.gallery.apply(GalleryTransition::SetQuery(None));
        app.page = 1;
        return Effect::None;
    }

    if app.gallery.is_exhausted() {
        app.notifications.success(MSG_ALL_FOUND);
    }
    Effect::None
}

fn page_failed(app: &mut App, ticket: FetchTicket, error: SearchError) -> Effect {
    if is_stale(app, &ticket) {
        return Effect::None;
    }
    warn!(
        "Fetch failed for {:?} page {}: {}",
        ticket.query, ticket.page, error
    );
    app.is_loading = false;
    // Roll the cursor back so the next load more asks for the same page.
    if ticket.page > 1 && app.page == ticket.page {
        app.page -= 1;
    }
    app.notifications.fatal(MSG_FETCH_FAILED);
    Effect::ClearSearchInput
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::{NotificationAction, NotificationKind};
    use crate::test_support::{page_of, test_app};

    fn expect_fetch(effect: Effect) -> FetchTicket {
        match effect {
            Effect::FetchPage(ticket) => ticket,
            other => panic!("Expected FetchPage, got {:?}", other),
        }
    }

    fn last_toast(app: &App) -> (NotificationKind, String) {
        let toast = app.notifications.toasts().last().expect("a toast");
        (toast.kind, toast.message.clone())
    }

    #[test]
    fn test_submit_new_query_fetches_page_one() {
        let mut app = test_app();
        let ticket = expect_fetch(update(&mut app, Action::Submit("  cats ".into())));
        assert_eq!(ticket.query, "cats");
        assert_eq!(ticket.page, 1);
        assert!(app.is_loading);
        assert_eq!(app.gallery.query.as_ref().unwrap().as_str(), "cats");
    }

    #[test]
    fn test_switching_query_resets_items_and_page() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        let t2 = expect_fetch(update(&mut app, Action::LoadMore));
        update(&mut app, Action::PageLoaded { ticket: t2, page: page_of(12, 50) });
        assert_eq!(app.page, 2);

        let t3 = expect_fetch(update(&mut app, Action::Submit("dogs".into())));
        assert!(app.gallery.items.is_empty());
        assert_eq!(app.page, 1);
        assert_eq!(t3.page, 1);
    }

    #[test]
    fn test_cats_scenario_load_more() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        assert_eq!(app.gallery.items.len(), 12);
        assert!(app.can_load_more());

        let t2 = expect_fetch(update(&mut app, Action::LoadMore));
        assert_eq!(t2.page, 2);
        update(&mut app, Action::PageLoaded { ticket: t2, page: page_of(12, 50) });
        assert_eq!(app.gallery.items.len(), 24);
        assert_eq!(app.page, 2);
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        let first = page_of(3, 6);
        update(&mut app, Action::PageLoaded { ticket: t1, page: first.clone() });
        let before = app.gallery.items.clone();

        let t2 = expect_fetch(update(&mut app, Action::LoadMore));
        let second = crate::test_support::page_from(10, 3, 6);
        update(&mut app, Action::PageLoaded { ticket: t2, page: second.clone() });

        let mut expected = before;
        expected.extend(second.hits);
        assert_eq!(app.gallery.items, expected);
    }

    #[test]
    fn test_zero_hits_returns_to_idle_with_warning() {
        let mut app = test_app();
        let ticket = expect_fetch(update(&mut app, Action::Submit("zzzxxxqqq".into())));
        update(&mut app, Action::PageLoaded { ticket, page: SearchPage { hits: vec![], total: 0 } });

        assert!(app.gallery.items.is_empty());
        assert!(app.gallery.query.is_none());
        assert!(!app.is_loading);
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Warning, MSG_NOTHING_FOUND.to_string())
        );
    }

    #[test]
    fn test_all_results_shown_notice() {
        let mut app = test_app();
        let ticket = expect_fetch(update(&mut app, Action::Submit("rare".into())));
        update(&mut app, Action::PageLoaded { ticket, page: page_of(5, 5) });
        assert!(!app.can_load_more());
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Success, MSG_ALL_FOUND.to_string())
        );
    }

    #[test]
    fn test_partial_page_does_not_announce_completion() {
        let mut app = test_app();
        let ticket = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket, page: page_of(12, 50) });
        assert!(app.notifications.toasts().is_empty());
    }

    #[test]
    fn test_resubmit_same_query_without_change_is_info() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        let t2 = expect_fetch(update(&mut app, Action::LoadMore));
        update(&mut app, Action::PageLoaded { ticket: t2, page: page_of(12, 50) });
        let items_before = app.gallery.items.clone();

        let effect = update(&mut app, Action::Submit("cats".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.gallery.items, items_before);
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Info, "No new images for the query \"cats\"".to_string())
        );
    }

    #[test]
    fn test_resubmit_same_query_reports_delta() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        let t2 = expect_fetch(update(&mut app, Action::LoadMore));
        update(&mut app, Action::PageLoaded { ticket: t2, page: page_of(12, 57) });

        let effect = update(&mut app, Action::Submit(" cats".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Success, "We've found 7 extra images for \"cats\"".to_string())
        );
    }

    #[test]
    fn test_resubmit_after_switching_query_compares_within_query() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });

        let t2 = expect_fetch(update(&mut app, Action::Submit("dogs".into())));
        assert_eq!(app.gallery.total_available, 0, "no total while dogs loads");
        update(&mut app, Action::PageLoaded { ticket: t2, page: page_of(12, 80) });

        assert_eq!(update(&mut app, Action::Submit("dogs".into())), Effect::None);
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Info, "No new images for the query \"dogs\"".to_string())
        );
    }

    #[test]
    fn test_resubmit_after_switching_to_smaller_query_is_info() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        let t2 = expect_fetch(update(&mut app, Action::Submit("dogs".into())));
        update(&mut app, Action::PageLoaded { ticket: t2, page: page_of(12, 30) });

        update(&mut app, Action::Submit("dogs".into()));
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Info, "No new images for the query \"dogs\"".to_string())
        );
    }

    #[test]
    fn test_resubmit_after_failed_first_page_refetches() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(
            &mut app,
            Action::PageFailed {
                ticket: t1.clone(),
                error: SearchError::Network("connection refused".into()),
            },
        );
        update(&mut app, Action::DismissNotice);

        let t2 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        assert_eq!(t2.query, "cats");
        assert_eq!(t2.page, 1);
        assert!(t2.generation > t1.generation);
        assert!(app.is_loading);
        assert!(app.notifications.toasts().is_empty());
    }

    #[test]
    fn test_resubmit_while_first_page_loads_does_not_refetch() {
        let mut app = test_app();
        expect_fetch(update(&mut app, Action::Submit("cats".into())));
        assert_eq!(update(&mut app, Action::Submit("cats".into())), Effect::None);
    }

    #[test]
    fn test_blank_submit_changes_nothing() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        let gallery_before = app.gallery.clone();
        let page_before = app.page;
        let toasts_before = app.notifications.toasts().len();

        for action in [Action::BlankSubmit, Action::Submit("   ".into())] {
            let effect = update(&mut app, action);
            assert_eq!(effect, Effect::None);
        }

        assert_eq!(app.gallery, gallery_before);
        assert_eq!(app.page, page_before);
        assert_eq!(app.notifications.toasts().len(), toasts_before + 2);
        assert_eq!(
            last_toast(&app),
            (NotificationKind::Warning, MSG_BLANK_QUERY.to_string())
        );
    }

    #[test]
    fn test_fetch_failure_leaves_items_and_raises_fatal() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });
        let items_before = app.gallery.items.clone();
        let total_before = app.gallery.total_available;

        let t2 = expect_fetch(update(&mut app, Action::LoadMore));
        let effect = update(
            &mut app,
            Action::PageFailed {
                ticket: t2,
                error: SearchError::Network("connection refused".into()),
            },
        );

        assert_eq!(effect, Effect::ClearSearchInput);
        assert_eq!(app.gallery.items, items_before);
        assert_eq!(app.gallery.total_available, total_before);
        assert_eq!(app.page, 1);
        assert!(!app.is_loading);
        let fatal = app.notifications.fatal_report().expect("fatal report");
        assert_eq!(fatal.kind, NotificationKind::Error);
        assert_eq!(fatal.action, Some(NotificationAction::Reload));
    }

    #[test]
    fn test_load_more_ignored_while_loading() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(&mut app, Action::PageLoaded { ticket: t1, page: page_of(12, 50) });

        let _t2 = expect_fetch(update(&mut app, Action::LoadMore));
        assert_eq!(update(&mut app, Action::LoadMore), Effect::None);
        assert_eq!(app.page, 2);
    }

    #[test]
    fn test_load_more_ignored_when_idle() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::LoadMore), Effect::None);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut app = test_app();
        let old = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        let new = expect_fetch(update(&mut app, Action::Submit("dogs".into())));
        assert_ne!(old.generation, new.generation);

        update(&mut app, Action::PageLoaded { ticket: old, page: page_of(12, 50) });
        assert!(app.gallery.items.is_empty());
        assert!(app.is_loading);

        update(&mut app, Action::PageLoaded { ticket: new, page: page_of(4, 4) });
        assert_eq!(app.gallery.items.len(), 4);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_superseded_failure_is_dropped() {
        let mut app = test_app();
        let old = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        let _new = expect_fetch(update(&mut app, Action::Submit("dogs".into())));
        let effect = update(
            &mut app,
            Action::PageFailed { ticket: old, error: SearchError::Parse("bad".into()) },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.notifications.fatal_report().is_none());
    }

    #[test]
    fn test_reload_resets_everything() {
        let mut app = test_app();
        let t1 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        update(
            &mut app,
            Action::PageFailed { ticket: t1.clone(), error: SearchError::Network("x".into()) },
        );

        assert_eq!(update(&mut app, Action::Reload), Effect::Reset);
        assert!(app.gallery.query.is_none());
        assert!(app.notifications.is_empty());

        // Same query is treated as new after a reload.
        let t2 = expect_fetch(update(&mut app, Action::Submit("cats".into())));
        assert!(t2.generation > t1.generation);
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
