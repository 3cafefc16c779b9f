//! # Notifications
//!
//! Transient toasts plus one sticky fatal report.
//!
//! Toasts expire after a fixed duration. The fatal report (raised on a
//! failed fetch) stays until the user dismisses it or takes its action.

use std::time::{Duration, Instant};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Something the user can do from a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Throw away all state and start over.
    Reload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub action: Option<NotificationAction>,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            created_at: Instant::now(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.action.is_some()
    }
}

/// The notification sink owned by `App`.
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: Vec<Notification>,
    fatal: Option<Notification>,
    toast_duration: Duration,
}

impl Notifications {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            fatal: None,
            toast_duration,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Info, message));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Success, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(NotificationKind::Warning, message));
    }

    /// Raise the sticky error report offering a reload. Replaces any previous one.
    pub fn fatal(&mut self, message: impl Into<String>) {
        let mut notification = Notification::new(NotificationKind::Error, message);
        notification.action = Some(NotificationAction::Reload);
        self.fatal = Some(notification);
    }

    fn push(&mut self, notification: Notification) {
        self.toasts.push(notification);
    }

    /// Drop toasts older than the configured duration. Returns true if any expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let duration = self.toast_duration;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created_at) < duration);
        self.toasts.len() != before
    }

    pub fn dismiss_fatal(&mut self) {
        self.fatal = None;
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
        self.fatal = None;
    }

    /// Live toasts, oldest first.
    pub fn toasts(&self) -> &[Notification] {
        &self.toasts
    }

    pub fn fatal_report(&self) -> Option<&Notification> {
        self.fatal.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.fatal.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_keep_insertion_order() {
        let mut n = Notifications::new(DEFAULT_TOAST_DURATION);
        n.info("one");
        n.warning("two");
        let kinds: Vec<_> = n.toasts().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Info, NotificationKind::Warning]);
    }

    #[test]
    fn test_expire_drops_old_toasts_only() {
        let mut n = Notifications::new(Duration::from_millis(100));
        n.success("done");
        let created = n.toasts()[0].created_at;

        assert!(!n.expire(created + Duration::from_millis(50)));
        assert_eq!(n.toasts().len(), 1);

        assert!(n.expire(created + Duration::from_millis(150)));
        assert!(n.toasts().is_empty());
    }

    #[test]
    fn test_fatal_survives_expiry_until_dismissed() {
        let mut n = Notifications::new(Duration::from_millis(10));
        n.fatal("boom");
        let created = n.fatal_report().unwrap().created_at;
        n.expire(created + Duration::from_secs(60));

        let fatal = n.fatal_report().unwrap();
        assert!(fatal.is_fatal());
        assert_eq!(fatal.action, Some(NotificationAction::Reload));

        n.dismiss_fatal();
        assert!(n.is_empty());
    }
}
