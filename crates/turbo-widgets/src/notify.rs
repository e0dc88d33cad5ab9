//! Toast notifications. At most one is shown at a time.

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

/// Notification tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub lifetime_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { lifetime_ms: 5000 }
    }
}

/// Visual style, mapped to Bootstrap alert classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Danger => "danger",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    /// Alert class, e.g. `alert-success`.
    pub fn alert_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Holds the single visible notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    lifetime: Duration,
    current: Option<Notification>,
}

impl NotificationCenter {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            lifetime: Duration::from_millis(config.lifetime_ms),
            current: None,
        }
    }

    /// Show a notification, replacing whatever is visible.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notification {
            kind,
            message: message.into(),
            expires_at: now + self.lifetime,
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|n| n.expires_at)
    }

    /// Drop the notification once it has expired. Returns true when it went away.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> NotificationCenter {
        NotificationCenter::new(&NotificationConfig::default())
    }

    #[test]
    fn test_new_notification_replaces_old() {
        let t0 = Instant::now();
        let mut c = center();
        c.show(NotificationKind::Success, "Added to cart", t0);
        c.show(NotificationKind::Danger, "Out of stock", t0);
        let current = c.current().unwrap();
        assert_eq!(current.kind, NotificationKind::Danger);
        assert_eq!(current.message, "Out of stock");
    }

    #[test]
    fn test_auto_dismiss_after_lifetime() {
        let t0 = Instant::now();
        let mut c = center();
        c.show(NotificationKind::Info, "hello", t0);
        assert!(!c.tick(t0 + Duration::from_millis(4999)));
        assert!(c.tick(t0 + Duration::from_millis(5000)));
        assert!(c.current().is_none());
    }

    #[test]
    fn test_manual_dismiss() {
        let mut c = center();
        assert!(!c.dismiss());
        c.show(NotificationKind::Warning, "Maximum quantity is 5", Instant::now());
        assert!(c.dismiss());
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_alert_class() {
        assert_eq!(NotificationKind::Danger.alert_class(), "alert-danger");
    }
}
