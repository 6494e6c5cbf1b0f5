//! Read diagnostics.
//!
//! Legacy layer files routinely carry malformed lines, stray vertices and
//! truncated tails. The readers recover from these locally and record each
//! recovery as a `Notification` on the resulting layer instead of failing.
//!
//! After a read the caller can inspect [`Layer::notifications`] to see what
//! was skipped.
//!
//! [`Layer::notifications`]: crate::Layer::notifications

use std::fmt;

/// Category of a recovered malformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A header or data line was ignored; no shape came from it.
    SkippedLine,
    /// A single vertex line was ignored; its shape is one vertex shorter.
    DroppedVertex,
    /// The data ended inside a vertex list; the shape keeps what was read.
    TruncatedShape,
    /// A read failure ended the file early after shapes had been produced.
    ReadError,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedLine => write!(f, "SkippedLine"),
            Self::DroppedVertex => write!(f, "DroppedVertex"),
            Self::TruncatedShape => write!(f, "TruncatedShape"),
            Self::ReadError => write!(f, "ReadError"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during a read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and emit it as a `tracing` event.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        let notification = Notification::new(notification_type, message);
        match notification_type {
            NotificationType::ReadError => tracing::warn!("{}", notification),
            _ => tracing::debug!("{}", notification),
        }
        self.items.push(notification);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Number of notifications of a specific type.
    pub fn count_of(&self, nt: NotificationType) -> usize {
        self.items.iter().filter(|n| n.notification_type == nt).count()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
