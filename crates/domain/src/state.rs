//! Display state of one screen region.
//!
//! A [`Panel`] replaces the whole content of a region on every reload, and a
//! [`Toast`] is a transient notification.

use serde::{Deserialize, Serialize};

/// Content of one screen region after a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    /// Nothing loaded yet.
    Idle,
    /// Loaded items.
    Items(Vec<T>),
    /// The load succeeded with nothing to show.
    Empty(String),
    /// The load failed.
    Error(String),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Panel<T> {
    /// Builds `Items`, or `Empty(message)` when `items` is empty.
    #[must_use]
    pub fn from_items(items: Vec<T>, empty_message: impl Into<String>) -> Self {
        if items.is_empty() {
            Self::Empty(empty_message.into())
        } else {
            Self::Items(items)
        }
    }

    /// Creates an error panel.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Returns the items, or an empty slice.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            _ => &[],
        }
    }

    /// Returns true for an error panel.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns true for an empty panel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Returns the message of an empty or error panel.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Empty(message) | Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Maps every item, keeping messages.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Panel<U> {
        match self {
            Self::Idle => Panel::Idle,
            Self::Items(items) => Panel::Items(items.into_iter().map(f).collect()),
            Self::Empty(message) => Panel::Empty(message),
            Self::Error(message) => Panel::Error(message),
        }
    }
}

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Neutral information
    Info,
    /// An action succeeded
    Success,
    /// A local validation blocked an action
    Warning,
    /// An action failed
    Error,
}

/// A transient user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity
    pub kind: ToastKind,
    /// Text shown to the user
    pub message: String,
}

impl Toast {
    /// Creates an info toast.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    /// Creates a success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Creates a warning toast.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }

    /// Creates an error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_items() {
        let panel = Panel::from_items(vec![1, 2], "none");
        assert_eq!(panel.items(), &[1, 2]);
        let empty: Panel<i32> = Panel::from_items(Vec::new(), "none");
        assert!(empty.is_empty());
        assert_eq!(empty.message(), Some("none"));
    }

    #[test]
    fn test_map_keeps_messages() {
        let error: Panel<i32> = Panel::error("boom");
        assert_eq!(error.map(|n| n * 2), Panel::Error("boom".to_string()));
        let items = Panel::Items(vec![1, 2]).map(|n| n * 10);
        assert_eq!(items.items(), &[10, 20]);
    }

    #[test]
    fn test_default_is_idle() {
        let panel: Panel<String> = Panel::default();
        assert_eq!(panel, Panel::Idle);
        assert!(panel.items().is_empty());
    }

    #[test]
    fn test_toast_constructors() {
        assert_eq!(Toast::warning("w").kind, ToastKind::Warning);
        assert_eq!(Toast::success("s").message, "s");
    }
}
