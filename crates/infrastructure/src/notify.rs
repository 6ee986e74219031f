//! Feedback adapters that report through `tracing`.

use std::sync::atomic::{AtomicUsize, Ordering};

use booky_application::ports::{LoadingIndicator, Notifier};
use booky_domain::{Toast, ToastKind};
use tracing::{error, info, warn};

/// Notifier writing each toast as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Info | ToastKind::Success => {
                info!(target: "booky::toast", kind = ?toast.kind, "{}", toast.message);
            }
            ToastKind::Warning => warn!(target: "booky::toast", "{}", toast.message),
            ToastKind::Error => error!(target: "booky::toast", "{}", toast.message),
        }
    }
}

/// Loading indicator counting requests in flight.
///
/// Overlapping requests keep it visible until the last one finishes.
#[derive(Debug, Default)]
pub struct TracingLoadingIndicator {
    in_flight: AtomicUsize,
}

impl TracingLoadingIndicator {
    /// Creates a hidden indicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while at least one request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

impl LoadingIndicator for TracingLoadingIndicator {
    fn set_loading(&self, loading: bool) {
        if loading {
            if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
                tracing::trace!("loading shown");
            }
        } else {
            let previous = self
                .in_flight
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .unwrap_or(0);
            if previous == 1 {
                tracing::trace!("loading hidden");
            }
        }
    }
}
