//! User feedback ports

use booky_domain::Toast;

/// Delivers toast notifications to the user.
pub trait Notifier: Send + Sync {
    /// Shows a toast.
    fn notify(&self, toast: Toast);
}

/// Global busy indicator shown while a request is in flight.
pub trait LoadingIndicator: Send + Sync {
    /// Shows (`true`) or hides (`false`) the indicator.
    fn set_loading(&self, loading: bool);
}
