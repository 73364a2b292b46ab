//! Outbound collaborators of the view model.
//!
//! The embedding page supplies both sinks: a transient notification surface
//! (toast, growl, status bar) and something that can perform a full-page
//! navigation. The view model never fails outward; everything user-visible
//! flows through these traits.

use std::time::Duration;
use url::Url;

/// Receives short-lived, user-visible error messages.
pub trait NotificationSink: Send + Sync {
    /// Shows an error notification for the given duration.
    fn error(&self, message: &str, time_to_live: Duration);
}

/// Performs a full navigation to a fully-formed URL.
pub trait NavigationSink: Send + Sync {
    fn navigate(&self, target: &Url);
}
