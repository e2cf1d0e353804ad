//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It mutates [`AppState`] and
//! returns a list of actions; the plugin shim in `main.rs` turns each one into
//! a host call.
//!
//! ```rust
//! use zinema::app::Action;
//! use zinema::fetch::FetchKey;
//!
//! let actions = vec![Action::Fetch(FetchKey::new("batman", 1))];
//! assert_eq!(actions.len(), 1);
//! ```
//!
//! [`AppState`]: crate::app::AppState

use crate::fetch::FetchKey;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one search request tagged with this key.
    Fetch(FetchKey),

    /// Asks the host for a timer event after this many seconds.
    ///
    /// Used to expire transient notifications.
    ScheduleTimeout(f64),
}
