//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin shim (`main.rs`) and the domain and
//! fetch layers. It never calls the host directly.
//!
//! ```text
//! Host input → Event → handle_event → AppState transitions → Actions → host calls
//!                            ↑                                    │
//!                            └──── WebRequestResult / Timer ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: event routing, overlay first
//! - [`input`]: search bar buffer
//! - [`modes`]: typing vs. browsing
//! - [`overlay`]: detail overlay and its scroll lock
//! - [`search`]: query, page and fetch bookkeeping
//! - [`state`]: the orchestrator and view model computation

pub mod actions;
pub mod handler;
pub mod input;
pub mod modes;
pub mod overlay;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use overlay::{DetailOverlay, ScrollLatch, ScrollLock};
pub use search::{Completion, SearchSession, MAX_PAGE};
pub use state::{AppState, ClickTarget, Notification};
