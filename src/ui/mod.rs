//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`layout`]: screen geometry shared with mouse hit-testing
//! - [`viewmodel`]: display-ready frame description
//! - [`renderer`]: top-level entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: wrapping, clipping, highlighting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::ScreenLayout;
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, DetailInfo, NotificationKind, PaginationInfo, TileItem, UIViewModel};
