//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings and positions only; every decision (what body to show, whether the
//! page strip exists, which tile is focused) has already been made.

use crate::ui::layout::{PageLabel, ScreenLayout};

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub layout: ScreenLayout,
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,

    /// A request for the current key is in flight.
    pub loading: bool,

    pub notification: Option<NotificationInfo>,
    pub body: Body,

    /// Present only when the displayed result has more than one page.
    pub pagination: Option<PaginationInfo>,

    /// Present while the detail overlay is mounted. Drawn last.
    pub detail: Option<DetailInfo>,

    pub footer: FooterInfo,
}

/// What occupies the area between the notification line and the page strip.
#[derive(Debug, Clone)]
pub enum Body {
    /// Start screen shown before the first search.
    Welcome(EmptyState),

    /// Visible window of the displayed page. May be empty.
    Grid(Vec<TileItem>),

    /// Fetch failure or configuration problem.
    Error(EmptyState),
}

/// One movie tile of the grid.
#[derive(Debug, Clone)]
pub struct TileItem {
    /// Slot within the visible window, used for positioning.
    pub slot: usize,

    /// Title, already truncated to the tile width.
    pub title: String,

    /// Year and rating line.
    pub subtitle: String,

    pub is_selected: bool,

    /// Character ranges of the title matching the searched query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Result count and page position, when a page is displayed.
    pub summary: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Text currently being typed.
    pub query: String,

    /// Last submitted query, shown as a placeholder while the bar is empty.
    pub placeholder: String,

    /// Keys go to the bar.
    pub active: bool,
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct NotificationInfo {
    pub message: String,
    pub kind: NotificationKind,
}

/// Page strip state.
///
/// `selected` is zero-based; the session's page number is one-based.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    pub page_count: usize,
    pub selected: usize,
    pub labels: Vec<PageLabel>,
}

/// Content of the detail overlay.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub rating: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}
