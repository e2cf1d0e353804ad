//! Application state management and view model computation.
//!
//! [`AppState`] is the orchestrator: it owns the search bar, the
//! [`SearchSession`] (query, page and fetch bookkeeping), the grid cursor and
//! scroll offset, the mounted [`DetailOverlay`] and the transient
//! notification. The event handler drives it through the methods below; the
//! renderer reads it through [`AppState::compute_viewmodel`].
//!
//! # Transitions
//!
//! - [`submit_search`](AppState::submit_search): new query, page 1, overlay
//!   cleared.
//! - [`go_to_page`](AppState::go_to_page) and friends: page change within the
//!   displayed result.
//! - [`apply_fetch`](AppState::apply_fetch): a response arrived; stale ones are
//!   dropped, empty ones raise a notification exactly once.
//! - [`open_detail`](AppState::open_detail) /
//!   [`close_detail`](AppState::close_detail): overlay lifecycle.
//!
//! # Example
//!
//! ```rust
//! use zinema::app::{Action, AppState};
//! use zinema::fetch::FetchKey;
//! use zinema::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! for c in "alien".chars() {
//!     state.input.push(c);
//! }
//! let actions = state.submit_search();
//! assert_eq!(actions, vec![Action::Fetch(FetchKey::new("alien", 1))]);
//! ```

use super::actions::Action;
use super::input::SearchInput;
use super::modes::InputMode;
use super::overlay::{DetailOverlay, ScrollLatch};
use super::search::{Completion, SearchSession, MAX_PAGE};
use crate::domain::{FetchError, Movie, ResultPage};
use crate::fetch::FetchKey;
use crate::ui::layout::{pagination_labels, ScreenLayout, NOTIFICATION_ROW, SEARCH_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailInfo, EmptyState, FooterInfo, HeaderInfo, NotificationInfo, NotificationKind,
    PaginationInfo, SearchBarInfo, TileItem, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::VecDeque;

/// Image CDN prefix used when the configuration does not override it.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Seconds a notification stays on screen by default.
pub const DEFAULT_TOAST_SECONDS: f64 = 4.0;

/// Message raised when a search completes with zero movies.
pub const NO_RESULTS_MESSAGE: &str = "No movies found for your request";

const POSTER_SIZE: &str = "w342";

/// A transient message under the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifies the expiry timer scheduled for this message.
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// What a left click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Tile of the displayed page, by index into its results.
    Tile(usize),
    /// Page strip entry, zero-based.
    Page(usize),
    SearchBar,
    /// The notification line while a notification is shown.
    Notification,
    /// The `[x]` control of the overlay.
    DetailClose,
    /// Inside the overlay box.
    DetailContent,
    /// Outside the overlay box while it is mounted.
    Backdrop,
    Nothing,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub session: SearchSession,
    pub input: SearchInput,
    pub input_mode: InputMode,

    /// Index of the focused tile within the displayed page.
    pub cursor: usize,

    /// First visible grid row.
    pub first_row: usize,

    /// Mounted overlay. Holds a scroll lock from `scroll_latch`.
    pub detail: Option<DetailOverlay>,
    pub scroll_latch: ScrollLatch,

    pub notification: Option<Notification>,
    next_notification_id: u64,
    /// Notification ids in the order their timers were scheduled.
    expiry_queue: VecDeque<u64>,

    /// Geometry of the last rendered frame.
    pub layout: ScreenLayout,

    pub theme: Theme,
    pub image_base_url: String,
    pub toast_seconds: f64,

    /// Set when the plugin cannot talk to the API at all.
    pub config_error: Option<String>,
}

impl AppState {
    /// Creates a state with no query, typing into the search bar.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            session: SearchSession::new(),
            input: SearchInput::default(),
            input_mode: InputMode::Typing,
            cursor: 0,
            first_row: 0,
            detail: None,
            scroll_latch: ScrollLatch::default(),
            notification: None,
            next_notification_id: 0,
            expiry_queue: VecDeque::new(),
            layout: ScreenLayout::default(),
            theme,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            toast_seconds: DEFAULT_TOAST_SECONDS,
            config_error: None,
        }
    }

    /// Creates a state that only shows `message` and never fetches.
    #[must_use]
    pub fn misconfigured(theme: Theme, message: impl Into<String>) -> Self {
        Self {
            config_error: Some(message.into()),
            input_mode: InputMode::Browsing,
            ..Self::new(theme)
        }
    }

    /// Movies of the displayed page, empty before the first success.
    #[must_use]
    pub fn items(&self) -> &[Movie] {
        self.session
            .displayed()
            .map(|page| page.results.as_slice())
            .unwrap_or_default()
    }

    /// Records the pane size. Returns `true` if it changed.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) -> bool {
        let layout = ScreenLayout::for_viewport(rows, cols);
        if layout == self.layout {
            return false;
        }
        self.layout = layout;
        self.reveal_cursor();
        true
    }

    /// Submits the search bar.
    ///
    /// Whitespace-only input clears the bar and does nothing else. Otherwise
    /// the overlay is closed, the cursor returns to the first tile and the
    /// session is asked for `(query, 1)`.
    pub fn submit_search(&mut self) -> Vec<Action> {
        if self.config_error.is_some() {
            return vec![];
        }

        let Some(query) = self.input.submit() else {
            tracing::debug!("blank query ignored");
            return vec![];
        };

        self.close_detail();
        self.cursor = 0;
        self.first_row = 0;
        self.input_mode = InputMode::Browsing;

        self.session
            .submit_query(query)
            .map(Action::Fetch)
            .into_iter()
            .collect()
    }

    /// Moves to a one-based page of the current query.
    pub fn go_to_page(&mut self, page: u32) -> Vec<Action> {
        self.session
            .set_page(page)
            .map(Action::Fetch)
            .into_iter()
            .collect()
    }

    /// Moves to a zero-based page strip entry.
    pub fn select_page_index(&mut self, index: usize) -> Vec<Action> {
        let page = u32::try_from(index + 1).unwrap_or(MAX_PAGE);
        self.go_to_page(page)
    }

    pub fn next_page(&mut self) -> Vec<Action> {
        self.go_to_page(self.session.page().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Vec<Action> {
        self.go_to_page(self.session.page().saturating_sub(1))
    }

    /// Applies the response for `key`.
    ///
    /// Returns whether anything visible changed and the actions to run. A
    /// response for a superseded key changes nothing.
    pub fn apply_fetch(
        &mut self,
        key: &FetchKey,
        outcome: Result<ResultPage, FetchError>,
    ) -> (bool, Vec<Action>) {
        match self.session.complete(key, outcome) {
            Completion::Stale => (false, vec![]),
            Completion::Applied { empty } => {
                self.close_detail();
                self.cursor = 0;
                self.first_row = 0;

                let actions = if empty {
                    self.notify(NotificationKind::Info, NO_RESULTS_MESSAGE)
                } else {
                    vec![]
                };
                (true, actions)
            }
            Completion::Failed => {
                self.close_detail();
                (true, vec![])
            }
        }
    }

    /// Shows a notification and schedules its expiry.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Vec<Action> {
        let id = self.next_notification_id;
        self.next_notification_id += 1;

        let message = message.into();
        tracing::debug!(id, message = %message, ?kind, "notification raised");

        self.notification = Some(Notification { id, message, kind });
        self.expiry_queue.push_back(id);
        vec![Action::ScheduleTimeout(self.toast_seconds)]
    }

    /// Handles one expiry timer.
    ///
    /// Timers fire in the order they were scheduled, so the oldest queued id
    /// is the one expiring. The notification is cleared only if it is still
    /// the one that timer belongs to.
    pub fn expire_notification(&mut self) -> bool {
        let Some(id) = self.expiry_queue.pop_front() else {
            return false;
        };

        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            true
        } else {
            false
        }
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }

    /// Mounts the overlay for the movie at `index` of the displayed page.
    pub fn open_detail(&mut self, index: usize) -> bool {
        let Some(movie) = self.items().get(index).cloned() else {
            return false;
        };

        self.cursor = index;
        self.input_mode = InputMode::Browsing;
        self.reveal_cursor();
        self.detail = Some(DetailOverlay::mount(index, movie, &self.scroll_latch));
        true
    }

    pub fn open_selected(&mut self) -> bool {
        self.open_detail(self.cursor)
    }

    /// Unmounts the overlay, releasing its scroll lock.
    pub fn close_detail(&mut self) -> bool {
        let closed = self.detail.take();
        if let Some(overlay) = &closed {
            tracing::debug!(index = overlay.index, "detail overlay closed");
        }
        closed.is_some()
    }

    /// Moves the grid cursor by whole tiles.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) -> bool {
        let count = self.items().len();
        if count == 0 {
            return false;
        }

        let columns = self.layout.columns as isize;
        let target = self.cursor as isize + dx + dy * columns;
        let target = target.clamp(0, count as isize - 1) as usize;
        if target == self.cursor {
            return false;
        }

        self.cursor = target;
        self.reveal_cursor();
        true
    }

    /// Scrolls the grid by `delta` rows.
    ///
    /// Suppressed while the overlay holds the scroll lock.
    pub fn scroll(&mut self, delta: isize) -> bool {
        if self.scroll_latch.is_locked() {
            tracing::trace!(delta, "scroll suppressed while overlay is open");
            return false;
        }

        let max_first = self.total_rows().saturating_sub(self.layout.visible_tile_rows);
        let target = (self.first_row as isize + delta).clamp(0, max_first as isize) as usize;
        if target == self.first_row {
            return false;
        }

        self.first_row = target;
        let first_visible = self.first_row * self.layout.columns;
        let last_visible = first_visible + self.layout.visible_tiles();
        if !(first_visible..last_visible).contains(&self.cursor) {
            self.cursor = first_visible.min(self.items().len().saturating_sub(1));
        }
        true
    }

    fn total_rows(&self) -> usize {
        self.items().len().div_ceil(self.layout.columns)
    }

    fn reveal_cursor(&mut self) {
        let row = self.cursor / self.layout.columns;
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + self.layout.visible_tile_rows {
            self.first_row = row + 1 - self.layout.visible_tile_rows;
        }
    }

    /// Resolves a 1-indexed screen position against the last rendered frame.
    #[must_use]
    pub fn click_target(&self, line: usize, col: usize) -> ClickTarget {
        if self.detail.is_some() {
            if self.layout.close_button().contains(line, col) {
                return ClickTarget::DetailClose;
            }
            if self.layout.modal().contains(line, col) {
                return ClickTarget::DetailContent;
            }
            return ClickTarget::Backdrop;
        }

        if (SEARCH_ROW..SEARCH_ROW + 3).contains(&line) {
            return ClickTarget::SearchBar;
        }

        if line == NOTIFICATION_ROW && self.notification.is_some() {
            return ClickTarget::Notification;
        }

        if line == self.layout.pagination_row {
            return self
                .compute_pagination()
                .and_then(|strip| {
                    strip
                        .labels
                        .iter()
                        .find(|label| label.contains(col))
                        .and_then(|label| label.target)
                })
                .map_or(ClickTarget::Nothing, ClickTarget::Page);
        }

        if matches!(self.body_kind(), BodyKind::Grid) {
            if let Some(index) =
                self.layout
                    .tile_at(line, col, self.first_row, self.items().len())
            {
                return ClickTarget::Tile(index);
            }
        }

        ClickTarget::Nothing
    }

    fn body_kind(&self) -> BodyKind {
        if self.config_error.is_some() || self.session.has_failed() {
            BodyKind::Error
        } else if self.session.query().is_empty() {
            BodyKind::Welcome
        } else {
            BodyKind::Grid
        }
    }

    /// Computes a renderable view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let body = match self.body_kind() {
            BodyKind::Error => Body::Error(self.compute_error()),
            BodyKind::Welcome => Body::Welcome(EmptyState {
                message: "Search for a movie".to_string(),
                subtitle: "Type a title and press Enter".to_string(),
            }),
            BodyKind::Grid => Body::Grid(self.compute_tiles()),
        };

        UIViewModel {
            layout: self.layout,
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.input.value().to_string(),
                placeholder: self.session.query().to_string(),
                active: self.input_mode == InputMode::Typing && self.config_error.is_none(),
            },
            loading: self.session.is_loading(),
            notification: self.notification.as_ref().map(|n| NotificationInfo {
                message: n.message.clone(),
                kind: n.kind,
            }),
            body,
            pagination: self.compute_pagination(),
            detail: self.detail.as_ref().map(|overlay| self.compute_detail(&overlay.movie)),
            footer: self.compute_footer(),
        }
    }

    fn compute_error(&self) -> EmptyState {
        self.config_error.as_ref().map_or_else(
            || EmptyState {
                message: "Something went wrong while loading movies".to_string(),
                subtitle: "Submit the search again to retry".to_string(),
            },
            |reason| EmptyState {
                message: "Zinema is not configured".to_string(),
                subtitle: reason.clone(),
            },
        )
    }

    fn compute_tiles(&self) -> Vec<TileItem> {
        const TITLE_WIDTH: usize = crate::ui::layout::TILE_WIDTH - 4;

        let matcher = SkimMatcherV2::default();
        let query = self.session.displayed_key().map_or("", |key| key.query.as_str());

        let start = self.first_row * self.layout.columns;
        let end = (start + self.layout.visible_tiles()).min(self.items().len());

        self.items()
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(slot, movie)| {
                let title = truncate(&movie.title, TITLE_WIDTH);
                let title_len = title.chars().count();
                let highlight_ranges = highlight_ranges(&movie.title, query, &matcher)
                    .into_iter()
                    .filter(|&(s, _)| s < title_len)
                    .map(|(s, e)| (s, e.min(title_len)))
                    .collect();

                let year = movie
                    .release_year()
                    .map_or_else(|| "----".to_string(), |y| y.to_string());

                TileItem {
                    slot,
                    title,
                    subtitle: format!("{year} · ★ {}", movie.rating_label()),
                    is_selected: start + slot == self.cursor,
                    highlight_ranges,
                }
            })
            .collect()
    }

    fn compute_header(&self) -> HeaderInfo {
        let summary = self.session.displayed_key().zip(self.session.displayed()).map(|(key, page)| {
            format!(
                "{} results · page {} of {}",
                page.total_results,
                key.page,
                self.session.page_count().max(1)
            )
        });

        HeaderInfo {
            title: " Zinema ".to_string(),
            summary,
        }
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        if !matches!(self.body_kind(), BodyKind::Grid) || !self.session.shows_current_query() {
            return None;
        }

        let page_count = self.session.page_count() as usize;
        if page_count <= 1 {
            return None;
        }

        let selected = (self.session.page() as usize).saturating_sub(1);
        Some(PaginationInfo {
            page_count,
            selected,
            labels: pagination_labels(page_count, selected, self.layout.cols),
        })
    }

    fn compute_detail(&self, movie: &Movie) -> DetailInfo {
        DetailInfo {
            title: movie.title.clone(),
            overview: if movie.overview.is_empty() {
                "No overview available.".to_string()
            } else {
                movie.overview.clone()
            },
            release_date: if movie.release_date.is_empty() {
                "Unknown".to_string()
            } else {
                movie.release_date.clone()
            },
            rating: movie.rating_label(),
            poster_url: movie.poster_url(&self.image_base_url, POSTER_SIZE),
            backdrop_url: movie.backdrop_url(&self.image_base_url),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.detail.is_some() {
            "Esc/q/x: close  click outside: close"
        } else if self.config_error.is_some() {
            "q: quit"
        } else {
            match self.input_mode {
                InputMode::Typing => "Enter: search  Esc/↓: browse results  Ctrl+c: quit",
                InputMode::Browsing => {
                    "←↓↑→/hjkl: move  Enter: details  [/]: page  /: search  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum BodyKind {
    Welcome,
    Grid,
    Error,
}

/// Shortens `text` to `width` characters, ending with `…` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    if query.is_empty() {
        return vec![];
    }

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
