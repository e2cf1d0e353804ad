//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point the plugin shim uses to change
//! state. It takes an [`Event`] already translated from host input, mutates
//! [`AppState`], and returns whether to re-render plus the [`Action`]s to run.
//!
//! # Overlay-first routing
//!
//! While the detail overlay is mounted it sees every input event before the
//! rest of the UI. `Escape`, `q`/`x` and clicks on `[x]` or outside the box
//! close it; any other input is consumed so the grid underneath does not move.
//! Host events (fetch completions, timers, permissions) are never consumed.
//!
//! # Example
//!
//! ```rust
//! use zinema::app::{handle_event, AppState, Event};
//! use zinema::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, Event::Char('a'))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), zinema::ZinemaError>(())
//! ```

use crate::app::state::ClickTarget;
use crate::app::{Action, AppState, InputMode};
use crate::domain::{FetchError, ResultPage, Result};
use crate::fetch::FetchKey;
use crate::ui::viewmodel::NotificationKind;

/// Events triggered by user input or by the host.
#[derive(Debug)]
pub enum Event {
    /// Appends a character to the search bar.
    Char(char),
    /// Removes the last character from the search bar.
    Backspace,
    /// Submits the search bar.
    Submit,
    /// Moves focus to the search bar.
    FocusSearch,
    /// Leaves the search bar, or hides the plugin when browsing.
    Escape,

    /// Moves the grid cursor by whole tiles.
    MoveCursor { dx: isize, dy: isize },
    /// Opens the overlay for the focused tile.
    OpenSelected,
    /// Closes the overlay, if mounted.
    CloseDetail,

    NextPage,
    PrevPage,
    /// Zero-based page strip entry.
    PageSelected(usize),

    ScrollUp(usize),
    ScrollDown(usize),
    /// Left click at a 1-indexed screen position.
    Click { line: usize, col: usize },

    /// The host delivered the response for a request tagged with `key`.
    FetchCompleted {
        key: FetchKey,
        outcome: std::result::Result<ResultPage, FetchError>,
    },

    /// A notification expiry timer fired.
    NotificationTimeout,
    DismissNotification,

    /// Answer to the web access permission request.
    PermissionsResult { granted: bool },

    /// Hides the plugin pane.
    CloseFocus,
}

impl Event {
    /// Short name used as the span field, without the payload.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Submit => "submit",
            Self::FocusSearch => "focus_search",
            Self::Escape => "escape",
            Self::MoveCursor { .. } => "move_cursor",
            Self::OpenSelected => "open_selected",
            Self::CloseDetail => "close_detail",
            Self::NextPage => "next_page",
            Self::PrevPage => "prev_page",
            Self::PageSelected(_) => "page_selected",
            Self::ScrollUp(_) => "scroll_up",
            Self::ScrollDown(_) => "scroll_down",
            Self::Click { .. } => "click",
            Self::FetchCompleted { .. } => "fetch_completed",
            Self::NotificationTimeout => "notification_timeout",
            Self::DismissNotification => "dismiss_notification",
            Self::PermissionsResult { .. } => "permissions_result",
            Self::CloseFocus => "close_focus",
        }
    }

    const fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::FetchCompleted { .. }
                | Self::NotificationTimeout
                | Self::PermissionsResult { .. }
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the frame changed and should be re-rendered.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the shim's error path in place
/// for transitions that may fail.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    if state.detail.is_some() && event.is_input() {
        return Ok(route_to_overlay(state, &event));
    }

    let outcome = match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.push(c);
            tracing::trace!(buffer = %state.input.value(), "search bar updated");
            (true, vec![])
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.pop();
            (true, vec![])
        }
        Event::Submit => (true, state.submit_search()),
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            (true, vec![])
        }
        Event::Escape => match state.input_mode {
            InputMode::Typing => {
                state.input_mode = InputMode::Browsing;
                (true, vec![])
            }
            InputMode::Browsing => (false, vec![Action::CloseFocus]),
        },
        Event::MoveCursor { dx, dy } => (state.move_cursor(dx, dy), vec![]),
        Event::OpenSelected => (state.open_selected(), vec![]),
        Event::CloseDetail => (false, vec![]),
        Event::NextPage => (true, state.next_page()),
        Event::PrevPage => (true, state.prev_page()),
        Event::PageSelected(index) => (true, state.select_page_index(index)),
        Event::ScrollUp(lines) => (state.scroll(-(lines as isize)), vec![]),
        Event::ScrollDown(lines) => (state.scroll(lines as isize), vec![]),
        Event::Click { line, col } => match state.click_target(line, col) {
            ClickTarget::Tile(index) => (state.open_detail(index), vec![]),
            ClickTarget::Page(index) => (true, state.select_page_index(index)),
            ClickTarget::SearchBar => {
                state.input_mode = InputMode::Typing;
                (true, vec![])
            }
            ClickTarget::Notification => (state.dismiss_notification(), vec![]),
            _ => (false, vec![]),
        },
        Event::FetchCompleted { key, outcome } => state.apply_fetch(&key, outcome),
        Event::NotificationTimeout => (state.expire_notification(), vec![]),
        Event::DismissNotification => (state.dismiss_notification(), vec![]),
        Event::PermissionsResult { granted } => {
            if granted {
                (false, vec![])
            } else {
                tracing::warn!("web access permission denied");
                let actions = state.notify(
                    NotificationKind::Error,
                    "Web access was denied, searches cannot reach TMDB",
                );
                (true, actions)
            }
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
    };

    Ok(outcome)
}

/// Handles an input event while the overlay is mounted.
fn route_to_overlay(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Escape | Event::CloseDetail | Event::CloseFocus => (state.close_detail(), vec![]),
        Event::Click { line, col } => match state.click_target(*line, *col) {
            ClickTarget::DetailClose | ClickTarget::Backdrop => (state.close_detail(), vec![]),
            _ => (false, vec![]),
        },
        _ => {
            tracing::trace!(event_type = event.name(), "input consumed by overlay");
            (false, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;
    use crate::ui::Theme;

    fn results(count: usize) -> ResultPage {
        ResultPage {
            page: 1,
            results: (0..count)
                .map(|i| Movie {
                    id: i as u64,
                    title: format!("Movie {i}"),
                    overview: "Plot.".into(),
                    release_date: "2001-01-01".into(),
                    vote_average: 6.0,
                    poster_path: None,
                    backdrop_path: None,
                })
                .collect(),
            total_pages: 3,
            total_results: 60,
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        for c in "movie".chars() {
            handle_event(&mut state, Event::Char(c)).unwrap();
        }
        handle_event(&mut state, Event::Submit).unwrap();
        handle_event(
            &mut state,
            Event::FetchCompleted {
                key: FetchKey::new("movie", 1),
                outcome: Ok(results(6)),
            },
        )
        .unwrap();
        state
    }

    #[test]
    fn overlay_consumes_navigation_keys() {
        let mut state = loaded_state();
        handle_event(&mut state, Event::OpenSelected).unwrap();

        let (render, actions) = handle_event(&mut state, Event::NextPage).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.session.page(), 1);

        let (render, _) = handle_event(&mut state, Event::MoveCursor { dx: 1, dy: 0 }).unwrap();
        assert!(!render);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn escape_closes_overlay_before_hiding_plugin() {
        let mut state = loaded_state();
        handle_event(&mut state, Event::OpenSelected).unwrap();

        let (render, actions) = handle_event(&mut state, Event::Escape).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.detail.is_none());

        let (_, actions) = handle_event(&mut state, Event::Escape).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn quit_key_closes_overlay_first() {
        let mut state = loaded_state();
        handle_event(&mut state, Event::OpenSelected).unwrap();
        let (_, actions) = handle_event(&mut state, Event::CloseFocus).unwrap();
        assert!(actions.is_empty());
        assert!(state.detail.is_none());
    }

    #[test]
    fn clicks_inside_overlay_are_consumed() {
        let mut state = loaded_state();
        handle_event(&mut state, Event::OpenSelected).unwrap();
        let modal = state.layout.modal();

        let inside = Event::Click {
            line: modal.row + 2,
            col: modal.col + 2,
        };
        assert!(!handle_event(&mut state, inside).unwrap().0);
        assert!(state.detail.is_some());

        let close = state.layout.close_button();
        let on_close = Event::Click {
            line: close.row,
            col: close.col + 1,
        };
        handle_event(&mut state, on_close).unwrap();
        assert!(state.detail.is_none());
    }

    #[test]
    fn backdrop_click_closes_overlay() {
        let mut state = loaded_state();
        handle_event(&mut state, Event::OpenSelected).unwrap();
        handle_event(&mut state, Event::Click { line: 1, col: 1 }).unwrap();
        assert!(state.detail.is_none());
        assert!(!state.scroll_latch.is_locked());
    }

    #[test]
    fn fetch_completion_reaches_state_behind_overlay() {
        let mut state = loaded_state();
        handle_event(&mut state, Event::NextPage).unwrap();
        handle_event(&mut state, Event::OpenSelected).unwrap();

        let (render, _) = handle_event(
            &mut state,
            Event::FetchCompleted {
                key: FetchKey::new("movie", 2),
                outcome: Ok(results(4)),
            },
        )
        .unwrap();
        assert!(render);
        assert!(state.detail.is_none(), "replaced page closes the overlay");
        assert_eq!(state.items().len(), 4);
    }

    #[test]
    fn clicking_a_tile_opens_it() {
        let mut state = loaded_state();
        let tile = state.layout.tile_rect(1);
        handle_event(
            &mut state,
            Event::Click {
                line: tile.row,
                col: tile.col,
            },
        )
        .unwrap();
        assert_eq!(state.detail.as_ref().map(|d| d.index), Some(1));
    }

    #[test]
    fn denied_permission_raises_error_notification() {
        let mut state = AppState::new(Theme::default());
        let (render, actions) =
            handle_event(&mut state, Event::PermissionsResult { granted: false }).unwrap();
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::ScheduleTimeout(_)]));
        assert_eq!(
            state.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }
}
