//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Zinema library and
//! the Zellij plugin system. Every host call lives here; the library only sees
//! its own [`Event`]s and answers with [`Action`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState` and client
//! 2. **Permissions**: Request `WebAccess` for the TMDB search endpoint
//! 3. **Subscribe**: Key, Mouse, `WebRequestResult`, Timer, permission results
//! 4. **Update**: Translate host events, delegate to `handle_event`, run actions
//! 5. **Render**: Record the pane size and call the library renderer
//!
//! # Event Mapping
//!
//! - `Key(..)` → typing or browsing events depending on [`InputMode`]
//! - `Mouse(LeftClick)` → `Event::Click` (converted to 1-indexed)
//! - `Mouse(ScrollUp/ScrollDown)` → `Event::ScrollUp/ScrollDown`
//! - `WebRequestResult` → `Event::FetchCompleted` keyed by the request context
//! - `Timer` → `Event::NotificationTimeout`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+c`: Close plugin (closes the overlay first if open)
//!
//! While typing in the search bar:
//! - Characters: Type
//! - `Enter`: Search
//! - `Esc`/`Down`: Browse results
//!
//! While browsing:
//! - Arrows, `h`/`j`/`k`/`l`: Move between tiles
//! - `Enter`: Open details
//! - `x`: Close details
//! - `]`/`PageDown`, `[`/`PageUp`: Next/previous page
//! - `/` or `i`: Back to the search bar
//! - `d`: Dismiss notification
//! - `q`/`Esc`: Close details, or close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zinema::app::AppState;
use zinema::fetch::{FetchRequest, Transport};
use zinema::{handle_event, Action, Config, Event, FetchKey, InputMode, MovieClient};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the search client, which only exists
/// when the configuration carries a token.
struct State {
    /// Core application state from library layer.
    app: AppState,

    client: Option<MovieClient>,
}

impl Default for State {
    fn default() -> Self {
        let (app, client) = zinema::initialize(&Config::default());
        Self { app, client }
    }
}

/// Sends requests through the host's web request facility.
struct ZellijTransport;

impl Transport for ZellijTransport {
    fn send(&mut self, request: FetchRequest) {
        web_request(
            request.url,
            HttpVerb::Get,
            request.headers,
            Vec::new(),
            request.context,
        );
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests `WebAccess`, needed for every search.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        let tracing_ready = zinema::observability::init_tracing(config.trace_level.as_deref());

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(tracing_ready, "plugin loading started");
        let (app, client) = zinema::initialize(&config);
        self.app = app;
        self.client = client;
        tracing::debug!(configured = self.client.is_some(), "app state initialized");

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::NotificationTimeout,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                tracing::debug!(granted, "permission request answered");
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        zinema::ui::render(&self.app);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.bare_key == BareKey::Char('c') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CloseFocus);
        }

        match self.app.input_mode {
            InputMode::Typing => Self::map_typing_key(key),
            InputMode::Browsing => Self::map_browsing_key(key),
        }
    }

    fn map_typing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc | BareKey::Down => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c)
                if !key.key_modifiers.contains(&KeyModifier::Ctrl)
                    && !key.key_modifiers.contains(&KeyModifier::Alt) =>
            {
                Event::Char(c)
            }
            _ => return None,
        })
    }

    fn map_browsing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Left | BareKey::Char('h') => Event::MoveCursor { dx: -1, dy: 0 },
            BareKey::Right | BareKey::Char('l') => Event::MoveCursor { dx: 1, dy: 0 },
            BareKey::Up | BareKey::Char('k') => Event::MoveCursor { dx: 0, dy: -1 },
            BareKey::Down | BareKey::Char('j') => Event::MoveCursor { dx: 0, dy: 1 },
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char('x') => Event::CloseDetail,
            BareKey::Char(']') | BareKey::PageDown => Event::NextPage,
            BareKey::Char('[') | BareKey::PageUp => Event::PrevPage,
            BareKey::Char('/' | 'i') => Event::FocusSearch,
            BareKey::Char('d') => Event::DismissNotification,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    /// Maps mouse events. The host reports 0-based positions.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let line = usize::try_from(line).ok()?;
                Some(Event::Click {
                    line: line + 1,
                    col: col + 1,
                })
            }
            Mouse::ScrollUp(lines) => Some(Event::ScrollUp(lines)),
            Mouse::ScrollDown(lines) => Some(Event::ScrollDown(lines)),
            _ => None,
        }
    }

    /// Maps a web request result to a fetch completion.
    ///
    /// Results without a fetch key in their context were not issued by the
    /// search client and are ignored.
    fn map_web_result_event(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(key) = FetchKey::from_context(context) else {
            tracing::debug!(status, "ignoring web request result without fetch key");
            return None;
        };

        let outcome = MovieClient::decode(status, body);
        match &outcome {
            Ok(page) => tracing::debug!(key = %key, results = page.results.len(), "search response decoded"),
            Err(e) => tracing::warn!(key = %key, error = %e, "search request failed"),
        }

        Some(Event::FetchCompleted { key, outcome })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(key) => match &self.client {
                Some(client) => {
                    client.fetch(&mut ZellijTransport, &key.query, key.page);
                }
                None => tracing::warn!(key = %key, "fetch requested without a configured client"),
            },
            Action::ScheduleTimeout(secs) => {
                tracing::trace!(secs, "scheduling timeout");
                set_timeout(secs);
            }
        }
    }
}
