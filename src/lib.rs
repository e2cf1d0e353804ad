//! Zinema: a Zellij plugin for searching movies on TMDB.
//!
//! Type a title, press `Enter`, and the plugin queries the TMDB movie search
//! endpoint through the host's web request facility. One page of results is
//! shown as a grid of tiles with a page strip underneath; selecting a tile
//! opens a detail overlay with the overview, release date, rating and image
//! links.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls only
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event routing, overlay first                     │
//! │  - Query / page / fetch-key bookkeeping             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐         ┌───────────────────────┐
//! │ UI Layer (ui/)        │         │ Fetch Layer (fetch/)  │
//! │ - Layout, hit-testing │         │ - Request building    │
//! │ - Components, themes  │         │ - Response decoding   │
//! └───────────────────────┘         └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Infrastructure · Observability  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zinema.wasm" {
//!         api_token "eyJhbGciOi..."
//!         theme "catppuccin-mocha"
//!         toast_seconds "4"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request lifecycle
//!
//! 1. `Enter` in the search bar becomes [`Event::Submit`].
//! 2. [`handle_event`] resets the page to 1 and returns
//!    [`Action::Fetch`] with the `(query, page)` key.
//! 3. The shim hands the key to [`MovieClient::fetch`], which issues one
//!    web request whose context map carries the key.
//! 4. The host answers with `WebRequestResult`; the shim decodes the body and
//!    feeds [`Event::FetchCompleted`] back in. Responses whose key is no
//!    longer current are dropped.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use zinema::{handle_event, initialize, Action, Config, Event};
//!
//! let mut options = BTreeMap::new();
//! options.insert("api_token".to_string(), "secret".to_string());
//!
//! let (mut state, client) = initialize(&Config::from_zellij(&options));
//! assert!(client.is_some());
//!
//! for c in "heat".chars() {
//!     handle_event(&mut state, Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), zinema::ZinemaError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{FetchError, Movie, Result, ResultPage, ZinemaError};
pub use fetch::{FetchKey, MovieClient};
pub use ui::Theme;

use app::state::{DEFAULT_IMAGE_BASE_URL, DEFAULT_TOAST_SECONDS};
use fetch::DEFAULT_SEARCH_URL;
use std::collections::BTreeMap;

/// Token compiled in from the environment, used when the layout sets none.
const BUILD_TIME_TOKEN: Option<&str> = option_env!("ZINEMA_TMDB_TOKEN");

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/zinema.wasm" {
///     api_token "..."
///     api_url "https://api.themoviedb.org/3/search/movie"
///     image_base_url "https://image.tmdb.org/t/p"
///     toast_seconds "4"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Clone)]
pub struct Config {
    /// TMDB v4 read access token, sent as a bearer token.
    pub api_token: Option<String>,

    /// Search endpoint. Default: [`DEFAULT_SEARCH_URL`].
    pub api_url: String,

    /// Image CDN prefix for poster and backdrop links.
    pub image_base_url: String,

    /// Seconds a notification stays visible. Default: 4.
    pub toast_seconds: f64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` refers to the host home.
    pub theme_file: Option<String>,

    /// Tracing filter, e.g. `info` or `zinema=debug`.
    pub trace_level: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("image_base_url", &self.image_base_url)
            .field("toast_seconds", &self.toast_seconds)
            .field("theme_name", &self.theme_name)
            .field("theme_file", &self.theme_file)
            .field("trace_level", &self.trace_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: BUILD_TIME_TOKEN.map(String::from),
            api_url: DEFAULT_SEARCH_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            toast_seconds: DEFAULT_TOAST_SECONDS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. `toast_seconds` falls back to the default
    /// when it is not a positive number.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zinema::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_token".to_string(), "secret".to_string());
    /// map.insert("toast_seconds".to_string(), "2.5".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_token.as_deref(), Some("secret"));
    /// assert_eq!(config.toast_seconds, 2.5);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let toast_seconds = get("toast_seconds")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(defaults.toast_seconds);

        Self {
            api_token: get("api_token").or(defaults.api_token),
            api_url: get("api_url").unwrap_or(defaults.api_url),
            image_base_url: get("image_base_url").unwrap_or(defaults.image_base_url),
            toast_seconds,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Builds the search client.
    ///
    /// # Errors
    ///
    /// Returns [`ZinemaError::Config`] if no token is configured or the
    /// endpoint does not parse.
    pub fn client(&self) -> Result<MovieClient> {
        let token = self
            .api_token
            .as_deref()
            .ok_or_else(|| ZinemaError::Config("api_token is not set".to_string()))?;
        MovieClient::new(&self.api_url, token)
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(path) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(path)) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default");
                }
            }
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Initializes the plugin with configuration.
///
/// Returns the application state and, when the configuration allows it, the
/// search client. Without a client the state renders a configuration screen
/// and never emits [`Action::Fetch`].
#[must_use]
pub fn initialize(config: &Config) -> (AppState, Option<MovieClient>) {
    tracing::debug!(config = ?config, "initializing zinema plugin");

    let theme = config.theme();
    match config.client() {
        Ok(client) => {
            let mut state = AppState::new(theme);
            state.image_base_url.clone_from(&config.image_base_url);
            state.toast_seconds = config.toast_seconds;
            (state, Some(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "plugin is not configured");
            (AppState::misconfigured(theme, e.to_string()), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_zellij(&options(&[
            ("api_url", "  "),
            ("toast_seconds", "-1"),
            ("theme", ""),
        ]));
        assert_eq!(config.api_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.toast_seconds, DEFAULT_TOAST_SECONDS);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn missing_token_yields_config_screen() {
        let config = Config {
            api_token: None,
            ..Config::default()
        };
        let (state, client) = initialize(&config);
        assert!(client.is_none());
        assert!(state.config_error.as_deref().unwrap().contains("api_token"));
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let config = Config::from_zellij(&options(&[("api_token", "t"), ("api_url", "not a url")]));
        assert!(matches!(config.client(), Err(ZinemaError::Config(_))));
    }

    #[test]
    fn configured_state_carries_image_base_and_toast_lifetime() {
        let config = Config::from_zellij(&options(&[
            ("api_token", "t"),
            ("image_base_url", "https://cdn.example/t/p"),
            ("toast_seconds", "7"),
        ]));
        let (state, client) = initialize(&config);
        assert!(client.is_some());
        assert_eq!(state.image_base_url, "https://cdn.example/t/p");
        assert_eq!(state.toast_seconds, 7.0);
    }

    #[test]
    fn debug_output_hides_token() {
        let config = Config::from_zellij(&options(&[("api_token", "very-secret")]));
        assert!(!format!("{config:?}").contains("very-secret"));
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let config = Config::from_zellij(&options(&[("theme", "no-such-theme")]));
        assert_eq!(config.theme().name, Theme::default().name);
    }

    mod flow {
        use super::*;
        use crate::fetch::FetchRequest;
        use crate::ui::Body;

        /// Drives the library the way the plugin shim does, with requests
        /// recorded instead of sent.
        struct Harness {
            state: AppState,
            client: MovieClient,
            sent: Vec<FetchRequest>,
            timers: usize,
        }

        impl Harness {
            fn new() -> Self {
                let config = Config::from_zellij(&options(&[("api_token", "token")]));
                let (state, client) = initialize(&config);
                Self {
                    state,
                    client: client.unwrap(),
                    sent: Vec::new(),
                    timers: 0,
                }
            }

            fn send(&mut self, event: Event) -> bool {
                let (render, actions) = handle_event(&mut self.state, event).unwrap();
                for action in actions {
                    match action {
                        Action::Fetch(key) => {
                            self.client.fetch(&mut self.sent, &key.query, key.page);
                        }
                        Action::ScheduleTimeout(_) => self.timers += 1,
                        Action::CloseFocus => {}
                    }
                }
                render
            }

            fn search(&mut self, query: &str) {
                self.send(Event::FocusSearch);
                while !self.state.input.value().is_empty() {
                    self.send(Event::Backspace);
                }
                for c in query.chars() {
                    self.send(Event::Char(c));
                }
                self.send(Event::Submit);
            }

            fn respond(&mut self, request: &FetchRequest, status: u16, body: &str) -> bool {
                let key = FetchKey::from_context(&request.context).unwrap();
                let outcome = MovieClient::decode(status, body.as_bytes());
                self.send(Event::FetchCompleted { key, outcome })
            }

            fn titles(&self) -> Vec<&str> {
                self.state.items().iter().map(|m| m.title.as_str()).collect()
            }
        }

        fn body(page: u32, titles: &[&str], total_pages: u32) -> String {
            let results: Vec<String> = titles
                .iter()
                .enumerate()
                .map(|(i, title)| format!(r#"{{"id":{i},"title":"{title}","overview":"Plot of {title}."}}"#))
                .collect();
            format!(
                r#"{{"page":{page},"results":[{}],"total_pages":{total_pages},"total_results":{}}}"#,
                results.join(","),
                u64::from(total_pages) * 20
            )
        }

        #[test]
        fn submit_fetches_page_one_and_shows_results() {
            let mut h = Harness::new();
            h.search("alien");

            assert_eq!(h.sent.len(), 1);
            assert!(h.sent[0].url.ends_with("?query=alien&page=1"));
            assert!(h.state.session.is_loading());

            let request = h.sent[0].clone();
            assert!(h.respond(&request, 200, &body(1, &["Alien", "Aliens"], 3)));
            assert_eq!(h.titles(), vec!["Alien", "Aliens"]);
            assert!(!h.state.session.is_loading());

            let vm = h.state.compute_viewmodel();
            assert!(matches!(vm.body, Body::Grid(ref tiles) if tiles.len() == 2));
            let pagination = vm.pagination.unwrap();
            assert_eq!(pagination.page_count, 3);
            assert_eq!(pagination.selected, 0);
        }

        #[test]
        fn new_query_starts_from_page_one() {
            let mut h = Harness::new();
            h.search("batman");
            let request = h.sent[0].clone();
            h.respond(&request, 200, &body(1, &["Batman"], 5));

            h.send(Event::PageSelected(2));
            let request = h.sent[1].clone();
            h.respond(&request, 200, &body(3, &["Batman Returns"], 5));
            assert_eq!(h.state.session.page(), 3);

            h.search("superman");
            assert_eq!(h.state.session.page(), 1);
            assert!(h.sent[2].url.ends_with("?query=superman&page=1"));
        }

        #[test]
        fn superseded_response_is_dropped() {
            let mut h = Harness::new();
            h.search("alien");
            h.search("heat");
            assert_eq!(h.sent.len(), 2);

            let first = h.sent[0].clone();
            let second = h.sent[1].clone();

            assert!(h.respond(&second, 200, &body(1, &["Heat"], 1)));
            assert!(!h.respond(&first, 200, &body(1, &["Alien"], 1)));
            assert_eq!(h.titles(), vec!["Heat"]);
        }

        #[test]
        fn empty_result_notifies_once_and_expires() {
            let mut h = Harness::new();
            h.search("zzzzqx");
            let request = h.sent[0].clone();
            h.respond(&request, 200, &body(1, &[], 0));

            assert_eq!(h.timers, 1);
            assert_eq!(
                h.state.notification.as_ref().map(|n| n.message.as_str()),
                Some(app::state::NO_RESULTS_MESSAGE)
            );

            // Same key again is answered from what is on screen.
            h.search("zzzzqx");
            assert_eq!(h.sent.len(), 1);
            assert_eq!(h.timers, 1);

            assert!(h.send(Event::NotificationTimeout));
            assert!(h.state.notification.is_none());
        }

        #[test]
        fn failure_keeps_previous_results_and_can_be_retried() {
            let mut h = Harness::new();
            h.search("heat");
            let request = h.sent[0].clone();
            h.respond(&request, 200, &body(1, &["Heat"], 2));

            h.send(Event::NextPage);
            let failed = h.sent[1].clone();
            assert!(failed.url.ends_with("page=2"));
            h.respond(&failed, 500, "oops");

            assert_eq!(h.titles(), vec!["Heat"]);
            assert!(h.state.session.has_failed());
            assert!(matches!(h.state.compute_viewmodel().body, Body::Error(_)));

            h.send(Event::PrevPage);
            h.send(Event::NextPage);
            assert_eq!(h.sent.len(), 3);
            let retry = h.sent[2].clone();
            h.respond(&retry, 200, &body(2, &["Heat 2"], 2));
            assert_eq!(h.titles(), vec!["Heat 2"]);
            assert!(!h.state.session.has_failed());
        }

        #[test]
        fn page_strip_selection_fetches_that_page() {
            let mut h = Harness::new();
            h.search("star");
            let request = h.sent[0].clone();
            h.respond(&request, 200, &body(1, &["Star Wars"], 4));

            h.send(Event::PageSelected(3));
            assert_eq!(h.state.session.page(), 4);
            assert!(h.sent[1].url.ends_with("page=4"));
        }

        #[test]
        fn overlay_locks_scrolling_until_closed() {
            let mut h = Harness::new();
            h.search("alien");
            let request = h.sent[0].clone();
            h.respond(&request, 200, &body(1, &["Alien", "Aliens"], 1));

            h.send(Event::MoveCursor { dx: 1, dy: 0 });
            assert!(h.send(Event::OpenSelected));
            assert!(h.state.scroll_latch.is_locked());

            let vm = h.state.compute_viewmodel();
            assert_eq!(vm.detail.map(|d| d.title), Some("Aliens".to_string()));

            assert!(!h.send(Event::ScrollDown(3)));
            assert!(h.send(Event::Escape));
            assert!(h.state.detail.is_none());
            assert!(!h.state.scroll_latch.is_locked());
        }

        #[test]
        fn misconfigured_plugin_never_fetches() {
            let (mut state, client) = initialize(&Config {
                api_token: None,
                ..Config::default()
            });
            assert!(client.is_none());

            handle_event(&mut state, Event::FocusSearch).unwrap();
            handle_event(&mut state, Event::Char('x')).unwrap();
            let (_, actions) = handle_event(&mut state, Event::Submit).unwrap();
            assert!(actions.is_empty());
        }
    }
}
