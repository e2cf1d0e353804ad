//! Query, page and fetch bookkeeping.
//!
//! [`SearchSession`] is the part of the orchestrator that decides *whether* to
//! fetch. It owns the submitted query and page number, remembers the last page
//! that loaded successfully, and tracks the key currently in flight. All
//! changes go through three transitions: [`submit_query`], [`set_page`]
//! and [`complete`].
//!
//! A response is only applied if its key still equals the current
//! `(query, page)`. Anything else is a superseded request and is dropped.
//!
//! [`submit_query`]: SearchSession::submit_query
//! [`set_page`]: SearchSession::set_page
//! [`complete`]: SearchSession::complete

use crate::domain::{FetchError, ResultPage};
use crate::fetch::FetchKey;

/// Highest page number the TMDB search endpoint accepts.
pub const MAX_PAGE: u32 = 500;

/// What a completed fetch did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The page replaced the displayed one.
    Applied {
        /// The page carried no movies.
        empty: bool,
    },

    /// The request for the current key failed.
    Failed,

    /// The response belonged to a superseded key and was dropped.
    Stale,
}

/// Query, page number and fetch state for one plugin instance.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    page: u32,
    displayed: Option<(FetchKey, ResultPage)>,
    pending: Option<FetchKey>,
    failed: Option<FetchKey>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            displayed: None,
            pending: None,
            failed: None,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The key the session wants displayed, or `None` before the first search.
    #[must_use]
    pub fn current_key(&self) -> Option<FetchKey> {
        if self.query.is_empty() {
            None
        } else {
            Some(FetchKey::new(self.query.clone(), self.page))
        }
    }

    /// The most recent successful page, kept on screen while a newer key loads.
    #[must_use]
    pub fn displayed(&self) -> Option<&ResultPage> {
        self.displayed.as_ref().map(|(_, page)| page)
    }

    /// Key of the displayed page.
    #[must_use]
    pub fn displayed_key(&self) -> Option<&FetchKey> {
        self.displayed.as_ref().map(|(key, _)| key)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed.is_some()
    }

    /// Whether the displayed page belongs to the submitted query.
    ///
    /// `false` while a new query loads over the previous query's results.
    #[must_use]
    pub fn shows_current_query(&self) -> bool {
        self.displayed_key()
            .is_some_and(|key| key.query == self.query)
    }

    /// Number of pages of the displayed result, capped at [`MAX_PAGE`].
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.displayed()
            .map_or(0, |page| page.total_pages.min(MAX_PAGE))
    }

    /// Replaces the query and resets the page to 1.
    ///
    /// Returns the key to fetch, or `None` if that exact key is already on
    /// screen or already in flight.
    pub fn submit_query(&mut self, query: String) -> Option<FetchKey> {
        tracing::debug!(query = %query, previous_page = self.page, "query submitted");
        self.query = query;
        self.page = 1;
        self.request_current()
    }

    /// Moves to `page`, clamped to the pages of the displayed result.
    ///
    /// Returns the key to fetch, or `None` if there is no query, the page did
    /// not change, or the key needs no request. Until a page of the current
    /// query has loaded its page range is unknown and the page stays at 1.
    pub fn set_page(&mut self, page: u32) -> Option<FetchKey> {
        if self.query.is_empty() {
            return None;
        }
        if !self.shows_current_query() {
            tracing::debug!(query = %self.query, requested = page, "page range unknown, staying on page 1");
            return None;
        }

        let clamped = page.clamp(1, self.page_count().max(1));
        if clamped == self.page {
            return None;
        }

        tracing::debug!(from = self.page, to = clamped, "page changed");
        self.page = clamped;
        self.request_current()
    }

    fn request_current(&mut self) -> Option<FetchKey> {
        let key = self.current_key()?;

        if self.displayed_key() == Some(&key) {
            tracing::debug!(key = %key, "key already displayed, no request");
            self.pending = None;
            self.failed = None;
            return None;
        }

        if self.pending.as_ref() == Some(&key) {
            tracing::debug!(key = %key, "key already in flight, no request");
            return None;
        }

        self.pending = Some(key.clone());
        Some(key)
    }

    /// Applies the outcome of the request issued for `key`.
    pub fn complete(
        &mut self,
        key: &FetchKey,
        outcome: Result<ResultPage, FetchError>,
    ) -> Completion {
        if self.current_key().as_ref() != Some(key) {
            tracing::debug!(
                key = %key,
                current = ?self.current_key(),
                "dropping response for superseded key"
            );
            return Completion::Stale;
        }

        if self.pending.as_ref() == Some(key) {
            self.pending = None;
        } else if self.displayed_key() == Some(key) {
            tracing::debug!(key = %key, "dropping duplicate response for displayed key");
            return Completion::Stale;
        }

        match outcome {
            Ok(page) => {
                let empty = page.is_empty();
                tracing::debug!(key = %key, results = page.results.len(), "page applied");
                self.displayed = Some((key.clone(), page));
                self.failed = None;
                Completion::Applied { empty }
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "search request failed");
                self.failed = Some(key.clone());
                Completion::Failed
            }
        }
    }
}
