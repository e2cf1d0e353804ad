//! Detail overlay and its scoped side effects.
//!
//! Mounting the overlay acquires a [`ScrollLock`] from the application's
//! [`ScrollLatch`]. The lock lives inside the [`DetailOverlay`] value, so
//! dropping the overlay releases it no matter which path unmounted it: the
//! close control, a backdrop click, `Escape`, a new query or a replaced page.
//!
//! Key capture works the same way. While `AppState::detail` is `Some`, the
//! handler routes input to the overlay first; once the value is gone there is
//! nothing left to route to.

use crate::domain::Movie;
use std::cell::Cell;
use std::rc::Rc;

/// Shared counter of outstanding scroll locks.
///
/// The plugin runs on a single thread, so `Rc<Cell<_>>` is enough.
#[derive(Debug, Clone, Default)]
pub struct ScrollLatch {
    holders: Rc<Cell<u32>>,
}

impl ScrollLatch {
    /// Acquires a lock that suppresses background scrolling until dropped.
    #[must_use]
    pub fn acquire(&self) -> ScrollLock {
        self.holders.set(self.holders.get() + 1);
        ScrollLock {
            holders: Rc::clone(&self.holders),
        }
    }

    /// Returns `true` while any lock is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }
}

/// Guard keeping the background from scrolling.
#[derive(Debug)]
pub struct ScrollLock {
    holders: Rc<Cell<u32>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
        tracing::trace!(holders = self.holders.get(), "scroll lock released");
    }
}

/// The mounted detail view for one selected movie.
#[derive(Debug)]
pub struct DetailOverlay {
    /// Position of the movie within the displayed page.
    pub index: usize,

    /// Snapshot of the selected movie.
    pub movie: Movie,

    _scroll: ScrollLock,
}

impl DetailOverlay {
    /// Mounts the overlay, acquiring a scroll lock from `latch`.
    #[must_use]
    pub fn mount(index: usize, movie: Movie, latch: &ScrollLatch) -> Self {
        tracing::debug!(index, movie_id = movie.id, title = %movie.title, "detail overlay mounted");
        Self {
            index,
            movie,
            _scroll: latch.acquire(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            id: 7,
            title: "Alien".into(),
            overview: String::new(),
            release_date: "1979-05-25".into(),
            vote_average: 8.1,
            poster_path: None,
            backdrop_path: None,
        }
    }

    #[test]
    fn dropping_overlay_releases_scroll_lock() {
        let latch = ScrollLatch::default();
        let overlay = DetailOverlay::mount(0, movie(), &latch);
        assert!(latch.is_locked());

        drop(overlay);
        assert!(!latch.is_locked());
    }

    #[test]
    fn replacing_overlay_keeps_single_lock() {
        let latch = ScrollLatch::default();
        let mut slot = Some(DetailOverlay::mount(0, movie(), &latch));
        let previous = slot.replace(DetailOverlay::mount(1, movie(), &latch));
        drop(previous);
        assert!(latch.is_locked());

        slot.take();
        assert!(!latch.is_locked());
    }
}
