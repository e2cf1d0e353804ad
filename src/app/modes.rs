//! Input mode state for the application.
//!
//! The plugin is either collecting text for the search bar or browsing the
//! result grid. The detail overlay is not a mode: while it is mounted it takes
//! every key first, regardless of the mode underneath.

/// Current input handling mode.
///
/// Controls how key presses are interpreted and which footer hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Characters go into the search bar; `Enter` submits.
    Typing,

    /// Keys move the grid cursor, change pages and open the detail overlay.
    Browsing,
}
