//! Domain layer for the Zinema plugin.
//!
//! Holds the movie result model and the error types, independent of Zellij
//! APIs and of how results are fetched or drawn.
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Search result records as returned by TMDB

pub mod error;
pub mod movie;

pub use error::{FetchError, Result, ZinemaError};
pub use movie::{Movie, ResultPage};
