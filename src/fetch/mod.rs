//! Metadata fetch layer.
//!
//! - [`key`]: `(query, page)` request keys and their context-map encoding
//! - [`client`]: request building, dispatch through a [`Transport`], and
//!   response decoding

pub mod client;
pub mod key;

pub use client::{FetchRequest, MovieClient, Transport, DEFAULT_SEARCH_URL};
pub use key::FetchKey;
