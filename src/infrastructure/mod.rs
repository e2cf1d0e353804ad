//! Platform glue that is independent of Zellij APIs.
//!
//! - [`paths`]: sandbox-relative data and theme paths

pub mod paths;

pub use paths::{data_dir, expand_tilde, trace_file};
