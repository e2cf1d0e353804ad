//! Error types for the Zinema plugin.
//!
//! [`ZinemaError`] covers everything that can fail while the plugin runs, and
//! [`FetchError`] narrows that down to a single outbound search request. The
//! orchestrator treats every `FetchError` the same way (a generic error
//! banner), so the split only matters for logging.

use thiserror::Error;

/// Failure of one outbound search request.
///
/// The host reports transport failures (DNS, TLS, connection refused) as a
/// non-success status, so there is no separate network variant.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-2xx status.
    #[error("service returned status {status}")]
    Service {
        /// HTTP status reported by the host.
        status: u16,
    },

    /// The response body was not a valid search page.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The main error type for Zinema plugin operations.
///
/// # Examples
///
/// ```
/// use zinema::ZinemaError;
///
/// fn require_token(token: &str) -> Result<(), ZinemaError> {
///     if token.is_empty() {
///         return Err(ZinemaError::Config("api_token is not set".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(require_token("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZinemaError {
    /// Configuration is invalid or missing.
    ///
    /// Raised once at plugin load. A plugin in this state renders a
    /// configuration screen and never issues requests.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A search request failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Zinema operations.
pub type Result<T> = std::result::Result<T, ZinemaError>;
