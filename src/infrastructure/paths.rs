//! Host paths as seen from inside the Zellij sandbox.
//!
//! Zellij mounts the host's home directory at `/host`, so every path the
//! plugin touches on disk is rebased under it.

use std::path::PathBuf;

/// Name of the trace file inside [`data_dir`].
pub const TRACE_FILE_NAME: &str = "zinema-otlp.json";

/// Plugin data directory, e.g. for trace output.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zinema")
}

#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join(TRACE_FILE_NAME)
}

/// Rebases a `~`-relative path onto the sandbox's `/host` mount.
///
/// ```rust
/// use zinema::infrastructure::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/zinema.toml"), "/etc/zinema.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
