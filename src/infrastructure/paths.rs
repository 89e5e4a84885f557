//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! typically resolves to the directory Zellij was started from.

use std::path::PathBuf;

/// Returns the data directory used for the span log.
///
/// Resolves to `/host/.local/share/zellij/marquee`, usually
/// `~/.local/share/zellij/marquee` on the host.
///
/// # Examples
///
/// ```
/// use marquee::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/marquee"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("marquee")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// Used for `theme_file`, which users naturally write relative to their home.
///
/// # Examples
///
/// ```
/// use marquee::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
