//! Browser auto-open.

use std::process::Command;

/// Open `url` in the default browser, best-effort.
///
/// Failure is logged and otherwise ignored; the server keeps running.
pub fn open(url: &str) {
    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", url]).spawn();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = Command::new("xdg-open").arg(url).spawn();

    match result {
        Ok(_) => tracing::debug!(url = %url, "Opened browser"),
        Err(err) => tracing::warn!(url = %url, error = %err, "Failed to open browser"),
    }
}
