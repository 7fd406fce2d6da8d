//! Where the client goes once processing completes.

/// Moves the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Only logs the target URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, url: &str) {
        tracing::info!(url = %url, "Processing complete, dashboard available");
    }
}

/// Opens the target URL in the system browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        match webbrowser::open(url) {
            Ok(()) => tracing::info!(url = %url, "Opened dashboard in browser"),
            Err(e) => tracing::error!(url = %url, error = %e, "Failed to open browser"),
        }
    }
}
