//! Page snapshotting via headless Chrome.
//!
//! One `Browser` instance serves the whole build; each route gets its own
//! tab, which is closed on every exit path so failed routes never leak tabs.

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;

use crate::config::RenderConfig;
use crate::debug;
use crate::route::Route;

/// Headless browser wrapper for the snapshot phase.
pub struct Snapshotter {
    browser: Browser,
    navigation_timeout: Duration,
    content_timeout: Duration,
    selectors: String,
}

impl Snapshotter {
    /// Launch the browser. A launch failure is fatal for the build, unlike
    /// per-route snapshot failures.
    pub fn launch(render: &RenderConfig) -> Result<Self> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            sandbox: render.sandbox,
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .context("Failed to launch headless Chrome")?;

        Ok(Self {
            browser,
            navigation_timeout: render.navigation_timeout(),
            content_timeout: render.content_timeout(),
            selectors: render.selectors.clone(),
        })
    }

    /// Render one route and return the fully serialized document.
    ///
    /// Navigates, waits for client-side rendering to settle (navigation
    /// complete + a content-bearing element present), then serializes the
    /// DOM state - not the initial server-delivered markup.
    pub fn snapshot(&self, base_url: &str, route: &Route) -> Result<String> {
        let tab = self
            .browser
            .new_tab()
            .context("Failed to open a browser tab")?;

        let result = self.capture(&tab, base_url, route);

        // Release the tab on every exit path, timeouts included
        if let Err(e) = tab.close(true) {
            debug!("render"; "failed to close tab for {}: {}", route.path(), e);
        }

        result
    }

    fn capture(&self, tab: &Arc<Tab>, base_url: &str, route: &Route) -> Result<String> {
        let url = page_url(base_url, route);

        tab.set_default_timeout(self.navigation_timeout);
        tab.navigate_to(&url)
            .with_context(|| format!("Navigation to {url} failed"))?
            .wait_until_navigated()
            .with_context(|| format!("Navigation to {url} timed out"))?;

        tab.wait_for_element_with_custom_timeout(&self.selectors, self.content_timeout)
            .with_context(|| format!("No content element matched `{}`", self.selectors))?;

        tab.get_content().context("Failed to serialize document")
    }
}

/// Absolute URL for a route on the preview server.
fn page_url(base_url: &str, route: &Route) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), route.encoded_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url("http://localhost:4173", &Route::project("demo")),
            "http://localhost:4173/projects/demo"
        );
        // Trailing slash on the base does not double up
        assert_eq!(
            page_url("http://localhost:4173/", &Route::home()),
            "http://localhost:4173/"
        );
    }

    #[test]
    fn test_page_url_encodes_segments() {
        assert_eq!(
            page_url("http://localhost:5000", &Route::post("a b")),
            "http://localhost:5000/blog/a%20b"
        );
    }
}
