//! `[render]` section configuration.
//!
//! Headless-browser settings for the snapshot phase.
//!
//! # Example
//!
//! ```toml
//! [render]
//! navigation-timeout = 30     # Seconds for page navigation
//! content-timeout = 10        # Seconds for the content selector to appear
//! selectors = "main, article, .container"
//! sandbox = false             # Chrome sandbox (disable in containers/CI)
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Headless browser settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Seconds to wait for navigation to complete.
    pub navigation_timeout: u64,

    /// Seconds to wait for a content-bearing element to appear.
    pub content_timeout: u64,

    /// CSS selector list that marks the page as content-bearing.
    pub selectors: String,

    /// Run Chrome with its sandbox enabled.
    pub sandbox: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            navigation_timeout: 30,
            content_timeout: 10,
            selectors: "main, article, .container".into(),
            sandbox: false,
        }
    }
}

impl RenderConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout)
    }
}
