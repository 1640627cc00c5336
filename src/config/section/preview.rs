//! `[preview]` section configuration.
//!
//! Settings for the preview-server subprocess the pipeline boots between the
//! application build and the snapshot phase.
//!
//! # Example
//!
//! ```toml
//! [preview]
//! command = ["npm", "run", "preview"]
//! port = 4173                 # Assumed port until the server reports its own
//! ready-timeout = 30          # Seconds to wait for the readiness line
//! settle-delay = 2000         # Milliseconds to wait after readiness
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ConfigDiagnostics;

/// Preview server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PreviewConfig {
    /// Preview server command.
    pub command: Vec<String>,

    /// Default port, overridden by the port parsed from server output.
    pub port: u16,

    /// Seconds to wait for the server to signal readiness before failing.
    pub ready_timeout: u64,

    /// Milliseconds to wait after readiness, absorbing residual startup latency.
    pub settle_delay: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            command: vec!["npm".into(), "run".into(), "preview".into()],
            port: 4173,
            ready_timeout: 30,
            settle_delay: 2000,
        }
    }
}

impl PreviewConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.command.is_empty() {
            diag.error_with_hint(
                "preview.command",
                "preview server command is empty",
                "set e.g. [\"npm\", \"run\", \"preview\"]",
            );
        }
        if self.ready_timeout == 0 {
            diag.error(
                "preview.ready-timeout",
                "readiness timeout must be at least 1 second",
            );
        }
    }

    /// URL the preview server is assumed to listen on before detection.
    pub fn default_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay)
    }
}
