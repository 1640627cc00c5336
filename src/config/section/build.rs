//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! dist = "dist"
//! projects = "src/data/projects.json"
//! posts = "src/data/blog.json"
//! command = ["npm", "run", "build"]
//!
//! [build.sitemap]
//! enable = true
//!
//! [build.robots]
//! crawl-delay = 1
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigDiagnostics;
use crate::utils::path::expand_from_root;

/// Build settings: where the app bundle lands, where the content store
/// lives, and how the application build is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildSectionConfig {
    /// Output directory of the application build (snapshots land here too).
    pub dist: PathBuf,

    /// Path to the projects JSON document.
    pub projects: PathBuf,

    /// Path to the blog posts JSON document.
    pub posts: PathBuf,

    /// Application build command.
    pub command: Vec<String>,

    /// Sitemap emitter settings.
    pub sitemap: SitemapConfig,

    /// Robots emitter settings.
    pub robots: RobotsConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            dist: "dist".into(),
            projects: "src/data/projects.json".into(),
            posts: "src/data/blog.json".into(),
            command: vec!["npm".into(), "run".into(), "build".into()],
            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Normalize configured paths relative to the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.dist = expand_from_root(&self.dist, root);
        self.projects = expand_from_root(&self.projects, root);
        self.posts = expand_from_root(&self.posts, root);
        // Note: sitemap.path and robots.path are kept as relative filenames
        // and resolved against `dist` at write time.
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.command.is_empty() {
            diag.error_with_hint(
                "build.command",
                "application build command is empty",
                "set e.g. [\"npm\", \"run\", \"build\"]",
            );
        }
    }
}

/// Sitemap generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SitemapConfig {
    /// Enable sitemap generation
    pub enable: bool,
    /// Output filename, relative to `dist`
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

/// robots.txt generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RobotsConfig {
    /// Enable robots.txt generation
    pub enable: bool,
    /// Output filename, relative to `dist`
    pub path: PathBuf,
    /// Crawl-delay hint in seconds
    pub crawl_delay: u32,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "robots.txt".into(),
            crawl_delay: 1,
        }
    }
}
