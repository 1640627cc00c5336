//! robots.txt generation.
//!
//! Static allow-all policy plus the sitemap reference and a crawl-delay
//! hint. Pure function of the config; independent of the snapshot phase.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::fs;

/// Build robots.txt if enabled. Returns whether a file was written.
pub fn build_robots(config: &SiteConfig) -> Result<bool> {
    if !config.build.robots.enable {
        return Ok(false);
    }

    let robots_path = config.dist_join(&config.build.robots.path);
    let content = render_robots(config);

    fs::write(&robots_path, content)
        .with_context(|| format!("Failed to write robots.txt to {}", robots_path.display()))?;

    log!("robots"; "{}", robots_path.file_name().unwrap_or_default().to_string_lossy());
    Ok(true)
}

fn render_robots(config: &SiteConfig) -> String {
    let base_url = config.site.info.base_url();
    let sitemap_name = config.build.sitemap.path.display();
    let crawl_delay = config.build.robots.crawl_delay;

    format!(
        "User-agent: *\n\
         Allow: /\n\
         \n\
         # Sitemap\n\
         Sitemap: {base_url}/{sitemap_name}\n\
         \n\
         # Crawl-delay\n\
         Crawl-delay: {crawl_delay}\n"
    )
}
