//! `presite sitemap` - emit sitemap.xml and robots.txt without snapshots.
//!
//! Both emitters are pure functions of the content store, so they can run
//! standalone; the dist directory must already exist.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::generator;
use crate::log;

pub fn run_sitemap(config: &SiteConfig) -> Result<()> {
    let store = ContentStore::load(config)?;

    let sitemap = generator::sitemap::build_sitemap(config, &store)?;
    let robots = generator::robots::build_robots(config)?;

    if !sitemap && !robots {
        log!("sitemap"; "nothing to do (both emitters disabled)");
    }
    Ok(())
}
