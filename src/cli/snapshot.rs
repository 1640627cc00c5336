//! `presite snapshot` - pre-render against an already-running server.
//!
//! Skips the app build and server lifecycle phases; useful when iterating
//! on metadata with a long-lived `npm run preview` in another terminal.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::pipeline::Pipeline;

pub fn run_snapshot(config: &SiteConfig, preview_url: Option<&str>) -> Result<()> {
    let base_url = preview_url
        .map(ToString::to_string)
        .unwrap_or_else(|| config.preview.default_url());

    let report = Pipeline::snapshot_against(config, &base_url)?;
    super::build::finish(&report)
}
