//! `presite build` - the full pipeline.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::log;
use crate::pipeline::{BuildReport, Pipeline};

/// Run the full pipeline and report the outcome.
///
/// Per-route failures do not abort the pipeline, but they do make the exit
/// status nonzero so CI can tell a partial build from a full success.
pub fn run_build(config: &SiteConfig) -> Result<()> {
    let report = Pipeline::run(config)?;
    finish(&report)
}

/// Print the final summary; error (nonzero exit) unless fully successful.
pub fn finish(report: &BuildReport) -> Result<()> {
    if report.is_success() {
        log!("build"; "✓ {}", report.summary());
        Ok(())
    } else {
        bail!("{}", report.summary());
    }
}
