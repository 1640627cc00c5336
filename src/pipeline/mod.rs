//! Build orchestration.
//!
//! The pipeline is an explicit state machine:
//!
//! ```text
//! Building -> ServerStarting -> Snapshotting -> SitemapGenerating
//!          -> RobotsGenerating -> ServerStopping -> Done
//! ```
//!
//! One transition function per state, consumed by a flat driver loop. A
//! failing state sends the build to `Failed`: teardown still runs and the
//! error propagates as a nonzero exit. Per-route snapshot failures are NOT
//! state failures - they are recorded in the [`BuildReport`] and the
//! pipeline keeps going, so sitemap/robots generation and teardown always
//! get their turn.

pub mod server;

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::core::is_shutdown;
use crate::generator;
use crate::logger::ProgressLine;
use crate::render::{Snapshotter, rewrite};
use crate::route::{self, Route};
use crate::seo;
use crate::utils::exec::{Cmd, SILENT_FILTER};
use crate::{debug, log};

use server::PreviewServer;

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Building,
    ServerStarting,
    Snapshotting,
    SitemapGenerating,
    RobotsGenerating,
    ServerStopping,
    Done,
}

impl Phase {
    /// Successor state; `None` once the pipeline is done.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Building => Some(Self::ServerStarting),
            Self::ServerStarting => Some(Self::Snapshotting),
            Self::Snapshotting => Some(Self::SitemapGenerating),
            Self::SitemapGenerating => Some(Self::RobotsGenerating),
            Self::RobotsGenerating => Some(Self::ServerStopping),
            Self::ServerStopping => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Building => "build",
            Self::ServerStarting => "server start",
            Self::Snapshotting => "snapshot",
            Self::SitemapGenerating => "sitemap",
            Self::RobotsGenerating => "robots",
            Self::ServerStopping => "server stop",
            Self::Done => "done",
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages_written: usize,
    /// Route paths whose snapshot failed (skipped, no output file).
    pub failed_routes: Vec<String>,
    pub sitemap_written: bool,
    pub robots_written: bool,
}

impl BuildReport {
    /// Full success: every attempted route produced a page.
    pub fn is_success(&self) -> bool {
        self.failed_routes.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_success() {
            format!("generated {} page(s)", self.pages_written)
        } else {
            format!(
                "generated {} page(s), {} route(s) failed: {}",
                self.pages_written,
                self.failed_routes.len(),
                self.failed_routes.join(", ")
            )
        }
    }
}

/// One build: content store, routes, and the singleton preview server.
pub struct Pipeline<'a> {
    config: &'a SiteConfig,
    store: ContentStore,
    routes: Vec<Route>,
    server: Option<PreviewServer>,
    report: BuildReport,
}

impl<'a> Pipeline<'a> {
    fn new(config: &'a SiteConfig) -> Result<Self> {
        let store = ContentStore::load(config)?;
        let routes = route::enumerate(&store);
        Ok(Self {
            config,
            store,
            routes,
            server: None,
            report: BuildReport::default(),
        })
    }

    /// Run the full pipeline. Only one build runs at a time.
    pub fn run(config: &'a SiteConfig) -> Result<BuildReport> {
        let mut pipeline = Self::new(config)?;
        let mut phase = Phase::Building;

        loop {
            if is_shutdown() {
                pipeline.teardown();
                bail!("build interrupted");
            }

            debug!("build"; "entering {} phase", phase.as_str());
            if let Err(e) = pipeline.step(phase) {
                // Failed state: cleanup runs on every exit path
                pipeline.teardown();
                return Err(e.context(format!("build failed during {}", phase.as_str())));
            }

            match phase.next() {
                Some(next) => phase = next,
                None => break,
            }
        }

        Ok(pipeline.report)
    }

    /// Snapshot-only run against an already-running preview server.
    pub fn snapshot_against(config: &'a SiteConfig, base_url: &str) -> Result<BuildReport> {
        let mut pipeline = Self::new(config)?;
        pipeline.snapshot_routes_at(base_url.trim_end_matches('/'))?;
        Ok(pipeline.report)
    }

    /// Transition function: execute one state.
    fn step(&mut self, phase: Phase) -> Result<()> {
        match phase {
            Phase::Building => self.build_app(),
            Phase::ServerStarting => {
                self.server = Some(PreviewServer::start(self.config)?);
                Ok(())
            }
            Phase::Snapshotting => self.snapshot_routes(),
            Phase::SitemapGenerating => {
                self.report.sitemap_written =
                    generator::sitemap::build_sitemap(self.config, &self.store)?;
                Ok(())
            }
            Phase::RobotsGenerating => {
                self.report.robots_written = generator::robots::build_robots(self.config)?;
                Ok(())
            }
            Phase::ServerStopping => self.stop_server(),
            Phase::Done => Ok(()),
        }
    }

    /// Run the application build subprocess; nonzero exit fails the build
    /// with the child's exit code surfaced.
    fn build_app(&self) -> Result<()> {
        let command = &self.config.build.command;
        let program = command.first().map(String::as_str).unwrap_or_default();
        which::which(program)
            .with_context(|| format!("build command `{program}` not found in PATH"))?;

        log!("build"; "building application");
        Cmd::from_slice(command)
            .cwd(self.config.get_root())
            .pty(true)
            .filter(&SILENT_FILTER)
            .run()
            .context("application build failed")?;
        log!("build"; "application build complete");
        Ok(())
    }

    /// Snapshot every route sequentially against the running server.
    fn snapshot_routes(&mut self) -> Result<()> {
        let base_url = self
            .server
            .as_ref()
            .map(|server| server.url().to_string())
            .unwrap_or_else(|| self.config.preview.default_url());
        self.snapshot_routes_at(&base_url)
    }

    /// Snapshot every route, one page at a time, continuing past per-route
    /// failures. Browser launch failure is fatal; everything after it is
    /// contained to the failing route.
    fn snapshot_routes_at(&mut self, base_url: &str) -> Result<()> {
        let snapshotter = Snapshotter::launch(&self.config.render)?;
        log!("render"; "pre-rendering {} route(s) from {}", self.routes.len(), base_url);

        let progress = ProgressLine::new(&[("pages", self.routes.len())]);
        for route in &self.routes {
            if is_shutdown() {
                drop(progress);
                bail!("snapshot phase interrupted");
            }

            match render_route(self.config, &snapshotter, &self.store, route, base_url) {
                Ok(output) => {
                    self.report.pages_written += 1;
                    debug!("render"; "{} -> {}", route.path(), output.display());
                }
                Err(e) => {
                    // Per-route failure: log with the route path, skip, continue
                    log!("error"; "{}: {:#}", route.path(), e);
                    self.report.failed_routes.push(route.path().to_string());
                }
            }
            progress.inc("pages");
        }
        progress.finish();

        Ok(())
    }

    /// Stop the preview server through its handle.
    fn stop_server(&mut self) -> Result<()> {
        if let Some(server) = self.server.take() {
            log!("preview"; "stopping preview server");
            server.stop()?;
        }
        Ok(())
    }

    /// Best-effort cleanup for the Failed path.
    fn teardown(&mut self) {
        if let Some(server) = self.server.take()
            && let Err(e) = server.stop()
        {
            log!("error"; "failed to stop preview server: {:#}", e);
        }
    }
}

/// Snapshot one route, merge its metadata, and write the output file.
fn render_route(
    config: &SiteConfig,
    snapshotter: &Snapshotter,
    store: &ContentStore,
    route: &Route,
    base_url: &str,
) -> Result<PathBuf> {
    let html = snapshotter.snapshot(base_url, route)?;

    let entity = store.entity_for(route);
    let meta = seo::synthesize(&config.site, store, route, entity);
    let html = rewrite(&html, &meta);

    let path = config.dist_join(route.output_file());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        let mut phases = vec![Phase::Building];
        while let Some(next) = phases.last().unwrap().next() {
            phases.push(next);
        }
        assert_eq!(
            phases,
            vec![
                Phase::Building,
                Phase::ServerStarting,
                Phase::Snapshotting,
                Phase::SitemapGenerating,
                Phase::RobotsGenerating,
                Phase::ServerStopping,
                Phase::Done,
            ]
        );
    }

    #[test]
    fn test_done_is_terminal() {
        assert!(Phase::Done.next().is_none());
    }

    #[test]
    fn test_report_success_summary() {
        let report = BuildReport {
            pages_written: 4,
            ..Default::default()
        };
        assert!(report.is_success());
        assert_eq!(report.summary(), "generated 4 page(s)");
    }

    #[test]
    fn test_report_failure_summary_distinguishable() {
        let report = BuildReport {
            pages_written: 3,
            failed_routes: vec!["/blog/hello".into()],
            ..Default::default()
        };
        assert!(!report.is_success());
        let summary = report.summary();
        assert!(summary.contains("1 route(s) failed"));
        assert!(summary.contains("/blog/hello"));
    }
}
