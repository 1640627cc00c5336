//! Preview server lifecycle.
//!
//! The preview server is an external subprocess (`npm run preview` by
//! default) whose stdout announces the address it actually bound. This
//! module spawns it, watches its output for the readiness line, and hands
//! back an explicit `PreviewServer` handle - starting and stopping both go
//! through the handle, never through ambient global state.

use anyhow::{Context, Result, bail};
use crossbeam::channel::{Receiver, RecvTimeoutError};
use regex::Regex;
use std::io::{BufRead, BufReader, Read};
use std::process::Child;
use std::sync::OnceLock;
use std::thread;

use crate::config::SiteConfig;
use crate::utils::exec::{Cmd, strip_ansi};
use crate::{debug, log};

/// Handle to the running preview server subprocess.
///
/// Stopping is explicit via [`stop`](Self::stop); `Drop` is a kill backstop
/// for error paths that never reach it.
#[derive(Debug)]
pub struct PreviewServer {
    child: Child,
    url: String,
    port: u16,
    stopped: bool,
}

impl PreviewServer {
    /// Spawn the preview server and wait for it to signal readiness.
    ///
    /// The port parsed from the readiness line overrides the configured
    /// default for all subsequent requests. If no readiness line arrives
    /// within `preview.ready-timeout`, the child is killed and an error is
    /// returned - startup never hangs indefinitely.
    pub fn start(config: &SiteConfig) -> Result<Self> {
        let command = &config.preview.command;
        let program = command.first().map(String::as_str).unwrap_or_default();
        which::which(program)
            .with_context(|| format!("preview server command `{program}` not found in PATH"))?;

        log!("preview"; "starting preview server");
        let mut child = Cmd::from_slice(command)
            .cwd(config.get_root())
            .spawn_piped()
            .context("Failed to spawn preview server")?;

        let stdout = child
            .stdout
            .take()
            .context("preview server has no stdout pipe")?;
        let stderr = child
            .stderr
            .take()
            .context("preview server has no stderr pipe")?;

        let (tx, rx) = crossbeam::channel::bounded(1);
        thread::spawn(move || watch_stdout(stdout, &tx));
        thread::spawn(move || drain_stderr(stderr));

        let port = match Self::await_readiness(&rx, config) {
            Ok(port) => port,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };

        if port != config.preview.port {
            log!("preview"; "server reported port {} (configured {})", port, config.preview.port);
        }

        // Fixed grace delay after readiness, absorbing residual startup latency
        thread::sleep(config.preview.settle_delay());

        let url = format!("http://localhost:{port}");
        log!("preview"; "ready at {}", url);

        Ok(Self {
            child,
            url,
            port,
            stopped: false,
        })
    }

    /// Block until the watcher thread reports readiness, within the bound.
    fn await_readiness(rx: &Receiver<Option<u16>>, config: &SiteConfig) -> Result<u16> {
        match rx.recv_timeout(config.preview.ready_timeout()) {
            Ok(detected) => Ok(detected.unwrap_or(config.preview.port)),
            Err(RecvTimeoutError::Timeout) => bail!(
                "preview server did not signal readiness within {}s",
                config.preview.ready_timeout
            ),
            Err(RecvTimeoutError::Disconnected) => {
                bail!("preview server exited before signalling readiness")
            }
        }
    }

    /// Base URL the server is listening on.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the server: kill the subprocess and reap it.
    pub fn stop(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;

        // kill() on an already-exited child is fine; wait() reaps either way
        let _ = self.child.kill();
        self.child
            .wait()
            .context("Failed to reap preview server process")?;
        Ok(())
    }
}

impl Drop for PreviewServer {
    fn drop(&mut self) {
        if !self.stopped {
            let _ = self.shutdown();
        }
    }
}

/// Read stdout lines, forward them to the debug log, and signal the first
/// readiness line (with the parsed port, when present).
fn watch_stdout(stdout: impl Read, tx: &crossbeam::channel::Sender<Option<u16>>) {
    let reader = BufReader::new(stdout);
    let mut signalled = false;

    for line in reader.lines() {
        let Ok(line) = line else { break };
        let plain = strip_ansi(&line);
        let trimmed = plain.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!("preview"; "{}", trimmed);

        if !signalled && is_ready_line(trimmed) {
            signalled = true;
            let _ = tx.send(detect_port(trimmed));
            // Keep draining so the server never blocks on a full pipe
        }
    }
}

/// Surface server stderr through the logger.
fn drain_stderr(stderr: impl Read) {
    let reader = BufReader::new(stderr);
    for line in reader.lines() {
        let Ok(line) = line else { break };
        let plain = strip_ansi(&line);
        let trimmed = plain.trim();
        if !trimmed.is_empty() {
            log!("preview"; "{}", trimmed);
        }
    }
}

/// A line counts as the readiness signal once it mentions a local address.
fn is_ready_line(line: &str) -> bool {
    line.contains("Local:") || line.contains("localhost") || line.contains("127.0.0.1")
}

/// Extract the listening port from a readiness line.
fn detect_port(line: &str) -> Option<u16> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"https?://(?:localhost|127\.0\.0\.1):(\d+)").unwrap()
    });
    re.captures(line)?.get(1)?.as_str().parse().ok()
}
