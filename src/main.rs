//! Presite - static pre-rendering pipeline for client-rendered portfolio sites.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod core;
mod generator;
mod logger;
mod pipeline;
mod render;
mod route;
mod seo;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::run_build(&config),
        Commands::Snapshot { preview_url, .. } => {
            cli::snapshot::run_snapshot(&config, preview_url.as_deref())
        }
        Commands::Sitemap { .. } => cli::sitemap::run_sitemap(&config),
        Commands::Routes { json } => cli::routes::run_routes(&config, *json),
    }
}
