//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Presite static pre-rendering CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: presite.toml)
    #[arg(short = 'C', long, default_value = "presite.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the full pipeline: app build, snapshots, sitemap, robots
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Snapshot routes against an already-running preview server
    #[command(visible_alias = "s")]
    Snapshot {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Base URL of the running preview server
        /// (default: http://localhost:<preview.port>)
        #[arg(short, long, value_hint = clap::ValueHint::Url)]
        preview_url: Option<String>,
    },

    /// Generate sitemap.xml and robots.txt only
    #[command(visible_alias = "m")]
    Sitemap {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the enumerated route set
    #[command(visible_alias = "r")]
    Routes {
        /// Output routes as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Shared arguments for the generating commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Override site URL for deployment.
    ///
    /// Useful for CI/CD deployments where the production URL differs from
    /// the one committed in presite.toml.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Enable robots.txt generation
    #[arg(short = 'R', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub robots: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
