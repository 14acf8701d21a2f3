// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - analyze: run an analysis against a URL and print (and optionally save)
//   the report
// - show: print a report that was saved earlier
//
// Tuning flags can also come from environment variables, so CI jobs can set
// them once instead of on every invocation.
// =============================================================================

use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use seo_probe::config::{AnalyzerConfig, DEFAULT_PROBE_CONCURRENCY, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "seo-probe",
    version,
    about = "Fetch a web page and report its basic SEO signals",
    long_about = "seo-probe fetches a single page, checks its title, meta description, image alt \
                  text, canonical tag and outbound links, and looks for sitemap.xml, robots.txt \
                  and HTTPS support on the site."
)]
pub struct Cli {
    /// Print progress logs at info level (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a web page
    ///
    /// Example: seo-probe analyze example.com --save report.json
    Analyze {
        /// Page URL; http:// is assumed when no scheme is given
        url: String,

        /// Output the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the report to this file as JSON
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print a previously saved report
    ///
    /// Example: seo-probe show report.json
    Show {
        /// Report file written by `analyze --save`
        report: PathBuf,

        /// Output the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct TuningArgs {
    /// Maximum number of link probes in flight at once
    #[arg(
        long,
        env = "SEO_PROBE_CONCURRENCY",
        default_value_t = DEFAULT_PROBE_CONCURRENCY,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub concurrency: usize,

    /// Timeout in seconds for page fetches
    #[arg(
        long,
        env = "SEO_PROBE_GET_TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub get_timeout: u64,

    /// Timeout in seconds for link probes and site resource checks
    #[arg(
        long,
        env = "SEO_PROBE_HEAD_TIMEOUT",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub head_timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "SEO_PROBE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl TuningArgs {
    pub fn to_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            get_timeout: Duration::from_secs(self.get_timeout),
            head_timeout: Duration::from_secs(self.head_timeout),
            resource_timeout: Duration::from_secs(self.head_timeout),
            user_agent: self.user_agent.clone(),
            ..AnalyzerConfig::default()
        }
        .with_probe_concurrency(self.concurrency)
    }
}
