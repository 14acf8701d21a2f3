// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so JSON on stdout stays clean)
// 3. Run the analysis, or load a saved report
// 4. Print the report as a table or JSON
// 5. Exit with a proper code (0 = clean, 1 = broken links, 2 = error)
//
// Ctrl-C cancels a running analysis instead of killing the process mid-way.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, TuningArgs};
use std::io::Write;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use seo_probe::{AnalyzeError, Analyzer, Report};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.default_log_level());

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = report printed, no broken links
//   Ok(1) = report printed, broken links found
//   Err   = the page could not be analyzed or a file could not be read/written
async fn run(cli: Cli) -> Result<i32> {
    let report = match cli.command {
        Commands::Analyze {
            url,
            json,
            save,
            tuning,
        } => {
            let report = handle_analyze(&url, &tuning).await?;
            if let Some(path) = save {
                save_report(&report, &path)?;
            }
            print_report(&report, json)?;
            report
        }
        Commands::Show { report, json } => {
            let report = Report::load(&report)
                .with_context(|| format!("could not read report {}", report.display()))?;
            print_report(&report, json)?;
            report
        }
    };

    Ok(if report.broken_links > 0 { 1 } else { 0 })
}

async fn handle_analyze(url: &str, tuning: &TuningArgs) -> Result<Report> {
    let analyzer = Analyzer::with_http(tuning.to_config())?;
    let cancel = CancellationToken::new();

    // Ctrl-C stops new probes from being issued; in-flight ones finish
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling...");
            ctrl_c_cancel.cancel();
        }
    });

    eprintln!("🔍 Analyzing: {}", url);
    let result = analyzer.analyze(url, &cancel, &draw_progress).await;
    eprintln!();

    match result {
        Ok(report) => Ok(report),
        Err(AnalyzeError::Cancelled) => anyhow::bail!("analysis cancelled"),
        Err(AnalyzeError::Fetch(e)) => {
            let page = e.url().to_string();
            Err(anyhow::Error::new(e).context(format!("could not load {}", page)))
        }
        Err(e) => Err(e.into()),
    }
}

// A 20-character progress bar redrawn in place on stderr
fn draw_progress(pct: u8) {
    let filled = usize::from(pct.min(100)) / 5;
    let mut stderr = std::io::stderr();
    let _ = write!(
        stderr,
        "\r[{}{}] {:>3}%",
        "#".repeat(filled),
        " ".repeat(20 - filled),
        pct
    );
    let _ = stderr.flush();
}

fn save_report(report: &Report, path: &Path) -> Result<()> {
    report
        .save(path)
        .with_context(|| format!("could not save report to {}", path.display()))?;
    eprintln!("💾 Report saved to {}", path.display());
    Ok(())
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &Report) {
    let yes_no = |found: bool| if found { "✅ yes" } else { "❌ no" };

    println!("{:<22} {}", "Title:", report.title);
    println!("{:<22} {}", "Meta Description:", report.meta_description);
    println!("{:<22} {:.3} seconds", "Load Time:", report.load_time_seconds);
    println!("{:<22} {}", "Images without Alt:", report.images_without_alt);
    println!("{:<22} {}", "Broken Links:", report.broken_links);
    println!("{:<22} {}", "Canonical URL:", report.canonical_url);
    println!("{:<22} {}", "sitemap.xml:", yes_no(report.sitemap_found));
    println!("{:<22} {}", "robots.txt:", yes_no(report.robots_found));
    println!("{:<22} {}", "SSL/TLS:", yes_no(report.tls_configured));

    if !report.headers.is_empty() {
        println!();
        println!("HTTP Headers:");
        println!("{}", "=".repeat(60));
        for (name, value) in &report.headers {
            println!("   {}: {}", name, value);
        }
    }
}
