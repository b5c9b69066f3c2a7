//! Shared components for CLI commands
//!
//! This module contains logging setup, progress bars and report printing
//! used across multiple CLI command implementations.

use crate::app::services::health::HealthReport;
use crate::cli::args::CommonArgs;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Set up structured logging for a command
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airport_weather={}", log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a health report in human-readable form
pub fn print_health_report(report: &HealthReport) {
    println!("\n{}", "Weather Service Health".bright_green().bold());
    println!(
        "  Fresh records:     {}",
        report.fresh_record_count.to_string().bright_white().bold()
    );

    println!("  Query share per airport:");
    for (code, fraction) in &report.per_airport_query_fraction {
        let value = format!("{:.3}", fraction);
        let value = if *fraction > 0.0 {
            value.bright_yellow().bold()
        } else {
            value.dimmed()
        };
        println!("    {}  {}", code.bright_white(), value);
    }

    let classes: Vec<String> = report
        .radius_histogram
        .iter()
        .take(10)
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(bucket, count)| format!("{}:{}", bucket, count))
        .collect();
    let classes = if classes.is_empty() {
        "none".dimmed().to_string()
    } else {
        classes.join(" ")
    };
    println!(
        "  Radius classes:    {} (histogram length {})",
        classes,
        report.radius_histogram.len()
    );
}
