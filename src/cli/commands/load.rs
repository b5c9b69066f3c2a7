//! Load command implementation
//!
//! Parses an airport feed and registers each airport with a running server
//! over HTTP, with bounded concurrency and a progress bar.

use super::shared::{create_progress_bar, setup_logging};
use crate::app::models::Airport;
use crate::app::services::airport_registry::parse_airport_feed;
use crate::cli::args::LoadArgs;
use crate::client::WeatherClient;
use crate::{Error, Result};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of uploading a batch of airports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSummary {
    /// Airports the server registered
    pub uploaded: usize,
    /// Airports the server already had
    pub already_registered: usize,
    /// Uploads that failed, with the reason
    pub failed: Vec<String>,
    /// Uploads not attempted because of cancellation
    pub cancelled: usize,
}

impl UploadSummary {
    /// Fails with `Error::Interrupted` if cancellation left airports unsent
    pub fn ensure_complete(&self) -> Result<()> {
        if self.cancelled > 0 {
            return Err(Error::interrupted(format!(
                "upload stopped with {} airports remaining",
                self.cancelled
            )));
        }
        Ok(())
    }
}

/// Load command runner
pub async fn run_load(args: LoadArgs, cancel: CancellationToken) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Load arguments: {:?}", args);

    args.validate()?;
    let config = args.apply_overrides(args.common.load_config()?)?;

    let (airports, mut stats) = parse_airport_feed(&args.feed)?;
    info!(
        "Uploading {} airports to {}",
        airports.len(),
        config.client.base_url
    );

    let client = WeatherClient::new(&config.client.base_url)?;
    let pb = if args.common.show_progress() {
        create_progress_bar(airports.len() as u64, "Uploading airports")
    } else {
        ProgressBar::hidden()
    };

    let summary = upload_airports(
        &client,
        airports,
        config.client.upload_concurrency,
        &pb,
        &cancel,
    )
    .await;
    pb.finish_and_clear();

    stats.airports_loaded = summary.uploaded;
    stats.load_duration = start_time.elapsed();
    info!("{}", stats.summary());

    if !args.common.quiet {
        println!("\n{}", "Airport Feed Upload".bright_green().bold());
        println!(
            "  Uploaded:           {}",
            summary.uploaded.to_string().bright_white().bold()
        );
        println!("  Already registered: {}", summary.already_registered);
        println!("  Rows skipped:       {}", stats.rows_skipped);
        if !summary.failed.is_empty() {
            println!(
                "  Failed:             {}",
                summary.failed.len().to_string().bright_red().bold()
            );
        }
        println!("  Elapsed:            {:.2}s", stats.load_duration.as_secs_f64());
    }

    summary.ensure_complete()
}

/// Register `airports` with the server, at most `concurrency` at a time
pub async fn upload_airports(
    client: &WeatherClient,
    airports: Vec<Airport>,
    concurrency: usize,
    pb: &ProgressBar,
    cancel: &CancellationToken,
) -> UploadSummary {
    enum Upload {
        Added,
        Duplicate,
        Failed(String),
        Skipped,
    }

    stream::iter(airports)
        .map(|airport| async move {
            if cancel.is_cancelled() {
                return Upload::Skipped;
            }

            let result = client
                .add_airport(airport.code(), airport.latitude(), airport.longitude())
                .await;
            pb.inc(1);

            match result {
                Ok(added) => {
                    debug!("Registered {}", added);
                    Upload::Added
                }
                Err(Error::DuplicateAirport { code }) => {
                    warn!("Airport {} is already registered", code);
                    Upload::Duplicate
                }
                Err(e) => {
                    error!("Failed to register {}: {:#}", airport.code(), e);
                    Upload::Failed(format!("{}: {}", airport.code(), e))
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .fold(UploadSummary::default(), |mut summary, upload| async move {
            match upload {
                Upload::Added => summary.uploaded += 1,
                Upload::Duplicate => summary.already_registered += 1,
                Upload::Failed(reason) => summary.failed.push(reason),
                Upload::Skipped => summary.cancelled += 1,
            }
            summary
        })
        .await
}
