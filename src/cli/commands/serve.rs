//! Serve command implementation
//!
//! Builds the weather store from configuration and runs the HTTP server
//! until Ctrl-C or `GET /collect/exit`.

use super::shared::setup_logging;
use crate::app::services::airport_registry::parse_airport_feed;
use crate::app::services::weather_store::WeatherStore;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::{Result, server};
use colored::Colorize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Serve command runner
pub async fn run_serve(args: ServeArgs, shutdown: CancellationToken) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Serve arguments: {:?}", args);

    let config = args.apply_overrides(args.common.load_config()?)?;
    let store = Arc::new(build_store(&config)?);

    if !args.common.quiet {
        println!(
            "{} on {} with {} airports",
            "Airport weather server".bright_green().bold(),
            format!("http://{}", config.server.bind_address).bright_white().bold(),
            store.airport_count().to_string().bright_white().bold()
        );
    }

    server::serve(config.server.bind_address, store, shutdown).await
}

/// Build a store from the store section of the configuration
///
/// Seeds the starter airports when enabled, then preloads the airport feed
/// if one is configured. Feed airports whose codes are already registered
/// are skipped.
pub fn build_store(config: &Config) -> Result<WeatherStore> {
    let store = WeatherStore::new().with_freshness_window(config.store.freshness_window());

    if config.store.seed_starter_airports {
        store.seed_starter_airports()?;
    }

    if let Some(feed) = &config.store.airport_feed {
        let (airports, mut stats) = parse_airport_feed(feed)?;
        stats.airports_loaded = store.insert_airports(airports);
        info!("{}", stats.summary());
        if stats.has_errors() {
            warn!(
                "{} rows skipped while loading {}",
                stats.rows_skipped,
                feed.display()
            );
        }
    }

    Ok(store)
}
