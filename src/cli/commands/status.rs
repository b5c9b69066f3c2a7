//! Status command implementation

use super::shared::{print_health_report, setup_logging};
use crate::cli::args::{OutputFormat, StatusArgs, apply_base_url};
use crate::client::WeatherClient;
use crate::{Error, Result};
use colored::Colorize;
use tracing::debug;

/// Status command runner
///
/// Pings both endpoint families and prints the health report.
pub async fn run_status(args: StatusArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Status arguments: {:?}", args);

    let config = apply_base_url(args.common.load_config()?, args.base_url.as_deref())?;
    let client = WeatherClient::new(&config.client.base_url)?;

    let ready = client.ping_collect().await?;
    let report = client.ping_query().await?;

    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::invalid_payload("Failed to encode health report", e))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!(
                "{} {} ({})",
                "Server".bright_green().bold(),
                client.base_url().bright_white().bold(),
                ready.bright_cyan()
            );
            print_health_report(&report);
        }
    }

    Ok(())
}
