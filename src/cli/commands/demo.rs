//! Demo command implementation
//!
//! Replays the reference client session: ping, populate Boston wind, query
//! each starter airport, check health, delete an unknown airport, check
//! health again and stop the server.

use super::shared::setup_logging;
use crate::app::models::{DataPoint, DataPointType};
use crate::cli::args::{DemoArgs, apply_base_url};
use crate::client::WeatherClient;
use crate::constants::STARTER_AIRPORTS;
use crate::{Error, Result};
use colored::Colorize;
use tracing::{debug, info};

/// Demo command runner
pub async fn run_demo(args: DemoArgs) -> Result<()> {
    setup_logging(&args.common)?;
    debug!("Demo arguments: {:?}", args);

    let config = apply_base_url(args.common.load_config()?, args.base_url.as_deref())?;
    let client = WeatherClient::new(&config.client.base_url)?;

    let transcript = run_session(&client, !args.no_exit).await?;

    if !args.common.quiet {
        println!("{}", "Reference client session".bright_green().bold());
        for line in &transcript {
            println!("  {}", line);
        }
        println!("{}", "complete".bright_green());
    }

    Ok(())
}

/// Run the session against `client` and return one line per step
pub async fn run_session(client: &WeatherClient, exit: bool) -> Result<Vec<String>> {
    let mut transcript = Vec::new();
    let mut log = |line: String| {
        info!("{}", line);
        transcript.push(line);
    };

    log(format!("collect.ping: {}", client.ping_collect().await?));

    let wind = DataPoint::new(0, 4, 10, 20, 6.0);
    let outcome = client.populate(DataPointType::Wind, "BOS", &wind).await?;
    log(format!("collect.weather.BOS.wind: {:?}", outcome));

    for (code, _, _) in STARTER_AIRPORTS {
        let records = client.query(code, 0.0).await?;
        let body = serde_json::to_string(&records)
            .map_err(|e| Error::invalid_payload("Failed to encode query result", e))?;
        log(format!("query.{}.0: {}", code, body));
    }

    log(format!("query.ping: {}", client.ping_query().await?.summary()));

    let deleted = match client.delete_airport("LHR").await {
        Ok(airport) => format!("deleted {}", airport),
        Err(e) if e.is_not_found() => "404 not found".to_string(),
        Err(e) => return Err(e),
    };
    log(format!("collect.airport.LHR (delete): {}", deleted));

    log(format!("query.ping: {}", client.ping_query().await?.summary()));

    if exit {
        client.exit().await?;
        log("collect.exit: 204".to_string());
    }

    Ok(transcript)
}
