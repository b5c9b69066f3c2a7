//! Command-line argument definitions for the airport weather service
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for the airport weather service
///
/// Runs the in-memory weather server, uploads airport feeds to it, and
/// queries a running instance.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "airport-weather",
    version,
    about = "In-memory airport weather service with point and radius queries",
    long_about = "Collects atmospheric readings (wind, temperature, humidity, pressure, cloud cover, \
                  precipitation) pushed by airport ground stations and answers queries for current \
                  conditions at an airport or within a radius of it, over HTTP."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the weather server
    Serve(ServeArgs),
    /// Upload an airport feed to a running server
    Load(LoadArgs),
    /// Show the health of a running server
    Status(StatusArgs),
    /// Replay the reference client session against a running server
    Demo(DemoArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/airport-weather/config.toml and falls back to defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(
        short = 'b',
        long = "bind",
        value_name = "ADDR",
        help = "Address to listen on (default 127.0.0.1:9090)"
    )]
    pub bind_address: Option<SocketAddr>,

    /// Airport feed to preload at startup
    #[arg(
        long = "airport-feed",
        value_name = "FILE",
        help = "Airport feed file to preload (comma-delimited, IATA in column 4)"
    )]
    pub airport_feed: Option<PathBuf>,

    /// Start with an empty registry instead of the starter airports
    #[arg(long = "no-starter-airports", help = "Do not seed the starter airports")]
    pub no_starter_airports: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the load command
#[derive(Debug, Clone, Parser)]
pub struct LoadArgs {
    /// Airport feed file to upload
    #[arg(value_name = "FILE")]
    pub feed: PathBuf,

    /// Base URL of the running server
    #[arg(long = "url", value_name = "URL", help = "Base URL of the weather server")]
    pub base_url: Option<String>,

    /// Maximum concurrent uploads
    #[arg(
        short = 'j',
        long = "concurrency",
        value_name = "COUNT",
        help = "Maximum concurrent uploads"
    )]
    pub concurrency: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the status command
#[derive(Debug, Clone, Parser)]
pub struct StatusArgs {
    /// Base URL of the running server
    #[arg(long = "url", value_name = "URL", help = "Base URL of the weather server")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the health report"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the demo command
#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
    /// Base URL of the running server
    #[arg(long = "url", value_name = "URL", help = "Base URL of the weather server")]
    pub base_url: Option<String>,

    /// Leave the server running after the session
    #[arg(long = "no-exit", help = "Do not stop the server at the end of the session")]
    pub no_exit: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Load the configuration file these options point at
    pub fn load_config(&self) -> Result<Config> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Config::load(self.config_file.as_deref())
    }
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Serve(args) => &args.common,
            Commands::Load(args) => &args.common,
            Commands::Status(args) => &args.common,
            Commands::Demo(args) => &args.common,
        }
    }
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Result<Config> {
        if let Some(address) = self.bind_address {
            config = config.with_bind_address(address);
        }
        if let Some(feed) = &self.airport_feed {
            config = config.with_airport_feed(feed);
        }
        if self.no_starter_airports {
            config = config.without_starter_airports();
        }
        config.validate()?;
        Ok(config)
    }
}

impl LoadArgs {
    /// Validate the load command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.feed.is_file() {
            return Err(Error::configuration(format!(
                "Airport feed does not exist: {}",
                self.feed.display()
            )));
        }

        if self.concurrency == Some(0) {
            return Err(Error::configuration(
                "Concurrency must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Result<Config> {
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(concurrency) = self.concurrency {
            config = config.with_upload_concurrency(concurrency);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Base URL override shared by the client-side commands
pub fn apply_base_url(config: Config, base_url: Option<&str>) -> Result<Config> {
    let config = match base_url {
        Some(url) => config.with_base_url(url),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        let args = Args::try_parse_from(["airport-weather", "serve", "-vv"]).unwrap();
        let command = args.command.unwrap();
        assert_eq!(command.common().get_log_level(), "debug");

        let args = Args::try_parse_from(["airport-weather", "status", "-q"]).unwrap();
        let command = args.command.unwrap();
        assert_eq!(command.common().get_log_level(), "error");
        assert!(!command.common().show_progress());

        let args = Args::try_parse_from(["airport-weather", "demo"]).unwrap();
        assert_eq!(args.command.unwrap().common().get_log_level(), "warn");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["airport-weather", "serve", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_serve_overrides() {
        let args = Args::try_parse_from([
            "airport-weather",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--airport-feed",
            "airports.dat",
            "--no-starter-airports",
        ])
        .unwrap();

        let Some(Commands::Serve(serve)) = args.command else {
            panic!("expected serve command");
        };
        let config = serve.apply_overrides(Config::default()).unwrap();
        assert_eq!(config.server.bind_address.port(), 8080);
        assert_eq!(
            config.store.airport_feed,
            Some(PathBuf::from("airports.dat"))
        );
        assert!(!config.store.seed_starter_airports);
    }

    #[test]
    fn test_load_validation() {
        let args = Args::try_parse_from([
            "airport-weather",
            "load",
            "/definitely/not/here.dat",
        ])
        .unwrap();
        let Some(Commands::Load(load)) = args.command else {
            panic!("expected load command");
        };
        assert!(load.validate().is_err());

        let config = apply_base_url(Config::default(), Some("ftp://example.org"));
        assert!(config.is_err());
    }
}
