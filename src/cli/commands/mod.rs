//! Command implementations for the airport weather CLI
//!
//! Each command is implemented in its own module:
//! - `serve`: run the HTTP server over an in-memory store
//! - `load`: upload an airport feed to a running server
//! - `status`: print the health of a running server
//! - `demo`: replay the reference client session

pub mod demo;
pub mod load;
pub mod serve;
pub mod shared;
pub mod status;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Dispatches to the subcommand handler; `cancel` is triggered by Ctrl-C.
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    let command = args
        .command
        .ok_or_else(|| Error::configuration("No command given"))?;

    match command {
        Commands::Serve(serve_args) => serve::run_serve(serve_args, cancel).await,
        Commands::Load(load_args) => load::run_load(load_args, cancel).await,
        Commands::Status(status_args) => status::run_status(status_args).await,
        Commands::Demo(demo_args) => demo::run_demo(demo_args).await,
    }
}
