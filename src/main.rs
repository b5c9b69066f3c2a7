use airport_weather::cli::{args::Args, commands};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Ctrl-C cancels the token; the server drains and returns normally
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        eprintln!("Failed to install CTRL+C signal handler: {}", e);
                        return;
                    }
                    eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                    signal_token.cancel();
                }
                _ = signal_token.cancelled() => {}
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Airport Weather - In-memory airport weather service");
    println!("===================================================");
    println!();
    println!("Collects atmospheric readings from airport ground stations and answers");
    println!("queries for current conditions at an airport or within a radius of it.");
    println!();
    println!("USAGE:");
    println!("    airport-weather <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Run the weather server");
    println!("    load        Upload an airport feed to a running server");
    println!("    status      Show the health of a running server");
    println!("    demo        Replay the reference client session against a running server");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve on the default address with the starter airports:");
    println!("    airport-weather serve");
    println!();
    println!("    # Serve with an airport feed preloaded:");
    println!("    airport-weather serve --bind 0.0.0.0:9090 --airport-feed airports.dat");
    println!();
    println!("    # Upload a feed to a running server and check its health:");
    println!("    airport-weather load airports.dat --url http://localhost:9090");
    println!("    airport-weather status");
    println!();
    println!("For detailed help on any command, use:");
    println!("    airport-weather <COMMAND> --help");
}
