//! Server Connection Probe - Main CLI Application
//!
//! Measures round-trip connection latency to a user-specified server URL
//! and, in comprehensive mode, approximate download throughput.

use clap::Parser;
use server_probe::{
    cli::Cli,
    config::{display_config_summary, load_config},
    error::{AppError, Result},
    logging::Logger,
    models::ProbeRequest,
    output::OutputFormatterFactory,
    probe::Prober,
    session::ProbeSession,
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    // Explicit color flags override the terminal detection done by the
    // colored crate, so forced color survives piped output
    if cli.color {
        colored::control::set_override(true);
    } else if cli.no_color || cli.json {
        colored::control::set_override(false);
    }

    let use_color = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    // Show debug info if requested
    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    // Load and validate configuration
    let config = load_config(cli)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    let logger = match config.log_level {
        Some(level) => Logger::new(level, config.enable_color),
        None => Logger::from_flags(config.debug, config.verbose, config.enable_color),
    };
    let formatter = OutputFormatterFactory::create_formatter(config.enable_color);
    let prober = Prober::with_logger(logger)?;
    let mut session = ProbeSession::new();

    if !config.json {
        print!("{}", formatter.format_header("Server Connection Time")?);
        println!();
    }

    let mut last_error: Option<AppError> = None;

    for iteration in 1..=config.probe_count {
        if config.verbose && config.probe_count > 1 && !config.json {
            println!("Probe {} of {}:", iteration, config.probe_count);
        }

        // Each iteration is an independent trigger with a fresh request;
        // there is no retry relationship between them.
        let request = ProbeRequest::new(config.target_url.clone(), config.mode);
        let outcome = session.run(&prober, &request).await;

        if config.json {
            match &outcome {
                Ok(result) => println!("{}", serde_json::to_string(result)?),
                Err(error) => println!(
                    "{}",
                    serde_json::json!({ "error": error.to_string() })
                ),
            }
        } else {
            match &outcome {
                Ok(result) => {
                    print!(
                        "{}",
                        formatter.format_result_card(result, &config.target_url)?
                    );
                }
                Err(error) => print!("{}", formatter.format_error_panel(error)?),
            }
        }

        if let Err(error) = outcome {
            last_error = Some(error.into());
        }
    }

    if config.verbose && !config.json {
        println!();
        print!(
            "{}",
            formatter.format_note(
                "Basic Test measures only connection establishment time.\n\
                 Full Speed Test attempts to measure both connection time and download speed.\n\
                 Note: servers that deny cross-client inspection may limit the accuracy of some measurements."
            )?
        );
    }

    // A failed probe decides the exit code; earlier successes still printed
    match last_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config { .. } => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format (PROBE_URL, PROBE_MODE, PROBE_COUNT, PROBE_COLOR)");
            eprintln!("  - Probe count must be between 1 and 1000");
        }
        AppError::Network { .. } => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Verify the target URL (must start with http:// or https://)");
            eprintln!("  - Verify firewall settings");
            eprintln!("  - Test with a different target URL");
        }
        AppError::Timeout { .. } => {
            eprintln!();
            eprintln!("Timeout troubleshooting:");
            eprintln!("  - The target did not respond within 10 seconds");
            eprintln!("  - Check whether the server is reachable from your network");
        }
        _ => {}
    }
}
