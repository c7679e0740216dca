//! lasermark CLI
//!
//! Command-line interface for driving an MD-X2500 marker controller.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lasermark::protocol::TERMINATOR;
use lasermark::{ConnectionConfig, Mdx2500, Response};
use tracing_subscriber::{fmt, EnvFilter};

/// lasermark CLI
#[derive(Parser, Debug)]
#[command(name = "lasermark-cli")]
#[command(about = "CLI for laser marker controllers (WX/RX protocol)")]
#[command(version)]
struct Args {
    /// Controller IP address
    #[arg(short, long, default_value = "192.168.0.10")]
    address: String,

    /// Controller TCP port
    #[arg(short, long, default_value = "50002")]
    port: u16,

    /// Connect timeout in milliseconds
    #[arg(long, default_value = "60000")]
    connect_timeout_ms: u64,

    /// Default receive timeout in milliseconds
    #[arg(long, default_value = "10000")]
    receive_timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query whether the marker is ready
    Ready,

    /// Query the current error status
    ErrorStatus,

    /// Clear the current error
    ClearError,

    /// Start marking
    Start {
        /// Receive timeout for this job in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Stop marking
    Stop,

    /// Select a program
    Program {
        /// Program number
        id: String,
    },

    /// Replace block texts in one linked write
    Strings {
        /// Block number (repeatable, paired with --text)
        #[arg(short, long = "block", required = true)]
        blocks: Vec<u32>,

        /// Replacement text (repeatable, paired with --block)
        #[arg(short, long = "text", required = true)]
        texts: Vec<String>,
    },

    /// Send a raw command, e.g. "RX,Ready"
    Raw {
        /// Command text; the terminator is appended if missing
        command: String,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lasermark=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ConnectionConfig::builder()
        .port(args.port)
        .connect_timeout_ms(args.connect_timeout_ms)
        .receive_timeout_ms(args.receive_timeout_ms)
        .build();

    let mut marker = Mdx2500::new(config);
    if let Err(e) = marker.connect(&args.address) {
        tracing::error!("Failed to connect: {}", e);
        return ExitCode::FAILURE;
    }

    let outcome = execute(&mut marker, args.command);
    marker.disconnect();

    match outcome {
        Ok(response) => {
            println!("{}", response);
            if response.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(marker: &mut Mdx2500, command: Commands) -> lasermark::Result<Response> {
    let response = match command {
        Commands::Ready => marker.is_ready(),
        Commands::ErrorStatus => marker.error_status(),
        Commands::ClearError => marker.clear_error(),
        Commands::Start { timeout_ms } => {
            marker.start_marking(timeout_ms.map(Duration::from_millis))
        }
        Commands::Stop => marker.stop_marking(),
        Commands::Program { id } => marker.change_program(&id),
        Commands::Strings { blocks, texts } => {
            marker.change_character_strings(blocks.as_slice(), texts.as_slice())?
        }
        Commands::Raw { mut command } => {
            if !command.ends_with(TERMINATOR) {
                command.push_str(TERMINATOR);
            }
            marker.client_mut().run(&command)
        }
    };
    Ok(response)
}
