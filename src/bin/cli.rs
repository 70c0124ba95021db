//! AMCP CLI Client
//!
//! Sends one command to an AMCP server and prints the reply.

use std::process::ExitCode;

use amcp::{Argument, Client, ClientConfig, Command, Payload};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// AMCP CLI
#[derive(Parser, Debug)]
#[command(name = "amcp-cli")]
#[command(about = "Send a command to an AMCP media server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:5250")]
    server: String,

    /// Read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    /// Send every argument as text instead of inferring numbers
    #[arg(long)]
    text: bool,

    /// Command name, e.g. PLAY
    command: String,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .addr(&args.server)
        .connect_timeout_ms(args.timeout_ms)
        .timeout_ms(args.timeout_ms)
        .build();

    let command = Command::with_args(
        &args.command,
        args.args.iter().map(|word| {
            if args.text {
                Argument::from(word)
            } else {
                Argument::infer(word)
            }
        }),
    );

    let mut client = match Client::connect(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", args.server, e);
            return ExitCode::FAILURE;
        }
    };

    let response = match client.execute(&command) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} {}", response.code(), response.message());
    if let Payload::List(lines) = response.payload() {
        for line in lines {
            println!("{}", line);
        }
    }

    if let Err(e) = client.close() {
        tracing::warn!("Error closing connection: {}", e);
    }

    if response.code().is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
