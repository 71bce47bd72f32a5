//! drivermap - extract driver commands from a declaration tree.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use drivermap_cli::{OutputFormat, run};
use drivermap_core::ExtractError;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Extract route and execute-method commands from TypeDoc JSON
#[derive(Parser)]
#[command(name = "drivermap")]
#[command(about = "Extract driver commands from a TypeDoc JSON declaration tree")]
#[command(version)]
struct Args {
    /// TypeDoc JSON file (`typedoc --json`)
    tree: PathBuf,

    /// TOML file overriding well-known names
    #[arg(short, long, env = "DRIVERMAP_NAMES")]
    names: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level, args.json_logs);

    match run(&args.tree, args.names.as_deref(), args.format, args.pretty) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            match e.downcast_ref::<ExtractError>() {
                Some(err) => ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)),
                None => ExitCode::FAILURE,
            }
        }
    }
}
