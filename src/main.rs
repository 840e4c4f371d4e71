//! shipnode - CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use shipnode::cli::{Cli, CommandContext, Commands, build_node};
use shipnode::core::carrier::Carrier;
use shipnode::core::logging;
use shipnode::util::env::should_use_color;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .as_deref()
        .and_then(logging::LogLevel::from_arg)
        .or_else(|| logging::parse_log_level_from_env().map(logging::LogLevel::from_tracing_level))
        .unwrap_or_default();
    let log_format = if cli.json_output {
        logging::LogFormat::Json
    } else {
        logging::parse_log_format_from_env().unwrap_or_default()
    };
    let log_file = logging::parse_log_file_from_env();
    logging::init(log_level, log_format, log_file, cli.verbose);

    if !should_use_color(cli.no_color) {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), "{e}");
            eprintln!("error[{}]: {e}", e.error_code());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> shipnode::Result<()> {
    let ctx = CommandContext {
        carrier: Carrier::from_cli_name(&cli.carrier)?,
        format: cli.effective_format(),
        pretty: cli.pretty,
    };
    let node = build_node(cli.mock)?;

    match cli.command {
        Commands::Rate(args) => shipnode::cli::rate::execute(&args, &node, &ctx).await,
        Commands::Track(args) => shipnode::cli::track::execute(&args, &node, &ctx).await,
        Commands::Transit(args) => shipnode::cli::transit::execute(&args, &node, &ctx).await,
        Commands::Address(args) => shipnode::cli::address::execute(&args, &node, &ctx).await,
    }
}
