//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

/// shipnode - carrier rates, tracking, transit times, and address validation.
#[derive(Parser, Debug)]
#[command(name = "shipnode")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // === Global flags ===
    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Carrier to query
    #[arg(long, value_name = "CARRIER", default_value = "express", global = true)]
    pub carrier: String,

    /// Force simulated data even when credentials are configured
    #[arg(long, global = true)]
    pub mock: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective output format.
    #[must_use]
    pub const fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// Machine-readable JSON
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quote shipping rates for a lane and package
    Rate(RateArgs),

    /// Track a package
    Track(TrackArgs),

    /// Show service availability and delivery commitments for a lane
    Transit(TransitArgs),

    /// Validate and standardize an address
    Address(AddressArgs),
}

/// Arguments for the `rate` command.
#[derive(Parser, Debug)]
pub struct RateArgs {
    /// Origin ZIP code
    #[arg(long, value_name = "ZIP")]
    pub from: String,

    /// Destination ZIP code
    #[arg(long, value_name = "ZIP")]
    pub to: String,

    /// Package weight in pounds
    #[arg(long, value_name = "LB")]
    pub weight: f64,

    /// Package length in inches
    #[arg(long, value_name = "IN")]
    pub length: Option<f64>,

    /// Package width in inches
    #[arg(long, value_name = "IN")]
    pub width: Option<f64>,

    /// Package height in inches
    #[arg(long, value_name = "IN")]
    pub height: Option<f64>,

    /// Restrict to one service type
    #[arg(long, value_name = "SERVICE")]
    pub service: Option<String>,
}

/// Arguments for the `track` command.
#[derive(Parser, Debug)]
pub struct TrackArgs {
    /// Tracking number
    #[arg(value_name = "TRACKING_NUMBER")]
    pub tracking_number: String,

    /// Summary only, without the scan history
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the `transit` command.
#[derive(Parser, Debug)]
pub struct TransitArgs {
    /// Origin ZIP code
    #[arg(long, value_name = "ZIP")]
    pub from: String,

    /// Destination ZIP code
    #[arg(long, value_name = "ZIP")]
    pub to: String,

    /// Ship date (YYYY-MM-DD, defaults to tomorrow)
    #[arg(long, value_name = "DATE")]
    pub ship_date: Option<String>,
}

/// Arguments for the `address` command.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    /// Street address
    #[arg(long, value_name = "STREET")]
    pub street: String,

    /// City
    #[arg(long, value_name = "CITY")]
    pub city: String,

    /// Two-letter state code
    #[arg(long, value_name = "ST")]
    pub state: String,

    /// ZIP code
    #[arg(long, value_name = "ZIP")]
    pub zip: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_overrides_format() {
        let cli = Cli::parse_from([
            "shipnode", "rate", "--from", "46201", "--to", "90001", "--weight", "5", "--json",
        ]);
        assert_eq!(cli.effective_format(), OutputFormat::Json);
    }

    #[test]
    fn track_takes_positional_number() {
        let cli = Cli::parse_from(["shipnode", "track", "794658201330"]);
        match cli.command {
            Commands::Track(args) => assert_eq!(args.tracking_number, "794658201330"),
            _ => panic!("expected track command"),
        }
    }
}
