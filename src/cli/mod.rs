//! CLI argument parsing and command dispatch.

pub mod address;
pub mod args;
pub mod rate;
pub mod track;
pub mod transit;

pub use args::{Cli, Commands, OutputFormat};

use crate::core::carrier::Carrier;
use crate::core::config::AppConfig;
use crate::core::pipeline::ShipNode;
use crate::error::Result;

/// Resolved per-invocation settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub carrier: Carrier,
    pub format: OutputFormat,
    pub pretty: bool,
}

/// Build the pipeline facade from the environment, honoring the --mock flag.
pub fn build_node(force_mock: bool) -> Result<ShipNode> {
    let mut config = AppConfig::from_env();
    config.force_mock |= force_mock;
    ShipNode::new(config)
}

/// Serialize a response envelope to stdout.
pub fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
