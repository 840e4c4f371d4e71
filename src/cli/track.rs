//! Track command implementation.

use colored::Colorize;

use crate::cli::args::TrackArgs;
use crate::cli::{CommandContext, OutputFormat, print_json};
use crate::core::models::{TrackRequest, TrackResponse, TrackingStatus};
use crate::core::pipeline::ShipNode;
use crate::error::Result;
use crate::util::format::{mock_banner, timestamp};

/// Execute the track command.
pub async fn execute(args: &TrackArgs, node: &ShipNode, ctx: &CommandContext) -> Result<()> {
    let request = TrackRequest {
        tracking_number: args.tracking_number.clone(),
        include_detailed_scans: !args.summary,
    };

    let response = node.track_package(ctx.carrier, &request).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&response, ctx.pretty),
        OutputFormat::Human => {
            render_human(&response, args.summary);
            Ok(())
        }
    }
}

fn status_colored(status: TrackingStatus) -> colored::ColoredString {
    match status {
        TrackingStatus::Delivered => status.label().green().bold(),
        TrackingStatus::Exception => status.label().red().bold(),
        TrackingStatus::InTransit | TrackingStatus::PickedUp => status.label().yellow().bold(),
        TrackingStatus::Unknown => status.label().dimmed(),
    }
}

fn render_human(response: &TrackResponse, summary: bool) {
    let result = &response.result;
    println!("{} {}", result.tracking_number.bold(), status_colored(result.status));
    println!("  {}", result.status_description);

    if let Some(location) = &result.current_location {
        println!("  last seen: {location}");
    }
    if let Some(delivered) = result.actual_delivery_date {
        println!("  delivered: {}", timestamp(delivered));
    }
    if let Some(signer) = &result.delivery_signed_by {
        println!("  signed by: {signer}");
    }
    if let Some(estimate) = result.estimated_delivery_date {
        println!("  estimated delivery: {}", timestamp(estimate));
    }

    if !summary && !result.events.is_empty() {
        println!();
        for event in &result.events {
            let place = event
                .location
                .as_ref()
                .map(|l| l.short_label())
                .unwrap_or_default();
            println!(
                "  {}  {:<18} {}",
                timestamp(event.timestamp).dimmed(),
                place,
                event.description
            );
        }
    }

    if response.is_mock_data {
        println!("{}", mock_banner().yellow());
    }
}
