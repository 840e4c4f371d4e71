//! Rate command implementation.

use colored::Colorize;

use crate::cli::args::RateArgs;
use crate::cli::{CommandContext, OutputFormat, print_json};
use crate::core::models::{RateRequest, RateResponse};
use crate::core::pipeline::ShipNode;
use crate::error::Result;
use crate::util::format::{mock_banner, money};

/// Execute the rate command.
pub async fn execute(args: &RateArgs, node: &ShipNode, ctx: &CommandContext) -> Result<()> {
    let request = RateRequest {
        origin_zip: args.from.clone(),
        destination_zip: args.to.clone(),
        weight: args.weight,
        length: args.length,
        width: args.width,
        height: args.height,
        package_type: None,
        service_type: args.service.clone(),
    };

    tracing::debug!(
        carrier = ctx.carrier.cli_name(),
        from = %args.from,
        to = %args.to,
        weight = args.weight,
        "requesting rates"
    );

    let response = node.quote_rates(ctx.carrier, &request).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&response, ctx.pretty),
        OutputFormat::Human => {
            render_human(&response);
            Ok(())
        }
    }
}

fn render_human(response: &RateResponse) {
    println!(
        "{}",
        format!(
            "Rates {} -> {} ({} lb)",
            response.request.origin, response.request.destination, response.request.weight
        )
        .bold()
    );

    if response.rates.is_empty() {
        println!("  no services quoted for this lane");
    }

    for rate in &response.rates {
        let price = money(rate.total_charge, &rate.currency).green();
        let mut commitment = rate.transit_time.clone();
        if let (Some(day), Some(time)) = (&rate.delivery_day, &rate.delivery_time) {
            commitment = format!("{day} {time}");
        }
        println!("  {:<22} {:>14}  {}", rate.service_name, price, commitment.dimmed());
    }

    if response.is_mock_data {
        println!("{}", mock_banner().yellow());
    }
}
