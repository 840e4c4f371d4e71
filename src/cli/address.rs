//! Address command implementation.

use colored::Colorize;

use crate::cli::args::AddressArgs;
use crate::cli::{CommandContext, OutputFormat, print_json};
use crate::core::models::{AddressRequest, AddressResponse};
use crate::core::pipeline::ShipNode;
use crate::error::Result;
use crate::util::format::mock_banner;

/// Execute the address command.
pub async fn execute(args: &AddressArgs, node: &ShipNode, ctx: &CommandContext) -> Result<()> {
    let request = AddressRequest {
        street: args.street.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        zip: args.zip.clone(),
        country: "US".to_string(),
    };

    let response = node.validate_address(ctx.carrier, &request).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&response, ctx.pretty),
        OutputFormat::Human => {
            render_human(&response);
            Ok(())
        }
    }
}

fn render_human(response: &AddressResponse) {
    let result = &response.result;

    if result.is_valid {
        println!("{}", "VALID".green().bold());
    } else {
        println!("{}", "INVALID".red().bold());
    }

    if let Some(confidence) = result.confidence {
        println!("  confidence: {confidence:?}");
    }

    if let Some(address) = &result.standardized {
        println!("  {}", address.street);
        println!("  {}, {} {}", address.city, address.state, address.zip);
    }

    for suggestion in &result.suggestions {
        println!("  {} {}", "-".dimmed(), suggestion);
    }

    if response.is_mock_data {
        println!("{}", mock_banner().yellow());
    }
}
