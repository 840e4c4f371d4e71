//! Transit command implementation.

use chrono::NaiveDate;
use colored::Colorize;

use crate::cli::args::TransitArgs;
use crate::cli::{CommandContext, OutputFormat, print_json};
use crate::core::busday::format_day;
use crate::core::models::{TransitRequest, TransitResponse};
use crate::core::selector::Urgency;
use crate::core::pipeline::ShipNode;
use crate::error::{Result, ShipError};
use crate::util::format::mock_banner;

/// Execute the transit command.
pub async fn execute(args: &TransitArgs, node: &ShipNode, ctx: &CommandContext) -> Result<()> {
    let ship_date = args
        .ship_date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ShipError::InvalidInput {
                field: "shipDate".to_string(),
                message: "ship date must be YYYY-MM-DD".to_string(),
            })
        })
        .transpose()?;

    let request = TransitRequest {
        origin_zip: args.from.clone(),
        destination_zip: args.to.clone(),
        ship_date,
    };

    let response = node.transit_times(ctx.carrier, &request).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&response, ctx.pretty),
        OutputFormat::Human => {
            render_human(&response);
            Ok(())
        }
    }
}

fn render_human(response: &TransitResponse) {
    let schedule = &response.schedule;
    println!(
        "{}",
        format!(
            "Transit {} -> {} shipping {}",
            schedule.origin,
            schedule.destination,
            format_day(schedule.ship_date)
        )
        .bold()
    );

    if schedule.services.is_empty() {
        println!("  no services available for this lane");
    }

    for service in &schedule.services {
        let days = if service.business_days == 1 {
            "1 business day".to_string()
        } else {
            format!("{} business days", service.business_days)
        };
        let days = match Urgency::from_business_days(service.business_days) {
            Urgency::Urgent => days.yellow().bold(),
            Urgency::Express => days.cyan(),
            Urgency::Standard => days.normal(),
        };
        let commitment = service
            .delivery_time
            .as_deref()
            .map_or_else(|| service.delivery_day.clone(), |t| format!("{} {t}", service.delivery_day));
        println!(
            "  {:<22} {:<18} {}",
            service.service_name,
            days,
            commitment.green()
        );
    }

    for note in &schedule.notes {
        println!("  {}", note.dimmed());
    }

    if response.is_mock_data {
        println!("{}", mock_banner().yellow());
    }
}
