use std::path::PathBuf;

use busplan_optimizer::{
    format_hh_mm,
    itinerary::{
        itinerary_request::ItineraryRequest, itinerary_result::ItineraryResult,
        planner::ItineraryPlanner,
    },
    json::types::JsonRouteNetwork,
};
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use jiff::civil::DateTime;
use tracing::info;

use crate::{file_utils::read_json, parsers};

#[derive(Args)]
pub struct PlanArgs {
    /// Route network with stops and bus timetables
    #[arg(short, long)]
    routes: PathBuf,

    #[arg(short, long)]
    from: String,

    #[arg(short, long)]
    to: String,

    /// Desired arrival, e.g. 2025-06-10T08:10
    #[arg(short, long, value_parser = parsers::parse_datetime)]
    arrive_by: DateTime,

    /// Print the itinerary as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), anyhow::Error> {
    let network: JsonRouteNetwork = read_json(&args.routes)?;
    let network = network.build_network()?;

    let request = ItineraryRequest::new(args.arrive_by, args.from, args.to);
    info!(
        origin = request.origin(),
        destination = request.destination(),
        day_type = %request.day_type(),
        "Planning itinerary"
    );

    let result = ItineraryPlanner::new(&network).plan(&request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", itinerary_table(&result));
    }

    Ok(())
}

fn itinerary_table(result: &ItineraryResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    match result {
        ItineraryResult::Direct(itinerary) => {
            table.set_header(vec!["Route", "Bus", "Be at stop", "Departs", "Arrives", "Stops"]);
            table.add_row(vec![
                itinerary.route.clone(),
                itinerary.bus.clone(),
                format_hh_mm(itinerary.suggested_arrival),
                format_hh_mm(itinerary.departure_time),
                format_hh_mm(itinerary.estimated_arrival),
                itinerary.stops.join(" > "),
            ]);
        }
        ItineraryResult::Transfer(itinerary) => {
            table.set_header(vec!["Leg", "Route", "Bus", "Departs", "Arrives", "Stops"]);
            table.add_row(vec![
                "1".to_owned(),
                itinerary.first_route.clone(),
                itinerary.first_bus.clone().unwrap_or_default(),
                format_hh_mm(itinerary.first_departure),
                format_hh_mm(itinerary.transfer_arrival),
                itinerary.first_leg_stops.join(" > "),
            ]);
            table.add_row(vec![
                "2".to_owned(),
                itinerary.second_route.clone(),
                itinerary.second_bus.clone().unwrap_or_default(),
                format_hh_mm(itinerary.second_departure),
                format_hh_mm(itinerary.final_arrival),
                itinerary.second_leg_stops.join(" > "),
            ]);
            table.add_row(vec![
                "Be at stop".to_owned(),
                format_hh_mm(itinerary.suggested_arrival),
                format!("transfer at {}", itinerary.transfer_stop),
                String::new(),
                String::new(),
                format!("{:.0} min total", itinerary.total_minutes),
            ]);
        }
        ItineraryResult::TransferUnresolved(unresolved) => {
            let times = |times: &[jiff::civil::Time]| {
                times
                    .iter()
                    .map(|time| format_hh_mm(*time))
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            table.set_header(vec!["Route", "Departures"]);
            table.add_row(vec![
                unresolved.first_route.clone(),
                times(&unresolved.first_route_times),
            ]);
            table.add_row(vec![
                unresolved.second_route.clone(),
                times(&unresolved.second_route_times),
            ]);
            table.add_row(vec![
                format!("No connection honors the buffers at {}", unresolved.transfer_stop),
                String::new(),
            ]);
        }
        ItineraryResult::Infeasible(infeasibility) => {
            table.set_header(vec!["Infeasible"]);
            table.add_row(vec![infeasibility.message.clone()]);
        }
    }

    table
}
