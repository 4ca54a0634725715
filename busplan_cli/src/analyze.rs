use std::path::PathBuf;

use busplan_optimizer::{
    json::types::JsonOptimizationInput,
    problem::{
        demand::{DemandProfile, HistoricalPatterns},
        trip_request::DemandWindow,
    },
};
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use jiff::{Zoned, civil::DateTime};
use tracing::info;

use crate::{file_utils::read_json, parsers};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Optimization input with routes and trip requests
    #[arg(short, long)]
    input: PathBuf,

    /// Reference time of the analysis windows, defaults to the current time
    #[arg(long, value_parser = parsers::parse_datetime)]
    now: Option<DateTime>,
}

pub fn run(args: AnalyzeArgs) -> Result<(), anyhow::Error> {
    let input: JsonOptimizationInput = read_json(&args.input)?;
    let network = input.routes.build_network()?;
    let history = input.trip_history();

    let now = args.now.unwrap_or_else(|| Zoned::now().datetime());
    let recent = history.within(DemandWindow::trailing(now));
    let historical = history.within(DemandWindow::historical(now));

    info!(
        total = history.len(),
        recent = recent.len(),
        historical = historical.len(),
        "Analyzing trip history"
    );

    let demand = DemandProfile::from_trip_requests(&network, recent.requests());
    let patterns = HistoricalPatterns::from_trip_requests(&network, historical.requests());

    let normalized = demand.normalized_hourly_demand();
    let mut hours = Table::new();
    hours
        .load_preset(UTF8_FULL)
        .set_header(vec!["Hour", "Recent", "Normalized", "Peak", "Historical"]);
    for hour in 0..demand.hourly_demand().len() {
        hours.add_row(vec![
            format!("{hour:02}:00"),
            demand.hourly_demand()[hour].to_string(),
            format!("{:.2}", normalized[hour]),
            if demand.is_peak_hour(hour) { "yes" } else { "" }.to_owned(),
            patterns.daily_patterns[hour].to_string(),
        ]);
    }
    println!("{hours}");

    let mut weekdays = Table::new();
    weekdays
        .load_preset(UTF8_FULL)
        .set_header(vec!["Weekday", "Requests"]);
    for (name, count) in WEEKDAYS.iter().zip(patterns.weekly_patterns) {
        weekdays.add_row(vec![name.to_string(), count.to_string()]);
    }
    println!("{weekdays}");

    let mut routes = Table::new();
    routes
        .load_preset(UTF8_FULL)
        .set_header(vec!["Route", "Requests", "Peak hour demand"]);
    for route_id in network.route_ids() {
        routes.add_row(vec![
            network.route(route_id).name().to_owned(),
            patterns.route_popularity[route_id.get()].to_string(),
            demand.peak_route_demand(route_id).to_string(),
        ]);
    }
    println!("{routes}");

    Ok(())
}
