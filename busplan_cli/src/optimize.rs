use std::path::PathBuf;

use anyhow::Context;
use busplan_optimizer::{
    json::types::JsonOptimizationInput,
    problem::trip_request::DemandWindow,
    solver::{
        optimization_result::OptimizationResult,
        score::FitnessMetrics,
        solver::Solver,
        solver_params::{DEFAULT_SEED, SolverParams, SolverSelectorStrategy, Termination},
    },
};
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::{Zoned, civil::DateTime};
use tracing::info;

use crate::{
    file_utils::{read_json, write_output},
    parsers,
};

const SEED_ENV: &str = "BUSPLAN_SEED";
const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Args)]
pub struct OptimizeArgs {
    /// Optimization input with routes, current fleet and trip requests
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for the JSON result, printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = 50)]
    population: usize,

    #[arg(short, long, default_value_t = 30)]
    generations: usize,

    #[arg(long, default_value_t = 0.10)]
    mutation_rate: f64,

    #[arg(long, default_value_t = 0.7)]
    crossover_probability: f64,

    /// Stops early once the best fitness exceeds this value
    #[arg(long, default_value_t = 0.85)]
    fitness_threshold: f64,

    /// Parent selection: 'random' or 'tournament'
    #[arg(long, value_parser = parsers::parse_selector, default_value = "random")]
    selector: SolverSelectorStrategy,

    /// Falls back to BUSPLAN_SEED, then to a fixed seed
    #[arg(long, value_parser = parsers::parse_seed)]
    seed: Option<u64>,

    /// Only requests created within this many days before `now` are used
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(i64).range(0..=MAX_WINDOW_DAYS)
    )]
    window_days: i64,

    /// Reference time of the demand window, defaults to the current time
    #[arg(long, value_parser = parsers::parse_datetime)]
    now: Option<DateTime>,

    /// Use every trip request regardless of its creation time
    #[arg(long)]
    all_history: bool,
}

fn resolve_seed(seed: Option<u64>) -> Result<u64, anyhow::Error> {
    if let Some(seed) = seed {
        return Ok(seed);
    }

    match std::env::var(SEED_ENV) {
        Ok(value) => parsers::parse_seed(&value)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("{SEED_ENV} is not a valid seed")),
        Err(_) => Ok(DEFAULT_SEED),
    }
}

pub fn run(args: OptimizeArgs) -> Result<(), anyhow::Error> {
    info!("Optimizing {:?}", args.input);

    let input: JsonOptimizationInput = read_json(&args.input)?;

    let window = if args.all_history {
        None
    } else {
        let now = args.now.unwrap_or_else(|| Zoned::now().datetime());
        Some(DemandWindow {
            now,
            days: args.window_days,
        })
    };

    let problem = input.build_problem(window)?;

    let params = SolverParams {
        population_size: args.population,
        mutation_rate: args.mutation_rate,
        crossover_probability: args.crossover_probability,
        terminations: vec![
            Termination::Generations(args.generations),
            Termination::Fitness(args.fitness_threshold),
        ],
        solver_selector: args.selector,
        seed: resolve_seed(args.seed)?,
        ..SolverParams::default()
    };

    let mut solver = Solver::new(problem, params)?;

    let bar = ProgressBar::new(args.generations as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let progress = bar.clone();
    solver.on_generation(move |statistics| {
        progress.set_position(statistics.generation as u64 + 1);
        progress.set_message(format!("best {:.4}", statistics.best_so_far));
    });

    let result = solver.solve();
    bar.finish_and_clear();
    let result = result?;

    info!(
        fitness = result.fitness_score,
        baseline = result.baseline.fitness_score,
        generations = result.generations,
        early_stopped = result.early_stopped,
        "Optimization finished"
    );

    eprintln!("{}", fleet_table(&result));
    eprintln!("{}", metrics_table(&result));

    write_output(
        args.output.as_deref(),
        &serde_json::to_string_pretty(&result)?,
    )
}

fn fleet_table(result: &OptimizationResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Route", "Current", "Optimized", "Change", "Buses"]);

    let changes = result.fleet_changes();

    for (route, optimized) in &result.optimized_fleet {
        let current = result.current_fleet.get(route).copied().unwrap_or(0);
        let change = changes.get(route.as_str()).copied().unwrap_or(0);
        let trips = result
            .optimized_schedules
            .get(route)
            .map_or(0, |buses| {
                buses
                    .values()
                    .map(|schedule| schedule.weekdays.len())
                    .sum::<usize>()
            });

        table.add_row(vec![
            route.clone(),
            current.to_string(),
            optimized.to_string(),
            format!("{change:+}"),
            format!("{trips} weekday trips"),
        ]);
    }

    table
}

fn metric_rows(metrics: &FitnessMetrics) -> [(&'static str, f64); 4] {
    [
        ("Waiting time", metrics.waiting_time),
        ("Utilization", metrics.utilization),
        ("Peak coverage", metrics.peak_coverage),
        ("Cost", metrics.cost),
    ]
}

fn metrics_table(result: &OptimizationResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Current", "Optimized"]);

    for ((name, baseline), (_, optimized)) in metric_rows(&result.baseline.fitness_metrics)
        .into_iter()
        .zip(metric_rows(&result.fitness_metrics))
    {
        table.add_row(vec![
            name.to_owned(),
            format!("{baseline:.3}"),
            format!("{optimized:.3}"),
        ]);
    }

    table.add_row(vec![
        "Fitness".to_owned(),
        format!("{:.3}", result.baseline.fitness_score),
        format!("{:.3}", result.fitness_score),
    ]);

    table.add_row(vec![
        "Improvement".to_owned(),
        String::new(),
        format!("{:+.3}", result.fitness_improvement()),
    ]);

    if let Some(wait) = result.baseline.average_wait_minutes {
        table.add_row(vec![
            "Average wait (min)".to_owned(),
            format!("{wait:.1}"),
            String::new(),
        ]);
    }

    table
}
