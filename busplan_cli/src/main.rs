use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{analyze::AnalyzeArgs, optimize::OptimizeArgs, plan::PlanArgs};

mod analyze;
mod file_utils;
mod optimize;
mod parsers;
mod plan;
mod schema;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize fleet sizes and timetables from a network and trip history
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Plan a single trip arriving before a desired time
    #[command(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },
    /// Print demand and historical travel patterns of a trip history
    Analyze {
        #[command(flatten)]
        args: AnalyzeArgs,
    },
    /// Write the JSON schema of the optimization input
    Schema {
        /// Output file, printed to stdout when omitted
        #[arg(long, short = 'o')]
        out: Option<std::path::PathBuf>,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Optimize { args }) => optimize::run(args)?,
        Some(Commands::Plan { args }) => plan::run(args)?,
        Some(Commands::Analyze { args }) => analyze::run(args)?,
        Some(Commands::Schema { out }) => schema::run(out)?,
        None => {}
    }

    Ok(())
}
