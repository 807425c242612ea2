use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use itinerary_planner::{PlannerConfig, TripPlanner, TripRequest, locale, logging, web};

#[derive(Parser)]
#[command(
    name = "itinerary-planner",
    version,
    about = "Personal AI travel itinerary planner"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "PLANNER_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the trip form and JSON API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Plan one trip and print the itinerary
    Plan(PlanArgs),
    /// List destinations with known currency and time zone
    Destinations,
}

#[derive(Args)]
struct PlanArgs {
    /// Destination city, state or country, e.g. "Paris, France"
    #[arg(long)]
    destination: String,
    /// Hobbies and interests, comma-separated
    #[arg(long)]
    interests: String,
    #[arg(long)]
    budget: String,
    #[arg(long)]
    occasion: String,
    #[arg(long)]
    hotel_style: String,
    /// Number of days
    #[arg(long, default_value_t = 3)]
    days: u32,
    /// Print the plan as JSON instead of markdown
    #[arg(long)]
    json: bool,
}

impl From<&PlanArgs> for TripRequest {
    fn from(args: &PlanArgs) -> Self {
        Self {
            destination: args.destination.clone(),
            interests: args.interests.clone(),
            budget: args.budget.clone(),
            occasion: args.occasion.clone(),
            hotel_style: args.hotel_style.clone(),
            num_days: args.days,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Destinations => {
            for entry in locale::known_destinations() {
                println!(
                    "{:<24} {:<38} {}",
                    entry.destination, entry.locale.currency, entry.locale.timezone
                );
            }
            Ok(())
        }
        Command::Serve { host, port } => {
            let mut config = load_config(cli.config, cli.verbose)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let planner = TripPlanner::from_config(&config)?;
            web::run(&config.server, Arc::new(planner)).await
        }
        Command::Plan(args) => {
            let config = load_config(cli.config, cli.verbose)?;
            let planner = TripPlanner::from_config(&config)?;
            let plan = planner.plan(&TripRequest::from(&args)).await?;
            if args.json {
                let json =
                    serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
                println!("{json}");
            } else {
                print!("{plan}");
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>, verbose: bool) -> Result<PlannerConfig> {
    let config = PlannerConfig::load_from_path(path)?;
    logging::init_tracing(&config.logging, verbose)?;
    Ok(config)
}
