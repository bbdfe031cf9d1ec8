//! NASim CLI - Command line tools for inspecting and replaying host scenarios

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use nasim_core::{Action, Address, ObservationMask, Scenario};

#[derive(Parser)]
#[command(name = "nasim")]
#[command(about = "NASim - simulated network hosts for attack agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every host of a scenario with its encoding
    Inspect {
        /// Path to the scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Also print the decoded vector of each host
        #[arg(long, default_value = "false")]
        full: bool,
    },

    /// Print a masked observation of a single host
    Observe {
        /// Path to the scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Subnet of the host
        #[arg(long)]
        subnet: u32,

        /// Id of the host within its subnet
        #[arg(long)]
        id: u32,

        /// Comma separated fields to reveal
        /// (compromised, reachable, discovered, value, services, os, all)
        #[arg(short, long, default_value = "")]
        reveal: String,
    },

    /// Resolve a list of actions against a scenario
    Replay {
        /// Path to the scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Path to a JSON array of actions
        #[arg(short, long)]
        actions: PathBuf,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Inspect { scenario, full } => cmd_inspect(&scenario, full),
        Commands::Observe {
            scenario,
            subnet,
            id,
            reveal,
        } => cmd_observe(&scenario, Address::new(subnet, id), &reveal),
        Commands::Replay { scenario, actions } => cmd_replay(&scenario, &actions),
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    Scenario::load(path).with_context(|| format!("failed to load scenario {}", path.display()))
}

fn cmd_inspect(path: &Path, full: bool) -> Result<()> {
    let scenario = load_scenario(path)?;

    println!("╔═══════════════════════════════════════╗");
    println!("║         NASim Scenario                ║");
    println!("╚═══════════════════════════════════════╝");
    println!();
    println!("Hosts: {}", scenario.len());
    println!();

    for host in scenario.hosts() {
        println!("{}", host);
        println!("  State size: {}", host.state_size());
        println!("  Vector: {:?}", host.numpy());

        if full {
            let readable = host.get_readable(host.numpy())?;
            println!("  Decoded:");
            println!("{}", serde_json::to_string_pretty(&readable)?);
        }
        println!();
    }

    Ok(())
}

fn parse_mask(reveal: &str) -> Result<ObservationMask> {
    let mut mask = ObservationMask::none();

    for field in reveal.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        match field {
            "compromised" => mask.compromised = true,
            "reachable" => mask.reachable = true,
            "discovered" => mask.discovered = true,
            "value" => mask.value = true,
            "services" => mask.services = true,
            "os" => mask.os = true,
            "all" => mask = ObservationMask::full(),
            other => anyhow::bail!("unknown field '{}'", other),
        }
    }

    Ok(mask)
}

fn cmd_observe(path: &Path, address: Address, reveal: &str) -> Result<()> {
    let scenario = load_scenario(path)?;
    let mask = parse_mask(reveal)?;
    let host = scenario
        .host(address)
        .with_context(|| format!("no host at {}", address))?;

    let obs = host.observe(mask);
    let readable = host.get_readable(&obs)?;

    println!("Mask: {:?}", mask);
    println!("Observation: {:?}", obs);
    println!("{}", serde_json::to_string_pretty(&readable)?);

    Ok(())
}

fn cmd_replay(scenario_path: &Path, actions_path: &Path) -> Result<()> {
    let mut scenario = load_scenario(scenario_path)?;
    let text = fs::read_to_string(actions_path)
        .with_context(|| format!("failed to read actions {}", actions_path.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse actions {}", actions_path.display()))?;

    println!("╔═══════════════════════════════════════╗");
    println!("║         NASim Replay                  ║");
    println!("╚═══════════════════════════════════════╝");
    println!();
    println!("Hosts: {}", scenario.len());
    println!("Actions: {}", actions.len());
    println!();

    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut successes = 0;

    for (step, action) in actions.iter().enumerate() {
        let obs = scenario
            .perform_action(action)
            .with_context(|| format!("step {}: {}", step, action))?;

        total_value += obs.value;
        total_cost += action.cost;
        if obs.success {
            successes += 1;
        } else {
            warn!(step, action = %action, "action failed");
        }

        println!("[{:>3}] {}", step, action);
        println!("      {}", serde_json::to_string(&obs)?);
    }

    let compromised = scenario.hosts().filter(|h| h.compromised()).count();
    info!(compromised, total_value, "replay complete");

    println!();
    println!("Replay complete:");
    println!("  Successful actions: {}/{}", successes, actions.len());
    println!("  Hosts compromised: {}/{}", compromised, scenario.len());
    println!("  Total value: {:.1}", total_value);
    println!("  Total cost: {:.1}", total_cost);
    println!("  Reward: {:.1}", total_value - total_cost);

    Ok(())
}
