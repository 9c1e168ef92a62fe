//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations of whole tower runs.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 -f 7    # 100 runs on a 7-floor tower
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use anyhow::{Context, Result};
use beast_tower::content::starters::Starter;
use beast_tower::core::config::RunConfig;
use beast_tower::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if json {
        let report = run_simulation(&config);
        println!("{}", report.to_json());
        return Ok(());
    }

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              BEAST TOWER BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Floors:         {}", config.run.floor_count);
    println!("  Starter:        {}", config.starter.name());
    println!("  Max Turns:      {}", config.max_turns_per_run);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--save") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("failed to write {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--floors" => {
                if i + 1 < args.len() {
                    if let Ok(floors) = args[i + 1].parse::<u32>() {
                        config = config.with_floors(floors.max(2));
                    }
                    i += 1;
                }
            }
            "--starter" => {
                if i + 1 < args.len() {
                    if let Some(starter) = Starter::from_name(&args[i + 1]) {
                        config.starter = starter;
                    }
                    i += 1;
                }
            }
            "-t" | "--turns" => {
                if i + 1 < args.len() {
                    config.max_turns_per_run = args[i + 1].parse().unwrap_or(2_000);
                    i += 1;
                }
            }
            "--json" => {
                json = true;
                config.verbosity = 0;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig::quick(config.seed.unwrap_or(42));
            }
            "--gauntlet" => {
                config.run = RunConfig::gauntlet(config.run.floor_count);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Beast Tower Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulated runs (default: 1000)");
    println!("    -s, --seed <S>      Base seed; run i uses S + i");
    println!("    -f, --floors <F>    Tower height (default: 11)");
    println!("    --starter <NAME>    fire, water or grass (default: fire)");
    println!("    -t, --turns <T>     Max battle turns per run (default: 2000)");
    println!("    --gauntlet          Ordinary floors are always fights");
    println!("    --json              Print the report as JSON only");
    println!("    --save              Also save the JSON report to a file");
    println!("    -v, --verbose       One line per run");
    println!("    --quick             100 seeded runs");
    println!("    -h, --help          Show this help");
}
