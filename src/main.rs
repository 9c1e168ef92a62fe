//! Plays one narrated run of the tower with the autopilot.
//!
//! Usage:
//!   cargo run -- [--seed N] [--starter fire|water|grass] [--floors N] [--paced]

use anyhow::{bail, Context, Result};
use beast_tower::combat::pacing::{NoPacing, Pacer, SleepPacer};
use beast_tower::content::starters::Starter;
use beast_tower::core::config::{ProviderConfig, RunConfig};
use beast_tower::core::game_state::{RunState, RunStatus};
use beast_tower::core::rng::seeded_rng;
use beast_tower::map::logic::render_map;
use beast_tower::provider::ResilientProvider;
use beast_tower::simulator::play_run;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

const MAX_TURNS: u32 = 2_000;

struct Args {
    seed: Option<u64>,
    starter: Starter,
    floors: Option<u32>,
    paced: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    let config = match args.floors {
        Some(floors) => RunConfig::with_floors(floors),
        None => RunConfig::default(),
    };
    let provider = ResilientProvider::from_config(&ProviderConfig::from_env());
    let mut rng = seeded_rng(args.seed);
    let mut state = RunState::new(args.starter, config, &mut rng);
    info!(run_id = %state.run_id, seed = ?args.seed, "run started");

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                        BEAST TOWER                            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "You chose {} (Lv {}, {} HP).",
        state.player.name, state.player.level, state.player.max_hp
    );
    println!();
    println!("{}", render_map(&state.map, &state.current_node_id));
    println!();

    let mut pacer: Box<dyn Pacer> = if args.paced {
        Box::new(SleepPacer)
    } else {
        Box::new(NoPacing)
    };
    let stats = play_run(
        &mut state,
        &provider,
        &mut rng,
        pacer.as_mut(),
        MAX_TURNS,
        &mut |line| println!("  {line}"),
    );

    println!();
    println!("{}", render_map(&state.map, &state.current_node_id));
    println!();
    let verdict = match state.status {
        RunStatus::Victory => "The tower is conquered!",
        RunStatus::GameOver => "Your partner fainted. The run is over.",
        _ => "The run stopped early.",
    };
    println!("{verdict}");
    println!(
        "Floor {} | Level {} | Battles won {} | Turns {}",
        stats.floor_reached, stats.final_level, stats.battles_won, stats.turns
    );

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        seed: None,
        starter: Starter::Fire,
        floors: None,
        paced: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--seed" => {
                let value = args.get(i + 1).context("--seed needs a value")?;
                parsed.seed = Some(value.parse().context("seed must be a number")?);
                i += 1;
            }
            "--starter" => {
                let value = args.get(i + 1).context("--starter needs a value")?;
                parsed.starter = match Starter::from_name(value) {
                    Some(starter) => starter,
                    None => bail!("unknown starter `{value}`"),
                };
                i += 1;
            }
            "-f" | "--floors" => {
                let value = args.get(i + 1).context("--floors needs a value")?;
                let floors: u32 = value.parse().context("floors must be a number")?;
                if floors < 2 {
                    bail!("a tower needs at least 2 floors");
                }
                parsed.floors = Some(floors);
                i += 1;
            }
            "--paced" => parsed.paced = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}`"),
        }
        i += 1;
    }

    Ok(parsed)
}

fn print_help() {
    println!("Beast Tower");
    println!();
    println!("USAGE:");
    println!("    cargo run -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -s, --seed <S>        Seed for a reproducible run");
    println!("    --starter <NAME>      fire, water or grass (default: fire)");
    println!("    -f, --floors <N>      Tower height including start and boss (default: 11)");
    println!("    --paced               Pause between battle beats");
    println!("    -h, --help            Show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    BEAST_TOWER_ENEMY_ENDPOINT          Remote enemy generator URL");
    println!("    BEAST_TOWER_API_KEY                 Bearer key for the generator");
    println!("    BEAST_TOWER_PROVIDER_TIMEOUT_SECS   Request timeout (default: 10)");
    println!("    RUST_LOG                            Diagnostics filter (default: warn)");
}
