//! Plays whole runs with the autopilot and aggregates them.
//!
//! Runs go through the same `game_logic` operations a human would use, so
//! simulated results follow real gameplay rules.

use super::autopilot::{battle_action, event_choice, pick_node, pick_reward};
use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::engine::PlayerAction;
use crate::combat::pacing::{NoPacing, Pacer};
use crate::core::game_logic::{
    available_nodes, choose_move, flee, resolve_event, rest, select_node, select_reward, use_item,
};
use crate::core::game_state::{RunState, RunStatus};
use crate::core::rng::seeded_rng;
use crate::provider::ResilientProvider;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// What one run ended with.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub cleared: bool,
    pub floor_reached: u32,
    pub final_level: u32,
    pub battles_won: u32,
    pub turns: u32,
    /// Floor of the fight that ended the run, if it ended in defeat
    pub defeat_floor: Option<u32>,
}

impl RunStats {
    fn from_state(state: &RunState, turns: u32) -> Self {
        Self {
            cleared: state.status == RunStatus::Victory,
            floor_reached: state.current_floor(),
            final_level: state.player.level,
            battles_won: state.battles_won,
            turns,
            defeat_floor: (state.status == RunStatus::GameOver).then(|| state.current_floor()),
        }
    }
}

/// Drives `state` with the autopilot until the run ends, gets stuck or hits
/// `max_turns`. Every log line and encounter result goes through `on_line`.
pub fn play_run(
    state: &mut RunState,
    provider: &ResilientProvider,
    rng: &mut impl Rng,
    pacer: &mut dyn Pacer,
    max_turns: u32,
    on_line: &mut dyn FnMut(&str),
) -> RunStats {
    let mut turns = 0;
    let mut mark = state.battle_log.total_written();

    while !state.is_over() && turns < max_turns {
        let step = match state.status {
            RunStatus::Map => {
                let Some(target) = pick_node(&available_nodes(state), &state.player) else {
                    warn!(node = %state.current_node_id, "no reachable node, ending run");
                    break;
                };
                select_node(state, &target, provider, rng).map(|_| arrival_lines(state))
            }
            RunStatus::Combat => {
                turns += 1;
                let Some(enemy) = state.enemy.as_ref() else {
                    break;
                };
                let turn = match battle_action(&state.player, enemy, &state.bag) {
                    PlayerAction::UseMove(id) => choose_move(state, &id, rng, pacer),
                    PlayerAction::UseItem(id) => use_item(state, &id, rng, pacer),
                    PlayerAction::Flee => flee(state, rng),
                };
                turn.map(|_| Vec::new())
            }
            RunStatus::Reward => {
                let choice = state.pending_reward.as_ref().and_then(pick_reward);
                select_reward(state, choice.as_deref()).map(|_| Vec::new())
            }
            RunStatus::Rest => rest(state),
            RunStatus::Event => match state.active_event {
                Some(kind) => {
                    let choice = event_choice(kind, &state.player);
                    resolve_event(state, choice, rng)
                }
                None => break,
            },
            RunStatus::GameOver | RunStatus::Victory => break,
        };

        for line in state.battle_log.since(mark) {
            on_line(line);
        }
        mark = state.battle_log.total_written();

        match step {
            Ok(lines) => {
                for line in &lines {
                    on_line(line);
                }
            }
            Err(err) => {
                warn!(error = %err, status = state.status.as_str(), "autopilot action rejected");
                break;
            }
        }
    }

    RunStats::from_state(state, turns)
}

fn arrival_lines(state: &RunState) -> Vec<String> {
    match (state.status, state.active_event) {
        (RunStatus::Event, Some(kind)) => {
            vec![format!("{}: {}", kind.title(), kind.description())]
        }
        (RunStatus::Rest, _) => vec!["You found a quiet place to rest.".to_string()],
        _ => Vec::new(),
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let provider = ResilientProvider::offline();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = seeded_rng(config.seed.map(|s| s.wrapping_add(run_idx as u64)));
        let mut state = RunState::new(config.starter, config.run.clone(), &mut rng);

        let stats = play_run(
            &mut state,
            &provider,
            &mut rng,
            &mut NoPacing,
            config.max_turns_per_run,
            &mut |_| {},
        );
        debug!(run = run_idx, cleared = stats.cleared, floor = stats.floor_reached, "run finished");

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Floor {}, Level {}, Battles {}, {}",
                run_idx + 1,
                config.num_runs,
                stats.floor_reached,
                stats.final_level,
                stats.battles_won,
                if stats.cleared { "cleared" } else { "lost" }
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}
