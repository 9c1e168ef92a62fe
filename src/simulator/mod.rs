//! Monte Carlo balance simulator.
//!
//! Plays many seeded runs with a fixed autopilot to measure:
//! - How often the tower is cleared
//! - Which floors end runs
//! - How far players level along the way

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::{battle_action, event_choice, pick_node, pick_reward};
pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{play_run, run_simulation, RunStats};
