//! Run state, configuration and the operations that drive a run.

pub mod config;
pub mod constants;
pub mod encounters;
pub mod errors;
pub mod game_logic;
pub mod game_state;
pub mod rng;

pub use config::{ProviderConfig, RunConfig};
pub use errors::ActionError;
pub use game_state::{RunState, RunStatus};
