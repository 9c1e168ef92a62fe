//! Experience, level-ups and post-battle rewards.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
