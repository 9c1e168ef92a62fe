//! Stackable consumables and what they do to a combatant.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
