//! Static game data: move database, item database and starter roster.

pub mod items;
pub mod moves;
pub mod starters;

pub use items::*;
pub use moves::*;
pub use starters::*;
