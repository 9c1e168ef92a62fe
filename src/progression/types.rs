use crate::combat::types::Move;
use crate::inventory::types::Item;
use serde::{Deserialize, Serialize};

/// What a victory lets the player pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardOffer {
    /// Drawn with replacement, so duplicates are possible
    pub move_options: Vec<Move>,
    /// Merged into the bag whatever move is picked
    pub item: Option<Item>,
}

/// Outcome of awarding experience once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceGain {
    pub amount: u32,
    /// New level when the threshold was crossed
    pub leveled_up: Option<u32>,
}

/// Which move slot a learned move went into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearnedMove {
    Appended(usize),
    Replaced(usize),
}
