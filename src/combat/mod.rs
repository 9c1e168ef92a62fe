//! Battle engine: type chart, damage, turn state machine and pacing.

pub mod damage;
pub mod element;
pub mod engine;
pub mod pacing;
pub mod types;

pub use element::Element;
pub use engine::{BattleEngine, BattleOutcome, BattlePhase, PlayerAction, TurnProgress};
pub use types::{BattleLog, Combatant, Move, MoveCategory, MoveEffect, Stats};
