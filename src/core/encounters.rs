//! Non-combat nodes: rest sites and random events.

use super::constants::*;
use crate::combat::types::Combatant;
use crate::content::items::random_item;
use crate::inventory::types::Bag;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Drink for a full heal
    MysteriousFountain,
    /// Open for a random item
    LostBackpack,
    /// Trade HP for attack
    StrangeStatue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventChoice {
    Accept,
    Leave,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::MysteriousFountain,
        EventKind::LostBackpack,
        EventKind::StrangeStatue,
    ];

    pub fn roll(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn title(&self) -> &'static str {
        match self {
            EventKind::MysteriousFountain => "Mysterious Fountain",
            EventKind::LostBackpack => "Lost Backpack",
            EventKind::StrangeStatue => "Strange Statue",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventKind::MysteriousFountain => "A fountain shimmers with a soft light.",
            EventKind::LostBackpack => "A trainer's backpack lies forgotten on the ground.",
            EventKind::StrangeStatue => "An ancient statue seems to want an offering.",
        }
    }
}

/// Applies the chosen outcome and returns what happened.
pub fn resolve_event(
    kind: EventKind,
    choice: EventChoice,
    player: &mut Combatant,
    bag: &mut Bag,
    rng: &mut impl Rng,
) -> Vec<String> {
    if choice == EventChoice::Leave {
        return vec!["You moved on.".to_string()];
    }

    match kind {
        EventKind::MysteriousFountain => {
            player.current_hp = player.max_hp;
            vec![format!("{} was fully healed!", player.name)]
        }
        EventKind::LostBackpack => match random_item(rng) {
            Some(item) => {
                let line = format!("Found a {}!", item.name);
                bag.add(item);
                vec![line]
            }
            None => vec!["The backpack was empty.".to_string()],
        },
        EventKind::StrangeStatue => {
            player.current_hp = player.current_hp.saturating_sub(STATUE_HP_COST).max(1);
            player.stats.attack += STATUE_ATTACK_GAIN;
            player.stats.sp_attack += STATUE_ATTACK_GAIN;
            vec![format!("{} feels stronger, but hurt.", player.name)]
        }
    }
}

/// Half of max HP back and every move's PP refilled.
pub fn rest(player: &mut Combatant) -> Vec<String> {
    let amount = (player.max_hp as f64 * REST_HEAL_FRACTION).floor() as u32;
    let healed = player.heal(amount);
    player.restore_all_pp();
    vec![format!(
        "{} rested and recovered {} HP. PP fully restored.",
        player.name, healed
    )]
}
