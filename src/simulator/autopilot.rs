//! Fixed decision policy used to play runs without a human.

use crate::combat::damage::expected_damage;
use crate::combat::engine::PlayerAction;
use crate::combat::types::{Combatant, MoveEffect};
use crate::core::constants::STATUE_HP_COST;
use crate::core::encounters::{EventChoice, EventKind};
use crate::inventory::types::{Bag, ItemEffect};
use crate::map::types::{MapNode, NodeCategory};
use crate::progression::types::RewardOffer;

const POTION_THRESHOLD: f64 = 0.3;
const RECOVER_THRESHOLD: f64 = 0.4;
const SEEK_REST_THRESHOLD: f64 = 0.5;

/// Picks the player's action for the coming turn.
///
/// Heals with the strongest HP item under 30% HP, uses a healing move under
/// 40%, otherwise attacks with the move that is expected to hurt most. With
/// every move out of PP it drinks an ether if it has one and flees if not.
pub fn battle_action(player: &Combatant, enemy: &Combatant, bag: &Bag) -> PlayerAction {
    let hp = player.hp_fraction();

    if hp < POTION_THRESHOLD {
        let best_heal = bag
            .iter()
            .filter(|i| i.effect == ItemEffect::HealHp && i.count > 0)
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
        if let Some(item) = best_heal {
            return PlayerAction::UseItem(item.id.clone());
        }
    }

    if hp < RECOVER_THRESHOLD {
        if let Some((_, mv)) = player
            .usable_moves()
            .find(|(_, m)| m.effect == MoveEffect::Heal)
        {
            return PlayerAction::UseMove(mv.id.clone());
        }
    }

    let best = player
        .usable_moves()
        .map(|(_, m)| (m, expected_damage(player, enemy, m)))
        .max_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((mv, _)) = best {
        return PlayerAction::UseMove(mv.id.clone());
    }

    match bag.iter().find(|i| i.effect == ItemEffect::HealPp) {
        Some(ether) => PlayerAction::UseItem(ether.id.clone()),
        None => PlayerAction::Flee,
    }
}

/// Chooses the next node: a Rest when hurt, then Events, then fights.
pub fn pick_node(nodes: &[&MapNode], player: &Combatant) -> Option<String> {
    let hurt = player.hp_fraction() < SEEK_REST_THRESHOLD;
    nodes
        .iter()
        .max_by_key(|n| match n.category {
            NodeCategory::Rest if hurt => 3,
            NodeCategory::Event => 2,
            NodeCategory::Rest => 1,
            _ => 0,
        })
        .map(|n| n.id.clone())
}

/// Always learns the offered move with the highest power.
pub fn pick_reward(offer: &RewardOffer) -> Option<String> {
    offer
        .move_options
        .iter()
        .max_by_key(|m| m.power)
        .map(|m| m.id.clone())
}

/// Takes every event except a statue offering that would leave the player
/// nearly fainted.
pub fn event_choice(kind: EventKind, player: &Combatant) -> EventChoice {
    match kind {
        EventKind::StrangeStatue if player.current_hp <= STATUE_HP_COST * 2 => EventChoice::Leave,
        _ => EventChoice::Accept,
    }
}
