//! Item effect application.

use super::types::{Item, ItemEffect};
use crate::combat::types::Combatant;

/// Applies `item` to `target` and returns the log lines describing it.
///
/// The caller owns consumption; an item with no effect is still spent.
pub fn apply_item(target: &mut Combatant, item: &Item) -> Vec<String> {
    let mut lines = vec![format!("You used {}!", item.name)];

    match item.effect {
        ItemEffect::HealHp => {
            if target.is_fainted() {
                lines.push("It had no effect.".to_string());
            } else {
                let healed = target.heal(item.magnitude.max(0.0) as u32);
                lines.push(format!("{} recovered {} HP!", target.name, healed));
            }
        }
        ItemEffect::HealPp => {
            let amount = item.magnitude.max(0.0) as u32;
            let restored: u32 = target.moves.iter_mut().map(|m| m.restore_pp(amount)).sum();
            if restored == 0 {
                lines.push("It had no effect.".to_string());
            } else {
                lines.push(format!("{}'s moves regained PP!", target.name));
            }
        }
        ItemEffect::BuffAttack => {
            target.stats.scale_offense(item.magnitude);
            lines.push(format!("{}'s attack rose!", target.name));
        }
        ItemEffect::BuffDefense => {
            target.stats.scale_defense(item.magnitude);
            lines.push(format!("{}'s defense rose!", target.name));
        }
        ItemEffect::Revive => {
            if target.is_fainted() {
                let hp = ((target.max_hp as f64 * item.magnitude).floor() as u32).max(1);
                target.heal(hp);
                lines.push(format!("{} was revived!", target.name));
            } else {
                lines.push("It had no effect.".to_string());
            }
        }
    }

    lines
}
