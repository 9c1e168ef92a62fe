//! Damage model: level/power/stat base formula, same-type bonus, type
//! effectiveness and random variance.

use super::element::effectiveness;
use super::types::{Combatant, Move, MoveCategory};
use crate::core::constants::*;
use rand::Rng;

/// Result of one damage roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub damage: u32,
    /// Aggregate type multiplier. Zero for status moves, where it is a
    /// sentinel and not an immunity.
    pub multiplier: f64,
}

impl DamageRoll {
    pub const NONE: DamageRoll = DamageRoll {
        damage: 0,
        multiplier: 0.0,
    };
}

/// Unmodified formula value before any multipliers. Defense is clamped to 1.
pub fn base_damage(level: u32, power: u32, attack: u32, defense: u32) -> f64 {
    let level = level as f64;
    let defense = defense.max(MIN_DEFENSE_STAT) as f64;
    ((2.0 * level / 5.0 + 2.0) * power as f64 * attack as f64 / defense) / 50.0 + 2.0
}

/// Attack and defense stats the move category reads.
fn stat_pair(attacker: &Combatant, defender: &Combatant, category: MoveCategory) -> (u32, u32) {
    match category {
        MoveCategory::Special => (attacker.stats.sp_attack, defender.stats.sp_defense),
        _ => (attacker.stats.attack, defender.stats.defense),
    }
}

/// Damage with an explicit variance factor, for callers that fix the roll.
pub fn calculate_damage_with_variance(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    variance: f64,
) -> DamageRoll {
    if mv.category == MoveCategory::Status {
        return DamageRoll::NONE;
    }

    let (attack, defense) = stat_pair(attacker, defender, mv.category);
    let mut damage = base_damage(attacker.level, mv.power, attack, defense);

    if attacker.has_type(mv.element) {
        damage *= STAB_MULTIPLIER;
    }

    let multiplier = effectiveness(mv.element, &defender.types);
    damage *= multiplier;
    damage *= variance;

    DamageRoll {
        damage: damage.floor().max(0.0) as u32,
        multiplier,
    }
}

/// Damage with variance drawn uniformly from [0.85, 1.0).
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    rng: &mut impl Rng,
) -> DamageRoll {
    if mv.category == MoveCategory::Status {
        return DamageRoll::NONE;
    }
    let variance = rng.gen_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
    calculate_damage_with_variance(attacker, defender, mv, variance)
}

/// Mean damage over the variance range, used by the autopilot to rank moves.
pub fn expected_damage(attacker: &Combatant, defender: &Combatant, mv: &Move) -> f64 {
    if mv.category == MoveCategory::Status {
        return 0.0;
    }
    let (attack, defense) = stat_pair(attacker, defender, mv.category);
    let stab = if attacker.has_type(mv.element) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let mid = (DAMAGE_VARIANCE_MIN + DAMAGE_VARIANCE_MAX) / 2.0;
    base_damage(attacker.level, mv.power, attack, defense)
        * stab
        * effectiveness(mv.element, &defender.types)
        * mid
}
