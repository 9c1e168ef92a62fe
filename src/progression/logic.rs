//! Level-up math and reward rolls.

use super::types::{ExperienceGain, LearnedMove, RewardOffer};
use crate::combat::types::{Combatant, Move};
use crate::content::items::random_reward_item;
use crate::content::moves::{create_move, REWARD_MOVE_POOL};
use crate::core::config::RunConfig;
use crate::core::constants::*;
use crate::inventory::types::{Bag, Item};
use rand::seq::SliceRandom;
use rand::Rng;

/// Adds `amount` experience and applies at most one level-up.
///
/// On reaching the threshold: level +1, exp back to 0, max HP +5, every
/// other stat +2 and HP fully restored.
pub fn award_experience(combatant: &mut Combatant, amount: u32) -> ExperienceGain {
    combatant.exp = combatant.exp.saturating_add(amount);

    let threshold = if combatant.exp_to_next == 0 {
        EXP_TO_NEXT_LEVEL
    } else {
        combatant.exp_to_next
    };

    if combatant.exp < threshold {
        return ExperienceGain {
            amount,
            leveled_up: None,
        };
    }

    level_up(combatant);
    ExperienceGain {
        amount,
        leveled_up: Some(combatant.level),
    }
}

fn level_up(combatant: &mut Combatant) {
    combatant.level += 1;
    combatant.exp = 0;
    combatant.exp_to_next = EXP_TO_NEXT_LEVEL;

    combatant.max_hp += LEVEL_UP_HP_GAIN;
    let stats = &mut combatant.stats;
    stats.hp += LEVEL_UP_HP_GAIN;
    stats.attack += LEVEL_UP_STAT_GAIN;
    stats.defense += LEVEL_UP_STAT_GAIN;
    stats.sp_attack += LEVEL_UP_STAT_GAIN;
    stats.sp_defense += LEVEL_UP_STAT_GAIN;
    stats.speed += LEVEL_UP_STAT_GAIN;

    combatant.current_hp = combatant.max_hp;
}

/// Rolls the moves (with replacement) and the optional item for a victory.
pub fn roll_reward_offer(config: &RunConfig, rng: &mut impl Rng) -> RewardOffer {
    let move_options = (0..config.reward_move_options)
        .filter_map(|_| REWARD_MOVE_POOL.choose(rng))
        .map(|key| create_move(key))
        .collect();

    let item = if rng.gen_bool(config.reward_item_chance.clamp(0.0, 1.0)) {
        random_reward_item(rng)
    } else {
        None
    };

    RewardOffer { move_options, item }
}

/// Teaches `mv`: appended while there is room, otherwise it overwrites slot 0.
pub fn learn_move(player: &mut Combatant, mv: Move) -> LearnedMove {
    if player.moves.len() < MAX_MOVES {
        player.moves.push(mv);
        LearnedMove::Appended(player.moves.len() - 1)
    } else {
        player.moves[0] = mv;
        LearnedMove::Replaced(0)
    }
}

/// Applies a chosen reward. The item, when offered, is kept regardless of
/// the move choice.
pub fn apply_reward(
    player: &mut Combatant,
    bag: &mut Bag,
    chosen_move: Option<Move>,
    item: Option<Item>,
) -> Option<LearnedMove> {
    let learned = chosen_move.map(|mv| learn_move(player, mv));
    if let Some(item) = item {
        bag.add(item);
    }
    learned
}
