//! Local tiered enemy pool used whenever the remote generator can't answer.

use super::{enemy_level, EnemyCategory, EnemyProvider, ProviderError};
use crate::combat::element::Element;
use crate::combat::types::{Combatant, Stats};
use crate::content::moves::create_move;
use crate::core::constants::*;

struct EnemyTemplate {
    name: &'static str,
    types: &'static [Element],
    /// Level 5 stats; `hp` is the base max HP
    stats: Stats,
    moves: &'static [&'static str],
}

const fn stats(hp: u32, attack: u32, defense: u32, sp_attack: u32, sp_defense: u32, speed: u32) -> Stats {
    Stats {
        hp,
        attack,
        defense,
        sp_attack,
        sp_defense,
        speed,
    }
}

struct Tier {
    /// First floor this tier covers
    min_floor: u32,
    combat: &'static [EnemyTemplate],
    elite: &'static [EnemyTemplate],
    boss: &'static [EnemyTemplate],
}

use Element::*;

#[rustfmt::skip]
const TIERS: &[Tier] = &[
    Tier {
        min_floor: 0,
        combat: &[
            EnemyTemplate { name: "Rattata", types: &[Normal], stats: stats(30, 56, 35, 25, 35, 72), moves: &["tackle", "quickattack"] },
            EnemyTemplate { name: "Pidgey", types: &[Normal, Flying], stats: stats(40, 45, 40, 35, 35, 56), moves: &["tackle", "quickattack", "growl"] },
            EnemyTemplate { name: "Oddish", types: &[Grass, Poison], stats: stats(45, 50, 55, 75, 65, 30), moves: &["vinewhip", "growl"] },
        ],
        elite: &[
            EnemyTemplate { name: "Growlithe", types: &[Fire], stats: stats(55, 70, 45, 70, 50, 60), moves: &["ember", "bite", "growl"] },
        ],
        boss: &[
            EnemyTemplate { name: "Geodude", types: &[Rock, Ground], stats: stats(40, 80, 100, 30, 30, 20), moves: &["tackle", "bite"] },
        ],
    },
    Tier {
        min_floor: 4,
        combat: &[
            EnemyTemplate { name: "Poliwag", types: &[Water], stats: stats(40, 50, 40, 40, 40, 90), moves: &["watergun", "tackle"] },
            EnemyTemplate { name: "Magnemite", types: &[Electric, Steel], stats: stats(25, 35, 70, 95, 55, 45), moves: &["thunderbolt", "tackle"] },
            EnemyTemplate { name: "Gastly", types: &[Ghost, Poison], stats: stats(30, 35, 30, 100, 35, 80), moves: &["psychic", "bite"] },
        ],
        elite: &[
            EnemyTemplate { name: "Kadabra", types: &[Psychic], stats: stats(40, 35, 30, 90, 60, 85), moves: &["psychic", "recover"] },
        ],
        boss: &[
            EnemyTemplate { name: "Arcanine", types: &[Fire], stats: stats(70, 80, 60, 80, 60, 75), moves: &["flamethrower", "bite", "quickattack"] },
        ],
    },
    Tier {
        min_floor: 8,
        combat: &[
            EnemyTemplate { name: "Haunter", types: &[Ghost, Poison], stats: stats(45, 50, 45, 85, 55, 80), moves: &["psychic", "bite"] },
            EnemyTemplate { name: "Graveler", types: &[Rock, Ground], stats: stats(55, 80, 90, 45, 45, 35), moves: &["tackle", "bite", "growl"] },
            EnemyTemplate { name: "Starmie", types: &[Water, Psychic], stats: stats(60, 60, 70, 80, 70, 90), moves: &["watergun", "psychic"] },
        ],
        elite: &[
            EnemyTemplate { name: "Gengar", types: &[Ghost, Poison], stats: stats(60, 55, 50, 95, 60, 90), moves: &["psychic", "bite", "recover"] },
        ],
        boss: &[
            EnemyTemplate { name: "Mewtwo", types: &[Psychic], stats: stats(100, 70, 60, 90, 60, 80), moves: &["psychic", "recover", "thunderbolt", "flamethrower"] },
        ],
    },
];

/// Deterministic, infallible enemy source keyed by floor tier and category.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProvider;

impl FallbackProvider {
    pub fn generate(&self, floor: u32, category: EnemyCategory) -> Combatant {
        let template = pick_template(floor, category);
        build(template, floor, category)
    }
}

impl EnemyProvider for FallbackProvider {
    fn provide(&self, floor: u32, category: EnemyCategory) -> Result<Combatant, ProviderError> {
        Ok(self.generate(floor, category))
    }
}

fn tier_for(floor: u32) -> &'static Tier {
    TIERS
        .iter()
        .rev()
        .find(|t| floor >= t.min_floor)
        .unwrap_or(&TIERS[0])
}

fn pick_template(floor: u32, category: EnemyCategory) -> &'static EnemyTemplate {
    let tier = tier_for(floor);
    let pool = match category {
        EnemyCategory::Combat => tier.combat,
        EnemyCategory::Elite => tier.elite,
        EnemyCategory::Boss => tier.boss,
    };
    &pool[floor as usize % pool.len()]
}

fn build(template: &EnemyTemplate, floor: u32, category: EnemyCategory) -> Combatant {
    let level = enemy_level(floor, category);
    let growth = level.saturating_sub(ENEMY_BASE_LEVEL) * ENEMY_STAT_GAIN_PER_LEVEL;

    let (stat_mult, hp_mult) = match category {
        EnemyCategory::Combat => (1.0, 1.0),
        EnemyCategory::Elite => ELITE_MULTIPLIERS,
        EnemyCategory::Boss => BOSS_MULTIPLIERS,
    };
    let scale = |base: u32| ((base + growth) as f64 * stat_mult).floor() as u32;
    let hp = ((template.stats.hp + ENEMY_HP_PER_FLOOR * floor) as f64 * hp_mult).floor() as u32;

    let stats = Stats {
        hp,
        attack: scale(template.stats.attack),
        defense: scale(template.stats.defense),
        sp_attack: scale(template.stats.sp_attack),
        sp_defense: scale(template.stats.sp_defense),
        speed: scale(template.stats.speed),
    };

    let moves = template.moves.iter().map(|k| create_move(k)).collect();
    let name = match category {
        EnemyCategory::Combat => template.name.to_string(),
        EnemyCategory::Elite => format!("Elite {}", template.name),
        EnemyCategory::Boss => format!("Boss {}", template.name),
    };

    Combatant::new(
        format!("fallback-{}-{}", category.as_str(), floor),
        name,
        level,
        template.types.to_vec(),
        stats,
        moves,
        false,
    )
}
