//! Item database.

use crate::inventory::types::{Item, ItemEffect};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct ItemTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub effect: ItemEffect,
    pub magnitude: f64,
    pub description: &'static str,
}

pub const ITEM_DATABASE: &[ItemTemplate] = &[
    ItemTemplate {
        key: "potion",
        name: "Potion",
        effect: ItemEffect::HealHp,
        magnitude: 20.0,
        description: "Restores 20 HP.",
    },
    ItemTemplate {
        key: "superpotion",
        name: "Super Potion",
        effect: ItemEffect::HealHp,
        magnitude: 50.0,
        description: "Restores 50 HP.",
    },
    ItemTemplate {
        key: "ether",
        name: "Ether",
        effect: ItemEffect::HealPp,
        magnitude: 10.0,
        description: "Restores 10 PP to every move.",
    },
    ItemTemplate {
        key: "xattack",
        name: "X Attack",
        effect: ItemEffect::BuffAttack,
        magnitude: 1.5,
        description: "Raises attack for the rest of the battle.",
    },
    ItemTemplate {
        key: "xdefend",
        name: "X Defend",
        effect: ItemEffect::BuffDefense,
        magnitude: 1.5,
        description: "Raises defense for the rest of the battle.",
    },
    ItemTemplate {
        key: "revive",
        name: "Revive",
        effect: ItemEffect::Revive,
        magnitude: 0.5,
        description: "Revives a fainted combatant with half its max HP.",
    },
];

/// Items a victory can offer.
pub const REWARD_ITEM_POOL: &[&str] = &["potion", "superpotion", "ether", "xattack", "xdefend"];

pub fn item_template(key: &str) -> Option<&'static ItemTemplate> {
    ITEM_DATABASE.iter().find(|t| t.key == key)
}

impl ItemTemplate {
    pub fn instantiate(&self, count: u32) -> Item {
        Item {
            id: Uuid::new_v4().to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            effect: self.effect,
            magnitude: self.magnitude,
            count,
        }
    }
}

/// Single-unit stack of `key`, or None for an unknown key.
pub fn create_item(key: &str) -> Option<Item> {
    item_template(key).map(|t| t.instantiate(1))
}

/// Draw from the reward pool.
pub fn random_reward_item(rng: &mut impl Rng) -> Option<Item> {
    REWARD_ITEM_POOL.choose(rng).and_then(|key| create_item(key))
}

/// Draw from the whole database.
pub fn random_item(rng: &mut impl Rng) -> Option<Item> {
    ITEM_DATABASE.choose(rng).map(|t| t.instantiate(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_create_item() {
        let potion = create_item("potion");
        assert_eq!(potion.as_ref().map(|i| i.magnitude), Some(20.0));
        assert_eq!(potion.map(|i| i.count), Some(1));
        assert!(create_item("masterball").is_none());
    }

    #[test]
    fn test_reward_pool_excludes_revive() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..200 {
            let item = random_reward_item(&mut rng);
            assert!(item.is_some());
            assert_ne!(item.map(|i| i.effect), Some(ItemEffect::Revive));
        }
    }

    #[test]
    fn test_reward_pool_keys_exist() {
        for key in REWARD_ITEM_POOL {
            assert!(item_template(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_random_item_covers_database() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            if let Some(item) = random_item(&mut rng) {
                seen.insert(item.name);
            }
        }
        assert_eq!(seen.len(), ITEM_DATABASE.len());
    }
}
