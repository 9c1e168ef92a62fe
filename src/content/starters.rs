//! Starter roster.

use super::items::create_item;
use super::moves::create_move;
use crate::combat::element::Element;
use crate::combat::types::{Combatant, Stats};
use crate::core::constants::STARTING_POTIONS;
use crate::inventory::types::Bag;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Starter {
    Fire,
    Water,
    Grass,
}

impl Starter {
    pub const ALL: [Starter; 3] = [Starter::Fire, Starter::Water, Starter::Grass];

    pub fn name(self) -> &'static str {
        match self {
            Starter::Fire => "Charmander",
            Starter::Water => "Squirtle",
            Starter::Grass => "Bulbasaur",
        }
    }

    pub fn element(self) -> Element {
        match self {
            Starter::Fire => Element::Fire,
            Starter::Water => Element::Water,
            Starter::Grass => Element::Grass,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|s| {
            s.name().eq_ignore_ascii_case(name) || s.element().as_str().eq_ignore_ascii_case(name)
        })
    }

    fn base_stats(self) -> Stats {
        match self {
            Starter::Fire => Stats {
                hp: 39,
                attack: 52,
                defense: 43,
                sp_attack: 60,
                sp_defense: 50,
                speed: 65,
            },
            Starter::Water => Stats {
                hp: 44,
                attack: 48,
                defense: 65,
                sp_attack: 50,
                sp_defense: 64,
                speed: 43,
            },
            Starter::Grass => Stats {
                hp: 45,
                attack: 49,
                defense: 49,
                sp_attack: 65,
                sp_defense: 65,
                speed: 45,
            },
        }
    }

    fn move_keys(self) -> [&'static str; 3] {
        match self {
            Starter::Fire => ["scratch", "ember", "growl"],
            Starter::Water => ["tackle", "watergun", "growl"],
            Starter::Grass => ["tackle", "vinewhip", "growl"],
        }
    }

    /// Level 5 player combatant at full HP.
    pub fn create(self) -> Combatant {
        let moves = self.move_keys().iter().map(|k| create_move(k)).collect();
        Combatant::new(
            Uuid::new_v4().to_string(),
            self.name(),
            5,
            vec![self.element()],
            self.base_stats(),
            moves,
            true,
        )
    }
}

/// The bag a new run starts with.
pub fn starting_bag() -> Bag {
    let mut bag = Bag::new();
    if let Some(mut potion) = create_item("potion") {
        potion.count = STARTING_POTIONS;
        bag.add(potion);
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_starter() {
        let p = Starter::Fire.create();
        assert_eq!(p.level, 5);
        assert_eq!(p.max_hp, 39);
        assert_eq!(p.current_hp, 39);
        assert_eq!(p.exp, 0);
        assert_eq!(p.exp_to_next, 100);
        assert!(p.is_player);
        let names: Vec<&str> = p.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Scratch", "Ember", "Growl"]);
    }

    #[test]
    fn test_every_starter_is_single_typed_with_three_moves() {
        for starter in Starter::ALL {
            let p = starter.create();
            assert_eq!(p.types, vec![starter.element()]);
            assert_eq!(p.moves.len(), 3);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Starter::from_name("fire"), Some(Starter::Fire));
        assert_eq!(Starter::from_name("Bulbasaur"), Some(Starter::Grass));
        assert_eq!(Starter::from_name("Pikachu"), None);
    }

    #[test]
    fn test_starting_bag_has_two_potions() {
        let bag = starting_bag();
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.find_by_name("Potion").map(|i| i.count), Some(2));
    }
}
