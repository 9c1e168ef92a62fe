//! Move database.

use crate::combat::element::Element;
use crate::combat::types::{Move, MoveCategory, MoveEffect};
use uuid::Uuid;

/// Template row; `create_move` stamps out a fresh instance with full PP.
#[derive(Debug, Clone, Copy)]
pub struct MoveTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub element: Element,
    pub category: MoveCategory,
    pub power: u32,
    pub accuracy: u32,
    pub max_pp: u32,
    pub effect: MoveEffect,
    pub description: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn template(
    key: &'static str,
    name: &'static str,
    element: Element,
    category: MoveCategory,
    power: u32,
    accuracy: u32,
    max_pp: u32,
    effect: MoveEffect,
    description: &'static str,
) -> MoveTemplate {
    MoveTemplate {
        key,
        name,
        element,
        category,
        power,
        accuracy,
        max_pp,
        effect,
        description,
    }
}

use Element::*;
use MoveCategory::*;

#[rustfmt::skip]
pub const MOVE_DATABASE: &[MoveTemplate] = &[
    template("tackle", "Tackle", Normal, Physical, 40, 100, 35, MoveEffect::None,
        "Charges the foe with a full-body tackle."),
    template("scratch", "Scratch", Normal, Physical, 40, 100, 35, MoveEffect::None,
        "Rakes the foe with hard, sharp claws."),
    template("quickattack", "Quick Attack", Normal, Physical, 40, 100, 30, MoveEffect::None,
        "An extremely fast lunge at the foe."),
    template("bite", "Bite", Normal, Physical, 60, 100, 25, MoveEffect::None,
        "Bites the foe with sharp fangs."),
    template("ember", "Ember", Fire, Special, 40, 100, 25, MoveEffect::None,
        "A small flame is launched at the foe."),
    template("watergun", "Water Gun", Water, Special, 40, 100, 25, MoveEffect::None,
        "Squirts water to attack the foe."),
    template("vinewhip", "Vine Whip", Grass, Physical, 45, 100, 25, MoveEffect::None,
        "Strikes the foe with slender, whiplike vines."),
    template("growl", "Growl", Normal, Status, 0, 100, 40, MoveEffect::DebuffDefense,
        "An endearing cry that makes the foe lower its guard."),
    template("flamethrower", "Flamethrower", Fire, Special, 90, 100, 15, MoveEffect::None,
        "Scorches the foe with an intense blast of fire."),
    template("hydropump", "Hydro Pump", Water, Special, 110, 80, 5, MoveEffect::None,
        "Blasts the foe with a huge volume of water."),
    template("solarbeam", "Solar Beam", Grass, Special, 120, 100, 10, MoveEffect::None,
        "Gathers light, then fires it as a beam."),
    template("thunderbolt", "Thunderbolt", Electric, Special, 90, 100, 15, MoveEffect::None,
        "A strong electric blast crashes down on the foe."),
    template("psychic", "Psychic", Psychic, Special, 90, 100, 10, MoveEffect::None,
        "Hits the foe with a strong telekinetic force."),
    template("recover", "Recover", Normal, Status, 0, 100, 10, MoveEffect::Heal,
        "Regenerates cells to restore half of max HP."),
];

/// Moves a victory can offer.
pub const REWARD_MOVE_POOL: &[&str] = &[
    "flamethrower",
    "hydropump",
    "solarbeam",
    "thunderbolt",
    "psychic",
    "recover",
    "tackle",
    "ember",
    "watergun",
];

const DEFAULT_MOVE_KEY: &str = "tackle";

pub fn move_template(key: &str) -> Option<&'static MoveTemplate> {
    MOVE_DATABASE.iter().find(|t| t.key == key)
}

/// Looks a move up by its display name, case-insensitively.
pub fn move_template_by_name(name: &str) -> Option<&'static MoveTemplate> {
    let name = name.trim();
    MOVE_DATABASE
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name) || t.key.eq_ignore_ascii_case(name))
}

impl MoveTemplate {
    pub fn instantiate(&self) -> Move {
        Move {
            id: Uuid::new_v4().to_string(),
            name: self.name.to_string(),
            element: self.element,
            category: self.category,
            power: self.power,
            accuracy: self.accuracy,
            pp: self.max_pp,
            max_pp: self.max_pp,
            effect: self.effect,
            description: self.description.to_string(),
        }
    }
}

/// Fresh move with a unique id. Unknown keys yield Tackle.
pub fn create_move(key: &str) -> Move {
    move_template(key)
        .or_else(|| move_template(DEFAULT_MOVE_KEY))
        .map(MoveTemplate::instantiate)
        .unwrap_or_else(|| MOVE_DATABASE[0].instantiate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_move_known_key() {
        let m = create_move("flamethrower");
        assert_eq!(m.name, "Flamethrower");
        assert_eq!(m.element, Element::Fire);
        assert_eq!(m.power, 90);
        assert_eq!(m.pp, m.max_pp);
    }

    #[test]
    fn test_create_move_unknown_falls_back_to_tackle() {
        let m = create_move("hyperbeam");
        assert_eq!(m.name, "Tackle");
        assert_eq!(m.power, 40);
    }

    #[test]
    fn test_create_move_ids_are_unique() {
        let a = create_move("ember");
        let b = create_move("ember");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_status_moves_have_no_power() {
        for t in MOVE_DATABASE {
            if t.category == MoveCategory::Status {
                assert_eq!(t.power, 0, "{}", t.key);
                assert_ne!(t.effect, MoveEffect::None, "{}", t.key);
            } else {
                assert!(t.power > 0, "{}", t.key);
            }
        }
    }

    #[test]
    fn test_reward_pool_keys_exist() {
        for key in REWARD_MOVE_POOL {
            assert!(move_template(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            move_template_by_name("water gun").map(|t| t.key),
            Some("watergun")
        );
        assert_eq!(move_template_by_name("ember").map(|t| t.key), Some("ember"));
        assert!(move_template_by_name("Splash").is_none());
    }
}
