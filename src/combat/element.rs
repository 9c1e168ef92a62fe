//! Element types and the attacker-versus-defender effectiveness table.

use serde::{Deserialize, Serialize};

/// The 18 element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Steel,
    Dark,
    Fairy,
}

impl Element {
    pub const ALL: [Element; 18] = [
        Element::Normal,
        Element::Fire,
        Element::Water,
        Element::Grass,
        Element::Electric,
        Element::Ice,
        Element::Fighting,
        Element::Poison,
        Element::Ground,
        Element::Flying,
        Element::Psychic,
        Element::Bug,
        Element::Rock,
        Element::Ghost,
        Element::Dragon,
        Element::Steel,
        Element::Dark,
        Element::Fairy,
    ];

    /// Multiplier of an attack of this element against a single defending element.
    ///
    /// Only the matchups the move and enemy pools rely on are charted; every
    /// other pairing is neutral.
    pub fn multiplier_against(self, defender: Element) -> f64 {
        use Element::*;
        match (self, defender) {
            (Normal, Rock) => 0.5,
            (Normal, Ghost) => 0.0,

            (Fire, Fire | Water | Rock) => 0.5,
            (Fire, Grass) => 2.0,

            (Water, Fire) => 2.0,
            (Water, Water | Grass) => 0.5,

            (Grass, Water) => 2.0,
            (Grass, Fire | Grass) => 0.5,

            (Electric, Water) => 2.0,
            (Electric, Grass | Electric) => 0.5,
            (Electric, Rock) => 0.0,

            (Psychic, Psychic) => 0.5,

            (Rock, Fire) => 2.0,
            (Rock, Normal) => 0.5,

            (Ghost, Normal) => 0.0,
            (Ghost, Psychic | Ghost) => 2.0,

            _ => 1.0,
        }
    }

    /// Case-insensitive parse of an element name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Normal => "Normal",
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Grass => "Grass",
            Element::Electric => "Electric",
            Element::Ice => "Ice",
            Element::Fighting => "Fighting",
            Element::Poison => "Poison",
            Element::Ground => "Ground",
            Element::Flying => "Flying",
            Element::Psychic => "Psychic",
            Element::Bug => "Bug",
            Element::Rock => "Rock",
            Element::Ghost => "Ghost",
            Element::Dragon => "Dragon",
            Element::Steel => "Steel",
            Element::Dark => "Dark",
            Element::Fairy => "Fairy",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product of the per-type multipliers of `move_type` against every defending type.
pub fn effectiveness(move_type: Element, defender_types: &[Element]) -> f64 {
    defender_types
        .iter()
        .map(|t| move_type.multiplier_against(*t))
        .product()
}

/// How an aggregate multiplier reads in the battle log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effectiveness {
    SuperEffective,
    Neutral,
    NotVeryEffective,
    NoEffect,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else {
            Effectiveness::Neutral
        }
    }

    /// Flavor line for the battle log; neutral hits get none.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Effectiveness::SuperEffective => Some("It's super effective!"),
            Effectiveness::NotVeryEffective => Some("It's not very effective..."),
            Effectiveness::NoEffect => Some("It doesn't seem to have any effect..."),
            Effectiveness::Neutral => None,
        }
    }
}
