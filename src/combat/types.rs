use super::element::Element;
use crate::core::constants::{BATTLE_LOG_CAPACITY, EXP_TO_NEXT_LEVEL, MAX_MOVES};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl Stats {
    /// Multiplies attack and sp_attack, flooring the result.
    pub fn scale_offense(&mut self, factor: f64) {
        self.attack = scale_stat(self.attack, factor);
        self.sp_attack = scale_stat(self.sp_attack, factor);
    }

    /// Multiplies defense and sp_defense, flooring the result.
    pub fn scale_defense(&mut self, factor: f64) {
        self.defense = scale_stat(self.defense, factor);
        self.sp_defense = scale_stat(self.sp_defense, factor);
    }
}

fn scale_stat(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).floor().max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "physical" => Some(MoveCategory::Physical),
            "special" => Some(MoveCategory::Special),
            "status" => Some(MoveCategory::Status),
            _ => None,
        }
    }
}

/// Tagged side effect of a status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveEffect {
    #[default]
    None,
    Heal,
    BuffAttack,
    BuffDefense,
    DebuffDefense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub category: MoveCategory,
    /// Zero for status moves
    pub power: u32,
    /// 0-100
    pub accuracy: u32,
    pub pp: u32,
    pub max_pp: u32,
    #[serde(default)]
    pub effect: MoveEffect,
    #[serde(default)]
    pub description: String,
}

impl Move {
    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Spends one PP. Returns false (and changes nothing) when none is left.
    pub fn spend_pp(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }

    pub fn restore_pp(&mut self, amount: u32) -> u32 {
        let before = self.pp;
        self.pp = self.pp.saturating_add(amount).min(self.max_pp);
        self.pp - before
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub level: u32,
    /// Ordered, 1-18 entries
    pub types: Vec<Element>,
    pub stats: Stats,
    pub current_hp: u32,
    pub max_hp: u32,
    /// At most four
    pub moves: Vec<Move>,
    pub exp: u32,
    pub exp_to_next: u32,
    pub is_player: bool,
}

impl Combatant {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u32,
        types: Vec<Element>,
        stats: Stats,
        mut moves: Vec<Move>,
        is_player: bool,
    ) -> Self {
        moves.truncate(MAX_MOVES);
        let max_hp = stats.hp.max(1);
        Self {
            id: id.into(),
            name: name.into(),
            level: level.max(1),
            types,
            stats,
            current_hp: max_hp,
            max_hp,
            moves,
            exp: 0,
            exp_to_next: if is_player { EXP_TO_NEXT_LEVEL } else { 0 },
            is_player,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, element: Element) -> bool {
        self.types.contains(&element)
    }

    /// HP floors at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.current_hp - before
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    pub fn find_move(&self, move_id: &str) -> Option<usize> {
        self.moves.iter().position(|m| m.id == move_id)
    }

    pub fn usable_moves(&self) -> impl Iterator<Item = (usize, &Move)> {
        self.moves.iter().enumerate().filter(|(_, m)| m.has_pp())
    }

    pub fn restore_all_pp(&mut self) {
        for m in &mut self.moves {
            m.pp = m.max_pp;
        }
    }
}

/// Bounded, append-only battle log.
///
/// Old lines fall off the front once `capacity` is reached. `total_written`
/// keeps counting across clears so readers can ask for what is new.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: VecDeque<String>,
    capacity: usize,
    total_written: u64,
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new(BATTLE_LOG_CAPACITY)
    }
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total_written: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
        self.total_written += 1;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Lines written after `mark` (a previous `total_written`) that are still retained.
    pub fn since(&self, mark: u64) -> Vec<&str> {
        let fresh = self.total_written.saturating_sub(mark) as usize;
        let skip = self.entries.len().saturating_sub(fresh);
        self.entries.iter().skip(skip).map(String::as_str).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.contains(needle))
    }
}
