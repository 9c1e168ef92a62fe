//! Bag and item data structures.

use serde::{Deserialize, Deserializer, Serialize};

/// What an item does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restores a flat amount of HP
    HealHp,
    /// Restores a flat amount of PP to every move
    HealPp,
    /// Multiplies attack and sp_attack for the rest of the battle
    BuffAttack,
    /// Multiplies defense and sp_defense for the rest of the battle
    BuffDefense,
    /// Brings a fainted combatant back with a fraction of max HP
    Revive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub effect: ItemEffect,
    /// Flat amount for heals, multiplier for buffs, fraction of max HP for Revive
    pub magnitude: f64,
    pub count: u32,
}

/// Stacks of items, merged by name. A stack never sits in the bag at count 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    #[serde(deserialize_with = "non_empty_stacks")]
    items: Vec<Item>,
}

/// Snapshots may carry empty stacks; they are dropped on load.
fn non_empty_stacks<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut items = Vec::<Item>::deserialize(deserializer)?;
    items.retain(|i| i.count > 0);
    Ok(items)
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all stacks.
    pub fn total_count(&self) -> u32 {
        self.items.iter().map(|i| i.count).sum()
    }

    /// Merges into an existing stack with the same name, else appends.
    /// Empty stacks are ignored.
    pub fn add(&mut self, item: Item) {
        if item.count == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.name == item.name) {
            Some(stack) => stack.count += item.count,
            None => self.items.push(item),
        }
    }

    /// Takes one unit of the stack with `item_id`, dropping the stack at zero.
    /// Returns a single-unit copy of what was taken.
    pub fn consume(&mut self, item_id: &str) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == item_id)?;
        let stack = &mut self.items[index];
        if stack.count == 0 {
            self.items.remove(index);
            return None;
        }
        stack.count -= 1;
        let taken = Item {
            count: 1,
            ..stack.clone()
        };
        if stack.count == 0 {
            self.items.remove(index);
        }
        Some(taken)
    }
}
