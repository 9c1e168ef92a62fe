//! Map graph data structures.

use serde::{Deserialize, Serialize};

/// Encounter kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Floor 0, where the run begins
    Start,
    Combat,
    /// Tougher fight on a fixed floor
    Elite,
    /// One of the random events, no fight
    Event,
    /// Heal and restore PP
    Rest,
    /// Always the last floor
    Boss,
}

impl NodeCategory {
    /// Returns the display character for this node kind
    pub fn icon(&self) -> char {
        match self {
            NodeCategory::Start => 'S',
            NodeCategory::Combat => 'C',
            NodeCategory::Elite => 'E',
            NodeCategory::Event => '?',
            NodeCategory::Rest => 'R',
            NodeCategory::Boss => 'B',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub category: NodeCategory,
    /// Depth from the start node
    pub floor: u32,
    /// Position within the floor
    pub lane: u32,
    /// Ids of reachable nodes on the next floor
    pub children: Vec<String>,
    pub completed: bool,
    pub locked: bool,
}

/// Nodes in floor-then-lane order. Only the `completed` and `locked` flags
/// change after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapGraph {
    nodes: Vec<MapNode>,
}

impl MapGraph {
    pub(crate) fn from_nodes(nodes: Vec<MapNode>) -> Self {
        Self { nodes }
    }

    pub fn get(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut MapNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes on `floor` in lane order.
    pub fn floor(&self, floor: u32) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter().filter(move |n| n.floor == floor)
    }

    pub fn floor_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.floor + 1).max().unwrap_or(0)
    }

    pub fn start(&self) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.category == NodeCategory::Start)
    }

    /// Returns false for an unknown id.
    pub fn mark_completed(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.completed = true;
                true
            }
            None => false,
        }
    }

    /// Unlocks every child of `id`.
    pub fn unlock_children(&mut self, id: &str) {
        let children = match self.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in &children {
            if let Some(node) = self.get_mut(child) {
                node.locked = false;
            }
        }
    }
}
