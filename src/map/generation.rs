//! Procedural map generation.

use super::types::{MapGraph, MapNode, NodeCategory};
use crate::core::config::RunConfig;
use crate::core::constants::START_NODE_ID;
use rand::Rng;

/// Builds the run's graph from `config` and `rng`.
///
/// Floor 0 is a single completed, unlocked Start node. The last floor is
/// Boss, the elite floor is Elite, floors on the Event/Rest cycle split
/// between those two and everything else is Event or Combat. Each node links
/// to a random non-empty subset of the next floor.
pub fn generate_map(config: &RunConfig, rng: &mut impl Rng) -> MapGraph {
    let floor_count = config.floor_count.max(1);

    let mut nodes = vec![MapNode {
        id: START_NODE_ID.to_string(),
        category: NodeCategory::Start,
        floor: 0,
        lane: 0,
        children: Vec::new(),
        completed: true,
        locked: false,
    }];
    let mut previous_floor: Vec<usize> = vec![0];

    for floor in 1..floor_count {
        let width = config.width_of(floor);
        let mut current_floor = Vec::with_capacity(width as usize);

        for lane in 0..width {
            let category = roll_category(config, floor, floor_count, rng);
            current_floor.push(nodes.len());
            nodes.push(MapNode {
                id: node_id(floor, lane),
                category,
                floor,
                lane,
                children: Vec::new(),
                completed: false,
                locked: true,
            });
        }

        for &parent in &previous_floor {
            let mut children: Vec<String> = current_floor
                .iter()
                .filter(|_| rng.gen_bool(config.edge_inclusion_chance.clamp(0.0, 1.0)))
                .map(|&i| nodes[i].id.clone())
                .collect();
            if children.is_empty() {
                children.push(nodes[current_floor[0]].id.clone());
            }
            nodes[parent].children = children;
        }

        previous_floor = current_floor;
    }

    MapGraph::from_nodes(nodes)
}

pub fn node_id(floor: u32, lane: u32) -> String {
    format!("node-{floor}-{lane}")
}

fn roll_category(
    config: &RunConfig,
    floor: u32,
    floor_count: u32,
    rng: &mut impl Rng,
) -> NodeCategory {
    if floor == floor_count - 1 {
        NodeCategory::Boss
    } else if floor == config.elite_floor {
        NodeCategory::Elite
    } else if config.event_rest_modulus > 0 && floor % config.event_rest_modulus == 0 {
        if rng.gen_bool(config.event_over_rest_chance.clamp(0.0, 1.0)) {
            NodeCategory::Event
        } else {
            NodeCategory::Rest
        }
    } else if rng.gen_bool(config.event_over_combat_chance.clamp(0.0, 1.0)) {
        NodeCategory::Event
    } else {
        NodeCategory::Combat
    }
}
