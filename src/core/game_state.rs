use super::config::RunConfig;
use super::constants::START_NODE_ID;
use super::encounters::EventKind;
use crate::combat::engine::BattleEngine;
use crate::combat::types::{BattleLog, Combatant};
use crate::content::starters::{starting_bag, Starter};
use crate::inventory::types::Bag;
use crate::map::generation::generate_map;
use crate::map::types::{MapGraph, MapNode};
use crate::progression::types::RewardOffer;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where the run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Map,
    Combat,
    Event,
    Rest,
    /// Enemy defeated, reward waiting to be picked
    Reward,
    GameOver,
    /// Boss defeated and reward taken
    Victory,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Map => "map",
            RunStatus::Combat => "combat",
            RunStatus::Event => "event",
            RunStatus::Rest => "rest",
            RunStatus::Reward => "reward",
            RunStatus::GameOver => "game over",
            RunStatus::Victory => "victory",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::GameOver | RunStatus::Victory)
    }
}

/// The single owned root of a run. Every operation in `game_logic` borrows
/// it mutably for its duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: String,
    pub started_at: i64,
    pub status: RunStatus,
    pub player: Combatant,
    pub bag: Bag,
    pub map: MapGraph,
    pub current_node_id: String,
    /// Present only while a battle node is active
    pub enemy: Option<Combatant>,
    pub battle: Option<BattleEngine>,
    pub battle_log: BattleLog,
    pub pending_reward: Option<RewardOffer>,
    pub active_event: Option<EventKind>,
    pub config: RunConfig,
    pub battles_won: u32,
}

impl RunState {
    /// Fresh run: new map, chosen starter, two potions, standing on Start.
    pub fn new(starter: Starter, config: RunConfig, rng: &mut impl Rng) -> Self {
        let map = generate_map(&config, rng);
        Self::with_parts(starter.create(), starting_bag(), map, config)
    }

    /// Run around an existing player, bag and map.
    pub fn with_parts(player: Combatant, bag: Bag, mut map: MapGraph, config: RunConfig) -> Self {
        let current_node_id = map
            .start()
            .map(|n| n.id.clone())
            .unwrap_or_else(|| START_NODE_ID.to_string());
        // Start is completed from the outset, so its children are open
        map.unlock_children(&current_node_id);

        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: chrono::Utc::now().timestamp(),
            status: RunStatus::Map,
            player,
            bag,
            map,
            current_node_id,
            enemy: None,
            battle: None,
            battle_log: BattleLog::new(config.battle_log_capacity),
            pending_reward: None,
            active_event: None,
            config,
            battles_won: 0,
        }
    }

    pub fn current_node(&self) -> Option<&MapNode> {
        self.map.get(&self.current_node_id)
    }

    pub fn current_floor(&self) -> u32 {
        self.current_node().map(|n| n.floor).unwrap_or(0)
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// True while a battle is waiting for the player's next action.
    pub fn can_act(&self) -> bool {
        self.status == RunStatus::Combat
            && self.enemy.is_some()
            && self
                .battle
                .as_ref()
                .is_some_and(BattleEngine::is_accepting_input)
    }
}
