//! Run and enemy-provider configuration.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const ENDPOINT_ENV: &str = "BEAST_TOWER_ENEMY_ENDPOINT";
pub const API_KEY_ENV: &str = "BEAST_TOWER_API_KEY";
pub const TIMEOUT_ENV: &str = "BEAST_TOWER_PROVIDER_TIMEOUT_SECS";

/// Shape and reward tuning for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of floors including the Start floor and the Boss floor
    pub floor_count: u32,

    /// Node count per floor index; floors past the end hold a single node
    pub floor_widths: Vec<u32>,

    /// Floor that is always Elite (unless it is also the last floor)
    pub elite_floor: u32,

    /// Floors divisible by this cycle between Event and Rest
    pub event_rest_modulus: u32,

    /// Chance that an Event/Rest floor node becomes an Event
    pub event_over_rest_chance: f64,

    /// Chance that an ordinary floor node becomes an Event instead of Combat
    pub event_over_combat_chance: f64,

    /// Independent inclusion chance of each candidate child edge
    pub edge_inclusion_chance: f64,

    /// Move options offered after a victory
    pub reward_move_options: usize,

    /// Chance that a victory also offers an item
    pub reward_item_chance: f64,

    /// Maximum retained battle log lines
    pub battle_log_capacity: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            floor_count: DEFAULT_FLOOR_COUNT,
            floor_widths: DEFAULT_FLOOR_WIDTHS.to_vec(),
            elite_floor: ELITE_FLOOR,
            event_rest_modulus: EVENT_REST_FLOOR_MODULUS,
            event_over_rest_chance: EVENT_OVER_REST_CHANCE,
            event_over_combat_chance: EVENT_OVER_COMBAT_CHANCE,
            edge_inclusion_chance: EDGE_INCLUSION_CHANCE,
            reward_move_options: REWARD_MOVE_OPTIONS,
            reward_item_chance: REWARD_ITEM_CHANCE,
            battle_log_capacity: BATTLE_LOG_CAPACITY,
        }
    }
}

impl RunConfig {
    /// Standard tower with a different height.
    pub fn with_floors(floor_count: u32) -> Self {
        Self {
            floor_count,
            ..Default::default()
        }
    }

    /// Tower where every ordinary floor is a fight, for combat-heavy balance runs.
    pub fn gauntlet(floor_count: u32) -> Self {
        Self {
            floor_count,
            event_over_combat_chance: 0.0,
            ..Default::default()
        }
    }

    /// Node count on `floor`.
    pub fn width_of(&self, floor: u32) -> u32 {
        self.floor_widths
            .get(floor as usize)
            .copied()
            .unwrap_or(1)
            .max(1)
    }
}

/// Where the remote enemy generator lives, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    /// Reads the provider settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = read(TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS);

        Self {
            endpoint: read(ENDPOINT_ENV),
            api_key: read(API_KEY_ENV),
            timeout: Duration::from_secs(timeout),
        }
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.endpoint.is_some()
    }
}
