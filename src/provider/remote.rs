//! HTTP client for the remote enemy generator.

use super::{enemy_level, EnemyCategory, EnemyProvider, ProviderError};
use crate::combat::element::Element;
use crate::combat::types::{Combatant, Move, MoveCategory, MoveEffect, Stats};
use crate::content::moves::move_template_by_name;
use crate::core::config::ProviderConfig;
use crate::core::constants::*;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

const USER_AGENT: &str = concat!("beast-tower/", env!("CARGO_PKG_VERSION"));

/// Wire shape of a generated enemy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyPayload {
    pub name: String,
    pub types: Vec<String>,
    pub stats: StatsPayload,
    pub max_hp: u32,
    pub moves: Vec<MovePayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPayload {
    #[serde(default)]
    pub hp: Option<u32>,
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub element: String,
    pub category: String,
    pub power: u32,
    pub accuracy: u32,
    pub pp: u32,
    pub max_pp: u32,
}

impl MovePayload {
    fn into_move(self) -> Result<Move, ProviderError> {
        let element = Element::from_name(&self.element)
            .ok_or_else(|| malformed(format!("move {} has unknown type {}", self.name, self.element)))?;
        let category = MoveCategory::from_name(&self.category).ok_or_else(|| {
            malformed(format!("move {} has unknown category {}", self.name, self.category))
        })?;
        if self.max_pp == 0 || self.pp > self.max_pp {
            return Err(malformed(format!("move {} has invalid PP", self.name)));
        }
        if self.accuracy > 100 {
            return Err(malformed(format!("move {} has accuracy over 100", self.name)));
        }
        if category == MoveCategory::Status && self.power != 0 {
            return Err(malformed(format!("status move {} has power", self.name)));
        }

        // Status effects only travel by name; unknown status moves are inert
        let effect = match category {
            MoveCategory::Status => move_template_by_name(&self.name)
                .map(|t| t.effect)
                .unwrap_or(MoveEffect::None),
            _ => MoveEffect::None,
        };

        Ok(Move {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            element,
            category,
            power: self.power,
            accuracy: self.accuracy,
            pp: self.pp,
            max_pp: self.max_pp,
            effect,
            description: String::new(),
        })
    }
}

impl EnemyPayload {
    /// Validates the payload into an enemy of the expected level.
    pub fn into_combatant(
        self,
        floor: u32,
        category: EnemyCategory,
    ) -> Result<Combatant, ProviderError> {
        if self.name.trim().is_empty() {
            return Err(malformed("empty name".to_string()));
        }
        if self.types.is_empty() || self.types.len() > MAX_TYPES {
            return Err(malformed(format!("{} types", self.types.len())));
        }
        let types = self
            .types
            .iter()
            .map(|t| Element::from_name(t).ok_or_else(|| malformed(format!("unknown type {t}"))))
            .collect::<Result<Vec<_>, _>>()?;
        if self.max_hp == 0 {
            return Err(malformed("max HP is zero".to_string()));
        }
        if self.moves.len() < ENEMY_MIN_MOVES {
            return Err(malformed(format!("only {} moves", self.moves.len())));
        }
        let moves = self
            .moves
            .into_iter()
            .take(MAX_MOVES)
            .map(MovePayload::into_move)
            .collect::<Result<Vec<_>, _>>()?;

        let stats = Stats {
            hp: self.max_hp,
            attack: self.stats.attack,
            defense: self.stats.defense,
            sp_attack: self.stats.sp_attack,
            sp_defense: self.stats.sp_defense,
            speed: self.stats.speed,
        };

        Ok(Combatant::new(
            Uuid::new_v4().to_string(),
            self.name.trim(),
            enemy_level(floor, category),
            types,
            stats,
            moves,
            false,
        ))
    }
}

fn malformed(reason: String) -> ProviderError {
    ProviderError::Malformed(reason)
}

/// Blocking GET against the configured generator.
pub struct RemoteProvider {
    agent: ureq::Agent,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteProvider {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let endpoint = config
            .endpoint
            .as_ref()
            .ok_or(ProviderError::Unavailable)?;
        Ok(Self::new(
            endpoint.clone(),
            config.api_key.clone(),
            config.timeout,
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EnemyProvider for RemoteProvider {
    fn provide(&self, floor: u32, category: EnemyCategory) -> Result<Combatant, ProviderError> {
        let mut request = self
            .agent
            .get(&self.endpoint)
            .set("User-Agent", USER_AGENT)
            .query("floor", &floor.to_string())
            .query("category", category.as_str());
        if let Some(key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {key}"));
        }

        let payload: EnemyPayload = request
            .call()
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .into_json()
            .map_err(|e| malformed(e.to_string()))?;

        debug!(floor, category = category.as_str(), name = %payload.name, "remote enemy received");
        payload.into_combatant(floor, category)
    }
}
