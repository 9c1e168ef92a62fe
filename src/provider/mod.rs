//! Enemy supply.
//!
//! An `EnemyProvider` turns a floor index and encounter category into an
//! opposing combatant. The remote generator may fail in any number of ways;
//! `ResilientProvider` wraps it so a battle always gets an enemy.

pub mod fallback;
pub mod remote;

pub use fallback::FallbackProvider;
pub use remote::RemoteProvider;

use crate::combat::types::Combatant;
use crate::core::config::ProviderConfig;
use crate::core::constants::*;
use crate::map::types::NodeCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyCategory {
    Combat,
    Elite,
    Boss,
}

impl EnemyCategory {
    /// Battle category of a map node, None for non-battle nodes.
    pub fn from_node(category: NodeCategory) -> Option<Self> {
        match category {
            NodeCategory::Combat => Some(EnemyCategory::Combat),
            NodeCategory::Elite => Some(EnemyCategory::Elite),
            NodeCategory::Boss => Some(EnemyCategory::Boss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyCategory::Combat => "combat",
            EnemyCategory::Elite => "elite",
            EnemyCategory::Boss => "boss",
        }
    }
}

/// Level an enemy on `floor` should have.
pub fn enemy_level(floor: u32, category: EnemyCategory) -> u32 {
    let bonus = if category == EnemyCategory::Boss {
        BOSS_LEVEL_BONUS
    } else {
        0
    };
    ENEMY_BASE_LEVEL + ENEMY_LEVEL_PER_FLOOR * floor + bonus
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("enemy provider is not configured")]
    Unavailable,

    #[error("enemy request failed: {0}")]
    Transport(String),

    #[error("malformed enemy payload: {0}")]
    Malformed(String),
}

pub trait EnemyProvider {
    fn provide(&self, floor: u32, category: EnemyCategory) -> Result<Combatant, ProviderError>;
}

/// Optional primary provider backed by the local tier pool.
pub struct ResilientProvider {
    primary: Option<Box<dyn EnemyProvider + Send + Sync>>,
    fallback: FallbackProvider,
}

impl Default for ResilientProvider {
    fn default() -> Self {
        Self::offline()
    }
}

impl ResilientProvider {
    /// Local pool only.
    pub fn offline() -> Self {
        Self {
            primary: None,
            fallback: FallbackProvider,
        }
    }

    pub fn with_primary(primary: impl EnemyProvider + Send + Sync + 'static) -> Self {
        Self {
            primary: Some(Box::new(primary)),
            fallback: FallbackProvider,
        }
    }

    /// Remote generator when an endpoint is configured, offline otherwise.
    pub fn from_config(config: &ProviderConfig) -> Self {
        match RemoteProvider::from_config(config) {
            Ok(remote) => {
                info!(endpoint = %remote.endpoint(), "using remote enemy provider");
                Self::with_primary(remote)
            }
            Err(_) => Self::offline(),
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Never fails: any primary error is logged and replaced by the tier pool.
    pub fn provide_or_fallback(&self, floor: u32, category: EnemyCategory) -> Combatant {
        if let Some(primary) = &self.primary {
            match primary.provide(floor, category) {
                Ok(enemy) => return enemy,
                Err(err) => warn!(floor, category = category.as_str(), error = %err,
                    "enemy provider failed, using fallback pool"),
            }
        }
        self.fallback.generate(floor, category)
    }
}

impl EnemyProvider for ResilientProvider {
    fn provide(&self, floor: u32, category: EnemyCategory) -> Result<Combatant, ProviderError> {
        Ok(self.provide_or_fallback(floor, category))
    }
}
