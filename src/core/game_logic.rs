//! Run-level operations. Each one checks the run status first and returns
//! `Err(ActionError)` without touching the state when the input is invalid.

use super::encounters::{self, EventChoice, EventKind};
use super::errors::ActionError;
use super::game_state::{RunState, RunStatus};
use crate::combat::engine::{
    BattleEngine, BattleOutcome, BattleParty, PlayerAction, TurnProgress, TurnReport,
};
use crate::combat::pacing::{NoPacing, Pacer};
use crate::map::logic::{is_selectable, selectable_nodes};
use crate::map::types::{MapNode, NodeCategory};
use crate::progression::logic::{apply_reward, roll_reward_offer};
use crate::progression::types::LearnedMove;
use crate::provider::{EnemyCategory, ResilientProvider};
use rand::Rng;
use tracing::info;

fn require_status(state: &RunState, status: RunStatus) -> Result<(), ActionError> {
    if state.status == status {
        Ok(())
    } else {
        Err(ActionError::WrongStatus(state.status.as_str()))
    }
}

/// Nodes reachable from where the player stands. Empty outside the map.
pub fn available_nodes(state: &RunState) -> Vec<&MapNode> {
    if state.status != RunStatus::Map {
        return Vec::new();
    }
    selectable_nodes(&state.map, &state.current_node_id)
}

/// Moves to `node_id` and starts its encounter.
///
/// Re-selecting the Start node while standing on it is accepted as a no-op.
pub fn select_node(
    state: &mut RunState,
    node_id: &str,
    provider: &ResilientProvider,
    rng: &mut impl Rng,
) -> Result<(), ActionError> {
    require_status(state, RunStatus::Map)?;

    let node = state
        .map
        .get(node_id)
        .ok_or_else(|| ActionError::UnknownNode(node_id.to_string()))?;
    if node.category == NodeCategory::Start && state.current_node_id == node.id {
        return Ok(());
    }
    if !is_selectable(&state.map, &state.current_node_id, node_id) {
        return Err(ActionError::NodeNotSelectable(node_id.to_string()));
    }

    let category = node.category;
    let floor = node.floor;
    state.current_node_id = node_id.to_string();
    info!(node = node_id, floor, ?category, "entered node");

    match EnemyCategory::from_node(category) {
        Some(enemy_category) => {
            let enemy = provider.provide_or_fallback(floor, enemy_category);
            start_battle(state, enemy);
        }
        None => match category {
            NodeCategory::Rest => state.status = RunStatus::Rest,
            NodeCategory::Event => {
                state.active_event = Some(EventKind::roll(rng));
                state.status = RunStatus::Event;
            }
            _ => {}
        },
    }
    Ok(())
}

fn start_battle(state: &mut RunState, enemy: crate::combat::types::Combatant) {
    state.battle_log.clear();
    state
        .battle_log
        .push(format!("A wild {} appeared!", enemy.name));
    state.battle_log.push(format!("Go, {}!", state.player.name));

    let mut engine = BattleEngine::new();
    engine.engage(&state.player);

    state.enemy = Some(enemy);
    state.battle = Some(engine);
    state.status = RunStatus::Combat;
}

/// Uses one of the player's moves for this turn.
pub fn choose_move(
    state: &mut RunState,
    move_id: &str,
    rng: &mut impl Rng,
    pacer: &mut dyn Pacer,
) -> Result<TurnReport, ActionError> {
    take_turn(state, PlayerAction::UseMove(move_id.to_string()), rng, pacer)
}

/// Uses a bag item; the enemy answers afterwards.
pub fn use_item(
    state: &mut RunState,
    item_id: &str,
    rng: &mut impl Rng,
    pacer: &mut dyn Pacer,
) -> Result<TurnReport, ActionError> {
    take_turn(state, PlayerAction::UseItem(item_id.to_string()), rng, pacer)
}

/// Leaves the battle. Always succeeds while input is accepted; the node stays
/// uncompleted but its children open up.
pub fn flee(state: &mut RunState, rng: &mut impl Rng) -> Result<TurnReport, ActionError> {
    take_turn(state, PlayerAction::Flee, rng, &mut NoPacing)
}

fn take_turn(
    state: &mut RunState,
    action: PlayerAction,
    rng: &mut impl Rng,
    pacer: &mut dyn Pacer,
) -> Result<TurnReport, ActionError> {
    require_status(state, RunStatus::Combat)?;

    let report = {
        let (Some(enemy), Some(battle)) = (state.enemy.as_mut(), state.battle.as_mut()) else {
            return Err(ActionError::NoActiveBattle);
        };
        let mut party = BattleParty::new(
            &mut state.player,
            enemy,
            &mut state.bag,
            &mut state.battle_log,
        );
        battle.resolve_turn(action, &mut party, rng, pacer)?
    };

    if let TurnProgress::Finished(outcome) = report.progress {
        match outcome {
            BattleOutcome::Victory => on_victory(state, rng),
            BattleOutcome::Defeat => {
                state.status = RunStatus::GameOver;
                state.battle = None;
                info!(
                    floor = state.current_floor(),
                    level = state.player.level,
                    "game over"
                );
            }
            BattleOutcome::Fled => {
                state.status = RunStatus::Map;
                state.enemy = None;
                state.battle = None;
                let current = state.current_node_id.clone();
                state.map.unlock_children(&current);
            }
        }
    }

    Ok(report)
}

fn on_victory(state: &mut RunState, rng: &mut impl Rng) {
    state.battles_won += 1;
    state.pending_reward = Some(roll_reward_offer(&state.config, rng));
    state.battle = None;
    state.status = RunStatus::Reward;
    info!(
        floor = state.current_floor(),
        level = state.player.level,
        battles_won = state.battles_won,
        "battle won"
    );
}

/// Claims the pending reward. `move_id` picks one of the offered moves, or
/// None to skip learning. The offered item is kept either way.
pub fn select_reward(state: &mut RunState, move_id: Option<&str>) -> Result<(), ActionError> {
    require_status(state, RunStatus::Reward)?;
    let offer = state
        .pending_reward
        .as_ref()
        .ok_or(ActionError::NoPendingReward)?;
    if let Some(id) = move_id {
        if !offer.move_options.iter().any(|m| m.id == id) {
            return Err(ActionError::UnknownMove(id.to_string()));
        }
    }

    let Some(offer) = state.pending_reward.take() else {
        return Err(ActionError::NoPendingReward);
    };
    let chosen = move_id.and_then(|id| offer.move_options.into_iter().find(|m| m.id == id));
    let chosen_name = chosen.as_ref().map(|m| m.name.clone());

    let learned = apply_reward(&mut state.player, &mut state.bag, chosen, offer.item);
    if let (Some(slot), Some(name)) = (learned, chosen_name) {
        let line = match slot {
            LearnedMove::Appended(_) => format!("{} learned {}!", state.player.name, name),
            LearnedMove::Replaced(_) => {
                format!("{} forgot a move and learned {}!", state.player.name, name)
            }
        };
        state.battle_log.push(line);
    }

    state.enemy = None;
    complete_current_node(state);

    let on_boss = state
        .current_node()
        .is_some_and(|n| n.category == NodeCategory::Boss);
    if on_boss {
        state.status = RunStatus::Victory;
        info!(
            level = state.player.level,
            battles_won = state.battles_won,
            "tower cleared"
        );
    } else {
        state.status = RunStatus::Map;
    }
    Ok(())
}

/// Rests at the current Rest node.
pub fn rest(state: &mut RunState) -> Result<Vec<String>, ActionError> {
    require_status(state, RunStatus::Rest)?;
    let lines = encounters::rest(&mut state.player);
    complete_current_node(state);
    state.status = RunStatus::Map;
    Ok(lines)
}

/// Answers the active event.
pub fn resolve_event(
    state: &mut RunState,
    choice: EventChoice,
    rng: &mut impl Rng,
) -> Result<Vec<String>, ActionError> {
    require_status(state, RunStatus::Event)?;
    let Some(kind) = state.active_event else {
        return Err(ActionError::WrongStatus(state.status.as_str()));
    };

    let lines = encounters::resolve_event(kind, choice, &mut state.player, &mut state.bag, rng);
    state.active_event = None;
    complete_current_node(state);
    state.status = RunStatus::Map;
    Ok(lines)
}

fn complete_current_node(state: &mut RunState) {
    let current = state.current_node_id.clone();
    state.map.mark_completed(&current);
    state.map.unlock_children(&current);
}
