//! Turn-resolution state machine.
//!
//! A battle moves `Idle -> ActionSelection -> Resolving(First) ->
//! Resolving(Second) -> ActionSelection` until someone faints or the player
//! flees. `submit` validates the player's choice and queues both actions;
//! each `advance` executes one step so callers can observe the action lock
//! mid-turn. `resolve_turn` drives a whole turn in one call.

use super::damage::calculate_damage;
use super::element::Effectiveness;
use super::pacing::{Beat, Pacer};
use super::types::{BattleLog, Combatant, MoveCategory, MoveEffect, Side, Stats};
use crate::core::constants::*;
use crate::core::errors::ActionError;
use crate::inventory::logic::apply_item;
use crate::inventory::types::{Bag, ItemEffect};
use crate::progression::logic::award_experience;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSlot {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Idle,
    ActionSelection,
    Resolving(TurnSlot),
    /// A side hit 0 HP; the next step applies faint handling
    Fainted(Side),
    Victory,
    Defeat,
    Fled,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Fled
        )
    }
}

/// What the player asks for on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    UseMove(String),
    UseItem(String),
    Flee,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum QueuedAction {
    Move { actor: Side, move_index: usize },
    Item { item_id: String },
    /// Actor has nothing usable left
    Stall { actor: Side },
}

/// One resolved step of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    MoveUsed {
        actor: Side,
        move_name: String,
        damage: u32,
        multiplier: f64,
    },
    StatusApplied {
        actor: Side,
        move_name: String,
        effect: MoveEffect,
    },
    ItemUsed {
        item_name: String,
        effect: ItemEffect,
    },
    Stalled {
        actor: Side,
    },
    Fainted {
        side: Side,
    },
    ExperienceGained {
        amount: u32,
        leveled_up: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnProgress {
    /// More steps remain in this turn
    Continue,
    /// Turn done, lock open again
    AwaitingInput,
    Finished(BattleOutcome),
}

/// Everything a single turn produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub outcomes: Vec<ActionOutcome>,
    pub progress: TurnProgress,
}

/// Mutable view of the participants for the duration of one call.
pub struct BattleParty<'a> {
    pub player: &'a mut Combatant,
    pub enemy: &'a mut Combatant,
    pub bag: &'a mut Bag,
    pub log: &'a mut BattleLog,
}

impl<'a> BattleParty<'a> {
    pub fn new(
        player: &'a mut Combatant,
        enemy: &'a mut Combatant,
        bag: &'a mut Bag,
        log: &'a mut BattleLog,
    ) -> Self {
        Self {
            player,
            enemy,
            bag,
            log,
        }
    }

    fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &*self.player,
            Side::Enemy => &*self.enemy,
        }
    }

    /// (actor, target, log) as disjoint borrows.
    fn split(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant, &mut BattleLog) {
        match actor {
            Side::Player => (&mut *self.player, &mut *self.enemy, &mut *self.log),
            Side::Enemy => (&mut *self.enemy, &mut *self.player, &mut *self.log),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEngine {
    phase: BattlePhase,
    /// The action lock: closed from `submit` until the turn fully resolves
    accepting_input: bool,
    queue: VecDeque<QueuedAction>,
    turn_outcomes: Vec<ActionOutcome>,
    /// Player stats at engagement; battle buffs revert to these
    player_base_stats: Option<Stats>,
    turn: u32,
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleEngine {
    pub fn new() -> Self {
        Self {
            phase: BattlePhase::Idle,
            accepting_input: false,
            queue: VecDeque::new(),
            turn_outcomes: Vec::new(),
            player_base_stats: None,
            turn: 0,
        }
    }

    /// Starts a battle against whatever enemy the party will carry.
    pub fn engage(&mut self, player: &Combatant) {
        self.phase = BattlePhase::ActionSelection;
        self.accepting_input = true;
        self.queue.clear();
        self.turn_outcomes.clear();
        self.player_base_stats = Some(player.stats);
        self.turn = 0;
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_accepting_input(&self) -> bool {
        self.accepting_input && self.phase == BattlePhase::ActionSelection
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Victory => Some(BattleOutcome::Victory),
            BattlePhase::Defeat => Some(BattleOutcome::Defeat),
            BattlePhase::Fled => Some(BattleOutcome::Fled),
            _ => None,
        }
    }

    /// Outcomes of the turn in flight (or the last one).
    pub fn turn_outcomes(&self) -> &[ActionOutcome] {
        &self.turn_outcomes
    }

    /// Validates and queues the player's action. Nothing is mutated on error.
    pub fn submit(
        &mut self,
        action: PlayerAction,
        party: &mut BattleParty<'_>,
        rng: &mut impl Rng,
    ) -> Result<TurnProgress, ActionError> {
        if self.phase == BattlePhase::Idle || self.phase.is_terminal() {
            return Err(ActionError::NoActiveBattle);
        }
        if !self.is_accepting_input() {
            return Err(ActionError::NotAcceptingInput);
        }

        let player_action = match action {
            PlayerAction::Flee => {
                self.turn_outcomes.clear();
                party.log.push("Got away safely!");
                self.finish(BattlePhase::Fled, party);
                debug!(turn = self.turn, "player fled");
                return Ok(TurnProgress::Finished(BattleOutcome::Fled));
            }
            PlayerAction::UseMove(move_id) => {
                let index = party
                    .player
                    .find_move(&move_id)
                    .ok_or(ActionError::UnknownMove(move_id))?;
                let mv = &party.player.moves[index];
                if !mv.has_pp() {
                    return Err(ActionError::NoPpLeft(mv.name.clone()));
                }
                QueuedAction::Move {
                    actor: Side::Player,
                    move_index: index,
                }
            }
            PlayerAction::UseItem(item_id) => {
                if party.bag.get(&item_id).is_none() {
                    return Err(ActionError::UnknownItem(item_id));
                }
                QueuedAction::Item { item_id }
            }
        };

        let enemy_action = choose_enemy_action(party.enemy, rng);

        self.queue.clear();
        self.turn_outcomes.clear();
        // Items go first and the enemy always answers
        let is_item = matches!(player_action, QueuedAction::Item { .. });
        if is_item || player_acts_first(party.player, party.enemy, rng) {
            self.queue.push_back(player_action);
            self.queue.push_back(enemy_action);
        } else {
            self.queue.push_back(enemy_action);
            self.queue.push_back(player_action);
        }

        self.accepting_input = false;
        self.turn += 1;
        self.phase = BattlePhase::Resolving(TurnSlot::First);
        Ok(TurnProgress::Continue)
    }

    /// Executes the next step of the turn in flight.
    pub fn advance(
        &mut self,
        party: &mut BattleParty<'_>,
        rng: &mut impl Rng,
        pacer: &mut dyn Pacer,
    ) -> Result<TurnProgress, ActionError> {
        match self.phase {
            BattlePhase::Resolving(slot) => Ok(self.resolve_slot(slot, party, rng, pacer)),
            BattlePhase::Fainted(side) => Ok(self.handle_faint(side, party, pacer)),
            _ => Err(ActionError::NoTurnInFlight),
        }
    }

    /// `submit` followed by `advance` until the turn settles.
    pub fn resolve_turn(
        &mut self,
        action: PlayerAction,
        party: &mut BattleParty<'_>,
        rng: &mut impl Rng,
        pacer: &mut dyn Pacer,
    ) -> Result<TurnReport, ActionError> {
        let mut progress = self.submit(action, party, rng)?;
        while progress == TurnProgress::Continue {
            progress = self.advance(party, rng, pacer)?;
        }
        Ok(TurnReport {
            outcomes: self.turn_outcomes.clone(),
            progress,
        })
    }

    fn resolve_slot(
        &mut self,
        slot: TurnSlot,
        party: &mut BattleParty<'_>,
        rng: &mut impl Rng,
        pacer: &mut dyn Pacer,
    ) -> TurnProgress {
        if slot == TurnSlot::Second {
            pacer.pause(Beat::BetweenActions);
        }

        let Some(action) = self.queue.pop_front() else {
            return self.end_turn();
        };
        let outcome = execute(action, party, rng, pacer);
        self.turn_outcomes.push(outcome);

        // Only the target of an action can drop, and nothing heals it back.
        let fainted = [Side::Enemy, Side::Player]
            .into_iter()
            .find(|side| party.combatant(*side).is_fainted());
        if let Some(side) = fainted {
            self.queue.clear();
            self.phase = BattlePhase::Fainted(side);
            return TurnProgress::Continue;
        }

        if self.queue.is_empty() {
            return self.end_turn();
        }
        self.phase = BattlePhase::Resolving(TurnSlot::Second);
        TurnProgress::Continue
    }

    fn end_turn(&mut self) -> TurnProgress {
        self.phase = BattlePhase::ActionSelection;
        self.accepting_input = true;
        TurnProgress::AwaitingInput
    }

    fn handle_faint(
        &mut self,
        side: Side,
        party: &mut BattleParty<'_>,
        pacer: &mut dyn Pacer,
    ) -> TurnProgress {
        let name = party.combatant(side).name.clone();
        party.log.push(format!("{name} fainted!"));
        self.turn_outcomes.push(ActionOutcome::Fainted { side });
        pacer.pause(Beat::Fainted);

        match side {
            Side::Player => {
                debug!(turn = self.turn, "player fainted");
                self.finish(BattlePhase::Defeat, party);
                TurnProgress::Finished(BattleOutcome::Defeat)
            }
            Side::Enemy => {
                // Buffs come off before growth is applied to the real stats
                self.finish(BattlePhase::Victory, party);

                let gain = award_experience(party.player, EXP_PER_VICTORY);
                party.log.push(format!(
                    "{} gained {} EXP!",
                    party.player.name, gain.amount
                ));
                if let Some(level) = gain.leveled_up {
                    party
                        .log
                        .push(format!("{} grew to level {}!", party.player.name, level));
                }
                self.turn_outcomes.push(ActionOutcome::ExperienceGained {
                    amount: gain.amount,
                    leveled_up: gain.leveled_up,
                });
                pacer.pause(Beat::Experience);
                debug!(turn = self.turn, enemy = %name, "enemy fainted");
                TurnProgress::Finished(BattleOutcome::Victory)
            }
        }
    }

    fn finish(&mut self, phase: BattlePhase, party: &mut BattleParty<'_>) {
        if let Some(base) = self.player_base_stats.take() {
            party.player.stats = base;
        }
        self.queue.clear();
        self.accepting_input = false;
        self.phase = phase;
    }
}

/// Faster side first; an exact tie is a coin flip.
pub fn player_acts_first(player: &Combatant, enemy: &Combatant, rng: &mut impl Rng) -> bool {
    match player.stats.speed.cmp(&enemy.stats.speed) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => rng.gen_bool(0.5),
    }
}

/// Uniform pick among the enemy's moves that still have PP.
fn choose_enemy_action(enemy: &Combatant, rng: &mut impl Rng) -> QueuedAction {
    let usable: Vec<usize> = enemy.usable_moves().map(|(i, _)| i).collect();
    match usable.choose(rng) {
        Some(&move_index) => QueuedAction::Move {
            actor: Side::Enemy,
            move_index,
        },
        None => QueuedAction::Stall { actor: Side::Enemy },
    }
}

fn execute(
    action: QueuedAction,
    party: &mut BattleParty<'_>,
    rng: &mut impl Rng,
    pacer: &mut dyn Pacer,
) -> ActionOutcome {
    match action {
        QueuedAction::Move { actor, move_index } => {
            execute_move(actor, move_index, party, rng, pacer)
        }
        QueuedAction::Item { item_id } => {
            let Some(item) = party.bag.consume(&item_id) else {
                return ActionOutcome::Stalled {
                    actor: Side::Player,
                };
            };
            for line in apply_item(party.player, &item) {
                party.log.push(line);
            }
            debug!(item = %item.name, "item used");
            ActionOutcome::ItemUsed {
                item_name: item.name,
                effect: item.effect,
            }
        }
        QueuedAction::Stall { actor } => {
            let name = &party.combatant(actor).name;
            let line = format!("{name} has no moves left!");
            party.log.push(line);
            ActionOutcome::Stalled { actor }
        }
    }
}

fn execute_move(
    actor: Side,
    move_index: usize,
    party: &mut BattleParty<'_>,
    rng: &mut impl Rng,
    pacer: &mut dyn Pacer,
) -> ActionOutcome {
    let (attacker, defender, log) = party.split(actor);

    let Some(mv) = attacker.moves.get_mut(move_index) else {
        log.push(format!("{} hesitated!", attacker.name));
        return ActionOutcome::Stalled { actor };
    };
    if !mv.spend_pp() {
        log.push(format!("{} has no PP left for {}!", attacker.name, mv.name));
        return ActionOutcome::Stalled { actor };
    }
    let mv = mv.clone();

    log.push(format!("{} used {}!", attacker.name, mv.name));
    pacer.pause(Beat::MoveAnnounced);

    if mv.category == MoveCategory::Status {
        match mv.effect {
            MoveEffect::Heal => {
                let amount = (attacker.max_hp as f64 * HEAL_MOVE_FRACTION).floor() as u32;
                attacker.heal(amount);
                log.push(format!("{} regained health!", attacker.name));
            }
            MoveEffect::BuffAttack => {
                attacker.stats.scale_offense(STATUS_BUFF_MULTIPLIER);
                log.push(format!("{}'s attack rose!", attacker.name));
            }
            MoveEffect::BuffDefense => {
                attacker.stats.scale_defense(STATUS_BUFF_MULTIPLIER);
                log.push(format!("{}'s defense rose!", attacker.name));
            }
            // Flavor only, no stat change
            MoveEffect::DebuffDefense => {
                log.push(format!("{}'s defense fell!", defender.name));
            }
            MoveEffect::None => {
                log.push("But nothing happened!");
            }
        }
        debug!(?actor, name = %mv.name, effect = ?mv.effect, "status move");
        return ActionOutcome::StatusApplied {
            actor,
            move_name: mv.name,
            effect: mv.effect,
        };
    }

    let roll = calculate_damage(attacker, defender, &mv, rng);
    defender.take_damage(roll.damage);
    if let Some(message) = Effectiveness::from_multiplier(roll.multiplier).message() {
        log.push(message);
    }
    debug!(
        ?actor,
        name = %mv.name,
        damage = roll.damage,
        multiplier = roll.multiplier,
        target_hp = defender.current_hp,
        "move resolved"
    );

    ActionOutcome::MoveUsed {
        actor,
        move_name: mv.name,
        damage: roll.damage,
        multiplier: roll.multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::element::Element;
    use crate::combat::pacing::{NoPacing, RecordingPacer};
    use crate::content::items::create_item;
    use crate::content::moves::create_move;
    use crate::content::starters::Starter;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn enemy(speed: u32, hp: u32, move_keys: &[&str]) -> Combatant {
        Combatant::new(
            "e",
            "Rattata",
            5,
            vec![Element::Normal],
            Stats {
                hp,
                attack: 40,
                defense: 35,
                sp_attack: 25,
                sp_defense: 35,
                speed,
            },
            move_keys.iter().map(|k| create_move(k)).collect(),
            false,
        )
    }

    struct Fixture {
        player: Combatant,
        enemy: Combatant,
        bag: Bag,
        log: BattleLog,
    }

    impl Fixture {
        fn new(enemy: Combatant) -> Self {
            let mut bag = Bag::new();
            if let Some(potion) = create_item("potion") {
                bag.add(potion);
            }
            Self {
                player: Starter::Fire.create(),
                enemy,
                bag,
                log: BattleLog::default(),
            }
        }

        fn party(&mut self) -> BattleParty<'_> {
            BattleParty::new(
                &mut self.player,
                &mut self.enemy,
                &mut self.bag,
                &mut self.log,
            )
        }

        fn move_id(&self, name: &str) -> String {
            self.player
                .moves
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.id.clone())
                .unwrap_or_default()
        }
    }

    fn engaged(fx: &Fixture) -> BattleEngine {
        let mut engine = BattleEngine::new();
        engine.engage(&fx.player);
        engine
    }

    #[test]
    fn test_new_engine_is_idle() {
        let mut fx = Fixture::new(enemy(10, 30, &["tackle"]));
        let mut engine = BattleEngine::new();
        let mut rng = create_test_rng();

        assert_eq!(engine.phase(), BattlePhase::Idle);
        assert!(!engine.is_accepting_input());
        let result = engine.submit(PlayerAction::Flee, &mut fx.party(), &mut rng);
        assert_eq!(result, Err(ActionError::NoActiveBattle));
    }

    #[test]
    fn test_faster_player_acts_first() {
        let mut fx = Fixture::new(enemy(10, 200, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");

        let report = engine
            .resolve_turn(
                PlayerAction::UseMove(ember),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();

        assert_eq!(report.progress, TurnProgress::AwaitingInput);
        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            report.outcomes[0],
            ActionOutcome::MoveUsed {
                actor: Side::Player,
                ..
            }
        ));
        assert!(matches!(
            report.outcomes[1],
            ActionOutcome::MoveUsed {
                actor: Side::Enemy,
                ..
            }
        ));
        assert!(engine.is_accepting_input());
    }

    #[test]
    fn test_slower_player_acts_second() {
        let mut fx = Fixture::new(enemy(200, 200, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let scratch = fx.move_id("Scratch");

        let report = engine
            .resolve_turn(
                PlayerAction::UseMove(scratch),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();
        assert!(matches!(
            report.outcomes[0],
            ActionOutcome::MoveUsed {
                actor: Side::Enemy,
                ..
            }
        ));
    }

    #[test]
    fn test_speed_tie_is_fair_coin() {
        let player = Starter::Fire.create();
        let foe = enemy(player.stats.speed, 30, &["tackle"]);
        let mut rng = create_test_rng();
        let trials = 4000;
        let firsts = (0..trials)
            .filter(|_| player_acts_first(&player, &foe, &mut rng))
            .count();
        let rate = firsts as f64 / trials as f64;
        assert!((0.46..0.54).contains(&rate), "rate {rate}");
    }

    #[test]
    fn test_strict_speed_order_never_flips() {
        let player = Starter::Fire.create();
        let slow = enemy(player.stats.speed - 1, 30, &["tackle"]);
        let fast = enemy(player.stats.speed + 1, 30, &["tackle"]);
        let mut rng = create_test_rng();
        for _ in 0..200 {
            assert!(player_acts_first(&player, &slow, &mut rng));
            assert!(!player_acts_first(&player, &fast, &mut rng));
        }
    }

    #[test]
    fn test_lock_is_closed_mid_turn() {
        let mut fx = Fixture::new(enemy(10, 200, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");

        let progress = engine
            .submit(PlayerAction::UseMove(ember.clone()), &mut fx.party(), &mut rng)
            .unwrap();
        assert_eq!(progress, TurnProgress::Continue);
        assert_eq!(engine.phase(), BattlePhase::Resolving(TurnSlot::First));
        assert!(!engine.is_accepting_input());

        // A second input while the first is in flight is rejected untouched
        let hp_before = fx.enemy.current_hp;
        let second = engine.submit(PlayerAction::UseMove(ember), &mut fx.party(), &mut rng);
        assert_eq!(second, Err(ActionError::NotAcceptingInput));
        let flee = engine.submit(PlayerAction::Flee, &mut fx.party(), &mut rng);
        assert_eq!(flee, Err(ActionError::NotAcceptingInput));
        assert_eq!(fx.enemy.current_hp, hp_before);

        let mut pacer = RecordingPacer::default();
        let progress = engine
            .advance(&mut fx.party(), &mut rng, &mut pacer)
            .unwrap();
        assert_eq!(progress, TurnProgress::Continue);
        assert_eq!(engine.phase(), BattlePhase::Resolving(TurnSlot::Second));
        assert!(!engine.is_accepting_input());

        let progress = engine
            .advance(&mut fx.party(), &mut rng, &mut pacer)
            .unwrap();
        assert_eq!(progress, TurnProgress::AwaitingInput);
        assert!(engine.is_accepting_input());
        assert_eq!(
            pacer.beats,
            vec![
                Beat::MoveAnnounced,
                Beat::BetweenActions,
                Beat::MoveAnnounced
            ]
        );

        assert_eq!(
            engine.advance(&mut fx.party(), &mut rng, &mut pacer),
            Err(ActionError::NoTurnInFlight)
        );
    }

    #[test]
    fn test_zero_pp_move_is_rejected_without_mutation() {
        let mut fx = Fixture::new(enemy(10, 200, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");
        fx.player.moves[1].pp = 0;
        let snapshot = (fx.player.clone(), fx.enemy.clone(), fx.log.clone());

        let result = engine.submit(PlayerAction::UseMove(ember), &mut fx.party(), &mut rng);
        assert_eq!(result, Err(ActionError::NoPpLeft("Ember".to_string())));
        assert_eq!((fx.player, fx.enemy, fx.log), snapshot);
        assert!(engine.is_accepting_input());
    }

    #[test]
    fn test_unknown_move_and_item_rejected() {
        let mut fx = Fixture::new(enemy(10, 200, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();

        assert_eq!(
            engine.submit(
                PlayerAction::UseMove("nope".to_string()),
                &mut fx.party(),
                &mut rng
            ),
            Err(ActionError::UnknownMove("nope".to_string()))
        );
        assert_eq!(
            engine.submit(
                PlayerAction::UseItem("nope".to_string()),
                &mut fx.party(),
                &mut rng
            ),
            Err(ActionError::UnknownItem("nope".to_string()))
        );
        assert_eq!(engine.phase(), BattlePhase::ActionSelection);
    }

    #[test]
    fn test_pp_decrements_once_per_use() {
        let mut fx = Fixture::new(enemy(10, 500, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");
        let before = fx.player.moves[1].pp;

        engine
            .resolve_turn(
                PlayerAction::UseMove(ember),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();
        assert_eq!(fx.player.moves[1].pp, before - 1);
        assert_eq!(fx.enemy.moves[0].pp, fx.enemy.moves[0].max_pp - 1);
    }

    #[test]
    fn test_first_action_faint_skips_second() {
        // One HP enemy, player faster
        let mut fx = Fixture::new(enemy(10, 1, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");
        let mut pacer = RecordingPacer::default();

        let report = engine
            .resolve_turn(
                PlayerAction::UseMove(ember),
                &mut fx.party(),
                &mut rng,
                &mut pacer,
            )
            .unwrap();

        assert_eq!(
            report.progress,
            TurnProgress::Finished(BattleOutcome::Victory)
        );
        assert_eq!(fx.enemy.current_hp, 0);
        // Enemy never got to act
        assert_eq!(fx.enemy.moves[0].pp, fx.enemy.moves[0].max_pp);
        assert!(!pacer.beats.contains(&Beat::BetweenActions));
        assert_eq!(
            report.outcomes.last(),
            Some(&ActionOutcome::ExperienceGained {
                amount: 50,
                leveled_up: None
            })
        );
        assert_eq!(fx.player.exp, 50);
        assert!(fx.log.contains("Rattata fainted!"));
        assert_eq!(engine.phase(), BattlePhase::Victory);
        assert!(!engine.is_accepting_input());
    }

    #[test]
    fn test_faint_phase_is_observable() {
        let mut fx = Fixture::new(enemy(10, 1, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");

        engine
            .submit(PlayerAction::UseMove(ember), &mut fx.party(), &mut rng)
            .unwrap();
        engine
            .advance(&mut fx.party(), &mut rng, &mut NoPacing)
            .unwrap();
        assert_eq!(engine.phase(), BattlePhase::Fainted(Side::Enemy));
        let progress = engine
            .advance(&mut fx.party(), &mut rng, &mut NoPacing)
            .unwrap();
        assert_eq!(progress, TurnProgress::Finished(BattleOutcome::Victory));
    }

    #[test]
    fn test_player_faint_is_defeat() {
        let mut fx = Fixture::new(enemy(200, 500, &["tackle"]));
        fx.player.current_hp = 1;
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let scratch = fx.move_id("Scratch");
        let scratch_pp = fx.player.moves[0].pp;

        let report = engine
            .resolve_turn(
                PlayerAction::UseMove(scratch),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();

        assert_eq!(report.progress, TurnProgress::Finished(BattleOutcome::Defeat));
        assert!(fx.player.is_fainted());
        // The player's move never executed
        assert_eq!(fx.player.moves[0].pp, scratch_pp);
        assert_eq!(fx.player.exp, 0);
        assert_eq!(engine.outcome(), Some(BattleOutcome::Defeat));
    }

    #[test]
    fn test_flee_always_succeeds() {
        let mut fx = Fixture::new(enemy(200, 500, &["tackle"]));
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();

        let report = engine
            .resolve_turn(PlayerAction::Flee, &mut fx.party(), &mut rng, &mut NoPacing)
            .unwrap();
        assert_eq!(report.progress, TurnProgress::Finished(BattleOutcome::Fled));
        assert_eq!(fx.enemy.moves[0].pp, fx.enemy.moves[0].max_pp);
        assert_eq!(fx.log.last(), Some("Got away safely!"));
        assert_eq!(
            engine.submit(PlayerAction::Flee, &mut fx.party(), &mut rng),
            Err(ActionError::NoActiveBattle)
        );
    }

    #[test]
    fn test_item_goes_first_then_enemy_responds() {
        // Enemy is much faster but the item still resolves first
        let mut fx = Fixture::new(enemy(200, 500, &["growl"]));
        fx.player.take_damage(30);
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let potion_id = fx
            .bag
            .find_by_name("Potion")
            .map(|i| i.id.clone())
            .unwrap();

        let report = engine
            .resolve_turn(
                PlayerAction::UseItem(potion_id),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();

        assert!(matches!(
            report.outcomes[0],
            ActionOutcome::ItemUsed {
                effect: ItemEffect::HealHp,
                ..
            }
        ));
        assert!(matches!(
            report.outcomes[1],
            ActionOutcome::StatusApplied {
                actor: Side::Enemy,
                effect: MoveEffect::DebuffDefense,
                ..
            }
        ));
        assert_eq!(fx.player.current_hp, 29);
        assert!(fx.bag.is_empty());
        assert!(fx.log.contains("defense fell"));
        // Growl is flavor only
        assert_eq!(fx.player.stats.defense, 43);
    }

    #[test]
    fn test_heal_move_restores_half_max_hp() {
        let mut fx = Fixture::new(enemy(10, 500, &["growl"]));
        fx.player.moves.push(create_move("recover"));
        fx.player.take_damage(30);
        let recover = fx.move_id("Recover");
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();

        engine
            .resolve_turn(
                PlayerAction::UseMove(recover),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();
        // 9 + floor(39 * 0.5)
        assert_eq!(fx.player.current_hp, 28);
    }

    #[test]
    fn test_enemy_without_pp_stalls() {
        let mut foe = enemy(10, 500, &["tackle"]);
        foe.moves[0].pp = 0;
        let mut fx = Fixture::new(foe);
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");

        let report = engine
            .resolve_turn(
                PlayerAction::UseMove(ember),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();
        assert_eq!(
            report.outcomes[1],
            ActionOutcome::Stalled { actor: Side::Enemy }
        );
        assert_eq!(fx.player.current_hp, fx.player.max_hp);
    }

    #[test]
    fn test_battle_buffs_revert_at_end() {
        let mut fx = Fixture::new(enemy(10, 500, &["growl"]));
        if let Some(x_attack) = create_item("xattack") {
            fx.bag.add(x_attack);
        }
        let x_attack_id = fx
            .bag
            .find_by_name("X Attack")
            .map(|i| i.id.clone())
            .unwrap();
        let base_attack = fx.player.stats.attack;
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();

        engine
            .resolve_turn(
                PlayerAction::UseItem(x_attack_id),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();
        assert_eq!(fx.player.stats.attack, 78);

        engine
            .resolve_turn(PlayerAction::Flee, &mut fx.party(), &mut rng, &mut NoPacing)
            .unwrap();
        assert_eq!(fx.player.stats.attack, base_attack);
    }

    fn status_move(id: &str, name: &str, effect: MoveEffect) -> crate::combat::types::Move {
        crate::combat::types::Move {
            id: id.to_string(),
            name: name.to_string(),
            element: Element::Normal,
            category: MoveCategory::Status,
            power: 0,
            accuracy: 100,
            pp: 10,
            max_pp: 10,
            effect,
            description: String::new(),
        }
    }

    #[test]
    fn test_status_buffs_compound_and_revert() {
        let mut fx = Fixture::new(enemy(10, 500, &["growl"]));
        fx.player.moves.truncate(2);
        fx.player
            .moves
            .push(status_move("sd", "Swords Dance", MoveEffect::BuffAttack));
        fx.player
            .moves
            .push(status_move("ir", "Iron Defense", MoveEffect::BuffDefense));
        let base = fx.player.stats;
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();

        for id in ["sd", "sd", "ir"] {
            engine
                .resolve_turn(
                    PlayerAction::UseMove(id.to_string()),
                    &mut fx.party(),
                    &mut rng,
                    &mut NoPacing,
                )
                .unwrap();
        }

        // Each use floors
        let up = |v: u32| (v as f64 * STATUS_BUFF_MULTIPLIER).floor() as u32;
        assert_eq!(fx.player.stats.attack, up(up(base.attack)));
        assert_eq!(fx.player.stats.sp_attack, up(up(base.sp_attack)));
        assert_eq!(fx.player.stats.defense, up(base.defense));
        assert_eq!(fx.player.stats.sp_defense, up(base.sp_defense));
        assert_eq!(fx.player.stats.speed, base.speed);
        assert!(fx.log.contains("attack rose"));
        assert!(fx.log.contains("defense rose"));

        engine
            .resolve_turn(PlayerAction::Flee, &mut fx.party(), &mut rng, &mut NoPacing)
            .unwrap();
        assert_eq!(fx.player.stats, base);
    }

    #[test]
    fn test_level_up_on_second_victory() {
        let mut fx = Fixture::new(enemy(10, 1, &["tackle"]));
        fx.player.exp = 50;
        let mut engine = engaged(&fx);
        let mut rng = create_test_rng();
        let ember = fx.move_id("Ember");

        let report = engine
            .resolve_turn(
                PlayerAction::UseMove(ember),
                &mut fx.party(),
                &mut rng,
                &mut NoPacing,
            )
            .unwrap();
        assert_eq!(
            report.outcomes.last(),
            Some(&ActionOutcome::ExperienceGained {
                amount: 50,
                leveled_up: Some(6)
            })
        );
        assert_eq!(fx.player.level, 6);
        assert_eq!(fx.player.max_hp, 44);
        assert!(fx.log.contains("grew to level 6"));
    }
}
