//! The authoritative game session: a two-player simultaneous-turn state
//! machine.
//!
//! Each round runs Decision (both players commit to playing or reforging,
//! without seeing the other's choice) then Action (both act). Cards played
//! during Action stay hidden from the opponent until the round boundary;
//! [`GameSession`] records them in per-player pending-reveal lists that the
//! view layer consults. Round advance requires both players ready, reveals
//! everything, and deals one card each.
//!
//! Filling all six base slots arms the final round: the game ends at the
//! start of the second round after the trigger, and the triggering player
//! sits out the last round with an automatic skip.
//!
//! Every operation validates fully before its first mutation, so a
//! rejected action leaves the session untouched.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardInstance, EffectKind, EffectTiming, InstanceId};
use crate::core::{GameRng, PlayerId, PlayerMap};

use super::effects;
use super::error::EngineError;
use super::player_state::PlayerState;
use super::slot::FieldSlot;

/// Cost pool each player starts with.
pub const STARTING_COST: i32 = 4;

/// Cards dealt to each hand at session start.
pub const STARTING_HAND_SIZE: usize = 3;

/// Where the session is in the round cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Both players commit a choice for the round.
    Decision,
    /// Both players carry out their committed choice.
    Action,
    /// Terminal. No further actions are accepted.
    GameOver,
}

/// What a player committed to during Decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionChoice {
    Play,
    Reforge,
    Skip,
}

/// One of the two benefits picked for a reforge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReforgeOption {
    /// Restore 2 cost.
    GainCost,
    /// Permanent +1 to the player's bonus power.
    GainPower,
    /// Put one hand card under the deck and draw a replacement.
    Redraw,
}

/// A card played this round and not yet revealed to the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReveal {
    pub instance_id: InstanceId,
    pub slot_index: usize,
    /// Cost paid, added back when redacting the owner's visible pool.
    pub cost: i32,
}

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

/// Authoritative state for one game room.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    players: PlayerMap<PlayerState>,
    round: u32,
    phase: Phase,
    is_final_round: bool,
    final_round_triggered_by: Option<PlayerId>,
    final_round_start_round: Option<u32>,
    decisions: PlayerMap<Option<DecisionChoice>>,
    ready: PlayerMap<bool>,
    pending_reveals: PlayerMap<Vec<PendingReveal>>,
    message: String,
    transcript: Vector<String>,
    result: Option<GameResult>,
    rng: GameRng,
}

impl GameSession {
    /// Start a session: shuffle a deck per seat, deal the opening hands,
    /// and enter round 1's Decision phase.
    ///
    /// Sessions built from the same catalog and seed deal identical decks.
    #[must_use]
    pub fn new(catalog: &CardCatalog, seats: [(String, String); 2], seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut next_instance_id = 0;

        let players = PlayerMap::from_vec(
            seats
                .into_iter()
                .map(|(uid, name)| {
                    let mut deck = catalog.create_deck(&mut next_instance_id);
                    rng.shuffle(&mut deck);
                    let mut player = PlayerState::new(uid, name, deck, STARTING_COST);
                    for _ in 0..STARTING_HAND_SIZE {
                        player.draw_card();
                    }
                    player
                })
                .collect(),
        );

        let message = "回合 1 - 选择出牌或重铸".to_string();
        let mut transcript = Vector::new();
        transcript.push_back(message.clone());

        Self {
            players,
            round: 1,
            phase: Phase::Decision,
            is_final_round: false,
            final_round_triggered_by: None,
            final_round_start_round: None,
            decisions: PlayerMap::with_value(2, None),
            ready: PlayerMap::with_value(2, false),
            pending_reveals: PlayerMap::with_value(2, Vec::new()),
            message,
            transcript,
            result: None,
            rng,
        }
    }

    /// Resolve a transport-layer uid to a seat.
    pub fn player_id_for_uid(&self, uid: &str) -> Result<PlayerId, EngineError> {
        self.players
            .iter()
            .find(|(_, p)| p.uid == uid)
            .map(|(id, _)| id)
            .ok_or_else(|| EngineError::UnknownPlayer(uid.to_string()))
    }

    /// Commit to playing a card this round.
    pub fn choose_play(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.record_decision(player, DecisionChoice::Play)
    }

    /// Commit to reforging this round.
    pub fn choose_reforge(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.record_decision(player, DecisionChoice::Reforge)
    }

    /// Record a decision. Repeated calls while the phase is still Decision
    /// overwrite the earlier choice; the commitment locks in when both
    /// players have decided and the phase flips to Action.
    fn record_decision(
        &mut self,
        player: PlayerId,
        choice: DecisionChoice,
    ) -> Result<(), EngineError> {
        self.ensure_phase(Phase::Decision)?;

        self.decisions[player] = Some(choice);

        if self.decisions.all(Option::is_some) {
            self.phase = Phase::Action;
            let count = |c: DecisionChoice| {
                self.decisions
                    .iter()
                    .filter(|(_, d)| **d == Some(c))
                    .count()
            };
            let summary = if count(DecisionChoice::Play) == 2 {
                "双方已决策，开始行动（双方都选择出牌）"
            } else if count(DecisionChoice::Reforge) == 2 {
                "双方已决策，开始行动（双方都选择重铸）"
            } else {
                "双方已决策，开始行动（一方出牌，一方重铸）"
            };
            self.log(summary.to_string());
        } else {
            self.log("对方已决策，等待另一方...".to_string());
        }
        Ok(())
    }

    /// Play the card at `card_index` from hand into `slot_index`.
    ///
    /// Validation happens in a fixed order, entirely before any mutation:
    /// phase, committed decision, hand index, cost, play allowance, slot
    /// index, occupancy, slot eligibility.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card_index: usize,
        slot_index: usize,
    ) -> Result<(), EngineError> {
        self.ensure_phase(Phase::Action)?;
        if self.decisions[player] != Some(DecisionChoice::Play) {
            return Err(EngineError::DecisionRequired {
                required: DecisionChoice::Play,
            });
        }

        let state = &self.players[player];
        if card_index >= state.hand.len() {
            return Err(EngineError::InvalidHandIndex {
                index: card_index,
                hand_size: state.hand.len(),
            });
        }
        let card_cost = state.hand[card_index].cost();
        if state.current_cost < card_cost {
            return Err(EngineError::InsufficientCost {
                needed: card_cost,
                available: state.current_cost,
            });
        }
        if state.has_played_this_turn && !state.can_play_extra {
            return Err(EngineError::AlreadyPlayed);
        }
        if slot_index >= state.field.len() {
            return Err(EngineError::InvalidSlotIndex {
                index: slot_index,
                field_size: state.field.len(),
            });
        }
        let slot = &state.field[slot_index];
        if !slot.is_empty() {
            return Err(EngineError::SlotOccupied { index: slot_index });
        }
        if !slot.accepts(state.hand[card_index].card_type()) {
            return Err(EngineError::SlotRequiresUnit { index: slot_index });
        }

        let player_name = state.name.clone();

        let state = &mut self.players[player];
        let card = state.hand.remove(card_index);
        let instance_id = card.instance_id;
        state.current_cost -= card_cost;
        if state.has_played_this_turn && state.can_play_extra {
            state.can_play_extra = false;
        } else {
            state.has_played_this_turn = true;
        }

        let mut message = format!("{player_name} 打出了一张牌（费用-{card_cost}）");
        for fragment in self.deploy(player, card, slot_index) {
            message.push_str(" | ");
            message.push_str(&fragment);
        }

        self.pending_reveals[player].push(PendingReveal {
            instance_id,
            slot_index,
            cost: card_cost,
        });

        if !self.players[player].can_play_extra {
            self.ready[player] = true;
            if self.ready.all(|&r| r) {
                message.push_str(" | 双方都已完成，等待进入下一回合...");
            }
        }

        self.log(message);
        Ok(())
    }

    /// Place a card into a slot and resolve what its arrival triggers.
    /// Returns transcript fragments in resolution order.
    fn deploy(&mut self, player: PlayerId, card: CardInstance, slot_index: usize) -> Vec<String> {
        let is_persistent = card.definition.is_persistent;
        let deploy_kinds: Vec<EffectKind> = card
            .definition
            .effects_with_timing(EffectTiming::OnDeploy)
            .map(|e| e.kind)
            .collect();

        self.players[player].field[slot_index].card = Some(card);

        if !is_persistent {
            return self.resolve_tactic(player, slot_index);
        }

        let mut messages = Vec::new();

        for kind in deploy_kinds {
            match kind {
                EffectKind::ExtraPlay => {
                    self.players[player].can_play_extra = true;
                    messages.push("效果：可以再打出一张牌！".to_string());
                }
                EffectKind::CreateSlot => {
                    let field = &mut self.players[player].field;
                    let position = field.len();
                    field.push(FieldSlot::extra(position, slot_index));
                    messages.push("创建了额外槽位".to_string());
                }
                _ => {}
            }
        }

        messages.extend(effects::trigger_on_other_play(
            &mut self.players[player],
            slot_index,
        ));

        effects::recalculate_all_powers(&mut self.players);

        if self.players[player].base_field_full() && !self.is_final_round {
            self.is_final_round = true;
            self.final_round_triggered_by = Some(player);
            self.final_round_start_round = Some(self.round);
            messages.push(format!(
                "{} 填满了场地！进入最后一回合！",
                self.players[player].name
            ));
        }

        messages
    }

    /// Resolve a tactic: fire play triggers, apply its reveal effect, and
    /// discard it. No recompute follows, so a reveal bonus written to a
    /// target's current power persists only until the next full pass.
    fn resolve_tactic(&mut self, player: PlayerId, slot_index: usize) -> Vec<String> {
        let mut messages =
            effects::trigger_on_other_play(&mut self.players[player], slot_index);

        let reveal = self.players[player].field[slot_index]
            .card
            .as_ref()
            .and_then(|card| {
                card.definition
                    .effects_with_timing(EffectTiming::OnReveal)
                    .next()
                    .cloned()
            });

        match reveal {
            Some(effect)
                if effect.kind == EffectKind::ModifyPower
                    && !effect.target_keywords.is_empty() =>
            {
                let targets =
                    effects::valid_targets(&self.players[player], &effect.target_keywords);
                match targets.first() {
                    None => messages.push("没有符合条件的目标".to_string()),
                    Some(&target) => {
                        if let Some(card) = self.players[player].field[target].card.as_mut() {
                            card.current_power += effect.value;
                            messages.push(format!("{} 战力+{}", card.name(), effect.value));
                        }
                    }
                }
            }
            Some(effect) if effect.kind == EffectKind::ModifyCost => {
                let opponent = player.opponent();
                self.players[opponent].current_cost += effect.value;
                messages.push(format!(
                    "{} 费用{}",
                    self.players[opponent].name, effect.value
                ));
            }
            _ => {}
        }

        if let Some(card) = self.players[player].field[slot_index].card.take() {
            self.players[player].discard.push(card);
        }
        messages
    }

    /// Carry out a committed reforge: exactly two distinct options.
    pub fn execute_reforge(
        &mut self,
        player: PlayerId,
        options: &[ReforgeOption],
        selected_card_index: Option<usize>,
    ) -> Result<(), EngineError> {
        self.ensure_phase(Phase::Action)?;
        if self.decisions[player] != Some(DecisionChoice::Reforge) {
            return Err(EngineError::DecisionRequired {
                required: DecisionChoice::Reforge,
            });
        }
        if self.ready[player] {
            return Err(EngineError::AlreadyPlayed);
        }
        if options.len() != 2 {
            return Err(EngineError::ReforgeOptionCount {
                given: options.len(),
            });
        }
        if options[0] == options[1] {
            return Err(EngineError::DuplicateReforgeOptions);
        }
        let redraw_index = if options.contains(&ReforgeOption::Redraw) {
            let index = selected_card_index.ok_or(EngineError::RedrawIndexRequired)?;
            if index >= self.players[player].hand.len() {
                return Err(EngineError::RedrawIndexRequired);
            }
            Some(index)
        } else {
            None
        };

        let mut fragments = Vec::with_capacity(2);
        for option in options {
            let state = &mut self.players[player];
            match option {
                ReforgeOption::GainCost => {
                    state.current_cost += 2;
                    fragments.push("恢复2费用".to_string());
                }
                ReforgeOption::GainPower => {
                    state.bonus_power += 1;
                    fragments.push("总战力+1".to_string());
                }
                ReforgeOption::Redraw => {
                    if let Some(index) = redraw_index {
                        let card = state.hand.remove(index);
                        let old_name = card.name().to_string();
                        state.deck.insert(0, card);
                        if let Some(new_card) = state.draw_card() {
                            fragments.push(format!("换牌({}→{})", old_name, new_card.name()));
                        }
                    }
                }
            }
        }

        let mut message = format!(
            "{} 重铸：{}",
            self.players[player].name,
            fragments.join(" + ")
        );

        self.ready[player] = true;
        if self.ready.all(|&r| r) {
            message.push_str(" | 双方都已完成，等待进入下一回合...");
        }
        self.log(message);
        Ok(())
    }

    /// Pass for the rest of the round. Legal in both Decision and Action.
    pub fn skip_turn(&mut self, player: PlayerId) -> Result<(), EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }

        self.decisions[player] = Some(DecisionChoice::Skip);
        self.ready[player] = true;

        if self.phase == Phase::Decision && self.decisions.all(Option::is_some) {
            self.phase = Phase::Action;
        }

        let name = &self.players[player].name;
        let message = if self.ready.all(|&r| r) {
            format!("{name} 跳过回合 | 双方都已完成，等待进入下一回合...")
        } else {
            format!("{name} 跳过回合，等待对手...")
        };
        self.log(message);
        Ok(())
    }

    /// Advance to the next round: reveal everything played, end the game
    /// if the armed final round has run its course, otherwise reset the
    /// round state and deal one card each.
    ///
    /// The player who filled their field sits the new round out with an
    /// automatic skip and draws nothing.
    pub fn start_new_round(&mut self) -> Result<(), EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        if !self.ready.all(|&r| r) {
            return Err(EngineError::PlayersNotReady);
        }

        // Reveal: the cards are already on the field, the opponent just
        // gets to see them now.
        for id in PlayerId::all(self.players.player_count()) {
            self.pending_reveals[id].clear();
        }

        if self.is_final_round {
            if let Some(start) = self.final_round_start_round {
                if self.round - start >= 1 {
                    self.finish();
                    return Ok(());
                }
            }
        }

        self.round += 1;

        for id in PlayerId::all(self.players.player_count()) {
            self.decisions[id] = None;
            self.ready[id] = false;
            self.players[id].reset_round_flags();
        }

        for id in PlayerId::all(self.players.player_count()) {
            if self.is_final_round && self.final_round_triggered_by == Some(id) {
                self.decisions[id] = Some(DecisionChoice::Skip);
                self.ready[id] = true;
            } else {
                self.players[id].draw_card();
            }
        }

        self.phase = Phase::Decision;

        let undecided: Vec<PlayerId> = self
            .decisions
            .iter()
            .filter(|(_, d)| d.is_none())
            .map(|(id, _)| id)
            .collect();
        let message = if self.is_final_round && undecided.len() == 1 {
            format!(
                "回合 {} - 最后一回合！{} 选择出牌或重铸",
                self.round, self.players[undecided[0]].name
            )
        } else if self.is_final_round {
            format!("回合 {} - 最后一回合！选择出牌或重铸", self.round)
        } else {
            format!("回合 {} - 选择出牌或重铸", self.round)
        };
        self.log(message);
        Ok(())
    }

    /// End the game now and score it.
    pub fn end_game(&mut self) -> Result<(), EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        self.finish();
        Ok(())
    }

    fn finish(&mut self) {
        self.phase = Phase::GameOver;

        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let totals = (
            self.players[p0].total_power(),
            self.players[p1].total_power(),
        );

        let mut message = format!(
            "游戏结束！\n{}战力：{}\n{}战力：{}\n",
            self.players[p0].name, totals.0, self.players[p1].name, totals.1
        );
        self.result = Some(if totals.0 > totals.1 {
            message.push_str(&format!("{}获胜！", self.players[p0].name));
            GameResult::Winner(p0)
        } else if totals.1 > totals.0 {
            message.push_str(&format!("{}获胜！", self.players[p1].name));
            GameResult::Winner(p1)
        } else {
            message.push_str("平局！");
            GameResult::Draw
        });
        self.log(message);
    }

    /// Fielded cards whose power has gone negative and that the rules
    /// would destroy. Reported for display; nothing removes them.
    #[must_use]
    pub fn destroyed_cards(&self) -> Vec<(PlayerId, usize)> {
        self.players
            .iter()
            .flat_map(|(id, state)| {
                state
                    .field
                    .iter()
                    .filter(|slot| {
                        slot.card
                            .as_ref()
                            .is_some_and(effects::check_destroy)
                    })
                    .map(move |slot| (id, slot.position))
            })
            .collect()
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), EngineError> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        if self.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn log(&mut self, message: String) {
        self.transcript.push_back(message.clone());
        self.message = message;
    }

    // Read accessors, used by the view layer and tests.

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.is_final_round
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every message ever logged, in order.
    #[must_use]
    pub fn transcript(&self) -> &Vector<String> {
        &self.transcript
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn pending_reveals(&self, id: PlayerId) -> &[PendingReveal] {
        &self.pending_reveals[id]
    }

    #[must_use]
    pub fn decision(&self, id: PlayerId) -> Option<DecisionChoice> {
        self.decisions[id]
    }

    #[must_use]
    pub fn is_ready(&self, id: PlayerId) -> bool {
        self.ready[id]
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
