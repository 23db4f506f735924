//! The effect resolver: deployment triggers and the power recomputation
//! pass.
//!
//! Power is layered. A full recompute derives every fielded card's power
//! from the current board and is idempotent: base power, plus the card's
//! accumulated stacked bonus, then an optional [`PowerFormula`] that
//! *replaces* the running value, then the weapon-shop bonus for qualifying
//! units, then the generic on-field modifiers of the owner's other cards.
//! One-shot bonuses written directly to `current_power` (a tactic's reveal
//! bonus, a played-card trigger bonus) live only until the next recompute.
//!
//! Mutation is two-pass throughout: scan the field immutably collecting
//! (slot, delta) pairs, then apply. The original resolver mutated while
//! iterating over aliased card references; the split keeps the same
//! field-order semantics under ownership.

use rustc_hash::FxHashSet;

use crate::cards::{
    names, CardInstance, CardType, EffectKind, EffectRecipient, EffectTiming, PowerFormula,
};
use crate::core::{PlayerId, PlayerMap};

use super::player_state::PlayerState;
use super::slot::FieldSlot;

/// Flat bonus the weapon shop grants qualifying units.
const WEAPON_SHOP_BONUS: i32 = 3;

/// Bonus the smithy gains while the full forge set is fielded.
const FORGE_TRIAD_BONUS: i32 = 15;

/// Distinct literal keywords across a player's fielded cards, excluding
/// the card at `exclude_slot`. Name-implied keywords do not count here.
#[must_use]
pub fn unique_keywords(field: &[FieldSlot], exclude_slot: usize) -> FxHashSet<&str> {
    let mut keywords = FxHashSet::default();
    for slot in field {
        if slot.position == exclude_slot {
            continue;
        }
        if let Some(card) = &slot.card {
            for kw in &card.definition.keywords {
                keywords.insert(kw.as_str());
            }
        }
    }
    keywords
}

/// Fire the `OnOtherPlay` effects of the player's fielded cards in response
/// to the card just placed at `played_slot`.
///
/// Bearer-directed bonuses accumulate into the bearer's stacked bonus and
/// survive recomputes; played-card-directed bonuses are written straight to
/// the deployed card's current power and do not. Returns one transcript
/// line per fired effect, in field order.
pub fn trigger_on_other_play(player: &mut PlayerState, played_slot: usize) -> Vec<String> {
    let played = match &player.field[played_slot].card {
        Some(card) => card,
        None => return Vec::new(),
    };

    let mut fired: Vec<(usize, i32, EffectRecipient)> = Vec::new();
    for slot in &player.field {
        if slot.position == played_slot {
            continue;
        }
        let bearer = match &slot.card {
            Some(card) => card,
            None => continue,
        };
        for effect in bearer
            .definition
            .effects_with_timing(EffectTiming::OnOtherPlay)
        {
            if effect.kind != EffectKind::ModifyPower {
                continue;
            }
            if let Some(required) = effect.requires_card_type {
                if played.card_type() != required {
                    continue;
                }
            }
            if effect.target_keywords.is_empty()
                || !played.has_any_keyword(&effect.target_keywords)
            {
                continue;
            }
            fired.push((slot.position, effect.value, effect.recipient));
        }
    }

    let mut messages = Vec::with_capacity(fired.len());
    for (bearer_slot, value, recipient) in fired {
        match recipient {
            EffectRecipient::Bearer => {
                if let Some(card) = player.field[bearer_slot].card.as_mut() {
                    let old = card.current_power;
                    card.add_stacked_bonus(value);
                    messages.push(format!("{}战力{}→{}", card.name(), old, card.current_power));
                }
            }
            EffectRecipient::PlayedCard => {
                let bearer_name = player.field[bearer_slot]
                    .card
                    .as_ref()
                    .map(|c| c.name().to_string())
                    .unwrap_or_default();
                if let Some(card) = player.field[played_slot].card.as_mut() {
                    let old = card.current_power;
                    card.current_power += value;
                    messages.push(format!(
                        "{}战力{}→{}（{}加成）",
                        card.name(),
                        old,
                        card.current_power,
                        bearer_name
                    ));
                }
            }
        }
    }
    messages
}

/// Recompute the power of every fielded card of one player from scratch.
pub fn recalculate_player_powers(player: &mut PlayerState) {
    let new_powers: Vec<(usize, i32)> = player
        .field
        .iter()
        .filter_map(|slot| {
            slot.card
                .as_ref()
                .map(|card| (slot.position, derive_power(card, slot, &player.field)))
        })
        .collect();

    for (position, power) in new_powers {
        if let Some(card) = player.field[position].card.as_mut() {
            card.current_power = power;
        }
    }
}

/// Recompute both players' fields.
pub fn recalculate_all_powers(players: &mut PlayerMap<PlayerState>) {
    for id in PlayerId::all(players.player_count()) {
        recalculate_player_powers(&mut players[id]);
    }
}

/// Derive one card's power from the current board.
fn derive_power(card: &CardInstance, slot: &FieldSlot, field: &[FieldSlot]) -> i32 {
    let mut power = card.base_power();

    if card.stacked_bonus > 0 {
        power += card.stacked_bonus;
    }

    if let Some(formula) = card.definition.formula {
        match formula {
            PowerFormula::UniqueKeywords => {
                power = card.base_power() + unique_keywords(field, slot.position).len() as i32;
            }
            PowerFormula::WildInstinct => {
                power = card.base_power();
                let spooked = others(field, slot.position).any(|other| {
                    other.has_any_keyword(&[
                        crate::cards::keywords::HUNTER,
                        crate::cards::keywords::FARMER,
                        crate::cards::keywords::ADVENTURER,
                    ])
                });
                if spooked {
                    power -= 2;
                }
                let fed = others(field, slot.position)
                    .any(|other| other.name() == names::FARMLAND || other.name() == names::FOREST);
                if fed {
                    power += 2;
                }
            }
            PowerFormula::AttachedFarmhands => {
                power = field
                    .iter()
                    .filter(|s| s.is_extra && s.parent_slot == Some(slot.position))
                    .filter_map(|s| s.card.as_ref())
                    .filter(|c| c.has_keyword(crate::cards::keywords::FARMING))
                    .count() as i32;
            }
            PowerFormula::ForgeTriad => {
                let fielded = |name: &str| {
                    field
                        .iter()
                        .filter_map(|s| s.card.as_ref())
                        .any(|c| c.name() == name)
                };
                if fielded(names::DWARVEN_BLACKSMITH)
                    && fielded(names::FURNACE)
                    && fielded(names::PLATE_ARMOR)
                {
                    power = card.base_power() + FORGE_TRIAD_BONUS;
                }
            }
        }
    }

    // Weapon-shop layer: a flat bonus for qualifying units. The shop's own
    // on-field effect ALSO matches in the generic pass below, so a unit
    // covered by both receives both. Original behavior, kept as-is.
    let shop_fielded = field
        .iter()
        .filter_map(|s| s.card.as_ref())
        .any(|c| c.name() == names::WEAPON_SHOP);
    if shop_fielded && card.is_unit() {
        let qualifies = card.has_any_keyword(&[
            crate::cards::keywords::WARRIOR,
            crate::cards::keywords::SOLDIER,
            crate::cards::keywords::ADVENTURER,
        ]);
        if qualifies {
            power += WEAPON_SHOP_BONUS;
        }
    }

    // Generic pass: other fielded cards' continuous modifiers.
    for other in others(field, slot.position) {
        for effect in other.definition.effects_with_timing(EffectTiming::OnField) {
            if effect.kind == EffectKind::ModifyPower
                && !effect.target_keywords.is_empty()
                && card.has_any_keyword(&effect.target_keywords)
            {
                power += effect.value;
            }
        }
    }

    power
}

/// Fielded cards other than the one at `exclude_slot`, in field order.
fn others(field: &[FieldSlot], exclude_slot: usize) -> impl Iterator<Item = &CardInstance> {
    field
        .iter()
        .filter(move |s| s.position != exclude_slot)
        .filter_map(|s| s.card.as_ref())
}

/// Slot positions of the player's fielded cards matching any of `keywords`,
/// in field order.
#[must_use]
pub fn valid_targets(player: &PlayerState, keywords: &[String]) -> Vec<usize> {
    player
        .field
        .iter()
        .filter(|slot| {
            slot.card
                .as_ref()
                .is_some_and(|card| card.has_any_keyword(keywords))
        })
        .map(|slot| slot.position)
        .collect()
}

/// Whether a card's power has dropped below zero and it is not an
/// environment. Reported, not enforced: no rule currently removes the card.
#[must_use]
pub fn check_destroy(card: &CardInstance) -> bool {
    card.current_power < 0 && card.card_type() != CardType::Environment
}
