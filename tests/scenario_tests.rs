//! Multi-round scenarios driven through the public API.

use reforge::cards::names;
use reforge::engine::{DecisionChoice, ReforgeOption, STARTING_COST};
use reforge::{
    CardCatalog, CardId, EngineError, GameResult, GameSession, Phase, PlayerId,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn seats() -> [(String, String); 2] {
    [
        ("u0".to_string(), "Alice".to_string()),
        ("u1".to_string(), "Bob".to_string()),
    ]
}

/// A catalog restricted to the given card ids, cloned from the standard
/// set. With three cards the whole deck is drawn into the opening hand,
/// which makes scripted plays deterministic under any shuffle.
fn catalog_of(ids: &[u32]) -> CardCatalog {
    let standard = CardCatalog::standard();
    let mut catalog = CardCatalog::new();
    for &id in ids {
        let def = standard
            .get(CardId::new(id))
            .unwrap_or_else(|| panic!("no card {id} in the standard set"));
        catalog.register(def.clone());
    }
    catalog
}

fn session_of(ids: &[u32]) -> GameSession {
    GameSession::new(&catalog_of(ids), seats(), 7)
}

fn hand_index(s: &GameSession, p: PlayerId, name: &str) -> usize {
    s.player(p)
        .hand
        .iter()
        .position(|c| c.name() == name)
        .unwrap_or_else(|| panic!("{name} not in hand"))
}

fn power_at(s: &GameSession, p: PlayerId, slot: usize) -> i32 {
    s.player(p).field[slot]
        .card
        .as_ref()
        .map(|c| c.current_power)
        .unwrap_or_else(|| panic!("slot {slot} is empty"))
}

fn both_choose_play(s: &mut GameSession) {
    s.choose_play(P0).unwrap();
    s.choose_play(P1).unwrap();
}

/// P1 sits the round out, P0 commits to playing.
fn p0_plays_round(s: &mut GameSession) {
    s.choose_play(P0).unwrap();
    s.skip_turn(P1).unwrap();
}

#[test]
fn worker_grants_one_extra_play() {
    // 辛勤的苦工, 野猪, 矮人铁匠
    let mut s = session_of(&[1, 6, 5]);
    both_choose_play(&mut s);

    let worker = hand_index(&s, P0, names::WORKER);
    s.play_card(P0, worker, 0).unwrap();
    assert!(!s.is_ready(P0));

    let boar = hand_index(&s, P0, names::BOAR);
    s.play_card(P0, boar, 1).unwrap();
    assert!(s.is_ready(P0));

    // The grant is spent; a third play is refused.
    let smith = hand_index(&s, P0, names::DWARVEN_BLACKSMITH);
    assert_eq!(s.play_card(P0, smith, 2), Err(EngineError::AlreadyPlayed));

    assert_eq!(s.player(P0).current_cost, STARTING_COST - 2);
}

#[test]
fn warrior_stacks_and_weapon_shop_layers_combine() {
    // 战士, 橡木武器店, 金牌烤火鸡
    let mut s = session_of(&[8, 11, 13]);

    p0_plays_round(&mut s);
    let warrior = hand_index(&s, P0, names::WARRIOR);
    s.play_card(P0, warrior, 0).unwrap();
    assert_eq!(power_at(&s, P0, 0), 3);
    s.start_new_round().unwrap();

    p0_plays_round(&mut s);
    let shop = hand_index(&s, P0, names::WEAPON_SHOP);
    s.play_card(P0, shop, 1).unwrap();

    // The shop's 武器 keyword fires the warrior's stacking trigger (+1),
    // then the recompute adds the shop bonus through both of its layers:
    // base 3 + stacked 1 + 3 + 3.
    assert_eq!(power_at(&s, P0, 0), 10);

    // The stacked point survives the round boundary.
    s.start_new_round().unwrap();
    assert_eq!(power_at(&s, P0, 0), 10);
}

#[test]
fn mage_bonus_persists_across_rounds() {
    // 法师, 魔法飞弹, 金牌烤火鸡
    let mut s = session_of(&[3, 15, 13]);

    p0_plays_round(&mut s);
    let mage = hand_index(&s, P0, names::MAGE);
    s.play_card(P0, mage, 0).unwrap();
    assert_eq!(power_at(&s, P0, 0), 1);
    s.start_new_round().unwrap();

    p0_plays_round(&mut s);
    let missile = hand_index(&s, P0, names::MAGIC_MISSILE);
    s.play_card(P0, missile, 1).unwrap();

    // Magic tactic: the mage stacks +2 and the opponent loses 2 cost.
    assert_eq!(power_at(&s, P0, 0), 3);
    assert_eq!(s.player(P1).current_cost, STARTING_COST - 2);

    s.start_new_round().unwrap();
    assert_eq!(power_at(&s, P0, 0), 3);
}

#[test]
fn blacksmith_bonus_on_played_card_is_transient() {
    // 矮人铁匠, 橡木武器店, 金牌烤火鸡
    let mut s = session_of(&[5, 11, 13]);

    p0_plays_round(&mut s);
    let smith = hand_index(&s, P0, names::DWARVEN_BLACKSMITH);
    s.play_card(P0, smith, 0).unwrap();
    s.start_new_round().unwrap();

    p0_plays_round(&mut s);
    let shop = hand_index(&s, P0, names::WEAPON_SHOP);
    s.play_card(P0, shop, 1).unwrap();

    // The +2 landed on the shop during deployment but the immediate
    // recompute rebuilt the environment from base power.
    assert!(s.message().contains("矮人铁匠"));
    assert_eq!(power_at(&s, P0, 1), 0);
}

#[test]
fn reforge_and_play_in_the_same_round() {
    let mut s = session_of(&[6, 9, 13]);
    s.choose_reforge(P0).unwrap();
    s.choose_play(P1).unwrap();

    s.execute_reforge(P0, &[ReforgeOption::GainCost, ReforgeOption::GainPower], None)
        .unwrap();
    let boar = hand_index(&s, P1, names::BOAR);
    s.play_card(P1, boar, 0).unwrap();

    assert_eq!(s.player(P0).current_cost, STARTING_COST + 2);
    assert_eq!(s.player(P0).bonus_power, 1);

    s.start_new_round().unwrap();
    assert_eq!(s.round(), 2);
    // The reforge bonus is permanent.
    assert_eq!(s.player(P0).bonus_power, 1);
}

#[test]
fn decision_can_change_until_both_commit() {
    let mut s = session_of(&[6, 9, 13]);

    s.choose_play(P0).unwrap();
    s.choose_reforge(P0).unwrap();
    s.choose_play(P0).unwrap();
    assert_eq!(s.decision(P0), Some(DecisionChoice::Play));
    assert_eq!(s.phase(), Phase::Decision);

    s.choose_reforge(P1).unwrap();
    assert_eq!(s.phase(), Phase::Action);

    // Acting against the final commitment is refused.
    assert_eq!(
        s.execute_reforge(P0, &[ReforgeOption::GainCost, ReforgeOption::GainPower], None),
        Err(EngineError::DecisionRequired {
            required: DecisionChoice::Reforge,
        })
    );
}

#[test]
fn tactic_with_no_valid_target_is_still_spent() {
    let mut s = session_of(&[14, 6, 9]); // 生命药水 targets 职业者
    both_choose_play(&mut s);

    let potion = hand_index(&s, P0, names::LIFE_POTION);
    s.play_card(P0, potion, 0).unwrap();

    assert_eq!(s.player(P0).discard.len(), 1);
    assert_eq!(s.player(P0).current_cost, STARTING_COST - 1);
    assert!(s.player(P0).field[0].is_empty());
    assert!(s.message().contains("没有符合条件的目标"));
}

/// Plays a full game to the natural end: P0 fills all six base slots over
/// several rounds (reforging for cost when the hand is unaffordable) and
/// the game ends one full round after the trigger.
#[test]
fn filling_the_field_ends_the_game_one_round_later() {
    // Six units, total cost 8: 辛勤的苦工, 驮用马, 矮人铁匠, 野猪, 民兵, 战士.
    let mut s = GameSession::new(&catalog_of(&[1, 2, 5, 6, 7, 8]), seats(), 11);

    let cheapest_affordable = |s: &GameSession| -> Option<usize> {
        let player = s.player(P0);
        player
            .hand
            .iter()
            .enumerate()
            .filter(|(_, c)| c.cost() <= player.current_cost)
            .min_by_key(|(_, c)| c.cost())
            .map(|(i, _)| i)
    };
    let first_empty_base = |s: &GameSession| -> usize {
        s.player(P0)
            .field
            .iter()
            .take(6)
            .position(|slot| slot.is_empty())
            .expect("a base slot is free")
    };

    let mut rounds = 0;
    while !s.is_final_round() {
        rounds += 1;
        assert!(rounds < 20, "the game must converge");

        if cheapest_affordable(&s).is_some() {
            s.choose_play(P0).unwrap();
            s.skip_turn(P1).unwrap();
            while !s.is_ready(P0) {
                match cheapest_affordable(&s) {
                    Some(card) => {
                        let slot = first_empty_base(&s);
                        s.play_card(P0, card, slot).unwrap();
                    }
                    // An extra-play grant with an unaffordable hand.
                    None => s.skip_turn(P0).unwrap(),
                }
            }
        } else {
            s.choose_reforge(P0).unwrap();
            s.skip_turn(P1).unwrap();
            s.execute_reforge(P0, &[ReforgeOption::GainCost, ReforgeOption::GainPower], None)
                .unwrap();
        }

        // Nothing leaks or duplicates along the way.
        assert_eq!(s.player(P0).instance_count(), 6);
        assert_eq!(s.player(P1).instance_count(), 6);

        if s.is_final_round() {
            break;
        }
        s.start_new_round().unwrap();
    }

    let trigger_round = s.round();
    s.start_new_round().unwrap();

    // The filler is locked out of the final round.
    assert_eq!(s.round(), trigger_round + 1);
    assert_eq!(s.decision(P0), Some(DecisionChoice::Skip));
    assert!(s.is_ready(P0));

    s.skip_turn(P1).unwrap();
    s.start_new_round().unwrap();

    assert_eq!(s.phase(), Phase::GameOver);
    // Six scored units plus reforge bonuses beat an empty field.
    assert_eq!(s.result(), Some(GameResult::Winner(P0)));
    assert_eq!(s.start_new_round(), Err(EngineError::GameOver));
}

#[test]
fn scores_count_base_slots_and_bonus_power_only() {
    // 驮用马 creates an extra slot; a unit parked there must not score.
    let mut s = session_of(&[2, 6, 13]);

    p0_plays_round(&mut s);
    let horse = hand_index(&s, P0, names::PACK_HORSE);
    s.play_card(P0, horse, 0).unwrap();
    s.start_new_round().unwrap();

    p0_plays_round(&mut s);
    let boar = hand_index(&s, P0, names::BOAR);
    s.play_card(P0, boar, 6).unwrap(); // the spawned extra slot

    let boar_power = power_at(&s, P0, 6);
    assert!(boar_power > 0);

    s.end_game().unwrap();

    // 驮用马 base 1 on a base slot; the boar's power is excluded.
    assert_eq!(s.player(P0).total_power(), power_at(&s, P0, 0));
}
