//! Randomized walks over the action space.
//!
//! The scripts below drive a session with arbitrary (mostly nonsensical)
//! inputs, swallowing rejections, and check the invariants that must hold
//! no matter what: card conservation, redaction rules, and determinism of
//! the whole walk under a fixed seed and script.

use proptest::prelude::*;

use reforge::engine::ReforgeOption;
use reforge::{CardCatalog, GameSession, Phase, PlayerId, SessionView};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn seats() -> [(String, String); 2] {
    [
        ("u0".to_string(), "Alice".to_string()),
        ("u1".to_string(), "Bob".to_string()),
    ]
}

/// One scripted step: an arbitrary action for an arbitrary player, with
/// arbitrary indices. Rejections are expected and ignored.
fn apply_step(session: &mut GameSession, step: u8, index: u8) {
    let player = if step % 2 == 0 { P0 } else { P1 };
    let _ = match step % 7 {
        0 => session.choose_play(player),
        1 => session.choose_reforge(player),
        2 => session.play_card(
            player,
            index as usize % 4,
            index as usize % 8,
        ),
        3 => session.execute_reforge(
            player,
            &[ReforgeOption::GainCost, ReforgeOption::GainPower],
            None,
        ),
        4 => session.execute_reforge(
            player,
            &[ReforgeOption::Redraw, ReforgeOption::GainCost],
            Some(index as usize % 4),
        ),
        5 => session.skip_turn(player),
        _ => session.start_new_round(),
    };
}

fn check_invariants(session: &GameSession) {
    // Conservation: every dealt instance is reachable from exactly one
    // zone, so per-player counts never change.
    assert_eq!(session.player(P0).instance_count(), 15);
    assert_eq!(session.player(P1).instance_count(), 15);

    for requester in [P0, P1] {
        let view = SessionView::for_player(session, requester);

        // Requester first, opponent's private zones empty.
        assert_eq!(view.players[0].uid, session.player(requester).uid);
        assert!(view.players[1].hand.is_empty());
        assert!(view.players[1].deck.is_empty());
        assert_eq!(
            view.players[1].hand_count,
            session.player(requester.opponent()).hand.len()
        );

        // Unrevealed spending is invisible: each seat's visible pool is
        // the authoritative pool plus exactly the hidden spend.
        for (seat, id) in [(0, requester), (1, requester.opponent())] {
            let hidden: i32 = session.pending_reveals(id).iter().map(|r| r.cost).sum();
            assert_eq!(
                view.players[seat].current_cost,
                session.player(id).current_cost + hidden
            );
        }
    }
}

proptest! {
    #[test]
    fn random_walks_preserve_invariants(
        seed in any::<u64>(),
        script in prop::collection::vec((0u8..7, any::<u8>()), 1..60),
    ) {
        let mut session = GameSession::new(&CardCatalog::standard(), seats(), seed);
        check_invariants(&session);

        for (step, index) in script {
            apply_step(&mut session, step, index);
            check_invariants(&session);
            if session.phase() == Phase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn walks_are_deterministic(
        seed in any::<u64>(),
        script in prop::collection::vec((0u8..7, any::<u8>()), 1..40),
    ) {
        let mut a = GameSession::new(&CardCatalog::standard(), seats(), seed);
        let mut b = GameSession::new(&CardCatalog::standard(), seats(), seed);

        for (step, index) in script {
            apply_step(&mut a, step, index);
            apply_step(&mut b, step, index);
        }

        prop_assert_eq!(a, b);
    }

    #[test]
    fn same_seed_deals_identical_hands(seed in any::<u64>()) {
        let a = GameSession::new(&CardCatalog::standard(), seats(), seed);
        let b = GameSession::new(&CardCatalog::standard(), seats(), seed);

        for id in [P0, P1] {
            let hand = |s: &GameSession| -> Vec<String> {
                s.player(id).hand.iter().map(|c| c.name().to_string()).collect()
            };
            prop_assert_eq!(hand(&a), hand(&b));
        }
    }
}
