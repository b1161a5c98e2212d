//! Event-sourced undo: every played draw can be reverted exactly.

use std::sync::Arc;

use proptest::prelude::*;

use proc_chess::core::{PlayerId, Position};
use proc_chess::effects::{
    Action, Condition, Connector, ForceAct, ForceKind, ForceType, PieceAct, PieceActKind, PosAct,
    PosSet, StandardAction,
};
use proc_chess::events::Event;
use proc_chess::game::Game;
use proc_chess::pieces::{presets, PieceType, PieceTypeId};
use proc_chess::state::{GameOperator, GameOperatorBuilder};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// A piece whose moves carry chained and forced follow-ups.
fn trickster() -> Arc<PieceType> {
    let shove = Action::new(
        Condition::FreePosition,
        PieceAct::new(PieceActKind::Move).with_connector(Connector::new().with(
            PosSet::ToPosAround,
            PosAct::force(ForceAct::new(ForceKind::RandomAction, ForceType::AnyPiece)),
        )),
        'T',
    );
    Arc::new(
        PieceType::new(PieceTypeId::new(900, 3, "test"), 'T')
            .with_action(pos(0, 1), shove.clone())
            .with_action(pos(1, 0), shove.clone())
            .with_action(pos(-1, 0), shove)
            .with_action(pos(1, 1), StandardAction::Zombie)
            .with_action(pos(-1, 1), StandardAction::Convert)
            .with_action(pos(2, 0), StandardAction::Swap)
            .with_action(pos(0, 2), StandardAction::Rush),
    )
}

/// Place `piece_type` for player two at `p` and for player one at its mirror.
fn both(builder: GameOperatorBuilder, piece_type: &Arc<PieceType>, p: Position) -> GameOperatorBuilder {
    builder
        .piece(PlayerId::TWO, piece_type, p)
        .piece_mirrored(PlayerId::ONE, piece_type, p)
}

/// Mixed 8x8 position exercising most act kinds.
fn skirmish() -> GameOperator {
    let king = presets::king();
    let mut builder = GameOperatorBuilder::new(8, 8)
        .king(PlayerId::TWO, &king, pos(4, 0))
        .king_mirrored(PlayerId::ONE, &king, pos(4, 0));

    let setup = [
        (presets::pawn(), pos(2, 1)),
        (presets::pawn(), pos(3, 1)),
        (presets::pawn(), pos(5, 1)),
        (presets::knight(), pos(1, 0)),
        (presets::bomber(), pos(6, 1)),
        (presets::rook(3), pos(0, 0)),
        (trickster(), pos(4, 2)),
    ];
    for (piece_type, p) in &setup {
        builder = both(builder, piece_type, *p);
    }
    builder.build().unwrap()
}

// =============================================================================
// Undo Is A Left Inverse
// =============================================================================

#[test]
fn test_single_draw_undo_restores_operator() {
    let mut op = skirmish();
    let before = op.clone();

    let draws = op.possible_draws(PlayerId::TWO);
    assert!(!draws.is_empty());
    for draw in draws {
        assert!(op.perform_draw(draw.from, draw.to), "{draw} should perform");
        op.undo_draw();
        assert_eq!(op, before, "undo of {draw} did not restore the board");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_undo_restores_every_snapshot(choices in prop::collection::vec(any::<prop::sample::Index>(), 1..24)) {
        let mut game = Game::new(skirmish());
        let mut snapshots = Vec::new();

        for choice in &choices {
            let draws = game.legal_draws();
            if draws.is_empty() {
                break;
            }
            let draw = draws[choice.index(draws.len())];
            snapshots.push((game.operator().clone(), game.turns()));
            prop_assert!(game.play(draw.from, draw.to));
        }

        while let Some((operator, turns)) = snapshots.pop() {
            game.undo();
            prop_assert_eq!(game.turns(), turns);
            prop_assert_eq!(game.operator(), &operator);
        }
    }

    #[test]
    fn prop_copy_is_isolated(choices in prop::collection::vec(any::<prop::sample::Index>(), 1..12)) {
        let game = Game::new(skirmish());
        let before = game.operator().clone();
        let mut copy = game.copy();

        for choice in &choices {
            let draws = copy.legal_draws();
            if draws.is_empty() {
                break;
            }
            let draw = draws[choice.index(draws.len())];
            copy.play(draw.from, draw.to);
        }

        prop_assert_eq!(game.operator(), &before);
        prop_assert_eq!(game.turns(), 0);
    }
}

// =============================================================================
// King Capture
// =============================================================================

#[test]
fn test_king_capture_undo_keeps_winner_on_operator() {
    let king = presets::king();
    let knight = presets::knight();
    let mut op = GameOperatorBuilder::new(6, 6)
        .king(PlayerId::ONE, &king, pos(0, 5))
        .king(PlayerId::TWO, &king, pos(3, 2))
        .piece(PlayerId::ONE, &knight, pos(2, 4))
        .build()
        .unwrap();
    let king_two = op.king(PlayerId::TWO).map(|k| k.id).unwrap();
    let before = op.clone();

    assert!(op.perform_draw(pos(2, 4), pos(3, 2)));

    assert_eq!(op.winner(), Some(PlayerId::ONE));
    let dead: Vec<_> = op.graveyard().map(|p| (p.id, p.owner)).collect();
    assert_eq!(dead, vec![(king_two, PlayerId::TWO)]);
    let events = op.history().last().unwrap().events().to_vec();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::MoveAndDestroy { target, .. } if *target == king_two)));

    op.undo_draw();

    // Pieces and graveyard come back; the result is left for the game layer
    assert_eq!(op.winner(), Some(PlayerId::ONE));
    assert_eq!(op.piece(king_two).and_then(|k| k.position), Some(pos(3, 2)));
    assert_eq!(op.piece_at(pos(2, 4)).map(|p| p.piece_type.symbol()), Some('N'));
    assert_eq!(op.graveyard_len(), 0);

    op.set_winner(None);
    assert_eq!(op, before);
}

#[test]
fn test_undo_through_game_restores_turn_and_winner() {
    let king = presets::king();
    let mut game = Game::new(
        GameOperatorBuilder::new(4, 4)
            .king(PlayerId::ONE, &king, pos(1, 1))
            .king(PlayerId::TWO, &king, pos(2, 2))
            .build()
            .unwrap(),
    );

    assert!(game.play(pos(1, 1), pos(2, 2)));
    assert_eq!(game.winner(), Some(PlayerId::ONE));

    game.undo();

    assert_eq!(game.winner(), None);
    assert_eq!(game.players_turn(), PlayerId::ONE);
    assert_eq!(game.turns(), 0);
    assert!(game.is_legal(pos(1, 1), pos(2, 2)));
}

#[test]
fn test_winner_is_reset_by_game_not_operator() {
    let king = presets::king();
    let knight = presets::knight();
    let operator = GameOperatorBuilder::new(6, 6)
        .king(PlayerId::ONE, &king, pos(0, 5))
        .king(PlayerId::TWO, &king, pos(3, 2))
        .piece(PlayerId::ONE, &knight, pos(2, 4))
        .build()
        .unwrap();
    let mut bare = operator.copy();
    let mut game = Game::new(operator);

    assert!(bare.perform_draw(pos(2, 4), pos(3, 2)));
    assert!(game.play(pos(2, 4), pos(3, 2)));
    assert_eq!(bare.winner(), game.winner());

    bare.undo_draw();
    game.undo();

    assert_eq!(bare.winner(), Some(PlayerId::ONE));
    assert_eq!(game.winner(), None);
    assert_eq!(bare.board(), game.operator().board());
}

// =============================================================================
// Batches
// =============================================================================

#[test]
fn test_batch_reverts_as_one_draw() {
    let mut op = skirmish();
    let before = op.clone();
    let mut moves = op.possible_draws(PlayerId::TWO);
    moves.truncate(3);

    op.perform_batch(PlayerId::TWO, &moves);
    assert_eq!(op.history().len(), 1);

    op.undo_draw();
    assert_eq!(op, before);
}
