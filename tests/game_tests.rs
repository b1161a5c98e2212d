//! Game integration tests: turn order, legality, batches and surrender.

use proc_chess::core::{Draw, PlayerId, Position};
use proc_chess::game::Game;
use proc_chess::pieces::presets;
use proc_chess::state::{BuildError, GameOperatorBuilder};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Kings on the back ranks, a pawn in front of each.
fn small_game() -> Game {
    let king = presets::king();
    let pawn = presets::pawn();
    let operator = GameOperatorBuilder::new(5, 5)
        .king(PlayerId::TWO, &king, pos(2, 0))
        .king_mirrored(PlayerId::ONE, &king, pos(2, 0))
        .piece(PlayerId::TWO, &pawn, pos(1, 1))
        .piece_mirrored(PlayerId::ONE, &pawn, pos(1, 1))
        .build()
        .unwrap();
    Game::new(operator)
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn test_builder_rejects_incomplete_setups() {
    let king = presets::king();

    let missing = GameOperatorBuilder::new(5, 5)
        .king(PlayerId::ONE, &king, pos(0, 0))
        .build();
    assert_eq!(missing.unwrap_err(), BuildError::MissingKing(PlayerId::TWO));

    let stacked = GameOperatorBuilder::new(5, 5)
        .king(PlayerId::ONE, &king, pos(0, 0))
        .king(PlayerId::TWO, &king, pos(0, 0))
        .build();
    assert_eq!(stacked.unwrap_err(), BuildError::Occupied(pos(0, 0)));

    let outside = GameOperatorBuilder::new(5, 5)
        .king(PlayerId::ONE, &king, pos(0, 0))
        .king(PlayerId::TWO, &king, pos(5, 0))
        .build();
    assert_eq!(outside.unwrap_err(), BuildError::OffBoard(pos(5, 0)));
}

#[test]
fn test_new_game_state() {
    let game = small_game();

    assert_eq!(game.players_turn(), PlayerId::ONE);
    assert_eq!(game.turns(), 0);
    assert_eq!(game.winner(), None);
    assert!(game.last_draw_event().is_none());
    assert!(!game.legal_draws().is_empty());
}

// =============================================================================
// Legality
// =============================================================================

#[test]
fn test_only_player_to_move_may_play() {
    let mut game = small_game();

    // Player two's pawn, player one to move
    assert!(!game.is_legal(pos(1, 1), pos(1, 2)));
    assert!(!game.play(pos(1, 1), pos(1, 2)));
    assert_eq!(game.turns(), 0);

    // Player one's pawn moves up the board
    assert!(game.is_legal(pos(3, 3), pos(3, 2)));
    assert!(game.play(pos(3, 3), pos(3, 2)));
    assert_eq!(game.players_turn(), PlayerId::TWO);
    assert_eq!(game.turns(), 1);

    assert!(game.play(pos(1, 1), pos(1, 2)));
    assert_eq!(game.players_turn(), PlayerId::ONE);
}

#[test]
fn test_illegal_offsets_rejected() {
    let mut game = small_game();

    assert!(!game.play(pos(3, 3), pos(3, 1)));
    assert!(!game.play(pos(3, 3), pos(3, 4)));
    assert!(!game.play(pos(0, 0), pos(0, 1)));
    assert_eq!(game.turns(), 0);
    assert!(game.operator().history().is_empty());
}

#[test]
fn test_legal_draws_match_is_legal() {
    let game = small_game();
    for draw in game.legal_draws() {
        assert!(game.is_legal(draw.from, draw.to), "{draw} listed but not legal");
        let mover = game.operator().piece_at(draw.from).map(|p| p.owner);
        assert_eq!(mover, Some(PlayerId::ONE));
    }
}

// =============================================================================
// Winning And Surrender
// =============================================================================

#[test]
fn test_king_capture_ends_game() {
    let king = presets::king();
    let mut game = Game::new(
        GameOperatorBuilder::new(4, 4)
            .king(PlayerId::ONE, &king, pos(1, 2))
            .king(PlayerId::TWO, &king, pos(2, 1))
            .build()
            .unwrap(),
    );

    assert!(game.play(pos(1, 2), pos(2, 1)));

    assert_eq!(game.winner(), Some(PlayerId::ONE));
    assert_eq!(game.turns(), 1);
    assert!(game.legal_draws().is_empty());
    assert!(!game.play(pos(2, 1), pos(2, 2)));
    assert_eq!(game.play_batch(&[Draw::new(pos(2, 1), pos(2, 2))]), None);
}

#[test]
fn test_surrender() {
    let mut game = small_game();
    assert!(game.play(pos(3, 3), pos(3, 2)));

    game.surrender();

    assert_eq!(game.winner(), Some(PlayerId::ONE));
    assert!(game.legal_draws().is_empty());
}

#[test]
#[should_panic(expected = "Cannot undo")]
fn test_undo_without_turns_panics() {
    let mut game = small_game();
    game.undo();
}

// =============================================================================
// Batches
// =============================================================================

#[test]
fn test_play_batch_moves_several_pieces() {
    let mut game = small_game();
    let draws = [
        Draw::new(pos(3, 3), pos(3, 2)),
        Draw::new(pos(2, 4), pos(2, 3)),
        // Not player one's piece
        Draw::new(pos(1, 1), pos(1, 2)),
    ];

    assert_eq!(game.play_batch(&draws), Some(2));
    assert_eq!(game.players_turn(), PlayerId::TWO);
    assert_eq!(game.turns(), 1);
    assert_eq!(game.last_draw_event().map(|d| d.len()), Some(2));

    game.undo();
    assert!(game.operator().piece_at(pos(3, 3)).is_some());
    assert!(game.operator().piece_at(pos(2, 4)).is_some());
    assert_eq!(game.players_turn(), PlayerId::ONE);
}

#[test]
fn test_empty_batch_still_passes_turn() {
    let mut game = small_game();

    assert_eq!(game.play_batch(&[]), Some(0));
    assert_eq!(game.players_turn(), PlayerId::TWO);

    game.undo();
    assert_eq!(game.players_turn(), PlayerId::ONE);
    assert_eq!(game.turns(), 0);
}

#[test]
fn test_batch_moves_checked_against_live_board() {
    let mut game = small_game();
    // The second move targets the cell the first one just filled
    let draws = [
        Draw::new(pos(3, 3), pos(3, 2)),
        Draw::new(pos(2, 4), pos(3, 3)),
        Draw::new(pos(2, 4), pos(3, 3)),
    ];

    assert_eq!(game.play_batch(&draws), Some(2));
    assert_eq!(game.operator().piece_at(pos(3, 3)).map(|p| p.king), Some(true));
}

// =============================================================================
// Replay
// =============================================================================

#[test]
fn test_draws_since_returns_later_turns() {
    let mut game = small_game();
    assert!(game.play(pos(3, 3), pos(3, 2)));
    assert!(game.play(pos(1, 1), pos(1, 2)));
    assert!(game.play(pos(2, 4), pos(2, 3)));

    assert_eq!(game.draws_since(0).count(), 3);
    assert_eq!(game.draws_since(2).count(), 1);
    assert_eq!(game.draws_since(5).count(), 0);

    let copy = game.copy();
    game.undo();
    assert_eq!(copy.draws_since(0).count(), 3);
    assert_eq!(game.draws_since(0).count(), 2);
}
