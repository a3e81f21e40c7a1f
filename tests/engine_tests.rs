//! End-to-end games driven purely through intents.

use rps_skirmish::board::Position;
use rps_skirmish::core::{GameError, GameState, Phase, PhaseError, PlayerId, RuleConfig, ValidationError};
use rps_skirmish::engine::{GameEngine, GameEvent, Intent};
use rps_skirmish::persist::encode_bincode;
use rps_skirmish::pieces::PieceKind;

const A: PlayerId = PlayerId::new(0);
const B: PlayerId = PlayerId::new(1);

fn pos(row: u16, col: u16) -> Position {
    Position::new(row, col)
}

fn mv(player: PlayerId, from: (u16, u16), to: (u16, u16)) -> Intent {
    Intent::MoveCharacter {
        player,
        from: pos(from.0, from.1),
        to: pos(to.0, to.1),
    }
}

/// Deploy everything, ready every seat and start.
fn start(engine: &GameEngine, placements: &[(PlayerId, (u16, u16), PieceKind)]) -> GameState {
    let mut state = engine.create_game("scenario", 2, None).unwrap();
    for &(player, (row, col), kind) in placements {
        let intent = Intent::PlacePiece { player, at: pos(row, col), kind };
        state = engine.apply(&state, &intent).unwrap().state;
    }
    for player in [A, B] {
        state = engine.apply(&state, &Intent::MarkReady { player }).unwrap().state;
    }
    engine.apply(&state, &Intent::StartGame).unwrap().state
}

fn play(engine: &GameEngine, mut state: GameState, moves: &[Intent]) -> GameState {
    for intent in moves {
        state = engine.apply(&state, intent).unwrap().state;
    }
    state
}

fn two_piece_engine() -> GameEngine {
    GameEngine::new(RuleConfig::default().with_combat_pieces(2))
}

/// A: flag (0,0), trap (0,7). B: flag (7,7), trap (7,1).
fn with_markers(mut pieces: Vec<(PlayerId, (u16, u16), PieceKind)>) -> Vec<(PlayerId, (u16, u16), PieceKind)> {
    pieces.extend([
        (A, (0, 0), PieceKind::Flag),
        (A, (0, 7), PieceKind::Trap),
        (B, (7, 7), PieceKind::Flag),
        (B, (7, 1), PieceKind::Trap),
    ]);
    pieces
}

#[test]
fn test_flag_capture_ends_game() {
    let engine = two_piece_engine();
    let state = start(
        &engine,
        &with_markers(vec![
            (A, (1, 5), PieceKind::Rock),
            (A, (1, 6), PieceKind::Paper),
            (B, (6, 0), PieceKind::Rock),
            (B, (6, 6), PieceKind::Scissors),
        ]),
    );

    // A shuffles (1,5) <-> (2,5) while B's rock walks up column 0.
    let mut moves = Vec::new();
    let path = [(6, 0), (5, 0), (4, 0), (3, 0), (2, 0), (1, 0)];
    for (i, step) in path.windows(2).enumerate() {
        let shuffle = if i % 2 == 0 { ((1, 5), (2, 5)) } else { ((2, 5), (1, 5)) };
        moves.push(mv(A, shuffle.0, shuffle.1));
        moves.push(mv(B, step[0], step[1]));
    }
    moves.push(mv(A, (2, 5), (1, 5)));
    let state = play(&engine, state, &moves);
    assert_eq!(state.board().occupant(pos(1, 0)).unwrap().owner, B);

    let t = engine.apply(&state, &mv(B, (1, 0), (0, 0))).unwrap();
    assert_eq!(t.state.phase(), Phase::Ended);
    assert_eq!(t.state.winner(), Some(B));
    assert!(t.events.contains(&GameEvent::FlagCaptured { at: pos(0, 0), winner: B, loser: A }));
    assert_eq!(t.events.last(), Some(&GameEvent::GameEnded { winner: B }));
    assert!(t.state.check_invariants().is_ok());
}

#[test]
fn test_rock_beats_scissors() {
    let engine = two_piece_engine();
    let state = start(
        &engine,
        &with_markers(vec![
            (A, (1, 3), PieceKind::Rock),
            (A, (1, 6), PieceKind::Paper),
            (B, (6, 4), PieceKind::Scissors),
            (B, (6, 6), PieceKind::Paper),
        ]),
    );
    let state = play(
        &engine,
        state,
        &[
            mv(A, (1, 3), (2, 3)),
            mv(B, (6, 4), (5, 4)),
            mv(A, (2, 3), (3, 3)),
            mv(B, (5, 4), (4, 4)),
            mv(A, (1, 6), (2, 6)),
            mv(B, (4, 4), (3, 4)),
        ],
    );

    let t = engine.apply(&state, &mv(A, (3, 3), (3, 4))).unwrap();
    let board = t.state.board();
    assert!(board.occupant(pos(3, 3)).is_none());
    let winner = board.occupant(pos(3, 4)).unwrap();
    assert_eq!((winner.owner, winner.kind), (A, PieceKind::Rock));
    assert!(winner.revealed);
    assert_eq!(t.state.pieces_remaining(B), 1);
    assert!(t
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Captured { loser, kind: PieceKind::Scissors, .. } if *loser == B)));
    assert_eq!(t.state.phase(), Phase::Playing);
    assert_eq!(t.state.current_player(), B);
}

#[test]
fn test_trap_consumes_piece_and_marker() {
    let engine = two_piece_engine();
    let state = start(
        &engine,
        &[
            (A, (0, 0), PieceKind::Flag),
            (A, (1, 2), PieceKind::Trap),
            (A, (1, 3), PieceKind::Paper),
            (A, (1, 5), PieceKind::Rock),
            (B, (7, 7), PieceKind::Flag),
            (B, (7, 1), PieceKind::Trap),
            (B, (6, 4), PieceKind::Scissors),
            (B, (6, 6), PieceKind::Paper),
        ],
    );
    let state = play(
        &engine,
        state,
        &[
            mv(A, (1, 3), (2, 3)),
            mv(B, (6, 4), (5, 4)),
            mv(A, (2, 3), (2, 2)),
            mv(B, (5, 4), (6, 4)),
        ],
    );
    assert!(state.board().cell(pos(1, 2)).unwrap().is_trap());

    let t = engine.apply(&state, &mv(A, (2, 2), (1, 2))).unwrap();
    let cell = t.state.board().cell(pos(1, 2)).unwrap();
    assert!(cell.occupant.is_none());
    assert!(!cell.is_trap());
    assert!(t.state.board().occupant(pos(2, 2)).is_none());
    assert!(t
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TrapTriggered { consumed: true, victim, .. } if *victim == A)));
    assert_eq!(t.state.pieces_remaining(A), 1);
    assert!(t.state.check_invariants().is_ok());
}

#[test]
fn test_turn_rotation_ignores_rejections() {
    let engine = two_piece_engine();
    let mut state = start(
        &engine,
        &with_markers(vec![
            (A, (1, 3), PieceKind::Rock),
            (A, (1, 6), PieceKind::Paper),
            (B, (6, 3), PieceKind::Scissors),
            (B, (6, 6), PieceKind::Paper),
        ]),
    );

    let script = [
        mv(A, (1, 3), (2, 3)),
        mv(B, (6, 3), (5, 3)),
        mv(A, (2, 3), (1, 3)),
        mv(B, (5, 3), (6, 3)),
    ];
    for (i, intent) in script.iter().enumerate() {
        assert_eq!(state.current_player_index(), i % 2);

        // Out of turn: the other seat tries to move.
        let other = PlayerId::new(((i + 1) % 2) as u8);
        let err = engine.apply(&state, &mv(other, (0, 0), (1, 0))).unwrap_err();
        assert_eq!(err, GameError::Phase(PhaseError::NotYourTurn { player: other }));
        assert_eq!(state.current_player_index(), i % 2);

        state = engine.apply(&state, intent).unwrap().state;
    }
    assert_eq!(state.current_player_index(), 0);
    assert_eq!(state.turn_number(), 5);
    assert_eq!(state.history().len(), 4);
}

#[test]
fn test_rejected_intents_leave_state_identical() {
    let engine = two_piece_engine();
    let state = start(
        &engine,
        &with_markers(vec![
            (A, (1, 3), PieceKind::Rock),
            (A, (1, 4), PieceKind::Paper),
            (B, (6, 3), PieceKind::Scissors),
            (B, (6, 6), PieceKind::Paper),
        ]),
    );
    let before = encode_bincode(&state).unwrap();
    let snapshot = state.clone();

    let rejected = [
        (mv(A, (1, 3), (3, 3)), GameError::from(ValidationError::NotAdjacent { from: pos(1, 3), to: pos(3, 3) })),
        (mv(A, (1, 3), (1, 4)), ValidationError::FriendlyOccupied { pos: pos(1, 4) }.into()),
        (mv(A, (6, 3), (5, 3)), ValidationError::NotYourPiece { player: A, pos: pos(6, 3) }.into()),
        (mv(A, (1, 7), (1, 8)), ValidationError::OutOfBounds { pos: pos(1, 8) }.into()),
        (
            Intent::PlacePiece { player: A, at: pos(1, 0), kind: PieceKind::Rock },
            PhaseError::IllegalIntentForPhase { intent: "PlacePiece", phase: Phase::Playing }.into(),
        ),
        (Intent::Forfeit { player: PlayerId::new(4) }, ValidationError::UnknownPlayer { player: PlayerId::new(4) }.into()),
    ];
    for (intent, expected) in rejected {
        assert_eq!(engine.apply(&state, &intent).unwrap_err(), expected);
    }

    assert_eq!(state, snapshot);
    assert_eq!(encode_bincode(&state).unwrap(), before);
}

#[test]
fn test_views_conceal_until_combat() {
    let engine = two_piece_engine();
    let state = start(
        &engine,
        &with_markers(vec![
            (A, (1, 3), PieceKind::Rock),
            (A, (1, 6), PieceKind::Paper),
            (B, (6, 3), PieceKind::Scissors),
            (B, (6, 6), PieceKind::Paper),
        ]),
    );

    let view = state.view_for(A);
    let own = view.get(pos(1, 3)).unwrap().occupant.unwrap();
    assert_eq!(own.kind, Some(PieceKind::Rock));
    let enemy = view.get(pos(6, 3)).unwrap().occupant.unwrap();
    assert_eq!((enemy.owner, enemy.kind), (B, None));
    assert!(view.get(pos(0, 0)).unwrap().marker.is_some());
    assert!(view.get(pos(7, 7)).unwrap().marker.is_none());

    let state = play(
        &engine,
        state,
        &[
            mv(A, (1, 3), (2, 3)),
            mv(B, (6, 3), (5, 3)),
            mv(A, (2, 3), (3, 3)),
            mv(B, (5, 3), (4, 3)),
            mv(A, (1, 6), (2, 6)),
            // B's scissors attack A's rock and lose.
            mv(B, (4, 3), (3, 3)),
        ],
    );
    let view = state.view_for(B);
    let rock = view.get(pos(3, 3)).unwrap().occupant.unwrap();
    assert_eq!((rock.owner, rock.kind), (A, Some(PieceKind::Rock)));
    let paper = view.get(pos(2, 6)).unwrap().occupant.unwrap();
    assert_eq!(paper.kind, None);
}

#[test]
fn test_every_intent_rejected_after_end() {
    let engine = GameEngine::new(RuleConfig::default().with_combat_pieces(1));
    let state = start(
        &engine,
        &with_markers(vec![(A, (1, 3), PieceKind::Rock), (B, (6, 3), PieceKind::Rock)]),
    );
    let ended = engine.apply(&state, &Intent::Forfeit { player: B }).unwrap().state;
    assert_eq!(ended.winner(), Some(A));

    for intent in [
        mv(A, (1, 3), (2, 3)),
        Intent::Forfeit { player: A },
        Intent::StartGame,
        Intent::MarkReady { player: A },
    ] {
        assert!(matches!(
            engine.apply(&ended, &intent),
            Err(GameError::Phase(PhaseError::IllegalIntentForPhase { phase: Phase::Ended, .. }))
        ));
    }
}
