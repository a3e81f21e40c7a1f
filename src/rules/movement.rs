//! Move legality.
//!
//! A move is one orthogonal step by a piece the mover owns onto a cell that
//! is empty or held by an enemy. Markers do not block: stepping onto a trap
//! or a flag is legal, the consequences are combat's business.

use crate::board::{Board, Position};
use crate::core::{PlayerId, ValidationError};

/// Check a move, reporting the first rule it breaks.
///
/// Rules are checked in this order: both ends on the board, a piece of the
/// mover's at `from`, one orthogonal step, destination not friendly.
pub fn check_move(board: &Board, from: Position, to: Position, mover: PlayerId) -> Result<(), ValidationError> {
    for pos in [from, to] {
        if !board.contains(pos) {
            return Err(ValidationError::OutOfBounds { pos });
        }
    }

    match board.occupant(from) {
        Some(piece) if piece.owner == mover => {}
        _ => return Err(ValidationError::NotYourPiece { player: mover, pos: from }),
    }

    if from.manhattan(to) != 1 {
        return Err(ValidationError::NotAdjacent { from, to });
    }

    if board.occupant(to).is_some_and(|p| p.owner == mover) {
        return Err(ValidationError::FriendlyOccupied { pos: to });
    }

    Ok(())
}

/// `check_move` as a predicate.
#[must_use]
pub fn is_legal_move(board: &Board, from: Position, to: Position, mover: PlayerId) -> bool {
    check_move(board, from, to, mover).is_ok()
}

/// Every legal `(from, to)` for `player`, row-major by origin.
#[must_use]
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<(Position, Position)> {
    board
        .pieces()
        .filter(|piece| piece.owner == player)
        .flat_map(|piece| {
            let from = piece.position;
            board
                .neighbours(from)
                .into_iter()
                .filter(move |&to| board.occupant(to).map_or(true, |p| p.owner != player))
                .map(move |to| (from, to))
        })
        .collect()
}

/// Does `player` have at least one legal move?
#[must_use]
pub fn has_legal_move(board: &Board, player: PlayerId) -> bool {
    board.pieces().filter(|piece| piece.owner == player).any(|piece| {
        board
            .neighbours(piece.position)
            .into_iter()
            .any(|to| board.occupant(to).map_or(true, |p| p.owner != player))
    })
}
