//! Piece instances on the board.

use serde::{Deserialize, Serialize};

use super::PieceKind;
use crate::board::Position;
use crate::core::PlayerId;

/// Per-game unique piece identifier, allocated in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// A combat piece on the board.
///
/// `position` always equals the cell holding the piece; `Board` is the only
/// code that moves pieces and keeps the two in step.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub owner: PlayerId,
    pub position: Position,
    /// Kind visible to every player. Set once the piece has fought.
    pub revealed: bool,
}

impl Piece {
    /// A concealed piece.
    #[must_use]
    pub fn new(id: PieceId, kind: PieceKind, owner: PlayerId, position: Position) -> Self {
        Self {
            id,
            kind,
            owner,
            position,
            revealed: false,
        }
    }

    /// Can `viewer` see this piece's kind?
    #[must_use]
    pub fn visible_to(&self, viewer: PlayerId) -> bool {
        self.revealed || self.owner == viewer
    }
}
