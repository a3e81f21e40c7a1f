//! Events: what an accepted intent did.
//!
//! The engine performs no I/O. Everything a host needs to notify players,
//! animate the board or write an audit log comes out as events, in the
//! order the changes happened.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Position;
use crate::core::PlayerId;
use crate::pieces::{PieceId, PieceKind};

/// Events of one transition. Most transitions emit at most four.
pub type Events = SmallVec<[GameEvent; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// A deployment during setup. Hosts should forward `kind` only to the
    /// owner.
    PiecePlaced {
        player: PlayerId,
        at: Position,
        kind: PieceKind,
    },
    PlayerReady {
        player: PlayerId,
    },
    GameStarted {
        first: PlayerId,
    },
    Moved {
        player: PlayerId,
        piece: PieceId,
        from: Position,
        to: Position,
    },
    /// A piece's kind became public.
    Revealed {
        piece: PieceId,
        owner: PlayerId,
        kind: PieceKind,
        at: Position,
    },
    /// A piece was removed in combat.
    Captured {
        piece: PieceId,
        loser: PlayerId,
        kind: PieceKind,
        at: Position,
    },
    /// A trap destroyed the piece that stepped on it.
    TrapTriggered {
        at: Position,
        owner: PlayerId,
        victim: PlayerId,
        piece: PieceId,
        consumed: bool,
    },
    FlagCaptured {
        at: Position,
        winner: PlayerId,
        loser: PlayerId,
    },
    PlayerEliminated {
        player: PlayerId,
    },
    GameEnded {
        winner: PlayerId,
    },
}

impl GameEvent {
    /// Does this event finish the game?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameEnded { .. })
    }
}
