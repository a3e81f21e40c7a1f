//! Intents: requests to change a game.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::core::PlayerId;
use crate::pieces::PieceKind;

/// Everything a transport can ask of the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Open a new table. Handled by `GameEngine::create_game`; applying it
    /// to an existing game is rejected.
    CreateGame {
        player_count: usize,
        password: Option<String>,
    },
    PlacePiece {
        player: PlayerId,
        at: Position,
        kind: PieceKind,
    },
    MarkReady {
        player: PlayerId,
    },
    StartGame,
    MoveCharacter {
        player: PlayerId,
        from: Position,
        to: Position,
    },
    /// Concede. Accepted at any point of play, on or off turn; a host's
    /// turn timer submits this on a player's behalf.
    Forfeit {
        player: PlayerId,
    },
}

impl Intent {
    /// Stable name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::CreateGame { .. } => "CreateGame",
            Intent::PlacePiece { .. } => "PlacePiece",
            Intent::MarkReady { .. } => "MarkReady",
            Intent::StartGame => "StartGame",
            Intent::MoveCharacter { .. } => "MoveCharacter",
            Intent::Forfeit { .. } => "Forfeit",
        }
    }

    /// Seat that submitted the intent, if it names one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Intent::PlacePiece { player, .. }
            | Intent::MarkReady { player }
            | Intent::MoveCharacter { player, .. }
            | Intent::Forfeit { player } => Some(*player),
            Intent::CreateGame { .. } | Intent::StartGame => None,
        }
    }
}
