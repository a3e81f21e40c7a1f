//! Error taxonomy.
//!
//! Every rejected intent leaves the input state untouched; the error is
//! reported to the caller that submitted it and nobody else.
//!
//! - `ValidationError`: the intent is well-formed for the phase but breaks a
//!   board or placement rule.
//! - `PhaseError`: the intent does not fit the current phase or turn.
//! - `StructuralError`: a game (or a stored record) cannot be built at all.

use thiserror::Error;

use super::player::PlayerId;
use super::state::Phase;
use crate::board::Position;
use crate::pieces::PieceKind;

/// Board and placement rule violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{pos} is outside the board")]
    OutOfBounds { pos: Position },

    #[error("{from} and {to} are not orthogonally adjacent")]
    NotAdjacent { from: Position, to: Position },

    #[error("{pos} is held by one of your own pieces")]
    FriendlyOccupied { pos: Position },

    #[error("{player} has no piece at {pos}")]
    NotYourPiece { player: PlayerId, pos: Position },

    #[error("{pos} is outside the home region of {player}")]
    OutOfRegion { player: PlayerId, pos: Position },

    #[error("{player} has no {kind} left to place")]
    QuotaExhausted { player: PlayerId, kind: PieceKind },

    #[error("{pos} is already occupied")]
    CellOccupied { pos: Position },

    #[error("{player} is not seated at this table")]
    UnknownPlayer { player: PlayerId },
}

/// Intent submitted at the wrong time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("expected phase {expected:?}, game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("{intent} is not accepted during {phase:?}")]
    IllegalIntentForPhase { intent: &'static str, phase: Phase },

    #[error("{player} has not finished setup")]
    SetupIncomplete { player: PlayerId },

    #[error("{player} is already ready")]
    AlreadyReady { player: PlayerId },

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[error("{player} has been eliminated")]
    Eliminated { player: PlayerId },
}

/// A game or record that cannot exist.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("a game needs between 2 and 255 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("invalid home layout: {0}")]
    InvalidHomeLayout(String),

    #[error("home region of {player} has {cells} cells but setup needs {required}")]
    HomeRegionTooSmall {
        player: PlayerId,
        cells: usize,
        required: usize,
    },

    #[error("corrupt game record: {0}")]
    CorruptRecord(String),
}

/// Any engine failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl GameError {
    /// Could the caller fix the intent and try again against the same game?
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::Structural(_))
    }
}
