//! Combat resolution.
//!
//! Pure functions only: nothing here touches a board. The engine asks what
//! happens and applies the answer itself.
//!
//! Terrain takes priority over combat, in this order:
//!
//! 1. Enemy flag: the mover captures it and wins, whoever stands there.
//! 2. Trap: the mover is destroyed, whoever owns the trap.
//! 3. Enemy occupant: rock-paper-scissors.
//! 4. Otherwise the mover simply advances.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Marker};
use crate::core::{DrawRule, PlayerId};
use crate::pieces::{Piece, PieceKind};

/// Result of one collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    AttackerWins,
    DefenderWins,
    Draw,
}

impl Outcome {
    /// The same collision seen from the other side.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Outcome::AttackerWins => Outcome::DefenderWins,
            Outcome::DefenderWins => Outcome::AttackerWins,
            Outcome::Draw => Outcome::Draw,
        }
    }

    /// Which side leaves the board.
    #[must_use]
    pub fn casualties(self, draw_rule: DrawRule) -> Casualties {
        match (self, draw_rule) {
            (Outcome::AttackerWins, _) => Casualties { attacker: false, defender: true },
            (Outcome::DefenderWins, _) | (Outcome::Draw, DrawRule::DefenderStays) => {
                Casualties { attacker: true, defender: false }
            }
            (Outcome::Draw, DrawRule::RemoveBoth) => Casualties { attacker: true, defender: true },
        }
    }
}

/// Removal flags for the two sides of a collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Casualties {
    pub attacker: bool,
    pub defender: bool,
}

/// Rock beats Scissors, Paper beats Rock, Scissors beats Paper; equal kinds draw.
///
/// Markers never win a fight, so a marker against a marker is a draw.
///
/// ```
/// use rps_skirmish::pieces::PieceKind;
/// use rps_skirmish::rules::{resolve, Outcome};
///
/// assert_eq!(resolve(PieceKind::Rock, PieceKind::Scissors), Outcome::AttackerWins);
/// assert_eq!(resolve(PieceKind::Rock, PieceKind::Paper), Outcome::DefenderWins);
/// assert_eq!(resolve(PieceKind::Paper, PieceKind::Paper), Outcome::Draw);
/// ```
#[must_use]
pub fn resolve(attacker: PieceKind, defender: PieceKind) -> Outcome {
    if attacker.beats(defender) {
        Outcome::AttackerWins
    } else if defender.beats(attacker) {
        Outcome::DefenderWins
    } else {
        Outcome::Draw
    }
}

/// What a step onto a cell amounts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    /// Nothing in the way.
    Advance,
    /// Enemy flag taken; the game is over.
    FlagCapture { owner: PlayerId },
    /// The mover is destroyed.
    Trap { owner: PlayerId },
    /// Fight the enemy occupant.
    Combat { defender: PlayerId, outcome: Outcome },
    /// A friendly piece holds the cell; the move is illegal.
    Blocked,
}

/// Classify `mover` stepping onto `target`.
#[must_use]
pub fn resolve_encounter(mover: &Piece, target: &Cell) -> Encounter {
    match target.marker {
        Some(Marker::Flag(owner)) if owner != mover.owner => return Encounter::FlagCapture { owner },
        Some(Marker::Trap(owner)) => return Encounter::Trap { owner },
        _ => {}
    }

    match &target.occupant {
        None => Encounter::Advance,
        Some(defender) if defender.owner == mover.owner => Encounter::Blocked,
        Some(defender) => Encounter::Combat {
            defender: defender.owner,
            outcome: resolve(mover.kind, defender.kind),
        },
    }
}
