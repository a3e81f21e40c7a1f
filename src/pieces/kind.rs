//! The closed set of deployable kinds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Everything a player can deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Rock,
    Paper,
    Scissors,
    /// Losing it loses the game. Exactly one per player.
    Flag,
    /// Destroys whatever steps on it. Exactly one per player.
    Trap,
}

impl PieceKind {
    /// Kinds that occupy cells, move and fight.
    pub const COMBAT: [PieceKind; 3] = [PieceKind::Rock, PieceKind::Paper, PieceKind::Scissors];

    /// Kinds that become cell markers.
    pub const MARKERS: [PieceKind; 2] = [PieceKind::Flag, PieceKind::Trap];

    #[must_use]
    pub const fn is_combat(self) -> bool {
        matches!(self, PieceKind::Rock | PieceKind::Paper | PieceKind::Scissors)
    }

    #[must_use]
    pub const fn is_marker(self) -> bool {
        !self.is_combat()
    }

    /// Cyclic law: Rock > Scissors, Paper > Rock, Scissors > Paper.
    ///
    /// Markers never beat anything.
    #[must_use]
    pub const fn beats(self, other: PieceKind) -> bool {
        matches!(
            (self, other),
            (PieceKind::Rock, PieceKind::Scissors)
                | (PieceKind::Paper, PieceKind::Rock)
                | (PieceKind::Scissors, PieceKind::Paper)
        )
    }

    /// Single-letter notation.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Rock => 'R',
            PieceKind::Paper => 'P',
            PieceKind::Scissors => 'S',
            PieceKind::Flag => 'F',
            PieceKind::Trap => 'T',
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Rock => "Rock",
            PieceKind::Paper => "Paper",
            PieceKind::Scissors => "Scissors",
            PieceKind::Flag => "Flag",
            PieceKind::Trap => "Trap",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown piece kind {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for PieceKind {
    type Err = ParseKindError;

    /// Accepts the single letter or the full name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(PieceKind::Rock),
            "p" | "paper" => Ok(PieceKind::Paper),
            "s" | "scissors" => Ok(PieceKind::Scissors),
            "f" | "flag" => Ok(PieceKind::Flag),
            "t" | "trap" => Ok(PieceKind::Trap),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}
