//! Board cells and terrain markers.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::pieces::{Piece, PieceKind};

/// Terrain laid down during setup.
///
/// Markers are not pieces: they never move and never fight. A flag marker
/// stays until its owner is eliminated; a trap marker is consumed when it
/// fires under `TrapRule::SingleUse`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Flag(PlayerId),
    Trap(PlayerId),
}

impl Marker {
    /// Marker for a Flag or Trap deployment, `None` for combat kinds.
    #[must_use]
    pub fn for_kind(kind: PieceKind, owner: PlayerId) -> Option<Self> {
        match kind {
            PieceKind::Flag => Some(Marker::Flag(owner)),
            PieceKind::Trap => Some(Marker::Trap(owner)),
            _ => None,
        }
    }

    #[must_use]
    pub fn owner(self) -> PlayerId {
        match self {
            Marker::Flag(owner) | Marker::Trap(owner) => owner,
        }
    }

    #[must_use]
    pub fn kind(self) -> PieceKind {
        match self {
            Marker::Flag(_) => PieceKind::Flag,
            Marker::Trap(_) => PieceKind::Trap,
        }
    }
}

/// One square of the board: at most one occupant, at most one marker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub occupant: Option<Piece>,
    pub marker: Option<Marker>,
}

impl Cell {
    /// Neither occupant nor marker.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.occupant.is_none() && self.marker.is_none()
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        matches!(self.marker, Some(Marker::Trap(_)))
    }

    #[must_use]
    pub fn is_flag(&self) -> bool {
        matches!(self.marker, Some(Marker::Flag(_)))
    }

    /// Owner of the flag on this cell, if any.
    #[must_use]
    pub fn flag_owner(&self) -> Option<PlayerId> {
        match self.marker {
            Some(Marker::Flag(owner)) => Some(owner),
            _ => None,
        }
    }

    /// Owner of the occupant, if any.
    #[must_use]
    pub fn occupant_owner(&self) -> Option<PlayerId> {
        self.occupant.as_ref().map(|p| p.owner)
    }
}
