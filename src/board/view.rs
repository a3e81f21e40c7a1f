//! What one player is allowed to see.
//!
//! Opponent pieces show their owner but not their kind until revealed by
//! combat. Opponent flags and traps are invisible. A transport sends each
//! seat its own view and never the full state.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Marker};
use super::topology::{Board, Position};
use crate::core::PlayerId;
use crate::pieces::{PieceId, PieceKind};

/// A piece as seen by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenPiece {
    pub id: PieceId,
    pub owner: PlayerId,
    /// `None` while the piece is concealed from the viewer.
    pub kind: Option<PieceKind>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub occupant: Option<SeenPiece>,
    pub marker: Option<Marker>,
}

impl CellView {
    fn of(cell: &Cell, viewer: PlayerId) -> Self {
        let occupant = cell.occupant.as_ref().map(|piece| SeenPiece {
            id: piece.id,
            owner: piece.owner,
            kind: piece.visible_to(viewer).then_some(piece.kind),
        });
        let marker = cell.marker.filter(|m| m.owner() == viewer);
        Self { occupant, marker }
    }

    fn symbol(&self) -> char {
        match (self.occupant, self.marker) {
            (Some(SeenPiece { kind: Some(kind), .. }), _) => kind.symbol(),
            (Some(SeenPiece { kind: None, .. }), _) => '?',
            (None, Some(marker)) => marker.kind().symbol().to_ascii_lowercase(),
            (None, None) => '.',
        }
    }
}

/// Row-major board snapshot for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub viewer: PlayerId,
    pub row_lengths: Vec<u16>,
    pub cells: Vec<CellView>,
}

impl BoardView {
    #[must_use]
    pub fn new(board: &Board, viewer: PlayerId) -> Self {
        Self {
            viewer,
            row_lengths: board.row_lengths().to_vec(),
            cells: board.cells().map(|(_, cell)| CellView::of(cell, viewer)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&CellView> {
        let len = *self.row_lengths.get(usize::from(pos.row))?;
        if pos.col >= len {
            return None;
        }
        let offset: usize = self.row_lengths[..usize::from(pos.row)]
            .iter()
            .map(|&l| usize::from(l))
            .sum();
        self.cells.get(offset + usize::from(pos.col))
    }
}

/// One line per row. Known pieces use their letter, concealed pieces `?`,
/// the viewer's own markers a lowercase `f`/`t`, anything else `.`.
impl std::fmt::Display for BoardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut cells = self.cells.iter();
        for &len in &self.row_lengths {
            let line: String = cells.by_ref().take(usize::from(len)).map(CellView::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
