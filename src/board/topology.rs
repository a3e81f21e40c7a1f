//! Board shape, coordinates and adjacency.
//!
//! ## Shapes
//!
//! - Even player counts get an 8-row rectangle, `8 + (players - 2) * 3`
//!   columns wide.
//! - Odd player counts get a staggered board of `size = ceil(players * 1.5)`
//!   rows where row `r` holds `size - |size / 2 - r|` cells: short rows at
//!   the edges, the longest in the middle.
//!
//! ## Adjacency
//!
//! Adjacency is orthogonal in index space on every shape: `(r, c)` touches
//! `(r, c ± 1)` and `(r ± 1, c)`, provided the target exists. On staggered
//! boards the columns of neighbouring rows are aligned at index 0, so the
//! cells past the end of a shorter row simply have no neighbour there.
//! Every move is therefore Manhattan distance 1 whatever the shape.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::{Cell, Marker};
use crate::core::error::StructuralError;
use crate::core::player::{PlayerId, MAX_PLAYERS};
use crate::pieces::Piece;

/// Fixed height of rectangular boards.
pub const RECT_ROWS: u16 = 8;

/// Width of a two-player rectangular board.
pub const RECT_BASE_COLS: u16 = 8;

/// Extra columns per player beyond two.
pub const RECT_COLS_PER_PLAYER: u16 = 3;

/// Cell coordinate, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// `|Δrow| + |Δcol|`.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// How the board was generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardShape {
    Rectangular { rows: u16, cols: u16 },
    Staggered { size: u16 },
    /// Row profile supplied directly (restored records, tests).
    Irregular,
}

impl BoardShape {
    /// Shape for a player count. Fails below 2 or above 255 players.
    pub fn for_players(player_count: usize) -> Result<Self, StructuralError> {
        if !(2..=MAX_PLAYERS).contains(&player_count) {
            return Err(StructuralError::InvalidPlayerCount(player_count));
        }
        let n = player_count as u16;
        if player_count % 2 == 0 {
            Ok(BoardShape::Rectangular {
                rows: RECT_ROWS,
                cols: RECT_BASE_COLS + (n - 2) * RECT_COLS_PER_PLAYER,
            })
        } else {
            // ceil(n * 1.5) without floats
            Ok(BoardShape::Staggered { size: (3 * n + 1) / 2 })
        }
    }

    /// Row lengths top to bottom. Empty for `Irregular`.
    #[must_use]
    pub fn row_lengths(self) -> Vec<u16> {
        match self {
            BoardShape::Rectangular { rows, cols } => vec![cols; rows as usize],
            BoardShape::Staggered { size } => {
                let center = size / 2;
                (0..size).map(|row| size - center.abs_diff(row)).collect()
            }
            BoardShape::Irregular => Vec::new(),
        }
    }

    /// Recognise a row profile.
    fn infer(row_lengths: &[u16]) -> Self {
        let rows = row_lengths.len() as u16;
        if let Some(&first) = row_lengths.first() {
            if row_lengths.iter().all(|&len| len == first) {
                return BoardShape::Rectangular { rows, cols: first };
            }
        }
        let staggered = BoardShape::Staggered { size: rows };
        if staggered.row_lengths() == row_lengths {
            staggered
        } else {
            BoardShape::Irregular
        }
    }
}

/// The playing surface.
///
/// Cells are stored row-major in a persistent vector, so cloning a board to
/// build the next state is O(1) and a move touches only the cells it changes.
/// Storage goes through `GameRecord`, never through this type directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    shape: BoardShape,
    row_lengths: Vec<u16>,
    row_offsets: Vec<usize>,
    cells: Vector<Cell>,
}

impl Board {
    /// Empty board for a table of `player_count` players.
    ///
    /// ```
    /// use rps_skirmish::board::{Board, BoardShape};
    ///
    /// let board = Board::new(2).unwrap();
    /// assert_eq!(board.shape(), BoardShape::Rectangular { rows: 8, cols: 8 });
    /// assert_eq!(board.cell_count(), 64);
    ///
    /// let hex = Board::new(3).unwrap();
    /// assert_eq!(hex.row_lengths(), &[3, 4, 5, 4, 3]);
    /// ```
    pub fn new(player_count: usize) -> Result<Self, StructuralError> {
        let shape = BoardShape::for_players(player_count)?;
        Ok(Self::build(shape, shape.row_lengths()))
    }

    /// Empty board with an explicit row profile.
    pub fn from_rows(row_lengths: &[u16]) -> Result<Self, StructuralError> {
        if row_lengths.is_empty() {
            return Err(StructuralError::CorruptRecord("board has no rows".into()));
        }
        if let Some(row) = row_lengths.iter().position(|&len| len == 0) {
            return Err(StructuralError::CorruptRecord(format!("row {row} is empty")));
        }
        if row_lengths.len() > usize::from(u16::MAX) {
            return Err(StructuralError::CorruptRecord("too many rows".into()));
        }
        Ok(Self::build(BoardShape::infer(row_lengths), row_lengths.to_vec()))
    }

    fn build(shape: BoardShape, row_lengths: Vec<u16>) -> Self {
        let mut row_offsets = Vec::with_capacity(row_lengths.len());
        let mut total = 0usize;
        for &len in &row_lengths {
            row_offsets.push(total);
            total += usize::from(len);
        }
        Self {
            shape,
            row_lengths,
            row_offsets,
            cells: std::iter::repeat(Cell::default()).take(total).collect(),
        }
    }

    #[must_use]
    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.row_lengths.len() as u16
    }

    #[must_use]
    pub fn row_lengths(&self) -> &[u16] {
        &self.row_lengths
    }

    /// Length of `row`, `None` past the last row.
    #[must_use]
    pub fn row_len(&self, row: u16) -> Option<u16> {
        self.row_lengths.get(usize::from(row)).copied()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.row_len(pos.row).is_some_and(|len| pos.col < len)
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(self.row_offsets[usize::from(pos.row)] + usize::from(pos.col))
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index_of(pos).and_then(|i| self.cells.get(i))
    }

    /// Every coordinate, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.row_lengths
            .iter()
            .enumerate()
            .flat_map(|(row, &len)| (0..len).map(move |col| Position::new(row as u16, col)))
    }

    /// Every cell with its coordinate, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// Every piece on the board, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().filter_map(|cell| cell.occupant.as_ref())
    }

    #[must_use]
    pub fn occupant(&self, pos: Position) -> Option<&Piece> {
        self.cell(pos).and_then(|cell| cell.occupant.as_ref())
    }

    /// Orthogonal neighbours that exist on this board.
    #[must_use]
    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 4]> {
        let mut out = SmallVec::new();
        if !self.contains(pos) {
            return out;
        }
        let candidates = [
            pos.row.checked_sub(1).map(|r| Position::new(r, pos.col)),
            pos.row.checked_add(1).map(|r| Position::new(r, pos.col)),
            pos.col.checked_sub(1).map(|c| Position::new(pos.row, c)),
            pos.col.checked_add(1).map(|c| Position::new(pos.row, c)),
        ];
        for candidate in candidates.into_iter().flatten() {
            if self.contains(candidate) {
                out.push(candidate);
            }
        }
        out
    }

    /// Both cells exist and are one orthogonal step apart.
    #[must_use]
    pub fn are_adjacent(&self, a: Position, b: Position) -> bool {
        self.contains(a) && self.contains(b) && a.manhattan(b) == 1
    }

    // === Mutation (engine only) ===

    fn update(&mut self, pos: Position, f: impl FnOnce(&mut Cell)) -> bool {
        match self.index_of(pos).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) => {
                f(cell);
                true
            }
            None => false,
        }
    }

    /// Put `piece` on the cell named by its `position`, replacing any occupant.
    pub(crate) fn put_piece(&mut self, piece: Piece) -> bool {
        let pos = piece.position;
        self.update(pos, |cell| cell.occupant = Some(piece))
    }

    /// Lift the occupant off `pos`.
    pub(crate) fn take_piece(&mut self, pos: Position) -> Option<Piece> {
        let mut taken = None;
        self.update(pos, |cell| taken = cell.occupant.take());
        taken
    }

    /// Move the occupant of `from` onto `to`, returning whatever stood on `to`.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let mut piece = self.take_piece(from)?;
        let displaced = self.take_piece(to);
        piece.position = to;
        self.put_piece(piece);
        displaced
    }

    pub(crate) fn set_marker(&mut self, pos: Position, marker: Option<Marker>) -> bool {
        self.update(pos, |cell| cell.marker = marker)
    }

    pub(crate) fn reveal(&mut self, pos: Position) {
        self.update(pos, |cell| {
            if let Some(piece) = cell.occupant.as_mut() {
                piece.revealed = true;
            }
        });
    }

    /// Remove every piece and marker owned by `player`.
    pub(crate) fn clear_player(&mut self, player: PlayerId) -> usize {
        let mut removed = 0;
        for cell in self.cells.iter_mut() {
            if cell.occupant_owner() == Some(player) {
                cell.occupant = None;
                removed += 1;
            }
            if cell.marker.is_some_and(|m| m.owner() == player) {
                cell.marker = None;
            }
        }
        removed
    }
}
