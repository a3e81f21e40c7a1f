//! Home regions: where each player may deploy during setup.
//!
//! The default layout hands each player a band of whole rows, spread evenly
//! from the top edge to the bottom edge. Tables that want something else
//! (sectors, corners) pass an explicit cell list per seat.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::topology::{Board, Position};
use crate::core::error::StructuralError;
use crate::core::player::{PlayerId, PlayerMap};

/// Policy for carving the board into home regions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeLayout {
    /// Contiguous bands of up to `depth` rows per player.
    ///
    /// Band height is `max(1, min(depth, rows / players))`; player `i`'s band
    /// starts at `round(i * (rows - height) / (players - 1))`, so seat 0 owns
    /// the top edge and the last seat the bottom edge.
    Bands { depth: u16 },
    /// One cell list per seat, in seat order.
    Explicit(Vec<Vec<Position>>),
}

impl Default for HomeLayout {
    fn default() -> Self {
        HomeLayout::Bands { depth: 2 }
    }
}

impl HomeLayout {
    /// Carve `board` into one region per seat.
    ///
    /// Every region must hold at least `required` cells.
    pub fn resolve(
        &self,
        board: &Board,
        player_count: usize,
        required: usize,
    ) -> Result<PlayerMap<HomeRegion>, StructuralError> {
        let regions = match self {
            HomeLayout::Bands { depth } => bands(board, player_count, *depth)?,
            HomeLayout::Explicit(cells) => explicit(board, player_count, cells)?,
        };

        for (player, region) in regions.iter() {
            if region.len() < required {
                return Err(StructuralError::HomeRegionTooSmall {
                    player,
                    cells: region.len(),
                    required,
                });
            }
        }
        Ok(regions)
    }
}

fn bands(board: &Board, player_count: usize, depth: u16) -> Result<PlayerMap<HomeRegion>, StructuralError> {
    if depth == 0 {
        return Err(StructuralError::InvalidHomeLayout("band depth must be at least 1".into()));
    }
    let rows = u32::from(board.rows());
    let n = player_count as u32;
    if n < 2 || rows < n {
        return Err(StructuralError::InvalidHomeLayout(format!(
            "{rows} rows cannot hold {n} row bands; supply an explicit layout"
        )));
    }

    let height = u32::from(depth).min(rows / n).max(1);
    let span = rows - height;
    let regions: Vec<HomeRegion> = (0..n)
        .map(|i| {
            // round(i * span / (n - 1)), half rounds up
            let start = (2 * i * span + (n - 1)) / (2 * (n - 1));
            let cells = (start..start + height)
                .flat_map(|row| {
                    let row = row as u16;
                    let len = board.row_len(row).unwrap_or(0);
                    (0..len).map(move |col| Position::new(row, col))
                })
                .collect();
            HomeRegion { cells }
        })
        .collect();

    PlayerMap::from_vec(regions)
        .ok_or_else(|| StructuralError::InvalidHomeLayout("no seats".into()))
}

fn explicit(
    board: &Board,
    player_count: usize,
    lists: &[Vec<Position>],
) -> Result<PlayerMap<HomeRegion>, StructuralError> {
    if lists.len() != player_count {
        return Err(StructuralError::InvalidHomeLayout(format!(
            "{} regions supplied for {player_count} players",
            lists.len()
        )));
    }

    let mut claimed: FxHashSet<Position> = FxHashSet::default();
    let mut regions = Vec::with_capacity(lists.len());
    for (seat, list) in lists.iter().enumerate() {
        let mut cells = FxHashSet::default();
        for &pos in list {
            if !board.contains(pos) {
                return Err(StructuralError::InvalidHomeLayout(format!(
                    "region {seat} names {pos}, which is off the board"
                )));
            }
            if !claimed.insert(pos) && !cells.contains(&pos) {
                return Err(StructuralError::InvalidHomeLayout(format!(
                    "{pos} is claimed by more than one region"
                )));
            }
            cells.insert(pos);
        }
        regions.push(HomeRegion { cells });
    }

    PlayerMap::from_vec(regions)
        .ok_or_else(|| StructuralError::InvalidHomeLayout("no seats".into()))
}

/// Cells one player may deploy into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeRegion {
    cells: FxHashSet<Position>,
}

impl HomeRegion {
    #[must_use]
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            cells: positions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        let mut out: Vec<_> = self.cells.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Distinct rows touched, ascending.
    #[must_use]
    pub fn rows(&self) -> Vec<u16> {
        let mut rows: Vec<_> = self.cells.iter().map(|p| p.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}

/// Which seat, if any, owns `pos` as home territory.
#[must_use]
pub fn region_owner(regions: &PlayerMap<HomeRegion>, pos: Position) -> Option<PlayerId> {
    regions.iter().find(|(_, r)| r.contains(pos)).map(|(p, _)| p)
}
