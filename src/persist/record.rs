//! Flat, storage-friendly snapshot of a game.
//!
//! `GameState` keeps its board in a persistent vector and its cells as
//! nested options. `GameRecord` flattens all of that into plain rows so any
//! store can hold it: bincode for compact blobs, JSON for document stores.
//!
//! `to_record` and `from_record` are inverses. `from_record` checks the
//! record's internal consistency and never trusts it blindly.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Marker};
use crate::core::{
    GameId, GameRngState, GameState, MoveRecord, Phase, PlayerId, PlayerMap, PlayerSlot, RuleConfig,
    StructuralError,
};
use crate::pieces::{Piece, PieceId, PieceKind};

/// One cell, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Occupant kind, if a piece stands here.
    pub kind: Option<PieceKind>,
    pub owner: Option<PlayerId>,
    pub piece_id: Option<u32>,
    pub revealed: bool,
    pub is_trap: bool,
    pub is_flag: bool,
    pub marker_owner: Option<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub row_lengths: Vec<u16>,
    pub cells: Vec<CellRecord>,
    pub players: Vec<PlayerSlot>,
    pub current_player: PlayerId,
    pub phase: Phase,
    pub winner: Option<PlayerId>,
    pub turn_number: u32,
    pub next_piece_id: u32,
    pub rules: RuleConfig,
    pub rng: GameRngState,
    pub password: Option<String>,
    pub history: Vec<MoveRecord>,
}

impl CellRecord {
    fn from_cell(cell: &Cell) -> Self {
        let mut record = CellRecord::default();
        if let Some(piece) = &cell.occupant {
            record.kind = Some(piece.kind);
            record.owner = Some(piece.owner);
            record.piece_id = Some(piece.id.0);
            record.revealed = piece.revealed;
        }
        if let Some(marker) = cell.marker {
            record.is_trap = matches!(marker, Marker::Trap(_));
            record.is_flag = matches!(marker, Marker::Flag(_));
            record.marker_owner = Some(marker.owner());
        }
        record
    }

    fn into_cell(self, index: usize, board: &Board) -> Result<Cell, StructuralError> {
        let corrupt = |what: &str| StructuralError::CorruptRecord(format!("cell {index}: {what}"));
        let position = board
            .positions()
            .nth(index)
            .ok_or_else(|| corrupt("beyond the board"))?;

        let occupant = match (self.kind, self.owner, self.piece_id) {
            (Some(kind), Some(owner), Some(id)) => Some(Piece {
                id: PieceId(id),
                kind,
                owner,
                position,
                revealed: self.revealed,
            }),
            (None, None, None) => None,
            _ => return Err(corrupt("partial occupant")),
        };

        let marker = match (self.is_flag, self.is_trap, self.marker_owner) {
            (true, false, Some(owner)) => Some(Marker::Flag(owner)),
            (false, true, Some(owner)) => Some(Marker::Trap(owner)),
            (false, false, None) => None,
            _ => return Err(corrupt("malformed marker")),
        };

        Ok(Cell { occupant, marker })
    }
}

impl GameState {
    /// Flatten into a storable record.
    #[must_use]
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            id: self.id.clone(),
            row_lengths: self.board.row_lengths().to_vec(),
            cells: self.board.cells().map(|(_, cell)| CellRecord::from_cell(cell)).collect(),
            players: self.players.as_slice().to_vec(),
            current_player: self.current_player,
            phase: self.phase,
            winner: self.winner,
            turn_number: self.turn_number,
            next_piece_id: self.next_piece_id,
            rules: self.rules.clone(),
            rng: self.rng,
            password: self.password.clone(),
            history: self.history.iter().copied().collect(),
        }
    }

    /// Rebuild a state from a record, rejecting anything inconsistent.
    pub fn from_record(record: GameRecord) -> Result<GameState, StructuralError> {
        let mut board = Board::from_rows(&record.row_lengths)?;
        if record.cells.len() != board.cell_count() {
            return Err(StructuralError::CorruptRecord(format!(
                "{} cells recorded for a board of {}",
                record.cells.len(),
                board.cell_count()
            )));
        }

        let cells = record
            .cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| cell.into_cell(i, &board))
            .collect::<Result<Vec<_>, _>>()?;
        let positions: Vec<_> = board.positions().collect();
        for (pos, cell) in positions.into_iter().zip(cells) {
            if let Some(piece) = cell.occupant {
                board.put_piece(piece);
            }
            board.set_marker(pos, cell.marker);
        }

        let players = PlayerMap::from_vec(record.players)
            .filter(|players| players.player_count() >= 2)
            .ok_or_else(|| StructuralError::CorruptRecord("fewer than two players".into()))?;

        let state = GameState {
            id: record.id,
            board,
            players,
            current_player: record.current_player,
            phase: record.phase,
            winner: record.winner,
            turn_number: record.turn_number,
            next_piece_id: record.next_piece_id,
            rules: record.rules,
            rng: record.rng,
            password: record.password,
            history: record.history.into_iter().collect::<Vector<_>>(),
        };
        state.check_invariants()?;
        Ok(state)
    }
}

/// Compact binary encoding.
pub fn encode_bincode(state: &GameState) -> Result<Vec<u8>, StructuralError> {
    bincode::serialize(&state.to_record()).map_err(|e| StructuralError::CorruptRecord(e.to_string()))
}

pub fn decode_bincode(bytes: &[u8]) -> Result<GameState, StructuralError> {
    let record: GameRecord =
        bincode::deserialize(bytes).map_err(|e| StructuralError::CorruptRecord(e.to_string()))?;
    GameState::from_record(record)
}

/// JSON encoding for document stores and debugging.
pub fn encode_json(state: &GameState) -> Result<String, StructuralError> {
    serde_json::to_string(&state.to_record()).map_err(|e| StructuralError::CorruptRecord(e.to_string()))
}

pub fn decode_json(json: &str) -> Result<GameState, StructuralError> {
    let record: GameRecord =
        serde_json::from_str(json).map_err(|e| StructuralError::CorruptRecord(e.to_string()))?;
    GameState::from_record(record)
}
