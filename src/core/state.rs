//! Game state.
//!
//! A `GameState` is a value: the engine never mutates the state it is
//! handed, it clones it (cheaply, the board and history are persistent
//! vectors) and returns the successor. Everything a stored game needs to
//! resume lives here, including the rule set and the RNG position.
//!
//! ## Invariants
//!
//! - A piece's `position` names the cell that holds it.
//! - Each player has at most one flag and one trap marker on the board.
//! - While playing, every active player still has their flag.
//! - `current_player` is seated and, while playing, not eliminated.
//! - A winner is recorded exactly when the phase is `Ended`.
//!
//! `check_invariants` verifies all of these.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use super::error::StructuralError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRngState;
use crate::board::{Board, BoardView, HomeRegion, Marker, Position};
use crate::pieces::{PieceId, PieceKind};

/// Game lifecycle. `Ended` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Playing,
    Ended,
}

/// Opaque game identifier chosen by the host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-seat bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Where this player may deploy.
    pub home: HomeRegion,
    /// Deployments so far, by kind.
    pub placed: FxHashMap<PieceKind, u32>,
    pub ready: bool,
    pub eliminated: bool,
}

impl PlayerSlot {
    #[must_use]
    pub fn new(home: HomeRegion) -> Self {
        Self {
            home,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn placed(&self, kind: PieceKind) -> u32 {
        self.placed.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn combat_placed(&self) -> u32 {
        PieceKind::COMBAT.iter().map(|&k| self.placed(k)).sum()
    }

    #[must_use]
    pub fn flag_placed(&self) -> bool {
        self.placed(PieceKind::Flag) > 0
    }

    #[must_use]
    pub fn trap_placed(&self) -> bool {
        self.placed(PieceKind::Trap) > 0
    }

    /// Flag, trap and the full combat quota are all on the board.
    #[must_use]
    pub fn setup_complete(&self, rules: &RuleConfig) -> bool {
        self.flag_placed() && self.trap_placed() && self.combat_placed() >= rules.combat_pieces
    }

    pub(crate) fn record_placement(&mut self, kind: PieceKind) {
        *self.placed.entry(kind).or_insert(0) += 1;
    }
}

/// One applied move, kept for replay and review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub from: Position,
    pub to: Position,
    pub turn: u32,
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) id: GameId,
    pub(crate) board: Board,
    pub(crate) players: PlayerMap<PlayerSlot>,
    pub(crate) current_player: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) winner: Option<PlayerId>,
    /// Starts at 1, advances after every completed move.
    pub(crate) turn_number: u32,
    pub(crate) next_piece_id: u32,
    pub(crate) rules: RuleConfig,
    pub(crate) rng: GameRngState,
    pub(crate) password: Option<String>,
    pub(crate) history: Vector<MoveRecord>,
}

impl GameState {
    /// Fresh game in `Setup` with an empty board.
    pub(crate) fn new(
        id: GameId,
        board: Board,
        homes: PlayerMap<HomeRegion>,
        rules: RuleConfig,
        password: Option<String>,
    ) -> Self {
        let players = PlayerMap::new(homes.player_count(), |p| PlayerSlot::new(homes[p].clone()));
        Self {
            id,
            board,
            players,
            current_player: PlayerId::new(0),
            phase: Phase::Setup,
            winner: None,
            turn_number: 1,
            next_piece_id: 0,
            rng: GameRngState::seeded(rules.seed),
            rules,
            password,
            history: Vector::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &GameId {
        &self.id
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerSlot> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerSlot> {
        self.players.get(player)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Index of the player to move in seat order.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player.index()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Derived queries ===

    /// Seats still in the game, in seat order.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, slot)| !slot.eliminated)
            .map(|(p, _)| p)
            .collect()
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.players.get(player).is_some_and(|slot| !slot.eliminated)
    }

    /// Combat pieces `player` still has on the board.
    #[must_use]
    pub fn pieces_remaining(&self, player: PlayerId) -> usize {
        self.board.pieces().filter(|p| p.owner == player).count()
    }

    /// Cell holding `player`'s flag, if it is still on the board.
    #[must_use]
    pub fn flag_position(&self, player: PlayerId) -> Option<Position> {
        self.board
            .cells()
            .find(|(_, cell)| cell.marker == Some(Marker::Flag(player)))
            .map(|(pos, _)| pos)
    }

    /// The board as `viewer` may see it.
    #[must_use]
    pub fn view_for(&self, viewer: PlayerId) -> BoardView {
        BoardView::new(&self.board, viewer)
    }

    // === Password ===

    #[must_use]
    pub fn requires_password(&self) -> bool {
        self.password.is_some()
    }

    /// Unprotected games accept any candidate.
    #[must_use]
    pub fn password_matches(&self, candidate: Option<&str>) -> bool {
        match &self.password {
            None => true,
            Some(expected) => candidate == Some(expected.as_str()),
        }
    }

    // === Engine internals ===

    pub(crate) fn alloc_piece_id(&mut self) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        id
    }

    pub(crate) fn slot_mut(&mut self, player: PlayerId) -> Option<&mut PlayerSlot> {
        self.players.get_mut(player)
    }

    // === Consistency ===

    /// Verify the state invariants listed in the module docs.
    pub fn check_invariants(&self) -> Result<(), StructuralError> {
        let fail = |msg: String| Err(StructuralError::CorruptRecord(msg));

        let mut seen_ids = FxHashSet::default();
        let mut on_board: FxHashMap<(PlayerId, PieceKind), u32> = FxHashMap::default();

        for (pos, cell) in self.board.cells() {
            if let Some(piece) = &cell.occupant {
                if piece.position != pos {
                    return fail(format!("piece {:?} at {pos} records {}", piece.id, piece.position));
                }
                if !piece.kind.is_combat() {
                    return fail(format!("{} at {pos} cannot occupy a cell", piece.kind));
                }
                if !self.players.contains(piece.owner) {
                    return fail(format!("piece at {pos} belongs to unseated {}", piece.owner));
                }
                if piece.id.0 >= self.next_piece_id || !seen_ids.insert(piece.id) {
                    return fail(format!("piece id {:?} at {pos} is not unique", piece.id));
                }
                *on_board.entry((piece.owner, piece.kind)).or_insert(0) += 1;
            }
            if let Some(marker) = cell.marker {
                if !self.players.contains(marker.owner()) {
                    return fail(format!("marker at {pos} belongs to unseated {}", marker.owner()));
                }
                *on_board.entry((marker.owner(), marker.kind())).or_insert(0) += 1;
            }
        }

        for (player, slot) in self.players.iter() {
            for kind in PieceKind::MARKERS {
                let count = on_board.get(&(player, kind)).copied().unwrap_or(0);
                if count > 1 {
                    return fail(format!("{player} has {count} {kind} markers"));
                }
            }
            if self.phase == Phase::Setup {
                for kind in PieceKind::COMBAT.into_iter().chain(PieceKind::MARKERS) {
                    let count = on_board.get(&(player, kind)).copied().unwrap_or(0);
                    if count != slot.placed(kind) {
                        return fail(format!("{player} placed {} {kind} but {count} are on the board", slot.placed(kind)));
                    }
                }
            }
            if self.phase == Phase::Playing && !slot.eliminated && !on_board.contains_key(&(player, PieceKind::Flag)) {
                return fail(format!("active {player} has no flag"));
            }
        }

        if !self.players.contains(self.current_player) {
            return fail(format!("current player {} is not seated", self.current_player));
        }
        if self.phase == Phase::Playing && !self.is_active(self.current_player) {
            return fail(format!("current player {} is eliminated", self.current_player));
        }
        if (self.phase == Phase::Ended) != self.winner.is_some() {
            return fail(format!("phase {:?} with winner {:?}", self.phase, self.winner));
        }
        if self.board.pieces().count() > self.board.cell_count() {
            return fail("more pieces than cells".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HomeLayout;
    use crate::pieces::Piece;

    fn fresh(players: usize) -> GameState {
        let rules = RuleConfig::default().with_combat_pieces(2);
        let board = Board::new(players).unwrap();
        let homes = HomeLayout::default()
            .resolve(&board, players, rules.setup_cells())
            .unwrap();
        GameState::new(GameId::from("g"), board, homes, rules, None)
    }

    #[test]
    fn test_new_state() {
        let state = fresh(2);

        assert_eq!(state.phase(), Phase::Setup);
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_player_index(), 0);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.winner(), None);
        assert_eq!(state.active_players().len(), 2);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_slot_counters() {
        let mut slot = PlayerSlot::default();
        let rules = RuleConfig::default().with_combat_pieces(2);

        slot.record_placement(PieceKind::Rock);
        slot.record_placement(PieceKind::Paper);
        slot.record_placement(PieceKind::Flag);
        assert_eq!(slot.combat_placed(), 2);
        assert!(slot.flag_placed());
        assert!(!slot.setup_complete(&rules));

        slot.record_placement(PieceKind::Trap);
        assert!(slot.setup_complete(&rules));
    }

    #[test]
    fn test_password() {
        let mut state = fresh(2);
        assert!(!state.requires_password());
        assert!(state.password_matches(None));

        state.password = Some("hunter2".into());
        assert!(state.requires_password());
        assert!(state.password_matches(Some("hunter2")));
        assert!(!state.password_matches(Some("nope")));
        assert!(!state.password_matches(None));
    }

    #[test]
    fn test_invariants_catch_duplicate_piece() {
        let mut state = fresh(2);
        let id = state.alloc_piece_id();
        state.board.put_piece(Piece::new(id, PieceKind::Rock, PlayerId::new(0), Position::new(0, 0)));
        state.slot_mut(PlayerId::new(0)).unwrap().record_placement(PieceKind::Rock);
        assert!(state.check_invariants().is_ok());

        state.board.put_piece(Piece {
            position: Position::new(0, 1),
            ..Piece::new(id, PieceKind::Rock, PlayerId::new(0), Position::new(0, 0))
        });
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_invariants_catch_winner_mismatch() {
        let mut state = fresh(2);
        state.winner = Some(PlayerId::new(1));
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_flag_position() {
        let mut state = fresh(2);
        state.board.set_marker(Position::new(7, 3), Some(Marker::Flag(PlayerId::new(1))));

        assert_eq!(state.flag_position(PlayerId::new(1)), Some(Position::new(7, 3)));
        assert_eq!(state.flag_position(PlayerId::new(0)), None);
    }
}
