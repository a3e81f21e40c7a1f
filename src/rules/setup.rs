//! Setup phase: deployment, readiness and the start of play.
//!
//! Each player deploys their full combat quota plus one flag and one trap
//! inside their home region, then declares ready. Play starts once every
//! player is ready.
//!
//! The `*_in` variants validate first and mutate last, so a failure leaves
//! the state untouched; the public wrappers work on a clone.

use tracing::info;

use crate::board::{Marker, Position};
use crate::core::{
    GameError, GameRng, GameState, Phase, PhaseError, PlayerId, StartingPlayer, ValidationError,
};
use crate::engine::GameEvent;
use crate::pieces::{Piece, PieceKind};

/// Deploy `kind` for `player` at `at`.
pub fn place_piece(
    state: &GameState,
    player: PlayerId,
    at: Position,
    kind: PieceKind,
) -> Result<(GameState, GameEvent), GameError> {
    let mut next = state.clone();
    let event = place_piece_in(&mut next, player, at, kind)?;
    Ok((next, event))
}

/// Declare `player` done with setup.
pub fn mark_ready(state: &GameState, player: PlayerId) -> Result<(GameState, GameEvent), GameError> {
    let mut next = state.clone();
    let event = mark_ready_in(&mut next, player)?;
    Ok((next, event))
}

/// Leave setup and hand the first turn to the starting player.
pub fn start_game(state: &GameState) -> Result<(GameState, GameEvent), GameError> {
    let mut next = state.clone();
    let event = start_game_in(&mut next)?;
    Ok((next, event))
}

fn require_setup(state: &GameState) -> Result<(), PhaseError> {
    if state.phase() != Phase::Setup {
        return Err(PhaseError::WrongPhase {
            expected: Phase::Setup,
            actual: state.phase(),
        });
    }
    Ok(())
}

pub(crate) fn place_piece_in(
    state: &mut GameState,
    player: PlayerId,
    at: Position,
    kind: PieceKind,
) -> Result<GameEvent, GameError> {
    require_setup(state)?;
    let slot = state
        .player(player)
        .ok_or(ValidationError::UnknownPlayer { player })?;
    if slot.ready {
        return Err(PhaseError::AlreadyReady { player }.into());
    }

    let cell = state
        .board()
        .cell(at)
        .ok_or(ValidationError::OutOfBounds { pos: at })?;
    if !slot.home.contains(at) {
        return Err(ValidationError::OutOfRegion { player, pos: at }.into());
    }
    if !cell.is_vacant() {
        return Err(ValidationError::CellOccupied { pos: at }.into());
    }

    let rules = state.rules();
    let exhausted = match kind {
        PieceKind::Flag | PieceKind::Trap => slot.placed(kind) >= 1,
        _ => {
            slot.combat_placed() >= rules.combat_pieces
                || rules.max_per_kind.is_some_and(|cap| slot.placed(kind) >= cap)
        }
    };
    if exhausted {
        return Err(ValidationError::QuotaExhausted { player, kind }.into());
    }

    // Validation done; everything below succeeds.
    match Marker::for_kind(kind, player) {
        Some(marker) => {
            state.board.set_marker(at, Some(marker));
        }
        None => {
            let id = state.alloc_piece_id();
            state.board.put_piece(Piece::new(id, kind, player, at));
        }
    }
    if let Some(slot) = state.slot_mut(player) {
        slot.record_placement(kind);
    }

    Ok(GameEvent::PiecePlaced { player, at, kind })
}

pub(crate) fn mark_ready_in(state: &mut GameState, player: PlayerId) -> Result<GameEvent, GameError> {
    require_setup(state)?;
    let slot = state
        .player(player)
        .ok_or(ValidationError::UnknownPlayer { player })?;
    if slot.ready {
        return Err(PhaseError::AlreadyReady { player }.into());
    }
    if !slot.setup_complete(state.rules()) {
        return Err(PhaseError::SetupIncomplete { player }.into());
    }

    if let Some(slot) = state.slot_mut(player) {
        slot.ready = true;
    }
    Ok(GameEvent::PlayerReady { player })
}

pub(crate) fn start_game_in(state: &mut GameState) -> Result<GameEvent, GameError> {
    require_setup(state)?;
    if let Some((player, _)) = state.players().iter().find(|(_, slot)| !slot.ready) {
        return Err(PhaseError::SetupIncomplete { player }.into());
    }

    let first = match state.rules().starting_player {
        StartingPlayer::Fixed(player) => {
            if !state.players().contains(player) {
                return Err(ValidationError::UnknownPlayer { player }.into());
            }
            player
        }
        StartingPlayer::Random => {
            let mut rng = GameRng::from_state(&state.rng);
            let seats: Vec<PlayerId> = state.players().iter().map(|(p, _)| p).collect();
            let chosen = rng.choose(&seats).copied().unwrap_or(PlayerId::new(0));
            state.rng = rng.state();
            chosen
        }
    };

    state.current_player = first;
    state.phase = Phase::Playing;
    info!(game = %state.id(), %first, "game started");
    Ok(GameEvent::GameStarted { first })
}
