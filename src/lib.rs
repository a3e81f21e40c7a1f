//! # rps-skirmish
//!
//! A deterministic engine for hidden-information board battles where every
//! fight is settled by rock-paper-scissors.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `GameEngine::apply` takes a state and an intent
//!    and returns the next state plus events. The input is never touched, so
//!    a rejected intent costs nothing and replays are exact.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context. The
//!    board shape, home regions and turn order all follow from it.
//!
//! 3. **Configuration Over Convention**: Quotas, draw and trap behaviour,
//!    the starting player and home layout live in `RuleConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` so each
//!   transition can build a fresh state cheaply.
//!
//! - **Hidden information**: pieces stay concealed until they fight.
//!   `GameState::view_for` gives each player only what they may see.
//!
//! - **No I/O in the engine**: transport, timers and storage belong to the
//!   host. `persist` offers a versioned repository and a small host loop.
//!
//! ## Modules
//!
//! - `core`: players, configuration, errors, RNG and game state
//! - `board`: topology, cells, home regions and per-player views
//! - `pieces`: piece kinds and instances
//! - `rules`: combat, movement and setup rules
//! - `engine`: intents, events and the engine itself
//! - `persist`: records, codecs, repositories and `GameHost`

pub mod board;
pub mod core;
pub mod engine;
pub mod persist;
pub mod pieces;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    DrawRule, GameError, GameId, GameRng, GameRngState, GameState, MoveRecord, Phase, PhaseError,
    PlayerId, PlayerMap, PlayerSlot, RuleConfig, StartingPlayer, StructuralError, TrapRule,
    ValidationError,
};

pub use crate::board::{Board, BoardShape, BoardView, Cell, HomeLayout, HomeRegion, Marker, Position};

pub use crate::pieces::{Piece, PieceId, PieceKind};

pub use crate::rules::{check_move, legal_moves, resolve, Encounter, Outcome};

pub use crate::engine::{Events, GameEngine, GameEvent, Intent, Transition};

pub use crate::persist::{GameHost, GameRecord, GameRepository, InMemoryRepository, StoreError, Versioned};
