//! Core engine types: players, configuration, errors, RNG and game state.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{DrawRule, RuleConfig, StartingPlayer, TrapRule};
pub use error::{GameError, PhaseError, StructuralError, ValidationError};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, GameRngState};
pub use state::{GameId, GameState, MoveRecord, Phase, PlayerSlot};
