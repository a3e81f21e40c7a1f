//! Game rules: combat, movement and setup.
//!
//! `combat` and `movement` are pure functions over boards and pieces.
//! `setup` validates and applies the deployment intents.

pub mod combat;
pub mod movement;
pub mod setup;

pub use combat::{resolve, resolve_encounter, Casualties, Encounter, Outcome};
pub use movement::{check_move, has_legal_move, is_legal_move, legal_moves};
pub use setup::{mark_ready, place_piece, start_game};
