//! Piece catalogue: what can be deployed and who owns it.
//!
//! Three combat kinds (Rock, Paper, Scissors) move and fight. Flag and Trap
//! are deployed during setup like pieces but live on the board as cell
//! markers, never as occupants.

mod kind;
mod piece;

pub use kind::{ParseKindError, PieceKind};
pub use piece::{Piece, PieceId};
