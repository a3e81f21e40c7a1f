//! Board topology: shape, cells, adjacency and home regions.
//!
//! The board is generated from the player count alone and is fully
//! deterministic. Cells carry at most one occupant and at most one marker.

mod cell;
mod region;
mod topology;
mod view;

pub use cell::{Cell, Marker};
pub use region::{region_owner, HomeLayout, HomeRegion};
pub use topology::{Board, BoardShape, Position, RECT_BASE_COLS, RECT_COLS_PER_PLAYER, RECT_ROWS};
pub use view::{BoardView, CellView, SeenPiece};
