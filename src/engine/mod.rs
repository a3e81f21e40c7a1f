//! The engine surface: intents in, transitions and events out.

mod event;
mod game;
mod intent;

pub use event::{Events, GameEvent};
pub use game::{GameEngine, Transition};
pub use intent::Intent;
