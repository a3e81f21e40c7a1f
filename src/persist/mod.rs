//! Persistence: flat records, codecs, repositories and the host loop.

mod record;
mod repository;

pub use record::{decode_bincode, decode_json, encode_bincode, encode_json, CellRecord, GameRecord};
pub use repository::{GameHost, GameRepository, InMemoryRepository, StoreError, Versioned};
