//! Game storage and the host loop around the engine.
//!
//! The engine is pure; something still has to load a game, apply an intent
//! and store the result without two writers trampling each other. Stores
//! version every game and `save` only succeeds against the version that was
//! loaded, so a lost race surfaces as `VersionConflict` instead of a silent
//! overwrite.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::record::{decode_bincode, encode_bincode};
use crate::core::{GameError, GameId, GameState, RuleConfig, StructuralError};
use crate::engine::{Events, GameEngine, Intent};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(GameId),

    #[error("game {0} already exists")]
    AlreadyExists(GameId),

    #[error("game {id} is at version {actual}, expected {expected}")]
    VersionConflict { id: GameId, expected: u64, actual: u64 },

    #[error("wrong password for game {0}")]
    WrongPassword(GameId),

    #[error("codec failure: {0}")]
    Codec(String),

    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<StructuralError> for StoreError {
    fn from(err: StructuralError) -> Self {
        match err {
            StructuralError::CorruptRecord(msg) => StoreError::Codec(msg),
            other => StoreError::Game(other.into()),
        }
    }
}

/// A value together with the store version it was read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Versioned game storage.
///
/// Implementations decide the medium; the contract is the versioning:
/// `create` stores version 1, and each successful `save` bumps the version
/// by one.
pub trait GameRepository {
    /// Store a new game. Fails if the id is taken.
    fn create(&mut self, state: &GameState) -> Result<u64, StoreError>;

    fn load(&self, id: &GameId) -> Result<Versioned<GameState>, StoreError>;

    /// Replace a game, provided nobody saved it since `expected_version`.
    /// Returns the new version.
    fn save(&mut self, state: &GameState, expected_version: u64) -> Result<u64, StoreError>;

    fn delete(&mut self, id: &GameId) -> Result<(), StoreError>;

    fn contains(&self, id: &GameId) -> bool;
}

/// In-process store holding bincode-encoded records.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    games: FxHashMap<GameId, Versioned<Vec<u8>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameRepository for InMemoryRepository {
    fn create(&mut self, state: &GameState) -> Result<u64, StoreError> {
        if self.games.contains_key(state.id()) {
            return Err(StoreError::AlreadyExists(state.id().clone()));
        }
        let value = encode_bincode(state)?;
        self.games.insert(state.id().clone(), Versioned { version: 1, value });
        Ok(1)
    }

    fn load(&self, id: &GameId) -> Result<Versioned<GameState>, StoreError> {
        let stored = self.games.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(Versioned {
            version: stored.version,
            value: decode_bincode(&stored.value)?,
        })
    }

    fn save(&mut self, state: &GameState, expected_version: u64) -> Result<u64, StoreError> {
        let value = encode_bincode(state)?;
        let stored = self
            .games
            .get_mut(state.id())
            .ok_or_else(|| StoreError::NotFound(state.id().clone()))?;
        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: state.id().clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        stored.version += 1;
        stored.value = value;
        Ok(stored.version)
    }

    fn delete(&mut self, id: &GameId) -> Result<(), StoreError> {
        self.games
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn contains(&self, id: &GameId) -> bool {
        self.games.contains_key(id)
    }
}

/// Couples an engine with a repository: load, apply, save.
///
/// The host is the single writer of its repository. Run one host per store,
/// or give each game its own lock, to keep intents for a game serialised.
#[derive(Debug)]
pub struct GameHost<R> {
    engine: GameEngine,
    repo: R,
}

impl<R: GameRepository> GameHost<R> {
    pub fn new(rules: RuleConfig, repo: R) -> Self {
        Self {
            engine: GameEngine::new(rules),
            repo,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Open and store a new table.
    pub fn create_game(
        &mut self,
        id: impl Into<GameId>,
        player_count: usize,
        password: Option<String>,
    ) -> Result<GameState, StoreError> {
        let id = id.into();
        if self.repo.contains(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        let state = self.engine.create_game(id, player_count, password)?;
        self.repo.create(&state)?;
        Ok(state)
    }

    /// Apply one intent to a stored game and persist the result.
    ///
    /// A rejected intent leaves the stored game unchanged.
    pub fn submit(&mut self, id: &GameId, intent: &Intent) -> Result<Events, StoreError> {
        let Versioned { version, value } = self.repo.load(id)?;
        let transition = match self.engine.apply(&value, intent) {
            Ok(transition) => transition,
            Err(err) => {
                debug!(game = %id, error = %err, "submission rejected");
                return Err(err.into());
            }
        };
        match self.repo.save(&transition.state, version) {
            Ok(_) => Ok(transition.events),
            Err(err) => {
                warn!(game = %id, error = %err, "save failed, transition dropped");
                Err(err)
            }
        }
    }

    /// Current state of a stored game.
    pub fn state(&self, id: &GameId) -> Result<GameState, StoreError> {
        Ok(self.repo.load(id)?.value)
    }

    /// Check a join attempt against the game's password.
    pub fn join_check(&self, id: &GameId, password: Option<&str>) -> Result<(), StoreError> {
        let state = self.state(id)?;
        if state.password_matches(password) {
            Ok(())
        } else {
            Err(StoreError::WrongPassword(id.clone()))
        }
    }
}
