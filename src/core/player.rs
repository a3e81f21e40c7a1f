//! Player identification and per-player storage.
//!
//! ## PlayerId
//!
//! Seat index of a player, 0-based, in seating order. Turn rotation walks
//! seats in ascending order and wraps.
//!
//! ## PlayerMap
//!
//! One entry per seat, indexed by `PlayerId`. The engine keeps every piece of
//! per-player bookkeeping (readiness, placement counters, elimination) in a
//! `PlayerMap` so no code path assumes two players.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Largest supported table.
pub const MAX_PLAYERS: usize = 255;

/// Seat index of a player (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All seats of a table with `player_count` players.
    ///
    /// ```
    /// use rps_skirmish::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_PLAYERS) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat storage with O(1) access.
///
/// ```
/// use rps_skirmish::core::{PlayerId, PlayerMap};
///
/// let mut ready: PlayerMap<bool> = PlayerMap::with_value(2, false);
/// ready[PlayerId::new(1)] = true;
/// assert_eq!(ready.iter().filter(|(_, r)| **r).count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Every seat starts with a clone of `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Wrap an existing per-seat vector (seat order).
    ///
    /// Returns `None` for an empty or oversized vector.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Option<Self> {
        if data.is_empty() || data.len() > MAX_PLAYERS {
            return None;
        }
        Some(Self { data })
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Does this seat exist?
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Entry for a seat, `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable entry for a seat, `None` for an unknown seat.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over `(PlayerId, &T)` in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over `(PlayerId, &mut T)` in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Entries in seat order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// First seat after `from` (wrapping) whose entry satisfies `pred`.
    ///
    /// `from` itself is checked last, so a table where only `from` qualifies
    /// returns `from`.
    pub fn next_matching(&self, from: PlayerId, pred: impl Fn(&T) -> bool) -> Option<PlayerId> {
        let count = self.data.len();
        (1..=count)
            .map(|step| (from.index() + step) % count)
            .find(|&i| pred(&self.data[i]))
            .map(|i| PlayerId(i as u8))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
