//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for a game
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
pub struct GameId(pub u64);

/// Unique identifier for a player within a game
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
pub struct PlayerId(pub u64);

/// Unique identifier for a unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
pub struct UnitId(pub u64);

/// Unique identifier for a planet
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
pub struct PlanetId(pub u64);

/// Unique identifier for a station
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
pub struct StationId(pub u64);

/// Key into the static unit catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub struct CatalogId(pub String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Key into the static specialist catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub struct SpecialistId(pub String);

impl SpecialistId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpecialistId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Source of fresh unit ids for anything spawned during a tick.
///
/// Must be monotonic: ids are never reused within a game.
pub trait IdGenerator {
    fn next_unit_id(&mut self) -> UnitId;
}

/// Counter-based id generator
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new(first: u64) -> Self {
        Self { next: first }
    }

    /// Generator whose first id is `last + 1`
    pub fn starting_after(last: u64) -> Self {
        Self::new(last + 1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next += 1;
        id
    }
}
