//! Galaxy terrain types and their effects
//!
//! Static table: movement cost and combat shift per terrain.

use serde::{Deserialize, Serialize};

/// Terrain of a galaxy hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Terrain {
    #[default]
    Empty,          // Open space
    AsteroidField,  // Slow, defensive cover
    Nebula,         // Slow, sensor cover
    DebrisField,    // Slow, no cover
    GravityWell,    // Very slow, strong fortification
    RadiationStorm, // Normal speed, damages anything sitting in it
    Singularity,    // Impassable
}

impl Terrain {
    /// Movement points to enter a hex of this terrain, `None` if impassable
    pub fn movement_cost(&self) -> Option<u32> {
        match self {
            Terrain::Empty => Some(1),
            Terrain::AsteroidField => Some(2),
            Terrain::Nebula => Some(2),
            Terrain::DebrisField => Some(2),
            Terrain::GravityWell => Some(3),
            Terrain::RadiationStorm => Some(1),
            Terrain::Singularity => None,
        }
    }

    /// Combat shift when defending here (negative favours the defender)
    pub fn combat_shift(&self) -> i32 {
        match self {
            Terrain::AsteroidField | Terrain::Nebula => -1,
            Terrain::GravityWell => -2,
            _ => 0,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.movement_cost().is_some()
    }

    /// Units on hazardous terrain lose a step to suppression every tick
    pub fn is_hazardous(&self) -> bool {
        matches!(self, Terrain::RadiationStorm)
    }
}
