//! Hex coordinate system for the galaxy map (cube coordinates)
//!
//! Every coordinate keeps `q + r + s = 0`. Only exact integer arithmetic is
//! used here; nothing is rounded from floats.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;

/// Cube hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct HexCoords {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl HexCoords {
    pub const ORIGIN: Self = Self { q: 0, r: 0, s: 0 };

    /// Unit offsets in direction order (see `HexDirection`)
    pub const DIRECTIONS: [HexCoords; 6] = [
        HexCoords { q: 1, r: 0, s: -1 },  // East
        HexCoords { q: 1, r: -1, s: 0 },  // NorthEast
        HexCoords { q: 0, r: -1, s: 1 },  // NorthWest
        HexCoords { q: -1, r: 0, s: 1 },  // West
        HexCoords { q: -1, r: 1, s: 0 },  // SouthWest
        HexCoords { q: 0, r: 1, s: -1 },  // SouthEast
    ];

    pub fn new(q: i32, r: i32, s: i32) -> Self {
        debug_assert_eq!(q + r + s, 0, "cube coordinates must sum to zero");
        Self { q, r, s }
    }

    /// Build from axial (q, r); s is derived
    pub fn from_axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn is_valid(&self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// Canonical map key, `"q,r,s"`
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn scale(self, factor: i32) -> Self {
        Self {
            q: self.q * factor,
            r: self.r * factor,
            s: self.s * factor,
        }
    }

    pub fn neighbor(self, direction: HexDirection) -> Self {
        self + direction.offset()
    }

    /// Get all 6 neighboring hex coordinates, in direction order
    pub fn neighbors(self) -> [HexCoords; 6] {
        Self::DIRECTIONS.map(|d| self + d)
    }

    /// Hex steps between two coordinates
    pub fn distance(self, other: Self) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        (dq + dr + ds) / 2
    }

    pub fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }

    /// All hexes at exactly `radius`, walking the ring from the south-west corner
    pub fn ring(self, radius: u32) -> Vec<HexCoords> {
        if radius == 0 {
            return vec![self];
        }

        let radius = radius as i32;
        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut current = self + HexDirection::SouthWest.offset().scale(radius);
        for direction in HexDirection::all() {
            for _ in 0..radius {
                results.push(current);
                current = current.neighbor(direction);
            }
        }
        results
    }

    /// Get all hexes within range (inclusive)
    pub fn range(self, radius: u32) -> Vec<HexCoords> {
        let radius = radius as i32;
        let mut results = Vec::new();
        for q in -radius..=radius {
            for r in (-radius).max(-q - radius)..=radius.min(-q + radius) {
                results.push(self + HexCoords::from_axial(q, r));
            }
        }
        results
    }
}

impl Add for HexCoords {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
            s: self.s + rhs.s,
        }
    }
}

impl Sub for HexCoords {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            q: self.q - rhs.q,
            r: self.r - rhs.r,
            s: self.s - rhs.s,
        }
    }
}

impl fmt::Display for HexCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

impl FromStr for HexCoords {
    type Err = EngineError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split(',').collect();
        let [q, r, s] = parts.as_slice() else {
            return Err(EngineError::InvalidHexKey(key.to_string()));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| EngineError::InvalidHexKey(key.to_string()))
        };

        let coords = HexCoords {
            q: parse(q)?,
            r: parse(r)?,
            s: parse(s)?,
        };
        if !coords.is_valid() {
            return Err(EngineError::InvalidHexKey(key.to_string()));
        }
        Ok(coords)
    }
}

/// The six hex directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub fn index(&self) -> usize {
        match self {
            HexDirection::East => 0,
            HexDirection::NorthEast => 1,
            HexDirection::NorthWest => 2,
            HexDirection::West => 3,
            HexDirection::SouthWest => 4,
            HexDirection::SouthEast => 5,
        }
    }

    /// Get the hex offset for this direction
    pub fn offset(&self) -> HexCoords {
        HexCoords::DIRECTIONS[self.index()]
    }

    /// Get opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            HexDirection::East => HexDirection::West,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::West => HexDirection::East,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::SouthEast => HexDirection::NorthWest,
        }
    }

    /// All directions
    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::East,
            HexDirection::NorthEast,
            HexDirection::NorthWest,
            HexDirection::West,
            HexDirection::SouthWest,
            HexDirection::SouthEast,
        ]
    }
}
