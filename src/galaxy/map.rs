//! Galaxy map: hex storage with an O(1) coordinate index

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{GameId, PlanetId, PlayerId, StationId, UnitId};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::terrain::Terrain;

/// One zone-of-control claim on a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZocEntry {
    pub player_id: PlayerId,
    pub unit_id: UnitId,
}

/// A single hex on the galaxy map
///
/// Unit, planet and station are non-owning references by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hex {
    pub game_id: GameId,
    pub coords: HexCoords,
    #[serde(default)]
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    #[serde(default)]
    pub planet_id: Option<PlanetId>,
    #[serde(default)]
    pub station_id: Option<StationId>,
    #[serde(default)]
    pub terrain: Terrain,
    /// Recomputed every tick from live unit positions
    #[serde(default)]
    pub zoc: Vec<ZocEntry>,
}

impl Hex {
    pub fn new(game_id: GameId, coords: HexCoords, terrain: Terrain) -> Self {
        Self {
            game_id,
            coords,
            owner: None,
            unit_id: None,
            planet_id: None,
            station_id: None,
            terrain,
            zoc: Vec::new(),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.unit_id.is_some()
    }
}

/// Read-only view of the grid used by pathfinding and supply
pub trait HexGrid {
    /// Terrain at `coords`, `None` if the hex is off the map
    fn terrain_at(&self, coords: HexCoords) -> Option<Terrain>;

    fn owner_at(&self, coords: HexCoords) -> Option<PlayerId>;

    fn contains(&self, coords: HexCoords) -> bool {
        self.terrain_at(coords).is_some()
    }
}

/// Hex storage in insertion order plus a coordinate index
#[derive(Debug, Clone, Default)]
pub struct GalaxyMap {
    hexes: Vec<Hex>,
    index: AHashMap<HexCoords, usize>,
}

impl GalaxyMap {
    pub fn new(hexes: Vec<Hex>) -> Self {
        let index = hexes
            .iter()
            .enumerate()
            .map(|(i, hex)| (hex.coords, i))
            .collect();
        Self { hexes, index }
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn get_hex(&self, coords: HexCoords) -> Option<&Hex> {
        self.index.get(&coords).map(|&i| &self.hexes[i])
    }

    pub fn get_hex_mut(&mut self, coords: HexCoords) -> Option<&mut Hex> {
        match self.index.get(&coords) {
            Some(&i) => Some(&mut self.hexes[i]),
            None => None,
        }
    }

    /// Lookup that must succeed; a miss means corrupted state
    pub fn hex(&self, coords: HexCoords) -> &Hex {
        self.get_hex(coords)
            .unwrap_or_else(|| panic!("hex {} missing from map", coords))
    }

    pub fn hex_mut(&mut self, coords: HexCoords) -> &mut Hex {
        self.get_hex_mut(coords)
            .unwrap_or_else(|| panic!("hex {} missing from map", coords))
    }

    pub fn set_terrain(&mut self, coords: HexCoords, terrain: Terrain) {
        if let Some(hex) = self.get_hex_mut(coords) {
            hex.terrain = terrain;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hex> {
        self.hexes.iter_mut()
    }

    pub fn into_hexes(self) -> Vec<Hex> {
        self.hexes
    }
}

impl HexGrid for GalaxyMap {
    fn terrain_at(&self, coords: HexCoords) -> Option<Terrain> {
        self.get_hex(coords).map(|h| h.terrain)
    }

    fn owner_at(&self, coords: HexCoords) -> Option<PlayerId> {
        self.get_hex(coords).and_then(|h| h.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc_map(radius: u32) -> GalaxyMap {
        GalaxyMap::new(
            HexCoords::ORIGIN
                .range(radius)
                .into_iter()
                .map(|c| Hex::new(GameId(1), c, Terrain::Empty))
                .collect(),
        )
    }

    #[test]
    fn test_index_lookup() {
        let map = disc_map(2);
        assert_eq!(map.len(), 19);
        let coords = HexCoords::from_axial(1, -2);
        assert_eq!(map.get_hex(coords).map(|h| h.coords), Some(coords));
        assert!(map.get_hex(HexCoords::from_axial(5, 0)).is_none());
    }

    #[test]
    fn test_set_terrain() {
        let mut map = disc_map(1);
        let coords = HexCoords::from_axial(0, 1);
        map.set_terrain(coords, Terrain::Nebula);
        assert_eq!(map.terrain_at(coords), Some(Terrain::Nebula));
    }

    #[test]
    #[should_panic(expected = "missing from map")]
    fn test_missing_hex_panics() {
        let map = disc_map(1);
        map.hex(HexCoords::from_axial(9, 9));
    }

    #[test]
    fn test_into_hexes_preserves_order() {
        let map = disc_map(1);
        let before: Vec<HexCoords> = map.iter().map(|h| h.coords).collect();
        let after: Vec<HexCoords> = map.into_hexes().into_iter().map(|h| h.coords).collect();
        assert_eq!(before, after);
    }
}
