//! Zone-of-control index
//!
//! Every live unit whose hull exerts ZOC controls its six neighbours.
//! Control is a set: several players may control the same hex.

use ahash::AHashMap;

use crate::catalog::UnitCatalog;
use crate::core::types::PlayerId;
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::{GalaxyMap, ZocEntry};
use crate::galaxy::unit::Unit;

#[derive(Debug, Clone, Default)]
pub struct ZocIndex {
    controls: AHashMap<HexCoords, Vec<ZocEntry>>,
}

impl ZocIndex {
    /// Derive control from unit positions; entries keep unit order
    pub fn build<'a>(units: impl IntoIterator<Item = &'a Unit>, catalog: &UnitCatalog) -> Self {
        let mut controls: AHashMap<HexCoords, Vec<ZocEntry>> = AHashMap::new();

        for unit in units {
            if unit.active_steps() == 0 || !catalog.get(&unit.catalog_id).exerts_zoc {
                continue;
            }
            let entry = ZocEntry {
                player_id: unit.player_id,
                unit_id: unit.id,
            };
            for neighbor in unit.location.neighbors() {
                controls.entry(neighbor).or_default().push(entry);
            }
        }

        Self { controls }
    }

    pub fn entries_at(&self, coords: HexCoords) -> &[ZocEntry] {
        self.controls.get(&coords).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Controlled by anyone other than `player`
    pub fn is_enemy_zoc(&self, coords: HexCoords, player: PlayerId) -> bool {
        self.entries_at(coords).iter().any(|e| e.player_id != player)
    }

    pub fn is_controlled_by(&self, coords: HexCoords, player: PlayerId) -> bool {
        self.entries_at(coords).iter().any(|e| e.player_id == player)
    }

    /// Overwrite every hex's `zoc` list with this index
    pub fn write_to(&self, map: &mut GalaxyMap) {
        for hex in map.iter_mut() {
            hex.zoc = self.entries_at(hex.coords).to_vec();
        }
    }
}
