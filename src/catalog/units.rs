//! Unit catalog - static stats per hull type
//!
//! Instances only carry a `CatalogId`; every stat is looked up here.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::CatalogId;

/// Hull class, which also fixes combat initiative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    Fighter,
    Corvette,
    Frigate,
    Destroyer,
    Cruiser,
    Battleship,
    Carrier,
    Dreadnought,
}

impl UnitClass {
    /// Lower values attack first when several units strike one hex
    pub fn initiative(&self) -> u8 {
        match self {
            UnitClass::Fighter => 0,
            UnitClass::Corvette => 1,
            UnitClass::Frigate => 2,
            UnitClass::Destroyer => 3,
            UnitClass::Cruiser => 4,
            UnitClass::Battleship => 5,
            UnitClass::Carrier => 6,
            UnitClass::Dreadnought => 7,
        }
    }
}

fn default_exerts_zoc() -> bool {
    true
}

/// Static stats of one unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub id: CatalogId,
    #[serde(default)]
    pub name: String,
    pub class: UnitClass,
    /// Attack per active step
    pub attack: f32,
    /// Defense per active step
    pub defense: f32,
    #[serde(default)]
    pub armour: i32,
    pub max_ap: u32,
    pub max_mp: u32,
    /// Steps a freshly deployed unit starts with
    pub steps: usize,
    #[serde(default = "default_exerts_zoc")]
    pub exerts_zoc: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: Vec<UnitStats>,
    index: AHashMap<CatalogId, usize>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in fleet
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        let mut add = |id: &str, class, attack, defense, armour, max_ap, max_mp, steps, exerts_zoc| {
            catalog.add(UnitStats {
                id: CatalogId::from(id),
                name: id.to_string(),
                class,
                attack,
                defense,
                armour,
                max_ap,
                max_mp,
                steps,
                exerts_zoc,
            });
        };

        add("fighter", UnitClass::Fighter, 1.0, 1.0, 0, 1, 6, 3, false);
        add("corvette", UnitClass::Corvette, 1.5, 1.0, 0, 1, 5, 4, true);
        add("frigate", UnitClass::Frigate, 2.0, 2.0, 0, 2, 4, 5, true);
        add("destroyer", UnitClass::Destroyer, 3.0, 2.0, 1, 2, 4, 5, true);
        add("cruiser", UnitClass::Cruiser, 6.0, 4.0, 0, 2, 3, 5, true);
        add("battleship", UnitClass::Battleship, 6.0, 6.0, 2, 2, 2, 6, true);
        add("carrier", UnitClass::Carrier, 2.0, 4.0, 1, 2, 3, 6, true);
        add("dreadnought", UnitClass::Dreadnought, 8.0, 8.0, 3, 3, 2, 8, true);

        catalog
    }

    /// Add or replace a unit type
    pub fn add(&mut self, stats: UnitStats) {
        if let Some(&i) = self.index.get(&stats.id) {
            self.units[i] = stats;
        } else {
            self.index.insert(stats.id.clone(), self.units.len());
            self.units.push(stats);
        }
    }

    pub fn try_get(&self, id: &CatalogId) -> Option<&UnitStats> {
        self.index.get(id).map(|&i| &self.units[i])
    }

    /// Lookup that must succeed; unknown ids mean corrupted input
    pub fn get(&self, id: &CatalogId) -> &UnitStats {
        self.try_get(id)
            .unwrap_or_else(|| panic!("unknown unit catalog id '{}'", id))
    }

    pub fn contains(&self, id: &CatalogId) -> bool {
        self.index.contains_key(id)
    }

    pub fn all(&self) -> &[UnitStats] {
        &self.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frigate() {
        let catalog = UnitCatalog::with_defaults();
        let frigate = catalog.get(&CatalogId::from("frigate"));
        assert_eq!(frigate.attack, 2.0);
        assert_eq!(frigate.defense, 2.0);
        assert_eq!(frigate.steps, 5);
    }

    #[test]
    fn test_initiative_order() {
        assert!(UnitClass::Fighter.initiative() < UnitClass::Frigate.initiative());
        assert!(UnitClass::Cruiser.initiative() < UnitClass::Dreadnought.initiative());
    }

    #[test]
    fn test_fighters_do_not_exert_zoc() {
        let catalog = UnitCatalog::with_defaults();
        assert!(!catalog.get(&CatalogId::from("fighter")).exerts_zoc);
    }

    #[test]
    #[should_panic(expected = "unknown unit catalog id")]
    fn test_unknown_id_panics() {
        UnitCatalog::with_defaults().get(&CatalogId::from("mothership"));
    }

    #[test]
    fn test_add_replaces_existing() {
        let mut catalog = UnitCatalog::with_defaults();
        let count = catalog.all().len();
        let mut frigate = catalog.get(&CatalogId::from("frigate")).clone();
        frigate.attack = 9.0;
        catalog.add(frigate);
        assert_eq!(catalog.all().len(), count);
        assert_eq!(catalog.get(&CatalogId::from("frigate")).attack, 9.0);
    }
}
