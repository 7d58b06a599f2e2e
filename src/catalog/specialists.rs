//! Specialist catalog - bonuses carried by individual steps

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::SpecialistId;

/// Static bonuses of one specialist type
///
/// Bonuses only count while the carrying step is not suppressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistStats {
    pub id: SpecialistId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attack_bonus: f32,
    #[serde(default)]
    pub defense_bonus: f32,
    #[serde(default)]
    pub armour: i32,
    /// Combat shift in its side's favour
    #[serde(default)]
    pub artillery: i32,
    /// Cancels up to this much fortification when attacking
    #[serde(default)]
    pub siege: i32,
    /// Hard-counters attacker armour when defending
    #[serde(default)]
    pub torpedo: bool,
}

impl SpecialistStats {
    pub fn new(id: impl Into<SpecialistId>) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            attack_bonus: 0.0,
            defense_bonus: 0.0,
            armour: 0,
            artillery: 0,
            siege: 0,
            torpedo: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpecialistCatalog {
    specialists: Vec<SpecialistStats>,
    index: AHashMap<SpecialistId, usize>,
}

impl SpecialistCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(SpecialistStats {
            attack_bonus: 2.0,
            ..SpecialistStats::new("gunnery")
        });
        catalog.add(SpecialistStats {
            defense_bonus: 2.0,
            ..SpecialistStats::new("shield")
        });
        catalog.add(SpecialistStats {
            armour: 1,
            ..SpecialistStats::new("armour_plating")
        });
        catalog.add(SpecialistStats {
            attack_bonus: 1.0,
            artillery: 1,
            ..SpecialistStats::new("artillery")
        });
        catalog.add(SpecialistStats {
            siege: 2,
            ..SpecialistStats::new("siege")
        });
        catalog.add(SpecialistStats {
            attack_bonus: 1.0,
            torpedo: true,
            ..SpecialistStats::new("torpedo")
        });

        catalog
    }

    /// Add or replace a specialist type
    pub fn add(&mut self, stats: SpecialistStats) {
        if let Some(&i) = self.index.get(&stats.id) {
            self.specialists[i] = stats;
        } else {
            self.index.insert(stats.id.clone(), self.specialists.len());
            self.specialists.push(stats);
        }
    }

    pub fn try_get(&self, id: &SpecialistId) -> Option<&SpecialistStats> {
        self.index.get(id).map(|&i| &self.specialists[i])
    }

    /// Lookup that must succeed; unknown ids mean corrupted input
    pub fn get(&self, id: &SpecialistId) -> &SpecialistStats {
        self.try_get(id)
            .unwrap_or_else(|| panic!("unknown specialist id '{}'", id))
    }

    pub fn contains(&self, id: &SpecialistId) -> bool {
        self.index.contains_key(id)
    }

    pub fn all(&self) -> &[SpecialistStats] {
        &self.specialists
    }
}
