//! TOML loading for the unit and specialist catalogs

use std::path::Path;

use ahash::AHashSet;
use serde::Deserialize;

use crate::catalog::specialists::{SpecialistCatalog, SpecialistStats};
use crate::catalog::units::{UnitCatalog, UnitStats};
use crate::catalog::Catalog;
use crate::core::error::{EngineError, Result};

/// On-disk layout: `[[units]]` and `[[specialists]]` arrays
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    units: Vec<UnitStats>,
    #[serde(default)]
    specialists: Vec<SpecialistStats>,
}

/// Parse a catalog from TOML
pub fn parse_toml(content: &str) -> Result<Catalog> {
    let data: TomlCatalog = toml::from_str(content)?;

    let mut seen = AHashSet::new();
    let mut units = UnitCatalog::new();
    for stats in data.units {
        if !seen.insert(stats.id.to_string()) {
            return Err(invalid(&stats.id.to_string(), "duplicate unit id"));
        }
        if stats.steps == 0 {
            return Err(invalid(&stats.id.to_string(), "unit must have at least one step"));
        }
        if stats.attack < 0.0 || stats.defense < 0.0 {
            return Err(invalid(&stats.id.to_string(), "attack and defense must not be negative"));
        }
        units.add(stats);
    }

    let mut seen = AHashSet::new();
    let mut specialists = SpecialistCatalog::new();
    for stats in data.specialists {
        if !seen.insert(stats.id.to_string()) {
            return Err(invalid(&stats.id.to_string(), "duplicate specialist id"));
        }
        specialists.add(stats);
    }

    Ok(Catalog { units, specialists })
}

/// Load a catalog from a TOML file
pub fn load_from_toml(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

fn invalid(id: &str, reason: &str) -> EngineError {
    EngineError::InvalidCatalog {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}
