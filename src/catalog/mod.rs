//! Static unit and specialist tables, injected read-only into every tick

pub mod loader;
pub mod specialists;
pub mod units;

use std::path::Path;

pub use specialists::{SpecialistCatalog, SpecialistStats};
pub use units::{UnitCatalog, UnitClass, UnitStats};

use crate::core::error::Result;

/// Both stat tables
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub units: UnitCatalog,
    pub specialists: SpecialistCatalog,
}

impl Catalog {
    pub fn with_defaults() -> Self {
        Self {
            units: UnitCatalog::with_defaults(),
            specialists: SpecialistCatalog::with_defaults(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        loader::parse_toml(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        loader::load_from_toml(path)
    }
}
