//! Engine configuration with documented constants
//!
//! Every tunable the tick reads is collected here. Per-game parameters
//! (cycle length, victory threshold, start time) live on `Game` instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Configuration for the tick engine
///
/// Injected by reference into every tick. There is no global instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === SUPPLY ===
    /// Movement budget a root source (capital) projects supply with
    pub root_supply_range: u32,

    /// Movement budget an activated relay (colony, station) projects supply with
    ///
    /// Must not exceed the root range, otherwise relays would out-reach
    /// the capital feeding them.
    pub relay_supply_range: u32,

    // === UNIT LIFECYCLE ===
    /// Suppressed steps an in-supply unit recovers at a cycle boundary
    pub recovery_steps_per_cycle: usize,

    /// Steps suppressed per tick on a hazardous hex (radiation storm)
    pub hazard_suppression: usize,

    /// Steps suppressed on every unit involved in a movement crash
    pub crash_suppression: usize,

    // === COMBAT SHIFTS ===
    /// Shift gained when the defender is REGROUPING
    pub disorganized_shift: i32,

    /// Shift applied when the defended hex hosts a planet (negative favours the defender)
    pub planet_defense_shift: i32,

    /// Largest shift armour superiority can contribute
    pub armour_cap: i32,

    /// Penalty an armoured attacker pays when attacking into fortified terrain
    pub armour_fortification_penalty: i32,

    // === ECONOMY ===
    /// Prestige per cycle from each owned capital
    pub capital_income: i64,

    /// Prestige per cycle from a colony, before the distance penalty
    pub colony_income: i64,

    /// Prestige lost per hex of distance between a colony and the nearest owned capital
    pub colony_distance_penalty: i64,

    /// Victory points per owned planet per cycle
    pub victory_points_per_planet: i64,

    /// Renown granted to each ACTIVE player per cycle
    pub renown_per_cycle: i64,

    // === PLAYER LIFECYCLE ===
    /// Real time (ms) an ACTIVE player may go unseen before being marked AFK
    pub afk_threshold_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root_supply_range: 6,
            relay_supply_range: 3,

            recovery_steps_per_cycle: 2,
            hazard_suppression: 1,
            crash_suppression: 1,

            disorganized_shift: 1,
            planet_defense_shift: -1,
            armour_cap: 2,
            armour_fortification_penalty: -1,

            capital_income: 50,
            colony_income: 20,
            colony_distance_penalty: 2,
            victory_points_per_planet: 1,
            renown_per_cycle: 1,

            // Three days
            afk_threshold_ms: 3 * 24 * 60 * 60 * 1000,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.root_supply_range == 0 {
            return Err(EngineError::InvalidConfig(
                "root_supply_range must be positive".into(),
            ));
        }

        if self.relay_supply_range > self.root_supply_range {
            return Err(EngineError::InvalidConfig(format!(
                "relay_supply_range ({}) should be <= root_supply_range ({})",
                self.relay_supply_range, self.root_supply_range
            )));
        }

        if self.armour_cap < 0 {
            return Err(EngineError::InvalidConfig(
                "armour_cap must not be negative".into(),
            ));
        }

        if self.capital_income < 0 || self.colony_income < 0 || self.colony_distance_penalty < 0 {
            return Err(EngineError::InvalidConfig(
                "income rates must not be negative".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("root_supply_range = 8\n").unwrap();
        assert_eq!(config.root_supply_range, 8);
        assert_eq!(config.relay_supply_range, EngineConfig::default().relay_supply_range);
    }

    #[test]
    fn test_relay_longer_than_root_rejected() {
        let result = EngineConfig::from_toml_str("root_supply_range = 2\nrelay_supply_range = 5\n");
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = EngineConfig::from_toml_str("root_supply_range = \"far\"");
        assert!(matches!(result, Err(EngineError::TomlError(_))));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = EngineConfig::from_toml_str(include_str!("../../data/engine.toml")).unwrap();
        assert_eq!(shipped, EngineConfig::default());
    }
}
