//! Combat prediction: power, odds bracket and shifts
//!
//! Pure. Nothing here mutates a unit; the engine applies the outcome.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::config::EngineConfig;
use crate::galaxy::map::Hex;
use crate::galaxy::unit::{CombatOperation, Unit, UnitStatus};
use crate::combat::results::{forced_result, CombatResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatShiftType {
    Disorganized,
    PlanetDefense,
    Terrain,
    Siege,
    Artillery,
    DefenderArtillery,
    Armour,
    TorpedoCounter,
    ArmourInFortification,
}

/// One additive modifier to the net score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatShift {
    pub kind: CombatShiftType,
    pub value: i32,
}

/// Everything known about an engagement before it is applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatPrediction {
    pub attack_power: i32,
    pub defense_power: i32,
    pub odds_score: i32,
    pub odds: String,
    pub shifts: Vec<CombatShift>,
    pub final_score: i32,
    /// Set for operations that bypass the results table
    pub forced_result: Option<CombatResult>,
}

impl CombatPrediction {
    pub fn total_shift(&self) -> i32 {
        self.shifts.iter().map(|s| s.value).sum()
    }

    pub fn shift(&self, kind: CombatShiftType) -> Option<i32> {
        self.shifts.iter().find(|s| s.kind == kind).map(|s| s.value)
    }
}

/// Aggregated combat profile of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideProfile {
    pub power: i32,
    pub armour: i32,
    pub artillery: i32,
    pub siege: i32,
    pub has_torpedo: bool,
}

/// Profile from catalog stats and active steps only
pub fn side_profile(unit: &Unit, catalog: &Catalog, attacking: bool) -> SideProfile {
    let stats = catalog.units.get(&unit.catalog_id);
    let base = if attacking { stats.attack } else { stats.defense };

    let mut bonus = 0.0f32;
    let mut profile = SideProfile {
        armour: stats.armour,
        ..SideProfile::default()
    };
    for id in unit.active_specialists() {
        let specialist = catalog.specialists.get(id);
        bonus += if attacking {
            specialist.attack_bonus
        } else {
            specialist.defense_bonus
        };
        profile.armour += specialist.armour;
        profile.artillery += specialist.artillery;
        profile.siege += specialist.siege;
        profile.has_torpedo |= specialist.torpedo;
    }

    profile.power = (base * unit.active_steps() as f32 + bonus).round() as i32;
    profile
}

fn bracket(ratio: f64) -> i32 {
    if ratio >= 3.0 {
        3
    } else if ratio >= 2.0 {
        2
    } else if ratio >= 1.5 {
        1
    } else {
        0
    }
}

/// Odds bracket in `[-3, 3]`; below 1:1 the inverse ratio is mirrored
pub fn odds_score(attack_power: i32, defense_power: i32) -> i32 {
    let defense = defense_power.max(1) as f64;
    let attack = attack_power as f64;
    let ratio = attack / defense;

    if ratio >= 1.0 {
        bracket(ratio)
    } else if attack <= 0.0 {
        -3
    } else {
        -bracket(defense / attack)
    }
}

/// Display form of an odds score
pub fn odds_label(score: i32) -> &'static str {
    match score {
        3 => "3:1",
        2 => "2:1",
        1 => "3:2",
        0 => "1:1",
        -1 => "2:3",
        -2 => "1:2",
        _ => "1:3",
    }
}

/// Predict the outcome of `attacker` striking `defender` on `hex`
pub fn calculate(
    attacker: &Unit,
    defender: &Unit,
    hex: &Hex,
    operation: CombatOperation,
    catalog: &Catalog,
    config: &EngineConfig,
) -> CombatPrediction {
    let att = side_profile(attacker, catalog, true);
    let def = side_profile(defender, catalog, false);

    let odds = odds_score(att.power, def.power);
    let terrain_shift = hex.terrain.combat_shift();

    let mut shifts = Vec::new();
    let mut push = |kind, value: i32| {
        if value != 0 {
            shifts.push(CombatShift { kind, value });
        }
    };

    if defender.status() == UnitStatus::Regrouping {
        push(CombatShiftType::Disorganized, config.disorganized_shift);
    }
    if hex.planet_id.is_some() {
        push(CombatShiftType::PlanetDefense, config.planet_defense_shift);
    }
    push(CombatShiftType::Terrain, terrain_shift);

    // Siege only cancels fortification
    if terrain_shift < 0 {
        push(CombatShiftType::Siege, att.siege.min(-terrain_shift));
    }

    push(CombatShiftType::Artillery, att.artillery);
    push(CombatShiftType::DefenderArtillery, -def.artillery);

    if def.has_torpedo && att.armour > 0 {
        push(CombatShiftType::TorpedoCounter, -att.armour);
    } else if att.armour > def.armour {
        push(CombatShiftType::Armour, (att.armour - def.armour).min(config.armour_cap));
    }
    if att.armour > 0 && terrain_shift < 0 {
        push(CombatShiftType::ArmourInFortification, config.armour_fortification_penalty);
    }

    let total: i32 = shifts.iter().map(|s| s.value).sum();
    CombatPrediction {
        attack_power: att.power,
        defense_power: def.power,
        odds_score: odds,
        odds: odds_label(odds).to_string(),
        shifts,
        final_score: odds + total,
        forced_result: forced_result(operation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GameId, PlanetId, PlayerId, UnitId};
    use crate::galaxy::hex::HexCoords;
    use crate::galaxy::terrain::Terrain;
    use crate::galaxy::unit::Step;

    fn unit(id: u64, player: u64, catalog_id: &str, steps: Vec<Step>) -> Unit {
        let mut unit = Unit::new(UnitId(id), GameId(1), PlayerId(player), catalog_id, HexCoords::ORIGIN);
        unit.steps.extend(steps);
        unit
    }

    fn plain(n: usize) -> Vec<Step> {
        vec![Step::plain(); n]
    }

    fn open_hex() -> Hex {
        Hex::new(GameId(1), HexCoords::ORIGIN, Terrain::Empty)
    }

    #[test]
    fn test_odds_brackets() {
        assert_eq!(odds_score(10, 10), 0);
        assert_eq!(odds_score(30, 10), 3);
        assert_eq!(odds_score(100, 10), 3);
        assert_eq!(odds_score(20, 10), 2);
        assert_eq!(odds_score(15, 10), 1);
        assert_eq!(odds_score(5, 10), -2);
        assert_eq!(odds_score(1, 10), -3);
        assert_eq!(odds_score(0, 10), -3);
        assert_eq!(odds_score(8, 10), 0);
    }

    #[test]
    fn test_zero_defense_treated_as_one() {
        assert_eq!(odds_score(3, 0), 3);
        assert_eq!(odds_score(1, 0), 0);
    }

    #[test]
    fn test_odds_labels() {
        assert_eq!(odds_label(1), "3:2");
        assert_eq!(odds_label(-2), "1:2");
    }

    #[test]
    fn test_power_counts_active_steps_and_specialists() {
        let catalog = Catalog::with_defaults();
        let mut frigate = unit(1, 1, "frigate", plain(4));
        frigate.steps.push_back(Step::specialist("gunnery"));
        assert_eq!(side_profile(&frigate, &catalog, true).power, 12);

        frigate.steps[4].is_suppressed = true;
        assert_eq!(side_profile(&frigate, &catalog, true).power, 8);
    }

    #[test]
    fn test_even_frigates() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let a = unit(1, 1, "frigate", plain(5));
        let d = unit(2, 2, "frigate", plain(5));
        let prediction = calculate(&a, &d, &open_hex(), CombatOperation::Standard, &catalog, &config);

        assert_eq!(prediction.attack_power, 10);
        assert_eq!(prediction.defense_power, 10);
        assert_eq!(prediction.final_score, 0);
        assert!(prediction.shifts.is_empty());
        assert_eq!(prediction.odds, "1:1");
    }

    #[test]
    fn test_armour_shift_and_torpedo_counter() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let attacker = unit(1, 1, "battleship", plain(6));
        let mut defender = unit(2, 2, "frigate", plain(5));

        let prediction = calculate(&attacker, &defender, &open_hex(), CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Armour), Some(2));
        assert_eq!(prediction.shift(CombatShiftType::TorpedoCounter), None);

        defender.steps.push_back(Step::specialist("torpedo"));
        let prediction = calculate(&attacker, &defender, &open_hex(), CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Armour), None);
        assert_eq!(prediction.shift(CombatShiftType::TorpedoCounter), Some(-2));

        // A suppressed torpedo does not count
        defender.steps.back_mut().unwrap().is_suppressed = true;
        let prediction = calculate(&attacker, &defender, &open_hex(), CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Armour), Some(2));
    }

    #[test]
    fn test_armour_capped() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let attacker = unit(1, 1, "dreadnought", plain(8));
        let defender = unit(2, 2, "frigate", plain(5));
        let prediction = calculate(&attacker, &defender, &open_hex(), CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Armour), Some(config.armour_cap));
    }

    #[test]
    fn test_siege_only_cancels_fortification() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let mut attacker = unit(1, 1, "frigate", plain(4));
        attacker.steps.push_back(Step::specialist("siege"));
        let defender = unit(2, 2, "frigate", plain(5));

        let prediction = calculate(&attacker, &defender, &open_hex(), CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Siege), None);

        let mut asteroids = open_hex();
        asteroids.terrain = Terrain::AsteroidField;
        let prediction = calculate(&attacker, &defender, &asteroids, CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Terrain), Some(-1));
        assert_eq!(prediction.shift(CombatShiftType::Siege), Some(1));
        assert_eq!(prediction.total_shift(), 0);
    }

    #[test]
    fn test_defender_side_shifts() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let attacker = unit(1, 1, "frigate", plain(5));
        let mut defender = unit(2, 2, "frigate", plain(4));
        defender.steps.push_back(Step::specialist("artillery"));
        defender.set_status(UnitStatus::Regrouping);
        let mut hex = open_hex();
        hex.planet_id = Some(PlanetId(1));

        let prediction = calculate(&attacker, &defender, &hex, CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::Disorganized), Some(1));
        assert_eq!(prediction.shift(CombatShiftType::PlanetDefense), Some(-1));
        assert_eq!(prediction.shift(CombatShiftType::DefenderArtillery), Some(-1));
    }

    #[test]
    fn test_armoured_attacker_pays_in_fortification() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let attacker = unit(1, 1, "destroyer", plain(5));
        let defender = unit(2, 2, "frigate", plain(5));
        let mut well = open_hex();
        well.terrain = Terrain::GravityWell;

        let prediction = calculate(&attacker, &defender, &well, CombatOperation::Standard, &catalog, &config);
        assert_eq!(prediction.shift(CombatShiftType::ArmourInFortification), Some(-1));
        assert_eq!(prediction.shift(CombatShiftType::Armour), Some(1));
        assert_eq!(prediction.shift(CombatShiftType::Terrain), Some(-2));
    }

    #[test]
    fn test_feint_is_forced() {
        let catalog = Catalog::with_defaults();
        let config = EngineConfig::default();
        let a = unit(1, 1, "frigate", plain(5));
        let d = unit(2, 2, "frigate", plain(5));
        let prediction = calculate(&a, &d, &open_hex(), CombatOperation::Feint, &catalog, &config);
        assert!(prediction.forced_result.is_some());
    }
}
