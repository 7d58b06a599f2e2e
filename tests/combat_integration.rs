//! Combat calculator integration tests
//!
//! Shift interplay between catalog stats, specialists and terrain,
//! checked through the public `calculate` entry point.

use starfront::catalog::Catalog;
use starfront::combat::{calculate, lookup, CombatResultType, CombatShiftType};
use starfront::core::config::EngineConfig;
use starfront::core::types::{GameId, PlanetId, PlayerId, UnitId};
use starfront::galaxy::hex::HexCoords;
use starfront::galaxy::map::Hex;
use starfront::galaxy::terrain::Terrain;
use starfront::galaxy::unit::{CombatOperation, Step, Unit};

fn unit(id: u64, catalog_id: &str, plain: usize, specialists: &[&str]) -> Unit {
    let mut unit = Unit::new(
        UnitId(id),
        GameId(1),
        PlayerId(id),
        catalog_id,
        HexCoords::ORIGIN,
    );
    unit.steps.extend((0..plain).map(|_| Step::plain()));
    unit.steps
        .extend(specialists.iter().map(|&s| Step::specialist(s)));
    unit
}

fn hex(terrain: Terrain) -> Hex {
    Hex::new(GameId(1), HexCoords::ORIGIN, terrain)
}

fn predict(attacker: &Unit, defender: &Unit, hex: &Hex) -> starfront::combat::CombatPrediction {
    calculate(
        attacker,
        defender,
        hex,
        CombatOperation::Standard,
        &Catalog::with_defaults(),
        &EngineConfig::default(),
    )
}

#[test]
fn test_armour_superiority_adds_shift() {
    let battleship = unit(1, "battleship", 6, &[]);
    let frigate = unit(2, "frigate", 5, &[]);

    let prediction = predict(&battleship, &frigate, &hex(Terrain::Empty));

    assert_eq!(prediction.attack_power, 36);
    assert_eq!(prediction.odds_score, 3);
    assert_eq!(prediction.shift(CombatShiftType::Armour), Some(2));
    assert_eq!(prediction.final_score, 5);
    assert_eq!(lookup(prediction.final_score).result_type, CombatResultType::Shattered);
}

#[test]
fn test_armour_shift_is_capped() {
    let dreadnought = unit(1, "dreadnought", 7, &["armour_plating"]);
    let frigate = unit(2, "frigate", 5, &[]);

    let prediction = predict(&dreadnought, &frigate, &hex(Terrain::Empty));

    assert_eq!(prediction.shift(CombatShiftType::Armour), Some(2));
}

#[test]
fn test_torpedo_counters_armour() {
    let battleship = unit(1, "battleship", 6, &[]);
    let frigate = unit(2, "frigate", 4, &["torpedo"]);

    let prediction = predict(&battleship, &frigate, &hex(Terrain::Empty));

    assert_eq!(prediction.defense_power, 10);
    assert_eq!(prediction.shift(CombatShiftType::Armour), None);
    assert_eq!(prediction.shift(CombatShiftType::TorpedoCounter), Some(-2));
    assert_eq!(prediction.final_score, 1);
}

#[test]
fn test_suppressed_torpedo_does_not_count() {
    let battleship = unit(1, "battleship", 6, &[]);
    let mut frigate = unit(2, "frigate", 4, &["torpedo"]);
    frigate.steps.back_mut().unwrap().is_suppressed = true;

    let prediction = predict(&battleship, &frigate, &hex(Terrain::Empty));

    assert_eq!(prediction.defense_power, 8);
    assert_eq!(prediction.shift(CombatShiftType::TorpedoCounter), None);
    assert_eq!(prediction.shift(CombatShiftType::Armour), Some(2));
}

#[test]
fn test_siege_only_cancels_fortification() {
    let sappers = unit(1, "frigate", 4, &["siege"]);
    let frigate = unit(2, "frigate", 5, &[]);

    let open = predict(&sappers, &frigate, &hex(Terrain::Empty));
    assert_eq!(open.shift(CombatShiftType::Siege), None);
    assert_eq!(open.final_score, 0);

    let well = predict(&sappers, &frigate, &hex(Terrain::GravityWell));
    assert_eq!(well.shift(CombatShiftType::Terrain), Some(-2));
    assert_eq!(well.shift(CombatShiftType::Siege), Some(2));
    assert_eq!(well.final_score, 0);
}

#[test]
fn test_armoured_attacker_pays_in_fortified_terrain() {
    let destroyer = unit(1, "destroyer", 5, &[]);
    let frigate = unit(2, "frigate", 5, &[]);

    let prediction = predict(&destroyer, &frigate, &hex(Terrain::Nebula));

    // 15 vs 10 is 3:2
    assert_eq!(prediction.odds_score, 1);
    assert_eq!(prediction.shift(CombatShiftType::Terrain), Some(-1));
    assert_eq!(prediction.shift(CombatShiftType::Armour), Some(1));
    assert_eq!(prediction.shift(CombatShiftType::ArmourInFortification), Some(-1));
    assert_eq!(prediction.final_score, 0);
}

#[test]
fn test_artillery_on_both_sides_cancels() {
    let attacker = unit(1, "frigate", 4, &["artillery"]);
    let defender = unit(2, "frigate", 4, &["artillery"]);

    let prediction = predict(&attacker, &defender, &hex(Terrain::Empty));

    assert_eq!(prediction.attack_power, 11);
    assert_eq!(prediction.shift(CombatShiftType::Artillery), Some(1));
    assert_eq!(prediction.shift(CombatShiftType::DefenderArtillery), Some(-1));
    assert_eq!(prediction.total_shift(), 0);
}

#[test]
fn test_planet_favours_defender() {
    let attacker = unit(1, "frigate", 5, &[]);
    let defender = unit(2, "frigate", 5, &[]);
    let mut planet_hex = hex(Terrain::Empty);
    planet_hex.planet_id = Some(PlanetId(1));

    let prediction = predict(&attacker, &defender, &planet_hex);

    assert_eq!(prediction.shift(CombatShiftType::PlanetDefense), Some(-1));
    assert_eq!(prediction.final_score, -1);
}

#[test]
fn test_hopeless_attack_misses() {
    let fighter = unit(1, "fighter", 3, &[]);
    let dreadnought = unit(2, "dreadnought", 8, &[]);

    let prediction = predict(&fighter, &dreadnought, &hex(Terrain::Empty));

    assert_eq!(prediction.odds_score, -3);
    assert_eq!(prediction.odds, "1:3");
    assert_eq!(lookup(prediction.final_score).result_type, CombatResultType::Miss);
}

#[test]
fn test_operations_override_the_table() {
    let attacker = unit(1, "dreadnought", 8, &[]);
    let defender = unit(2, "fighter", 3, &[]);
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();

    let suppressive = calculate(
        &attacker,
        &defender,
        &hex(Terrain::Empty),
        CombatOperation::SuppressiveFire,
        &catalog,
        &config,
    );
    let forced = suppressive.forced_result.expect("suppressive fire is forced");
    assert_eq!(forced.defender_suppress, 2);
    assert_eq!(forced.attacker_suppress, 0);
    assert!(!forced.retreat);
}
