//! Combat engine: apply an outcome to both units
//!
//! Resolution order:
//! 1. Predict (power, odds, shifts)
//! 2. Forced result or table lookup
//! 3. Attacker losses, then defender losses
//! 4. Retreat to the cheapest free neighbour, or shatter in place
//! 5. Decide whether the attacker blitzes into the vacated hex
//! 6. Survivors regroup
//!
//! Relocation itself is left to the caller, which owns hex occupancy.

use crate::catalog::Catalog;
use crate::combat::calculator::calculate;
use crate::combat::report::{CombatReport, StepLosses};
use crate::combat::results::{lookup, SHATTER_SUPPRESSION};
use crate::core::config::EngineConfig;
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::GalaxyMap;
use crate::galaxy::unit::{CombatOperation, Unit, UnitStatus};
use crate::lifecycle::steps::{kill_steps, suppress_steps};

/// What the caller must still do after an engagement
#[derive(Debug, Clone)]
pub struct CombatResolution {
    pub report: CombatReport,
    /// Defender must be moved here
    pub retreat_to: Option<HexCoords>,
    /// Attacker must be moved into the defender's former hex and capture it
    pub attacker_advances: bool,
}

/// Cheapest passable, empty neighbour that is not the attacker's hex
///
/// Ties go to the first neighbour in direction order.
pub fn find_retreat_hex(map: &GalaxyMap, from: HexCoords, attacker_at: HexCoords) -> Option<HexCoords> {
    from.neighbors()
        .into_iter()
        .filter(|&n| n != attacker_at)
        .filter_map(|n| {
            let hex = map.get_hex(n)?;
            if hex.is_occupied() {
                return None;
            }
            hex.terrain.movement_cost().map(|cost| (n, cost))
        })
        .min_by_key(|&(_, cost)| cost)
        .map(|(n, _)| n)
}

/// Resolve `attacker` striking `defender` with the given operation
///
/// The defender's hex is read from `map` at the defender's location.
pub fn resolve(
    attacker: &mut Unit,
    defender: &mut Unit,
    operation: CombatOperation,
    advance_on_victory: bool,
    map: &GalaxyMap,
    catalog: &Catalog,
    config: &EngineConfig,
) -> CombatResolution {
    let target = defender.location;
    let hex = map.hex(target);
    let prediction = calculate(attacker, defender, hex, operation, catalog, config);
    let result = prediction
        .forced_result
        .clone()
        .unwrap_or_else(|| lookup(prediction.final_score));

    let attacker_losses = StepLosses {
        killed: kill_steps(attacker, result.attacker_kills),
        suppressed: suppress_steps(attacker, result.attacker_suppress),
    };
    let defender_losses = StepLosses {
        killed: kill_steps(defender, result.defender_kills),
        suppressed: suppress_steps(defender, result.defender_suppress),
    };

    let mut retreat_to = None;
    let mut shattered = result.shattered;
    if result.retreat && defender.is_alive() {
        retreat_to = find_retreat_hex(map, target, attacker.location);
        if retreat_to.is_none() {
            suppress_steps(defender, SHATTER_SUPPRESSION);
            shattered = true;
        }
    }

    let defender_destroyed = !defender.is_alive();
    let attacker_destroyed = !attacker.is_alive();
    let vacated = defender_destroyed || retreat_to.is_some();
    let attacker_advances = vacated
        && !attacker_destroyed
        && operation == CombatOperation::Standard
        && advance_on_victory;

    attacker.combat = None;
    if !attacker_destroyed {
        attacker.set_status(UnitStatus::Regrouping);
        attacker.movement.path.clear();
    }
    if !defender_destroyed {
        defender.set_status(UnitStatus::Regrouping);
        if retreat_to.is_some() {
            defender.movement.path.clear();
        }
    }

    let report = CombatReport {
        attacker_id: attacker.id,
        attacker_player_id: attacker.player_id,
        defender_id: defender.id,
        defender_player_id: defender.player_id,
        location: target,
        operation,
        attack_power: prediction.attack_power,
        defense_power: prediction.defense_power,
        odds: prediction.odds,
        odds_score: prediction.odds_score,
        shifts: prediction.shifts,
        final_score: prediction.final_score,
        result_type: result.result_type,
        attacker_losses,
        defender_losses,
        retreated_to: retreat_to,
        shattered,
        defender_destroyed,
        attacker_destroyed,
        attacker_advanced: attacker_advances,
    };

    CombatResolution {
        report,
        retreat_to,
        attacker_advances,
    }
}
