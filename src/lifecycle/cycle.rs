//! Per-unit cycle boundary processing
//!
//! Refill, then either recover (in supply) or walk the out-of-supply
//! ladder. Tiers are cumulative:
//! - tier 2: AP zeroed, 2 steps suppressed
//! - tier 3: MP halved (rounded up), every step suppressed
//! - tier 4: 3 steps killed from the front

use crate::catalog::UnitStats;
use crate::core::config::EngineConfig;
use crate::core::types::Tick;
use crate::galaxy::unit::{Unit, UnitStatus};
use crate::lifecycle::steps::{kill_steps, recover_steps, suppress_all, suppress_steps};

/// First tier at which out-of-supply penalties start
pub const OOS_PENALTY_TIER: u64 = 2;
pub const OOS_HALVE_MP_TIER: u64 = 3;
pub const OOS_STARVATION_TIER: u64 = 4;

/// Steps suppressed at the first penalty tier
pub const OOS_SUPPRESSION: usize = 2;

/// Steps killed per cycle once starving
pub const OOS_STARVATION_KILLS: usize = 3;

/// What happened to one unit at a cycle boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitCycleOutcome {
    pub tier: u64,
    pub recovered: usize,
    pub suppressed: usize,
    pub killed: usize,
    pub starved: bool,
}

/// Whole cycles spent out of supply
pub fn oos_tier(ticks_out_of_supply: Tick, ticks_per_cycle: Tick) -> u64 {
    if ticks_per_cycle == 0 {
        return 0;
    }
    ticks_out_of_supply / ticks_per_cycle
}

pub fn process_unit_cycle(
    unit: &mut Unit,
    stats: &UnitStats,
    in_supply: bool,
    ticks_per_cycle: Tick,
    config: &EngineConfig,
) -> UnitCycleOutcome {
    let mut outcome = UnitCycleOutcome::default();

    unit.state.ap = stats.max_ap;
    unit.state.mp = stats.max_mp;

    if in_supply {
        outcome.recovered = recover_steps(unit, config.recovery_steps_per_cycle);
    } else {
        outcome.tier = oos_tier(unit.supply.ticks_out_of_supply, ticks_per_cycle);

        if outcome.tier >= OOS_PENALTY_TIER {
            unit.state.ap = 0;
            outcome.suppressed += suppress_steps(unit, OOS_SUPPRESSION);
        }
        if outcome.tier >= OOS_HALVE_MP_TIER {
            unit.state.mp = (unit.state.mp + 1) / 2;
            outcome.suppressed += suppress_all(unit);
        }
        if outcome.tier >= OOS_STARVATION_TIER {
            outcome.killed = kill_steps(unit, OOS_STARVATION_KILLS);
            outcome.starved = true;
        }
    }

    if unit.status() == UnitStatus::Regrouping && (in_supply || outcome.tier < OOS_PENALTY_TIER) {
        unit.set_status(UnitStatus::Idle);
    }

    outcome
}
