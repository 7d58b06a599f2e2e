//! Movement phase: simultaneous single-hex moves with collision rules
//!
//! Every MOVING unit with a path and MP left tries to enter the first hex
//! of its path. A destination "crashes" when more than one unit wants it,
//! or when its occupant is not itself leaving this tick. Crashes can
//! cascade (a crashed unit no longer vacates its hex), so they are found
//! by iterating to a fixed point before any unit moves.

use std::collections::BTreeMap;

use ahash::AHashSet;

use crate::core::types::UnitId;
use crate::galaxy::hex::HexCoords;
use crate::galaxy::unit::UnitStatus;
use crate::lifecycle::steps::suppress_steps;
use crate::navigation::pathfinding::CostModel;
use crate::tick::context::TickContext;

/// One unit's attempt to enter the next hex of its path
#[derive(Debug, Clone, Copy)]
struct MoveIntent {
    unit_id: UnitId,
    from: HexCoords,
    to: HexCoords,
    cost: u32,
}

pub fn run_movement_phase(ctx: &mut TickContext) {
    let intents = collect_intents(ctx);
    if intents.is_empty() {
        return;
    }

    let crashed = find_crashes(ctx, &intents);

    let (crashes, moves): (Vec<MoveIntent>, Vec<MoveIntent>) = intents
        .into_iter()
        .partition(|intent| crashed.contains(&intent.unit_id));

    let suppression = ctx.config.crash_suppression;
    for intent in &crashes {
        let unit = ctx.unit_mut(intent.unit_id);
        unit.state.mp = 0;
        suppress_steps(unit, suppression);
        unit.set_status(UnitStatus::Regrouping);
        unit.movement.path.clear();
        tracing::debug!(unit = %intent.unit_id, to = %intent.to, "Movement crash");
    }

    // Vacate every source before claiming any destination
    for intent in &moves {
        let hex = ctx.map.hex_mut(intent.from);
        if hex.unit_id == Some(intent.unit_id) {
            hex.unit_id = None;
        }
    }
    for intent in &moves {
        ctx.map.hex_mut(intent.to).unit_id = Some(intent.unit_id);

        let unit = ctx.unit_mut(intent.unit_id);
        unit.location = intent.to;
        unit.movement.path.pop_front();
        unit.state.mp = unit.state.mp.saturating_sub(intent.cost);
        if unit.movement.path.is_empty() || unit.state.mp == 0 {
            unit.movement.path.clear();
            unit.set_status(UnitStatus::Idle);
        }
        let player = unit.player_id;

        ctx.capture(intent.to, player);
    }

    tracing::debug!(moved = moves.len(), crashed = crashes.len(), "Movement resolved");
}

/// Gather this tick's intents; units whose next step became illegal halt,
/// units short on MP wait in place
fn collect_intents(ctx: &mut TickContext) -> Vec<MoveIntent> {
    let mut intents = Vec::new();
    let mut halted = Vec::new();

    for unit in &ctx.units {
        if !unit.is_alive() || unit.status() != UnitStatus::Moving {
            continue;
        }
        let Some(&next) = unit.movement.path.front() else {
            halted.push(unit.id);
            continue;
        };
        if unit.state.mp == 0 {
            continue;
        }

        let model = CostModel::new(&ctx.map, unit.player_id).with_zoc(&ctx.zoc);
        match model.cost(next) {
            Some(cost) if unit.location.is_adjacent(next) => {
                // Short on MP: keep the order until the next refill
                if cost > unit.state.mp {
                    continue;
                }
                intents.push(MoveIntent {
                    unit_id: unit.id,
                    from: unit.location,
                    to: next,
                    cost,
                });
            }
            _ => halted.push(unit.id),
        }
    }

    for id in halted {
        ctx.unit_mut(id).halt();
    }

    intents
}

/// Fixed-point crash detection over destination groups
fn find_crashes(ctx: &TickContext, intents: &[MoveIntent]) -> AHashSet<UnitId> {
    let mut by_destination: BTreeMap<HexCoords, Vec<&MoveIntent>> = BTreeMap::new();
    for intent in intents {
        by_destination.entry(intent.to).or_default().push(intent);
    }

    let movers: AHashSet<UnitId> = intents.iter().map(|i| i.unit_id).collect();
    let mut crashed: AHashSet<UnitId> = AHashSet::new();

    loop {
        let mut changed = false;

        for (&destination, group) in &by_destination {
            if group.iter().all(|i| crashed.contains(&i.unit_id)) {
                continue;
            }

            let contested = group.len() > 1;
            let blocked = ctx.unit_at(destination).is_some_and(|occupant| {
                !movers.contains(&occupant) || crashed.contains(&occupant)
            });

            if contested || blocked {
                for intent in group {
                    changed |= crashed.insert(intent.unit_id);
                }
            }
        }

        if !changed {
            break;
        }
    }

    crashed
}

/// Units on hazardous terrain lose steps whether or not they moved
pub fn apply_hazards(ctx: &mut TickContext) {
    let amount = ctx.config.hazard_suppression;
    for unit in ctx.units.iter_mut() {
        if !unit.is_alive() {
            continue;
        }
        let hazardous = ctx
            .map
            .get_hex(unit.location)
            .is_some_and(|h| h.terrain.is_hazardous());
        if hazardous {
            suppress_steps(unit, amount);
        }
    }
}
