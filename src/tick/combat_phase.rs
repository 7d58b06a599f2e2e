//! Combat phase: resolve every declared attack before anything moves
//!
//! Attacks are grouped by target hex. Within a group, attackers strike in
//! initiative order (hull class), higher remaining MP first on ties, then
//! unit id. Once the defender is gone, later attackers find no target and
//! are cancelled.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::combat::engine::resolve;
use crate::core::types::UnitId;
use crate::galaxy::hex::HexCoords;
use crate::galaxy::unit::UnitStatus;
use crate::tick::context::TickContext;
use crate::tick::events::GameEventKind;

pub fn run_combat_phase(ctx: &mut TickContext) {
    let mut groups: BTreeMap<HexCoords, Vec<UnitId>> = BTreeMap::new();
    for unit in &ctx.units {
        if let (true, Some(order)) = (unit.is_alive(), &unit.combat) {
            groups.entry(order.target).or_default().push(unit.id);
        }
    }

    for (target, mut attackers) in groups {
        attackers.sort_by_key(|&id| {
            let unit = ctx.unit(id);
            let class = ctx.catalog.units.get(&unit.catalog_id).class;
            (class.initiative(), Reverse(unit.state.mp), id)
        });

        // The group fights whoever held the hex when it started
        let defender_id = ctx.unit_at(target).filter(|&id| ctx.unit(id).is_alive());

        tracing::debug!(target = %target, attackers = attackers.len(), "Resolving combat group");
        for attacker_id in attackers {
            resolve_attack(ctx, attacker_id, target, defender_id);
        }
    }
}

fn resolve_attack(
    ctx: &mut TickContext,
    attacker_id: UnitId,
    target: HexCoords,
    defender_id: Option<UnitId>,
) {
    let attacker = ctx.unit(attacker_id);
    // Killed by an earlier engagement this phase
    if !attacker.is_alive() {
        return;
    }
    let Some(order) = attacker.combat.clone() else {
        return;
    };

    let defender_id = defender_id.filter(|&id| {
        let defender = ctx.unit(id);
        defender.is_alive()
            && defender.location == target
            && defender.player_id != attacker.player_id
            && attacker.location.is_adjacent(target)
    });
    let Some(defender_id) = defender_id else {
        cancel_attack(ctx, attacker_id, target);
        return;
    };

    ctx.engaged.insert(attacker_id);
    ctx.engaged.insert(defender_id);

    let attacker_idx = ctx.unit_idx(attacker_id);
    let defender_idx = ctx.unit_idx(defender_id);
    let (attacker, defender) = TickContext::unit_pair_mut(&mut ctx.units, attacker_idx, defender_idx);
    let resolution = resolve(
        attacker,
        defender,
        order.operation,
        order.advance_on_victory,
        &ctx.map,
        ctx.catalog,
        ctx.config,
    );
    let attacker_player = attacker.player_id;

    ctx.vacate_if_dead(attacker_id);
    ctx.vacate_if_dead(defender_id);
    if let Some(to) = resolution.retreat_to {
        ctx.move_unit(defender_id, to);
    }
    if resolution.attacker_advances {
        ctx.move_unit(attacker_id, target);
        ctx.capture(target, attacker_player);
    }

    tracing::debug!("{}", resolution.report.summary());
    ctx.push_event(
        Some(attacker_player),
        GameEventKind::CombatReport(Box::new(resolution.report)),
    );
}

/// No valid defender: the attacker stands down
fn cancel_attack(ctx: &mut TickContext, attacker_id: UnitId, target: HexCoords) {
    let attacker = ctx.unit_mut(attacker_id);
    attacker.combat = None;
    attacker.set_status(UnitStatus::Regrouping);
    let player = attacker.player_id;

    tracing::debug!(unit = %attacker_id, target = %target, "Attack cancelled");
    ctx.push_event(
        Some(player),
        GameEventKind::CombatAttackCancelled {
            unit_id: attacker_id,
            target,
        },
    );
}
