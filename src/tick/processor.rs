//! Tick processor - the engine entry point
//!
//! Each tick: combat -> movement -> hazards -> regroup -> supply -> cycle.
//! The order is load-bearing: every phase reads what the previous one wrote.

use crate::catalog::Catalog;
use crate::core::config::EngineConfig;
use crate::core::types::IdGenerator;
use crate::galaxy::entities::GameState;
use crate::supply::network::SupplyNetwork;
use crate::tick::combat_phase::run_combat_phase;
use crate::tick::context::{TickContext, TickOutput};
use crate::tick::cycle::run_cycle_phase;
use crate::tick::movement::{apply_hazards, run_movement_phase};

/// Advance the game in `ctx` by one tick, mutating it in place
///
/// Completed games are left untouched.
pub fn process_tick(ctx: &mut TickContext) {
    if ctx.game.is_completed() {
        return;
    }
    ctx.game.tick += 1;

    ctx.snapshot_regrouping();
    ctx.engaged.clear();

    // ===== PHASE 1: COMBAT =====
    ctx.rebuild_zoc();
    run_combat_phase(ctx);
    ctx.remove_dead_units();

    // ===== PHASE 2: MOVEMENT =====
    ctx.rebuild_zoc();
    run_movement_phase(ctx);

    // ===== PHASE 3: HAZARDS =====
    apply_hazards(ctx);
    ctx.remove_dead_units();
    ctx.settle_regrouping();

    // ===== PHASE 4: SUPPLY =====
    ctx.supply = SupplyNetwork::compute(
        &ctx.map,
        &ctx.players,
        &mut ctx.planets,
        &mut ctx.stations,
        ctx.config,
    );
    ctx.supply.update_units(&mut ctx.units);

    // ===== PHASE 5: CYCLE =====
    if ctx.game.is_cycle_boundary() {
        run_cycle_phase(ctx);
    }

    // ===== POST-TICK =====
    ctx.rebuild_zoc();
    ctx.zoc.write_to(&mut ctx.map);

    tracing::debug!(
        game = %ctx.game.id,
        tick = ctx.game.tick,
        units = ctx.units.len(),
        events = ctx.game_events.len(),
        "Tick processed"
    );
}

/// Run one tick over a snapshot and hand back the new snapshot
pub fn run_tick(
    state: GameState,
    catalog: &Catalog,
    config: &EngineConfig,
    ids: &mut dyn IdGenerator,
    now_ms: u64,
) -> (GameState, TickOutput) {
    let mut ctx = TickContext::new(state, catalog, config, ids, now_ms);
    process_tick(&mut ctx);
    ctx.into_parts()
}
