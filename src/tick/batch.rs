//! Cross-game parallelism
//!
//! Games share nothing, so each runs its tick on its own rayon task.
//! Within one game the tick stays strictly sequential.

use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::core::config::EngineConfig;
use crate::core::types::SequentialIds;
use crate::galaxy::entities::GameState;
use crate::tick::context::TickOutput;
use crate::tick::processor::run_tick;

/// Advance every game by one tick, in parallel across games
///
/// Each game gets its own id generator seeded past its highest unit id.
/// Output order matches input order.
pub fn advance_games(
    states: Vec<GameState>,
    catalog: &Catalog,
    config: &EngineConfig,
    now_ms: u64,
) -> Vec<(GameState, TickOutput)> {
    states
        .into_par_iter()
        .map(|state| {
            let mut ids = SequentialIds::starting_after(state.max_unit_id());
            run_tick(state, catalog, config, &mut ids, now_ms)
        })
        .collect()
}

/// Advance one game `ticks` times, concatenating outputs
pub fn advance_ticks(
    mut state: GameState,
    ticks: u64,
    catalog: &Catalog,
    config: &EngineConfig,
    now_ms: u64,
) -> (GameState, TickOutput) {
    let mut total = TickOutput::default();
    let mut ids = SequentialIds::starting_after(state.max_unit_id());

    for _ in 0..ticks {
        if state.game.is_completed() {
            break;
        }
        let (next, output) = run_tick(state, catalog, config, &mut ids, now_ms);
        state = next;
        total.game_events.extend(output.game_events);
        total.stations_to_remove.extend(output.stations_to_remove);
        if output.winner_player_id.is_some() {
            total.winner_player_id = output.winner_player_id;
        }
    }

    (state, total)
}
