//! Cycle boundary phase
//!
//! Runs on ticks where `tick % ticks_per_cycle == 0`, after supply has been
//! recomputed: unit refill/recovery/starvation, deployments, economy,
//! victory, defeat, AFK, renown, station decommissioning.

use crate::core::types::PlayerId;
use crate::galaxy::entities::{GameStatus, PlayerStatus};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::unit::{Step, Unit, UnitStatus};
use crate::lifecycle::cycle::process_unit_cycle;
use crate::tick::context::TickContext;
use crate::tick::events::GameEventKind;

pub fn run_cycle_phase(ctx: &mut TickContext) {
    tracing::debug!(tick = ctx.game.tick, "Cycle boundary");

    phase_units(ctx);
    phase_deployments(ctx);
    phase_economy(ctx);
    phase_victory(ctx);
    phase_defeat(ctx);
    phase_afk(ctx);
    phase_renown(ctx);
    phase_decommission(ctx);
}

fn phase_units(ctx: &mut TickContext) {
    let ticks_per_cycle = ctx.game.ticks_per_cycle;
    let mut starved = Vec::new();

    for unit in ctx.units.iter_mut() {
        if !unit.is_alive() {
            continue;
        }
        let stats = ctx.catalog.units.get(&unit.catalog_id);
        let in_supply = ctx.supply.is_supplied(unit.player_id, unit.location);
        let outcome = process_unit_cycle(unit, stats, in_supply, ticks_per_cycle, ctx.config);
        if outcome.starved {
            starved.push((unit.id, unit.player_id, outcome.killed, !unit.is_alive()));
        }
    }

    for (unit_id, player_id, steps_lost, destroyed) in starved {
        tracing::debug!(unit = %unit_id, steps_lost, destroyed, "Unit starving");
        ctx.push_event(
            Some(player_id),
            GameEventKind::UnitStarved {
                unit_id,
                steps_lost,
                destroyed,
            },
        );
    }
    ctx.remove_dead_units();
}

/// One unit per eligible planet per cycle, from the front of its queue
fn phase_deployments(ctx: &mut TickContext) {
    for i in 0..ctx.planets.len() {
        let planet = &ctx.planets[i];
        let Some(owner) = planet.owner else {
            continue;
        };
        if planet.deploy_queue.is_empty()
            || ctx.unit_at(planet.location).is_some()
            || !ctx.supply.is_supplied(owner, planet.location)
            || ctx.player(owner).map_or(true, |p| p.status == PlayerStatus::Defeated)
        {
            continue;
        }

        let planet = &mut ctx.planets[i];
        let Some(catalog_id) = planet.deploy_queue.pop_front() else {
            continue;
        };
        let planet_id = planet.id;
        let location = planet.location;

        let stats = ctx.catalog.units.get(&catalog_id);
        let unit_id = ctx.ids.next_unit_id();
        let mut unit = Unit::new(unit_id, ctx.game.id, owner, catalog_id.clone(), location);
        unit.steps.extend((0..stats.steps).map(|_| Step::plain()));
        unit.state.ap = stats.max_ap;
        unit.state.mp = stats.max_mp;
        unit.set_status(UnitStatus::Idle);
        ctx.spawn_unit(unit);

        tracing::debug!(unit = %unit_id, planet = %planet_id, catalog = %catalog_id, "Unit deployed");
        ctx.push_event(
            Some(owner),
            GameEventKind::UnitDeployed {
                unit_id,
                planet_id,
                catalog_id,
                location,
            },
        );
    }
}

/// Prestige income and victory points per player
fn phase_economy(ctx: &mut TickContext) {
    let config = ctx.config;
    for player in ctx.players.iter_mut() {
        if player.status == PlayerStatus::Defeated {
            continue;
        }
        let id = player.id;
        let owned = ctx.planets.iter().filter(|p| p.owner == Some(id));
        let capitals: Vec<HexCoords> = owned
            .clone()
            .filter(|p| p.is_capital)
            .map(|p| p.location)
            .collect();

        let mut income = 0i64;
        let mut planet_count = 0i64;
        for planet in owned {
            planet_count += 1;
            if planet.is_capital {
                income += config.capital_income;
                continue;
            }
            let nearest = capitals.iter().map(|c| c.distance(planet.location)).min();
            if let Some(distance) = nearest {
                let penalty = config.colony_distance_penalty * distance as i64;
                income += (config.colony_income - penalty).max(0);
            }
        }

        player.prestige += income;
        player.victory_points += planet_count * config.victory_points_per_planet;
    }
}

/// Highest VP at or above the threshold wins; first in player order on ties
fn phase_victory(ctx: &mut TickContext) {
    if ctx.game.winner_player_id.is_some() {
        return;
    }
    let threshold = ctx.game.victory_points_to_win;
    let mut winner: Option<(PlayerId, i64)> = None;
    for player in &ctx.players {
        if player.status == PlayerStatus::Defeated || player.victory_points < threshold {
            continue;
        }
        if winner.map_or(true, |(_, vp)| player.victory_points > vp) {
            winner = Some((player.id, player.victory_points));
        }
    }

    let Some((winner_player_id, victory_points)) = winner else {
        return;
    };
    ctx.game.status = GameStatus::Completed;
    ctx.game.winner_player_id = Some(winner_player_id);
    ctx.winner_player_id = Some(winner_player_id);

    tracing::info!(game = %ctx.game.id, winner = %winner_player_id, victory_points, "Game completed");
    ctx.push_event(
        Some(winner_player_id),
        GameEventKind::GameCompleted {
            winner_player_id,
            victory_points,
        },
    );
}

/// No planets and no live units: out of the game, handed to the AI
fn phase_defeat(ctx: &mut TickContext) {
    let mut defeated = Vec::new();
    for player in ctx.players.iter_mut() {
        if player.status == PlayerStatus::Defeated {
            continue;
        }
        let has_planet = ctx.planets.iter().any(|p| p.owner == Some(player.id));
        let has_unit = ctx
            .units
            .iter()
            .any(|u| u.player_id == player.id && u.is_alive());
        if !has_planet && !has_unit {
            player.status = PlayerStatus::Defeated;
            player.is_ai_controlled = true;
            defeated.push(player.id);
        }
    }

    for player_id in defeated {
        tracing::info!(player = %player_id, "Player defeated");
        ctx.push_event(Some(player_id), GameEventKind::PlayerDefeated);
    }
}

/// ACTIVE players unseen for too long go AFK; never seen counts from game start
fn phase_afk(ctx: &mut TickContext) {
    let now = ctx.now_ms;
    let started = ctx.game.started_at_ms;
    let threshold = ctx.config.afk_threshold_ms;

    let mut afk = Vec::new();
    for player in ctx.players.iter_mut() {
        if player.status != PlayerStatus::Active {
            continue;
        }
        let last_seen = player.last_seen_at_ms.unwrap_or(started);
        if now.saturating_sub(last_seen) > threshold {
            player.status = PlayerStatus::Afk;
            player.is_ai_controlled = true;
            afk.push((player.id, player.last_seen_at_ms));
        }
    }

    for (player_id, last_seen_at_ms) in afk {
        tracing::info!(player = %player_id, "Player marked AFK");
        ctx.push_event(Some(player_id), GameEventKind::PlayerAfk { last_seen_at_ms });
    }
}

fn phase_renown(ctx: &mut TickContext) {
    let renown = ctx.config.renown_per_cycle;
    for player in ctx.players.iter_mut().filter(|p| p.is_active()) {
        player.renown_to_distribute += renown;
    }
}

/// Stations without a living owner are torn down
fn phase_decommission(ctx: &mut TickContext) {
    let orphaned: Vec<_> = ctx
        .stations
        .iter()
        .filter(|s| match s.owner {
            None => true,
            Some(owner) => ctx
                .player(owner)
                .map_or(true, |p| p.status == PlayerStatus::Defeated),
        })
        .map(|s| s.id)
        .collect();

    for station_id in orphaned {
        tracing::debug!(station = %station_id, "Station decommissioned");
        ctx.decommission_station(station_id);
    }
}
