//! Supply network for the galaxy layer
//!
//! Supply floods out from root sources (capitals) over the player's own
//! hexes. Relays (colonies, stations) switch on once the flood reaches them
//! and then project supply of their own with a shorter range, so a network
//! daisy-chains outward breadth-first.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::core::config::EngineConfig;
use crate::core::types::PlayerId;
use crate::galaxy::entities::{Planet, Player, Station};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::HexGrid;
use crate::galaxy::unit::Unit;
use crate::navigation::pathfinding::reachable;

/// In-supply hexes for every player
#[derive(Debug, Clone, Default)]
pub struct SupplyNetwork {
    supplied: AHashMap<PlayerId, AHashSet<HexCoords>>,
}

impl SupplyNetwork {
    /// Recompute supply for all players
    ///
    /// Relay activation flags on planets and stations are reset and
    /// recomputed as a side effect.
    pub fn compute<G: HexGrid>(
        grid: &G,
        players: &[Player],
        planets: &mut [Planet],
        stations: &mut [Station],
        config: &EngineConfig,
    ) -> Self {
        for planet in planets.iter_mut() {
            planet.supply.is_active = false;
        }
        for station in stations.iter_mut() {
            station.supply.is_active = false;
        }

        let mut supplied = AHashMap::new();
        for player in players {
            let hexes = propagate(grid, player.id, planets, stations, config);
            supplied.insert(player.id, hexes);
        }

        Self { supplied }
    }

    pub fn is_supplied(&self, player: PlayerId, coords: HexCoords) -> bool {
        self.supplied
            .get(&player)
            .is_some_and(|hexes| hexes.contains(&coords))
    }

    /// Supplied hexes of one player in coordinate order
    pub fn supplied_hexes(&self, player: PlayerId) -> Vec<HexCoords> {
        let mut hexes: Vec<HexCoords> = self
            .supplied
            .get(&player)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        hexes.sort();
        hexes
    }

    pub fn supplied_count(&self, player: PlayerId) -> usize {
        self.supplied.get(&player).map_or(0, |hexes| hexes.len())
    }

    /// Refresh per-unit supply counters from set membership
    pub fn update_units(&self, units: &mut [Unit]) {
        for unit in units.iter_mut() {
            if self.is_supplied(unit.player_id, unit.location) {
                unit.supply.ticks_since_last_supply = 0;
                unit.supply.ticks_out_of_supply = 0;
            } else {
                unit.supply.ticks_since_last_supply += 1;
                unit.supply.ticks_out_of_supply += 1;
            }
        }
    }
}

/// Breadth-first daisy chain for one player
fn propagate<G: HexGrid>(
    grid: &G,
    player: PlayerId,
    planets: &mut [Planet],
    stations: &mut [Station],
    config: &EngineConfig,
) -> AHashSet<HexCoords> {
    let mut supplied = AHashSet::new();
    let mut queue: VecDeque<(HexCoords, u32)> = VecDeque::new();

    for planet in planets.iter_mut() {
        if planet.owner == Some(player) && planet.is_supply_root() {
            planet.supply.is_active = true;
            queue.push_back((planet.location, config.root_supply_range));
        }
    }
    for station in stations.iter_mut() {
        if station.owner == Some(player) && station.supply.is_root {
            station.supply.is_active = true;
            queue.push_back((station.location, config.root_supply_range));
        }
    }

    // Supply only travels through the player's own territory
    let cost = |coords: HexCoords| {
        if grid.owner_at(coords) != Some(player) {
            return None;
        }
        grid.terrain_at(coords)?.movement_cost()
    };

    while let Some((origin, range)) = queue.pop_front() {
        let reach = reachable(origin, range, &cost);
        supplied.extend(reach.distances.keys().copied());

        for planet in planets.iter_mut() {
            if planet.owner == Some(player)
                && !planet.supply.is_active
                && supplied.contains(&planet.location)
            {
                planet.supply.is_active = true;
                queue.push_back((planet.location, config.relay_supply_range));
                tracing::debug!(player = %player, planet = %planet.id, at = %planet.location, "Relay planet activated");
            }
        }
        for station in stations.iter_mut() {
            if station.owner == Some(player)
                && !station.supply.is_active
                && supplied.contains(&station.location)
            {
                station.supply.is_active = true;
                queue.push_back((station.location, config.relay_supply_range));
                tracing::debug!(player = %player, station = %station.id, at = %station.location, "Relay station activated");
            }
        }
    }

    supplied
}
