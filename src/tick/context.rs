//! Per-tick working set
//!
//! Owns the entity arrays for exactly one tick invocation plus the O(1)
//! lookup indices built over them. Occupancy lives on the hexes
//! (`Hex::unit_id`); every relocation goes through `move_unit` so a unit's
//! location and its hex never disagree.

use ahash::{AHashMap, AHashSet};

use crate::catalog::Catalog;
use crate::core::config::EngineConfig;
use crate::core::types::{IdGenerator, PlanetId, PlayerId, StationId, UnitId};
use crate::galaxy::entities::{Game, GameState, Planet, Player, Station};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::GalaxyMap;
use crate::galaxy::unit::{Unit, UnitStatus};
use crate::navigation::zoc::ZocIndex;
use crate::supply::network::SupplyNetwork;
use crate::tick::events::{GameEvent, GameEventKind};

/// Everything a tick hands back besides the mutated state
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub game_events: Vec<GameEvent>,
    pub stations_to_remove: Vec<StationId>,
    pub winner_player_id: Option<PlayerId>,
}

pub struct TickContext<'a> {
    pub game: Game,
    pub players: Vec<Player>,
    pub map: GalaxyMap,
    pub units: Vec<Unit>,
    pub planets: Vec<Planet>,
    pub stations: Vec<Station>,

    pub catalog: &'a Catalog,
    pub config: &'a EngineConfig,
    pub ids: &'a mut dyn IdGenerator,
    /// Wall clock (epoch ms) the tick runs at; only AFK detection reads it
    pub now_ms: u64,

    unit_index: AHashMap<UnitId, usize>,
    planet_by_coords: AHashMap<HexCoords, usize>,
    station_by_coords: AHashMap<HexCoords, usize>,
    player_index: AHashMap<PlayerId, usize>,

    /// Units REGROUPING when the tick started
    pub regrouping_before: AHashSet<UnitId>,
    /// Units that fought this tick, either side
    pub engaged: AHashSet<UnitId>,
    pub zoc: ZocIndex,
    pub supply: SupplyNetwork,

    pub game_events: Vec<GameEvent>,
    pub stations_to_remove: Vec<StationId>,
    pub winner_player_id: Option<PlayerId>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        state: GameState,
        catalog: &'a Catalog,
        config: &'a EngineConfig,
        ids: &'a mut dyn IdGenerator,
        now_ms: u64,
    ) -> Self {
        let GameState {
            game,
            players,
            hexes,
            units,
            planets,
            stations,
        } = state;

        let mut ctx = Self {
            game,
            players,
            map: GalaxyMap::new(hexes),
            units,
            planets,
            stations,
            catalog,
            config,
            ids,
            now_ms,
            unit_index: AHashMap::new(),
            planet_by_coords: AHashMap::new(),
            station_by_coords: AHashMap::new(),
            player_index: AHashMap::new(),
            regrouping_before: AHashSet::new(),
            engaged: AHashSet::new(),
            zoc: ZocIndex::default(),
            supply: SupplyNetwork::default(),
            game_events: Vec::new(),
            stations_to_remove: Vec::new(),
            winner_player_id: None,
        };
        ctx.reindex();
        ctx
    }

    /// Rebuild every lookup index from the entity arrays
    pub fn reindex(&mut self) {
        self.unit_index = self.units.iter().enumerate().map(|(i, u)| (u.id, i)).collect();
        self.planet_by_coords = self
            .planets
            .iter()
            .enumerate()
            .map(|(i, p)| (p.location, i))
            .collect();
        self.station_by_coords = self
            .stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.location, i))
            .collect();
        self.player_index = self.players.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
    }

    pub fn into_parts(self) -> (GameState, TickOutput) {
        let state = GameState {
            game: self.game,
            players: self.players,
            hexes: self.map.into_hexes(),
            units: self.units,
            planets: self.planets,
            stations: self.stations,
        };
        let output = TickOutput {
            game_events: self.game_events,
            stations_to_remove: self.stations_to_remove,
            winner_player_id: self.winner_player_id,
        };
        (state, output)
    }

    // === LOOKUPS ===

    pub fn unit_idx(&self, id: UnitId) -> usize {
        *self
            .unit_index
            .get(&id)
            .unwrap_or_else(|| panic!("unit {} missing from tick context", id))
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[self.unit_idx(id)]
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        let idx = self.unit_idx(id);
        &mut self.units[idx]
    }

    /// Occupant of a hex, if any
    pub fn unit_at(&self, coords: HexCoords) -> Option<UnitId> {
        self.map.get_hex(coords).and_then(|h| h.unit_id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.player_index.get(&id).map(|&i| &self.players[i])
    }

    // === MUTATION HELPERS ===

    pub fn push_event(&mut self, player_id: Option<PlayerId>, kind: GameEventKind) {
        self.game_events.push(GameEvent {
            game_id: self.game.id,
            player_id,
            tick: self.game.tick,
            kind,
        });
    }

    /// Relocate a unit, keeping hex occupancy in sync
    pub fn move_unit(&mut self, id: UnitId, to: HexCoords) {
        let idx = self.unit_idx(id);
        let from = self.units[idx].location;
        if let Some(hex) = self.map.get_hex_mut(from) {
            if hex.unit_id == Some(id) {
                hex.unit_id = None;
            }
        }
        self.map.hex_mut(to).unit_id = Some(id);
        self.units[idx].location = to;
    }

    /// Transfer a hex and whatever sits on it to `player`
    pub fn capture(&mut self, coords: HexCoords, player: PlayerId) {
        self.map.hex_mut(coords).owner = Some(player);

        if let Some(&i) = self.planet_by_coords.get(&coords) {
            let planet = &mut self.planets[i];
            if planet.owner != Some(player) {
                let previous_owner = planet.owner.replace(player);
                let planet_id: PlanetId = planet.id;
                tracing::info!(planet = %planet_id, player = %player, at = %coords, "Planet captured");
                self.push_event(
                    Some(player),
                    GameEventKind::PlanetCaptured {
                        planet_id,
                        previous_owner,
                        location: coords,
                    },
                );
            }
        }

        if let Some(&i) = self.station_by_coords.get(&coords) {
            self.stations[i].owner = Some(player);
        }
    }

    /// Clear the hex reference of a unit that no longer has steps
    pub fn vacate_if_dead(&mut self, id: UnitId) {
        let unit = self.unit(id);
        if unit.is_alive() {
            return;
        }
        let location = unit.location;
        if let Some(hex) = self.map.get_hex_mut(location) {
            if hex.unit_id == Some(id) {
                hex.unit_id = None;
            }
        }
    }

    /// Drop units with no steps left and rebuild the unit index
    pub fn remove_dead_units(&mut self) {
        let dead: Vec<UnitId> = self
            .units
            .iter()
            .filter(|u| !u.is_alive())
            .map(|u| u.id)
            .collect();
        if dead.is_empty() {
            return;
        }
        for &id in &dead {
            self.vacate_if_dead(id);
            tracing::debug!(unit = %id, "Unit destroyed");
        }
        self.units.retain(|u| u.is_alive());
        self.unit_index = self.units.iter().enumerate().map(|(i, u)| (u.id, i)).collect();
    }

    pub fn rebuild_zoc(&mut self) {
        self.zoc = ZocIndex::build(&self.units, &self.catalog.units);
    }

    pub fn snapshot_regrouping(&mut self) {
        self.regrouping_before = self
            .units
            .iter()
            .filter(|u| u.status() == UnitStatus::Regrouping)
            .map(|u| u.id)
            .collect();
    }

    /// Units that were regrouping and stayed out of combat stand down
    pub fn settle_regrouping(&mut self) {
        for unit in self.units.iter_mut() {
            if unit.status() == UnitStatus::Regrouping
                && self.regrouping_before.contains(&unit.id)
                && !self.engaged.contains(&unit.id)
            {
                unit.set_status(UnitStatus::Idle);
            }
        }
    }

    /// Two distinct units borrowed mutably at once
    pub fn unit_pair_mut(units: &mut [Unit], a: usize, b: usize) -> (&mut Unit, &mut Unit) {
        assert_ne!(a, b, "a unit cannot fight itself");
        if a < b {
            let (left, right) = units.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = units.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Record a freshly spawned unit and claim its hex
    pub fn spawn_unit(&mut self, unit: Unit) {
        let id = unit.id;
        let location = unit.location;
        self.game.last_unit_id = self.game.last_unit_id.max(id.0);
        self.unit_index.insert(id, self.units.len());
        self.units.push(unit);
        self.map.hex_mut(location).unit_id = Some(id);
    }

    /// Remove a station from the working set and queue it for deletion
    pub fn decommission_station(&mut self, id: StationId) {
        let Some(pos) = self.stations.iter().position(|s| s.id == id) else {
            return;
        };
        let station = self.stations.remove(pos);
        if let Some(hex) = self.map.get_hex_mut(station.location) {
            if hex.station_id == Some(id) {
                hex.station_id = None;
            }
        }
        self.stations_to_remove.push(id);
        self.station_by_coords = self
            .stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.location, i))
            .collect();
        self.push_event(
            station.owner,
            GameEventKind::StationDecommissioned {
                station_id: id,
                location: station.location,
            },
        );
    }
}
