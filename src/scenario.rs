//! Programmatic `GameState` construction
//!
//! Used by the integration tests, the bench and ad-hoc tooling. Setup
//! mistakes (unit on a missing or occupied hex, unknown player) panic.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::core::types::{CatalogId, GameId, PlanetId, PlayerId, StationId, Tick, UnitId};
use crate::galaxy::entities::{Game, GameState, GameStatus, Planet, Player, Station, SupplySource};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::Hex;
use crate::galaxy::terrain::Terrain;
use crate::galaxy::unit::{CombatOperation, CombatOrder, Step, Unit, UnitStatus};

pub struct ScenarioBuilder<'a> {
    catalog: &'a Catalog,
    game: Game,
    players: Vec<Player>,
    hexes: BTreeMap<HexCoords, Hex>,
    units: Vec<Unit>,
    planets: Vec<Planet>,
    stations: Vec<Station>,
    next_unit: u64,
    next_planet: u64,
    next_station: u64,
}

impl<'a> ScenarioBuilder<'a> {
    /// Empty game 1: ten ticks per cycle, 100 VP to win, started at epoch 0
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            game: Game {
                id: GameId(1),
                tick: 0,
                ticks_per_cycle: 10,
                victory_points_to_win: 100,
                started_at_ms: 0,
                status: GameStatus::Active,
                winner_player_id: None,
                last_unit_id: 0,
            },
            players: Vec::new(),
            hexes: BTreeMap::new(),
            units: Vec::new(),
            planets: Vec::new(),
            stations: Vec::new(),
            next_unit: 1,
            next_planet: 1,
            next_station: 1,
        }
    }

    // === GAME PARAMETERS ===

    pub fn game_id(&mut self, id: GameId) -> &mut Self {
        self.game.id = id;
        self
    }

    pub fn ticks_per_cycle(&mut self, ticks: Tick) -> &mut Self {
        self.game.ticks_per_cycle = ticks;
        self
    }

    pub fn victory_points_to_win(&mut self, points: i64) -> &mut Self {
        self.game.victory_points_to_win = points;
        self
    }

    pub fn started_at_ms(&mut self, ms: u64) -> &mut Self {
        self.game.started_at_ms = ms;
        self
    }

    /// Last processed tick; the next tick processed is `tick + 1`
    pub fn at_tick(&mut self, tick: Tick) -> &mut Self {
        self.game.tick = tick;
        self
    }

    // === MAP ===

    /// Add every hex within `radius` of the origin (existing hexes keep their state)
    pub fn disc(&mut self, radius: u32, terrain: Terrain) -> &mut Self {
        let game_id = self.game.id;
        for coords in HexCoords::ORIGIN.range(radius) {
            self.hexes
                .entry(coords)
                .or_insert_with(|| Hex::new(game_id, coords, terrain));
        }
        self
    }

    /// Add a hex, or retag an existing one
    pub fn hex(&mut self, coords: HexCoords, terrain: Terrain) -> &mut Self {
        let game_id = self.game.id;
        self.hexes
            .entry(coords)
            .or_insert_with(|| Hex::new(game_id, coords, terrain))
            .terrain = terrain;
        self
    }

    pub fn owner(&mut self, coords: HexCoords, player: PlayerId) -> &mut Self {
        self.hex_mut(coords).owner = Some(player);
        self
    }

    /// Give `player` every existing hex within `radius` of `center`
    pub fn own_area(&mut self, center: HexCoords, radius: u32, player: PlayerId) -> &mut Self {
        for coords in center.range(radius) {
            if let Some(hex) = self.hexes.get_mut(&coords) {
                hex.owner = Some(player);
            }
        }
        self
    }

    fn hex_mut(&mut self, coords: HexCoords) -> &mut Hex {
        self.hexes
            .get_mut(&coords)
            .unwrap_or_else(|| panic!("scenario hex {} not on the map", coords))
    }

    // === ENTITIES ===

    pub fn add_player(&mut self, name: &str) -> PlayerId {
        let id = PlayerId(self.players.len() as u64 + 1);
        self.players.push(Player::new(id, self.game.id, name));
        id
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("scenario player {} missing", id))
    }

    /// Full-strength unit with plain steps, full AP/MP, IDLE
    pub fn add_unit(&mut self, player: PlayerId, catalog_id: &str, at: HexCoords) -> UnitId {
        let catalog = self.catalog;
        let stats = catalog.units.get(&CatalogId::from(catalog_id));
        let id = UnitId(self.next_unit);
        self.next_unit += 1;

        let hex = self.hex_mut(at);
        assert!(hex.unit_id.is_none(), "scenario hex {} already occupied", at);
        hex.unit_id = Some(id);

        let mut unit = Unit::new(id, self.game.id, player, catalog_id, at);
        unit.steps.extend((0..stats.steps).map(|_| Step::plain()));
        unit.state.ap = stats.max_ap;
        unit.state.mp = stats.max_mp;
        unit.set_status(UnitStatus::Idle);
        self.units.push(unit);
        id
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        self.units
            .iter_mut()
            .find(|u| u.id == id)
            .unwrap_or_else(|| panic!("scenario unit {} missing", id))
    }

    /// Trim a unit down to `steps` plain steps
    pub fn with_steps(&mut self, id: UnitId, steps: usize) -> &mut Self {
        let unit = self.unit_mut(id);
        unit.steps.clear();
        unit.steps.extend((0..steps).map(|_| Step::plain()));
        self
    }

    pub fn order_move(&mut self, id: UnitId, path: &[HexCoords]) -> &mut Self {
        let unit = self.unit_mut(id);
        unit.movement.path = path.iter().copied().collect();
        unit.set_status(UnitStatus::Moving);
        self
    }

    pub fn order_attack(
        &mut self,
        id: UnitId,
        target: HexCoords,
        operation: CombatOperation,
        advance_on_victory: bool,
    ) -> &mut Self {
        let unit = self.unit_mut(id);
        unit.combat = Some(CombatOrder {
            target,
            operation,
            advance_on_victory,
        });
        unit.set_status(UnitStatus::Preparing);
        self
    }

    /// Owned capital; also claims its hex
    pub fn add_capital(&mut self, player: PlayerId, at: HexCoords, name: &str) -> PlanetId {
        let id = self.push_planet(Some(player), at, name);
        self.planet_mut(id).is_capital = true;
        id
    }

    /// Colony or neutral planet; an owned planet also claims its hex
    pub fn add_planet(&mut self, owner: Option<PlayerId>, at: HexCoords, name: &str) -> PlanetId {
        self.push_planet(owner, at, name)
    }

    fn push_planet(&mut self, owner: Option<PlayerId>, at: HexCoords, name: &str) -> PlanetId {
        let id = PlanetId(self.next_planet);
        self.next_planet += 1;

        let hex = self.hex_mut(at);
        hex.planet_id = Some(id);
        if owner.is_some() {
            hex.owner = owner;
        }

        self.planets.push(Planet {
            id,
            game_id: self.game.id,
            owner,
            location: at,
            name: name.to_string(),
            is_capital: false,
            supply: SupplySource::default(),
            deploy_queue: Default::default(),
        });
        id
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> &mut Planet {
        self.planets
            .iter_mut()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("scenario planet {} missing", id))
    }

    pub fn queue_deployment(&mut self, planet: PlanetId, catalog_id: &str) -> &mut Self {
        self.planet_mut(planet)
            .deploy_queue
            .push_back(CatalogId::from(catalog_id));
        self
    }

    pub fn add_station(&mut self, owner: Option<PlayerId>, at: HexCoords) -> StationId {
        let id = StationId(self.next_station);
        self.next_station += 1;

        let hex = self.hex_mut(at);
        hex.station_id = Some(id);
        if owner.is_some() {
            hex.owner = owner;
        }

        self.stations.push(Station {
            id,
            game_id: self.game.id,
            owner,
            location: at,
            supply: SupplySource::default(),
        });
        id
    }

    pub fn station_mut(&mut self, id: StationId) -> &mut Station {
        self.stations
            .iter_mut()
            .find(|s| s.id == id)
            .unwrap_or_else(|| panic!("scenario station {} missing", id))
    }

    pub fn build(&self) -> GameState {
        let mut game = self.game.clone();
        game.last_unit_id = game.last_unit_id.max(self.next_unit - 1);
        GameState {
            game,
            players: self.players.clone(),
            hexes: self.hexes.values().cloned().collect(),
            units: self.units.clone(),
            planets: self.planets.clone(),
            stations: self.stations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_has_expected_hex_count() {
        let catalog = Catalog::with_defaults();
        let state = ScenarioBuilder::new(&catalog).disc(2, Terrain::Empty).build();
        assert_eq!(state.hexes.len(), 19);
    }

    #[test]
    fn test_add_unit_claims_hex_and_fills_steps() {
        let catalog = Catalog::with_defaults();
        let mut builder = ScenarioBuilder::new(&catalog);
        builder.disc(1, Terrain::Empty);
        let blue = builder.add_player("blue");
        let unit_id = builder.add_unit(blue, "frigate", HexCoords::ORIGIN);
        let state = builder.build();

        let unit = state.unit(unit_id).unwrap();
        assert_eq!(unit.steps.len(), 5);
        assert_eq!(unit.state.mp, 4);
        assert_eq!(state.hex(HexCoords::ORIGIN).unwrap().unit_id, Some(unit_id));
        assert_eq!(state.game.last_unit_id, unit_id.0);
    }

    #[test]
    fn test_capital_claims_hex() {
        let catalog = Catalog::with_defaults();
        let mut builder = ScenarioBuilder::new(&catalog);
        builder.disc(1, Terrain::Empty);
        let blue = builder.add_player("blue");
        let capital = builder.add_capital(blue, HexCoords::ORIGIN, "Home");
        let state = builder.build();

        let hex = state.hex(HexCoords::ORIGIN).unwrap();
        assert_eq!(hex.owner, Some(blue));
        assert_eq!(hex.planet_id, Some(capital));
        assert!(state.planets[0].is_supply_root());
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_stacking_units_panics() {
        let catalog = Catalog::with_defaults();
        let mut builder = ScenarioBuilder::new(&catalog);
        builder.disc(1, Terrain::Empty);
        let blue = builder.add_player("blue");
        builder.add_unit(blue, "frigate", HexCoords::ORIGIN);
        builder.add_unit(blue, "frigate", HexCoords::ORIGIN);
    }
}
