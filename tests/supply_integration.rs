//! Supply network tests: root range, relay daisy chains, territory limits

use starfront::catalog::Catalog;
use starfront::core::config::EngineConfig;
use starfront::core::types::SequentialIds;
use starfront::galaxy::entities::GameState;
use starfront::galaxy::hex::HexCoords;
use starfront::galaxy::map::GalaxyMap;
use starfront::galaxy::terrain::Terrain;
use starfront::scenario::ScenarioBuilder;
use starfront::supply::SupplyNetwork;
use starfront::tick::run_tick;

fn network(state: &mut GameState, config: &EngineConfig) -> SupplyNetwork {
    let map = GalaxyMap::new(state.hexes.clone());
    SupplyNetwork::compute(
        &map,
        &state.players,
        &mut state.planets,
        &mut state.stations,
        config,
    )
}

fn at(q: i32) -> HexCoords {
    HexCoords::from_axial(q, 0)
}

#[test]
fn test_relay_at_root_range_extends_network() {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let mut builder = ScenarioBuilder::new(&catalog);
    builder.disc(10, Terrain::Empty);
    let blue = builder.add_player("blue");
    builder.own_area(HexCoords::ORIGIN, 10, blue);
    builder.add_capital(blue, HexCoords::ORIGIN, "Home");
    let colony = builder.add_planet(Some(blue), at(6), "Edge");
    let mut state = builder.build();

    let supply = network(&mut state, &config);

    let colony = state.planets.iter().find(|p| p.id == colony).unwrap();
    assert!(colony.supply.is_active);
    assert!(supply.is_supplied(blue, at(6)));
    // Relay range 3 beyond the colony
    assert!(supply.is_supplied(blue, at(9)));
    assert!(!supply.is_supplied(blue, at(10)));
}

#[test]
fn test_relay_beyond_root_range_stays_dark() {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let mut builder = ScenarioBuilder::new(&catalog);
    builder.disc(10, Terrain::Empty);
    let blue = builder.add_player("blue");
    builder.own_area(HexCoords::ORIGIN, 10, blue);
    builder.add_capital(blue, HexCoords::ORIGIN, "Home");
    let colony = builder.add_planet(Some(blue), at(7), "Too Far");
    let mut state = builder.build();

    let supply = network(&mut state, &config);

    let colony = state.planets.iter().find(|p| p.id == colony).unwrap();
    assert!(!colony.supply.is_active);
    assert!(supply.is_supplied(blue, at(6)));
    assert!(!supply.is_supplied(blue, at(7)));
    assert!(!supply.is_supplied(blue, at(8)));
}

#[test]
fn test_chain_through_two_relays() {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let mut builder = ScenarioBuilder::new(&catalog);
    builder.disc(12, Terrain::Empty);
    let blue = builder.add_player("blue");
    builder.own_area(HexCoords::ORIGIN, 12, blue);
    builder.add_capital(blue, HexCoords::ORIGIN, "Home");
    builder.add_planet(Some(blue), at(6), "Colony");
    let station = builder.add_station(Some(blue), at(9));
    let mut state = builder.build();

    let supply = network(&mut state, &config);

    let station = state.stations.iter().find(|s| s.id == station).unwrap();
    assert!(station.supply.is_active);
    assert!(supply.is_supplied(blue, at(12)));
}

#[test]
fn test_supply_stops_at_foreign_territory() {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let mut builder = ScenarioBuilder::new(&catalog);
    builder.disc(6, Terrain::Empty);
    let blue = builder.add_player("blue");
    let red = builder.add_player("red");
    builder.own_area(HexCoords::ORIGIN, 6, blue);
    for coords in HexCoords::ORIGIN.ring(2) {
        builder.owner(coords, red);
    }
    builder.add_capital(blue, HexCoords::ORIGIN, "Home");
    let mut state = builder.build();

    let supply = network(&mut state, &config);

    assert_eq!(supply.supplied_count(blue), 7);
    let hexes = supply.supplied_hexes(blue);
    assert!(hexes.windows(2).all(|w| w[0] < w[1]));
    assert!(hexes.iter().all(|h| h.distance(HexCoords::ORIGIN) <= 1));
    assert!(supply.is_supplied(blue, at(1)));
    assert!(!supply.is_supplied(blue, at(3)));
    assert_eq!(supply.supplied_count(red), 0);
}

#[test]
fn test_rough_terrain_shortens_reach() {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let mut builder = ScenarioBuilder::new(&catalog);
    builder.disc(8, Terrain::Empty);
    builder.hex(at(3), Terrain::AsteroidField);
    let blue = builder.add_player("blue");
    builder.own_area(HexCoords::ORIGIN, 8, blue);
    builder.add_capital(blue, HexCoords::ORIGIN, "Home");
    let colony = builder.add_planet(Some(blue), at(6), "Behind the Rocks");
    let mut state = builder.build();

    let supply = network(&mut state, &config);

    // The only 6-hex route crosses the asteroid field
    let colony = state.planets.iter().find(|p| p.id == colony).unwrap();
    assert!(!colony.supply.is_active);
    assert!(supply.is_supplied(blue, at(5)));
    assert!(!supply.is_supplied(blue, at(6)));
}

#[test]
fn test_tick_refreshes_unit_supply_counters() {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let mut builder = ScenarioBuilder::new(&catalog);
    builder.disc(10, Terrain::Empty);
    let blue = builder.add_player("blue");
    builder.own_area(HexCoords::ORIGIN, 8, blue);
    builder.add_capital(blue, HexCoords::ORIGIN, "Home");
    builder.add_station(Some(blue), at(6));
    let supplied = builder.add_unit(blue, "frigate", at(8));
    let stranded = builder.add_unit(blue, "frigate", at(10));
    builder.unit_mut(supplied).supply.ticks_out_of_supply = 5;
    let state = builder.build();

    let mut ids = SequentialIds::starting_after(state.max_unit_id());
    let (state, _) = run_tick(state, &catalog, &config, &mut ids, 0);

    assert!(state.stations[0].supply.is_active);
    assert_eq!(state.unit(supplied).unwrap().supply.ticks_out_of_supply, 0);
    assert_eq!(state.unit(stranded).unwrap().supply.ticks_out_of_supply, 1);
    assert_eq!(state.unit(stranded).unwrap().supply.ticks_since_last_supply, 1);
}
