//! Tick throughput on a populated map

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use starfront::catalog::Catalog;
use starfront::core::config::EngineConfig;
use starfront::core::types::SequentialIds;
use starfront::galaxy::entities::GameState;
use starfront::galaxy::hex::{HexCoords, HexDirection};
use starfront::galaxy::terrain::Terrain;
use starfront::scenario::ScenarioBuilder;
use starfront::tick::{advance_games, run_tick};

/// Two empires facing each other across a radius-12 disc, fleets on the move
fn populated_state(catalog: &Catalog) -> GameState {
    let mut builder = ScenarioBuilder::new(catalog);
    builder.disc(12, Terrain::Empty);
    for (i, coords) in HexCoords::ORIGIN.ring(6).into_iter().enumerate() {
        if i % 5 == 0 {
            builder.hex(coords, Terrain::AsteroidField);
        }
    }

    let blue = builder.add_player("blue");
    let red = builder.add_player("red");
    let blue_home = HexCoords::from_axial(-9, 0);
    let red_home = HexCoords::from_axial(9, 0);
    builder.own_area(blue_home, 5, blue);
    builder.own_area(red_home, 5, red);
    builder.add_capital(blue, blue_home, "Blue Prime");
    builder.add_capital(red, red_home, "Red Prime");

    let hulls = ["frigate", "destroyer", "cruiser", "corvette"];
    for (i, offset) in HexCoords::ORIGIN.ring(2).into_iter().enumerate() {
        let hull = hulls[i % hulls.len()];

        let at = blue_home + offset;
        let unit = builder.add_unit(blue, hull, at);
        let path: Vec<HexCoords> = (1..=4)
            .map(|k| at + HexDirection::East.offset().scale(k))
            .collect();
        builder.order_move(unit, &path);

        let at = red_home + offset;
        let unit = builder.add_unit(red, hull, at);
        let path: Vec<HexCoords> = (1..=4)
            .map(|k| at + HexDirection::West.offset().scale(k))
            .collect();
        builder.order_move(unit, &path);
    }

    builder.build()
}

fn bench_single_tick(c: &mut Criterion) {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let state = populated_state(&catalog);

    c.bench_function("tick_populated_map", |b| {
        b.iter_batched(
            || state.clone(),
            |state| {
                let mut ids = SequentialIds::starting_after(state.max_unit_id());
                black_box(run_tick(state, &catalog, &config, &mut ids, 0))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_parallel_games(c: &mut Criterion) {
    let catalog = Catalog::with_defaults();
    let config = EngineConfig::default();
    let state = populated_state(&catalog);

    c.bench_function("advance_32_games", |b| {
        b.iter_batched(
            || vec![state.clone(); 32],
            |states| black_box(advance_games(states, &catalog, &config, 0)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_single_tick, bench_parallel_games);
criterion_main!(benches);
