//! Measure a crowd of actors walking to random destinations
//!
//! Map is 64 tiles by 64 tiles with 200 actors, each benchmark iteration
//! updates every actor for 100 ticks
//!

use bevy_pathfindable_tiles_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Map, search and actors with a destination each
fn prepare_crowd(count: i32) -> (TileGrid, PathFinder, Vec<Pathfindable>) {
	let dimensions = MapDimensions::new(64, 64, 16, 16);
	let mut grid = TileGrid::from_dimensions(&dimensions);
	let mut finder = PathFinder::with_defaults(&dimensions);
	let mut rng = StdRng::seed_from_u64(7);
	let mut actors = Vec::new();
	for id in 1..=count {
		let mut actor = Pathfindable::new(id, &dimensions, (16, 16), (4.0, 4.0));
		// actors are laid out in rows so no two start on the same tile
		actor.place(&mut grid, TileCell::new((id - 1) % 64, (id - 1) / 64 * 2));
		let x = rng.random_range(0..64);
		let y = rng.random_range(0..64);
		actor.set_destination(&grid, &mut finder, x, y);
		actors.push(actor);
	}
	(grid, finder, actors)
}

/// Update every actor in turn
fn calc(grid: &mut TileGrid, finder: &mut PathFinder, actors: &mut [Pathfindable]) {
	for _ in 0..100 {
		for actor in actors.iter_mut() {
			actor.update_moves(grid, finder, black_box(1.0));
		}
	}
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(20);
	group.bench_function("update_moves_crowd", |b| {
		b.iter_batched(
			|| prepare_crowd(200),
			|(mut grid, mut finder, mut actors)| calc(&mut grid, &mut finder, &mut actors),
			BatchSize::LargeInput,
		)
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
