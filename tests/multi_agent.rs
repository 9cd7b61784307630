//! Drive several actors across one map and check they never share a tile
//!

use bevy_pathfindable_tiles_plugin::prelude::*;

/// Every actor owns exactly the footprint anchored at the tile it reports and nothing else
fn assert_exclusive_ownership(grid: &TileGrid, actors: &[Pathfindable]) {
	for actor in actors {
		let tile = actor.get_tile();
		let (w, h) = actor.get_tile_footprint();
		for y in tile.get_y()..tile.get_y() + h as i32 {
			for x in tile.get_x()..tile.get_x() + w as i32 {
				assert_eq!(
					actor.get_id(),
					grid.get_ref(x, y),
					"actor {} standing on {:?} does not own ({}, {})",
					actor.get_id(),
					tile,
					x,
					y
				);
			}
		}
		assert_eq!((w * h) as usize, grid.count_refs(actor.get_id()));
	}
	let owned: usize = actors.iter().map(|a| grid.count_refs(a.get_id())).sum();
	let expected: usize = actors
		.iter()
		.map(|a| {
			let (w, h) = a.get_tile_footprint();
			(w * h) as usize
		})
		.sum();
	assert_eq!(expected, owned);
}

/// Update every actor in turn until all of them are idle, checking ownership after each tick
fn run_until_idle(grid: &mut TileGrid, finder: &mut PathFinder, actors: &mut [Pathfindable]) -> usize {
	for tick in 0..50_000 {
		if actors.iter().all(|a| !a.is_moving()) {
			return tick;
		}
		for actor in actors.iter_mut() {
			actor.update_moves(grid, finder, 1.0);
		}
		assert_exclusive_ownership(grid, actors);
	}
	panic!("actors never came to rest");
}

#[test]
fn crowd_never_shares_tiles() {
	let dimensions = MapDimensions::new(20, 20, 16, 16);
	let mut grid = TileGrid::from_dimensions(&dimensions);
	let mut finder = PathFinder::with_defaults(&dimensions);
	let mut actors = Vec::new();
	// a column of walkers heading down
	for x in 2..10 {
		let mut actor = Pathfindable::new(x + 1, &dimensions, (16, 16), (4.0, 4.0));
		actor.place(&mut grid, TileCell::new(x, 0));
		actors.push(actor);
	}
	// one walker crossing through them
	let mut crosser = Pathfindable::new(100, &dimensions, (16, 16), (4.0, 4.0));
	crosser.place(&mut grid, TileCell::new(0, 10));
	actors.push(crosser);
	assert_exclusive_ownership(&grid, &actors);

	for actor in actors.iter_mut() {
		let destination = if actor.get_id() == 100 {
			TileCell::new(19, 10)
		} else {
			TileCell::new(actor.get_tile().get_x(), 19)
		};
		assert!(actor.set_destination(&grid, &mut finder, destination.get_x(), destination.get_y()));
	}
	run_until_idle(&mut grid, &mut finder, &mut actors);
	for actor in actors.iter() {
		assert!(actor.is_destination_reached());
	}
}

#[test]
fn crossing_actors_both_arrive() {
	let dimensions = MapDimensions::new(10, 10, 16, 16);
	let mut grid = TileGrid::from_dimensions(&dimensions);
	let mut finder = PathFinder::with_defaults(&dimensions);
	let mut across = Pathfindable::new(1, &dimensions, (16, 16), (4.0, 4.0));
	across.place(&mut grid, TileCell::new(0, 5));
	let mut down = Pathfindable::new(2, &dimensions, (16, 16), (4.0, 4.0));
	down.place(&mut grid, TileCell::new(5, 0));
	assert!(across.set_destination(&grid, &mut finder, 9, 5));
	assert!(down.set_destination(&grid, &mut finder, 5, 9));
	let mut actors = vec![across, down];
	run_until_idle(&mut grid, &mut finder, &mut actors);
	assert_eq!(TileCell::new(9, 5), actors[0].get_tile());
	assert_eq!(TileCell::new(5, 9), actors[1].get_tile());
}

#[test]
fn idle_actor_is_walked_around() {
	let dimensions = MapDimensions::new(5, 5, 16, 16);
	let mut grid = TileGrid::from_dimensions(&dimensions);
	let mut finder = PathFinder::with_defaults(&dimensions);
	let mut holder = Pathfindable::new(1, &dimensions, (16, 16), (4.0, 4.0));
	holder.place(&mut grid, TileCell::new(2, 2));
	let mut walker = Pathfindable::new(2, &dimensions, (16, 16), (4.0, 4.0));
	walker.place(&mut grid, TileCell::new(0, 0));
	assert!(walker.set_destination(&grid, &mut finder, 4, 4));
	let mut rerouted = false;
	for _ in 0..10_000 {
		let status = walker.update_moves(&mut grid, &mut finder, 1.0);
		if let Some(path) = walker.get_path() {
			if !path.contains(2, 2) {
				rerouted = true;
			}
			if rerouted {
				assert!(!path.contains(2, 2));
			}
		}
		assert_ne!(TileCell::new(2, 2), walker.get_tile());
		if status == MoveStatus::Arrived {
			break;
		}
	}
	assert!(rerouted);
	assert_eq!(TileCell::new(4, 4), walker.get_tile());
	assert_eq!(1, grid.get_ref(2, 2));
}

#[test]
fn corridor_standoff_settles() {
	let dimensions = MapDimensions::new(7, 3, 16, 16);
	let mut grid = TileGrid::from_dimensions(&dimensions);
	// a one tile wide corridor along the middle row
	for x in 0..7 {
		grid.set_tile_cost(TileCell::new(x, 0), IMPASSABLE_COST);
		grid.set_tile_cost(TileCell::new(x, 2), IMPASSABLE_COST);
	}
	let mut finder = PathFinder::with_defaults(&dimensions);
	let mut left = Pathfindable::new(1, &dimensions, (16, 16), (4.0, 4.0));
	left.place(&mut grid, TileCell::new(0, 1));
	let mut right = Pathfindable::new(2, &dimensions, (16, 16), (4.0, 4.0));
	right.place(&mut grid, TileCell::new(6, 1));
	assert!(left.set_destination(&grid, &mut finder, 6, 1));
	assert!(right.set_destination(&grid, &mut finder, 0, 1));
	let mut actors = vec![left, right];
	run_until_idle(&mut grid, &mut finder, &mut actors);
	// neither can pass, both give up facing each other
	let left_x = actors[0].get_tile().get_x();
	let right_x = actors[1].get_tile().get_x();
	assert!(left_x < right_x);
}

#[test]
fn large_footprints_cross() {
	let dimensions = MapDimensions::new(12, 12, 16, 16);
	let mut grid = TileGrid::from_dimensions(&dimensions);
	let mut finder = PathFinder::with_defaults(&dimensions);
	// 2x2 actors whose routes overlap around (5, 5)
	let mut across = Pathfindable::new(1, &dimensions, (32, 32), (4.0, 4.0));
	assert!(across.place(&mut grid, TileCell::new(0, 5)));
	let mut down = Pathfindable::new(2, &dimensions, (32, 32), (4.0, 4.0));
	assert!(down.place(&mut grid, TileCell::new(5, 0)));
	assert!(across.set_destination(&grid, &mut finder, 10, 5));
	assert!(down.set_destination(&grid, &mut finder, 5, 10));
	let mut actors = vec![across, down];
	assert_exclusive_ownership(&grid, &actors);
	run_until_idle(&mut grid, &mut finder, &mut actors);
	assert_eq!(TileCell::new(10, 5), actors[0].get_tile());
	assert_eq!(TileCell::new(5, 10), actors[1].get_tile());
	assert_eq!(8, grid.count_refs(1) + grid.count_refs(2));
}
