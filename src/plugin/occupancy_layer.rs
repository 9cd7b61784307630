//! Logic for putting actors onto the map, taking them off it and changing
//! the terrain underneath them
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Put an entity carrying a [Pathfindable] onto a tile, claiming its footprint
#[derive(Event)]
pub struct EventPlacePathfindable {
	/// The actor
	entity: Entity,
	/// Tile the actor stands on
	tile: TileCell,
}

impl EventPlacePathfindable {
	/// Create a new instance of [EventPlacePathfindable]
	#[cfg(not(tarpaulin_include))]
	pub fn new(entity: Entity, tile: TileCell) -> Self {
		EventPlacePathfindable { entity, tile }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_entity(&self) -> Entity {
		self.entity
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_tile(&self) -> TileCell {
		self.tile
	}
}

/// Release every tile owned by an actor, send before despawning it
#[derive(Event)]
pub struct EventRemovePathfindable(pub Entity);

/// Used to change the terrain cost of a tile in the [TileGrid]
#[derive(Event)]
pub struct EventUpdateTileCost {
	/// Tile to update
	tile: TileCell,
	/// The cost the tile should be assigned
	cost: u8,
}

impl EventUpdateTileCost {
	/// Create a new instance of [EventUpdateTileCost]
	#[cfg(not(tarpaulin_include))]
	pub fn new(tile: TileCell, cost: u8) -> Self {
		EventUpdateTileCost { tile, cost }
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_tile(&self) -> TileCell {
		self.tile
	}
	#[cfg(not(tarpaulin_include))]
	pub fn get_cost(&self) -> u8 {
		self.cost
	}
}

/// Read [EventPlacePathfindable] and claim the footprint of each actor
#[cfg(not(tarpaulin_include))]
pub fn place_pathfindables(
	mut events: EventReader<EventPlacePathfindable>,
	mut q_map: Query<&mut TileGrid>,
	mut q_actors: Query<&mut Pathfindable>,
) {
	let Ok(mut grid) = q_map.single_mut() else {
		return;
	};
	for event in events.read() {
		match q_actors.get_mut(event.get_entity()) {
			Ok(mut pathfindable) => {
				if !pathfindable.place(&mut *grid, event.get_tile()) {
					error!(
						"Cannot place {:?} on {:?}, outside of the map or already taken",
						event.get_entity(),
						event.get_tile()
					);
				}
			}
			Err(e) => error!("Cannot place {:?}: {}", event.get_entity(), e),
		}
	}
}

/// Read [EventRemovePathfindable] and release the tiles owned by each actor
#[cfg(not(tarpaulin_include))]
pub fn remove_pathfindables(
	mut events: EventReader<EventRemovePathfindable>,
	mut q_map: Query<&mut TileGrid>,
	mut q_actors: Query<&mut Pathfindable>,
) {
	let Ok(mut grid) = q_map.single_mut() else {
		return;
	};
	for event in events.read() {
		if let Ok(mut pathfindable) = q_actors.get_mut(event.0) {
			pathfindable.remove(&mut *grid);
		}
	}
}

/// Read [EventUpdateTileCost], update the [TileGrid] and have every actor
/// whose path crosses an updated tile check its path again
#[cfg(not(tarpaulin_include))]
pub fn process_tile_cost_updates(
	mut events: EventReader<EventUpdateTileCost>,
	mut q_map: Query<&mut TileGrid>,
	mut q_actors: Query<&mut Pathfindable>,
) {
	let Ok(mut grid) = q_map.single_mut() else {
		return;
	};
	// coalesce events so each tile only holds its latest cost
	let mut updated = Vec::new();
	for event in events.read() {
		let tile = event.get_tile();
		if !grid.is_within(tile.get_x(), tile.get_y()) {
			error!("Tile cost update for {:?} is outside of the map", tile);
			continue;
		}
		grid.set_tile_cost(tile, event.get_cost());
		if !updated.contains(&tile) {
			updated.push(tile);
		}
	}
	if updated.is_empty() {
		return;
	}
	debug!("Updated cost of {} tiles", updated.len());
	for mut pathfindable in q_actors.iter_mut() {
		if updated.iter().any(|tile| pathfindable.is_path_crossing(*tile)) {
			pathfindable.request_recheck();
		}
	}
}
