//! Logic relating to requesting journeys and driving each [Pathfindable]
//! along its [Path] every frame
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Ask an actor to travel to a tile
#[derive(Event)]
pub struct EventSetDestination {
	/// The actor
	entity: Entity,
	/// Where to go
	tile: TileCell,
}

impl EventSetDestination {
	/// Create a new instance of [EventSetDestination]
	#[cfg(not(tarpaulin_include))]
	pub fn new(entity: Entity, tile: TileCell) -> Self {
		EventSetDestination { entity, tile }
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

/// Ask an actor to stop once it reaches its next tile
#[derive(Event)]
pub struct EventStopMoves(pub Entity);

/// An actor has adopted a fresh path
#[derive(Event, Debug)]
pub struct EventStartedMoving {
	/// The actor
	pub entity: Entity,
	/// The destination of the path
	pub destination: TileCell,
}

/// An actor's path has ended, `tile` is where it stopped which may fall short
/// of the destination when the way was blocked
#[derive(Event, Debug)]
pub struct EventDestinationReached {
	/// The actor
	pub entity: Entity,
	/// The tile the actor stands on
	pub tile: TileCell,
}

/// Read [EventSetDestination] and start or redirect actors
#[cfg(not(tarpaulin_include))]
pub fn process_destination_requests(
	mut events: EventReader<EventSetDestination>,
	mut q_map: Query<(&TileGrid, &mut PathFinder)>,
	mut q_actors: Query<&mut Pathfindable>,
	mut event_started: EventWriter<EventStartedMoving>,
) {
	let Ok((grid, mut finder)) = q_map.single_mut() else {
		return;
	};
	for event in events.read() {
		let Ok(mut pathfindable) = q_actors.get_mut(event.get_entity()) else {
			error!("No Pathfindable found on {:?}", event.get_entity());
			continue;
		};
		let tile = event.get_tile();
		if pathfindable.set_destination(grid, &mut finder, tile.get_x(), tile.get_y()) {
			event_started.write(EventStartedMoving {
				entity: event.get_entity(),
				destination: tile,
			});
		}
	}
}

/// Read [EventStopMoves] and halt the actors
#[cfg(not(tarpaulin_include))]
pub fn process_stop_requests(
	mut events: EventReader<EventStopMoves>,
	mut q_actors: Query<&mut Pathfindable>,
) {
	for event in events.read() {
		if let Ok(mut pathfindable) = q_actors.get_mut(event.0) {
			pathfindable.stop_moves();
		}
	}
}

/// Move every actor following a path. Actors are updated one after another
/// so each sees the tiles claimed by those before it
#[cfg(not(tarpaulin_include))]
pub fn update_pathfindables(
	mut q_map: Query<(&mut TileGrid, &mut PathFinder)>,
	mut q_actors: Query<(Entity, &mut Pathfindable)>,
	settings: Res<PathfindingSettings>,
	time: Res<Time>,
	mut event_reached: EventWriter<EventDestinationReached>,
) {
	let Ok((mut grid, mut finder)) = q_map.single_mut() else {
		return;
	};
	let extrp = settings.get_extrapolation(time.delta_secs_f64());
	for (entity, mut pathfindable) in q_actors.iter_mut() {
		if !pathfindable.get_state().is_active() {
			continue;
		}
		match pathfindable.update_moves(&mut *grid, &mut finder, extrp) {
			MoveStatus::Arrived => {
				let tile = pathfindable.get_tile();
				trace!("{:?} arrived at {:?}", entity, tile);
				event_reached.write(EventDestinationReached { entity, tile });
			}
			MoveStatus::Moving | MoveStatus::Idle => {}
		}
	}
}

/// Copy the pixel position of each moved actor into its [Transform]
#[cfg(not(tarpaulin_include))]
pub fn sync_transforms(mut q_actors: Query<(&Pathfindable, &mut Transform), Changed<Pathfindable>>) {
	for (pathfindable, mut transform) in q_actors.iter_mut() {
		let position = pathfindable.get_world_position();
		transform.translation.x = position.x;
		transform.translation.y = position.y;
	}
}
