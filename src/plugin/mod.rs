//! Defines the Bevy [Plugin] for PathfindableTiles
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod movement_layer;
pub mod occupancy_layer;

/// Order in which the systems of the plugin run within a frame
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Map and occupancy changes
	Tidy,
	/// Journey requests
	Calculate,
	/// Driving actors along their paths
	Move,
}

/// Moves every [Pathfindable] across the [TileGrid] of a spawned [TileMapBundle]
pub struct PathfindablePlugin;

impl Plugin for PathfindablePlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<TileCell>()
			.register_type::<MapDimensions>()
			.register_type::<MoveState>()
			.register_type::<PathFinderConfig>()
			.register_type::<PathfindingSettings>()
			.init_resource::<PathfindingSettings>()
			.add_event::<occupancy_layer::EventPlacePathfindable>()
			.add_event::<occupancy_layer::EventRemovePathfindable>()
			.add_event::<occupancy_layer::EventUpdateTileCost>()
			.add_event::<movement_layer::EventSetDestination>()
			.add_event::<movement_layer::EventStopMoves>()
			.add_event::<movement_layer::EventStartedMoving>()
			.add_event::<movement_layer::EventDestinationReached>()
			.configure_sets(
				Update,
				(
					OrderingSet::Tidy,
					OrderingSet::Calculate,
					OrderingSet::Move,
				)
					.chain(),
			)
			.add_systems(
				Update,
				(
					(
						occupancy_layer::remove_pathfindables,
						occupancy_layer::place_pathfindables,
						occupancy_layer::process_tile_cost_updates,
					)
						.chain()
						.in_set(OrderingSet::Tidy),
					(
						movement_layer::process_stop_requests,
						movement_layer::process_destination_requests,
					)
						.chain()
						.in_set(OrderingSet::Calculate),
					(
						movement_layer::update_pathfindables,
						movement_layer::sync_transforms,
					)
						.chain()
						.in_set(OrderingSet::Move),
				),
			);
	}
}
