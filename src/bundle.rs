//! Spawning a [TileMapBundle] gives the plugin a map to move actors across
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Everything the plugin needs to know about a map
#[derive(Bundle)]
pub struct TileMapBundle {
	/// Size of the map and its tiles
	map_dimensions: MapDimensions,
	/// Terrain costs and occupancy of each tile
	tile_grid: TileGrid,
	/// Search state reused by every request on this map
	path_finder: PathFinder,
}

impl TileMapBundle {
	/// Create a new instance of [TileMapBundle] of `width` by `height` tiles,
	/// each `tile_width` by `tile_height` pixels, with every tile at the default cost
	pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
		let map_dimensions = MapDimensions::new(width, height, tile_width, tile_height);
		let tile_grid = TileGrid::from_dimensions(&map_dimensions);
		let path_finder = PathFinder::with_defaults(&map_dimensions);
		TileMapBundle {
			map_dimensions,
			tile_grid,
			path_finder,
		}
	}
	/// Create a [TileMapBundle] from an existing [TileGrid] and search `config`
	pub fn from_tile_grid(
		tile_grid: TileGrid,
		tile_width: u32,
		tile_height: u32,
		config: PathFinderConfig,
	) -> Self {
		let map_dimensions = MapDimensions::new(
			tile_grid.get_width_in_tile(),
			tile_grid.get_height_in_tile(),
			tile_width,
			tile_height,
		);
		let path_finder = PathFinder::new(&map_dimensions, config, Box::new(ClosestHeuristic));
		TileMapBundle {
			map_dimensions,
			tile_grid,
			path_finder,
		}
	}
	/// Create a [TileMapBundle] where the [TileGrid] is read from a `ron` file
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str, tile_width: u32, tile_height: u32) -> MapLoadResult<Self> {
		let tile_grid = TileGrid::from_ron(path)?;
		Ok(TileMapBundle::from_tile_grid(
			tile_grid,
			tile_width,
			tile_height,
			PathFinderConfig::default(),
		))
	}
	/// Create a [TileMapBundle] where the [TileGrid] is read from a `csv` file
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str, tile_width: u32, tile_height: u32) -> MapLoadResult<Self> {
		let tile_grid = TileGrid::from_csv(path)?;
		Ok(TileMapBundle::from_tile_grid(
			tile_grid,
			tile_width,
			tile_height,
			PathFinderConfig::default(),
		))
	}
	pub fn get_map_dimensions(&self) -> &MapDimensions {
		&self.map_dimensions
	}
	pub fn get_tile_grid(&self) -> &TileGrid {
		&self.tile_grid
	}
	pub fn get_path_finder(&self) -> &PathFinder {
		&self.path_finder
	}
}
