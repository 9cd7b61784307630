//! The map is the surface a search is run against. It answers whether a tile
//! blocks a particular [Mover], how expensive moving onto a tile is and which
//! mover currently owns a tile.
//!
//! Ownership of tiles is recorded in an occupancy grid of ids, one per tile,
//! where `0` means the tile is free:
//!
//! ```text
//!  _______________________
//! |  0  |  0  |  0  |  0  |
//! |_____|_____|_____|_____|
//! |  0  |  7  |  7  |  0  |   <- mover 7 has a 2x2 footprint
//! |_____|_____|_____|_____|
//! |  0  |  7  |  7  |  0  |
//! |_____|_____|_____|_____|
//! |  3  |  0  |  0  |  0  |   <- mover 3 has a 1x1 footprint
//! |_____|_____|_____|_____|
//! ```
//!
//! Movers claim the footprint of a tile before moving onto it and release
//! the footprint they leave, see [crate::prelude::Pathfindable].
//!

pub mod error;
pub mod tile_grid;

use crate::prelude::*;
use bevy::prelude::*;

/// Occupancy id of a free tile
pub const FREE_TILE: i32 = 0;

/// Anything that can be moved across a [TileMap]. Blocking and cost queries
/// receive the mover so that they can depend on its size or abilities
pub trait Mover {
	/// The id written into the occupancy grid for tiles this mover claims
	fn get_occupancy_id(&self) -> i32;
	/// Number of tiles `(width, height)` covered by the mover, anchored at its top left tile
	fn get_tile_footprint(&self) -> (u32, u32);
	/// Whether tiles claimed by `id` can be moved through
	fn is_ignored_id(&self, id: i32) -> bool;
	/// Whether a tile of terrain `cost` can be entered at all
	fn can_traverse(&self, cost: u8) -> bool {
		cost != IMPASSABLE_COST
	}
	/// Cost of entering a tile of terrain `cost`
	fn get_movement_cost(&self, cost: u8) -> f64 {
		cost as f64
	}
}

/// The queries a search and a [crate::prelude::Pathfindable] make of a map
pub trait TileMap {
	/// Number of tiles along `x`
	fn get_width_in_tile(&self) -> u32;
	/// Number of tiles along `y`
	fn get_height_in_tile(&self) -> u32;
	/// Whether the footprint of `mover` anchored at `(x, y)` cannot be entered.
	/// When `ignore_ref` is set tiles owned by other movers don't block
	fn is_blocked(&self, mover: &dyn Mover, x: i32, y: i32, ignore_ref: bool) -> bool;
	/// Cost for `mover` to move from `(sx, sy)` onto `(dx, dy)`
	fn get_cost(&self, mover: &dyn Mover, sx: i32, sy: i32, dx: i32, dy: i32) -> f64;
	/// Occupancy id of a tile, tiles outside the map report [FREE_TILE]
	fn get_ref(&self, x: i32, y: i32) -> i32;
	/// Write the occupancy id of a tile, writes outside the map are ignored
	fn set_ref(&mut self, x: i32, y: i32, id: i32);
	/// Whether every tile of the `w` by `h` area at `(x, y)` is inside the
	/// map and either free or owned by `ignore_id`
	fn is_area_available(&self, x: i32, y: i32, w: u32, h: u32, ignore_id: i32) -> bool;
	/// Find the tile closest to `destination` within `radius` which `mover`
	/// could stand on, preferring tiles facing back towards `start`
	fn get_closest_available_tile(
		&self,
		mover: &dyn Mover,
		start: TileCell,
		radius: u32,
		destination: TileCell,
	) -> Option<TileCell>;
	/// Whether the tile sits inside the map
	fn is_within(&self, x: i32, y: i32) -> bool {
		TileCell::new(x, y).is_within(self.get_width_in_tile(), self.get_height_in_tile())
	}
}

/// The size of the map in tiles and the pixel size of a single tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MapDimensions {
	/// Number of tiles `(x, y)`
	size_in_tile: (u32, u32),
	/// Pixel `(width, height)` of a tile
	tile_size: (u32, u32),
}

impl Default for MapDimensions {
	fn default() -> Self {
		MapDimensions {
			size_in_tile: (1, 1),
			tile_size: (1, 1),
		}
	}
}

impl MapDimensions {
	/// Create a new instance of [MapDimensions]. A map with no tiles or tiles
	/// with no area is a programming error
	pub fn new(width_in_tile: u32, height_in_tile: u32, tile_width: u32, tile_height: u32) -> Self {
		if width_in_tile == 0 || height_in_tile == 0 {
			panic!(
				"Map dimensions `({}, {})` are invalid, a map needs at least one tile",
				width_in_tile, height_in_tile
			);
		}
		if tile_width == 0 || tile_height == 0 {
			panic!(
				"Tile size `({}, {})` is invalid, tiles must be at least one pixel",
				tile_width, tile_height
			);
		}
		MapDimensions {
			size_in_tile: (width_in_tile, height_in_tile),
			tile_size: (tile_width, tile_height),
		}
	}
	pub fn get_width_in_tile(&self) -> u32 {
		self.size_in_tile.0
	}
	pub fn get_height_in_tile(&self) -> u32 {
		self.size_in_tile.1
	}
	pub fn get_tile_width(&self) -> u32 {
		self.tile_size.0
	}
	pub fn get_tile_height(&self) -> u32 {
		self.tile_size.1
	}
	/// Total pixel `(width, height)` of the map
	pub fn get_pixel_size(&self) -> (u32, u32) {
		(
			self.get_width_in_tile() * self.get_tile_width(),
			self.get_height_in_tile() * self.get_tile_height(),
		)
	}
	/// Pixel position of the top left corner of a tile. Pixel space has its
	/// origin in the top left corner of the map with `y` growing down the rows
	pub fn get_pixel_from_tile(&self, tile: TileCell) -> (f64, f64) {
		(
			tile.get_x() as f64 * self.get_tile_width() as f64,
			tile.get_y() as f64 * self.get_tile_height() as f64,
		)
	}
	/// The tile a pixel position lies in, may be outside of the map
	pub fn get_tile_from_pixel(&self, x: f64, y: f64) -> TileCell {
		TileCell::new(
			(x / self.get_tile_width() as f64).floor() as i32,
			(y / self.get_tile_height() as f64).floor() as i32,
		)
	}
	/// Number of tiles covered by something of `width` by `height` pixels, at least one tile each way
	pub fn get_footprint_from_size(&self, width: u32, height: u32) -> (u32, u32) {
		(
			width.div_ceil(self.get_tile_width()).max(1),
			height.div_ceil(self.get_tile_height()).max(1),
		)
	}
	/// Convert a pixel position with a tile `footprint` into a 2d world
	/// position. The map is centred on the world origin with `y` pointing up,
	/// the returned point is the centre of the footprint
	pub fn get_xy_from_pixel(&self, x: f64, y: f64, footprint: (u32, u32)) -> Vec2 {
		let (length, depth) = self.get_pixel_size();
		let half_w = (footprint.0 * self.get_tile_width()) as f64 / 2.0;
		let half_h = (footprint.1 * self.get_tile_height()) as f64 / 2.0;
		let world_x = x + half_w - length as f64 / 2.0;
		let world_y = depth as f64 / 2.0 - (y + half_h);
		Vec2::new(world_x as f32, world_y as f32)
	}
	/// Convert a 2d world position into the tile it lies over, [None] when
	/// outside of the map
	pub fn get_tile_from_xy(&self, position: Vec2) -> Option<TileCell> {
		let (length, depth) = self.get_pixel_size();
		let x = position.x as f64 + length as f64 / 2.0;
		let y = depth as f64 / 2.0 - position.y as f64;
		let tile = self.get_tile_from_pixel(x, y);
		if tile.is_within(self.get_width_in_tile(), self.get_height_in_tile()) {
			Some(tile)
		} else {
			debug!(
				"Position x {}, y {} is out of bounds of MapDimensions",
				position.x, position.y
			);
			None
		}
	}
}
