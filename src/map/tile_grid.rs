//! The [TileGrid] is the map implementation shipped with the plugin. It
//! holds two 2D arrays, a cost per tile and an occupancy id per tile.
//!
//! The cost of a tile works like a terrain weighting. A value of `1` is the
//! default, a value of `255` is a special case that indicates the tile is
//! strictly forbidden (a wall or cliff), any other value is harder terrain
//! a search will try to avoid:
//!
//! ```text
//!  _______________________________
//! |     |     |     |     |     |
//! |  1  |  1  |  1  |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  1  | 255 | 255 |  1  |  1  |
//! |_____|_____|_____|_____|_____|
//! |     |     |     |     |     |
//! |  1  |  1  | 40  | 40  |  1  |
//! |_____|_____|_____|_____|_____|
//! ```
//!

use bevy::prelude::*;

use crate::prelude::*;

/// Cost and occupancy of every tile of a map
#[derive(Component, Clone, Debug, PartialEq)]
pub struct TileGrid {
	/// Number of tiles along `x`
	width: u32,
	/// Number of tiles along `y`
	height: u32,
	/// Terrain cost of each tile, indexed `y * width + x`
	costs: Vec<u8>,
	/// Occupancy id of each tile, indexed `y * width + x`
	refs: Vec<i32>,
}

impl TileGrid {
	/// Create a new instance of [TileGrid] where every tile has the default
	/// cost and is unclaimed
	pub fn new(width: u32, height: u32) -> Self {
		if width == 0 || height == 0 {
			panic!(
				"TileGrid dimensions `({}, {})` are invalid, a map needs at least one tile",
				width, height
			);
		}
		let count = (width * height) as usize;
		TileGrid {
			width,
			height,
			costs: vec![DEFAULT_COST; count],
			refs: vec![FREE_TILE; count],
		}
	}
	/// Create a [TileGrid] sized by [MapDimensions]
	pub fn from_dimensions(map_dimensions: &MapDimensions) -> Self {
		TileGrid::new(
			map_dimensions.get_width_in_tile(),
			map_dimensions.get_height_in_tile(),
		)
	}
	/// Build a [TileGrid] from rows of tile costs, the first row is the top of the map
	pub fn from_rows(rows: &[Vec<u8>]) -> MapLoadResult<Self> {
		let Some(first) = rows.first() else {
			return Err(MapLoadError::Empty);
		};
		if first.is_empty() {
			return Err(MapLoadError::Empty);
		}
		let width = first.len();
		for (row, values) in rows.iter().enumerate() {
			if values.len() != width {
				return Err(MapLoadError::RaggedRow {
					expected: width,
					found: values.len(),
					row,
				});
			}
		}
		let mut grid = TileGrid::new(width as u32, rows.len() as u32);
		for (y, values) in rows.iter().enumerate() {
			for (x, value) in values.iter().enumerate() {
				grid.set_tile_cost(TileCell::new(x as i32, y as i32), *value);
			}
		}
		Ok(grid)
	}
	/// Get the costs as rows, the inverse of [TileGrid::from_rows]
	pub fn get_rows(&self) -> Vec<Vec<u8>> {
		self.costs
			.chunks(self.width as usize)
			.map(|row| row.to_vec())
			.collect()
	}
	/// Ensure the grid is the size described by `map_dimensions`
	pub fn check_dimensions(&self, map_dimensions: &MapDimensions) -> MapLoadResult<()> {
		if self.width != map_dimensions.get_width_in_tile()
			|| self.height != map_dimensions.get_height_in_tile()
		{
			return Err(MapLoadError::DimensionMismatch {
				width: self.width,
				height: self.height,
				expected_width: map_dimensions.get_width_in_tile(),
				expected_height: map_dimensions.get_height_in_tile(),
			});
		}
		Ok(())
	}
	/// Index of a tile within the arrays, [None] when outside of the map
	fn get_index(&self, x: i32, y: i32) -> Option<usize> {
		if TileCell::new(x, y).is_within(self.width, self.height) {
			Some(y as usize * self.width as usize + x as usize)
		} else {
			None
		}
	}
	/// Get the terrain cost of a tile, tiles outside the map are impassable
	pub fn get_tile_cost(&self, tile: TileCell) -> u8 {
		match self.get_index(tile.get_x(), tile.get_y()) {
			Some(i) => self.costs[i],
			None => IMPASSABLE_COST,
		}
	}
	/// Set the terrain cost of a tile. Panics if the tile is outside of the map
	pub fn set_tile_cost(&mut self, tile: TileCell, cost: u8) {
		match self.get_index(tile.get_x(), tile.get_y()) {
			Some(i) => self.costs[i] = cost,
			None => panic!(
				"Cannot set a TileGrid cost, index out of bounds. Asked for {:?}, grid is {}x{}",
				tile, self.width, self.height
			),
		}
	}
	/// Release every claimed tile
	pub fn clear_refs(&mut self) {
		self.refs.iter_mut().for_each(|r| *r = FREE_TILE);
	}
	/// Number of tiles currently claimed by `id`
	pub fn count_refs(&self, id: i32) -> usize {
		self.refs.iter().filter(|r| **r == id).count()
	}
	/// Whether a single tile would block `mover`
	fn is_tile_blocked(&self, mover: &dyn Mover, x: i32, y: i32, ignore_ref: bool) -> bool {
		let Some(i) = self.get_index(x, y) else {
			return true;
		};
		if !mover.can_traverse(self.costs[i]) {
			return true;
		}
		if ignore_ref {
			return false;
		}
		let id = self.refs[i];
		id != FREE_TILE && id != mover.get_occupancy_id() && !mover.is_ignored_id(id)
	}
	/// From a `ron` file of rows of tile costs generate the [TileGrid]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> MapLoadResult<Self> {
		let file = std::fs::File::open(path)?;
		let rows: Vec<Vec<u8>> = ron::de::from_reader(file)?;
		TileGrid::from_rows(&rows)
	}
	/// From a CSV file where each record is a row of tile costs generate the [TileGrid]
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> MapLoadResult<Self> {
		let data = std::fs::File::open(path)?;
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(data);
		let mut rows = Vec::new();
		for (row, record) in rdr.records().enumerate() {
			let record = record?;
			let mut values = Vec::new();
			for (column, value) in record.iter().enumerate() {
				let value_u8: u8 =
					value
						.trim()
						.parse()
						.map_err(|_| MapLoadError::InvalidCost {
							value: value.to_string(),
							column,
							row,
						})?;
				values.push(value_u8);
			}
			rows.push(values);
		}
		TileGrid::from_rows(&rows)
	}
	/// Create a [TileGrid] from a greyscale image where each pixel represents
	/// the cost of a tile. Black is impassable, white is the default cost
	#[cfg(feature = "heightmap")]
	pub fn from_heightmap(path: &str) -> MapLoadResult<Self> {
		use photon_rs::native::open_image;
		let img = open_image(path).map_err(|e| MapLoadError::Heightmap(e.to_string()))?;
		let img_width = img.get_width();
		let img_height = img.get_height();
		if img_width == 0 || img_height == 0 {
			return Err(MapLoadError::Empty);
		}
		// raw pixels come in sets of 4 from the top left of the image, Red, Green, Blue, Alpha
		let raw_pixels = img.get_raw_pixels();
		let len_if_alpha = (img_width * img_height * 4) as usize;
		let chunk_size = if len_if_alpha == raw_pixels.len() {
			4
		} else {
			3
		};
		let mut rows = Vec::with_capacity(img_height as usize);
		for line in raw_pixels.chunks(chunk_size * img_width as usize) {
			let mut values = Vec::with_capacity(img_width as usize);
			for px in line.chunks(chunk_size) {
				// careful of u8 overflow
				let colour_avg = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
				values.push((255 - colour_avg as u8).clamp(DEFAULT_COST, IMPASSABLE_COST));
			}
			rows.push(values);
		}
		TileGrid::from_rows(&rows)
	}
}

impl TileMap for TileGrid {
	fn get_width_in_tile(&self) -> u32 {
		self.width
	}
	fn get_height_in_tile(&self) -> u32 {
		self.height
	}
	fn is_blocked(&self, mover: &dyn Mover, x: i32, y: i32, ignore_ref: bool) -> bool {
		let (w, h) = mover.get_tile_footprint();
		for ty in y..y + h as i32 {
			for tx in x..x + w as i32 {
				if self.is_tile_blocked(mover, tx, ty, ignore_ref) {
					return true;
				}
			}
		}
		false
	}
	fn get_cost(&self, mover: &dyn Mover, _sx: i32, _sy: i32, dx: i32, dy: i32) -> f64 {
		mover.get_movement_cost(self.get_tile_cost(TileCell::new(dx, dy)))
	}
	fn get_ref(&self, x: i32, y: i32) -> i32 {
		match self.get_index(x, y) {
			Some(i) => self.refs[i],
			None => FREE_TILE,
		}
	}
	fn set_ref(&mut self, x: i32, y: i32, id: i32) {
		if let Some(i) = self.get_index(x, y) {
			self.refs[i] = id;
		} else {
			trace!("Ignoring occupancy write outside of the map at ({}, {})", x, y);
		}
	}
	fn is_area_available(&self, x: i32, y: i32, w: u32, h: u32, ignore_id: i32) -> bool {
		for ty in y..y + h as i32 {
			for tx in x..x + w as i32 {
				let Some(i) = self.get_index(tx, ty) else {
					return false;
				};
				let id = self.refs[i];
				if id != FREE_TILE && id != ignore_id {
					return false;
				}
			}
		}
		true
	}
	fn get_closest_available_tile(
		&self,
		mover: &dyn Mover,
		start: TileCell,
		radius: u32,
		destination: TileCell,
	) -> Option<TileCell> {
		let distance_to_start = |tile: TileCell| {
			let dx = (tile.get_x() - start.get_x()) as i64;
			let dy = (tile.get_y() - start.get_y()) as i64;
			dx * dx + dy * dy
		};
		// walk square rings around the destination, the first ring holding
		// a free tile wins and within it the tile nearest the start
		for r in 0..=radius as i32 {
			let mut best: Option<(i64, TileCell)> = None;
			for y in destination.get_y() - r..=destination.get_y() + r {
				for x in destination.get_x() - r..=destination.get_x() + r {
					let tile = TileCell::new(x, y);
					if chebyshev_distance(tile, destination) != r {
						continue;
					}
					if self.is_blocked(mover, x, y, false) {
						continue;
					}
					let d = distance_to_start(tile);
					if best.is_none_or(|(best_d, _)| d < best_d) {
						best = Some((d, tile));
					}
				}
			}
			if let Some((_, tile)) = best {
				return Some(tile);
			}
		}
		None
	}
}
