//! Useful structures and tools used by the search and the movers
//!

use bevy::prelude::*;

/// Cost value marking a tile as impassable
pub const IMPASSABLE_COST: u8 = 255;
/// Cost value of a tile that has not been given any special terrain
pub const DEFAULT_COST: u8 = 1;
/// When a mover travels along both axes at once each axis is scaled by this
/// factor so that a diagonal step takes roughly as long as an orthogonal one
pub const DIAGONAL_SPEED_FACTOR: f64 = 0.8;

/// ID of a tile within a map, `(x, y)` with `(0, 0)` being the top left tile
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct TileCell((i32, i32));

impl TileCell {
	/// Create a new instance of [TileCell]
	pub fn new(x: i32, y: i32) -> Self {
		TileCell((x, y))
	}
	/// Get the `(x, y)` tuple
	pub fn get_xy(&self) -> (i32, i32) {
		self.0
	}
	/// Get the tile column
	pub fn get_x(&self) -> i32 {
		self.0 .0
	}
	/// Get the tile row
	pub fn get_y(&self) -> i32 {
		self.0 .1
	}
	/// Whether the tile sits inside a map of `width` by `height` tiles
	pub fn is_within(&self, width: u32, height: u32) -> bool {
		self.get_x() >= 0
			&& self.get_y() >= 0
			&& (self.get_x() as u32) < width
			&& (self.get_y() as u32) < height
	}
	/// Get the tile offset by an [Ordinal], the result may sit outside of the map
	pub fn step(&self, ordinal: Ordinal) -> TileCell {
		let (ox, oy) = ordinal.get_offset();
		TileCell::new(self.get_x() + ox, self.get_y() + oy)
	}
}

/// Number of moves between two tiles when diagonal movement is allowed
pub fn chebyshev_distance(a: TileCell, b: TileCell) -> i32 {
	(a.get_x() - b.get_x())
		.abs()
		.max((a.get_y() - b.get_y()).abs())
}

/// The 8 directions of movement between neighbouring tiles
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
}

impl Ordinal {
	/// Orthogonal directions, always explored first
	pub const ORTHOGONAL: [Ordinal; 4] = [
		Ordinal::North,
		Ordinal::East,
		Ordinal::South,
		Ordinal::West,
	];
	/// Diagonal directions, explored when diagonal movement is enabled
	pub const DIAGONAL: [Ordinal; 4] = [
		Ordinal::NorthEast,
		Ordinal::SouthEast,
		Ordinal::SouthWest,
		Ordinal::NorthWest,
	];
	/// Get the `(x, y)` tile offset of the direction. Rows grow southwards
	pub fn get_offset(&self) -> (i32, i32) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthWest => (-1, -1),
		}
	}
	/// Whether moving in this direction changes both axes
	pub fn is_diagonal(&self) -> bool {
		Ordinal::DIAGONAL.contains(self)
	}
	/// Returns the opposite [Ordinal] of the current
	pub fn inverse(&self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
			Ordinal::NorthEast => Ordinal::SouthWest,
			Ordinal::SouthEast => Ordinal::NorthWest,
			Ordinal::SouthWest => Ordinal::NorthEast,
			Ordinal::NorthWest => Ordinal::SouthEast,
		}
	}
	/// Based on a tile find its neighbours inside a `width` by `height` map,
	/// orthogonal neighbours come first followed by diagonals when `allow_diagonal` is set
	pub fn get_tile_neighbours(
		cell: TileCell,
		width: u32,
		height: u32,
		allow_diagonal: bool,
	) -> Vec<(Ordinal, TileCell)> {
		let mut neighbours = Vec::with_capacity(8);
		for ordinal in Ordinal::ORTHOGONAL.iter() {
			let n = cell.step(*ordinal);
			if n.is_within(width, height) {
				neighbours.push((*ordinal, n));
			}
		}
		if allow_diagonal {
			for ordinal in Ordinal::DIAGONAL.iter() {
				let n = cell.step(*ordinal);
				if n.is_within(width, height) {
					neighbours.push((*ordinal, n));
				}
			}
		}
		neighbours
	}
	/// For two tiles next to each other find the [Ordinal] pointing from the
	/// `source` to the `target`, [None] if they are not adjacent
	pub fn cell_to_cell_direction(target: TileCell, source: TileCell) -> Option<Self> {
		let direction = (
			target.get_x() - source.get_x(),
			target.get_y() - source.get_y(),
		);
		match direction {
			(0, -1) => Some(Ordinal::North),
			(1, -1) => Some(Ordinal::NorthEast),
			(1, 0) => Some(Ordinal::East),
			(1, 1) => Some(Ordinal::SouthEast),
			(0, 1) => Some(Ordinal::South),
			(-1, 1) => Some(Ordinal::SouthWest),
			(-1, 0) => Some(Ordinal::West),
			(-1, -1) => Some(Ordinal::NorthWest),
			_ => {
				trace!("Tile {:?} is not adjacent to {:?}", target, source);
				None
			}
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn corner_tile_neighbours_orthogonal() {
		let result = Ordinal::get_tile_neighbours(TileCell::new(0, 0), 5, 5, false);
		let actual = vec![
			(Ordinal::East, TileCell::new(1, 0)),
			(Ordinal::South, TileCell::new(0, 1)),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn corner_tile_neighbours_diagonal() {
		let result = Ordinal::get_tile_neighbours(TileCell::new(4, 4), 5, 5, true);
		let actual = vec![
			(Ordinal::North, TileCell::new(4, 3)),
			(Ordinal::West, TileCell::new(3, 4)),
			(Ordinal::NorthWest, TileCell::new(3, 3)),
		];
		assert_eq!(actual, result);
	}
	#[test]
	fn centre_tile_has_eight_neighbours() {
		let result = Ordinal::get_tile_neighbours(TileCell::new(2, 2), 5, 5, true);
		assert_eq!(8, result.len());
	}
	#[test]
	fn outside_tile_is_not_within() {
		assert!(!TileCell::new(-1, 0).is_within(5, 5));
		assert!(!TileCell::new(5, 0).is_within(5, 5));
		assert!(TileCell::new(4, 4).is_within(5, 5));
	}
	#[test]
	fn cell_to_cell_south_east() {
		let result = Ordinal::cell_to_cell_direction(TileCell::new(5, 5), TileCell::new(4, 4));
		assert_eq!(Some(Ordinal::SouthEast), result);
	}
	#[test]
	fn cell_to_cell_not_adjacent() {
		let result = Ordinal::cell_to_cell_direction(TileCell::new(7, 5), TileCell::new(4, 4));
		assert_eq!(None, result);
	}
	#[test]
	fn inverse_of_step_returns_home() {
		let start = TileCell::new(3, 3);
		for ordinal in Ordinal::ORTHOGONAL.iter().chain(Ordinal::DIAGONAL.iter()) {
			assert_eq!(start, start.step(*ordinal).step(ordinal.inverse()));
		}
	}
	#[test]
	fn chebyshev() {
		assert_eq!(4, chebyshev_distance(TileCell::new(0, 0), TileCell::new(4, 2)));
		assert_eq!(1, chebyshev_distance(TileCell::new(2, 2), TileCell::new(1, 1)));
	}
}
