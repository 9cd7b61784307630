//! A [Path] is the result of a successful search, the series of tiles from
//! the start of the search to its destination
//!

use std::collections::VecDeque;

use crate::prelude::*;

/// Ordered tiles from the start tile (index `0`) to the destination
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(VecDeque<TileCell>);

impl Path {
	/// Put a step at the front of the path, used while walking parent links back from the destination
	pub fn prepend_step(&mut self, x: i32, y: i32) {
		self.0.push_front(TileCell::new(x, y));
	}
	/// Put a step at the end of the path
	pub fn append_step(&mut self, x: i32, y: i32) {
		self.0.push_back(TileCell::new(x, y));
	}
	pub fn get_length(&self) -> usize {
		self.0.len()
	}
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	pub fn get_step(&self, index: usize) -> Option<TileCell> {
		self.0.get(index).copied()
	}
	/// Get the `x` of a step. Panics if `index` is beyond the path
	pub fn get_x(&self, index: usize) -> i32 {
		self.0[index].get_x()
	}
	/// Get the `y` of a step. Panics if `index` is beyond the path
	pub fn get_y(&self, index: usize) -> i32 {
		self.0[index].get_y()
	}
	pub fn get_first(&self) -> Option<TileCell> {
		self.0.front().copied()
	}
	pub fn get_last(&self) -> Option<TileCell> {
		self.0.back().copied()
	}
	pub fn contains(&self, x: i32, y: i32) -> bool {
		self.0.contains(&TileCell::new(x, y))
	}
	pub fn iter(&self) -> impl Iterator<Item = &TileCell> {
		self.0.iter()
	}
}

impl FromIterator<TileCell> for Path {
	fn from_iter<I: IntoIterator<Item = TileCell>>(iter: I) -> Self {
		Path(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn prepend_builds_backwards() {
		let mut path = Path::default();
		path.prepend_step(2, 2);
		path.prepend_step(1, 1);
		path.prepend_step(0, 0);
		assert_eq!(3, path.get_length());
		assert_eq!(Some(TileCell::new(0, 0)), path.get_first());
		assert_eq!(Some(TileCell::new(2, 2)), path.get_last());
		assert_eq!(1, path.get_x(1));
		assert_eq!(1, path.get_y(1));
	}
	#[test]
	fn step_beyond_length() {
		let mut path = Path::default();
		path.append_step(0, 0);
		assert_eq!(None, path.get_step(1));
		assert!(path.contains(0, 0));
		assert!(!path.contains(1, 0));
	}
}
