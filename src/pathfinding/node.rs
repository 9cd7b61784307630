//! A [Node] is the search record of a single tile. Every tile of a map owns
//! exactly one [Node] inside a [NodeTable] which is allocated once when a
//! [crate::prelude::PathFinder] is created and reused by every search.
//!
//! Parent links are indices into the table rather than references so a path
//! can be walked back from the destination without any per-search
//! allocation of graph nodes.
//!

use crate::prelude::*;

/// Search record of a tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	/// Tile the node represents, fixed at construction
	cell: TileCell,
	/// Accumulated path cost from the start of the search
	cost: f64,
	/// Estimated remaining cost to the destination
	heuristic: f64,
	/// Index of the predecessor within the [NodeTable]
	parent: Option<usize>,
	/// Length of the parent chain
	depth: u32,
}

impl Node {
	/// Create a new instance of [Node] for a tile
	pub fn new(cell: TileCell) -> Self {
		Node {
			cell,
			cost: f64::INFINITY,
			heuristic: 0.0,
			parent: None,
			depth: 0,
		}
	}
	pub fn get_cell(&self) -> TileCell {
		self.cell
	}
	pub fn get_cost(&self) -> f64 {
		self.cost
	}
	pub fn set_cost(&mut self, cost: f64) {
		self.cost = cost;
	}
	pub fn get_heuristic(&self) -> f64 {
		self.heuristic
	}
	pub fn set_heuristic(&mut self, heuristic: f64) {
		self.heuristic = heuristic;
	}
	/// The sort key of the node within the [crate::prelude::OpenList]
	pub fn get_total_cost(&self) -> f64 {
		self.cost + self.heuristic
	}
	pub fn get_parent(&self) -> Option<usize> {
		self.parent
	}
	pub fn get_depth(&self) -> u32 {
		self.depth
	}
	/// Link the node to a `(parent_index, parent_depth)`, returning the new depth
	/// of the node. With no parent the depth is `0`
	pub fn set_parent(&mut self, parent: Option<(usize, u32)>) -> u32 {
		match parent {
			Some((index, parent_depth)) => {
				self.parent = Some(index);
				self.depth = parent_depth + 1;
			}
			None => {
				self.parent = None;
				self.depth = 0;
			}
		}
		self.depth
	}
	/// Forget anything a previous search recorded
	fn reset(&mut self) {
		self.cost = f64::INFINITY;
		self.heuristic = 0.0;
		self.parent = None;
		self.depth = 0;
	}
}

/// Flat arena of one [Node] per tile, indexed by `y * width + x`
#[derive(Clone, Debug)]
pub struct NodeTable {
	/// Number of tiles along `x`
	width: u32,
	/// Number of tiles along `y`
	height: u32,
	/// Every node of the map
	nodes: Vec<Node>,
	/// Indices of nodes written to since the last reset
	touched: Vec<usize>,
}

impl NodeTable {
	/// Create a new instance of [NodeTable] holding a node for every tile of a
	/// `width` by `height` map
	pub fn new(width: u32, height: u32) -> Self {
		let mut nodes = Vec::with_capacity((width * height) as usize);
		for y in 0..height as i32 {
			for x in 0..width as i32 {
				nodes.push(Node::new(TileCell::new(x, y)));
			}
		}
		NodeTable {
			width,
			height,
			nodes,
			touched: Vec::new(),
		}
	}
	pub fn get_width(&self) -> u32 {
		self.width
	}
	pub fn get_height(&self) -> u32 {
		self.height
	}
	/// Convert a tile into its index, [None] when outside of the table
	pub fn get_index(&self, cell: TileCell) -> Option<usize> {
		if cell.is_within(self.width, self.height) {
			Some(cell.get_y() as usize * self.width as usize + cell.get_x() as usize)
		} else {
			None
		}
	}
	/// Get a node by index
	pub fn get(&self, index: usize) -> &Node {
		&self.nodes[index]
	}
	/// Get a node by index for writing, the node is remembered so the next
	/// [NodeTable::reset] restores it
	pub fn get_mut(&mut self, index: usize) -> &mut Node {
		self.touched.push(index);
		&mut self.nodes[index]
	}
	/// Number of nodes written to since the last reset, a node written to
	/// several times is counted once per write
	pub fn get_touched_count(&self) -> usize {
		self.touched.len()
	}
	/// Restore only the nodes a previous search wrote to
	pub fn reset(&mut self) {
		for index in self.touched.drain(..) {
			self.nodes[index].reset();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn total_cost_is_sum() {
		let mut node = Node::new(TileCell::new(1, 1));
		node.set_cost(2.0);
		node.set_heuristic(3.5);
		assert_eq!(5.5, node.get_total_cost());
	}
	#[test]
	fn depth_follows_parent() {
		let mut node = Node::new(TileCell::new(1, 1));
		let depth = node.set_parent(Some((0, 4)));
		assert_eq!(5, depth);
		assert_eq!(Some(0), node.get_parent());
		let depth = node.set_parent(None);
		assert_eq!(0, depth);
		assert_eq!(None, node.get_parent());
	}
	#[test]
	fn table_index_layout() {
		let table = NodeTable::new(4, 3);
		assert_eq!(Some(0), table.get_index(TileCell::new(0, 0)));
		assert_eq!(Some(6), table.get_index(TileCell::new(2, 1)));
		assert_eq!(None, table.get_index(TileCell::new(4, 0)));
		assert_eq!(TileCell::new(2, 1), table.get(6).get_cell());
	}
	#[test]
	fn reset_only_restores_touched() {
		let mut table = NodeTable::new(3, 3);
		table.get_mut(4).set_cost(1.0);
		table.get_mut(4).set_parent(Some((3, 0)));
		assert_eq!(2, table.get_touched_count());
		table.reset();
		assert_eq!(0, table.get_touched_count());
		assert!(table.get(4).get_cost().is_infinite());
		assert_eq!(None, table.get(4).get_parent());
	}
}
