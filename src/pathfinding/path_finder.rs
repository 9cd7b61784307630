//! The [PathFinder] runs an A* search across a [TileMap] to produce a [Path]
//! for a [Mover].
//!
//! Searching is bounded by the deepest parent chain discovered so far rather
//! than by an iteration count. Once the frontier has reached
//! `max_search_distance` steps away from the start the search gives up,
//! which lets the effective search radius grow with the frontier.
//!
//! Not finding a path is an expected outcome, for example when the
//! destination is walled in, and is reported as [None].
//!

use bevy::prelude::*;

use crate::prelude::*;

/// Limits of the search
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct PathFinderConfig {
	/// Deepest parent chain the search may grow before it gives up
	max_search_distance: u32,
	/// Whether the 4 diagonal neighbours of a tile are explored
	allow_diagonal: bool,
}

impl Default for PathFinderConfig {
	fn default() -> Self {
		PathFinderConfig {
			max_search_distance: 256,
			allow_diagonal: true,
		}
	}
}

impl PathFinderConfig {
	/// Create a new instance of [PathFinderConfig]
	pub fn new(max_search_distance: u32, allow_diagonal: bool) -> Self {
		PathFinderConfig {
			max_search_distance,
			allow_diagonal,
		}
	}
	pub fn get_max_search_distance(&self) -> u32 {
		self.max_search_distance
	}
	pub fn is_diagonal_allowed(&self) -> bool {
		self.allow_diagonal
	}
	/// From a `ron` file generate the [PathFinderConfig]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> MapLoadResult<Self> {
		let file = std::fs::File::open(path)?;
		let config: PathFinderConfig = ron::de::from_reader(file)?;
		Ok(config)
	}
}

/// A* search over a tile map. Owns one [Node] per tile for the lifetime of the map
#[derive(Component)]
pub struct PathFinder {
	/// Search record of every tile
	nodes: NodeTable,
	/// Discovered nodes awaiting expansion
	open: OpenList,
	/// Expanded nodes
	closed: ClosedList,
	/// Limits of the search
	config: PathFinderConfig,
	/// Estimator of the remaining cost
	heuristic: Box<dyn Heuristic>,
	/// Deepest parent chain reached by the previous search
	last_search_depth: u32,
	/// Number of nodes expanded by the previous search
	last_expanded_count: usize,
}

impl PathFinder {
	/// Create a new instance of [PathFinder] for a map of `map_dimensions`
	pub fn new(
		map_dimensions: &MapDimensions,
		config: PathFinderConfig,
		heuristic: Box<dyn Heuristic>,
	) -> Self {
		if config.get_max_search_distance() == 0 {
			panic!("PathFinder cannot search with a max_search_distance of 0");
		}
		PathFinder {
			nodes: NodeTable::new(
				map_dimensions.get_width_in_tile(),
				map_dimensions.get_height_in_tile(),
			),
			open: OpenList::default(),
			closed: ClosedList::default(),
			config,
			heuristic,
			last_search_depth: 0,
			last_expanded_count: 0,
		}
	}
	/// Create a [PathFinder] using the default config and [ClosestHeuristic]
	pub fn with_defaults(map_dimensions: &MapDimensions) -> Self {
		PathFinder::new(
			map_dimensions,
			PathFinderConfig::default(),
			Box::new(ClosestHeuristic),
		)
	}
	pub fn get_config(&self) -> &PathFinderConfig {
		&self.config
	}
	/// Deepest parent chain reached by the previous search
	pub fn get_last_search_depth(&self) -> u32 {
		self.last_search_depth
	}
	/// Number of nodes expanded by the previous search
	pub fn get_last_expanded_count(&self) -> usize {
		self.last_expanded_count
	}
	/// Find a path for `mover` from `start` to `destination`. When
	/// `ignore_ref` is set tiles claimed by other movers are treated as
	/// passable.
	///
	/// If the destination cannot be stood on the search is aimed at the
	/// closest tile that can, so the last step of the returned [Path] may
	/// differ from `destination`
	pub fn find_path(
		&mut self,
		map: &dyn TileMap,
		mover: &dyn Mover,
		start: TileCell,
		destination: TileCell,
		ignore_ref: bool,
	) -> Option<Path> {
		self.find_path_with_retarget(map, mover, start, destination, ignore_ref, true)
	}
	/// Validate the destination, aiming at a substitute when it is blocked and `retarget` is allowed
	fn find_path_with_retarget(
		&mut self,
		map: &dyn TileMap,
		mover: &dyn Mover,
		start: TileCell,
		destination: TileCell,
		ignore_ref: bool,
		retarget: bool,
	) -> Option<Path> {
		let width = map.get_width_in_tile();
		let height = map.get_height_in_tile();
		if width != self.nodes.get_width() || height != self.nodes.get_height() {
			error!(
				"Map of {}x{} does not match the PathFinder node table of {}x{}",
				width,
				height,
				self.nodes.get_width(),
				self.nodes.get_height()
			);
			return None;
		}
		if !start.is_within(width, height) || !destination.is_within(width, height) {
			debug!(
				"No path, {:?} -> {:?} lies outside of the map",
				start, destination
			);
			return None;
		}
		if map.is_blocked(
			mover,
			destination.get_x(),
			destination.get_y(),
			ignore_ref,
		) {
			// never walk a single step into something blocking
			if chebyshev_distance(start, destination) <= 1 {
				debug!("No path, adjacent destination {:?} is blocked", destination);
				return None;
			}
			if !retarget {
				return None;
			}
			let substitute = map.get_closest_available_tile(mover, start, height, destination)?;
			debug!(
				"Destination {:?} is blocked, aiming for {:?} instead",
				destination, substitute
			);
			return self.find_path_with_retarget(map, mover, start, substitute, ignore_ref, false);
		}
		self.search(map, mover, start, destination, ignore_ref)
	}
	/// The A* search proper
	fn search(
		&mut self,
		map: &dyn TileMap,
		mover: &dyn Mover,
		start: TileCell,
		destination: TileCell,
		ignore_ref: bool,
	) -> Option<Path> {
		let width = map.get_width_in_tile();
		let height = map.get_height_in_tile();
		// both tiles were validated as within the map
		let start_index = self.nodes.get_index(start)?;
		let destination_index = self.nodes.get_index(destination)?;

		self.nodes.reset();
		self.closed.clear();
		self.open.clear();
		{
			let start_node = self.nodes.get_mut(start_index);
			start_node.set_cost(0.0);
			start_node.set_heuristic(0.0);
			start_node.set_parent(None);
		}
		self.open.add(start_index, 0.0);

		let allow_diagonal = self.config.is_diagonal_allowed();
		let max_search_distance = self.config.get_max_search_distance();
		let mut max_depth = 0;
		let mut expanded = 0;
		while max_depth < max_search_distance {
			let Some(current_index) = self.open.pop_first() else {
				break;
			};
			if current_index == destination_index {
				break;
			}
			self.closed.add(current_index);
			expanded += 1;
			let current = *self.nodes.get(current_index);
			let current_cell = current.get_cell();
			trace!("Expanding {:?}", current_cell);

			for (_ordinal, neighbour) in
				Ordinal::get_tile_neighbours(current_cell, width, height, allow_diagonal)
			{
				if neighbour != start
					&& map.is_blocked(mover, neighbour.get_x(), neighbour.get_y(), ignore_ref)
				{
					continue;
				}
				let Some(neighbour_index) = self.nodes.get_index(neighbour) else {
					continue;
				};
				let next_step_cost = current.get_cost()
					+ map.get_cost(
						mover,
						current_cell.get_x(),
						current_cell.get_y(),
						neighbour.get_x(),
						neighbour.get_y(),
					);
				if next_step_cost < self.nodes.get(neighbour_index).get_cost() {
					// a cheaper route makes any previous record stale
					self.open.remove(neighbour_index);
					self.closed.remove(neighbour_index);
				}
				if !self.open.contains(neighbour_index) && !self.closed.contains(neighbour_index) {
					let h = self.heuristic.get_cost(
						neighbour.get_x(),
						neighbour.get_y(),
						destination.get_x(),
						destination.get_y(),
					);
					let node = self.nodes.get_mut(neighbour_index);
					node.set_cost(next_step_cost);
					node.set_heuristic(h);
					let depth = node.set_parent(Some((current_index, current.get_depth())));
					let total = node.get_total_cost();
					max_depth = max_depth.max(depth);
					self.open.add(neighbour_index, total);
				}
			}
		}
		self.last_search_depth = max_depth;
		self.last_expanded_count = expanded;

		if destination_index != start_index
			&& self.nodes.get(destination_index).get_parent().is_none()
		{
			debug!(
				"No path found from {:?} to {:?} after expanding {} nodes",
				start, destination, expanded
			);
			return None;
		}
		let mut path = Path::default();
		let mut index = destination_index;
		while index != start_index {
			let node = self.nodes.get(index);
			path.prepend_step(node.get_cell().get_x(), node.get_cell().get_y());
			index = node.get_parent()?;
		}
		path.prepend_step(start.get_x(), start.get_y());
		debug!(
			"Path of {} steps found from {:?} to {:?}",
			path.get_length(),
			start,
			destination
		);
		Some(path)
	}
}
