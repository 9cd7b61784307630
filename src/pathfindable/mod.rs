//! A [Pathfindable] is the movement controller of a single actor. It asks the
//! [PathFinder] for a [Path], moves its pixel position towards each step in
//! turn and negotiates tile ownership with every other actor on the map
//! through the occupancy grid of the [TileMap].
//!
//! An actor owns the footprint of the tile it stands on. Each time it
//! reaches a step of its path it inspects the footprint of the next step:
//!
//! ```text
//!  next step free            next step owned by B       next step is the last
//!  ___________________       ___________________       ___________________
//! |  A  | →   |     |       |  A  | B   |     |       |     |  A  | B   |
//! |_____|_____|_____|       |__↘__|_____|_____|       |_____|_____|_____|
//! |     |     |     |       |     | ↗   |     |       |     |     |     |
//! |_____|_____|_____|       |_____|_____|_____|       |_____|_____|_____|
//!  release A, claim →        search around B            stop short of B
//! ```
//!
//! * Free, or owned by an id the actor ignores - the old footprint is
//!   released, the new one claimed and the actor advances
//! * Owned by another actor and it is the final step - the actor stops
//!   where it is, the destination is as good as reached
//! * Owned by another actor sharing the route - the actor searches again
//!   and then sits out a tick so the two don't keep swapping
//! * Owned by anyone else - the actor searches again treating claimed tiles
//!   as blocked
//!
//! If searching again produces nothing the actor gives up where it stands
//! and reports that it has arrived.
//!

pub mod state;

use std::collections::HashSet;

use bevy::prelude::*;

use crate::prelude::*;

/// What happened to a [Pathfindable] during an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveStatus {
	/// Not following a path
	Idle,
	/// Still travelling
	Moving,
	/// The path has ended this update, at the destination or as close as it could get
	Arrived,
}

/// How the next step of a path looks to the actor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepCheck {
	/// The footprint can be claimed
	Free,
	/// The terrain cannot be entered
	Impassable,
	/// Another actor owns part of the footprint
	Occupied(i32),
}

/// Movement controller of a single actor on a tile map
#[derive(Component, Clone, Debug)]
pub struct Pathfindable {
	/// Id written into the occupancy grid, never [FREE_TILE]
	id: i32,
	/// Tiles `(width, height)` covered by the actor
	footprint: (u32, u32),
	/// Conversions between tiles and pixels
	map_dimensions: MapDimensions,
	/// Pixel position of the top left corner of the actor
	position: (f64, f64),
	/// Pixels per tick `(x, y)` before extrapolation
	speed: (f64, f64),
	/// Highest terrain cost the actor will walk onto
	max_traversable_cost: u8,
	/// Tile the actor owns, the one it stands on or is walking onto
	tile: TileCell,
	/// Where the actor was asked to go
	destination: TileCell,
	/// The route being followed
	path: Option<Path>,
	/// Index of the step being walked towards
	last_step: usize,
	/// Progress through the path
	state: MoveState,
	/// Pixel target of a direct move that bypasses the search
	direct_target: Option<(f64, f64)>,
	/// Ids whose tiles never block this actor
	ignored_ids: HashSet<i32>,
	/// Ids of actors sharing the same route, yielded to rather than walked around
	shared_path_ids: HashSet<i32>,
}

impl Pathfindable {
	/// Create a new instance of [Pathfindable] with occupancy `id`, a pixel
	/// `size` and a per tick `speed`. An `id` of [FREE_TILE] cannot be told
	/// apart from an empty tile and is a programming error
	pub fn new(id: i32, map_dimensions: &MapDimensions, size: (u32, u32), speed: (f64, f64)) -> Self {
		if id == FREE_TILE {
			panic!("Pathfindable id cannot be {}, it marks a free tile", FREE_TILE);
		}
		Pathfindable {
			id,
			footprint: map_dimensions.get_footprint_from_size(size.0, size.1),
			map_dimensions: *map_dimensions,
			position: (0.0, 0.0),
			speed,
			max_traversable_cost: IMPASSABLE_COST - 1,
			tile: TileCell::default(),
			destination: TileCell::default(),
			path: None,
			last_step: 0,
			state: MoveState::Idle,
			direct_target: None,
			ignored_ids: HashSet::new(),
			shared_path_ids: HashSet::new(),
		}
	}
	pub fn get_id(&self) -> i32 {
		self.id
	}
	/// Pixel position of the top left corner of the actor
	pub fn get_position(&self) -> (f64, f64) {
		self.position
	}
	/// The tile the actor owns
	pub fn get_tile(&self) -> TileCell {
		self.tile
	}
	/// Centre of the actor in 2d world space, see [MapDimensions::get_xy_from_pixel]
	pub fn get_world_position(&self) -> Vec2 {
		self.map_dimensions
			.get_xy_from_pixel(self.position.0, self.position.1, self.footprint)
	}
	/// The tile the pixel position currently lies in
	pub fn get_tile_from_position(&self) -> TileCell {
		self.map_dimensions
			.get_tile_from_pixel(self.position.0, self.position.1)
	}
	pub fn get_destination(&self) -> TileCell {
		self.destination
	}
	pub fn get_path(&self) -> Option<&Path> {
		self.path.as_ref()
	}
	/// Index of the step being walked towards
	pub fn get_last_step(&self) -> usize {
		self.last_step
	}
	pub fn get_state(&self) -> MoveState {
		self.state
	}
	pub fn get_speed(&self) -> (f64, f64) {
		self.speed
	}
	pub fn set_speed(&mut self, speed: (f64, f64)) {
		self.speed = speed;
	}
	pub fn set_max_traversable_cost(&mut self, cost: u8) {
		self.max_traversable_cost = cost;
	}
	/// Mark whether tiles owned by `id` should be walked through
	pub fn set_ignore_id(&mut self, id: i32, ignore: bool) {
		if ignore {
			self.ignored_ids.insert(id);
		} else {
			self.ignored_ids.remove(&id);
		}
	}
	/// Actors travelling the same route as this one
	pub fn set_shared_path_ids(&mut self, ids: HashSet<i32>) {
		self.shared_path_ids = ids;
	}
	pub fn get_shared_path_ids(&self) -> &HashSet<i32> {
		&self.shared_path_ids
	}
	/// Whether a path is being followed or a direct move is underway
	pub fn is_moving(&self) -> bool {
		self.state.is_active() || self.direct_target.is_some()
	}
	/// The destination counts as reached whenever there is no path to follow
	pub fn is_destination_reached(&self) -> bool {
		self.path.is_none()
	}
	/// Whether the footprint at any step still to be walked covers `tile`
	pub fn is_path_crossing(&self, tile: TileCell) -> bool {
		let (w, h) = self.footprint;
		let covers = |step: &TileCell| {
			(step.get_x()..step.get_x() + w as i32).contains(&tile.get_x())
				&& (step.get_y()..step.get_y() + h as i32).contains(&tile.get_y())
		};
		match &self.path {
			Some(path) => path.iter().skip(self.last_step).any(covers),
			None => false,
		}
	}
	/// Put the actor on `tile`, claiming its footprint. Anything the actor
	/// previously owned is released and any path is dropped.
	///
	/// Returns `false` and leaves the actor untouched when the footprint at
	/// `tile` leaves the map or is owned by another actor
	pub fn place(&mut self, map: &mut dyn TileMap, tile: TileCell) -> bool {
		let (w, h) = self.footprint;
		if !map.is_area_available(tile.get_x(), tile.get_y(), w, h, self.id) {
			debug!("Actor {} cannot be placed on {:?}", self.id, tile);
			return false;
		}
		self.release(map, self.tile);
		self.path = None;
		self.last_step = 0;
		self.state = self.state.transition(MoveEvent::PathEnded);
		self.tile = tile;
		self.destination = tile;
		self.position = self.map_dimensions.get_pixel_from_tile(tile);
		self.claim(map, tile);
		true
	}
	/// Give up the tiles owned by the actor, for example before despawning it
	pub fn remove(&mut self, map: &mut dyn TileMap) {
		self.release(map, self.tile);
		self.path = None;
		self.last_step = 0;
		self.state = self.state.transition(MoveEvent::PathEnded);
	}
	/// Ask the actor to travel to tile `(dtx, dty)`. Returns `true` when a
	/// fresh path was adopted.
	///
	/// An idle actor searches straight away, ignoring tiles claimed by other
	/// actors since they are likely to move before they are reached. An
	/// actor already walking keeps going until it reaches its next step and
	/// searches from there
	pub fn set_destination(
		&mut self,
		map: &dyn TileMap,
		finder: &mut PathFinder,
		dtx: i32,
		dty: i32,
	) -> bool {
		let destination = TileCell::new(dtx, dty);
		if self.path.is_some() {
			if destination != self.destination {
				debug!(
					"Actor {} redirected from {:?} to {:?}",
					self.id, self.destination, destination
				);
				self.destination = destination;
				self.state = self.state.transition(MoveEvent::DestinationChanged);
			}
			return false;
		}
		if destination == self.tile {
			return false;
		}
		self.direct_target = None;
		match finder.find_path(map, &*self, self.tile, destination, true) {
			Some(path) if path.get_length() > 1 => {
				self.destination = destination;
				self.adopt_path(path);
				true
			}
			_ => {
				debug!(
					"Actor {} found no path from {:?} to {:?}",
					self.id, self.tile, destination
				);
				false
			}
		}
	}
	/// Whether a path from the owned tile to `(x, y)` exists right now
	/// given where the other actors stand
	pub fn is_path_available(
		&self,
		map: &dyn TileMap,
		finder: &mut PathFinder,
		x: i32,
		y: i32,
	) -> bool {
		let destination = TileCell::new(x, y);
		finder
			.find_path(map, self, self.tile, destination, false)
			.is_some_and(|path| path.get_last() == Some(destination))
	}
	/// Stop following the path. The current step is finished first so the
	/// actor ends up aligned with a tile it owns
	pub fn stop_moves(&mut self) {
		self.direct_target = None;
		if self.path.is_some() {
			self.state = self.state.transition(MoveEvent::StopRequested);
		}
	}
	/// The map changed, the rest of the path is checked before the next move
	pub fn request_recheck(&mut self) {
		self.state = self.state.transition(MoveEvent::RecheckRequested);
	}
	/// Move straight towards pixel `(px, py)` without searching or touching
	/// the occupancy grid, for small nudges. Only an actor without a path
	/// can be nudged. Returns `true` once the target has been reached
	pub fn set_destination_location(&mut self, extrp: f64, px: f64, py: f64) -> bool {
		if self.path.is_some() {
			debug!("Actor {} is following a path, ignoring direct move", self.id);
			return false;
		}
		let target = (px, py);
		self.direct_target = Some(target);
		if self.step_towards(extrp, target) {
			self.position = target;
			self.direct_target = None;
			return true;
		}
		false
	}
	/// Advance the actor by one tick scaled by `extrp`
	pub fn update_moves(
		&mut self,
		map: &mut dyn TileMap,
		finder: &mut PathFinder,
		extrp: f64,
	) -> MoveStatus {
		match self.state {
			MoveState::Idle => return MoveStatus::Idle,
			MoveState::Yielding => {
				self.state = self.state.transition(MoveEvent::YieldElapsed);
				return MoveStatus::Moving;
			}
			MoveState::Rechecking => self.recheck_path(map),
			_ => {}
		}
		let Some(target_tile) = self.path.as_ref().and_then(|p| p.get_step(self.last_step)) else {
			return self.end_path(map);
		};
		let target = self.map_dimensions.get_pixel_from_tile(target_tile);
		if !self.step_towards(extrp, target) {
			return MoveStatus::Moving;
		}
		self.position = target;
		self.on_step_reached(map, finder)
	}
	/// Handle the actor standing exactly on a step of its path
	fn on_step_reached(&mut self, map: &mut dyn TileMap, finder: &mut PathFinder) -> MoveStatus {
		match self.state {
			MoveState::PendingRecompute => {
				let found = finder.find_path(&*map, &*self, self.tile, self.destination, false);
				match found {
					Some(path) if path.get_length() > 1 => self.adopt_path(path),
					_ => {
						debug!(
							"Actor {} cannot reach new destination {:?}",
							self.id, self.destination
						);
						return self.end_path(map);
					}
				}
			}
			MoveState::Stopping => return self.end_path(map),
			_ => {}
		}
		let Some(path) = &self.path else {
			return self.end_path(map);
		};
		let next_index = self.last_step + 1;
		let Some(next) = path.get_step(next_index) else {
			return self.end_path(map);
		};
		let is_final_step = next_index + 1 == path.get_length();
		match self.check_step(&*map, next) {
			StepCheck::Free => {
				self.release(map, self.tile);
				self.claim(map, next);
				self.tile = next;
				self.last_step = next_index;
				MoveStatus::Moving
			}
			StepCheck::Occupied(id) if is_final_step => {
				debug!(
					"Actor {} stopping short of {:?}, held by {}",
					self.id, next, id
				);
				self.state = self.state.transition(MoveEvent::StopRequested);
				MoveStatus::Moving
			}
			StepCheck::Occupied(id) if self.shared_path_ids.contains(&id) => {
				if self.reroute(map, finder) {
					self.state = self.state.transition(MoveEvent::YieldRequested);
					MoveStatus::Moving
				} else {
					self.end_path(map)
				}
			}
			StepCheck::Occupied(_) | StepCheck::Impassable => {
				if self.reroute(map, finder) {
					MoveStatus::Moving
				} else {
					self.end_path(map)
				}
			}
		}
	}
	/// Search from the owned tile treating tiles claimed by others as blocked
	fn reroute(&mut self, map: &dyn TileMap, finder: &mut PathFinder) -> bool {
		match finder.find_path(map, &*self, self.tile, self.destination, false) {
			Some(path) if path.get_length() > 1 => {
				trace!("Actor {} rerouted from {:?}", self.id, self.tile);
				self.adopt_path(path);
				true
			}
			_ => {
				debug!(
					"Actor {} cannot get around, settling at {:?}",
					self.id, self.tile
				);
				false
			}
		}
	}
	/// Look over the steps still to come for tiles that became impassable
	/// and check the next step is still free to claim
	fn recheck_path(&mut self, map: &dyn TileMap) {
		self.state = self.state.transition(MoveEvent::RecheckDone);
		let actor: &Pathfindable = self;
		let Some(path) = &actor.path else {
			return;
		};
		let next_taken = path
			.get_step(actor.last_step + 1)
			.is_some_and(|next| actor.check_step(map, next) != StepCheck::Free);
		let blocked = next_taken
			|| path
				.iter()
				.skip(actor.last_step + 1)
				.any(|step| map.is_blocked(actor, step.get_x(), step.get_y(), true));
		if blocked {
			debug!("Actor {} path is obstructed, searching again", self.id);
			self.state = self.state.transition(MoveEvent::DestinationChanged);
		}
	}
	/// Classify the footprint anchored at `tile`
	fn check_step(&self, map: &dyn TileMap, tile: TileCell) -> StepCheck {
		if map.is_blocked(self, tile.get_x(), tile.get_y(), true) {
			return StepCheck::Impassable;
		}
		let (w, h) = self.footprint;
		for y in tile.get_y()..tile.get_y() + h as i32 {
			for x in tile.get_x()..tile.get_x() + w as i32 {
				let id = map.get_ref(x, y);
				if id != FREE_TILE && id != self.id && !self.ignored_ids.contains(&id) {
					return StepCheck::Occupied(id);
				}
			}
		}
		StepCheck::Free
	}
	/// Write the actor id into every free tile of the footprint at `tile`
	fn claim(&self, map: &mut dyn TileMap, tile: TileCell) {
		let (w, h) = self.footprint;
		for y in tile.get_y()..tile.get_y() + h as i32 {
			for x in tile.get_x()..tile.get_x() + w as i32 {
				match map.get_ref(x, y) {
					FREE_TILE => map.set_ref(x, y, self.id),
					id if id == self.id => {}
					id => trace!("Actor {} shares ({}, {}) with {}", self.id, x, y, id),
				}
			}
		}
	}
	/// Clear the footprint at `tile` of tiles owned by the actor
	fn release(&self, map: &mut dyn TileMap, tile: TileCell) {
		let (w, h) = self.footprint;
		for y in tile.get_y()..tile.get_y() + h as i32 {
			for x in tile.get_x()..tile.get_x() + w as i32 {
				if map.get_ref(x, y) == self.id {
					map.set_ref(x, y, FREE_TILE);
				}
			}
		}
	}
	/// Start following `path` from its first step
	fn adopt_path(&mut self, path: Path) {
		self.path = Some(path);
		self.last_step = 0;
		self.state = self.state.transition(MoveEvent::PathStarted);
	}
	/// Drop the path, the actor stays on the tile it owns
	fn end_path(&mut self, map: &mut dyn TileMap) -> MoveStatus {
		self.path = None;
		self.last_step = 0;
		self.state = self.state.transition(MoveEvent::PathEnded);
		self.shared_path_ids.clear();
		// a stop mid-claim may leave the pixel position behind the owned tile
		self.claim(map, self.tile);
		MoveStatus::Arrived
	}
	/// Move the pixel position one tick towards `target`, returning whether
	/// both axes have arrived
	fn step_towards(&mut self, extrp: f64, target: (f64, f64)) -> bool {
		let mut force_x = axis_force(self.position.0, target.0, self.speed.0);
		let mut force_y = axis_force(self.position.1, target.1, self.speed.1);
		if force_x != 0.0 && force_y != 0.0 {
			force_x *= DIAGONAL_SPEED_FACTOR;
			force_y *= DIAGONAL_SPEED_FACTOR;
		}
		self.position.0 += force_x * extrp;
		self.position.1 += force_y * extrp;
		// an axis that got there stays put while the other catches up
		let arrived_x = has_arrived(self.position.0, target.0, force_x);
		if arrived_x {
			self.position.0 = target.0;
		}
		let arrived_y = has_arrived(self.position.1, target.1, force_y);
		if arrived_y {
			self.position.1 = target.1;
		}
		arrived_x && arrived_y
	}
}

/// Signed speed along one axis pointing from `position` to `target`
fn axis_force(position: f64, target: f64, speed: f64) -> f64 {
	if target > position {
		speed
	} else if target < position {
		-speed
	} else {
		0.0
	}
}

/// Whether `position` has reached or passed `target` when moving with `force`
fn has_arrived(position: f64, target: f64, force: f64) -> bool {
	(force < 0.0 && position <= target) || (force >= 0.0 && position >= target)
}

impl Mover for Pathfindable {
	fn get_occupancy_id(&self) -> i32 {
		self.id
	}
	fn get_tile_footprint(&self) -> (u32, u32) {
		self.footprint
	}
	fn is_ignored_id(&self, id: i32) -> bool {
		self.ignored_ids.contains(&id)
	}
	fn can_traverse(&self, cost: u8) -> bool {
		cost != IMPASSABLE_COST && cost <= self.max_traversable_cost
	}
}
