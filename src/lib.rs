//! This is a plugin for Bevy game engine to move many actors across a tile
//! map with A* pathfinding, where actors claim the tiles they stand on and
//! negotiate their way around each other
//!

pub mod bundle;
pub mod map;
pub mod pathfindable;
pub mod pathfinding;
pub mod plugin;
pub mod settings;

pub mod prelude;
