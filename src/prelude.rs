//! `use bevy_pathfindable_tiles_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::pathfinding::{
	frontier::*, heuristic::*, node::*, path::*, path_finder::*, utilities::*,
};

#[doc(hidden)]
pub use crate::map::{error::*, tile_grid::*, *};

#[doc(hidden)]
pub use crate::pathfindable::{state::*, *};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{movement_layer::*, occupancy_layer::*, *},
	settings::*,
};
