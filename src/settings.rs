//! Tunables of the plugin which can be inserted as a [Resource] before the
//! [crate::plugin::PathfindablePlugin] is added, or loaded from disk
//!

use bevy::prelude::*;

#[cfg(feature = "ron")]
use crate::prelude::*;

/// Settings shared by every [crate::prelude::Pathfindable] driven by the plugin
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Resource, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PathfindingSettings {
	/// Number of movement ticks per second a speed is expressed in. A frame
	/// lasting `delta` seconds moves actors by `speed * delta * nominal_rate`
	nominal_rate: f64,
	/// Upper bound of the extrapolation applied in a single frame so a long
	/// stall doesn't teleport actors across several tiles
	max_extrapolation: f64,
}

impl Default for PathfindingSettings {
	fn default() -> Self {
		PathfindingSettings {
			nominal_rate: 60.0,
			max_extrapolation: 4.0,
		}
	}
}

impl PathfindingSettings {
	/// Create a new instance of [PathfindingSettings]
	pub fn new(nominal_rate: f64, max_extrapolation: f64) -> Self {
		if nominal_rate <= 0.0 || max_extrapolation <= 0.0 {
			panic!(
				"PathfindingSettings nominal_rate `{}` and max_extrapolation `{}` must be positive",
				nominal_rate, max_extrapolation
			);
		}
		PathfindingSettings {
			nominal_rate,
			max_extrapolation,
		}
	}
	pub fn get_nominal_rate(&self) -> f64 {
		self.nominal_rate
	}
	pub fn get_max_extrapolation(&self) -> f64 {
		self.max_extrapolation
	}
	/// Scale factor for a frame lasting `delta_secs`
	pub fn get_extrapolation(&self, delta_secs: f64) -> f64 {
		(delta_secs * self.nominal_rate).clamp(0.0, self.max_extrapolation)
	}
	/// From a `ron` file generate the [PathfindingSettings]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> MapLoadResult<Self> {
		let file = std::fs::File::open(path)?;
		let settings: PathfindingSettings = ron::de::from_reader(file)?;
		Ok(settings)
	}
}
