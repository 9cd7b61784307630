//! Errors raised while loading a [crate::prelude::TileGrid] or settings from disk
//!

use thiserror::Error;

/// Reasons a map could not be built from a file
#[derive(Error, Debug)]
pub enum MapLoadError {
	#[error("Failed opening map file: {0}")]
	Io(#[from] std::io::Error),

	#[cfg(feature = "ron")]
	#[error("Failed deserializing ron: {0}")]
	Ron(#[from] ron::error::SpannedError),

	#[cfg(feature = "csv")]
	#[error("Failed reading csv: {0}")]
	Csv(#[from] csv::Error),

	#[error("Invalid tile cost `{value}` at column {column}, row {row}")]
	InvalidCost {
		value: String,
		column: usize,
		row: usize,
	},

	#[error("Map rows have inconsistent lengths, expected {expected} tiles found {found} on row {row}")]
	RaggedRow {
		expected: usize,
		found: usize,
		row: usize,
	},

	#[error("Map `({width}, {height})` does not fit the expected dimensions `({expected_width}, {expected_height})`")]
	DimensionMismatch {
		width: u32,
		height: u32,
		expected_width: u32,
		expected_height: u32,
	},

	#[error("Failed reading heightmap: {0}")]
	Heightmap(String),

	#[error("Map contains no tiles")]
	Empty,
}

/// Result type alias for loading operations
pub type MapLoadResult<T> = Result<T, MapLoadError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn map_load_error_display() {
		let err = MapLoadError::InvalidCost {
			value: "abc".to_string(),
			column: 2,
			row: 4,
		};
		assert_eq!(
			"Invalid tile cost `abc` at column 2, row 4",
			err.to_string()
		);
		let err = MapLoadError::Empty;
		assert_eq!("Map contains no tiles", err.to_string());
	}
}
