//! Estimators of the remaining cost between a tile and the destination. A
//! [Heuristic] is handed to a [crate::prelude::PathFinder] when it is built
//!

/// Estimate the cost of moving from `(x, y)` to `(dx, dy)`
pub trait Heuristic: Send + Sync {
	/// Get the estimated cost
	fn get_cost(&self, x: i32, y: i32, dx: i32, dy: i32) -> f64;
}

/// Straight line distance, the default
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestHeuristic;

impl Heuristic for ClosestHeuristic {
	fn get_cost(&self, x: i32, y: i32, dx: i32, dy: i32) -> f64 {
		let delta_x = (dx - x) as f64;
		let delta_y = (dy - y) as f64;
		(delta_x * delta_x + delta_y * delta_y).sqrt()
	}
}

/// Sum of the axis distances, suited to maps searched without diagonals
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
	fn get_cost(&self, x: i32, y: i32, dx: i32, dy: i32) -> f64 {
		((dx - x).abs() + (dy - y).abs()) as f64
	}
}

/// Largest axis distance, the number of moves on an open map where
/// diagonals cost the same as orthogonals
#[derive(Clone, Copy, Debug, Default)]
pub struct ChebyshevHeuristic;

impl Heuristic for ChebyshevHeuristic {
	fn get_cost(&self, x: i32, y: i32, dx: i32, dy: i32) -> f64 {
		(dx - x).abs().max((dy - y).abs()) as f64
	}
}
