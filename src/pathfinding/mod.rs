//! A* search over a grid of tiles.
//!
//! Each tile of the map has a terrain cost, `1` being the cheapest and `255`
//! being impassable, and may be claimed by a mover through its occupancy id.
//! A search expands tiles from the start in order of the cost so far plus a
//! [heuristic::Heuristic] estimate of the remaining cost to the destination:
//!
//! ```text
//!  _____________________________
//! | S→ |  → |  ↘ |    |    |    |
//! |____|____|____|____|____|____|
//! |    |    | 255|  ↘ |    |    |
//! |____|____|____|____|____|____|
//! |    |    | 255|    |  ↘ |    |
//! |____|____|____|____|____|____|
//! |    |    |    |    |    |  D |
//! |____|____|____|____|____|____|
//! ```
//!
//! The resulting [path::Path] lists every tile from the start `S` to the
//! destination `D` inclusive.
//!

pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod path;
pub mod path_finder;
pub mod utilities;
