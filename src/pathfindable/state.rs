//! States a [crate::prelude::Pathfindable] moves through while following a
//! [crate::prelude::Path].
//!
//! ```text
//!                 PathStarted
//!   ┌──────┐ ───────────────────────► ┌───────────┐ ──YieldRequested──► ┌──────────┐
//!   │ Idle │                          │ Following │                     │ Yielding │
//!   └──────┘ ◄──────PathEnded──────── └───────────┘ ◄──┐                └──────────┘
//!                                       │      │       │ RecheckDone          │ YieldElapsed
//!                  DestinationChanged   │      │       │                      ▼
//!               ┌───────────────────────┘      │     ┌────────────┐ ◄───────────┘
//!               ▼                              │     │ Rechecking │
//!   ┌──────────────────┐                       │     └────────────┘
//!   │ PendingRecompute │       StopRequested   ▼
//!   └──────────────────┘                 ┌──────────┐
//!                                        │ Stopping │
//!                                        └──────────┘
//! ```
//!
//! Every state other than `Idle` ends in `Idle` through `PathEnded`.
//!

use bevy::prelude::*;

/// Where a mover is within its path following
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum MoveState {
	/// No path, the destination has been reached
	#[default]
	Idle,
	/// Advancing through the steps of a path
	Following,
	/// Gave way to a mover sharing the route, skips one tick
	Yielding,
	/// The remaining path must be checked for new obstacles before moving on
	Rechecking,
	/// A new destination was given mid-step, a search runs at the next step boundary
	PendingRecompute,
	/// Finishing the current step before giving up the path
	Stopping,
}

/// Things that happen to a mover which may change its [MoveState]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveEvent {
	/// A fresh path has been adopted
	PathStarted,
	/// The destination changed while a path is held
	DestinationChanged,
	/// The owner asked the mover to stop
	StopRequested,
	/// A mover sharing the route is in the way
	YieldRequested,
	/// The tick given up to yielding has passed
	YieldElapsed,
	/// The map changed under the path
	RecheckRequested,
	/// The remaining path has been checked
	RecheckDone,
	/// The path has been given up or finished
	PathEnded,
}

impl MoveState {
	/// Apply an `event`, returning the next state. Events that make no sense in
	/// the current state leave it unchanged
	pub fn transition(self, event: MoveEvent) -> MoveState {
		use MoveEvent as E;
		use MoveState as S;
		let next = match (self, event) {
			(_, E::PathEnded) => S::Idle,
			(_, E::PathStarted) => S::Following,
			(S::Idle, _) => S::Idle,
			(_, E::StopRequested) => S::Stopping,
			(_, E::DestinationChanged) => S::PendingRecompute,
			(S::Following, E::YieldRequested) => S::Yielding,
			(S::Yielding, E::YieldElapsed) => S::Rechecking,
			(S::Following, E::RecheckRequested) => S::Rechecking,
			(S::Rechecking, E::RecheckDone) => S::Following,
			(state, _) => state,
		};
		if next != self {
			trace!("MoveState {:?} -> {:?} on {:?}", self, next, event);
		}
		next
	}
	/// Whether a path is being held
	pub fn is_active(&self) -> bool {
		*self != MoveState::Idle
	}
}
