//! Per-tick path following for grid-bound entities.
//!
//! Each entity is a [`Mover`]: a continuous world position plus a
//! [`PathFollower`] state machine (`Idle`, `NeedsPath`, `Following`).
//! [`PathFollowSystem::tick`] runs two phases in a fixed order:
//!
//! 1. **search** — every mover waiting for a route gets one planned from the
//!    cell it stands in, reusing one shared search workspace. Movers with no
//!    route keep waiting and are retried on the next tick.
//! 2. **movement** — every following mover advances along its current edge,
//!    consuming as many whole edges as the elapsed time allows, and returns
//!    to `Idle` once the goal is reached.
//!
//! Routes are not checked against later grid edits; a mover walks the route
//! it was given.

mod config;
mod follower;
mod system;

pub use config::{ConfigError, FollowConfig};
pub use follower::{FollowState, MoveState, Mover, PathFollower};
pub use system::{PathFollowSystem, TickReport};
