//! Shortest-path search over material grids.
//!
//! [`PathFinder`] runs a uniform-cost (Dijkstra-style) search from one cell
//! to another, over 4-connected passable cells, with per-direction step
//! costs from an [`EdgeCosts`] table. The search stops as soon as the
//! destination's cost can no longer improve.
//!
//! All scratch memory lives in a [`SearchWorkspace`] owned by the caller and
//! reused across searches, so steady-state queries do not allocate. Only one
//! search may use a workspace at a time.
//!
//! Routes are returned in **reverse** travel order: the destination comes
//! first and the start cell is omitted, so `Vec::pop` hands out the next
//! cell to walk to.

mod costs;
mod distance;
mod search;
mod traits;
mod workspace;

pub use costs::{CostError, EdgeCosts};
pub use distance::manhattan;
pub use search::PathFinder;
pub use traits::Terrain;
pub use workspace::{SearchWorkspace, VisitState};
