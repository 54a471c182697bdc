//! **burrow-core** — grid types shared by the burrow crates.
//!
//! This crate provides the geometry primitives, the typed [`GridNode`]
//! cell handle with its bounds-aware neighbour helpers, the
//! [`MaterialGrid`] the world is made of, and the [`CellLayout`] that maps
//! cells to continuous world positions.

pub mod geom;
pub mod grid;
pub mod layout;
pub mod node;

pub use geom::{Point, Range, Vec2};
pub use grid::{MapError, Material, MaterialGrid};
pub use layout::{CellLayout, LayoutError};
pub use node::{Direction, GridNode, GridShape};
