//! Mapping between grid cells and continuous world positions.

use std::fmt;

use crate::geom::{Point, Vec2};
use crate::node::{GridNode, GridShape};

/// Coordinates within this many cells below an integer count as that
/// integer, so `world_pos(n)` always maps back to `n` despite f32 rounding.
const SNAP: f32 = 1e-4;

/// Relative share of [`SNAP`] for coordinates far from the origin.
const SNAP_REL: f32 = 1e-6;

/// Placement of the grid in world space.
///
/// Cell `(col, row)` sits at `origin + (col, row) * cell_size`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CellLayout {
    /// World-space edge length of one cell. Must be positive and finite,
    /// see [`CellLayout::validate`].
    pub cell_size: f32,
    /// World position of cell (0, 0).
    pub origin: Vec2,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            origin: Vec2::ZERO,
        }
    }
}

impl CellLayout {
    /// Check that the layout maps every position to exactly one cell.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(LayoutError::CellSize(self.cell_size));
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(LayoutError::Origin(self.origin));
        }
        Ok(())
    }

    /// World position of cell `p`.
    #[inline]
    pub fn world(&self, p: Point) -> Vec2 {
        Vec2::new(
            self.origin.x + p.x as f32 * self.cell_size,
            self.origin.y + p.y as f32 * self.cell_size,
        )
    }

    /// World position of `node`.
    #[inline]
    pub fn world_pos(&self, shape: GridShape, node: GridNode) -> Vec2 {
        self.world(shape.point(node))
    }

    /// Cell coordinates under `pos`, truncated toward zero. Positions a
    /// rounding error short of a cell boundary land in the next cell.
    #[inline]
    pub fn cell_at(&self, pos: Vec2) -> Point {
        let rel = pos - self.origin;
        Point::new(
            truncate(rel.x / self.cell_size),
            truncate(rel.y / self.cell_size),
        )
    }

    /// Node under `pos`, or `None` if it lies outside the grid.
    #[inline]
    pub fn node_at(&self, shape: GridShape, pos: Vec2) -> Option<GridNode> {
        shape.node(self.cell_at(pos))
    }
}

fn truncate(v: f32) -> i32 {
    let nearest = v.round();
    if (v - nearest).abs() <= SNAP.max(v.abs() * SNAP_REL) {
        nearest as i32
    } else {
        v.trunc() as i32
    }
}

/// Rejected [`CellLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// Cell size is zero, negative or not finite.
    CellSize(f32),
    /// Origin has a non-finite coordinate.
    Origin(Vec2),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellSize(size) => {
                write!(f, "cell layout: cell size must be positive and finite, got {size}")
            }
            Self::Origin(origin) => write!(f, "cell layout: origin {origin} is not finite"),
        }
    }
}

impl std::error::Error for LayoutError {}
