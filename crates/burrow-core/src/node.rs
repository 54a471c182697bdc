//! Typed cell handles: [`GridNode`], [`Direction`] and [`GridShape`].
//!
//! A [`GridNode`] is the flat row-major index of a cell
//! (`row * width + column`). It carries no arithmetic; moving between cells
//! always goes through [`GridShape::neighbor`], which knows the grid bounds.

use std::fmt;

use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// GridNode
// ---------------------------------------------------------------------------

/// Opaque handle for one grid cell, by flat row-major index.
///
/// Ordering is by index only and carries no spatial meaning beyond
/// row-major iteration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GridNode(u32);

impl GridNode {
    /// Build a node from a flat index.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// The flat row-major index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GridNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four orthogonal movement directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Towards row 0.
    Up,
    Right,
    /// Towards the last row.
    Down,
    Left,
}

impl Direction {
    /// All directions, in neighbour expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset in cell coordinates.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Whether the move is along a row (left or right).
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

// ---------------------------------------------------------------------------
// GridShape
// ---------------------------------------------------------------------------

/// Dimensions of a grid, and the conversions between [`Point`] and
/// [`GridNode`] that depend on them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub width: u32,
    pub height: u32,
}

impl GridShape {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The cell rectangle `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Whether `node` addresses a cell of this shape.
    #[inline]
    pub const fn contains_node(self, node: GridNode) -> bool {
        node.index() < self.len()
    }

    /// Node for `p`, or `None` if `p` lies outside the grid.
    #[inline]
    pub fn node(self, p: Point) -> Option<GridNode> {
        if !self.contains(p) {
            return None;
        }
        Some(GridNode::from_index(
            p.y as usize * self.width as usize + p.x as usize,
        ))
    }

    /// Cell coordinates of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` lies outside the shape.
    #[inline]
    pub fn point(self, node: GridNode) -> Point {
        assert!(
            self.contains_node(node),
            "node {node} outside {}x{} grid",
            self.width,
            self.height
        );
        let w = self.width as usize;
        Point::new((node.index() % w) as i32, (node.index() / w) as i32)
    }

    /// The neighbour of `node` one step in `dir`, or `None` at the grid edge.
    #[inline]
    pub fn neighbor(self, node: GridNode, dir: Direction) -> Option<GridNode> {
        self.node(self.point(node) + dir.offset())
    }

    /// Direction of the single step from `from` to `to`, or `None` if the
    /// two nodes are not orthogonally adjacent.
    pub fn direction(self, from: GridNode, to: GridNode) -> Option<Direction> {
        let d = self.point(to) - self.point(from);
        Direction::ALL.into_iter().find(|dir| dir.offset() == d)
    }

    #[inline]
    pub fn is_adjacent(self, a: GridNode, b: GridNode) -> bool {
        self.direction(a, b).is_some()
    }

    /// Row-major iterator over every node.
    pub fn nodes(self) -> impl Iterator<Item = GridNode> {
        (0..self.len()).map(GridNode::from_index)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
