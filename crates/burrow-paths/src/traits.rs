use burrow_core::{GridNode, GridShape, MaterialGrid};

/// Read-only view of the grid a search runs over.
pub trait Terrain {
    /// Dimensions of the grid. A [`SearchWorkspace`](crate::SearchWorkspace)
    /// must be built for exactly this shape.
    fn shape(&self) -> GridShape;

    /// Whether `node` can be entered. Only called for nodes inside
    /// [`shape`](Self::shape).
    fn passable(&self, node: GridNode) -> bool;
}

impl Terrain for MaterialGrid {
    #[inline]
    fn shape(&self) -> GridShape {
        MaterialGrid::shape(self)
    }

    #[inline]
    fn passable(&self, node: GridNode) -> bool {
        MaterialGrid::passable(self, node)
    }
}
