use burrow_core::{GridNode, GridShape};

/// Search bookkeeping state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached by the current search.
    #[default]
    Unvisited,
    /// Reached, still on the frontier.
    Seen,
    /// Expanded; its cost is final.
    Visited,
}

/// Predecessor of the search source.
pub(crate) const NO_PARENT: GridNode = GridNode::from_index(u32::MAX as usize);

// ---------------------------------------------------------------------------
// SearchWorkspace
// ---------------------------------------------------------------------------

/// Reusable scratch memory for shortest-path searches on one grid shape.
///
/// All per-node arrays are allocated once in [`new`](Self::new) so that
/// repeated searches incur no allocations after warm-up. A workspace
/// serves one search at a time; concurrent searchers each need their own.
///
/// Costs, lengths and predecessors are only meaningful for nodes the last
/// search marked [`Seen`](VisitState::Seen) or
/// [`Visited`](VisitState::Visited); the accessors return `None` for
/// anything else.
pub struct SearchWorkspace {
    pub(crate) shape: GridShape,
    pub(crate) state: Vec<VisitState>,
    pub(crate) cost: Vec<u32>,
    pub(crate) length: Vec<u32>,
    pub(crate) parent: Vec<GridNode>,
    pub(crate) frontier: Vec<GridNode>,
}

impl SearchWorkspace {
    /// Create a workspace sized for `shape`.
    pub fn new(shape: GridShape) -> Self {
        let len = shape.len();
        Self {
            shape,
            state: vec![VisitState::Unvisited; len],
            cost: vec![0; len],
            length: vec![0; len],
            parent: vec![NO_PARENT; len],
            frontier: Vec::with_capacity(shape.width.max(shape.height) as usize * 2),
        }
    }

    /// The grid shape this workspace was built for.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Forget the previous search: every node becomes unvisited and the
    /// frontier is emptied. Stale costs are left in place; they are never
    /// read for unvisited nodes.
    pub fn reset(&mut self) {
        self.state.fill(VisitState::Unvisited);
        self.frontier.clear();
    }

    /// Visit state of `node` after the last search.
    #[inline]
    pub fn visit_state(&self, node: GridNode) -> VisitState {
        self.state[node.index()]
    }

    /// Cheapest known cost from the last search's source to `node`.
    pub fn cost(&self, node: GridNode) -> Option<u32> {
        self.reached(node).then(|| self.cost[node.index()])
    }

    /// Number of steps on the cheapest known route to `node`.
    pub fn path_length(&self, node: GridNode) -> Option<u32> {
        self.reached(node).then(|| self.length[node.index()])
    }

    /// Node preceding `node` on its cheapest known route. `None` for the
    /// source and for unreached nodes.
    pub fn predecessor(&self, node: GridNode) -> Option<GridNode> {
        if !self.reached(node) {
            return None;
        }
        let p = self.parent[node.index()];
        (p != NO_PARENT).then_some(p)
    }

    /// Number of nodes currently on the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    fn reached(&self, node: GridNode) -> bool {
        self.state[node.index()] != VisitState::Unvisited
    }
}

impl std::fmt::Debug for SearchWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorkspace")
            .field("shape", &self.shape)
            .field("frontier", &self.frontier.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SearchWorkspace {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.shape.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SearchWorkspace {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let shape = GridShape::deserialize(deserializer)?;
        Ok(SearchWorkspace::new(shape))
    }
}
