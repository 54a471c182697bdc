//! Per-entity path-following state.

use burrow_core::{GridNode, Vec2};

/// The edge currently being walked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveState {
    pub from: GridNode,
    pub to: GridNode,
    /// Fraction of the edge already covered, in `[0, 1)` between ticks.
    pub progress: f32,
}

/// Which phase a [`PathFollower`] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowState {
    Idle,
    NeedsPath,
    Following,
}

/// Path-following state machine of one entity.
///
/// `Idle` has no goal. `NeedsPath` has a goal but no route yet; the search
/// phase retries it every tick until a route exists. `Following` walks
/// `step` and keeps the rest of the route in `path`, in reverse travel
/// order, so the next cell is `path.last()`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathFollower {
    #[default]
    Idle,
    NeedsPath {
        goal: GridNode,
    },
    Following {
        goal: GridNode,
        path: Vec<GridNode>,
        step: MoveState,
    },
}

impl PathFollower {
    /// Request a route to `goal`. Any route in progress is dropped; the
    /// next search phase plans from the cell the entity stands in.
    pub fn set_goal(&mut self, goal: GridNode) {
        *self = PathFollower::NeedsPath { goal };
    }

    /// Abandon the current goal and stop.
    pub fn clear_goal(&mut self) {
        *self = PathFollower::Idle;
    }

    pub fn state(&self) -> FollowState {
        match self {
            PathFollower::Idle => FollowState::Idle,
            PathFollower::NeedsPath { .. } => FollowState::NeedsPath,
            PathFollower::Following { .. } => FollowState::Following,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, PathFollower::Idle)
    }

    pub fn goal(&self) -> Option<GridNode> {
        match self {
            PathFollower::Idle => None,
            PathFollower::NeedsPath { goal } | PathFollower::Following { goal, .. } => Some(*goal),
        }
    }

    /// The edge being walked, if any.
    pub fn move_state(&self) -> Option<&MoveState> {
        match self {
            PathFollower::Following { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Cells still to visit after the current edge, destination first.
    pub fn remaining(&self) -> &[GridNode] {
        match self {
            PathFollower::Following { path, .. } => path,
            _ => &[],
        }
    }
}

/// The per-entity record the tick driver reads and writes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mover {
    /// Continuous world position.
    pub position: Vec2,
    pub follower: PathFollower,
}

impl Mover {
    /// An idle mover at `position`.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            follower: PathFollower::Idle,
        }
    }
}
