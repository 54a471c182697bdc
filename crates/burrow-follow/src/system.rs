//! The per-tick driver: plan routes for movers that need one, then move
//! every follower along its route.

use burrow_core::{CellLayout, GridShape, Vec2};
use burrow_paths::{PathFinder, SearchWorkspace, Terrain};

use crate::config::{ConfigError, FollowConfig};
use crate::follower::{MoveState, Mover, PathFollower};

/// What happened during one [`PathFollowSystem::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Movers that needed a route at the start of the tick.
    pub searched: usize,
    /// Of those, how many got one.
    pub planned: usize,
    /// Movers that finished their route this tick.
    pub arrived: usize,
    /// Movers still walking a route at the end of the tick.
    pub moving: usize,
}

/// Drives [`Mover`]s towards their goals.
///
/// Owns the single [`SearchWorkspace`] shared by every search, so all
/// searches of a tick run one after another.
#[derive(Debug)]
pub struct PathFollowSystem {
    finder: PathFinder,
    workspace: SearchWorkspace,
    layout: CellLayout,
}

impl PathFollowSystem {
    /// Create a system for grids of `shape`. Fails if `config` does not
    /// validate.
    pub fn new(config: FollowConfig, shape: GridShape) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            finder: PathFinder::new(config.costs)?,
            workspace: SearchWorkspace::new(shape),
            layout: config.layout,
        })
    }

    #[inline]
    pub fn finder(&self) -> &PathFinder {
        &self.finder
    }

    #[inline]
    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// The grid shape searches run on.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.workspace.shape()
    }

    /// Rebuild the search workspace for a grid of a different size.
    pub fn set_shape(&mut self, shape: GridShape) {
        if shape != self.workspace.shape() {
            self.workspace = SearchWorkspace::new(shape);
        }
    }

    /// Run one tick: the search phase for every mover, then the movement
    /// phase for every mover, advancing by `dt` edges' worth of travel.
    pub fn tick<T: Terrain>(&mut self, grid: &T, movers: &mut [Mover], dt: f32) -> TickReport {
        let (searched, planned) = self.search_phase(grid, movers.iter_mut());
        let (moving, arrived) = self.move_phase(grid.shape(), movers.iter_mut(), dt);
        TickReport {
            searched,
            planned,
            arrived,
            moving,
        }
    }

    /// Plan routes for every mover waiting on one. Returns how many movers
    /// were searched for and how many got a route.
    pub fn search_phase<'a, T: Terrain>(
        &mut self,
        grid: &T,
        movers: impl IntoIterator<Item = &'a mut Mover>,
    ) -> (usize, usize) {
        let mut searched = 0;
        let mut planned = 0;
        for mover in movers {
            if !matches!(mover.follower, PathFollower::NeedsPath { .. }) {
                continue;
            }
            searched += 1;
            if self.plan(grid, mover) {
                planned += 1;
            }
        }
        (searched, planned)
    }

    /// Move every following mover. Returns how many are still moving and how
    /// many arrived.
    pub fn move_phase<'a>(
        &self,
        shape: GridShape,
        movers: impl IntoIterator<Item = &'a mut Mover>,
        dt: f32,
    ) -> (usize, usize) {
        let mut moving = 0;
        let mut arrived = 0;
        for mover in movers {
            if !matches!(mover.follower, PathFollower::Following { .. }) {
                continue;
            }
            if self.advance(shape, mover, dt) {
                arrived += 1;
            } else {
                moving += 1;
            }
        }
        (moving, arrived)
    }

    /// Search a route from the mover's current cell to its goal and start
    /// following it. Does nothing unless the mover is waiting for a route.
    ///
    /// Returns `false` when no route exists; the mover keeps waiting and
    /// the next call tries again.
    pub fn plan<T: Terrain>(&mut self, grid: &T, mover: &mut Mover) -> bool {
        let PathFollower::NeedsPath { goal } = mover.follower else {
            return false;
        };
        let shape = grid.shape();
        let Some(start) = self.layout.node_at(shape, mover.position) else {
            log::debug!("mover at {} is off the grid, cannot plan", mover.position);
            return false;
        };

        let mut path = Vec::new();
        if !self
            .finder
            .find_path_into(&mut self.workspace, grid, start, goal, &mut path)
        {
            log::debug!("no route from {start} to {goal}");
            return false;
        }
        let Some(to) = path.pop() else {
            return false;
        };

        log::trace!("planned {} steps from {start} to {goal}", path.len() + 1);
        mover.follower = PathFollower::Following {
            goal,
            path,
            step: MoveState {
                from: start,
                to,
                progress: 0.0,
            },
        };
        true
    }

    /// Advance a following mover by `dt`. Whole edges are consumed as long
    /// as progress allows, carrying leftover progress into the next edge.
    ///
    /// Returns `true` when the mover reached its goal during this call; it
    /// is then [`Idle`](PathFollower::Idle) and stands exactly on the goal.
    pub fn advance(&self, shape: GridShape, mover: &mut Mover, dt: f32) -> bool {
        let PathFollower::Following { goal, path, step } = &mut mover.follower else {
            return false;
        };

        step.progress += dt;
        let mut arrived = false;
        while step.progress >= 1.0 {
            match path.pop() {
                Some(next) => {
                    step.from = step.to;
                    step.to = next;
                    step.progress -= 1.0;
                }
                None => {
                    arrived = true;
                    break;
                }
            }
        }

        if arrived {
            let goal = *goal;
            mover.position = self.layout.world_pos(shape, step.to);
            mover.follower = PathFollower::Idle;
            log::debug!("mover arrived at {goal}");
            return true;
        }

        let from = self.layout.world_pos(shape, step.from);
        let to = self.layout.world_pos(shape, step.to);
        mover.position = Vec2::lerp(from, to, step.progress);
        false
    }
}
