use std::fmt;

use burrow_core::Direction;

/// Per-direction cost of one grid step.
///
/// Costs are asymmetric: the default profile makes falling (moving down)
/// cheapest and climbing (moving up) most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeCosts {
    /// Cost of a step to the left or right.
    pub horizontal: u32,
    /// Cost of a step towards row 0.
    pub up: u32,
    /// Cost of a step towards the last row.
    pub down: u32,
}

impl Default for EdgeCosts {
    fn default() -> Self {
        Self {
            horizontal: 2,
            up: 4,
            down: 1,
        }
    }
}

impl EdgeCosts {
    /// Every direction costs `cost`.
    pub const fn uniform(cost: u32) -> Self {
        Self {
            horizontal: cost,
            up: cost,
            down: cost,
        }
    }

    /// Cost of one step in `dir`.
    #[inline]
    pub const fn cost(&self, dir: Direction) -> u32 {
        match dir {
            Direction::Left | Direction::Right => self.horizontal,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Check that every cost is strictly positive.
    pub fn validate(&self) -> Result<(), CostError> {
        for dir in [Direction::Right, Direction::Up, Direction::Down] {
            if self.cost(dir) == 0 {
                return Err(CostError::ZeroCost(dir));
            }
        }
        Ok(())
    }
}

/// Rejected cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostError {
    /// Steps in this direction would be free.
    ZeroCost(Direction),
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCost(dir) if dir.is_horizontal() => {
                write!(f, "edge costs: horizontal cost must be positive")
            }
            Self::ZeroCost(dir) => write!(f, "edge costs: {dir:?} cost must be positive"),
        }
    }
}

impl std::error::Error for CostError {}
