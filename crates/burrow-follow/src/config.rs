use std::fmt;

use burrow_core::{CellLayout, LayoutError};
use burrow_paths::{CostError, EdgeCosts};

/// Tunables of a [`PathFollowSystem`](crate::PathFollowSystem).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FollowConfig {
    /// Step costs used by the search.
    pub costs: EdgeCosts,
    /// Where grid cells sit in world space.
    pub layout: CellLayout,
}

impl FollowConfig {
    pub fn with_costs(mut self, costs: EdgeCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_layout(mut self, layout: CellLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.costs.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

/// Rejected [`FollowConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    Costs(CostError),
    Layout(LayoutError),
}

impl From<CostError> for ConfigError {
    fn from(err: CostError) -> Self {
        Self::Costs(err)
    }
}

impl From<LayoutError> for ConfigError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Costs(err) => err.fmt(f),
            Self::Layout(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Costs(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}
