//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::grid::GridCell;

/// Grid side length used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: usize = 40;

/// Tunables for a placement session.
///
/// Unset optional fields derive from `grid_size`: the search radius and
/// the default centre both default to half the grid dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid_size: usize,
    /// Ceiling on the ring search radius.
    pub search_radius: Option<u32>,
    /// Search centre for placements that omit row or col, as `[row, col]`.
    pub default_center: Option<[i64; 2]>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            grid_size: DEFAULT_GRID_SIZE,
            search_radius: None,
            default_center: None,
        }
    }
}

impl SessionConfig {
    pub fn with_grid_size(grid_size: usize) -> Self {
        SessionConfig {
            grid_size,
            ..Self::default()
        }
    }

    pub fn radius(&self) -> u32 {
        self.search_radius
            .unwrap_or_else(|| u32::try_from(self.grid_size / 2).unwrap_or(u32::MAX))
    }

    pub fn center(&self) -> GridCell {
        match self.default_center {
            Some([row, col]) => GridCell::new(row, col),
            None => {
                let half = (self.grid_size / 2) as i64;
                GridCell::new(half, half)
            }
        }
    }
}
