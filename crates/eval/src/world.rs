//! The mutable state placement handlers act on.

use crate::config::SessionConfig;
use crate::error::PlacementError;
use crate::grid::{GridAllocator, GridCell, ValidityMask};
use crate::placement::{ObjectKind, PlacedObject, Placement, RoadDirection};

/// Optional attributes recorded alongside a placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    pub name: Option<String>,
    pub floors: Option<u32>,
    pub direction: Option<RoadDirection>,
}

/// Occupancy plus the log of placed objects for one session.
#[derive(Debug, Clone)]
pub struct World {
    grid: GridAllocator,
    placed: Vec<PlacedObject>,
    search_radius: u32,
    default_center: GridCell,
}

impl World {
    /// Unset radius and centre derive from the mask's size, not from
    /// `config.grid_size`.
    pub fn new(mask: ValidityMask, config: &SessionConfig) -> Self {
        let config = SessionConfig {
            grid_size: mask.size(),
            ..config.clone()
        };
        World {
            grid: GridAllocator::new(mask),
            placed: Vec::new(),
            search_radius: config.radius(),
            default_center: config.center(),
        }
    }

    pub fn grid(&self) -> &GridAllocator {
        &self.grid
    }

    pub fn placed(&self) -> &[PlacedObject] {
        &self.placed
    }

    pub fn search_radius(&self) -> u32 {
        self.search_radius
    }

    pub fn default_center(&self) -> GridCell {
        self.default_center
    }

    /// Place at `(row, col)` if both are given and free; otherwise take the
    /// nearest free cell around the preferred position, with missing
    /// coordinates replaced by the default centre.
    pub fn place_near(
        &mut self,
        kind: ObjectKind,
        row: Option<i64>,
        col: Option<i64>,
        details: Details,
    ) -> Result<Placement, PlacementError> {
        let exact = match (row, col) {
            (Some(r), Some(c)) => Some(GridCell::new(r, c)).filter(|&cell| self.grid.is_free(cell)),
            _ => None,
        };
        let cell = match exact {
            Some(cell) => cell,
            None => {
                let center = GridCell::new(
                    row.unwrap_or(self.default_center.row),
                    col.unwrap_or(self.default_center.col),
                );
                self.grid
                    .find_free_cell(center, self.search_radius)
                    .ok_or_else(|| PlacementError::NoFreeCell {
                        kind: kind.to_string(),
                        row: center.row,
                        col: center.col,
                        radius: self.search_radius,
                    })?
            }
        };
        self.commit(kind, cell, details)
    }

    /// Place exactly at `cell` or fail.
    pub fn place_at(
        &mut self,
        kind: ObjectKind,
        cell: GridCell,
        details: Details,
    ) -> Result<Placement, PlacementError> {
        self.commit(kind, cell, details)
    }

    fn commit(
        &mut self,
        kind: ObjectKind,
        cell: GridCell,
        details: Details,
    ) -> Result<Placement, PlacementError> {
        self.grid.reserve(cell)?;
        self.placed.push(PlacedObject {
            cell,
            kind,
            name: details.name,
            floors: details.floors,
            direction: details.direction,
        });
        Ok(Placement {
            row: cell.row,
            col: cell.col,
            kind,
        })
    }

    /// Remove every placed object and release all reservations.
    /// Returns how many objects were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.placed.len();
        self.placed.clear();
        self.grid.reset();
        removed
    }

    /// Text map: `~` water, `.` free land, a kind glyph per placed object.
    pub fn render_map(&self) -> String {
        let size = self.grid.mask().size();
        let mut rows: Vec<Vec<char>> = (0..size)
            .map(|r| {
                (0..size)
                    .map(|c| {
                        if self.grid.mask().is_land(GridCell::new(r as i64, c as i64)) {
                            '.'
                        } else {
                            '~'
                        }
                    })
                    .collect()
            })
            .collect();
        for obj in &self.placed {
            if let Some(slot) = rows
                .get_mut(obj.cell.row as usize)
                .and_then(|row| row.get_mut(obj.cell.col as usize))
            {
                *slot = obj.kind.glyph();
            }
        }
        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
