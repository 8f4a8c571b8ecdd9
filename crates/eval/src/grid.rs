//! Grid occupancy: the land mask, the set of reserved cells and the
//! nearest-free-cell ring search.
//!
//! A cell is free iff it is inside the grid, marked as land in the
//! [`ValidityMask`] and not yet reserved. Reservations only grow until
//! [`GridAllocator::reset`] clears them all.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MaskError, PlacementError};

// ──────────────────────────────────────────────
// Cells
// ──────────────────────────────────────────────

/// A `(row, col)` grid coordinate. May lie outside the grid; bounds are
/// checked against the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub row: i64,
    pub col: i64,
}

impl GridCell {
    pub fn new(row: i64, col: i64) -> Self {
        GridCell { row, col }
    }

    /// Chebyshev (chessboard) distance.
    pub fn ring_distance(&self, other: GridCell) -> u64 {
        self.row
            .abs_diff(other.row)
            .max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ──────────────────────────────────────────────
// Validity mask
// ──────────────────────────────────────────────

/// Square boolean grid marking buildable land. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask {
    size: usize,
    cells: Vec<bool>,
}

impl ValidityMask {
    /// Every cell is land.
    pub fn all_land(size: usize) -> Self {
        ValidityMask {
            size,
            cells: vec![true; size * size],
        }
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, MaskError> {
        let size = rows.len();
        if size == 0 {
            return Err(MaskError::Empty);
        }
        let cols = rows[0].len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != cols {
                return Err(MaskError::Ragged {
                    row,
                    len: cells.len(),
                    expected: cols,
                });
            }
        }
        if cols != size {
            return Err(MaskError::NotSquare { rows: size, cols });
        }
        Ok(ValidityMask {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse a text mask: one row per line. `#`, `1`, `X`, `x` mark land;
    /// `.`, `0`, `~`, `_` mark water. Blank lines and surrounding spaces are
    /// ignored.
    pub fn parse_text(text: &str) -> Result<Self, MaskError> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = rows.len();
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, glyph)| match glyph {
                    '#' | '1' | 'X' | 'x' => Ok(true),
                    '.' | '0' | '~' | '_' => Ok(false),
                    _ => Err(MaskError::UnknownGlyph { glyph, row, col }),
                })
                .collect::<Result<Vec<bool>, MaskError>>()?;
            rows.push(cells);
        }
        Self::from_rows(rows)
    }

    /// Parse a JSON array of boolean rows.
    pub fn from_json(text: &str) -> Result<Self, MaskError> {
        let rows: Vec<Vec<bool>> = serde_json::from_str(text)?;
        Self::from_rows(rows)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        let n = self.size as i64;
        (0..n).contains(&cell.row) && (0..n).contains(&cell.col)
    }

    /// True when the cell is inside the grid and marked as land.
    pub fn is_land(&self, cell: GridCell) -> bool {
        self.in_bounds(cell) && self.cells[cell.row as usize * self.size + cell.col as usize]
    }

    pub fn land_count(&self) -> usize {
        self.cells.iter().filter(|&&land| land).count()
    }
}

// ──────────────────────────────────────────────
// Allocator
// ──────────────────────────────────────────────

/// In-grid cells of ring `d` around `center`, in search order.
///
/// Row offsets run outer from `-d` to `+d`, column offsets inner; only
/// cells on the ring boundary are yielded. Cells outside a `size × size`
/// grid are skipped without being visited.
pub fn ring(center: GridCell, d: i64, size: usize) -> impl Iterator<Item = GridCell> {
    let last = size as i64 - 1;
    let dr_lo = (-d).max(-center.row);
    let dr_hi = d.min(last - center.row);
    let dc_lo = (-d).max(-center.col);
    let dc_hi = d.min(last - center.col);
    let cols_in = move |dc: &i64| (dc_lo..=dc_hi).contains(dc);

    (dr_lo..=dr_hi).flat_map(move |dr| {
        let cols: Box<dyn Iterator<Item = i64>> = if dr.abs() == d {
            Box::new(dc_lo..=dc_hi)
        } else {
            Box::new([-d, d].into_iter().filter(cols_in))
        };
        cols.map(move |dc| GridCell::new(center.row + dr, center.col + dc))
    })
}

fn axis_gap(v: i64, last: i64) -> u64 {
    if v < 0 {
        v.unsigned_abs()
    } else if v > last {
        v.abs_diff(last)
    } else {
        0
    }
}

/// Tracks reserved cells over a fixed validity mask.
#[derive(Debug, Clone)]
pub struct GridAllocator {
    mask: ValidityMask,
    reserved: BTreeSet<GridCell>,
}

impl GridAllocator {
    pub fn new(mask: ValidityMask) -> Self {
        GridAllocator {
            mask,
            reserved: BTreeSet::new(),
        }
    }

    pub fn mask(&self) -> &ValidityMask {
        &self.mask
    }

    pub fn is_reserved(&self, cell: GridCell) -> bool {
        self.reserved.contains(&cell)
    }

    /// In bounds, land, and not reserved.
    pub fn is_free(&self, cell: GridCell) -> bool {
        self.mask.is_land(cell) && !self.is_reserved(cell)
    }

    /// Reserve a free cell. Fails without side effects if the cell is not free.
    pub fn reserve(&mut self, cell: GridCell) -> Result<(), PlacementError> {
        if !self.is_free(cell) {
            return Err(PlacementError::CellUnavailable {
                row: cell.row,
                col: cell.col,
            });
        }
        self.reserved.insert(cell);
        Ok(())
    }

    /// Nearest free cell to `center` by expanding ring search, or `None`
    /// if no ring up to `max_radius` contains one.
    ///
    /// Deterministic: the same mask, reservations, centre and radius
    /// always give the same answer.
    pub fn find_free_cell(&self, center: GridCell, max_radius: u32) -> Option<GridCell> {
        let (nearest, farthest) = self.ring_span(center)?;
        let limit = u64::from(max_radius).min(farthest) as i64;
        let size = self.mask.size();
        for d in nearest as i64..=limit {
            if let Some(cell) = ring(center, d, size).find(|&cell| self.is_free(cell)) {
                tracing::trace!(%center, %cell, ring = d, "free cell found");
                return Some(cell);
            }
        }
        tracing::trace!(%center, max_radius, "no free cell in search radius");
        None
    }

    /// First and last ring around `center` that touch the grid at all.
    /// Rings outside this span hold no in-bounds cell.
    fn ring_span(&self, center: GridCell) -> Option<(u64, u64)> {
        let last = self.mask.size() as i64 - 1;
        if last < 0 {
            return None;
        }
        let nearest = axis_gap(center.row, last).max(axis_gap(center.col, last));
        let farthest = [(0, 0), (0, last), (last, 0), (last, last)]
            .into_iter()
            .map(|(r, c)| center.ring_distance(GridCell::new(r, c)))
            .max()
            .unwrap_or(0);
        Some((nearest, farthest))
    }

    /// Drop every reservation. The mask is untouched.
    pub fn reset(&mut self) {
        tracing::debug!(released = self.reserved.len(), "occupancy reset");
        self.reserved.clear();
    }

    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }
}
