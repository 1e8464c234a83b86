//! Cube layout - maps (row, col, band) coordinates to linear element indices

use crate::error::{HsiError, Result};
use crate::types::{Axis, DataType, InterleaveFormat};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A zero-indexed (row, col, band) position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
    pub band: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize, band: usize) -> Self {
        Self { row, col, band }
    }

    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.col,
            Axis::Band => self.band,
        }
    }

    fn set(&mut self, axis: Axis, value: usize) {
        match axis {
            Axis::Row => self.row = value,
            Axis::Column => self.col = value,
            Axis::Band => self.band = value,
        }
    }
}

/// Dimensions of a cube, either a full file or an in-memory sub-cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeShape {
    pub rows: usize,
    pub cols: usize,
    pub bands: usize,
}

impl CubeShape {
    pub fn new(rows: usize, cols: usize, bands: usize) -> Self {
        Self { rows, cols, bands }
    }

    /// Size along one axis
    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.cols,
            Axis::Band => self.bands,
        }
    }

    /// Fail unless every dimension is positive and the element count fits
    /// in a `usize`
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.bands == 0 {
            return Err(HsiError::InvalidDimensions(format!(
                "all dimensions must be positive, got {} x {} x {}",
                self.rows, self.cols, self.bands
            )));
        }
        if self.checked_total_elements().is_none() {
            return Err(HsiError::InvalidDimensions(format!(
                "{} x {} x {} elements overflow the address space",
                self.rows, self.cols, self.bands
            )));
        }
        Ok(())
    }

    /// Element count, or `None` on overflow
    pub fn checked_total_elements(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)?.checked_mul(self.bands)
    }

    /// Size in bytes, or `None` on overflow
    pub fn checked_size_bytes(&self, data_type: DataType) -> Option<usize> {
        self.checked_total_elements()?
            .checked_mul(data_type.size_in_bytes())
    }

    /// Element count of a validated shape
    pub fn total_elements(&self) -> usize {
        self.rows * self.cols * self.bands
    }

    pub fn total_size_bytes(&self, data_type: DataType) -> usize {
        self.total_elements() * data_type.size_in_bytes()
    }

    /// Check if a coordinate lies inside the cube
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols && coord.band < self.bands
    }

    /// Linear element index of `coord` in a cube of this shape stored as `format`.
    ///
    /// `coord` must be in bounds and the shape validated.
    pub fn linear_index(&self, format: InterleaveFormat, coord: Coord) -> usize {
        let Coord { row, col, band } = coord;
        match format {
            InterleaveFormat::Bsq => band * (self.rows * self.cols) + row * self.cols + col,
            InterleaveFormat::Bil => row * (self.bands * self.cols) + band * self.cols + col,
            InterleaveFormat::Bip => row * (self.bands * self.cols) + col * self.bands + band,
        }
    }

    /// Ranges covering the whole cube, indexed row, column, band
    pub fn full_extents(&self) -> [Range<usize>; 3] {
        [0..self.rows, 0..self.cols, 0..self.bands]
    }

    /// Get a summary string of the shape
    pub fn summary(&self) -> String {
        format!("{} rows x {} cols x {} bands", self.rows, self.cols, self.bands)
    }
}

/// Iterates the coordinates of a sub-cube in the nested order of a format's
/// physical layout, so consecutive coordinates are adjacent on disk whenever
/// the sub-cube spans the inner axes completely.
#[derive(Debug, Clone)]
pub struct TraversalOrder {
    order: [Axis; 3],
    extents: [Range<usize>; 3],
    next: Option<Coord>,
}

impl TraversalOrder {
    /// `extents` are indexed row, column, band
    pub fn new(format: InterleaveFormat, extents: [Range<usize>; 3]) -> Self {
        let next = if extents.iter().any(|r| r.is_empty()) {
            None
        } else {
            Some(Coord::new(
                extents[0].start,
                extents[1].start,
                extents[2].start,
            ))
        };
        Self {
            order: format.axis_order(),
            extents,
            next,
        }
    }

    fn extent(&self, axis: Axis) -> &Range<usize> {
        match axis {
            Axis::Row => &self.extents[0],
            Axis::Column => &self.extents[1],
            Axis::Band => &self.extents[2],
        }
    }
}

impl Iterator for TraversalOrder {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let current = self.next?;

        // Odometer increment, innermost axis first
        let mut advanced = current;
        let mut carried_out = true;
        for &axis in self.order.iter().rev() {
            let extent = self.extent(axis).clone();
            let value = advanced.get(axis) + 1;
            if value < extent.end {
                advanced.set(axis, value);
                carried_out = false;
                break;
            }
            advanced.set(axis, extent.start);
        }
        self.next = if carried_out { None } else { Some(advanced) };

        Some(current)
    }
}
