//! In-memory sub-cube with random element and spectrum access

use crate::error::{HsiError, Result};
use crate::layout::{Coord, CubeShape};
use crate::types::{Axis, DataType, InterleaveFormat, Scalar};
use crate::utils::format_bytes;
use bytes::Bytes;
use log::warn;
use ndarray::Array2;

/// A sub-cube held in memory in host byte order
///
/// Elements are laid out in the cube's interleave order using the cube's own
/// dimensions, never those of the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCube {
    shape: CubeShape,
    interleave: InterleaveFormat,
    data_type: DataType,
    data: Bytes,
}

impl DataCube {
    /// Wrap a host-order buffer, checking its length against the shape
    pub fn new(
        shape: CubeShape,
        interleave: InterleaveFormat,
        data_type: DataType,
        data: impl Into<Bytes>,
    ) -> Result<Self> {
        shape.validate()?;
        let data = data.into();
        check_len(shape, data_type, data.len())?;
        Ok(Self {
            shape,
            interleave,
            data_type,
            data,
        })
    }

    pub fn shape(&self) -> CubeShape {
        self.shape
    }

    pub fn num_rows(&self) -> usize {
        self.shape.rows
    }

    pub fn num_cols(&self) -> usize {
        self.shape.cols
    }

    pub fn num_bands(&self) -> usize {
        self.shape.bands
    }

    pub fn interleave(&self) -> InterleaveFormat {
        self.interleave
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Raw element bytes in host byte order
    pub fn raw_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Swap in a new buffer of the same shape and type
    pub fn replace_data(&mut self, data: impl Into<Bytes>) -> Result<()> {
        let data = data.into();
        check_len(self.shape, self.data_type, data.len())?;
        self.data = data;
        Ok(())
    }

    /// Element at (row, col, band), failing if any coordinate is out of range
    pub fn try_get_value(&self, row: usize, col: usize, band: usize) -> Result<Scalar> {
        let coord = Coord::new(row, col, band);
        for axis in [Axis::Row, Axis::Column, Axis::Band] {
            let size = self.shape.get(axis);
            if coord.get(axis) >= size {
                return Err(HsiError::OutOfBounds {
                    axis,
                    index: coord.get(axis),
                    bound: size - 1,
                });
            }
        }
        let width = self.data_type.size_in_bytes();
        let offset = self.shape.linear_index(self.interleave, coord) * width;
        Scalar::from_bytes(self.data_type, &self.data[offset..]).ok_or(HsiError::BufferSize {
            expected: offset + width,
            actual: self.data.len(),
        })
    }

    /// Element at (row, col, band).
    ///
    /// An out-of-range coordinate is logged and yields a zero of the cube's
    /// data type, so a caller sweeping many coordinates is not aborted.
    pub fn get_value(&self, row: usize, col: usize, band: usize) -> Scalar {
        self.try_get_value(row, col, band).unwrap_or_else(|e| {
            warn!("{}", e);
            Scalar::zero(self.data_type)
        })
    }

    /// All bands of one pixel, in band order
    pub fn get_spectrum(&self, row: usize, col: usize) -> Vec<Scalar> {
        (0..self.shape.bands)
            .map(|band| self.get_value(row, col, band))
            .collect()
    }

    pub fn spectrum_as_f64(&self, row: usize, col: usize) -> Vec<f64> {
        self.get_spectrum(row, col)
            .iter()
            .map(Scalar::to_f64)
            .collect()
    }

    /// One band as a `(num_rows, num_cols)` image
    pub fn band_image(&self, band: usize) -> Result<Array2<f64>> {
        if band >= self.shape.bands {
            return Err(HsiError::OutOfBounds {
                axis: Axis::Band,
                index: band,
                bound: self.shape.bands - 1,
            });
        }
        let width = self.data_type.size_in_bytes();
        Ok(Array2::from_shape_fn(
            (self.shape.rows, self.shape.cols),
            |(row, col)| {
                let offset =
                    self.shape.linear_index(self.interleave, Coord::new(row, col, band)) * width;
                Scalar::from_bytes(self.data_type, &self.data[offset..offset + width])
                    .map_or(0.0, |scalar| scalar.to_f64())
            },
        ))
    }

    /// Get a summary string of the cube
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {}), {}",
            self.shape.summary(),
            self.interleave,
            self.data_type,
            format_bytes(self.data.len())
        )
    }
}

fn check_len(shape: CubeShape, data_type: DataType, actual: usize) -> Result<()> {
    let expected = shape.checked_size_bytes(data_type).ok_or_else(|| {
        HsiError::InvalidDimensions(format!("{} overflows the address space", shape.summary()))
    })?;
    if actual != expected {
        return Err(HsiError::BufferSize { expected, actual });
    }
    Ok(())
}
