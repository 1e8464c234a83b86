//! Reading sub-cubes from raw cube files and writing them back out

use crate::codec::{host_is_big_endian, ElementCodec};
use crate::cube::DataCube;
use crate::error::{HsiError, Result};
use crate::layout::{CubeShape, TraversalOrder};
use crate::metadata::{DataOptions, DataRange};
use crate::types::Axis;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Reads rectangular sub-cubes from the file described by a [`DataOptions`]
///
/// Each call opens its own file handle, so independent readers may run on
/// separate threads.
#[derive(Debug, Clone)]
pub struct DataReader {
    options: DataOptions,
    host_big_endian: bool,
}

impl DataReader {
    pub fn new(options: DataOptions) -> Self {
        Self {
            options,
            host_big_endian: host_is_big_endian(),
        }
    }

    pub fn options(&self) -> &DataOptions {
        &self.options
    }

    /// Read the elements inside `range` into memory
    pub fn read(&self, range: &DataRange) -> Result<DataCube> {
        self.options.validate()?;
        let extents = self.validate_range(range)?;
        let shape = CubeShape::new(extents[0].len(), extents[1].len(), extents[2].len());

        let path = &self.options.file_path;
        let file = File::open(path).map_err(|e| HsiError::io(path, e))?;
        let mut source = BufReader::new(file);

        let codec = ElementCodec::with_host(
            self.options.data_type,
            self.options.big_endian,
            self.host_big_endian,
        );
        let width = codec.width() as u64;
        let full = self.options.shape();
        let format = self.options.interleave;
        let mut data = Vec::with_capacity(shape.total_size_bytes(self.options.data_type));

        let mut previous: Option<u64> = None;
        let mut seeks = 0usize;
        for coord in TraversalOrder::new(format, extents) {
            let index = full.linear_index(format, coord) as u64 + self.options.header_offset;
            // Contiguous runs continue from the current file position
            if previous.map_or(true, |p| index != p + 1) {
                source
                    .seek(SeekFrom::Start(index * width))
                    .map_err(|e| HsiError::io(path, e))?;
                seeks += 1;
            }
            let element = codec
                .read_element(&mut source)
                .map_err(|e| HsiError::io(path, e))?;
            data.extend_from_slice(&element);
            previous = Some(index);
        }

        debug!("{} seeks for {} elements", seeks, shape.total_elements());
        let cube = DataCube::new(shape, format, self.options.data_type, data)?;
        info!("Read {} from {}", cube.summary(), path.display());
        Ok(cube)
    }

    /// Check `range` against the full cube, returning extents indexed row,
    /// column, band.
    fn validate_range(&self, range: &DataRange) -> Result<[Range<usize>; 3]> {
        let full = self.options.shape();
        for axis in [Axis::Row, Axis::Column, Axis::Band] {
            let (start, end) = range.axis(axis);
            let bound = full.get(axis);
            if start < 0 || end > bound as i64 {
                return Err(HsiError::Range {
                    axis,
                    start,
                    end,
                    bound,
                });
            }
        }

        let mut extents = [0..0, 0..0, 0..0];
        for (slot, axis) in extents.iter_mut().zip([Axis::Row, Axis::Column, Axis::Band]) {
            let (start, end) = range.axis(axis);
            if end <= start {
                return Err(HsiError::NonPositiveSpan { axis, start, end });
            }
            *slot = start as usize..end as usize;
        }
        Ok(extents)
    }

    /// Write `cube` to `path` in its stored order, restoring the byte order of
    /// this reader's file.
    pub fn write(&self, cube: &DataCube, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| HsiError::io(path, e))?;
        let mut sink = BufWriter::new(file);

        let codec = ElementCodec::with_host(
            cube.data_type(),
            self.options.big_endian,
            self.host_big_endian,
        );
        for element in cube.raw_bytes().chunks_exact(codec.width()) {
            sink.write_all(&codec.write_element(element))
                .map_err(|e| HsiError::io(path, e))?;
        }
        sink.flush().map_err(|e| HsiError::io(path, e))?;

        info!("Wrote {} to {}", cube.summary(), path.display());
        Ok(())
    }

    /// Write `cube` to `path` plus a header next to it (`<path>.hdr`) that
    /// describes the written file. Returns the options for reading it back.
    pub fn write_with_header(&self, cube: &DataCube, path: impl AsRef<Path>) -> Result<DataOptions> {
        let path = path.as_ref();
        self.write(cube, path)?;

        let options = DataOptions::for_cube(path, cube, self.options.big_endian);
        // Header paths resolve against the header's directory, which holds the data file
        let sibling = DataOptions {
            file_path: path.file_name().map_or_else(|| path.to_path_buf(), PathBuf::from),
            ..options.clone()
        };
        sibling.write_header(header_path_for(path))?;
        Ok(options)
    }
}

/// Header path written alongside a data file
pub fn header_path_for(data_path: &Path) -> PathBuf {
    let mut name = data_path.as_os_str().to_os_string();
    name.push(".hdr");
    PathBuf::from(name)
}
