//! Cube metadata: full-file options and requested sub-cube ranges

use crate::config::ConfigMap;
use crate::cube::DataCube;
use crate::error::{HsiError, Result};
use crate::layout::CubeShape;
use crate::types::{Axis, DataType, InterleaveFormat};
use crate::utils::{canonical_or_given, resolve_relative};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Location and format of a cube on disk
///
/// Dimensions describe the FULL cube in the file, not the portion to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOptions {
    /// Path to the binary data file
    pub file_path: PathBuf,

    pub interleave: InterleaveFormat,

    pub data_type: DataType,

    /// Byte order of the file
    pub big_endian: bool,

    /// Padding before the payload, in elements
    pub header_offset: u64,

    pub num_rows: usize,
    pub num_cols: usize,
    pub num_bands: usize,
}

impl DataOptions {
    /// Options for a little-endian BSQ float32 file with unset dimensions
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            interleave: InterleaveFormat::Bsq,
            data_type: DataType::Float32,
            big_endian: false,
            header_offset: 0,
            num_rows: 0,
            num_cols: 0,
            num_bands: 0,
        }
    }

    pub fn with_interleave(mut self, interleave: InterleaveFormat) -> Self {
        self.interleave = interleave;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_big_endian(mut self, big_endian: bool) -> Self {
        self.big_endian = big_endian;
        self
    }

    pub fn with_header_offset(mut self, header_offset: u64) -> Self {
        self.header_offset = header_offset;
        self
    }

    pub fn with_dimensions(mut self, num_rows: usize, num_cols: usize, num_bands: usize) -> Self {
        self.num_rows = num_rows;
        self.num_cols = num_cols;
        self.num_bands = num_bands;
        self
    }

    /// Options describing `cube` written to `file_path` with no padding
    pub fn for_cube(file_path: impl Into<PathBuf>, cube: &DataCube, big_endian: bool) -> Self {
        Self::new(file_path)
            .with_interleave(cube.interleave())
            .with_data_type(cube.data_type())
            .with_big_endian(big_endian)
            .with_dimensions(cube.num_rows(), cube.num_cols(), cube.num_bands())
    }

    /// Shape of the full cube on disk
    pub fn shape(&self) -> CubeShape {
        CubeShape::new(self.num_rows, self.num_cols, self.num_bands)
    }

    /// Fail unless every dimension is positive and every byte offset into the
    /// file, padding included, fits in a `u64`.
    pub fn validate(&self) -> Result<()> {
        let shape = self.shape();
        shape.validate()?;
        let width = self.data_type.size_in_bytes() as u64;
        (shape.total_elements() as u64)
            .checked_add(self.header_offset)
            .and_then(|elements| elements.checked_mul(width))
            .ok_or_else(|| {
                HsiError::InvalidDimensions(format!(
                    "{} with a header offset of {} exceeds the addressable file size",
                    shape.summary(),
                    self.header_offset
                ))
            })?;
        Ok(())
    }

    /// Load options from a header file
    pub fn from_header_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut options = Self::new(PathBuf::new());
        options.load_header_file(path)?;
        Ok(options)
    }

    /// Update these options from a header file, following `header` indirection
    pub fn load_header_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut visited = HashSet::new();
        self.load_file_guarded(path.as_ref(), &mut visited)
    }

    /// Update these options from an already parsed configuration.
    ///
    /// Relative `data`/`header` paths are taken as given.
    pub fn load_from_config(&mut self, config: &ConfigMap) -> Result<()> {
        let mut visited = HashSet::new();
        self.load_guarded(config, None, &mut visited)
    }

    fn load_file_guarded(&mut self, path: &Path, visited: &mut HashSet<PathBuf>) -> Result<()> {
        let key = canonical_or_given(path);
        if !visited.insert(key) {
            return Err(HsiError::HeaderCycle(path.to_path_buf()));
        }
        let config = ConfigMap::from_file(path)?;
        self.load_guarded(&config, path.parent(), visited)
    }

    fn load_guarded(
        &mut self,
        config: &ConfigMap,
        base_dir: Option<&Path>,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<()> {
        if config.is_empty() {
            return Err(HsiError::Config("no header values available".to_string()));
        }

        if let Some(data) = config.get("data") {
            self.file_path = resolve_relative(base_dir, data);
            debug!("Option set: data file {}", self.file_path.display());
        }

        // The real metadata lives in another header
        if let Some(header) = config.get("header") {
            let header = resolve_relative(base_dir, header);
            info!("Reading header info from {}", header.display());
            return self.load_file_guarded(&header, visited);
        }

        if let Some(interleave) = config.get("interleave") {
            self.interleave = interleave.parse()?;
            debug!("Option set: interleave {}", self.interleave);
        }

        if let Some(data_type) = config.get("data type") {
            self.data_type = data_type.parse()?;
            debug!("Option set: data type {}", self.data_type);
        }

        if let Some(byte_order) = config.get("byte order") {
            self.big_endian = byte_order == "1";
            debug!("Option set: big endian = {}", self.big_endian);
        }

        if let Some(offset) = config.get_parsed::<u64>("header offset")? {
            self.header_offset = offset;
            debug!("Option set: header offset = {}", offset);
        }

        let (row_key, col_key) = Self::row_col_keys(self.interleave);
        if let Some(rows) = config.get_parsed::<usize>(row_key)? {
            self.num_rows = rows;
            debug!("Option set: number of rows = {}", rows);
        }
        if let Some(cols) = config.get_parsed::<usize>(col_key)? {
            self.num_cols = cols;
            debug!("Option set: number of columns = {}", cols);
        }
        if let Some(bands) = config.get_parsed::<usize>("bands")? {
            self.num_bands = bands;
            debug!("Option set: number of bands = {}", bands);
        }

        Ok(())
    }

    /// Header keys holding the row and column counts.
    ///
    /// BSQ headers store rows under `samples`; BIL and BIP store them under `lines`.
    fn row_col_keys(interleave: InterleaveFormat) -> (&'static str, &'static str) {
        match interleave {
            InterleaveFormat::Bsq => ("samples", "lines"),
            InterleaveFormat::Bil | InterleaveFormat::Bip => ("lines", "samples"),
        }
    }

    /// Render these options in header form, readable by [`DataOptions::from_header_file`]
    pub fn to_header(&self) -> String {
        let (row_key, col_key) = Self::row_col_keys(self.interleave);
        format!(
            "data = {}\n\
             interleave = {}\n\
             data type = {}\n\
             byte order = {}\n\
             header offset = {}\n\
             {} = {}\n\
             {} = {}\n\
             bands = {}\n",
            self.file_path.display(),
            self.interleave,
            self.data_type.code(),
            u8::from(self.big_endian),
            self.header_offset,
            row_key,
            self.num_rows,
            col_key,
            self.num_cols,
            self.num_bands
        )
    }

    pub fn write_header(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_header()).map_err(|e| HsiError::io(path, e))
    }
}

/// Requested sub-cube extents, end exclusive
///
/// Values are only checked against a cube when the range is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRange {
    pub start_row: i64,
    pub end_row: i64,
    pub start_col: i64,
    pub end_col: i64,
    pub start_band: i64,
    pub end_band: i64,
}

impl DataRange {
    pub fn new(rows: (i64, i64), cols: (i64, i64), bands: (i64, i64)) -> Self {
        Self {
            start_row: rows.0,
            end_row: rows.1,
            start_col: cols.0,
            end_col: cols.1,
            start_band: bands.0,
            end_band: bands.1,
        }
    }

    /// The range covering every element of `shape`
    pub fn full(shape: CubeShape) -> Self {
        Self::new(
            (0, shape.rows as i64),
            (0, shape.cols as i64),
            (0, shape.bands as i64),
        )
    }

    /// Start and end along one axis
    pub fn axis(&self, axis: Axis) -> (i64, i64) {
        match axis {
            Axis::Row => (self.start_row, self.end_row),
            Axis::Column => (self.start_col, self.end_col),
            Axis::Band => (self.start_band, self.end_band),
        }
    }

    /// Load a range from a configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ConfigMap::from_file(path)?;
        let mut range = Self::default();
        range.load_from_config(&config)?;
        Ok(range)
    }

    /// Set each extent present in `config`; absent keys keep their values
    pub fn load_from_config(&mut self, config: &ConfigMap) -> Result<()> {
        if config.is_empty() {
            return Err(HsiError::Config("no range values available".to_string()));
        }
        let fields: [(&str, &mut i64); 6] = [
            ("start row", &mut self.start_row),
            ("end row", &mut self.end_row),
            ("start col", &mut self.start_col),
            ("end col", &mut self.end_col),
            ("start band", &mut self.start_band),
            ("end band", &mut self.end_band),
        ];
        for (key, field) in fields {
            if let Some(value) = config.get_parsed::<i64>(key)? {
                *field = value;
            }
        }
        Ok(())
    }
}
