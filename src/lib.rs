//! hsicube - raw hyperspectral image cubes
//!
//! A pure Rust reader and writer for hyperspectral cubes stored as flat binary
//! files with an ENVI-style `key = value` header.
//!
//! # Features
//!
//! - Band sequential (BSQ), band interleaved by line (BIL) and band interleaved
//!   by pixel (BIP) layouts
//! - 8 to 64-bit integer and floating point samples in either byte order
//! - Extraction of an arbitrary rectangular sub-cube without loading the file
//! - Writing a sub-cube back out in the file's original byte order
//!
//! # Example
//!
//! ```rust,no_run
//! use hsicube::{DataOptions, DataRange, DataReader};
//!
//! # fn example() -> hsicube::Result<()> {
//! let options = DataOptions::from_header_file("/data/scene.hdr")?;
//! let reader = DataReader::new(options);
//!
//! let range = DataRange::new((0, 100), (0, 100), (10, 20));
//! let cube = reader.read(&range)?;
//! let spectrum = cube.spectrum_as_f64(50, 50);
//! assert_eq!(spectrum.len(), 10);
//!
//! reader.write(&cube, "/data/scene_subset.raw")?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod cube;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod reader;
pub mod types;
pub mod utils;

// Re-exports
pub use codec::ElementCodec;
pub use config::ConfigMap;
pub use cube::DataCube;
pub use error::{HsiError, Result};
pub use layout::{Coord, CubeShape, TraversalOrder};
pub use metadata::{DataOptions, DataRange};
pub use reader::DataReader;
pub use types::{Axis, DataType, InterleaveFormat, Scalar, Value};

/// Version of the hsicube implementation
pub const HSICUBE_VERSION: &str = env!("CARGO_PKG_VERSION");
