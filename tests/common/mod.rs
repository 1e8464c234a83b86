//! Shared fixtures for integration tests

#![allow(dead_code)]

use hsicube::{CubeShape, DataOptions, DataType, InterleaveFormat, TraversalOrder};
use std::fs;
use std::path::Path;

/// Value stored at (row, col, band) in every fixture; fits in a byte for
/// cubes up to 10 x 10 x 3.
pub fn expected(row: usize, col: usize, band: usize) -> u32 {
    (100 * band + 10 * row + col) as u32
}

/// Encode `value` as one element of `data_type` in the given byte order
pub fn encode(data_type: DataType, value: u32, big_endian: bool) -> Vec<u8> {
    macro_rules! ordered {
        ($v:expr) => {
            if big_endian {
                $v.to_be_bytes().to_vec()
            } else {
                $v.to_le_bytes().to_vec()
            }
        };
    }
    match data_type {
        DataType::Byte => vec![value as u8],
        DataType::Int16 => ordered!(value as i16),
        DataType::Int32 => ordered!(value as i32),
        DataType::Float32 => ordered!(value as f32),
        DataType::Float64 => ordered!(value as f64),
        DataType::UInt16 => ordered!(value as u16),
        DataType::UInt32 => ordered!(value),
        DataType::UInt64 | DataType::ULong => ordered!(value as u64),
    }
}

/// Write a full cube file of `shape` to `path`, preceded by `header_offset`
/// zero elements, and return options describing it.
pub fn write_cube(
    path: &Path,
    shape: CubeShape,
    interleave: InterleaveFormat,
    data_type: DataType,
    big_endian: bool,
    header_offset: u64,
) -> DataOptions {
    let width = data_type.size_in_bytes();
    let mut bytes = vec![0u8; header_offset as usize * width];
    for coord in TraversalOrder::new(interleave, shape.full_extents()) {
        bytes.extend(encode(
            data_type,
            expected(coord.row, coord.col, coord.band),
            big_endian,
        ));
    }
    fs::write(path, bytes).expect("write fixture cube");

    DataOptions::new(path)
        .with_interleave(interleave)
        .with_data_type(data_type)
        .with_big_endian(big_endian)
        .with_header_offset(header_offset)
        .with_dimensions(shape.rows, shape.cols, shape.bands)
}
