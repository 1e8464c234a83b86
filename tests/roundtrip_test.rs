//! Sub-cube extraction and write-back across layouts, types and byte orders

mod common;

use common::{expected, write_cube};
use hsicube::{
    Axis, CubeShape, DataOptions, DataRange, DataReader, DataType, HsiError, InterleaveFormat,
};
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const FULL: CubeShape = CubeShape {
    rows: 5,
    cols: 6,
    bands: 3,
};

#[rstest]
fn test_read_then_write_round_trip(
    #[values(InterleaveFormat::Bsq, InterleaveFormat::Bil, InterleaveFormat::Bip)]
    interleave: InterleaveFormat,
    #[values(
        DataType::Byte,
        DataType::Int16,
        DataType::UInt32,
        DataType::Float32,
        DataType::Float64,
        DataType::ULong
    )]
    data_type: DataType,
    #[values(false, true)] big_endian: bool,
) {
    let dir = TempDir::new().unwrap();
    let options = write_cube(
        &dir.path().join("full.raw"),
        FULL,
        interleave,
        data_type,
        big_endian,
        2,
    );
    let reader = DataReader::new(options);

    let range = DataRange::new((1, 4), (2, 5), (1, 3));
    let cube = reader.read(&range).unwrap();
    assert_eq!(cube.shape(), CubeShape::new(3, 3, 2));
    assert_eq!(cube.interleave(), interleave);
    assert_eq!(cube.data_type(), data_type);
    assert_eq!(cube.raw_bytes().len(), 3 * 3 * 2 * data_type.size_in_bytes());

    for row in 0..3 {
        for col in 0..3 {
            let spectrum = cube.spectrum_as_f64(row, col);
            let want: Vec<f64> = (1..3)
                .map(|band| expected(row + 1, col + 2, band) as f64)
                .collect();
            assert_eq!(spectrum, want, "pixel ({row}, {col})");
        }
    }

    let out = dir.path().join("sub.raw");
    reader.write(&cube, &out).unwrap();
    assert_eq!(
        fs::metadata(&out).unwrap().len() as usize,
        cube.raw_bytes().len()
    );

    let sub_options = DataOptions::for_cube(&out, &cube, big_endian);
    let again = DataReader::new(sub_options)
        .read(&DataRange::full(cube.shape()))
        .unwrap();
    assert_eq!(again.raw_bytes(), cube.raw_bytes());
}

#[rstest]
#[case(InterleaveFormat::Bsq)]
#[case(InterleaveFormat::Bil)]
#[case(InterleaveFormat::Bip)]
fn test_full_read_reproduces_file(#[case] interleave: InterleaveFormat) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("full.raw");
    let options = write_cube(&path, FULL, interleave, DataType::Int16, true, 0);
    let reader = DataReader::new(options.clone());

    let cube = reader.read(&DataRange::full(options.shape())).unwrap();
    let out = dir.path().join("copy.raw");
    reader.write(&cube, &out).unwrap();
    assert_eq!(fs::read(out).unwrap(), fs::read(path).unwrap());
}

#[test]
fn test_single_element_reads() {
    let dir = TempDir::new().unwrap();
    let options = write_cube(
        &dir.path().join("full.raw"),
        FULL,
        InterleaveFormat::Bil,
        DataType::Float32,
        false,
        5,
    );
    let reader = DataReader::new(options);
    for (row, col, band) in [(0, 0, 0), (4, 5, 2), (2, 3, 1)] {
        let range = DataRange::new(
            (row as i64, row as i64 + 1),
            (col as i64, col as i64 + 1),
            (band as i64, band as i64 + 1),
        );
        let cube = reader.read(&range).unwrap();
        assert_eq!(cube.get_value(0, 0, 0).as_f32(), Some(expected(row, col, band) as f32));
    }
}

#[test]
fn test_range_bounds_are_enforced() {
    let dir = TempDir::new().unwrap();
    let options = write_cube(
        &dir.path().join("tall.raw"),
        CubeShape::new(8, 2, 2),
        InterleaveFormat::Bsq,
        DataType::Byte,
        false,
        0,
    );
    let reader = DataReader::new(options);

    let negative_start = DataRange::new((-1, 4), (0, 2), (0, 2));
    assert!(matches!(
        reader.read(&negative_start),
        Err(HsiError::Range { axis: Axis::Row, .. })
    ));

    let past_end = DataRange::new((0, 9), (0, 2), (0, 2));
    assert!(matches!(
        reader.read(&past_end),
        Err(HsiError::Range { axis: Axis::Row, bound: 8, .. })
    ));

    let zero_span = DataRange::new((5, 5), (0, 2), (0, 2));
    assert!(matches!(
        reader.read(&zero_span),
        Err(HsiError::NonPositiveSpan { axis: Axis::Row, start: 5, end: 5 })
    ));

    // A range touching the far edge is valid
    let edge = DataRange::new((7, 8), (1, 2), (1, 2));
    assert!(reader.read(&edge).is_ok());
}

#[test]
fn test_element_access_past_end() {
    let dir = TempDir::new().unwrap();
    let options = write_cube(
        &dir.path().join("full.raw"),
        FULL,
        InterleaveFormat::Bip,
        DataType::UInt16,
        false,
        0,
    );
    let cube = DataReader::new(options)
        .read(&DataRange::new((0, 2), (0, 2), (0, 3)))
        .unwrap();

    assert!(matches!(
        cube.try_get_value(cube.num_rows(), 0, 0),
        Err(HsiError::OutOfBounds { axis: Axis::Row, index: 2, bound: 1 })
    ));
    assert_eq!(cube.get_value(cube.num_rows(), 0, 0).to_f64(), 0.0);
}

#[test]
fn test_sub_cube_addressing_uses_own_dimensions() {
    let dir = TempDir::new().unwrap();
    let options = write_cube(
        &dir.path().join("full.raw"),
        FULL,
        InterleaveFormat::Bsq,
        DataType::Int32,
        false,
        0,
    );
    let cube = DataReader::new(options)
        .read(&DataRange::new((2, 5), (1, 3), (0, 3)))
        .unwrap();

    let image = cube.band_image(2).unwrap();
    assert_eq!(image.dim(), (3, 2));
    for row in 0..3 {
        for col in 0..2 {
            assert_eq!(image[[row, col]], expected(row + 2, col + 1, 2) as f64);
        }
    }
}
