//! Writing a sub-cube with its header to a path relative to the working
//! directory. Kept in its own test binary since it changes the process cwd.

mod common;

use common::{expected, write_cube};
use hsicube::{CubeShape, DataOptions, DataRange, DataReader, DataType, InterleaveFormat};
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_relative_output_in_subdirectory_reloads() {
    let dir = TempDir::new().unwrap();
    env::set_current_dir(dir.path()).unwrap();

    let options = write_cube(
        Path::new("scene.raw"),
        CubeShape::new(4, 4, 2),
        InterleaveFormat::Bil,
        DataType::UInt16,
        true,
        0,
    );
    let reader = DataReader::new(options);
    let cube = reader.read(&DataRange::new((1, 3), (0, 4), (1, 2))).unwrap();

    fs::create_dir("out").unwrap();
    let written = reader.write_with_header(&cube, "out/sub.raw").unwrap();
    assert_eq!(written.file_path, Path::new("out/sub.raw"));

    let reloaded = DataOptions::from_header_file("out/sub.raw.hdr").unwrap();
    assert_eq!(reloaded.file_path, Path::new("out/sub.raw"));
    assert_eq!(reloaded, written);

    let again = DataReader::new(reloaded)
        .read(&DataRange::full(cube.shape()))
        .unwrap();
    assert_eq!(again, cube);
    assert_eq!(again.get_value(1, 3, 0).to_f64(), expected(2, 3, 1) as f64);
}
