//! Independent readers over the same file running in parallel

mod common;

use common::write_cube;
use hsicube::{CubeShape, DataRange, DataReader, DataType, InterleaveFormat};
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_band_reads_match_sequential() {
    let dir = TempDir::new().unwrap();
    let shape = CubeShape::new(6, 7, 3);
    let options = write_cube(
        &dir.path().join("scene.raw"),
        shape,
        InterleaveFormat::Bil,
        DataType::Float32,
        false,
        0,
    );

    let handles: Vec<_> = (0..shape.bands as i64)
        .map(|band| {
            let reader = DataReader::new(options.clone());
            tokio::task::spawn_blocking(move || {
                reader.read(&DataRange::new((0, 6), (0, 7), (band, band + 1)))
            })
        })
        .collect();

    let sequential = DataReader::new(options.clone());
    for (band, handle) in handles.into_iter().enumerate() {
        let parallel = handle.await.unwrap().unwrap();
        let band = band as i64;
        let expected = sequential
            .read(&DataRange::new((0, 6), (0, 7), (band, band + 1)))
            .unwrap();
        assert_eq!(parallel, expected);
    }
}
