//! Example: extract a sub-cube described by a header and a range config
//!
//! Run with: cargo run --example extract_subcube -- <header> <range> <output>
//!
//! Set `RUST_LOG=debug` to see every header option as it is applied.

use anyhow::Context;
use hsicube::{DataOptions, DataRange, DataReader};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [header, range, output] = args.as_slice() else {
        anyhow::bail!("usage: extract_subcube <header> <range> <output>");
    };

    let options = DataOptions::from_header_file(header)
        .with_context(|| format!("loading header {header}"))?;
    let range = DataRange::from_config_file(range)
        .with_context(|| format!("loading range {range}"))?;

    let reader = DataReader::new(options);
    let cube = reader.read(&range)?;
    println!("Read {}", cube.summary());

    let center = (cube.num_rows() / 2, cube.num_cols() / 2);
    let spectrum = cube.spectrum_as_f64(center.0, center.1);
    println!("Spectrum at {:?}: {:?}", center, spectrum);

    let written = reader.write_with_header(&cube, output)?;
    println!(
        "Wrote {} ({})",
        written.file_path.display(),
        written.shape().summary()
    );
    Ok(())
}
