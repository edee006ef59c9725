//! Prints row-structure statistics of a Matrix Market file
//!
//! Output is a single line: `N M NZ mean max disparity stddev`

use log::error;
use std::env;
use std::process;

use stripes::{MatrixMarketIO, RowStats, StripesConfig};

fn main() {
    let mut config = StripesConfig::default();
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => config = config.verbose(),
            "--help" | "-h" => {
                println!("Usage: row_stats [--verbose] <matrix.mtx>");
                return;
            }
            _ => path = Some(arg),
        }
    }

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .init();

    let Some(path) = path else {
        eprintln!("Usage: row_stats [--verbose] <matrix.mtx>");
        process::exit(1);
    };

    let csr = match MatrixMarketIO::read_matrix::<f64, _>(&path) {
        Ok(triplets) => triplets.to_csr(),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("{}", RowStats::collect(&csr, config.n_partitions));
}
