use log::{debug, error, info};
use num_traits::{Num, NumCast};
use std::env;
use std::fmt;
use std::process;
use std::time::Instant;

use stripes::{MatrixMarketIO, SparseStorage, StorageFormat, StripesConfig, ValueType};

struct Args {
    path: String,
    formats: Vec<StorageFormat>,
    splits: bool,
    config: StripesConfig,
}

fn print_usage() {
    println!("stripes {}", stripes::VERSION);
    println!();
    println!("Usage: stripes <matrix.mtx> [options]");
    println!();
    println!("Options:");
    println!("  --partitions K          Number of row stripes (default: one per core)");
    println!("  --format coo|csr|csc|all  Layouts to print (default: all)");
    println!("  --f32                   Read values as f32 instead of f64");
    println!("  --splits                Also print the lower and upper triangles (diagonal in both)");
    println!("  --verbose               Debug logging");
    println!("  --help                  Show this message");
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut path = None;
    let mut formats = StorageFormat::ALL.to_vec();
    let mut splits = false;
    let mut config = StripesConfig::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--partitions" | "-k" => {
                let value = args.next().ok_or("--partitions needs a value")?;
                let k: usize = value
                    .parse()
                    .map_err(|_| format!("invalid partition count '{}'", value))?;
                if k == 0 {
                    return Err("partition count must be at least 1".to_string());
                }
                config.n_partitions = k;
            }
            "--format" | "-f" => {
                let value = args.next().ok_or("--format needs a value")?;
                formats = StorageFormat::parse_selection(&value)?;
            }
            "--f32" => config.value_type = ValueType::F32,
            "--splits" => splits = true,
            "--verbose" | "-v" => config = config.verbose(),
            other if other.starts_with('-') => return Err(format!("unknown option '{}'", other)),
            other => {
                if path.replace(other.to_string()).is_some() {
                    return Err("only one matrix file can be given".to_string());
                }
            }
        }
    }

    let path = path.ok_or("missing matrix file")?;
    Ok(Some(Args {
        path,
        formats,
        splits,
        config,
    }))
}

fn run<T>(args: &Args) -> stripes::Result<()>
where
    T: Copy + Num + NumCast + fmt::Display + Sync,
{
    let start = Instant::now();
    let triplets = MatrixMarketIO::read_matrix::<T, _>(&args.path)?;
    debug!("Read {} in {:?}", args.path, start.elapsed());

    println!("{}", triplets);
    info!(
        "Diagonal: {} of {} entries, full: {}",
        triplets.diagonal_nnz(),
        triplets.n_rows.min(triplets.n_cols),
        triplets.has_full_diagonal()
    );

    if args.splits {
        println!("Lower triangle:");
        println!("{}", triplets.lower_split());
        println!("Upper triangle:");
        println!("{}", triplets.upper_split());
    }

    for &format in &args.formats {
        let start = Instant::now();
        let storage = SparseStorage::convert(&triplets, format);
        debug!("Built {} in {:?}", format, start.elapsed());
        println!("{}", storage);
    }

    let mut csr = triplets.to_csr();
    let k = args.config.n_partitions;
    println!("// {} stripes", k);
    for (i, stripe) in csr.partition(k).iter().enumerate() {
        println!("stripe {}: {} ({} nnz)", i, stripe, stripe.nnz());
    }

    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_usage();
            process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(args.config.log_level)
        .init();

    debug!("{:?}", args.config);

    let result = match args.config.value_type {
        ValueType::F32 => run::<f32>(&args),
        ValueType::F64 => run::<f64>(&args),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
