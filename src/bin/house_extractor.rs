//! Extract house tiles from an OTBM map into a Lua (or JSON) table
//!
//! Run with: cargo run --bin house-extractor -- -i map.otbm [-o output.lua]

use std::path::PathBuf;

use clap::Parser;
use otbm_houses::{extract_file, write_file, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "house-extractor")]
#[command(about = "Extract house tile positions from an OTBM map file")]
struct Args {
    /// Input map file
    #[arg(short, long)]
    input: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "./output.lua")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Lua)]
    format: OutputFormat,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> otbm_houses::Result<()> {
    println!(
        "Extracting house data from file `{}` into file `{}`",
        args.input.display(),
        args.output.display()
    );

    let store = extract_file(&args.input)?;
    println!(
        "Houses found: {}, HouseTiles found: {}",
        store.house_count(),
        store.tile_count()
    );

    write_file(&args.output, args.format, &store)?;

    println!("Success");
    Ok(())
}
