//! dataextract CLI
//!
//! Loads a lookup table and prints a summary of what was found.

use clap::Parser;
use dataextract::{open_backend, CsvBackend, CsvOptions, DataExtractorBackend, ExtractResult};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dataextract", version, about = "Inspect an interpolation lookup table")]
struct Cli {
    /// Table file (.csv or .tsv)
    file: PathBuf,

    /// Payload group name (column `<group>/var` or `var@<group>`)
    #[arg(short, long)]
    group: String,

    /// Field delimiter, overrides the file extension and --config
    #[arg(short, long)]
    delimiter: Option<char>,

    /// TOML file with loader options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn backend_for(cli: &Cli) -> ExtractResult<Box<dyn DataExtractorBackend>> {
    if cli.config.is_none() && cli.delimiter.is_none() {
        return open_backend(&cli.file);
    }
    let mut options = CsvOptions::for_path(&cli.file);
    if let Some(path) = &cli.config {
        options = options.merge_toml_file(path)?;
    }
    if let Some(delimiter) = cli.delimiter {
        options = options.with_delimiter(delimiter);
    }
    Ok(Box::new(CsvBackend::with_options(&cli.file, options)?))
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let table = backend_for(cli)?.load_data(&cli.group)?;
    let summary = table.summary();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", cli.file.display());
    println!("  rows: {}", summary.num_rows);
    match (summary.payload_min, summary.payload_max) {
        (Some(min), Some(max)) => println!("  payload: {} .. {}", min, max),
        _ => println!("  payload: all missing"),
    }
    println!("  missing payload values: {}", summary.payload_missing);
    for coord in &summary.coordinates {
        println!(
            "  [dim {}] {} ({}, {} values)",
            coord.dimension, coord.name, coord.dtype, coord.len
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
