//! Bench command - time repeated extractions from a path and from memory.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;

use pdftext_core::{ExtractOptions, ExtractionResult, Library, LopdfEngine, validate_path};

/// Arguments for the bench command.
#[derive(Args)]
pub struct BenchArgs {
    /// PDF file to extract
    #[arg(required = true)]
    input: PathBuf,

    /// Number of runs per source kind
    #[arg(short, long, default_value = "3")]
    runs: usize,

    /// Document password
    #[arg(short, long)]
    password: Option<String>,
}

pub fn run(library: &Library<LopdfEngine>, args: BenchArgs) -> anyhow::Result<()> {
    validate_path(&args.input)?;
    let data = fs::read(&args.input)?;
    let options = ExtractOptions {
        password: args.password.clone(),
        ..Default::default()
    };

    println!("{}", style("pdftext benchmark").bold());
    println!("File: {}", args.input.display());

    for i in 0..args.runs {
        time_run(&format!("Run {} (path)", i + 1), || {
            Ok(library.extract(args.input.as_path(), &options)?)
        })?;
    }
    for i in 0..args.runs {
        time_run(&format!("Run {} (buffer)", i + 1), || {
            Ok(library.extract(&data, &options)?)
        })?;
    }

    Ok(())
}

fn time_run(
    label: &str,
    f: impl FnOnce() -> anyhow::Result<ExtractionResult>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let result = f()?;
    let elapsed = start.elapsed();
    println!(
        "{}: {:.2} ms, pages={}",
        label,
        elapsed.as_secs_f64() * 1000.0,
        result.pages.len()
    );
    Ok(())
}
