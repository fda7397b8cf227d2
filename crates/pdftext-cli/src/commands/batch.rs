//! Batch extraction command for multiple PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use pdftext_core::{
    ExtractOptions, ExtractionResult, Library, LopdfEngine, NormalizeOptions, PdftextConfig,
};

use super::extract::{OutputFormat, format_result};
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Password used for every document
    #[arg(short, long)]
    password: Option<String>,

    /// Collapse whitespace and trim page text
    #[arg(long)]
    normalize: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    pages: Option<usize>,
    error: Option<String>,
}

pub fn run(
    library: &Library<LopdfEngine>,
    args: BatchArgs,
    config_path: Option<&str>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let options = ExtractOptions {
        password: args.password.clone(),
        ..Default::default()
    };
    let normalize = if args.normalize {
        Some(NormalizeOptions::default())
    } else {
        config.extraction.normalize
    };

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let output_path = output_path_for(&path, args.output_dir.as_deref(), args.format);
        match process_file(library, &path, &output_path, &options, normalize, args.format, &config) {
            Ok(pages) => {
                debug!("Wrote output to {}", output_path.display());
                results.push(BatchResult {
                    path,
                    pages: Some(pages),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        pages: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful = results.iter().filter(|r| r.pages.is_some()).count();
    let total_pages: usize = results.iter().filter_map(|r| r.pages).sum();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files ({} pages) in {:?}",
        style("✓").green(),
        results.len(),
        total_pages,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn output_path_for(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let file_name = format!("{}.{}", stem, format.extension());
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Extract one file and write its output. Returns the number of pages written.
fn process_file(
    library: &Library<LopdfEngine>,
    path: &Path,
    output_path: &Path,
    options: &ExtractOptions,
    normalize: Option<NormalizeOptions>,
    format: OutputFormat,
    config: &PdftextConfig,
) -> anyhow::Result<usize> {
    let result = library.extract(path, options)?;
    let result = match normalize {
        Some(opts) => result.normalized(&opts),
        None => result,
    };
    write_output(&result, output_path, format, config)
        .with_context(|| format!("cannot write {}", output_path.display()))?;
    Ok(result.pages.len())
}

fn write_output(
    result: &ExtractionResult,
    path: &Path,
    format: OutputFormat,
    config: &PdftextConfig,
) -> anyhow::Result<()> {
    let content = format_result(result, format, &config.output.separator, config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        let input = Path::new("/docs/report.pdf");
        assert_eq!(
            output_path_for(input, None, OutputFormat::Json),
            PathBuf::from("/docs/report.json")
        );
        assert_eq!(
            output_path_for(input, Some(Path::new("/out")), OutputFormat::Text),
            PathBuf::from("/out/report.txt")
        );
    }
}
