//! Extract command - text and metadata from a single PDF.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use pdftext_core::{
    ExtractOptions, ExtractionResult, Library, LopdfEngine, NormalizeOptions, PdftextConfig,
    validate_path,
};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file, or "-" to read the document from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Document password
    #[arg(short, long)]
    password: Option<String>,

    /// First page to extract (1-based, inclusive)
    #[arg(long, allow_negative_numbers = true)]
    page_start: Option<i64>,

    /// Last page to extract (1-based, inclusive)
    #[arg(long, allow_negative_numbers = true)]
    page_end: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Separator between pages for text output
    #[arg(long)]
    separator: Option<String>,

    /// Collapse whitespace and trim page text
    #[arg(long)]
    normalize: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON document with metadata and pages
    Json,
    /// Page texts joined by the separator
    Text,
    /// One CSV row per page
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
        }
    }
}

pub fn run(
    library: &Library<LopdfEngine>,
    args: ExtractArgs,
    config_path: Option<&str>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let options = ExtractOptions {
        password: args.password.clone(),
        page_start: args.page_start,
        page_end: args.page_end,
    };

    let result = if args.input == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        info!("Extracting {} bytes from stdin", data.len());
        library.extract(&data, &options)?
    } else {
        validate_path(&args.input)?;
        info!("Extracting {}", args.input.display());
        library.extract(args.input.as_path(), &options)?
    };

    let normalize = if args.normalize {
        Some(NormalizeOptions::default())
    } else {
        config.extraction.normalize
    };
    let result = match normalize {
        Some(opts) => result.normalized(&opts),
        None => result,
    };

    let separator = args
        .separator
        .as_deref()
        .unwrap_or(&config.output.separator);
    let output = format_result(&result, args.format, separator, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total extraction time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    separator: &str,
    config: &PdftextConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if config.output.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Text => Ok(result.joined_text(separator)),
        OutputFormat::Csv => format_csv(result),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["page", "text"])?;
    for page in &result.pages {
        wtr.write_record([page.page_number.to_string().as_str(), page.text.as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
