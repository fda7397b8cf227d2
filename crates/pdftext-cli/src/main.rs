//! Command-line PDF text and metadata extractor.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pdftext_core::{Library, LopdfEngine};

use commands::{batch, bench, config, extract};

/// Extract per-page text and metadata from PDF documents
#[derive(Parser)]
#[command(name = "pdftext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text and metadata from a single PDF
    Extract(extract::ExtractArgs),

    /// Extract text from multiple PDF files
    Batch(batch::BatchArgs),

    /// Time repeated extractions of one PDF
    Bench(bench::BenchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Engine setup runs once here and teardown when `library` drops at exit.
    let library = Library::start(LopdfEngine::new());

    match cli.command {
        Commands::Extract(args) => extract::run(&library, args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(&library, args, cli.config.as_deref()),
        Commands::Bench(args) => bench::run(&library, args),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
