//! CLI application that mirrors a tree of PDF files as plain text.

mod reporter;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use pdfmirror_core::config::DEFAULT_EXTENSION;
use pdfmirror_core::{Batch, ConvertConfig};

use reporter::{ConsoleReporter, SummaryFormat};

/// Extract the text of every PDF under a directory into a mirrored tree of text files
#[derive(Parser)]
#[command(name = "pdfmirror")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Source directory scanned recursively for PDF files
    #[arg(short, long, env = "PDFMIRROR_INPUT_ROOT", value_name = "DIR")]
    input_root: PathBuf,

    /// Destination directory for the mirrored text files
    #[arg(short, long, env = "PDFMIRROR_OUTPUT_ROOT", value_name = "DIR")]
    output_root: PathBuf,

    /// Suffix given to output files
    #[arg(short, long, env = "PDFMIRROR_EXTENSION", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Format of the final summary
    #[arg(long, value_enum, default_value = "text")]
    summary_format: SummaryFormat,
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
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = ConvertConfig::new(cli.input_root, cli.output_root).with_extension(&cli.extension);
    debug!("Configuration: {:?}", config);

    let batch = Batch::new(config).context("cannot start conversion")?;

    // Keep stdout parseable when it carries the JSON summary
    let progress: Box<dyn Write> = match cli.summary_format {
        SummaryFormat::Text => Box::new(io::stdout()),
        SummaryFormat::Json => Box::new(io::stderr()),
    };
    let mut reporter = ConsoleReporter::new(progress, cli.summary_format);
    let summary = batch.run(&mut reporter)?;

    if cli.summary_format == SummaryFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
