//! Command-line interface for chunk-reader
//!
//! # Usage Examples
//!
//! ```bash
//! # Print a file 100 bytes at a time
//! chunk-reader data.txt --buffer-size 100
//!
//! # Same, with settings from the environment
//! CHUNK_READER_BUFFER_SIZE=100 CHUNK_READER_ENCODING=latin1 chunk-reader data.txt
//!
//! # Debug logging of every chunk
//! RUST_LOG=chunk_reader_file=debug chunk-reader data.txt --stats
//! ```

use anyhow::Context;
use chunk_reader::{resolve_options, run_passes, FileConfig, ReaderOpts};
use chunk_reader_file::ChunkReader;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chunk-reader")]
#[command(about = "Read a file sequentially in fixed-size text chunks")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    reader: ReaderOpts,

    /// TOML file with reader settings (command-line values take precedence)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of full passes over the file
    #[arg(long, default_value = "1")]
    passes: usize,

    /// Text written between consecutive chunks
    #[arg(long)]
    separator: Option<String>,

    /// Print a summary of each pass to stderr
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Logs go to stderr so chunk output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let options = resolve_options(&cli.reader, &file_config)?;
    let path = options.file_path.clone();

    let mut reader = ChunkReader::new(options)?;
    let mut stdout = tokio::io::stdout();

    let summaries = run_passes(
        &mut reader,
        cli.passes,
        cli.separator.as_deref(),
        &mut stdout,
    )
    .await
    .with_context(|| format!("Failed to read {}", path.display()))?;

    if cli.stats {
        for summary in summaries {
            eprintln!(
                "pass {}: {} reads, {} of {} bytes",
                summary.pass, summary.read_count, summary.bytes_read, summary.total_length
            );
        }
    }

    Ok(())
}
