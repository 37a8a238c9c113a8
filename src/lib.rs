//! chunk-reader library
//!
//! Command-line glue around [`chunk_reader_file::ChunkReader`]: option
//! parsing, config file merging, and a pass runner that drains the reader
//! into any async writer.
//!
//! # CLI Usage
//!
//! ```bash
//! # Print a file in 100-byte chunks
//! chunk-reader data.txt --buffer-size 100
//!
//! # Strip control characters, read the file twice, show a summary
//! chunk-reader data.txt --remove-invisible-unicode --passes 2 --stats
//!
//! # Dump a binary file as hex, one chunk per line
//! chunk-reader image.bin --encoding hex --separator $'\n'
//!
//! # Take settings from a TOML file
//! chunk-reader --config reader.toml
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub mod config;

pub use config::{resolve_options, FileConfig};

use chunk_reader_file::ChunkReader;

#[derive(Parser, Clone, Debug)]
pub struct ReaderOpts {
    /// File to read
    pub file_path: Option<PathBuf>,

    /// Maximum number of bytes per chunk [default: 1024]
    #[arg(long, env = "CHUNK_READER_BUFFER_SIZE")]
    pub buffer_size: Option<usize>,

    /// Chunk decoding (utf-8, latin1, ascii, utf-16le, hex, base64, ...) [default: utf-8]
    #[arg(long, env = "CHUNK_READER_ENCODING")]
    pub encoding: Option<String>,

    /// Strip control characters from each chunk, keeping line breaks
    #[arg(long)]
    pub remove_invisible_unicode: bool,
}

/// Counters observed at the end of one full pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// 1-based pass number
    pub pass: usize,
    pub read_count: u64,
    pub bytes_read: u64,
    pub total_length: u64,
}

/// Read the file `passes` times, writing every chunk to `out`.
///
/// Passes after the first start with [`ChunkReader::reset`]. When a separator
/// is given it is written between consecutive chunks of a pass.
pub async fn run_passes<W>(
    reader: &mut ChunkReader,
    passes: usize,
    separator: Option<&str>,
    out: &mut W,
) -> anyhow::Result<Vec<PassSummary>>
where
    W: AsyncWrite + Unpin,
{
    if passes == 0 {
        anyhow::bail!("Number of passes must be at least 1");
    }

    let mut summaries = Vec::with_capacity(passes);
    for pass in 1..=passes {
        if pass > 1 {
            reader.reset();
        }

        while !reader.is_closed() {
            let chunk = reader.read().await?;
            if let Some(separator) = separator {
                if reader.read_count() > 1 {
                    out.write_all(separator.as_bytes()).await?;
                }
            }
            out.write_all(chunk.as_bytes()).await?;
        }
        out.flush().await?;

        let summary = PassSummary {
            pass,
            read_count: reader.read_count(),
            bytes_read: reader.bytes_read(),
            total_length: reader.total_length(),
        };
        tracing::info!(
            "Pass {} complete: {} reads, {}/{} bytes",
            summary.pass,
            summary.read_count,
            summary.bytes_read,
            summary.total_length
        );
        summaries.push(summary);
    }

    Ok(summaries)
}
