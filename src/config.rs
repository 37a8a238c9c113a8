//! Reader configuration from a TOML file and command-line options.
//!
//! Precedence is CLI flag, then environment variable (both handled by clap),
//! then the TOML file, then the library defaults.
//!
//! ```toml
//! file_path = "/data/input.txt"
//! buffer_size = 4096
//! buffer_encoding = "utf-8"
//! remove_invisible_unicode = true
//! ```

use crate::ReaderOpts;
use anyhow::{Context, Result};
use chunk_reader_file::{BufferEncoding, ChunkReaderOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Reader settings loaded from a TOML file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub file_path: Option<PathBuf>,
    pub buffer_size: Option<usize>,
    pub buffer_encoding: Option<String>,
    pub remove_invisible_unicode: Option<bool>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse reader config")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Merge command-line options over file settings into reader options.
pub fn resolve_options(opts: &ReaderOpts, file: &FileConfig) -> Result<ChunkReaderOptions> {
    let file_path = opts
        .file_path
        .clone()
        .or_else(|| file.file_path.clone())
        .context("No file to read: pass a path or set file_path in the config file")?;

    let mut options = ChunkReaderOptions::new(file_path);

    if let Some(buffer_size) = opts.buffer_size.or(file.buffer_size) {
        options = options.with_buffer_size(buffer_size);
    }

    if let Some(label) = opts.encoding.as_deref().or(file.buffer_encoding.as_deref()) {
        let encoding: BufferEncoding = label
            .parse()
            .with_context(|| format!("Invalid buffer encoding '{label}'"))?;
        options = options.with_encoding(encoding);
    }

    let remove_invisible_unicode =
        opts.remove_invisible_unicode || file.remove_invisible_unicode.unwrap_or(false);

    Ok(options.with_remove_invisible_unicode(remove_invisible_unicode))
}
