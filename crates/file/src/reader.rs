//! Sequential chunk reader over a local file

use crate::encoding::BufferEncoding;
use crate::error::{ChunkReaderError, Result};
use crate::filter;
use crate::DEFAULT_BUFFER_SIZE;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::{debug, warn};

/// Construction options for [`ChunkReader`].
#[derive(Debug, Clone)]
pub struct ChunkReaderOptions {
    /// Path to the file to read
    pub file_path: PathBuf,
    /// Maximum number of bytes returned per read
    pub buffer_size: usize,
    /// How chunk bytes are decoded into text
    pub buffer_encoding: BufferEncoding,
    /// Strip control characters (keeping line breaks) from each decoded chunk
    pub remove_invisible_unicode: bool,
}

impl ChunkReaderOptions {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            buffer_encoding: BufferEncoding::default(),
            remove_invisible_unicode: false,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_encoding(mut self, buffer_encoding: BufferEncoding) -> Self {
        self.buffer_encoding = buffer_encoding;
        self
    }

    pub fn with_remove_invisible_unicode(mut self, enabled: bool) -> Self {
        self.remove_invisible_unicode = enabled;
        self
    }
}

#[derive(Debug)]
enum ReaderState {
    /// Configured but no handle acquired yet (fresh or after `reset`).
    Unopened,
    /// Holding the handle for the current pass.
    Open { file: File },
    /// Current pass finished or explicitly closed.
    Closed,
}

/// Reads a single file front to back, one buffer-sized chunk per call.
///
/// The reader opens the file lazily on the first [`read`](Self::read) and
/// releases the handle as soon as the last byte has been consumed. Each call
/// returns the next contiguous slice of the file, so concatenating every chunk
/// of a pass reproduces the file content.
///
/// Reads are not meant to overlap: `read` takes `&mut self`, so callers await
/// each chunk before asking for the next one.
///
/// # Example
/// ```ignore
/// let mut reader = ChunkReader::new(
///     ChunkReaderOptions::new("data.txt").with_buffer_size(4096),
/// )?;
/// while !reader.is_closed() {
///     let chunk = reader.read().await?;
///     // Process chunk...
/// }
/// ```
#[derive(Debug)]
pub struct ChunkReader {
    options: ChunkReaderOptions,
    state: ReaderState,
    total_length: u64,
    bytes_read: u64,
    read_count: u64,
}

impl ChunkReader {
    /// Create a reader. No I/O happens until the first read or [`open`](Self::open).
    pub fn new(options: ChunkReaderOptions) -> Result<Self> {
        if options.buffer_size == 0 {
            return Err(ChunkReaderError::InvalidBufferSize(options.buffer_size));
        }
        Ok(Self {
            options,
            state: ReaderState::Unopened,
            total_length: 0,
            bytes_read: 0,
            read_count: 0,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.options.file_path
    }

    pub fn buffer_size(&self) -> usize {
        self.options.buffer_size
    }

    pub fn buffer_encoding(&self) -> BufferEncoding {
        self.options.buffer_encoding
    }

    pub fn removes_invisible_unicode(&self) -> bool {
        self.options.remove_invisible_unicode
    }

    /// File size captured at the last open.
    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    /// Whether a live file handle is currently held.
    pub fn is_opened(&self) -> bool {
        matches!(self.state, ReaderState::Open { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, ReaderState::Closed)
    }

    /// Acquire the file handle and record the file length.
    ///
    /// An empty file closes the reader straight away. Calling this while a
    /// handle is already held keeps the existing handle.
    pub async fn open(&mut self) -> Result<()> {
        match self.state {
            ReaderState::Unopened => {}
            ReaderState::Open { .. } => {
                warn!(
                    "Reader already holds a handle, ignoring open: {}",
                    self.options.file_path.display()
                );
                return Ok(());
            }
            ReaderState::Closed => return Err(self.already_closed()),
        }

        let path = &self.options.file_path;
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| self.map_open_error(e))?;
        if !metadata.is_file() {
            return Err(ChunkReaderError::NotAFile { path: path.clone() });
        }

        let file = File::open(path).await.map_err(|e| self.map_open_error(e))?;
        self.total_length = file.metadata().await?.len();

        debug!(
            "Opened {} ({} bytes, buffer size {})",
            path.display(),
            self.total_length,
            self.options.buffer_size
        );

        if self.total_length == 0 {
            debug!("File is empty, closing: {}", path.display());
            self.state = ReaderState::Closed;
        } else {
            self.state = ReaderState::Open { file };
        }
        Ok(())
    }

    /// Read the next chunk and decode it as text.
    ///
    /// Chunk boundaries are byte offsets, not character boundaries; see the
    /// [`encoding`](crate::encoding) module for what that means for
    /// multi-byte encodings.
    pub async fn read(&mut self) -> Result<String> {
        let bytes = self.read_bytes().await?;
        let text = self.options.buffer_encoding.decode(&bytes);
        Ok(filter::apply(text, self.options.remove_invisible_unicode))
    }

    /// Read the next chunk as raw bytes, with the same lifecycle as [`read`](Self::read).
    pub async fn read_bytes(&mut self) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(self.already_closed());
        }
        if matches!(self.state, ReaderState::Unopened) {
            self.open().await?;
        }

        let offset = self.bytes_read;
        let remaining = self.total_length.saturating_sub(offset);
        let len = remaining.min(self.options.buffer_size as u64) as usize;

        let chunk = match &mut self.state {
            ReaderState::Open { file } => read_at(file, offset, len).await?,
            // empty file, closed during open: one terminal empty read
            _ => Vec::new(),
        };

        self.bytes_read += chunk.len() as u64;
        self.read_count += 1;

        if chunk.len() < len {
            warn!(
                "File shrank while reading {}: expected {} bytes, reached end at {}",
                self.options.file_path.display(),
                self.total_length,
                self.bytes_read
            );
            self.total_length = self.bytes_read;
        }

        debug!(
            "Read chunk #{} of {} bytes ({}/{})",
            self.read_count,
            chunk.len(),
            self.bytes_read,
            self.total_length
        );

        if self.bytes_read == self.total_length {
            self.close();
        }

        Ok(chunk)
    }

    /// Read every remaining chunk of the current pass and concatenate them.
    ///
    /// Returns an empty string if the pass is already closed.
    pub async fn read_to_end(&mut self) -> Result<String> {
        let mut content = String::new();
        while !self.is_closed() {
            content.push_str(&self.read().await?);
        }
        Ok(content)
    }

    /// Mark the pass closed and release the handle if one is held.
    ///
    /// Counters are left untouched.
    pub fn close(&mut self) {
        if let ReaderState::Open { file } = std::mem::replace(&mut self.state, ReaderState::Closed)
        {
            drop(file);
            debug!("Closed {}", self.options.file_path.display());
        }
    }

    /// Start a fresh pass with the same configuration.
    ///
    /// Any held handle is released; the next read reopens the file from
    /// offset 0 and re-derives its length.
    pub fn reset(&mut self) {
        self.state = ReaderState::Unopened;
        self.bytes_read = 0;
        self.read_count = 0;
        debug!("Reset reader for {}", self.options.file_path.display());
    }

    fn already_closed(&self) -> ChunkReaderError {
        ChunkReaderError::AlreadyClosed {
            path: self.options.file_path.clone(),
        }
    }

    /// A missing path, including one under a non-directory component, is NotFound.
    fn map_open_error(&self, err: std::io::Error) -> ChunkReaderError {
        match err.kind() {
            ErrorKind::NotFound | ErrorKind::NotADirectory => ChunkReaderError::NotFound {
                path: self.options.file_path.clone(),
            },
            _ => ChunkReaderError::Io(err),
        }
    }
}

/// Read up to `len` bytes starting at `offset`, stopping early only at EOF.
async fn read_at(file: &mut File, offset: u64, len: usize) -> std::io::Result<Vec<u8>> {
    file.seek(SeekFrom::Start(offset)).await?;

    let mut buffer = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        match file.read(&mut buffer[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    buffer.truncate(filled);
    Ok(buffer)
}
