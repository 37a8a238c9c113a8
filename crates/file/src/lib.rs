//! Sequential, fixed-size chunk reading for a single local file
//!
//! This crate lets a caller pull successive byte ranges of a file as text,
//! one buffer-sized chunk per call, without loading the whole file into memory.
//!
//! # Lifecycle
//!
//! - **Unopened**: configured, no handle held. The first read opens the file.
//! - **Open**: a handle is held and the file length has been captured.
//! - **Closed**: every byte has been read (or [`ChunkReader::close`] was called).
//!   Reading again fails until [`ChunkReader::reset`] starts a new pass.
//!
//! An empty file is closed as soon as it is opened. Reading a fresh reader over
//! an empty file returns one empty chunk and records one read.
//!
//! # Example
//!
//! ```ignore
//! use chunk_reader_file::{ChunkReader, ChunkReaderOptions};
//!
//! let mut reader = ChunkReader::new(
//!     ChunkReaderOptions::new("/data/input.txt")
//!         .with_buffer_size(100)
//!         .with_remove_invisible_unicode(true),
//! )?;
//!
//! let mut content = String::new();
//! while !reader.is_closed() {
//!     content.push_str(&reader.read().await?);
//! }
//!
//! // Read the same file again
//! reader.reset();
//! let again = reader.read_to_end().await?;
//! ```

pub mod encoding;
mod error;
pub mod filter;
mod reader;

pub use encoding::BufferEncoding;
pub use error::{ChunkReaderError, Result};
pub use filter::strip_invisible_unicode;
pub use reader::{ChunkReader, ChunkReaderOptions};

/// Default number of bytes per chunk (1KB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
