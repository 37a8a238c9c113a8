//! Byte-to-text decoding for chunks.
//!
//! Each chunk is decoded on its own. A multi-byte character that straddles a
//! buffer boundary is therefore split across two chunks and each half decodes
//! to U+FFFD. Callers that need exact text for multi-byte encodings should
//! either pick a buffer size aligned to their data or use [`BufferEncoding::Hex`]
//! / [`BufferEncoding::Base64`] and reassemble bytes themselves.

use crate::error::{ChunkReaderError, Result};
use base64::Engine;
use encoding_rs::{Encoding, UTF_16LE, UTF_8};
use std::fmt;
use std::str::FromStr;

/// How raw chunk bytes are rendered into the returned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEncoding {
    /// Any WHATWG encoding known to `encoding_rs`. Malformed input is replaced.
    Text(&'static Encoding),
    /// One char per byte (ISO-8859-1).
    Latin1,
    /// Bytes masked to 7 bits.
    Ascii,
    /// Lowercase hex of the raw bytes.
    Hex,
    /// Standard base64 (with padding) of the raw bytes.
    Base64,
    /// URL-safe base64 without padding.
    Base64Url,
}

impl Default for BufferEncoding {
    fn default() -> Self {
        BufferEncoding::Text(UTF_8)
    }
}

impl BufferEncoding {
    pub fn utf8() -> Self {
        Self::default()
    }

    /// Decode one chunk.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            BufferEncoding::Text(encoding) => {
                // BOMs are kept so that concatenated chunks reproduce the file.
                encoding.decode_without_bom_handling(bytes).0.into_owned()
            }
            BufferEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            BufferEncoding::Ascii => bytes.iter().map(|&b| (b & 0x7f) as char).collect(),
            BufferEncoding::Hex => hex::encode(bytes),
            BufferEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
            BufferEncoding::Base64Url => {
                base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
            }
        }
    }
}

impl FromStr for BufferEncoding {
    type Err = ChunkReaderError;

    fn from_str(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hex" => Ok(BufferEncoding::Hex),
            "base64" => Ok(BufferEncoding::Base64),
            "base64url" => Ok(BufferEncoding::Base64Url),
            "ascii" => Ok(BufferEncoding::Ascii),
            // encoding_rs maps "latin1" to windows-1252; keep the byte-per-char meaning
            "latin1" | "binary" => Ok(BufferEncoding::Latin1),
            "ucs2" | "utf16le" => Ok(BufferEncoding::Text(UTF_16LE)),
            _ => Encoding::for_label_no_replacement(normalized.as_bytes())
                .map(BufferEncoding::Text)
                .ok_or_else(|| ChunkReaderError::UnsupportedEncoding(label.to_string())),
        }
    }
}

impl fmt::Display for BufferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferEncoding::Text(encoding) => write!(f, "{}", encoding.name()),
            BufferEncoding::Latin1 => write!(f, "latin1"),
            BufferEncoding::Ascii => write!(f, "ascii"),
            BufferEncoding::Hex => write!(f, "hex"),
            BufferEncoding::Base64 => write!(f, "base64"),
            BufferEncoding::Base64Url => write!(f, "base64url"),
        }
    }
}
