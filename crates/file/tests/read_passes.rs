//! Full read passes over temporary files

use chunk_reader_file::{BufferEncoding, ChunkReader, ChunkReaderError, ChunkReaderOptions};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn reader(file: &NamedTempFile, buffer_size: usize) -> ChunkReader {
    ChunkReader::new(ChunkReaderOptions::new(file.path()).with_buffer_size(buffer_size)).unwrap()
}

/// Read until closed, returning every chunk.
async fn drain(reader: &mut ChunkReader) -> Vec<String> {
    let mut chunks = Vec::new();
    while !reader.is_closed() {
        chunks.push(reader.read().await.unwrap());
    }
    chunks
}

#[tokio::test]
async fn test_read_whole_file() {
    let input = "0".repeat(120);
    let file = write_temp(input.as_bytes());
    let mut reader = reader(&file, 100);

    let chunks = drain(&mut reader).await;

    assert!(reader.is_closed());
    assert_eq!(reader.read_count(), 2);
    assert_eq!(chunks[0].len(), 100);
    assert_eq!(chunks[1].len(), 20);
    assert_eq!(chunks.concat(), input);
}

#[tokio::test]
async fn test_read_empty_file() {
    let file = write_temp(b"");
    let mut reader = reader(&file, 100);

    let chunks = drain(&mut reader).await;

    assert!(reader.is_closed());
    assert_eq!(reader.read_count(), 1);
    assert_eq!(chunks.concat(), "");
}

#[tokio::test]
async fn test_read_file_smaller_than_chunk() {
    let input = "0".repeat(65);
    let file = write_temp(input.as_bytes());
    let mut reader = reader(&file, 100);

    let chunks = drain(&mut reader).await;

    assert!(reader.is_closed());
    assert_eq!(reader.read_count(), 1);
    assert_eq!(chunks, vec![input]);
}

#[tokio::test]
async fn test_read_count_is_ceil_of_length_over_chunk() {
    let content: Vec<u8> = (0..1000u32).map(|i| b'a' + (i % 26) as u8).collect();

    for (len, buffer_size) in [(1, 1), (7, 3), (9, 3), (100, 7), (999, 1000), (1000, 64)] {
        let file = write_temp(&content[..len]);
        let mut reader = reader(&file, buffer_size);

        let chunks = drain(&mut reader).await;

        assert_eq!(
            reader.read_count(),
            len.div_ceil(buffer_size) as u64,
            "len={len} buffer_size={buffer_size}"
        );
        assert_eq!(chunks.concat().as_bytes(), &content[..len]);
        assert_eq!(reader.bytes_read(), len as u64);
        assert_eq!(reader.total_length(), len as u64);
    }
}

#[tokio::test]
async fn test_read_big_file_and_reset() {
    let file_size = 2_000_000;
    let buffer_size = 250_000;
    let input = "0".repeat(file_size);
    let file = write_temp(input.as_bytes());
    let mut reader = reader(&file, buffer_size);

    let first = reader.read_to_end().await.unwrap();
    assert!(reader.is_closed());
    assert_eq!(reader.read_count(), 8);
    assert_eq!(first, input);

    reader.reset();

    assert!(!reader.is_closed());
    assert_eq!(reader.read_count(), 0);
    assert_eq!(reader.bytes_read(), 0);

    let second = reader.read_to_end().await.unwrap();
    assert!(reader.is_closed());
    assert_eq!(reader.read_count(), 8);
    assert_eq!(second, input);
}

#[tokio::test]
async fn test_multibyte_text_round_trips_on_aligned_chunks() {
    // every char is 2 bytes in UTF-8, so an even buffer never splits one
    let input = "\u{e9}\u{e8}\u{ea}\u{eb}".repeat(10);
    let file = write_temp(input.as_bytes());
    let mut reader = reader(&file, 6);

    assert_eq!(reader.read_to_end().await.unwrap(), input);
}

#[tokio::test]
async fn test_base64_chunks_reassemble_binary() {
    let content: Vec<u8> = (0..=255u8).collect();
    let file = write_temp(&content);
    let mut reader = ChunkReader::new(
        ChunkReaderOptions::new(file.path())
            .with_buffer_size(30)
            .with_encoding(BufferEncoding::Base64),
    )
    .unwrap();

    let mut bytes = Vec::new();
    while !reader.is_closed() {
        let chunk = reader.read().await.unwrap();
        bytes.extend(base64_decode(&chunk));
    }
    assert_eq!(bytes, content);
}

fn base64_decode(s: &str) -> Vec<u8> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.decode(s).unwrap()
}

#[tokio::test]
async fn test_not_found_error() {
    let mut reader =
        ChunkReader::new(ChunkReaderOptions::new("./undefined").with_buffer_size(100)).unwrap();

    let err = reader.read().await.unwrap_err();
    assert!(matches!(err, ChunkReaderError::NotFound { .. }));
    assert!(err.to_string().contains("File is not found"));
}

#[tokio::test]
async fn test_read_on_done_reader() {
    let file = write_temp("0".repeat(120).as_bytes());
    let mut reader = reader(&file, 100);

    drain(&mut reader).await;
    assert!(reader.is_closed());

    let err = reader.read().await.unwrap_err();
    assert!(matches!(err, ChunkReaderError::AlreadyClosed { .. }));
    assert!(err
        .to_string()
        .contains("Entire bytes in file has been read"));
    assert_eq!(reader.read_count(), 2);
}
