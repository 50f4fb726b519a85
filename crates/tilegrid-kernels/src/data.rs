//! Word-blob packing and host file I/O.
//!
//! Kernel buffers cross the host boundary as flat little-endian word
//! blobs: 4 bytes per word, no header, no padding. The format is shared
//! with the fabric's loader tooling, so a file dumped here feeds straight
//! back in as a kernel input.

use std::fs;
use std::path::Path;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use tilegrid_fabric::{pod, Word};

use crate::error::{KernelDataError, Result};

/// Pack words into a little-endian blob.
#[must_use]
pub fn pack_words(words: &[Word]) -> Bytes {
    let mut buf = BytesMut::with_capacity(words.len() * pod::WORD_BYTES as usize);
    for &word in words {
        buf.put_i32_le(word);
    }
    buf.freeze()
}

/// Unpack a little-endian blob into words.
///
/// # Errors
///
/// Returns [`KernelDataError::TruncatedBlob`] if the byte length is not a
/// whole number of words.
pub fn unpack_words(blob: &[u8]) -> Result<Vec<Word>> {
    if blob.len() % pod::WORD_BYTES as usize != 0 {
        return Err(KernelDataError::truncated_blob(blob.len()));
    }
    let mut buf = blob;
    let mut words = Vec::with_capacity(blob.len() / pod::WORD_BYTES as usize);
    while buf.has_remaining() {
        words.push(buf.get_i32_le());
    }
    Ok(words)
}

/// Read a word-blob file.
///
/// # Errors
///
/// Returns [`KernelDataError::Io`] if the file cannot be read and
/// [`KernelDataError::TruncatedBlob`] if its length is not word-aligned.
pub fn read_words_file(path: impl AsRef<Path>) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let blob = fs::read(path)?;
    let words = unpack_words(&blob)?;
    debug!("Read {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Write words to a word-blob file.
///
/// # Errors
///
/// Returns [`KernelDataError::Io`] if the file cannot be written.
pub fn write_words_file(path: impl AsRef<Path>, words: &[Word]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, pack_words(words))?;
    debug!("Wrote {} words to {}", words.len(), path.display());
    Ok(())
}
