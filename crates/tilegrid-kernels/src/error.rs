//! Error types for kernel data handling
//!
//! These cover the host side only — blob decoding and file I/O. Kernel
//! bodies themselves never return errors; misuse inside a kernel panics
//! the tile and is reported by the runtime.

use thiserror::Error;

/// Result type alias for kernel data operations
pub type Result<T> = std::result::Result<T, KernelDataError>;

/// Errors that can occur while packing or unpacking word blobs
#[derive(Debug, Error)]
pub enum KernelDataError {
    /// Blob length is not a whole number of words
    #[error("Word blob length {len} is not a multiple of {word_bytes} bytes")]
    TruncatedBlob {
        /// Byte length of the offending blob
        len: usize,
        /// Word size the fabric expects
        word_bytes: usize,
    },

    /// Unknown kernel name
    #[error("Unknown kernel: {name}")]
    UnknownKernel {
        /// The name that failed to resolve
        name: String,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl KernelDataError {
    /// Create a truncated blob error for a byte length
    #[must_use]
    pub const fn truncated_blob(len: usize) -> Self {
        Self::TruncatedBlob {
            len,
            word_bytes: tilegrid_fabric::pod::WORD_BYTES as usize,
        }
    }

    /// Create an unknown kernel error
    pub fn unknown_kernel(name: impl Into<String>) -> Self {
        Self::UnknownKernel { name: name.into() }
    }
}
