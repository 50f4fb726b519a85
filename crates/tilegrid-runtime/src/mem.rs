// SPDX-License-Identifier: AGPL-3.0-only

//! Shared word memory for kernel launches.
//!
//! A [`SharedBuf`] is a flat array of [`Word`] cells that every tile in a
//! launch can read and write concurrently — the software stand-in for the
//! fabric's shared address space. Each cell is an atomic accessed with
//! `Relaxed` ordering: individual loads and stores never tear, and
//! cross-tile ordering comes from barrier sync edges, not from the cells
//! themselves. A kernel that reads a cell another tile wrote without a
//! `sync()` in between observes an unspecified (but not torn) value, which
//! is the fabric's memory model too.
//!
//! Indexing is unchecked beyond the usual slice bounds: an out-of-range
//! access panics the tile, and the launch layer reports the dead tile.

use std::sync::atomic::{AtomicI32, Ordering};

use tilegrid_fabric::Word;

/// Flat shared memory, one atomic cell per word.
#[derive(Debug)]
pub struct SharedBuf {
    cells: Vec<AtomicI32>,
}

impl SharedBuf {
    /// Buffer of `len` words, all zero.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| AtomicI32::new(0)).collect(),
        }
    }

    /// Buffer initialised from a word slice.
    #[must_use]
    pub fn from_words(words: &[Word]) -> Self {
        Self {
            cells: words.iter().map(|&w| AtomicI32::new(w)).collect(),
        }
    }

    /// Read the word at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn load(&self, idx: usize) -> Word {
        self.cells[idx].load(Ordering::Relaxed)
    }

    /// Write `word` at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    pub fn store(&self, idx: usize, word: Word) {
        self.cells[idx].store(word, Ordering::Relaxed);
    }

    /// Set every cell to `word`.
    pub fn fill(&self, word: Word) {
        for cell in &self.cells {
            cell.store(word, Ordering::Relaxed);
        }
    }

    /// Number of words in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the buffer holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Copy the buffer out as plain words.
    ///
    /// Host-side readback after a launch completes; not meaningful while
    /// tiles are still writing.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Word> {
        self.cells.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }
}

impl From<&[Word]> for SharedBuf {
    fn from(words: &[Word]) -> Self {
        Self::from_words(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_buffer_reads_zero() {
        let buf = SharedBuf::zeroed(8);
        assert_eq!(buf.len(), 8);
        assert!(!buf.is_empty());
        assert_eq!(buf.snapshot(), vec![0; 8]);
    }

    #[test]
    fn from_words_preserves_values() {
        let buf = SharedBuf::from_words(&[1, -2, 3, Word::MAX]);
        assert_eq!(buf.load(0), 1);
        assert_eq!(buf.load(1), -2);
        assert_eq!(buf.load(3), Word::MAX);
    }

    #[test]
    fn store_then_load_round_trips() {
        let buf = SharedBuf::zeroed(4);
        buf.store(2, 77);
        assert_eq!(buf.load(2), 77);
        assert_eq!(buf.snapshot(), vec![0, 0, 77, 0]);
    }

    #[test]
    fn fill_overwrites_every_cell() {
        let buf = SharedBuf::from_words(&[1, 2, 3]);
        buf.fill(-1);
        assert_eq!(buf.snapshot(), vec![-1, -1, -1]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn out_of_range_load_panics() {
        let buf = SharedBuf::zeroed(2);
        let _ = buf.load(2);
    }
}
