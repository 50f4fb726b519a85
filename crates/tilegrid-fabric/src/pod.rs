//! TG128 pod topology constants.
//!
//! One pod is the unit a host session attaches to: a 16×8 grid of tiles,
//! each with a private scratchpad data memory. Tile groups are carved out
//! of a single pod; nothing in this stack spans pods.
//!
//! ## Geometry
//!
//! ```text
//! 16 x 8  tiles per pod          (128 total)
//! 4 KB    data memory per tile   (1024 words)
//! 32-bit  machine word
//! ```

use crate::coord::GroupDims;

// ── Pod geometry ─────────────────────────────────────────────────────────────

/// Tiles in the pod X dimension.
pub const TILES_X: u32 = 16;

/// Tiles in the pod Y dimension.
pub const TILES_Y: u32 = 8;

/// Total tiles in one pod.
pub const TILE_COUNT: u32 = TILES_X * TILES_Y;

/// Largest group a pod can host. Groups are validated against this.
pub const MAX_GROUP: GroupDims = GroupDims { x: TILES_X, y: TILES_Y };

// ── Per-tile memory ──────────────────────────────────────────────────────────

/// Machine word size in bytes.
pub const WORD_BYTES: u32 = 4;

/// Scratchpad data memory per tile, in bytes.
pub const DMEM_BYTES_PER_TILE: u32 = 4096;

/// Scratchpad data memory per tile, in words.
pub const DMEM_WORDS_PER_TILE: u32 = DMEM_BYTES_PER_TILE / WORD_BYTES;

// ── Topology profile ─────────────────────────────────────────────────────────

/// Pod topology profile.
///
/// [`PodTopology::TG128`] is the shipping configuration; the struct exists
/// so derived quantities are computed in one place rather than re-derived
/// at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PodTopology {
    /// Tiles in X.
    pub x: u32,
    /// Tiles in Y.
    pub y: u32,
    /// Data memory per tile in bytes.
    pub dmem_bytes: u32,
}

impl PodTopology {
    /// TG128 reference topology.
    pub const TG128: Self = Self { x: TILES_X, y: TILES_Y, dmem_bytes: DMEM_BYTES_PER_TILE };

    /// Total tiles in the pod.
    #[must_use]
    pub const fn tile_count(&self) -> u32 {
        self.x * self.y
    }

    /// Data memory per tile, in words.
    #[must_use]
    pub const fn dmem_words(&self) -> u32 {
        self.dmem_bytes / WORD_BYTES
    }

    /// Aggregate data memory across the pod, in bytes.
    #[must_use]
    pub const fn total_dmem_bytes(&self) -> u32 {
        self.tile_count() * self.dmem_bytes
    }

    /// Pod extents as group dims (the largest launchable group).
    #[must_use]
    pub const fn max_group(&self) -> GroupDims {
        GroupDims { x: self.x, y: self.y }
    }
}
