//! Error types for tile-group runtime operations
//!
//! Errors exist only at the host boundary: group construction and launch
//! teardown. Kernel code itself never sees a `Result` — a kernel that
//! misuses a buffer panics on its tile, and the launch reports that as
//! [`RuntimeError::TilePanicked`] after the surviving tiles finish.

use thiserror::Error;
use tilegrid_fabric::{GroupDims, TileCoord};

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur while building or launching a tile group
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Group extents contain a zero dimension
    #[error("Empty tile group: {x}x{y} has no tiles")]
    EmptyGroup {
        /// Requested X extent
        x: u32,
        /// Requested Y extent
        y: u32,
    },

    /// Group extents exceed the pod
    #[error("Tile group {x}x{y} exceeds pod extents {max_x}x{max_y}")]
    GroupTooLarge {
        /// Requested X extent
        x: u32,
        /// Requested Y extent
        y: u32,
        /// Pod X extent
        max_x: u32,
        /// Pod Y extent
        max_y: u32,
    },

    /// A tile's kernel thread panicked during the launch
    #[error("Tile ({x},{y}) panicked during kernel execution")]
    TilePanicked {
        /// X coordinate of the dead tile
        x: u32,
        /// Y coordinate of the dead tile
        y: u32,
    },
}

impl RuntimeError {
    /// Create an empty group error from the offending extents
    #[must_use]
    pub const fn empty_group(dims: GroupDims) -> Self {
        Self::EmptyGroup { x: dims.x, y: dims.y }
    }

    /// Create a group too large error from the offending and maximum extents
    #[must_use]
    pub const fn group_too_large(dims: GroupDims, max: GroupDims) -> Self {
        Self::GroupTooLarge { x: dims.x, y: dims.y, max_x: max.x, max_y: max.y }
    }

    /// Create a tile panicked error from the dead tile's coordinate
    #[must_use]
    pub const fn tile_panicked(coord: TileCoord) -> Self {
        Self::TilePanicked { x: coord.x, y: coord.y }
    }
}
