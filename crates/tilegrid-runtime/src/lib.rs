//! Software SPMD runtime for the TG128 tile fabric.
//!
//! This crate runs tile-group kernels on host threads with the fabric's
//! execution model intact: one thread per tile, a group-wide rendezvous
//! barrier, and flat shared word memory. Kernels written against it behave
//! the way they would on silicon — same blocking semantics, same memory
//! visibility rules, same "a missing tile hangs the group" liveness
//! contract.
//!
//! # Execution model
//!
//! ```text
//! TileGroup::new(dims)      validate extents, arm the barrier
//! TileGroup::launch(kernel) one thread per tile, SPMD
//!   └─ TileCtx              identity + sync() for each tile
//! LaunchReport              per-tile exit statuses, linear-id order
//! ```
//!
//! # Quick start
//!
//! ```
//! use tilegrid_fabric::GroupDims;
//! use tilegrid_runtime::{SharedBuf, TileGroup};
//!
//! # fn main() -> tilegrid_runtime::Result<()> {
//! let group = TileGroup::new(GroupDims::new(4, 2))?;
//! let out = SharedBuf::zeroed(group.tile_count());
//!
//! let report = group.launch(|ctx| {
//!     // Every tile publishes its linear id, then the group rendezvouses.
//!     out.store(ctx.linear_id(), 1);
//!     ctx.sync();
//!     0
//! })?;
//!
//! assert!(report.all_zero());
//! assert_eq!(out.snapshot(), vec![1; 8]);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

mod barrier;
mod error;
mod launch;
mod mem;
mod tile;

/// Fabric geometry constants (re-exported from tilegrid-fabric).
pub mod fabric {
    pub use tilegrid_fabric::pod::{
        DMEM_BYTES_PER_TILE, DMEM_WORDS_PER_TILE, MAX_GROUP, TILES_X, TILES_Y, TILE_COUNT,
        WORD_BYTES,
    };
    pub use tilegrid_fabric::{GroupDims, TileCoord, Word};
}

pub use barrier::TileBarrier;
pub use error::{Result, RuntimeError};
pub use launch::{LaunchReport, TileGroup};
pub use mem::SharedBuf;
pub use tile::TileCtx;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        LaunchReport, Result, RuntimeError, SharedBuf, TileBarrier, TileCtx, TileGroup,
    };
    pub use tilegrid_fabric::{GroupDims, TileCoord, Word};
}
