//! Per-tile execution context.
//!
//! Every kernel invocation receives a [`TileCtx`] telling the tile who it
//! is (coordinate, linear id) and wiring it to the group's barrier. The
//! context is the only runtime handle a kernel sees; everything else it
//! touches travels in through shared buffers.

use tilegrid_fabric::{GroupDims, TileCoord};

use crate::barrier::TileBarrier;

/// Identity and barrier access for one tile in a running group.
///
/// Borrowed from the launch for the life of the kernel call; kernels take
/// `&TileCtx<'_>` and never store it.
#[derive(Debug, Clone, Copy)]
pub struct TileCtx<'grp> {
    coord: TileCoord,
    dims: GroupDims,
    barrier: &'grp TileBarrier,
}

impl<'grp> TileCtx<'grp> {
    pub(crate) const fn new(coord: TileCoord, dims: GroupDims, barrier: &'grp TileBarrier) -> Self {
        Self { coord, dims, barrier }
    }

    /// This tile's coordinate within the group.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Extents of the running group.
    #[must_use]
    pub const fn dims(&self) -> GroupDims {
        self.dims
    }

    /// Row-major linear id, `0..tile_count`.
    ///
    /// SPMD kernels use this to pick their slice of flat buffers.
    #[must_use]
    pub const fn linear_id(&self) -> usize {
        self.coord.linear_id(self.dims)
    }

    /// Total tiles in the group.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.dims.tile_count()
    }

    /// Whether this tile is the group origin `(0,0)`.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.coord.is_origin()
    }

    /// Rendezvous with every other tile in the group.
    ///
    /// Blocks until all tiles have called `sync()` for this epoch. See
    /// [`TileBarrier::sync`] for the visibility and liveness contract.
    pub fn sync(&self) {
        self.barrier.sync();
    }

    /// The group barrier itself, for callers that need epoch counts.
    #[must_use]
    pub const fn barrier(&self) -> &'grp TileBarrier {
        self.barrier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_reports_identity() {
        let dims = GroupDims::new(4, 2);
        let barrier = TileBarrier::new(dims);
        let ctx = TileCtx::new(TileCoord::new(3, 1), dims, &barrier);

        assert_eq!(ctx.coord(), TileCoord::new(3, 1));
        assert_eq!(ctx.linear_id(), 7);
        assert_eq!(ctx.tile_count(), 8);
        assert!(!ctx.is_origin());
    }

    #[test]
    fn origin_context_syncs_alone() {
        let dims = GroupDims::new(1, 1);
        let barrier = TileBarrier::new(dims);
        let ctx = TileCtx::new(TileCoord::new(0, 0), dims, &barrier);

        assert!(ctx.is_origin());
        ctx.sync();
        assert_eq!(ctx.barrier().epochs(), 1);
    }
}
