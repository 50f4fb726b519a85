//! Block memcpy kernel.
//!
//! Word-for-word copy of `src` into `dst`, partitioned the same way as
//! vector add: tile `t` copies `[t * block_size, (t + 1) * block_size)`.
//! Simpler than a real DMA path, but it exercises the same block math and
//! the same one-rendezvous launch shape.

use tilegrid_fabric::Word;
use tilegrid_runtime::{SharedBuf, TileCtx};

/// Memcpy kernel entry point.
///
/// Each tile copies its own block, then the group rendezvouses once so the
/// full destination is visible before any tile returns. Always exits 0.
pub fn kernel_memcpy(
    ctx: &TileCtx<'_>,
    src: &SharedBuf,
    dst: &SharedBuf,
    block_size: usize,
) -> Word {
    let base = ctx.linear_id() * block_size;
    for i in base..base + block_size {
        dst.store(i, src.load(i));
    }
    ctx.sync();
    0
}
