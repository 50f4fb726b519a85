//! Element-wise vector addition, the fabric's reference SPMD workload.
//!
//! `C[i] = A[i] + B[i]`, partitioned by linear tile id: tile `t` owns the
//! contiguous block `[t * block_size, (t + 1) * block_size)`. The kernel
//! body is tile-agnostic — every tile runs the same text, and the block
//! math is the only place identity enters.

use tilegrid_fabric::Word;
use tilegrid_runtime::{SharedBuf, TileCtx};

/// Add this tile's block of `a` and `b` into `c`.
///
/// Pure compute, no rendezvous: callers sequence it against other tiles'
/// work themselves. Kernel discipline applies — no validation here, and an
/// out-of-range block panics the tile.
pub fn vec_add_single_tile(
    ctx: &TileCtx<'_>,
    a: &SharedBuf,
    b: &SharedBuf,
    c: &SharedBuf,
    block_size: usize,
) {
    let base = ctx.linear_id() * block_size;
    for i in base..base + block_size {
        c.store(i, a.load(i) + b.load(i));
    }
}

/// Vector-add kernel entry point.
///
/// Each tile adds its own block, then the whole group rendezvouses once so
/// every element of `c` is complete and visible before any tile returns.
/// Exit status is always 0; the kernel performs no validation.
///
/// `n` is the total element count. It travels in the launch signature for
/// the host's benefit and is not consulted here — block coverage is
/// entirely `block_size`'s business.
pub fn kernel_vec_add(
    ctx: &TileCtx<'_>,
    a: &SharedBuf,
    b: &SharedBuf,
    c: &SharedBuf,
    n: usize,
    block_size: usize,
) -> Word {
    let _ = n;
    vec_add_single_tile(ctx, a, b, c, block_size);
    ctx.sync();
    0
}
