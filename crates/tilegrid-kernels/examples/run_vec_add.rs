//! Example: the vec_add reference workload, end to end
//!
//! Builds the canonical inputs A = [1, 2, 3, 4] and B = [10, 20, 30, 40],
//! launches `kernel_vec_add` on a single tile, and checks the classic
//! bring-up output [11, 22, 33, 44].

use tilegrid_fabric::GroupDims;
use tilegrid_kernels::kernel_vec_add;
use tilegrid_runtime::{SharedBuf, TileGroup};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("vec_add reference workload\n");

    // Step 1: claim a 1x1 tile group
    let group = TileGroup::new(GroupDims::new(1, 1))?;
    println!("1. Claimed {} group ({} tile)", group.dims(), group.tile_count());

    // Step 2: stage the inputs
    let a = SharedBuf::from_words(&[1, 2, 3, 4]);
    let b = SharedBuf::from_words(&[10, 20, 30, 40]);
    let c = SharedBuf::zeroed(4);
    println!("2. Staged A = {:?}, B = {:?}", a.snapshot(), b.snapshot());

    // Step 3: launch
    let report = group.launch(|ctx| kernel_vec_add(ctx, &a, &b, &c, 4, 4))?;
    println!("3. Launched: statuses {:?} in {:?}", report.statuses(), report.duration());

    // Step 4: read back
    let out = c.snapshot();
    println!("4. C = {out:?}");

    assert_eq!(out, vec![11, 22, 33, 44]);
    println!("\n✅ Reference output matches: [11, 22, 33, 44]");

    Ok(())
}
