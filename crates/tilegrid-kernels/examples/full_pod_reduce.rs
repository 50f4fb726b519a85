// SPDX-License-Identifier: AGPL-3.0-only

//! Example: sum reduction across the full 16x8 pod
//!
//! Launches `sum_reduce` on all 128 tiles and compares the tree-fold
//! total against a serial sum on the host.

use tilegrid_fabric::{pod, GroupDims, Word};
use tilegrid_kernels::zoo::{self, KernelId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let dims = GroupDims::new(pod::TILES_X, pod::TILES_Y);
    let n = 16 * dims.tile_count(); // 16 words per tile
    let block = n / dims.tile_count();

    println!("sum_reduce on the full pod: {dims}, n = {n}\n");

    let outcome = zoo::run_demo(KernelId::SumReduce, dims, n, block)?;

    let serial: Word = zoo::demo_input_a(n).iter().sum();
    let total = outcome.output[0];

    println!("Tiles        : {}", outcome.report.tiles());
    println!("Barrier epochs: {} (local fold + tree rounds)", outcome.epochs);
    println!("Tree total   : {total}");
    println!("Serial total : {serial}");
    println!("Duration     : {:?}", outcome.report.duration());

    assert_eq!(total, serial);
    println!("\n✅ Tree fold agrees with the serial sum");

    Ok(())
}
