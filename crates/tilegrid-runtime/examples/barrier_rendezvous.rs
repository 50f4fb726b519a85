// SPDX-License-Identifier: AGPL-3.0-only

//! Example: tile-group rendezvous
//!
//! Launches a kernel on a 4x2 group in which every tile stamps its linear
//! id into shared memory, rendezvouses, then reads its neighbour's stamp.

use tilegrid_fabric::{GroupDims, Word};
use tilegrid_runtime::{SharedBuf, TileGroup};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let dims = GroupDims::new(4, 2);
    let group = TileGroup::new(dims)?;
    println!("Tile group: {} ({} tiles)\n", dims, group.tile_count());

    let stamps = SharedBuf::zeroed(group.tile_count());
    let neighbours = SharedBuf::zeroed(group.tile_count());

    let report = group.launch(|ctx| {
        let id = ctx.linear_id();
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        stamps.store(id, id as Word);

        // Everyone has stamped once the rendezvous completes.
        ctx.sync();

        let peer = (id + 1) % ctx.tile_count();
        neighbours.store(id, stamps.load(peer));
        0
    })?;

    println!("Statuses      : {:?}", report.statuses());
    println!("Neighbours    : {:?}", neighbours.snapshot());
    println!("Barrier epochs: {}", group.barrier().epochs());
    println!("Duration      : {:?}", report.duration());

    if report.all_zero() {
        println!("\n✅ All {} tiles rendezvoused and exited clean", report.tiles());
    }

    Ok(())
}
