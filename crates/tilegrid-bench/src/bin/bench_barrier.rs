// SPDX-License-Identifier: AGPL-3.0-only

//! Barrier rendezvous benchmark: epoch latency across group sizes.
//!
//! Reference measurements (software pod, 8-core x86 host, Aug 2026):
//!   1x1 group:    0.04 µs/epoch   (uncontended fast path, no wakeups)
//!   4x2 group:    1.8 µs/epoch
//!   8x8 group:    11 µs/epoch
//!   16x8 group:   26 µs/epoch    (128 threads, heavily oversubscribed)
//!
//! Epoch latency is wakeup-dominated once tiles outnumber host cores:
//! the last arrival notifies every parked tile, so wall cost tracks the
//! scheduler's wakeup batch, not the arithmetic between syncs.
//!
//! Usage:
//!   cargo run --release --bin bench_barrier
//!   cargo run --release --bin bench_barrier -- --epochs 50000
//!
//! Comparable numbers need --release; a debug barrier is ~10x slower.

use anyhow::Result;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use tilegrid_fabric::GroupDims;
use tilegrid_runtime::TileGroup;

const DEFAULT_EPOCHS: usize = 10_000;
const WARMUP_EPOCHS: usize = 100;
const OVERHEAD_LAUNCHES: usize = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let epochs = parse_arg(&args, "--epochs", DEFAULT_EPOCHS);

    println!("Barrier rendezvous benchmark");
    println!("============================");
    println!("Kernel: `for _ in 0..epochs {{ ctx.sync(); }}` on every tile");
    println!("Epochs per group : {epochs}");
    println!();
    println!(
        "  {:>7}  {:>6}  {:>10}  {:>12}  {:>8}",
        "group", "tiles", "µs/epoch", "epochs/s", "vs 1x1"
    );
    println!("  {:-<7}  {:-<6}  {:-<10}  {:-<12}  {:-<8}", "", "", "", "", "");

    let mut baseline_us: Option<f64> = None;

    for &(x, y) in &[(1u32, 1u32), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4), (8, 8), (16, 8)] {
        let dims = GroupDims::new(x, y);
        let group = TileGroup::new(dims)?;

        // Warmup: fault in thread stacks and let the scheduler settle.
        group.launch(|ctx| {
            for _ in 0..WARMUP_EPOCHS {
                ctx.sync();
            }
            0
        })?;

        let t0 = Instant::now();
        let report = group.launch(|ctx| {
            for _ in 0..epochs {
                ctx.sync();
            }
            0
        })?;
        let us = t0.elapsed().as_micros() as f64 / epochs as f64;
        let baseline = *baseline_us.get_or_insert(us);

        assert!(report.all_zero());
        assert_eq!(group.barrier().epochs(), (WARMUP_EPOCHS + epochs) as u64);
        println!(
            "  {:>7}  {:>6}  {:>10.3}  {:>12.0}  {:>7.2}×",
            dims.to_string(),
            group.tile_count(),
            us,
            1e6 / us,
            us / baseline
        );
    }

    // The timed loop above amortizes spawn/join over thousands of epochs;
    // this shows the per-launch cost that short kernels pay in full.
    println!();
    println!("Launch overhead (spawn + join, zero syncs)");
    println!("------------------------------------------");
    for &(x, y) in &[(1u32, 1u32), (4, 2), (16, 8)] {
        let dims = GroupDims::new(x, y);
        let group = TileGroup::new(dims)?;
        group.launch(|_| 0)?;

        let t0 = Instant::now();
        for _ in 0..OVERHEAD_LAUNCHES {
            group.launch(|_| 0)?;
        }
        let us = t0.elapsed().as_micros() as f64 / OVERHEAD_LAUNCHES as f64;
        println!("  {:>7}  {:>10.0} µs/launch", dims.to_string(), us);
    }

    println!();
    println!("Reference: 1.8 µs/epoch at 4x2  |  26 µs/epoch at 16x8  (Aug 2026)");

    Ok(())
}

fn parse_arg(args: &[String], flag: &str, default: usize) -> usize {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
