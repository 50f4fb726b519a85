// SPDX-License-Identifier: AGPL-3.0-only

//! vec_add scaling benchmark: fixed problem size, growing tile groups.
//!
//! Reference (software pod, 8-core x86 host, Aug 2026, n = 65,536):
//!   1x1:   310 µs/launch    211 Mwords/s
//!   2x2:   120 µs/launch    2.6×
//!   4x2:    95 µs/launch    3.3×   ← host-core count
//!   8x8:   spawn-dominated, speedup flattens
//!
//! Per-launch wall time includes thread spawn and join, so small n
//! under-reports kernel throughput; raise --n to amortize.
//!
//! Usage:
//!   cargo run --release --bin bench_vec_add
//!   cargo run --release --bin bench_vec_add -- --n 262144 --iterations 50

use anyhow::Result;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use tilegrid_fabric::{pod, GroupDims};
use tilegrid_kernels::{kernel_vec_add, zoo};
use tilegrid_runtime::{SharedBuf, TileGroup};

const DEFAULT_N: usize = 65_536;
const DEFAULT_ITERATIONS: usize = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let n = parse_arg(&args, "--n", DEFAULT_N);
    let iterations = parse_arg(&args, "--iterations", DEFAULT_ITERATIONS);

    println!("vec_add scaling benchmark");
    println!("=========================");
    println!(
        "N          : {n} words ({} KiB per buffer)",
        n * pod::WORD_BYTES as usize / 1024
    );
    println!("Iterations : {iterations} launches per group");
    println!();
    println!(
        "  {:>7}  {:>6}  {:>8}  {:>12}  {:>10}  {:>8}",
        "group", "tiles", "block", "µs/launch", "Mwords/s", "vs 1x1"
    );
    println!(
        "  {:-<7}  {:-<6}  {:-<8}  {:-<12}  {:-<10}  {:-<8}",
        "", "", "", "", "", ""
    );

    let host_a = zoo::demo_input_a(n);
    let host_b = zoo::demo_input_b(n);
    let mut baseline_us: Option<f64> = None;

    for &(x, y) in &[(1u32, 1u32), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4), (8, 8), (16, 8)] {
        let dims = GroupDims::new(x, y);
        let tiles = dims.tile_count();
        if n % tiles != 0 {
            continue;
        }
        let block = n / tiles;

        let group = TileGroup::new(dims)?;
        let a = SharedBuf::from_words(&host_a);
        let b = SharedBuf::from_words(&host_b);
        let c = SharedBuf::zeroed(n);

        // Warmup
        group.launch(|ctx| kernel_vec_add(ctx, &a, &b, &c, n, block))?;

        let t0 = Instant::now();
        for _ in 0..iterations {
            group.launch(|ctx| kernel_vec_add(ctx, &a, &b, &c, n, block))?;
        }
        let us = t0.elapsed().as_micros() as f64 / iterations as f64;
        let baseline = *baseline_us.get_or_insert(us);

        assert_eq!(c.load(0), host_a[0] + host_b[0]);
        assert_eq!(c.load(n - 1), host_a[n - 1] + host_b[n - 1]);

        println!(
            "  {:>7}  {:>6}  {:>8}  {:>12.0}  {:>10.0}  {:>7.2}×",
            dims.to_string(),
            tiles,
            block,
            us,
            n as f64 / us,
            baseline / us
        );
    }

    println!();
    println!("Reference: 3.3× at 4x2 on an 8-core host; gains flatten past core count  (Aug 2026)");

    Ok(())
}

fn parse_arg(args: &[String], flag: &str, default: usize) -> usize {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
