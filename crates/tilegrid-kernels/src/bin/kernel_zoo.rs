//! TG128 Kernel Zoo CLI
//!
//! List the built-in kernels and run quick demos on deterministic inputs.
//!
//! ## Usage
//!
//! ```bash
//! # List available kernels
//! kernel_zoo --list
//!
//! # Run the reference vec_add demo (1x1 group, n=4)
//! kernel_zoo --demo vec_add
//!
//! # Run a demo on a bigger group
//! kernel_zoo --demo sum_reduce --tiles 4x2 --n 1024
//! ```

use std::env;

use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use tilegrid_fabric::GroupDims;
use tilegrid_kernels::zoo::{self, KernelId};

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber");

    if let Err(e) = run() {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut show_list = false;
    let mut demo: Option<String> = None;
    let mut tiles = "1x1".to_string();
    let mut n: Option<usize> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--list" | "-l" => {
                show_list = true;
            }
            "--demo" | "-d" => {
                i += 1;
                if i < args.len() {
                    demo = Some(args[i].clone());
                }
            }
            "--tiles" | "-t" => {
                i += 1;
                if i < args.len() {
                    tiles = args[i].clone();
                }
            }
            "--n" => {
                i += 1;
                if i < args.len() {
                    n = Some(args[i].parse()?);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            arg if !arg.starts_with('-') => {
                // Positional argument: kernel name for a demo run
                demo = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Default to --list if no action specified
    if !show_list && demo.is_none() {
        show_list = true;
    }

    if show_list {
        zoo::print_kernel_table();
    }

    if let Some(name) = demo {
        let kernel: KernelId = name.parse()?;
        let dims = parse_tiles(&tiles)?;
        let n = n.unwrap_or(4 * dims.tile_count());
        let block = n / dims.tile_count();

        let outcome = zoo::run_demo(kernel, dims, n, block)?;

        println!("\nDemo: {kernel} on {dims}");
        println!("{}", "-".repeat(48));
        println!("  n          : {n}  ({block} words/tile)");
        println!("  statuses   : all zero = {}", outcome.report.all_zero());
        println!("  epochs     : {}", outcome.epochs);
        println!("  output     : {:?} ...", outcome.preview(8));
        println!("  checksum   : {}", outcome.checksum());
        println!("  duration   : {:?}", outcome.report.duration());
    }

    Ok(())
}

fn parse_tiles(spec: &str) -> Result<GroupDims, String> {
    let (x, y) = spec
        .split_once('x')
        .ok_or_else(|| format!("Bad tiles spec '{spec}', expected XxY like 4x2"))?;
    let x = x.parse().map_err(|_| format!("Bad X extent in '{spec}'"))?;
    let y = y.parse().map_err(|_| format!("Bad Y extent in '{spec}'"))?;
    if x == 0 || y == 0 {
        return Err(format!("Tiles spec '{spec}' has a zero extent"));
    }
    Ok(GroupDims::new(x, y))
}

fn print_help() {
    println!(
        r#"
TG128 Kernel Zoo CLI

USAGE:
    kernel_zoo [OPTIONS] [KERNEL_NAME]

OPTIONS:
    -l, --list           List all built-in kernels (default action)
    -d, --demo <KERNEL>  Run a kernel demo on generated inputs
    -t, --tiles <XxY>    Group extents for the demo (default: 1x1)
    --n <N>              Element count (default: 4 per tile)
    -h, --help           Show this help message

KERNELS:
    vec_add     element-wise C[i] = A[i] + B[i]
    memcpy      word copy src -> dst
    sum_reduce  group-wide sum, tree fold

EXAMPLES:
    # Reference bring-up: expect output [11, 22, 33, 44]
    kernel_zoo --demo vec_add

    # Full-pod reduction
    kernel_zoo --demo sum_reduce --tiles 16x8 --n 16384
"#
    );
}
