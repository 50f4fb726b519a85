//! `tilegrid` — command-line interface for the TG128 tile fabric.
//!
//! ```text
//! USAGE:
//!   tilegrid fabric                  Show pod topology and fabric constants
//!   tilegrid kernels                 List the built-in kernel zoo
//!   tilegrid run <kernel> [opts]     Launch a kernel on a tile group
//! ```

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tilegrid_fabric::{pod, GroupDims};
use tilegrid_kernels::zoo::{self, KernelId};
use tilegrid_kernels::{read_words_file, write_words_file};

#[derive(Parser)]
#[command(name = "tilegrid", about = "TG128 tile-fabric runtime CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Show pod topology and fabric constants.
    Fabric,
    /// List the built-in kernel zoo.
    Kernels,
    /// Launch a kernel on a tile group.
    Run {
        /// Kernel name (vec_add, memcpy, sum_reduce; aliases accepted).
        kernel: String,
        /// Group X extent in tiles.
        #[arg(long, default_value_t = 4)]
        tiles_x: u32,
        /// Group Y extent in tiles.
        #[arg(long, default_value_t = 2)]
        tiles_y: u32,
        /// Total element count.
        #[arg(long, default_value_t = 1024)]
        n: usize,
        /// Words per tile (default: n / tile count).
        #[arg(long)]
        block_size: Option<usize>,
        /// Read input A (or src/input) from a word-blob file.
        #[arg(long)]
        input_a: Option<PathBuf>,
        /// Read input B from a word-blob file (vec_add only).
        #[arg(long)]
        input_b: Option<PathBuf>,
        /// Write the output buffer to a word-blob file.
        #[arg(long)]
        dump_output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Fabric => cmd_fabric(),
        Cmd::Kernels => cmd_kernels(),
        Cmd::Run {
            kernel,
            tiles_x,
            tiles_y,
            n,
            block_size,
            input_a,
            input_b,
            dump_output,
        } => cmd_run(&RunArgs {
            kernel,
            dims: GroupDims::new(tiles_x, tiles_y),
            n,
            block_size,
            input_a,
            input_b,
            dump_output,
        }),
    }
}

fn cmd_fabric() -> Result<()> {
    let topo = pod::PodTopology::TG128;

    println!("TG128 fabric");
    println!("{}", "=".repeat(48));
    println!("Pod            : {} tiles ({} total)", topo.max_group(), topo.tile_count());
    println!("Word           : 32-bit ({} bytes)", pod::WORD_BYTES);
    println!(
        "DMEM per tile  : {} bytes ({} words)",
        topo.dmem_bytes,
        topo.dmem_words()
    );
    println!("DMEM per pod   : {} KB", topo.total_dmem_bytes() / 1024);
    println!("Max group      : {}", pod::MAX_GROUP);

    Ok(())
}

fn cmd_kernels() -> Result<()> {
    zoo::print_kernel_table();
    Ok(())
}

struct RunArgs {
    kernel: String,
    dims: GroupDims,
    n: usize,
    block_size: Option<usize>,
    input_a: Option<PathBuf>,
    input_b: Option<PathBuf>,
    dump_output: Option<PathBuf>,
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let kernel: KernelId = args.kernel.parse()?;
    let dims = args.dims;
    let tiles = dims.tile_count();
    ensure!(tiles > 0, "Group {dims} has no tiles");

    let block_size = match args.block_size {
        Some(b) => b,
        None => {
            ensure!(
                args.n % tiles == 0,
                "n = {} does not divide across {} tiles; pass --block-size explicitly",
                args.n,
                tiles
            );
            args.n / tiles
        }
    };
    ensure!(
        tiles * block_size <= args.n,
        "{tiles} tiles x {block_size} words/tile exceeds n = {}",
        args.n
    );

    let a = match &args.input_a {
        Some(path) => {
            let words = read_words_file(path)
                .with_context(|| format!("Reading input A from {}", path.display()))?;
            ensure!(
                words.len() >= args.n,
                "{} holds {} words, need {}",
                path.display(),
                words.len(),
                args.n
            );
            words
        }
        None => zoo::demo_input_a(args.n),
    };
    let b = match &args.input_b {
        Some(path) => {
            let words = read_words_file(path)
                .with_context(|| format!("Reading input B from {}", path.display()))?;
            ensure!(
                words.len() >= args.n,
                "{} holds {} words, need {}",
                path.display(),
                words.len(),
                args.n
            );
            words
        }
        None => zoo::demo_input_b(args.n),
    };

    let outcome = zoo::run_with_inputs(kernel, dims, args.n, block_size, &a, &b)?;

    println!("Kernel    : {kernel}");
    println!("Group     : {dims} ({tiles} tiles)");
    println!("N         : {} ({block_size} words/tile)", args.n);
    if outcome.report.all_zero() {
        println!("Statuses  : all zero");
    } else {
        println!("Statuses  : non-zero at {:?}", outcome.report.failed_tiles());
    }
    println!("Epochs    : {}", outcome.epochs);
    println!(
        "Output    : {:?}{}",
        outcome.preview(8),
        if outcome.output.len() > 8 { " ..." } else { "" }
    );
    println!("Checksum  : {}", outcome.checksum());
    println!("Duration  : {:?}", outcome.report.duration());

    if let Some(path) = &args.dump_output {
        write_words_file(path, &outcome.output)
            .with_context(|| format!("Writing output to {}", path.display()))?;
        println!("Dumped    : {} ({} words)", path.display(), outcome.output.len());
    }

    Ok(())
}
