//! TG128 kernel zoo.
//!
//! The built-in SPMD kernels, with enough metadata to drive a CLI and a
//! demo harness that launches any of them on deterministic inputs.
//!
//! | Kernel | Buffers | Rendezvous |
//! |--------|---------|------------|
//! | `vec_add` | A, B → C | one, after the block add |
//! | `memcpy` | src → dst | one, after the block copy |
//! | `sum_reduce` | input → partials | one per tree round, plus the local fold |
//!
//! ## Usage
//!
//! ```
//! use tilegrid_fabric::GroupDims;
//! use tilegrid_kernels::zoo::{self, KernelId};
//!
//! # fn main() -> tilegrid_runtime::Result<()> {
//! let outcome = zoo::run_demo(KernelId::VecAdd, GroupDims::new(1, 1), 4, 4)?;
//! assert_eq!(outcome.output, vec![11, 22, 33, 44]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::info;

use tilegrid_fabric::{GroupDims, Word};
use tilegrid_runtime::{LaunchReport, SharedBuf, TileGroup};

use crate::error::KernelDataError;
use crate::{kernel_memcpy, kernel_sum_reduce, kernel_vec_add};

/// Kernels built into the zoo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelId {
    /// Element-wise `C[i] = A[i] + B[i]`, the reference workload
    VecAdd,
    /// Word-for-word block copy
    Memcpy,
    /// Group-wide sum with a barrier-per-round tree fold
    SumReduce,
}

impl KernelId {
    /// All zoo kernels, in listing order.
    pub const fn all() -> &'static [Self] {
        &[Self::VecAdd, Self::Memcpy, Self::SumReduce]
    }

    /// Canonical kernel name, as accepted on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::VecAdd => "vec_add",
            Self::Memcpy => "memcpy",
            Self::SumReduce => "sum_reduce",
        }
    }

    /// One-line description.
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::VecAdd => "element-wise C[i] = A[i] + B[i], block per tile",
            Self::Memcpy => "word copy src -> dst, block per tile",
            Self::SumReduce => "group-wide sum via barrier-per-round tree fold",
        }
    }

    /// Buffer names in launch order.
    pub const fn buffers(&self) -> &'static [&'static str] {
        match self {
            Self::VecAdd => &["A", "B", "C"],
            Self::Memcpy => &["src", "dst"],
            Self::SumReduce => &["input", "partials"],
        }
    }

    /// Whether the kernel consumes a second input buffer.
    pub const fn takes_second_input(&self) -> bool {
        matches!(self, Self::VecAdd)
    }

    /// Resolve a kernel from a (case-insensitive) name or alias.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "vec_add" | "vecadd" | "add" => Some(Self::VecAdd),
            "memcpy" | "copy" => Some(Self::Memcpy),
            "sum_reduce" | "reduce" | "sum" => Some(Self::SumReduce),
            _ => None,
        }
    }
}

impl fmt::Display for KernelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelId {
    type Err = KernelDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_name(s).ok_or_else(|| KernelDataError::unknown_kernel(s))
    }
}

/// Outcome of a zoo launch.
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    /// Which kernel ran
    pub kernel: KernelId,
    /// Group extents it ran on
    pub dims: GroupDims,
    /// Nominal element count
    pub n: usize,
    /// Words per tile
    pub block_size: usize,
    /// Per-tile statuses and wall time
    pub report: LaunchReport,
    /// Snapshot of the kernel's output buffer (C, dst, or partials)
    pub output: Vec<Word>,
    /// Barrier epochs the launch consumed
    pub epochs: u64,
}

impl DemoOutcome {
    /// Sum of the output words, widened so large buffers cannot wrap.
    #[must_use]
    pub fn checksum(&self) -> i64 {
        self.output.iter().map(|&w| i64::from(w)).sum()
    }

    /// At most `max` leading output words, for display.
    #[must_use]
    pub fn preview(&self, max: usize) -> &[Word] {
        &self.output[..self.output.len().min(max)]
    }
}

/// Demo input A: the ramp `1, 2, 3, ...`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn demo_input_a(n: usize) -> Vec<Word> {
    (0..n).map(|i| (i + 1) as Word).collect()
}

/// Demo input B: the ramp scaled by ten, `10, 20, 30, ...`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn demo_input_b(n: usize) -> Vec<Word> {
    (0..n).map(|i| (10 * (i + 1)) as Word).collect()
}

/// Launch a zoo kernel on the standard demo inputs.
///
/// `vec_add` over the demo ramps yields `C[i] = 11 * (i + 1)` — the
/// classic `[11, 22, 33, 44]` bring-up pattern at `n = 4`.
///
/// # Errors
///
/// Returns [`tilegrid_runtime::RuntimeError`] if the group cannot be
/// constructed or a tile panics.
///
/// # Panics
///
/// Panics (host-side, before any tile spawns) if
/// `dims.tile_count() * block_size > n`.
pub fn run_demo(
    kernel: KernelId,
    dims: GroupDims,
    n: usize,
    block_size: usize,
) -> tilegrid_runtime::Result<DemoOutcome> {
    let a = demo_input_a(n);
    let b = demo_input_b(n);
    run_with_inputs(kernel, dims, n, block_size, &a, &b)
}

/// Launch a zoo kernel on caller-supplied inputs.
///
/// `a` feeds every kernel (A, src, or input); `b` feeds only kernels
/// whose [`KernelId::takes_second_input`] is true and is ignored
/// otherwise. The output buffer is sized and zeroed here: `n` words for
/// `vec_add` and `memcpy`, one word per tile for `sum_reduce`.
///
/// # Errors
///
/// Returns [`tilegrid_runtime::RuntimeError`] if the group cannot be
/// constructed or a tile panics.
///
/// # Panics
///
/// Panics (host-side, before any tile spawns) if the block geometry
/// exceeds `n` or an input holds fewer than `n` words. Kernels validate
/// nothing, so the host check is what keeps a short buffer from
/// stranding the group at the barrier.
pub fn run_with_inputs(
    kernel: KernelId,
    dims: GroupDims,
    n: usize,
    block_size: usize,
    a: &[Word],
    b: &[Word],
) -> tilegrid_runtime::Result<DemoOutcome> {
    let group = TileGroup::new(dims)?;

    let covered = group.tile_count() * block_size;
    assert!(
        covered <= n,
        "block geometry {} tiles x {block_size} words covers {covered}, but n = {n}",
        group.tile_count()
    );
    assert!(a.len() >= n, "input a holds {} words, need {n}", a.len());
    if kernel.takes_second_input() {
        assert!(b.len() >= n, "input b holds {} words, need {n}", b.len());
    }

    info!("Zoo launch: {kernel} on {dims}, n={n}, block={block_size}");

    let (report, output) = match kernel {
        KernelId::VecAdd => {
            let buf_a = SharedBuf::from_words(a);
            let buf_b = SharedBuf::from_words(b);
            let buf_c = SharedBuf::zeroed(n);
            let report =
                group.launch(|ctx| kernel_vec_add(ctx, &buf_a, &buf_b, &buf_c, n, block_size))?;
            (report, buf_c.snapshot())
        }
        KernelId::Memcpy => {
            let src = SharedBuf::from_words(a);
            let dst = SharedBuf::zeroed(n);
            let report = group.launch(|ctx| kernel_memcpy(ctx, &src, &dst, block_size))?;
            (report, dst.snapshot())
        }
        KernelId::SumReduce => {
            let input = SharedBuf::from_words(a);
            let partials = SharedBuf::zeroed(group.tile_count());
            let report =
                group.launch(|ctx| kernel_sum_reduce(ctx, &input, &partials, block_size))?;
            (report, partials.snapshot())
        }
    };

    Ok(DemoOutcome {
        kernel,
        dims,
        n,
        block_size,
        epochs: group.barrier().epochs(),
        report,
        output,
    })
}

/// Print the kernel listing as a table.
pub fn print_kernel_table() {
    println!("\nTG128 Kernel Zoo");
    println!("{}", "=".repeat(72));
    for kernel in KernelId::all() {
        println!(
            "  {:12} {:24} {}",
            kernel.name(),
            format!("[{}]", kernel.buffers().join(", ")),
            kernel.summary()
        );
    }
    println!("{}", "=".repeat(72));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_names_resolve() {
        assert_eq!(KernelId::by_name("vec_add"), Some(KernelId::VecAdd));
        assert_eq!(KernelId::by_name("ADD"), Some(KernelId::VecAdd));
        assert_eq!(KernelId::by_name("copy"), Some(KernelId::Memcpy));
        assert_eq!(KernelId::by_name("reduce"), Some(KernelId::SumReduce));
        assert_eq!(KernelId::by_name("fft"), None);
    }

    #[test]
    fn test_from_str_reports_unknown_name() {
        let err = "warp_shuffle".parse::<KernelId>().unwrap_err();
        assert!(matches!(err, KernelDataError::UnknownKernel { .. }));
        assert_eq!(err.to_string(), "Unknown kernel: warp_shuffle");
    }

    #[test]
    fn test_zoo_listing_is_consistent() {
        assert_eq!(KernelId::all().len(), 3);
        for kernel in KernelId::all() {
            assert_eq!(KernelId::by_name(kernel.name()), Some(*kernel));
            assert!(!kernel.summary().is_empty());
            assert!(kernel.buffers().len() >= 2);
        }
    }

    #[test]
    fn test_demo_inputs_are_the_reference_ramps() {
        assert_eq!(demo_input_a(4), vec![1, 2, 3, 4]);
        assert_eq!(demo_input_b(4), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_run_demo_vec_add_reference() {
        let outcome = run_demo(KernelId::VecAdd, GroupDims::new(1, 1), 4, 4).unwrap();
        assert_eq!(outcome.output, vec![11, 22, 33, 44]);
        assert!(outcome.report.all_zero());
        assert_eq!(outcome.epochs, 1);
        assert_eq!(outcome.checksum(), 110);
        assert_eq!(outcome.preview(2), &[11, 22]);
    }

    #[test]
    fn test_run_demo_vec_add_multi_tile() {
        let dims = GroupDims::new(4, 2);
        let n = 64;
        let outcome = run_demo(KernelId::VecAdd, dims, n, n / dims.tile_count()).unwrap();
        let expected: Vec<Word> = (0..64).map(|i| 11 * (i + 1)).collect();
        assert_eq!(outcome.output, expected);
    }

    #[test]
    fn test_run_demo_memcpy_ignores_b() {
        let outcome = run_demo(KernelId::Memcpy, GroupDims::new(2, 1), 8, 4).unwrap();
        assert_eq!(outcome.output, demo_input_a(8));
    }

    #[test]
    fn test_run_demo_sum_reduce_total() {
        let dims = GroupDims::new(3, 1);
        let outcome = run_demo(KernelId::SumReduce, dims, 12, 4).unwrap();
        // Sum of 1..=12 lands in partials[0].
        assert_eq!(outcome.output[0], 78);
        assert_eq!(outcome.output.len(), dims.tile_count());
    }

    #[test]
    fn test_run_with_inputs_custom_words() {
        let a = vec![5; 8];
        let b = vec![-5; 8];
        let outcome =
            run_with_inputs(KernelId::VecAdd, GroupDims::new(2, 1), 8, 4, &a, &b).unwrap();
        assert_eq!(outcome.output, vec![0; 8]);
        assert_eq!(outcome.checksum(), 0);
    }

    #[test]
    #[should_panic(expected = "covers 16, but n = 8")]
    fn test_oversized_block_geometry_fails_fast() {
        let _ = run_demo(KernelId::VecAdd, GroupDims::new(4, 1), 8, 4);
    }

    #[test]
    fn test_uncovered_tail_stays_zero() {
        // 2 tiles x 2 words cover only the first 4 of 6 elements.
        let outcome = run_demo(KernelId::VecAdd, GroupDims::new(2, 1), 6, 2).unwrap();
        assert_eq!(outcome.output, vec![11, 22, 33, 44, 0, 0]);
    }
}
