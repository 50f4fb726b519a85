#![deny(unsafe_code)]

//! SPMD kernel library for the TG128 tile fabric
//!
//! This crate carries the built-in kernels, the zoo that names and
//! launches them, and the word-blob format kernel buffers use to cross
//! the host boundary.
//!
//! # Kernel discipline
//!
//! Every kernel here follows the fabric's contract:
//!
//! - **Same text everywhere**: one function body runs on every tile;
//!   identity enters only through [`TileCtx`](tilegrid_runtime::TileCtx)
//!   block math.
//! - **No validation**: kernels trust the host. A bad index panics the
//!   tile and the runtime reports it; nothing in a kernel returns an error.
//! - **Barrier-shaped control flow**: `sync()` is the only suspension
//!   point, and every tile makes the same sequence of `sync()` calls.
//! - **Status, not result**: the return word is an exit status (0 on the
//!   happy path); data leaves through shared buffers.
//!
//! # Example
//!
//! ```
//! use tilegrid_fabric::GroupDims;
//! use tilegrid_kernels::zoo::{self, KernelId};
//!
//! # fn main() -> tilegrid_runtime::Result<()> {
//! // The reference workload: one tile, four elements.
//! let outcome = zoo::run_demo(KernelId::VecAdd, GroupDims::new(1, 1), 4, 4)?;
//! assert_eq!(outcome.output, vec![11, 22, 33, 44]);
//! assert!(outcome.report.all_zero());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod data;
mod error;
mod memcpy;
mod reduce;
mod vec_add;
pub mod zoo;

pub use data::{pack_words, read_words_file, unpack_words, write_words_file};
pub use error::{KernelDataError, Result};
pub use memcpy::kernel_memcpy;
pub use reduce::kernel_sum_reduce;
pub use vec_add::{kernel_vec_add, vec_add_single_tile};
pub use zoo::{DemoOutcome, KernelId};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        kernel_memcpy, kernel_sum_reduce, kernel_vec_add, DemoOutcome, KernelDataError, KernelId,
        Result,
    };
}
