//! Fabric model for the TG128 manycore tile processor.
//!
//! This crate has **no dependencies** and spawns **no threads** — it is a
//! pure model of the fabric: pod topology, tile coordinates, group extents,
//! and the machine word. The execution side (barriers, shared memory,
//! kernel launch) lives in `tilegrid-runtime`.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`pod`] | TG128 pod topology (16×8 tiles, 4 KB data memory per tile) |
//! | [`coord`] | [`TileCoord`] positions and [`GroupDims`] group extents |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod coord;
pub mod pod;

pub use coord::{GroupDims, TileCoord};

/// The TG128 machine word.
///
/// The fabric is a 32-bit integer machine; kernels exchange `Word`s through
/// shared buffers and report a `Word` exit status.
pub type Word = i32;
