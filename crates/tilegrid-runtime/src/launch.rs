//! Tile-group construction and SPMD kernel launch.
//!
//! A [`TileGroup`] is a validated rectangle of tiles with its barrier
//! already armed. [`TileGroup::launch`] runs one kernel function SPMD-style:
//! one OS thread per tile, every thread executing the same kernel body with
//! its own [`TileCtx`]. The launch joins every tile, collects per-tile exit
//! statuses in linear-id order, and returns a [`LaunchReport`].
//!
//! Launches on the same group are sequential; the barrier re-arms between
//! them, so a group can be reused for as many launches as the host wants.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use tilegrid_fabric::{pod, GroupDims, TileCoord, Word};

use crate::barrier::TileBarrier;
use crate::error::{Result, RuntimeError};
use crate::tile::TileCtx;

/// A validated tile group, ready to launch kernels.
#[derive(Debug)]
pub struct TileGroup {
    dims: GroupDims,
    barrier: TileBarrier,
}

impl TileGroup {
    /// Claim a group of `dims` extents at the pod origin.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::EmptyGroup`] if either extent is zero, and
    /// [`RuntimeError::GroupTooLarge`] if the extents exceed the TG128 pod.
    pub fn new(dims: GroupDims) -> Result<Self> {
        if dims.x == 0 || dims.y == 0 {
            return Err(RuntimeError::empty_group(dims));
        }
        if dims.x > pod::MAX_GROUP.x || dims.y > pod::MAX_GROUP.y {
            return Err(RuntimeError::group_too_large(dims, pod::MAX_GROUP));
        }
        debug!("Claimed {dims} tile group ({} tiles)", dims.tile_count());
        Ok(Self { dims, barrier: TileBarrier::new(dims) })
    }

    /// Extents of the group.
    #[must_use]
    pub const fn dims(&self) -> GroupDims {
        self.dims
    }

    /// Total tiles in the group.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.dims.tile_count()
    }

    /// The group's barrier, for host-side epoch inspection.
    #[must_use]
    pub const fn barrier(&self) -> &TileBarrier {
        &self.barrier
    }

    /// Run `kernel` SPMD across the group and wait for every tile.
    ///
    /// Each tile gets its own OS thread (named `tile-x-y`) and its own
    /// [`TileCtx`]; the kernel's return value becomes that tile's exit
    /// status. All tiles are joined before this returns, so a kernel
    /// blocked at the barrier on a missing peer blocks the launch too —
    /// same hang a hardware group would produce.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::TilePanicked`] for the first tile (in
    /// linear-id order) whose kernel panicked. Surviving tiles have
    /// already run to completion by then.
    pub fn launch<F>(&self, kernel: F) -> Result<LaunchReport>
    where
        F: Fn(&TileCtx<'_>) -> Word + Sync,
    {
        let dims = self.dims;
        let count = dims.tile_count();
        info!("Launching kernel on {dims} group ({count} tiles)");
        let start = Instant::now();

        let joined: Vec<(TileCoord, thread::Result<Word>)> = thread::scope(|scope| {
            let kernel = &kernel;
            let barrier = &self.barrier;
            let mut handles = Vec::with_capacity(count);
            for coord in dims.coords() {
                debug!("Spawning tile {coord} (linear id {})", coord.linear_id(dims));
                let spawned = thread::Builder::new()
                    .name(format!("tile-{}-{}", coord.x, coord.y))
                    .spawn_scoped(scope, move || {
                        let ctx = TileCtx::new(coord, dims, barrier);
                        kernel(&ctx)
                    });
                let handle = match spawned {
                    Ok(handle) => handle,
                    // Already-spawned peers may be parked at the barrier
                    // with no way to cancel them; this launch cannot be
                    // unwound into an Err.
                    Err(e) => panic!("Failed to spawn thread for tile {coord}: {e}"),
                };
                handles.push((coord, handle));
            }
            handles
                .into_iter()
                .map(|(coord, handle)| (coord, handle.join()))
                .collect()
        });

        let mut statuses: Vec<Word> = vec![0; count];
        for (coord, outcome) in joined {
            match outcome {
                Ok(status) => statuses[coord.linear_id(dims)] = status,
                Err(_) => {
                    warn!("Tile {coord} panicked; launch failed");
                    return Err(RuntimeError::tile_panicked(coord));
                }
            }
        }

        let duration = start.elapsed();
        info!("Launch complete: {count} tiles in {duration:?}");
        Ok(LaunchReport { dims, statuses, duration })
    }
}

/// Outcome of one completed launch.
///
/// Produced only when every tile ran to completion without panicking;
/// non-zero exit statuses are data, not errors.
#[derive(Debug, Clone)]
pub struct LaunchReport {
    dims: GroupDims,
    statuses: Vec<Word>,
    duration: Duration,
}

impl LaunchReport {
    /// Per-tile exit statuses in linear-id order.
    #[must_use]
    pub fn statuses(&self) -> &[Word] {
        &self.statuses
    }

    /// Exit status of the tile at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the launched group.
    #[must_use]
    pub fn status(&self, coord: TileCoord) -> Word {
        assert!(
            self.dims.contains(coord),
            "tile {coord} outside launched group {}",
            self.dims
        );
        self.statuses[coord.linear_id(self.dims)]
    }

    /// Whether every tile exited with status 0.
    #[must_use]
    pub fn all_zero(&self) -> bool {
        self.statuses.iter().all(|&s| s == 0)
    }

    /// Coordinates of tiles that exited non-zero, in linear-id order.
    #[must_use]
    pub fn failed_tiles(&self) -> Vec<TileCoord> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, &s)| s != 0)
            .map(|(id, _)| TileCoord::from_linear(id, self.dims))
            .collect()
    }

    /// Extents of the launched group.
    #[must_use]
    pub const fn dims(&self) -> GroupDims {
        self.dims
    }

    /// Tiles that ran.
    #[must_use]
    pub fn tiles(&self) -> usize {
        self.statuses.len()
    }

    /// Wall-clock time from first spawn to last join.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_extents() {
        assert!(matches!(
            TileGroup::new(GroupDims::new(0, 4)),
            Err(RuntimeError::EmptyGroup { x: 0, y: 4 })
        ));
        assert!(matches!(
            TileGroup::new(GroupDims::new(4, 0)),
            Err(RuntimeError::EmptyGroup { .. })
        ));
    }

    #[test]
    fn rejects_extents_beyond_pod() {
        assert!(matches!(
            TileGroup::new(GroupDims::new(17, 1)),
            Err(RuntimeError::GroupTooLarge { max_x: 16, max_y: 8, .. })
        ));
        assert!(matches!(
            TileGroup::new(GroupDims::new(1, 9)),
            Err(RuntimeError::GroupTooLarge { .. })
        ));
    }

    #[test]
    fn accepts_full_pod() {
        let group = TileGroup::new(GroupDims::new(16, 8)).unwrap();
        assert_eq!(group.tile_count(), 128);
    }

    #[test]
    fn report_indexes_by_coord() {
        let group = TileGroup::new(GroupDims::new(2, 2)).unwrap();
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let report = group.launch(|ctx| ctx.linear_id() as Word).unwrap();
        assert_eq!(report.status(TileCoord::new(0, 0)), 0);
        assert_eq!(report.status(TileCoord::new(1, 1)), 3);
        assert_eq!(report.tiles(), 4);
    }
}
