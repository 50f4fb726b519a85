//! Tile-group rendezvous barrier.
//!
//! One [`TileBarrier`] is shared by every tile in a group. A call to
//! [`TileBarrier::sync`] parks the calling tile until all `extent_x *
//! extent_y` participants have arrived, then releases the whole group at
//! once and re-arms for the next epoch. This is the software rendering of
//! the fabric's hardware barrier network: same blocking semantics, same
//! reuse-across-epochs contract, no timeout path.
//!
//! ## Memory visibility
//!
//! Writes a tile performs before its `sync()` are visible to every tile
//! after that tile's own `sync()` returns. The guarantee falls out of the
//! mutex protecting the arrival count: each arrival releases the lock, each
//! release re-acquires it, so all pre-barrier writes happen-before all
//! post-barrier reads. Shared buffers can therefore use relaxed per-cell
//! atomics and lean on barrier edges for cross-tile ordering.
//!
//! ## Liveness
//!
//! The barrier trusts its participants. If a tile never arrives — kernel
//! bug, early panic — the rest of the group blocks forever, exactly as a
//! hardware tile group would hang. There is no cancellation and no timeout;
//! getting every tile to the rendezvous is the kernel author's contract.

use std::sync::{Condvar, Mutex, PoisonError};

use tracing::debug;

use tilegrid_fabric::GroupDims;

/// Arrival state, guarded by the barrier mutex.
#[derive(Debug)]
struct BarrierState {
    /// Tiles arrived in the current epoch.
    arrived: usize,
    /// Completed arrive-release cycles.
    epoch: u64,
}

/// Rendezvous barrier for one tile group.
///
/// Sized at construction for the group's full tile count; every sized-in
/// participant must call [`sync`](Self::sync) once per epoch.
#[derive(Debug)]
pub struct TileBarrier {
    dims: GroupDims,
    participants: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl TileBarrier {
    /// Barrier for a group of `dims` extents.
    ///
    /// Participant count is fixed at `dims.tile_count()` and never changes
    /// for the life of the barrier.
    #[must_use]
    pub fn new(dims: GroupDims) -> Self {
        let participants = dims.tile_count();
        debug!("Tile barrier armed for {dims} group ({participants} participants)");
        Self {
            dims,
            participants,
            state: Mutex::new(BarrierState { arrived: 0, epoch: 0 }),
            released: Condvar::new(),
        }
    }

    /// Arrive at the rendezvous and block until the whole group has.
    ///
    /// The last arrival resets the count and wakes everyone; the barrier is
    /// immediately reusable for the next epoch. A single-tile group returns
    /// without blocking.
    ///
    /// Blocks forever if any sized-in tile never arrives.
    pub fn sync(&self) {
        let mut state = self.lock_state();
        let epoch = state.epoch;
        state.arrived += 1;
        if state.arrived == self.participants {
            // Last arrival: re-arm and release the epoch.
            state.arrived = 0;
            state.epoch = state.epoch.wrapping_add(1);
            drop(state);
            self.released.notify_all();
        } else {
            // The epoch check distinguishes a real release from a spurious
            // wakeup: waiters of epoch N leave only once the count has been
            // folded into epoch N+1.
            while state.epoch == epoch {
                state = self
                    .released
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
    }

    /// Completed arrive-release cycles since construction.
    #[must_use]
    pub fn epochs(&self) -> u64 {
        self.lock_state().epoch
    }

    /// Number of tiles the barrier was sized for.
    #[must_use]
    pub const fn participants(&self) -> usize {
        self.participants
    }

    /// Extents of the group this barrier serves.
    #[must_use]
    pub const fn dims(&self) -> GroupDims {
        self.dims
    }

    /// Lock the arrival state, riding through poisoning.
    ///
    /// A panicking tile can poison the mutex while the count is mid-update;
    /// the state itself stays coherent (two small integers), and the launch
    /// layer surfaces the panic separately.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, BarrierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_participant_never_blocks() {
        let barrier = TileBarrier::new(GroupDims::new(1, 1));
        barrier.sync();
        barrier.sync();
        barrier.sync();
        assert_eq!(barrier.epochs(), 3);
    }

    #[test]
    fn sized_from_group_dims() {
        let barrier = TileBarrier::new(GroupDims::new(4, 2));
        assert_eq!(barrier.participants(), 8);
        assert_eq!(barrier.dims(), GroupDims::new(4, 2));
        assert_eq!(barrier.epochs(), 0);
    }

    #[test]
    fn two_threads_release_each_other() {
        let barrier = std::sync::Arc::new(TileBarrier::new(GroupDims::new(2, 1)));
        let peer = std::sync::Arc::clone(&barrier);
        let handle = std::thread::spawn(move || peer.sync());
        barrier.sync();
        handle.join().unwrap();
        assert_eq!(barrier.epochs(), 1);
    }
}
