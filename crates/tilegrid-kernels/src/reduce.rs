//! Parallel sum reduction over the tile group.
//!
//! Two phases, both SPMD:
//!
//! 1. **Local fold** — each tile sums its own block of `input` and
//!    publishes the partial at `partials[linear_id]`, then rendezvouses.
//! 2. **Tree fold** — pairs of partials merge with a doubling stride, one
//!    rendezvous per round, until `partials[0]` holds the group total.
//!
//! The stride walk handles non-power-of-two groups: each round folds
//! `floor(remaining / 2)` pairs and carries the odd slot forward. Every
//! tile executes every round's rendezvous whether or not it folded a pair,
//! so the barrier stays fully subscribed throughout.

use tilegrid_fabric::Word;
use tilegrid_runtime::{SharedBuf, TileCtx};

/// Sum-reduce kernel entry point.
///
/// On return `partials[0]` holds the sum of the first
/// `tile_count * block_size` words of `input`, and every tile has observed
/// it. The other `partials` slots hold intermediate rubble. Always exits 0.
pub fn kernel_sum_reduce(
    ctx: &TileCtx<'_>,
    input: &SharedBuf,
    partials: &SharedBuf,
    block_size: usize,
) -> Word {
    let id = ctx.linear_id();

    // Phase 1: local fold into this tile's partial slot.
    let base = id * block_size;
    let mut acc: Word = 0;
    for i in base..base + block_size {
        acc += input.load(i);
    }
    partials.store(id, acc);
    ctx.sync();

    // Phase 2: pairwise tree fold. remaining/stride evolve identically on
    // every tile, so all tiles hit the same number of rendezvous.
    let mut remaining = ctx.tile_count();
    let mut stride = 1;
    while remaining > 1 {
        if id < remaining / 2 {
            let dst = 2 * stride * id;
            let src = dst + stride;
            partials.store(dst, partials.load(dst) + partials.load(src));
        }
        stride *= 2;
        remaining -= remaining / 2;
        ctx.sync();
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegrid_fabric::GroupDims;
    use tilegrid_runtime::TileGroup;

    fn run_reduce(dims: GroupDims, input_words: &[Word]) -> Word {
        let group = TileGroup::new(dims).unwrap();
        let block = input_words.len() / dims.tile_count();
        let input = SharedBuf::from_words(input_words);
        let partials = SharedBuf::zeroed(dims.tile_count());

        let report = group
            .launch(|ctx| kernel_sum_reduce(ctx, &input, &partials, block))
            .unwrap();
        assert!(report.all_zero());
        partials.load(0)
    }

    #[test]
    fn single_tile_sums_its_block() {
        assert_eq!(run_reduce(GroupDims::new(1, 1), &[1, 2, 3, 4]), 10);
    }

    #[test]
    fn power_of_two_group() {
        // 8 tiles x 3 words, all ones.
        let total = run_reduce(GroupDims::new(4, 2), &[1; 24]);
        assert_eq!(total, 24);
    }

    #[test]
    fn non_power_of_two_group_carries_odd_slot() {
        // 3 tiles: the tree fold has an odd partial to carry forward.
        let input: Vec<Word> = (1..=6).collect();
        assert_eq!(run_reduce(GroupDims::new(3, 1), &input), 21);

        // 7 tiles, 2 words each.
        let input: Vec<Word> = (1..=14).collect();
        assert_eq!(run_reduce(GroupDims::new(7, 1), &input), 105);
    }

    #[test]
    fn matches_serial_sum() {
        let dims = GroupDims::new(4, 2);
        let input: Vec<Word> = (0..64).map(|i| (i * 37 % 23) - 11).collect();
        let serial: Word = input.iter().sum();
        assert_eq!(run_reduce(dims, &input), serial);
    }

    #[test]
    fn negative_values_cancel() {
        let input: Vec<Word> = vec![5, -5, 17, -17, 100, -100, 1, -1];
        assert_eq!(run_reduce(GroupDims::new(2, 2), &input), 0);
    }

    #[test]
    fn every_tile_observes_the_total() {
        // After the kernel returns, all tiles (not just the origin) must be
        // able to read the final total.
        let dims = GroupDims::new(3, 2);
        let group = TileGroup::new(dims).unwrap();
        let input = SharedBuf::from_words(&[2; 12]);
        let partials = SharedBuf::zeroed(6);
        let observed = SharedBuf::zeroed(6);

        group
            .launch(|ctx| {
                let status = kernel_sum_reduce(ctx, &input, &partials, 2);
                observed.store(ctx.linear_id(), partials.load(0));
                status
            })
            .unwrap();

        assert_eq!(observed.snapshot(), vec![24; 6]);
    }
}
