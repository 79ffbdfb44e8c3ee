//! Invariants of the layout engine over randomly generated canvases.

use block_canvas::layout::within_bounds;
use block_canvas::{
    BlockId, BlockSet, CascadeRules, Change, Rect, Size, find_free_position, overlaps, resolve,
};
use proptest::prelude::*;

const GAP: i32 = 20;

fn arb_bounds() -> impl Strategy<Value = Size> {
    (40..=60i32, 30..=45i32).prop_map(|(w, h)| Size::new(w * GAP, h * GAP))
}

fn arb_size() -> impl Strategy<Value = Size> {
    (5..=18i32, 5..=15i32).prop_map(|(w, h)| Size::new(w * GAP, h * GAP))
}

fn arb_canvas() -> impl Strategy<Value = (BlockSet, Size)> {
    (arb_bounds(), proptest::collection::vec(arb_size(), 1..=12)).prop_map(|(bounds, sizes)| {
        let mut blocks = BlockSet::new();
        let mut bounds = bounds;
        for (idx, size) in sizes.into_iter().enumerate() {
            let placement = find_free_position(&blocks, size, bounds, GAP);
            bounds = placement.bounds;
            blocks.insert(BlockId(idx as u64 + 1), Rect::from_parts(placement.position, size));
        }
        (blocks, bounds)
    })
}

#[derive(Debug, Clone, Copy)]
enum Edit {
    Move { x: i32, y: i32 },
    Resize { width: i32, height: i32 },
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (-5..=70i32, -5..=60i32).prop_map(|(x, y)| Edit::Move {
            x: x * GAP,
            y: y * GAP
        }),
        (2..=30i32, 2..=30i32).prop_map(|(w, h)| Edit::Resize {
            width: w * GAP,
            height: h * GAP
        }),
    ]
}

fn change_for(blocks: &BlockSet, pick: usize, edit: Edit) -> Change {
    let (id, rect) = blocks
        .iter()
        .nth(pick % blocks.len())
        .map(|(id, rect)| (*id, *rect))
        .unwrap();
    match edit {
        Edit::Move { x, y } => Change::moved(id, Rect { x, y, ..rect }),
        Edit::Resize { width, height } => Change::resized(
            id,
            Rect {
                width,
                height,
                ..rect
            },
        ),
    }
}

fn assert_consistent(blocks: &BlockSet, bounds: Size) -> Result<(), TestCaseError> {
    for (a_id, a) in blocks {
        prop_assert!(
            within_bounds(a, bounds, GAP),
            "{a_id} {a:?} outside {bounds:?}"
        );
        for (b_id, b) in blocks {
            if a_id < b_id {
                prop_assert!(!overlaps(a, b, GAP), "{a_id} {a:?} overlaps {b_id} {b:?}");
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn placements_never_overlap((blocks, bounds) in arb_canvas()) {
        assert_consistent(&blocks, bounds)?;
    }

    #[test]
    fn placement_is_deterministic((blocks, bounds) in arb_canvas(), size in arb_size()) {
        let first = find_free_position(&blocks, size, bounds, GAP);
        let second = find_free_position(&blocks, size, bounds, GAP);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolve_keeps_blocks_apart_and_inside(
        (blocks, bounds) in arb_canvas(),
        pick in 0usize..12,
        edit in arb_edit(),
    ) {
        let change = change_for(&blocks, pick, edit);
        let resolution = resolve(&blocks, change, bounds, &CascadeRules::with_gap(GAP));

        prop_assert_eq!(resolution.blocks.len(), blocks.len());
        prop_assert!(resolution.bounds.height >= bounds.height);
        prop_assert_eq!(resolution.bounds.width, bounds.width);
        assert_consistent(&resolution.blocks, resolution.bounds)?;
    }

    #[test]
    fn resolve_moves_each_block_at_most_once(
        (blocks, bounds) in arb_canvas(),
        pick in 0usize..12,
        edit in arb_edit(),
    ) {
        let change = change_for(&blocks, pick, edit);
        let resolution = resolve(&blocks, change, bounds, &CascadeRules::with_gap(GAP));

        let mut ids: Vec<_> = resolution.report.displaced.iter().map(|d| d.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        prop_assert!(!ids.contains(&change.id));
    }

    #[test]
    fn no_op_change_is_identity((blocks, bounds) in arb_canvas(), pick in 0usize..12) {
        let (id, rect) = blocks.iter().nth(pick % blocks.len()).map(|(id, r)| (*id, *r)).unwrap();
        let moved = resolve(&blocks, Change::moved(id, rect), bounds, &CascadeRules::with_gap(GAP));
        prop_assert_eq!(&moved.blocks, &blocks);
        prop_assert_eq!(moved.bounds, bounds);

        let resized = resolve(&blocks, Change::resized(id, rect), bounds, &CascadeRules::with_gap(GAP));
        prop_assert_eq!(&resized.blocks, &blocks);
        prop_assert!(resized.report.is_empty());
    }
}
