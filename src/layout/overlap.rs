//! Shared collision predicates for placement and cascade resolution.

use crate::block::{BlockId, BlockSet};
use crate::geometry::{Rect, Size};

/// Buffer-zone collision test: true when the two rectangles are closer than
/// `gap` on both axes at once.
pub fn overlaps(a: &Rect, b: &Rect, gap: i32) -> bool {
    a.x < b.right() + gap
        && a.right() + gap > b.x
        && a.y < b.bottom() + gap
        && a.bottom() + gap > b.y
}

/// True when `rect` keeps a `gap` margin from every canvas edge.
pub fn within_bounds(rect: &Rect, bounds: Size, gap: i32) -> bool {
    rect.x >= gap
        && rect.y >= gap
        && rect.right() <= bounds.width - gap
        && rect.bottom() <= bounds.height - gap
}

/// Largest `y + height` across the set, ignoring `skip`. Zero for an empty set.
pub fn lowest_edge(blocks: &BlockSet, skip: Option<BlockId>) -> i32 {
    blocks
        .iter()
        .filter(|(id, _)| Some(**id) != skip)
        .map(|(_, rect)| rect.bottom())
        .max()
        .unwrap_or(0)
}

/// First block (in id order) other than `skip` that collides with `rect`.
pub fn first_collision(
    blocks: &BlockSet,
    rect: &Rect,
    skip: BlockId,
    gap: i32,
) -> Option<BlockId> {
    blocks
        .iter()
        .find(|(id, other)| **id != skip && overlaps(rect, other, gap))
        .map(|(id, _)| *id)
}
