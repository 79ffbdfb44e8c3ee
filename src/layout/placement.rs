//! Free-slot search for newly inserted blocks.
//!
//! A row-major grid scan in `gap` steps, nudging each candidate past the
//! blocks directly above and to the left of it. Favours top-left slots; not
//! an optimal packer.

use serde::Serialize;

use crate::block::BlockSet;
use crate::geometry::{Position, Rect, Size};

use super::overlap::{lowest_edge, overlaps};

/// Which step of the search produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Empty canvas: the block sits at the top-left margin.
    Origin,
    /// Found by the grid scan within the current bounds.
    Scan,
    /// Found by a second scan after the canvas height was grown.
    GrownScan,
    /// No slot found; the block is stacked below everything.
    StackBelow,
}

/// Result of [`find_free_position`]. `bounds` is the canvas the position is
/// valid in and is taller than the input bounds when the canvas had to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub bounds: Size,
    pub strategy: PlacementStrategy,
}

impl Placement {
    pub fn grew(&self, before: Size) -> bool {
        self.bounds.height > before.height
    }
}

/// Find a top-left position for a block of `new_size` that collides with
/// nothing in `existing`. Never fails.
pub fn find_free_position(existing: &BlockSet, new_size: Size, bounds: Size, gap: i32) -> Placement {
    if existing.is_empty() {
        return Placement {
            position: Position::new(gap, gap),
            bounds,
            strategy: PlacementStrategy::Origin,
        };
    }

    let highest_occupied = lowest_edge(existing, None);

    if let Some(position) = scan(existing, new_size, bounds, gap) {
        return Placement {
            position,
            bounds,
            strategy: PlacementStrategy::Scan,
        };
    }

    let needed_height = highest_occupied + new_size.height + 2 * gap;
    let mut bounds = bounds;
    if needed_height > bounds.height {
        bounds.height = needed_height;
        if let Some(position) = scan(existing, new_size, bounds, gap) {
            return Placement {
                position,
                bounds,
                strategy: PlacementStrategy::GrownScan,
            };
        }
    }

    Placement {
        position: Position::new(gap, highest_occupied + gap),
        bounds,
        strategy: PlacementStrategy::StackBelow,
    }
}

fn scan(existing: &BlockSet, size: Size, bounds: Size, gap: i32) -> Option<Position> {
    let max_x = bounds.width - size.width - gap;
    let max_y = bounds.height - size.height - gap;
    let step = gap.max(1) as usize;

    for y in (gap..=max_y).step_by(step) {
        for x in (gap..=max_x).step_by(step) {
            let candidate = nudge(existing, Rect::new(x, y, size.width, size.height), gap);
            if candidate.right() > bounds.width - gap || candidate.bottom() > bounds.height - gap {
                continue;
            }
            if existing.values().all(|rect| !overlaps(&candidate, rect, gap)) {
                return Some(candidate.position());
            }
        }
    }

    None
}

/// Push the candidate clear of blocks whose bottom (or right) edge sits less
/// than one gap above (or left of) it.
fn nudge(existing: &BlockSet, mut candidate: Rect, gap: i32) -> Rect {
    for rect in existing.values() {
        if rect.bottom() <= candidate.y
            && rect.bottom() + gap > candidate.y
            && rect.spans_x(&candidate)
        {
            candidate.y = rect.bottom() + gap;
        }
        if rect.right() <= candidate.x
            && rect.right() + gap > candidate.x
            && rect.spans_y(&candidate)
        {
            candidate.x = rect.right() + gap;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;

    const GAP: i32 = 20;
    const BLOCK: Size = Size::new(300, 200);

    fn set(rects: &[Rect]) -> BlockSet {
        rects
            .iter()
            .enumerate()
            .map(|(idx, rect)| (BlockId(idx as u64 + 1), *rect))
            .collect()
    }

    #[test]
    fn empty_canvas_places_at_margin() {
        let placement = find_free_position(&BlockSet::new(), BLOCK, Size::new(800, 600), GAP);
        assert_eq!(placement.position, Position::new(20, 20));
        assert_eq!(placement.strategy, PlacementStrategy::Origin);
        assert_eq!(placement.bounds, Size::new(800, 600));
    }

    #[test]
    fn single_occupant_places_right_of_it() {
        let existing = set(&[Rect::new(20, 20, 300, 200)]);
        let placement = find_free_position(&existing, BLOCK, Size::new(800, 600), GAP);
        assert_eq!(placement.position, Position::new(340, 20));
        assert_eq!(placement.strategy, PlacementStrategy::Scan);
    }

    #[test]
    fn full_first_row_wraps_to_next_row() {
        let existing = set(&[Rect::new(20, 20, 300, 200), Rect::new(340, 20, 300, 200)]);
        let placement = find_free_position(&existing, BLOCK, Size::new(800, 600), GAP);
        assert_eq!(placement.position, Position::new(20, 240));
    }

    #[test]
    fn exhausted_rows_grow_the_canvas() {
        let existing = set(&[Rect::new(20, 20, 300, 200), Rect::new(20, 240, 300, 200)]);
        let bounds = Size::new(360, 500);
        let placement = find_free_position(&existing, BLOCK, bounds, GAP);
        assert!(placement.position.y > 440);
        assert_eq!(placement.position, Position::new(20, 460));
        assert_eq!(placement.strategy, PlacementStrategy::GrownScan);
        assert_eq!(placement.bounds, Size::new(360, 680));
        assert!(placement.grew(bounds));
    }

    #[test]
    fn too_wide_block_stacks_below_everything() {
        let existing = set(&[Rect::new(20, 20, 100, 100)]);
        let placement = find_free_position(&existing, BLOCK, Size::new(200, 400), GAP);
        assert_eq!(placement.position, Position::new(20, 140));
        assert_eq!(placement.strategy, PlacementStrategy::StackBelow);
    }

    #[test]
    fn nudge_clears_block_just_above() {
        let existing = set(&[Rect::new(20, 20, 300, 200)]);
        let nudged = nudge(&existing, Rect::new(20, 220, 300, 200), GAP);
        assert_eq!(nudged.position(), Position::new(20, 240));
        let beside = nudge(&existing, Rect::new(330, 20, 100, 100), GAP);
        assert_eq!(beside.position(), Position::new(340, 20));
    }

    #[test]
    fn scan_is_deterministic() {
        let existing = set(&[
            Rect::new(20, 20, 300, 200),
            Rect::new(340, 60, 200, 300),
            Rect::new(40, 260, 280, 140),
        ]);
        let first = find_free_position(&existing, Size::new(160, 120), Size::new(900, 700), GAP);
        let second = find_free_position(&existing, Size::new(160, 120), Size::new(900, 700), GAP);
        assert_eq!(first, second);
    }
}
