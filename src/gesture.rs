//! Pointer gesture helpers that turn raw pointer coordinates into the
//! grid-snapped, clamped geometry the board expects.

use crate::config::LayoutConfig;
use crate::geometry::{Position, Rect, Size};

/// Round `value` to the nearest multiple of `gap`, halves toward positive infinity.
pub fn snap_to_grid(value: i32, gap: i32) -> i32 {
    if gap <= 0 {
        return value;
    }
    (f64::from(value) / f64::from(gap) + 0.5).floor() as i32 * gap
}

fn clamp_start(start: i32, length: i32, bound: i32, gap: i32) -> i32 {
    gap.max(start.min(bound - length - gap))
}

fn clamp_length(length: i32, start: i32, bound: i32, gap: i32, min: i32) -> i32 {
    min.max(length.min(bound - start - gap))
}

/// Drag session for one block. Remembers where the block was grabbed so the
/// block does not jump under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    grab_offset: Position,
    size: Size,
}

impl DragGesture {
    pub fn begin(block: &Rect, pointer: Position) -> Self {
        Self {
            grab_offset: Position::new(pointer.x - block.x, pointer.y - block.y),
            size: block.size(),
        }
    }

    pub fn target(&self, pointer: Position, bounds: Size, gap: i32) -> Position {
        let x = snap_to_grid(pointer.x - self.grab_offset.x, gap);
        let y = snap_to_grid(pointer.y - self.grab_offset.y, gap);
        Position::new(
            clamp_start(x, self.size.width, bounds.width, gap),
            clamp_start(y, self.size.height, bounds.height, gap),
        )
    }
}

/// Bottom/right-edge resize session for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeGesture {
    start_pointer: Position,
    start: Rect,
}

impl ResizeGesture {
    pub fn begin(block: &Rect, pointer: Position) -> Self {
        Self {
            start_pointer: pointer,
            start: *block,
        }
    }

    pub fn target(&self, pointer: Position, bounds: Size, config: &LayoutConfig) -> Size {
        let gap = config.gap;
        let min = config.min_block_edge();
        let width = snap_to_grid(self.start.width + pointer.x - self.start_pointer.x, gap);
        let height = snap_to_grid(self.start.height + pointer.y - self.start_pointer.y, gap);
        Size::new(
            clamp_length(width, self.start.x, bounds.width, gap, min),
            clamp_length(height, self.start.y, bounds.height, gap, min),
        )
    }
}
