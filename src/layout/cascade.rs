//! Breadth-first collision cascade for moved or resized blocks.
//!
//! Every block the change collides with is relocated once, next to the block
//! that displaced it, unless a swap, a shrink or one of the fallbacks fits
//! better. Relocated blocks may in turn displace blocks that have not been
//! settled yet; settled blocks are never revisited.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::block::{BlockId, BlockSet};
use crate::geometry::{Position, Rect, Size};

use super::overlap::{first_collision, lowest_edge, overlaps, within_bounds};

/// Narrowest width a block may be shrunk to instead of being relocated.
pub const MIN_VIABLE_WIDTH: i32 = 100;

/// Side of the active block the affected block is pushed to.
///
/// Declaration order doubles as the tie-break order for equally deep overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Below,
    Left,
    Above,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Below,
        Direction::Left,
        Direction::Above,
    ];

    /// How far `affected` reaches into `active` from this side. Positive
    /// values mean the rectangles intersect along this axis.
    pub fn overlap_depth(self, active: &Rect, affected: &Rect) -> i32 {
        match self {
            Direction::Right => active.right() - affected.x,
            Direction::Below => active.bottom() - affected.y,
            Direction::Left => affected.right() - active.x,
            Direction::Above => affected.bottom() - active.y,
        }
    }

    /// `affected` moved flush against this side of `active`, one gap away.
    pub fn displace(self, active: &Rect, affected: &Rect, gap: i32) -> Rect {
        match self {
            Direction::Right => Rect {
                x: active.right() + gap,
                ..*affected
            },
            Direction::Below => Rect {
                y: active.bottom() + gap,
                ..*affected
            },
            Direction::Left => Rect {
                x: active.x - gap - affected.width,
                ..*affected
            },
            Direction::Above => Rect {
                y: active.y - gap - affected.height,
                ..*affected
            },
        }
    }

    /// True when `rect` crosses the canvas margin on this direction's side.
    pub fn leaves_canvas(self, rect: &Rect, bounds: Size, gap: i32) -> bool {
        match self {
            Direction::Right => rect.right() > bounds.width - gap,
            Direction::Below => rect.bottom() > bounds.height - gap,
            Direction::Left => rect.x < gap,
            Direction::Above => rect.y < gap,
        }
    }

    fn touches_edge(self, rect: &Rect, bounds: Size, gap: i32) -> bool {
        match self {
            Direction::Right => rect.right() >= bounds.width - gap,
            Direction::Below => rect.bottom() >= bounds.height - gap,
            Direction::Left => rect.x <= gap,
            Direction::Above => rect.y <= gap,
        }
    }

    /// A direction is blocked when `affected` already sits on that edge or the
    /// push would carry it past the margin.
    pub fn is_edge_blocked(self, active: &Rect, affected: &Rect, bounds: Size, gap: i32) -> bool {
        self.touches_edge(affected, bounds, gap)
            || self.leaves_canvas(&self.displace(active, affected, gap), bounds, gap)
    }
}

/// Sign of the user's drag on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragVector {
    pub dx: i32,
    pub dy: i32,
}

impl DragVector {
    pub fn between(from: &Rect, to: &Rect) -> Self {
        Self {
            dx: (to.x - from.x).signum(),
            dy: (to.y - from.y).signum(),
        }
    }

    pub fn points(self, direction: Direction) -> bool {
        match direction {
            Direction::Right => self.dx > 0,
            Direction::Left => self.dx < 0,
            Direction::Below => self.dy > 0,
            Direction::Above => self.dy < 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Move,
    Resize,
}

/// New geometry for one block, as produced by a drag or resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub id: BlockId,
    pub rect: Rect,
    pub kind: ChangeKind,
}

impl Change {
    pub fn moved(id: BlockId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            kind: ChangeKind::Move,
        }
    }

    pub fn resized(id: BlockId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            kind: ChangeKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeRules {
    pub gap: i32,
    pub min_viable_width: i32,
}

impl Default for CascadeRules {
    fn default() -> Self {
        Self {
            gap: 20,
            min_viable_width: MIN_VIABLE_WIDTH,
        }
    }
}

impl CascadeRules {
    pub fn with_gap(gap: i32) -> Self {
        Self {
            gap,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplacementStrategy {
    /// Traded places with the block that displaced it.
    Swap,
    /// Pushed next to the active block.
    Push(Direction),
    /// Kept at the pushed position with its width cut to fit the canvas.
    Shrink,
    /// Moved to the free top-left slot.
    Anchor,
    /// Stacked below every other block.
    StackBelow,
}

impl DisplacementStrategy {
    pub fn is_fallback(self) -> bool {
        matches!(
            self,
            DisplacementStrategy::Anchor | DisplacementStrategy::StackBelow
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    pub id: BlockId,
    pub from: Rect,
    pub to: Rect,
    pub strategy: DisplacementStrategy,
}

/// What a single [`resolve`] call did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub displaced: Vec<Displacement>,
    pub grew: bool,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        self.displaced.is_empty() && !self.grew
    }

    pub fn count(&self, strategy: fn(DisplacementStrategy) -> bool) -> usize {
        self.displaced
            .iter()
            .filter(|entry| strategy(entry.strategy))
            .count()
    }

    pub fn swaps(&self) -> usize {
        self.count(|s| s == DisplacementStrategy::Swap)
    }

    pub fn shrinks(&self) -> usize {
        self.count(|s| s == DisplacementStrategy::Shrink)
    }

    pub fn fallbacks(&self) -> usize {
        self.count(DisplacementStrategy::is_fallback)
    }
}

/// Consistent block set after a change, plus the (possibly taller) canvas.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub blocks: BlockSet,
    pub bounds: Size,
    pub report: CascadeReport,
}

/// Apply `change` to `existing` and relocate every block it transitively
/// collides with. Never fails; infeasible layouts degrade to stacking blocks
/// below everything and growing the canvas height.
pub fn resolve(existing: &BlockSet, change: Change, bounds: Size, rules: &CascadeRules) -> Resolution {
    let target = clamp_change(&change, bounds, rules.gap);
    let previous = existing.get(&change.id).copied();

    if previous == Some(target) {
        return Resolution {
            blocks: existing.clone(),
            bounds,
            report: CascadeReport::default(),
        };
    }

    let drag = match (change.kind, previous) {
        (ChangeKind::Move, Some(from)) => Some(DragVector::between(&from, &target)),
        _ => None,
    };

    let mut cascade = Cascade {
        blocks: existing.clone(),
        origins: existing,
        bounds,
        rules: *rules,
        drag,
        settled: BTreeSet::new(),
        report: CascadeReport::default(),
    };
    cascade.blocks.insert(change.id, target);
    cascade.fit_height(&target);
    cascade.run(change.id);

    Resolution {
        blocks: cascade.blocks,
        bounds: cascade.bounds,
        report: cascade.report,
    }
}

/// Pick the side of `active` to push `affected` to.
///
/// A move prefers the drag direction; otherwise the shallowest positive
/// overlap wins. Directions blocked by a canvas edge are skipped unless every
/// candidate is blocked.
pub fn determine_direction(
    active: &Rect,
    affected: &Rect,
    drag: Option<DragVector>,
    bounds: Size,
    gap: i32,
) -> Direction {
    let positive: Vec<(Direction, i32)> = Direction::ALL
        .iter()
        .map(|direction| (*direction, direction.overlap_depth(active, affected)))
        .filter(|(_, depth)| *depth > 0)
        .collect();
    let open = |direction: Direction| !direction.is_edge_blocked(active, affected, bounds, gap);

    if let Some(drag) = drag {
        let preferred = shallowest(
            positive
                .iter()
                .filter(|(direction, _)| drag.points(*direction) && open(*direction)),
        );
        if let Some(direction) = preferred {
            return direction;
        }
    }

    shallowest(positive.iter().filter(|(direction, _)| open(*direction)))
        .or_else(|| shallowest(positive.iter()))
        .unwrap_or(Direction::Below)
}

fn shallowest<'a>(candidates: impl Iterator<Item = &'a (Direction, i32)>) -> Option<Direction> {
    candidates
        .min_by_key(|(_, depth)| *depth)
        .map(|(direction, _)| *direction)
}

/// Position `affected` would take by trading places with `active`, if that
/// clears every collision and stays on the canvas.
pub fn swap_candidate(
    blocks: &BlockSet,
    active_origin: &Rect,
    active: &Rect,
    affected: BlockId,
    bounds: Size,
    gap: i32,
) -> Option<Rect> {
    if active_origin.position() == active.position() {
        return None;
    }
    let current = blocks.get(&affected)?;
    let swapped = current.with_position(active_origin.position());
    if !within_bounds(&swapped, bounds, gap) {
        return None;
    }
    match first_collision(blocks, &swapped, affected, gap) {
        Some(_) => None,
        None => Some(swapped),
    }
}

fn clamp_change(change: &Change, bounds: Size, gap: i32) -> Rect {
    let mut rect = change.rect;
    match change.kind {
        ChangeKind::Move => {
            rect.x = clamp_axis(rect.x, rect.width, bounds.width, gap);
            rect.y = clamp_axis(rect.y, rect.height, bounds.height, gap);
        }
        ChangeKind::Resize => {
            rect.width = rect.width.min(bounds.width - rect.x - gap).max(1);
        }
    }
    rect
}

fn clamp_axis(start: i32, length: i32, bound: i32, gap: i32) -> i32 {
    gap.max(start.min(bound - length - gap))
}

struct Cascade<'a> {
    blocks: BlockSet,
    origins: &'a BlockSet,
    bounds: Size,
    rules: CascadeRules,
    drag: Option<DragVector>,
    settled: BTreeSet<BlockId>,
    report: CascadeReport,
}

impl Cascade<'_> {
    fn run(&mut self, changed: BlockId) {
        self.settled.insert(changed);

        // (affected, active)
        let mut queue: VecDeque<(BlockId, BlockId)> = self
            .unsettled_collisions(changed)
            .into_iter()
            .map(|affected| (affected, changed))
            .collect();

        while let Some((affected, active)) = queue.pop_front() {
            if !self.settled.insert(affected) {
                continue;
            }
            let (Some(active_rect), Some(from)) = (
                self.blocks.get(&active).copied(),
                self.blocks.get(&affected).copied(),
            ) else {
                continue;
            };

            let direction = determine_direction(
                &active_rect,
                &from,
                self.drag,
                self.bounds,
                self.rules.gap,
            );
            let (to, strategy) = self.calculate_new_position(active, active_rect, affected, from, direction);

            self.blocks.insert(affected, to);
            self.fit_height(&to);
            self.report.displaced.push(Displacement {
                id: affected,
                from,
                to,
                strategy,
            });

            for next in self.unsettled_collisions(affected) {
                queue.push_back((next, affected));
            }
        }
    }

    fn calculate_new_position(
        &self,
        active: BlockId,
        active_rect: Rect,
        affected: BlockId,
        current: Rect,
        direction: Direction,
    ) -> (Rect, DisplacementStrategy) {
        let gap = self.rules.gap;

        let origin = self.origins.get(&active).copied().unwrap_or(active_rect);
        if let Some(swapped) =
            swap_candidate(&self.blocks, &origin, &active_rect, affected, self.bounds, gap)
        {
            return (swapped, DisplacementStrategy::Swap);
        }

        let mut rect = direction.displace(&active_rect, &current, gap);
        let mut strategy = DisplacementStrategy::Push(direction);

        if direction.leaves_canvas(&rect, self.bounds, gap) {
            let fitting_width = self.bounds.width - gap - rect.x;
            if direction == Direction::Right && fitting_width >= self.rules.min_viable_width {
                rect.width = fitting_width;
                strategy = DisplacementStrategy::Shrink;
            } else {
                (rect, strategy) = self.fallback(affected, current);
            }
        }

        if strategy != DisplacementStrategy::StackBelow && self.collides_with_settled(&rect, affected) {
            return (self.stack_below(affected, current), DisplacementStrategy::StackBelow);
        }

        (rect, strategy)
    }

    fn fallback(&self, affected: BlockId, current: Rect) -> (Rect, DisplacementStrategy) {
        let gap = self.rules.gap;
        let anchor = current.with_position(Position::new(gap, gap));
        if within_bounds(&anchor, self.bounds, gap)
            && first_collision(&self.blocks, &anchor, affected, gap).is_none()
        {
            return (anchor, DisplacementStrategy::Anchor);
        }
        (self.stack_below(affected, current), DisplacementStrategy::StackBelow)
    }

    fn stack_below(&self, affected: BlockId, current: Rect) -> Rect {
        let gap = self.rules.gap;
        current.with_position(Position::new(gap, lowest_edge(&self.blocks, Some(affected)) + gap))
    }

    fn collides_with_settled(&self, rect: &Rect, skip: BlockId) -> bool {
        self.settled
            .iter()
            .filter(|id| **id != skip)
            .filter_map(|id| self.blocks.get(id))
            .any(|other| overlaps(rect, other, self.rules.gap))
    }

    fn unsettled_collisions(&self, id: BlockId) -> Vec<BlockId> {
        let Some(rect) = self.blocks.get(&id) else {
            return Vec::new();
        };
        self.blocks
            .iter()
            .filter(|(other, _)| **other != id && !self.settled.contains(*other))
            .filter(|(_, other)| overlaps(rect, other, self.rules.gap))
            .map(|(other, _)| *other)
            .collect()
    }

    fn fit_height(&mut self, rect: &Rect) {
        let needed = rect.bottom() + self.rules.gap;
        if needed > self.bounds.height {
            self.bounds.height = needed;
            self.report.grew = true;
        }
    }
}
