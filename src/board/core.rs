use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Value, json};

use crate::block::{Block, BlockId, BlockKind, BlockSet};
use crate::config::LayoutConfig;
use crate::error::{CanvasError, Result};
use crate::geometry::{Position, Rect, Size};
use crate::layout::{CascadeReport, Change, Resolution, find_free_position, resolve};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{LayoutMetrics, MetricSnapshot};

const LOG_TARGET: &str = "canvas::board";

/// Owner of the canonical block list.
///
/// Every layout call hands the engine a snapshot of the current rectangles
/// and adopts whatever comes back, rects and canvas bounds alike.
pub struct Board {
    blocks: BTreeMap<BlockId, Block>,
    bounds: Size,
    config: LayoutConfig,
    next_id: u64,
    dirty: BTreeSet<BlockId>,
    logger: Option<Logger>,
    metrics: LayoutMetrics,
}

impl Board {
    pub fn new(bounds: Size, config: LayoutConfig) -> Self {
        Self {
            blocks: BTreeMap::new(),
            bounds,
            config,
            next_id: 1,
            dirty: BTreeSet::new(),
            logger: None,
            metrics: LayoutMetrics::new(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Geometry snapshot in the shape the layout engine consumes.
    pub fn rects(&self) -> BlockSet {
        self.blocks
            .iter()
            .map(|(id, block)| (*id, block.rect))
            .collect()
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.metrics.snapshot()
    }

    /// Add a block of the configured default size at the first free slot.
    pub fn add_block(&mut self, kind: BlockKind, content: impl Into<String>) -> BlockId {
        let size = self.config.default_block_size;
        self.add_block_sized(kind, content, size)
    }

    pub fn add_block_sized(
        &mut self,
        kind: BlockKind,
        content: impl Into<String>,
        size: Size,
    ) -> BlockId {
        let placement = find_free_position(&self.rects(), size, self.bounds, self.config.gap);
        let grew = placement.grew(self.bounds);
        self.bounds = placement.bounds;

        let id = BlockId(self.next_id);
        self.next_id += 1;
        let rect = Rect::from_parts(placement.position, size);
        self.blocks.insert(id, Block::new(id, kind, content, rect));
        self.dirty.insert(id);
        self.metrics.record_placement(&placement, grew);

        self.emit(
            "block_added",
            [
                json_kv("block", id.0),
                json_kv("kind", json!(kind)),
                json_kv("rect", rect_value(&rect)),
                json_kv("strategy", json!(placement.strategy)),
                json_kv("canvas_grew", grew),
            ],
        );
        id
    }

    pub fn remove_block(&mut self, id: BlockId) -> Result<Block> {
        let block = self
            .blocks
            .remove(&id)
            .ok_or(CanvasError::BlockNotFound(id))?;
        self.dirty.remove(&id);
        self.emit("block_removed", [json_kv("block", id.0)]);
        Ok(block)
    }

    /// Move a block to `position` and push aside whatever it lands on.
    pub fn move_block(&mut self, id: BlockId, position: Position) -> Result<CascadeReport> {
        let current = self.rect_of(id)?;
        self.apply(Change::moved(id, current.with_position(position)), "block_moved")
    }

    /// Resize a block in place and push aside whatever it now covers.
    pub fn resize_block(&mut self, id: BlockId, size: Size) -> Result<CascadeReport> {
        let current = self.rect_of(id)?;
        self.apply(Change::resized(id, current.with_size(size)), "block_resized")
    }

    /// Returns `true` when the content differed and the block was marked dirty.
    pub fn set_content(&mut self, id: BlockId, content: impl Into<String>) -> Result<bool> {
        let block = self
            .blocks
            .get_mut(&id)
            .ok_or(CanvasError::BlockNotFound(id))?;
        let changed = block.update_content(content);
        if changed {
            self.dirty.insert(id);
        }
        Ok(changed)
    }

    /// Adopt new container dimensions. The height never shrinks below what the
    /// blocks occupy. Blocks left past the new right margin are pulled back
    /// inside, narrowed if needed, and whatever they land on is displaced.
    pub fn resize_canvas(&mut self, bounds: Size) -> Result<CascadeReport> {
        let gap = self.config.gap;
        let occupied = self
            .blocks
            .values()
            .map(|block| block.rect.bottom() + gap)
            .max()
            .unwrap_or(0);
        self.bounds = Size::new(bounds.width, bounds.height.max(occupied));
        self.emit(
            "canvas_resized",
            [
                json_kv("width", self.bounds.width),
                json_kv("height", self.bounds.height),
            ],
        );

        let mut report = CascadeReport::default();
        let ids: Vec<_> = self.blocks.keys().copied().collect();
        for id in ids {
            let rect = self.rect_of(id)?;
            if rect.right() <= self.bounds.width - gap {
                continue;
            }
            let width = rect.width.min(self.bounds.width - 2 * gap).max(1);
            let inside = rect.with_size(Size::new(width, rect.height));
            let step = self.apply(Change::moved(id, inside), "block_reseated")?;
            report.displaced.extend(step.displaced);
            report.grew |= step.grew;
        }
        Ok(report)
    }

    /// Blocks whose geometry or content changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<Block> {
        let ids: Vec<_> = std::mem::take(&mut self.dirty).into_iter().collect();
        ids.into_iter()
            .filter_map(|id| self.blocks.get(&id).cloned())
            .collect()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Emit the current metric snapshot through the logger, if one is set.
    pub fn log_metrics(&self) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(self.metrics.snapshot().to_log_event("canvas::metrics"));
        }
    }

    fn rect_of(&self, id: BlockId) -> Result<Rect> {
        self.blocks
            .get(&id)
            .map(|block| block.rect)
            .ok_or(CanvasError::BlockNotFound(id))
    }

    fn apply(&mut self, change: Change, message: &str) -> Result<CascadeReport> {
        let Resolution {
            blocks,
            bounds,
            report,
        } = resolve(&self.rects(), change, self.bounds, &self.config.cascade_rules());

        for (id, rect) in blocks {
            if let Some(block) = self.blocks.get_mut(&id) {
                if block.rect != rect {
                    block.rect = rect;
                    self.dirty.insert(id);
                }
            }
        }
        self.bounds = bounds;
        self.metrics.record_cascade(&report);

        self.emit(
            message,
            [
                json_kv("block", change.id.0),
                json_kv("kind", json!(change.kind)),
                json_kv("displaced", report.displaced.len()),
                json_kv("swaps", report.swaps()),
                json_kv("fallbacks", report.fallbacks()),
                json_kv("canvas_grew", report.grew),
            ],
        );
        Ok(report)
    }

    fn emit(&self, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = &self.logger {
            let event = event_with_fields(LogLevel::Debug, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

fn rect_value(rect: &Rect) -> Value {
    json!([rect.x, rect.y, rect.width, rect.height])
}
