use crate::layout::{CascadeReport, Placement, PlacementStrategy};
use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Running counters for layout activity on a board.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    placements: u64,
    stacked_placements: u64,
    resolves: u64,
    displaced: u64,
    swaps: u64,
    shrinks: u64,
    fallbacks: u64,
    canvas_growths: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_placement(&mut self, placement: &Placement, grew: bool) {
        self.placements = self.placements.saturating_add(1);
        if placement.strategy == PlacementStrategy::StackBelow {
            self.stacked_placements = self.stacked_placements.saturating_add(1);
        }
        if grew {
            self.canvas_growths = self.canvas_growths.saturating_add(1);
        }
    }

    pub fn record_cascade(&mut self, report: &CascadeReport) {
        self.resolves = self.resolves.saturating_add(1);
        self.displaced = self
            .displaced
            .saturating_add(report.displaced.len() as u64);
        self.swaps = self.swaps.saturating_add(report.swaps() as u64);
        self.shrinks = self.shrinks.saturating_add(report.shrinks() as u64);
        self.fallbacks = self.fallbacks.saturating_add(report.fallbacks() as u64);
        if report.grew {
            self.canvas_growths = self.canvas_growths.saturating_add(1);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            placements: self.placements,
            stacked_placements: self.stacked_placements,
            resolves: self.resolves,
            displaced: self.displaced,
            swaps: self.swaps,
            shrinks: self.shrinks,
            fallbacks: self.fallbacks,
            canvas_growths: self.canvas_growths,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub placements: u64,
    pub stacked_placements: u64,
    pub resolves: u64,
    pub displaced: u64,
    pub swaps: u64,
    pub shrinks: u64,
    pub fallbacks: u64,
    pub canvas_growths: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("placements".to_string(), json!(self.placements));
        map.insert("stacked_placements".to_string(), json!(self.stacked_placements));
        map.insert("resolves".to_string(), json!(self.resolves));
        map.insert("displaced".to_string(), json!(self.displaced));
        map.insert("swaps".to_string(), json!(self.swaps));
        map.insert("shrinks".to_string(), json!(self.shrinks));
        map.insert("fallbacks".to_string(), json!(self.fallbacks));
        map.insert("canvas_growths".to_string(), json!(self.canvas_growths));
        map
    }
}
