//! Spatial layout engine for a free-form block canvas.
//!
//! Users drop rectangular blocks (images, diagrams) on a canvas and drag or
//! resize them at will. The `layout` module keeps the arrangement valid: it
//! finds free slots for new blocks and cascades displacements when a change
//! makes blocks collide, so that every pair of blocks and every canvas edge
//! stays at least one gap apart. The `board` module is the stateful owner
//! that callers drive from their UI.

pub mod block;
pub mod board;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod logging;
pub mod metrics;

pub use block::{Block, BlockId, BlockKind, BlockSet};
pub use board::Board;
pub use config::LayoutConfig;
pub use error::{CanvasError, Result};
pub use geometry::{Position, Rect, Size};
pub use gesture::{DragGesture, ResizeGesture, snap_to_grid};
pub use layout::{
    CascadeReport, CascadeRules, Change, ChangeKind, Direction, Displacement,
    DisplacementStrategy, Placement, PlacementStrategy, Resolution, find_free_position, overlaps,
    resolve,
};
pub use logging::{
    FileSink, LogEvent, LogLevel, LogSink, Logger, LoggingError, LoggingResult, MemorySink,
    NullSink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
