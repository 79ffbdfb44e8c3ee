//! Spatial layout engine orchestrator.
//!
//! Two pure entry points over a caller-owned `BlockSet`:
//! [`find_free_position`] seats a new block and [`resolve`] repairs the set
//! after a move or resize. Neither keeps state between calls; canvas growth
//! is returned alongside the result.

mod cascade;
mod overlap;
mod placement;

pub use cascade::{
    CascadeReport, CascadeRules, Change, ChangeKind, Direction, Displacement,
    DisplacementStrategy, DragVector, MIN_VIABLE_WIDTH, Resolution, determine_direction, resolve,
    swap_candidate,
};
pub use overlap::{first_collision, lowest_edge, overlaps, within_bounds};
pub use placement::{Placement, PlacementStrategy, find_free_position};
