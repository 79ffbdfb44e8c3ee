//! Board orchestrator: the caller side of the layout engine.
//!
//! Holds the canonical block list, seats new blocks with the placement
//! finder, runs collision cascades for moves and resizes, and tracks which
//! blocks need repainting.

mod core;

pub use core::Board;
