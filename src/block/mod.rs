//! Block model shared by the layout engine and the board.
//!
//! The engine only ever sees `BlockSet` (id → rect); the richer `Block`
//! record lives with the board that owns the canonical list.

mod core;

pub use core::{Block, BlockId, BlockKind, BlockSet};
