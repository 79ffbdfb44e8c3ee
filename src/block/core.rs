use std::collections::BTreeMap;
use std::fmt;

use blake3::Hash;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Stable block identifier. Allocated monotonically by the board, so ordering
/// by id is ordering by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Rectangle set consumed and produced by the layout engine.
pub type BlockSet = BTreeMap<BlockId, Rect>;

/// What a block displays. Rendering is somebody else's problem; the kind only
/// travels with the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Image,
    Diagram,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: String,
    pub rect: Rect,
    hash: Hash,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind, content: impl Into<String>, rect: Rect) -> Self {
        let content = content.into();
        let hash = blake3::hash(content.as_bytes());
        Self {
            id,
            kind,
            content,
            rect,
            hash,
        }
    }

    /// Replace the content, returning `true` only when it actually changed.
    pub fn update_content(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        let new_hash = blake3::hash(content.as_bytes());
        if new_hash == self.hash {
            return false;
        }
        self.content = content;
        self.hash = new_hash;
        true
    }

    /// Image blocks with no URL fall back to a placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.kind == BlockKind::Image && self.content.trim().is_empty()
    }
}
