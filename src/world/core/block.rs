use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockId::AIR => write!(f, "Air"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    /// Reserved id meaning "no block". Never textured.
    pub const AIR: BlockId = BlockId(0);

    /// Index into dense per-block tables
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}
