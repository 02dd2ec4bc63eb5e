use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six faces of a block.
///
/// Declaration order is the canonical face order used by every per-face
/// array in the crate: Right, Top, Front, Left, Bottom, Back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockFace {
    Right,  // +X
    Top,    // +Y
    Front,  // +Z
    Left,   // -X
    Bottom, // -Y
    Back,   // -Z
}

impl BlockFace {
    /// All faces in canonical order
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Right,
        BlockFace::Top,
        BlockFace::Front,
        BlockFace::Left,
        BlockFace::Bottom,
        BlockFace::Back,
    ];

    /// Slot of this face in canonical per-face arrays
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BlockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockFace::Right => "right",
            BlockFace::Top => "top",
            BlockFace::Front => "front",
            BlockFace::Left => "left",
            BlockFace::Bottom => "bottom",
            BlockFace::Back => "back",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, face) in BlockFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }
}
