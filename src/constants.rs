//! Stitcher constants
//!
//! Defaults for `StitcherConfig` and fixed values shared across modules.

pub mod atlas {
    /// Atlas side length in pixels. 2048 is supported by effectively every GPU.
    pub const DEFAULT_ATLAS_SIZE: u32 = 2048;
    /// Logical tile edge in pixels; also the grid unit of texture indices.
    pub const DEFAULT_TILE_SIZE: u32 = 16;
    /// Border repeat width around each tile.
    pub const DEFAULT_TILE_PAD: u32 = 2;
    /// Background fill, opaque grey so unused atlas space is visible in dumps.
    pub const BACKGROUND: [u8; 4] = [80, 80, 80, 255];
}

pub mod tables {
    /// Texture index table capacity (16-bit indices).
    pub const DEFAULT_COUNT_TEXTURE_ID: u32 = 65536;
    /// Entity table capacity.
    pub const DEFAULT_COUNT_VOXEL_ID: usize = 32768;
}

pub mod mip {
    /// Smallest mip level edge.
    pub const DEFAULT_MIN_MIP_SIZE: u32 = 1;
}

/// Number of faces on a block.
pub const FACE_COUNT: usize = 6;
