// Hearth Stitcher - Data-Oriented Programming (DOP) Architecture
//
// Packs per-face block textures into one atlas, resolves the texture index of
// every block face and hands a mip pyramid of the atlas to the renderer.
// - Data lives in *_data modules
// - Transformations live in *_operations modules as pure functions

// Constants module
pub mod constants;

pub mod error;
pub mod renderer;
pub mod stitch;
pub mod world;

pub use error::{ErrorContext, StitchError, StitchResult};
pub use renderer::{
    build_pyramid, AtlasNode, AtlasUV, EdgeRepeat, MemoryTextureSink, PaddingTransform,
    TextureAtlasData, TextureHandle, TextureSink,
};
#[cfg(feature = "gpu")]
pub use renderer::WgpuTextureSink;
pub use stitch::{
    DirectoryImageSource, ImageSource, MemoryImageSource, StitchEvent, StitchReport,
    StitchSession, StitcherData, TextureTables,
};
pub use world::core::{
    BlockFace, BlockId, BlockRegistryData, EntityTextureSpec, FaceNames, NamedFaces,
    TextureRegistry,
};

use constants::{atlas, mip, tables};
use serde::Deserialize;

/// Stitcher configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StitcherConfig {
    /// Edge of the square atlas in pixels
    pub atlas_size: u32,
    /// Logical tile edge; also the grid unit of texture indices
    pub tile_size: u32,
    /// Edge-repeat border added on each side of every tile
    pub tile_pad: u32,
    /// Texture index capacity
    pub count_texture_id: u32,
    /// Block id capacity
    pub count_voxel_id: usize,
    /// Smallest mip level edge
    pub min_mip_size: u32,
    /// Emit every mip level as an event
    pub debug: bool,
    /// Per-texture debug logging
    pub verbose: bool,
}

impl StitcherConfig {
    /// Tiles per atlas row or column
    pub fn tile_count(&self) -> u32 {
        self.atlas_size / self.tile_size.max(1)
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> StitchResult<Self> {
        let config: StitcherConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> StitchResult<()> {
        if self.atlas_size == 0 || !self.atlas_size.is_power_of_two() {
            return Err(invalid("atlas_size", self.atlas_size, "must be a non-zero power of two"));
        }
        if self.tile_size == 0 || !self.tile_size.is_power_of_two() {
            return Err(invalid("tile_size", self.tile_size, "must be a non-zero power of two"));
        }
        if self.tile_size > self.atlas_size {
            return Err(invalid(
                "tile_size",
                self.tile_size,
                &format!("exceeds atlas_size {}", self.atlas_size),
            ));
        }

        let padded = self.tile_size as u64 + 2 * self.tile_pad as u64;
        if padded > self.atlas_size as u64 {
            return Err(invalid(
                "tile_pad",
                self.tile_pad,
                &format!("padded tile of {} does not fit atlas_size {}", padded, self.atlas_size),
            ));
        }

        if self.count_texture_id == 0 {
            return Err(invalid("count_texture_id", self.count_texture_id, "cannot be 0"));
        }
        // BlockId is 16 bits wide
        if self.count_voxel_id == 0 || self.count_voxel_id > u16::MAX as usize + 1 {
            return Err(invalid("count_voxel_id", self.count_voxel_id, "must be in 1..=65536"));
        }
        if self.min_mip_size == 0 {
            return Err(invalid("min_mip_size", self.min_mip_size, "cannot be 0"));
        }

        log::info!(
            "[StitcherConfig] Validated: atlas {}px, tile {}px + {}px pad, {} tiles per row",
            self.atlas_size,
            self.tile_size,
            self.tile_pad,
            self.tile_count()
        );
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> StitchError {
    StitchError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl Default for StitcherConfig {
    fn default() -> Self {
        Self {
            atlas_size: atlas::DEFAULT_ATLAS_SIZE,
            tile_size: atlas::DEFAULT_TILE_SIZE,
            tile_pad: atlas::DEFAULT_TILE_PAD,
            count_texture_id: tables::DEFAULT_COUNT_TEXTURE_ID,
            count_voxel_id: tables::DEFAULT_COUNT_VOXEL_ID,
            min_mip_size: mip::DEFAULT_MIN_MIP_SIZE,
            debug: false,
            verbose: false,
        }
    }
}
