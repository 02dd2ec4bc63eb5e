//! Renderer Module - atlas bitmap, packing, mip pyramid and upload

pub mod mip_pyramid;
pub mod padding;
pub mod texture_atlas_data;
pub mod texture_atlas_operations;
pub mod texture_sink;

// Simple re-exports
pub use mip_pyramid::build_pyramid;
pub use padding::{EdgeRepeat, PaddingTransform};
pub use texture_atlas_data::{AtlasNode, AtlasUV, FreeRect, TextureAtlasData};
pub use texture_sink::{MemoryTextureSink, TextureHandle, TextureSink};

#[cfg(feature = "gpu")]
pub use texture_sink::WgpuTextureSink;
