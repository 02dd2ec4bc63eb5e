//! Core world data types
//!
//! Block ids, faces, texture descriptors and the block registry.

mod block;
mod face;
mod registry;
pub mod registry_data;
pub mod registry_operations;
pub mod texture_spec;

pub use block::BlockId;
pub use face::BlockFace;
pub use registry::TextureRegistry;
pub use registry_data::{BlockRegistration, BlockRegistryData, TEXTURE_PROPERTY};
pub use texture_spec::{expand, EntityTextureSpec, FaceLayout, FaceNames, NamedFaces};
