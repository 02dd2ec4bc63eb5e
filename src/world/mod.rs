//! World Module
//!
//! Block identity, block faces and the block registry that describes which
//! texture each face shows.

pub mod core;

pub use core::{BlockFace, BlockId, BlockRegistryData, EntityTextureSpec, TextureRegistry};
