//! Block Registry Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in registry_operations.rs

use super::texture_spec::EntityTextureSpec;
use super::BlockId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Property name under which block textures are registered
pub const TEXTURE_PROPERTY: &str = "texture";

/// Block registration data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRegistration {
    #[serde(default)]
    pub id: BlockId,
    pub name: String,
    #[serde(default)]
    pub texture: EntityTextureSpec,
}

/// Registry data that stores all block types
pub struct BlockRegistryData {
    /// Map from name to BlockId
    pub name_to_id: FxHashMap<String, BlockId>,
    /// All registered blocks, in id order
    pub registrations: Vec<BlockRegistration>,
    pub next_id: u16,
}
