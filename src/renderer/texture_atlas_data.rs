//! Texture Atlas Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in texture_atlas_operations.rs

use cgmath::Vector2;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// UV coordinates within the atlas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasUV {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

/// A placed rectangle, padding border included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasNode {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub name: String,
}

/// Unused region of the atlas. Free rects never overlap each other or any
/// placed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Texture atlas data - Pure data structure
pub struct TextureAtlasData {
    pub atlas_size: u32,
    pub padding: u32,

    // Packing state
    pub free_rects: Vec<FreeRect>,
    pub nodes: Vec<AtlasNode>,
    pub atlas_image: RgbaImage,
}
