//! Texture stitching
//!
//! Coordinates one stitch pass: plan the unique textures of the registry,
//! fetch and pack them, resolve the per-face index tables, then build and
//! upload the mip pyramid.

pub mod events;
pub mod image_source;
pub mod index_resolver;
pub mod plan;
pub mod stitcher_data;
pub mod stitcher_operations;

pub use events::StitchEvent;
pub use image_source::{DirectoryImageSource, ImageSource, MemoryImageSource};
pub use index_resolver::{texture_size_log2, ResolvedTile, TextureTables};
pub use plan::{plan_textures, SideMap, TexturePlan};
pub use stitcher_data::{StitchReport, StitchSession, StitcherData};
pub use stitcher_operations::{
    begin_session, create_stitcher, events, is_complete, refresh, stitch, stitch_blocking,
    stitch_with_padding, texture_index,
};
