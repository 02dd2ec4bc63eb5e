//! Texture index resolution
//!
//! After every tile of a pass is packed, each texture's placement is turned
//! into a flat texture index and a log2 tile size, then written for every
//! block face that uses it.
//!
//! Indices flatten the tile grid column-major:
//!
//! ```text
//! row   = y / tile_size
//! col   = x / tile_size
//! index = row + tile_count * col      (tile_count = atlas_size / tile_size)
//! ```
//!
//! where (x, y) is the top-left of the tile with its padding border stripped.
//! Shaders must use the same convention to find a tile.

use super::plan::TexturePlan;
use crate::constants::FACE_COUNT;
use crate::error::{StitchError, StitchResult};
use crate::renderer::texture_atlas_data::{AtlasNode, AtlasUV, TextureAtlasData};
use crate::renderer::texture_atlas_operations::{get_uv, logical_bounds};
use crate::world::core::{BlockFace, BlockId};
use crate::StitcherConfig;
use rustc_hash::FxHashMap;

/// Per-block, per-face texture index and size tables
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TextureTables {
    /// Texture index table, indexed by block id then canonical face
    pub indices: Vec<[Option<u32>; FACE_COUNT]>,
    /// log2 of the logical tile edge, same layout as `indices`
    pub sizes: Vec<[Option<u8>; FACE_COUNT]>,
    /// UV rectangle of each texture's logical region
    pub uvs: FxHashMap<String, AtlasUV>,
}

/// Texture index of one block face
pub fn texture_index(tables: &TextureTables, block: BlockId, face: BlockFace) -> Option<u32> {
    tables.indices.get(block.index())?[face.index()]
}

/// log2 tile size of one block face
pub fn texture_size_log2(tables: &TextureTables, block: BlockId, face: BlockFace) -> Option<u8> {
    tables.sizes.get(block.index())?[face.index()]
}

/// Inverse of the index flattening: (row, col)
pub fn tile_coords(index: u32, tile_count: u32) -> (u32, u32) {
    (index % tile_count, index / tile_count)
}

/// Flatten a logical tile origin into a texture index
pub fn flatten_index(x: u32, y: u32, tile_size: u32, tile_count: u32) -> u32 {
    let row = y / tile_size;
    let col = x / tile_size;
    row + tile_count * col
}

/// Resolved index and size of one placed texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTile {
    pub index: u32,
    pub size_log2: u8,
}

/// Validate one placement and compute its index.
///
/// Tiles must be square, a power of two and at least `tile_size` wide.
/// Non-overlapping tiles of that size always start in distinct grid cells.
pub fn resolve_node(node: &AtlasNode, config: &StitcherConfig) -> StitchResult<ResolvedTile> {
    let (x, y, width, height) = logical_bounds(node, config.tile_pad);

    if width != height {
        return Err(StitchError::NonSquareTexture {
            name: node.name.clone(),
            width,
            height,
        });
    }
    if !width.is_power_of_two() {
        return Err(StitchError::NonPowerOfTwo {
            name: node.name.clone(),
            size: width,
        });
    }

    if width < config.tile_size {
        return Err(StitchError::TileTooSmall {
            name: node.name.clone(),
            size: width,
            tile_size: config.tile_size,
        });
    }

    let index = flatten_index(x, y, config.tile_size, config.tile_count());
    if index >= config.count_texture_id {
        return Err(StitchError::IndexOverflow {
            name: node.name.clone(),
            index,
            capacity: config.count_texture_id,
        });
    }

    Ok(ResolvedTile {
        index,
        size_log2: width.trailing_zeros() as u8,
    })
}

/// Build fresh tables for a completed pass.
///
/// Every texture must own its index. Nothing is written unless every texture
/// resolves, so a failed pass never leaves half-updated tables behind.
pub fn resolve_indices(
    plan: &TexturePlan,
    atlas: &TextureAtlasData,
    config: &StitcherConfig,
    block_count: usize,
) -> StitchResult<TextureTables> {
    let nodes: FxHashMap<&str, &AtlasNode> =
        atlas.nodes.iter().map(|n| (n.name.as_str(), n)).collect();

    let mut tables = TextureTables {
        indices: vec![[None; FACE_COUNT]; block_count],
        sizes: vec![[None; FACE_COUNT]; block_count],
        uvs: FxHashMap::default(),
    };
    let mut owners: FxHashMap<u32, &str> = FxHashMap::default();

    for name in &plan.names {
        let node = nodes.get(name.as_str()).ok_or_else(|| StitchError::Internal {
            message: format!("texture '{}' was planned but never packed", name),
        })?;
        let tile = resolve_node(node, config)?;

        if let Some(other) = owners.insert(tile.index, name.as_str()) {
            return Err(StitchError::IndexCollision {
                first: other.to_string(),
                second: name.clone(),
                index: tile.index,
            });
        }
        if config.verbose {
            let (row, col) = tile_coords(tile.index, config.tile_count());
            log::debug!(
                "[index_resolver::resolve_indices] '{}' -> index {} (row {}, col {}), size 2^{}",
                name,
                tile.index,
                row,
                col,
                tile.size_log2
            );
        }

        for &(block, face) in plan.side_map.get(name).into_iter().flatten() {
            let slot = block.index();
            if slot >= block_count {
                return Err(StitchError::EntityOverflow {
                    id: slot,
                    capacity: block_count,
                });
            }
            tables.indices[slot][face.index()] = Some(tile.index);
            tables.sizes[slot][face.index()] = Some(tile.size_log2);
        }
        tables.uvs.insert(name.clone(), get_uv(atlas, node));
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::texture_atlas_operations::{create_texture_atlas, pack};
    use crate::renderer::{EdgeRepeat, PaddingTransform};
    use crate::stitch::plan::plan_textures;
    use crate::world::core::EntityTextureSpec;
    use image::RgbaImage;

    fn small_config() -> StitcherConfig {
        StitcherConfig {
            atlas_size: 256,
            tile_size: 16,
            tile_pad: 2,
            ..Default::default()
        }
    }

    fn node(x: u32, y: u32, width: u32, height: u32) -> AtlasNode {
        AtlasNode {
            x,
            y,
            width,
            height,
            name: "t".to_string(),
        }
    }

    fn packed_atlas(config: &StitcherConfig, names: &[String], edge: u32) -> TextureAtlasData {
        let mut atlas = create_texture_atlas(config.atlas_size, config.tile_pad);
        for name in names {
            let tile = EdgeRepeat.repeat_border(&RgbaImage::new(edge, edge), config.tile_pad, config.tile_pad);
            pack(&mut atlas, name, &tile).unwrap();
        }
        atlas
    }

    #[test]
    fn test_uniform_tiles_get_distinct_in_range_indices() {
        let config = small_config();
        // 256 / 20 = 12 padded tiles per row
        let names: Vec<String> = (0..144).map(|i| format!("tile{}", i)).collect();
        let atlas = packed_atlas(&config, &names, 16);

        let mut seen = std::collections::HashSet::new();
        for n in &atlas.nodes {
            let tile = resolve_node(n, &config).unwrap();
            assert!(tile.index < config.count_texture_id);
            assert!(seen.insert(tile.index), "duplicate index {}", tile.index);
            assert_eq!(tile.size_log2, 4);

            let (x, y, _, _) = logical_bounds(n, config.tile_pad);
            assert_eq!(
                tile_coords(tile.index, config.tile_count()),
                (y / config.tile_size, x / config.tile_size)
            );
        }
    }

    #[test]
    fn test_index_is_column_major() {
        let config = small_config();
        // tile_count = 16
        assert_eq!(flatten_index(0, 16, 16, 16), 1);
        assert_eq!(flatten_index(16, 0, 16, 16), 16);
        assert_eq!(resolve_node(&node(30, 46, 20, 20), &config).unwrap().index, 3 + 16 * 2);
    }

    #[test]
    fn test_non_square_is_rejected() {
        let err = resolve_node(&node(0, 0, 20, 36), &small_config()).unwrap_err();
        assert!(matches!(
            err,
            StitchError::NonSquareTexture {
                width: 16,
                height: 32,
                ..
            }
        ));
    }

    #[test]
    fn test_non_power_of_two_is_rejected() {
        let err = resolve_node(&node(0, 0, 28, 28), &small_config()).unwrap_err();
        assert!(matches!(err, StitchError::NonPowerOfTwo { size: 24, .. }));
    }

    #[test]
    fn test_index_overflow() {
        let config = StitcherConfig {
            count_texture_id: 16,
            ..small_config()
        };
        let err = resolve_node(&node(16, 0, 20, 20), &config).unwrap_err();
        assert!(matches!(err, StitchError::IndexOverflow { index: 16, .. }));
    }

    #[test]
    fn test_tables_cover_every_registered_face() {
        let config = small_config();
        let specs = vec![
            EntityTextureSpec::Absent,
            EntityTextureSpec::from("dirt"),
            EntityTextureSpec::from("stone"),
        ];
        let plan = plan_textures(&specs, config.count_voxel_id).unwrap();
        let atlas = packed_atlas(&config, &plan.names, 16);
        let tables = resolve_indices(&plan, &atlas, &config, specs.len()).unwrap();

        let dirt = resolve_node(&atlas.nodes[0], &config).unwrap().index;
        let stone = resolve_node(&atlas.nodes[1], &config).unwrap().index;
        assert_ne!(dirt, stone);
        for face in BlockFace::ALL {
            assert_eq!(texture_index(&tables, BlockId::AIR, face), None);
            assert_eq!(texture_index(&tables, BlockId(1), face), Some(dirt));
            assert_eq!(texture_index(&tables, BlockId(2), face), Some(stone));
            assert_eq!(texture_size_log2(&tables, BlockId(2), face), Some(4));
        }
        assert_eq!(texture_index(&tables, BlockId(9), BlockFace::Top), None);
        assert!(tables.uvs.contains_key("dirt"));
    }

    #[test]
    fn test_tile_below_grid_size_is_rejected() {
        let err = resolve_node(&node(0, 0, 12, 12), &small_config()).unwrap_err();
        assert!(matches!(
            err,
            StitchError::TileTooSmall {
                size: 8,
                tile_size: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_larger_tiles_resolve() {
        let tile = resolve_node(&node(0, 0, 36, 36), &small_config()).unwrap();
        assert_eq!(tile.size_log2, 5);
    }

    #[test]
    fn test_shared_index_is_an_error() {
        let config = small_config();
        let specs = vec![
            EntityTextureSpec::Absent,
            EntityTextureSpec::from("red"),
            EntityTextureSpec::from("blue"),
        ];
        let plan = plan_textures(&specs, config.count_voxel_id).unwrap();
        let mut atlas = create_texture_atlas(config.atlas_size, config.tile_pad);
        // Both logical origins fall in grid cell (0, 0)
        atlas.nodes.push(AtlasNode { name: "red".into(), ..node(0, 0, 20, 20) });
        atlas.nodes.push(AtlasNode { name: "blue".into(), ..node(4, 4, 20, 20) });

        let err = resolve_indices(&plan, &atlas, &config, specs.len()).unwrap_err();
        assert!(matches!(err, StitchError::IndexCollision { index: 0, .. }));
    }

    #[test]
    fn test_failed_resolution_writes_nothing() {
        let config = small_config();
        let specs = vec![EntityTextureSpec::Absent, EntityTextureSpec::from("odd")];
        let plan = plan_textures(&specs, config.count_voxel_id).unwrap();
        let atlas = packed_atlas(&config, &plan.names, 12);
        assert!(matches!(
            resolve_indices(&plan, &atlas, &config, specs.len()),
            Err(StitchError::NonPowerOfTwo { size: 12, .. })
        ));
    }
}
