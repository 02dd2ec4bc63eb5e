//! Texture Atlas Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! No methods, no self, just transformations.
//!
//! Packing is an incremental guillotine packer. Each call places one padded
//! tile into the free rectangle that leaves the least unused area, then
//! splits the remainder of that rectangle into at most two new free
//! rectangles. Free rectangles are disjoint from each other and from every
//! placed node, so placements can never overlap. Tiles are packed in call
//! order, never sorted, so the layout is a function of insertion order alone.

use super::texture_atlas_data::{AtlasNode, AtlasUV, FreeRect, TextureAtlasData};
use crate::constants::atlas::BACKGROUND;
use crate::error::{StitchError, StitchResult};
use cgmath::Vector2;
use image::{Rgba, RgbaImage};

/// Create new texture atlas data
pub fn create_texture_atlas(atlas_size: u32, padding: u32) -> TextureAtlasData {
    TextureAtlasData {
        atlas_size,
        padding,
        free_rects: vec![whole_atlas(atlas_size)],
        nodes: Vec::new(),
        atlas_image: RgbaImage::from_pixel(atlas_size, atlas_size, Rgba(BACKGROUND)),
    }
}

fn whole_atlas(atlas_size: u32) -> FreeRect {
    FreeRect {
        x: 0,
        y: 0,
        width: atlas_size,
        height: atlas_size,
    }
}

/// Place an already padded tile into the atlas and copy its pixels.
///
/// Fails with `AtlasFull` when no free rectangle can hold the tile. The
/// atlas is left untouched in that case.
pub fn pack(data: &mut TextureAtlasData, name: &str, tile: &RgbaImage) -> StitchResult<AtlasNode> {
    let (width, height) = tile.dimensions();

    let Some(idx) = find_free_rect(data, width, height) else {
        return Err(StitchError::AtlasFull {
            name: name.to_string(),
            width,
            height,
            atlas_size: data.atlas_size,
        });
    };

    let free = data.free_rects[idx];
    split_free_rect(data, idx, width, height);

    image::imageops::replace(&mut data.atlas_image, tile, free.x as i64, free.y as i64);

    let node = AtlasNode {
        x: free.x,
        y: free.y,
        width,
        height,
        name: name.to_string(),
    };
    data.nodes.push(node.clone());
    Ok(node)
}

/// Best-area-fit search. Ties go to the smaller leftover short side, then to
/// the earliest free rect.
fn find_free_rect(data: &TextureAtlasData, width: u32, height: u32) -> Option<usize> {
    let needed = width as u64 * height as u64;

    data.free_rects
        .iter()
        .enumerate()
        .filter(|(_, r)| r.width >= width && r.height >= height)
        .min_by_key(|(i, r)| {
            let waste = r.width as u64 * r.height as u64 - needed;
            let short_side = (r.width - width).min(r.height - height);
            (waste, short_side, *i)
        })
        .map(|(i, _)| i)
}

/// Split free rectangle after placing a node at its origin
fn split_free_rect(data: &mut TextureAtlasData, idx: usize, width: u32, height: u32) {
    let rect = data.free_rects.remove(idx);

    // Right remainder, as tall as the placed node
    if rect.width > width && height > 0 {
        data.free_rects.push(FreeRect {
            x: rect.x + width,
            y: rect.y,
            width: rect.width - width,
            height,
        });
    }

    // Bottom remainder, full width
    if rect.height > height {
        data.free_rects.push(FreeRect {
            x: rect.x,
            y: rect.y + height,
            width: rect.width,
            height: rect.height - height,
        });
    }
}

/// Node bounds with the padding border stripped: (x, y, width, height)
pub fn logical_bounds(node: &AtlasNode, padding: u32) -> (u32, u32, u32, u32) {
    (
        node.x + padding,
        node.y + padding,
        node.width.saturating_sub(padding * 2),
        node.height.saturating_sub(padding * 2),
    )
}

/// UV coordinates of the logical tile region of a node
pub fn get_uv(data: &TextureAtlasData, node: &AtlasNode) -> AtlasUV {
    let (x, y, width, height) = logical_bounds(node, data.padding);
    let size = data.atlas_size as f32;
    AtlasUV {
        min: Vector2::new(x as f32 / size, y as f32 / size),
        max: Vector2::new((x + width) as f32 / size, (y + height) as f32 / size),
    }
}

/// Get atlas utilization percentage
pub fn utilization(data: &TextureAtlasData) -> f32 {
    let used_area: u64 = data
        .nodes
        .iter()
        .map(|n| n.width as u64 * n.height as u64)
        .sum();

    let total_area = data.atlas_size as u64 * data.atlas_size as u64;
    (used_area as f32 / total_area as f32) * 100.0
}

/// Save atlas to file for debugging
pub fn save_debug(data: &TextureAtlasData, path: &str) -> StitchResult<()> {
    data.atlas_image.save(path)?;
    log::info!("[texture_atlas_operations::save_debug] Wrote atlas to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn solid(size: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    fn overlaps(a: &AtlasNode, b: &AtlasNode) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    fn assert_valid_layout(data: &TextureAtlasData) {
        for (i, a) in data.nodes.iter().enumerate() {
            assert!(a.x + a.width <= data.atlas_size, "{:?} exceeds width", a);
            assert!(a.y + a.height <= data.atlas_size, "{:?} exceeds height", a);
            for b in &data.nodes[i + 1..] {
                assert!(!overlaps(a, b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_first_tile_goes_to_origin() {
        let mut data = create_texture_atlas(64, 0);
        let node = pack(&mut data, "a", &solid(16, [255, 0, 0])).unwrap();
        assert_eq!((node.x, node.y, node.width, node.height), (0, 0, 16, 16));
        assert_eq!(data.atlas_image.get_pixel(15, 15), &Rgba([255, 0, 0, 255]));
        assert_eq!(data.atlas_image.get_pixel(16, 16), &Rgba(BACKGROUND));
    }

    #[test]
    fn test_uniform_tiles_fill_atlas_exactly() {
        let mut data = create_texture_atlas(64, 0);
        for i in 0..16 {
            pack(&mut data, &format!("t{}", i), &solid(16, [1, 2, 3])).unwrap();
        }
        assert_valid_layout(&data);
        assert!((utilization(&data) - 100.0).abs() < 1e-4);

        let err = pack(&mut data, "overflow", &solid(16, [1, 2, 3])).unwrap_err();
        assert!(matches!(err, StitchError::AtlasFull { .. }));
        assert_eq!(data.nodes.len(), 16);
    }

    #[test]
    fn test_random_tiles_never_overlap() {
        let mut rng = StdRng::seed_from_u64(0x5717C4);
        for _ in 0..20 {
            let mut data = create_texture_atlas(256, 0);
            loop {
                let w = rng.gen_range(1..=48);
                let h = rng.gen_range(1..=48);
                let name = format!("t{}", data.nodes.len());
                match pack(&mut data, &name, &RgbaImage::new(w, h)) {
                    Ok(_) => {}
                    Err(StitchError::AtlasFull { .. }) => break,
                    Err(e) => panic!("unexpected error {}", e),
                }
            }
            assert_valid_layout(&data);
        }
    }

    #[test]
    fn test_oversized_tile_is_full_immediately() {
        let mut data = create_texture_atlas(32, 0);
        let err = pack(&mut data, "huge", &RgbaImage::new(33, 8)).unwrap_err();
        assert!(matches!(err, StitchError::AtlasFull { width: 33, .. }));
        assert!(data.nodes.is_empty());
    }

    #[test]
    fn test_packing_is_deterministic() {
        let sizes = [(20, 20), (8, 30), (30, 8), (12, 12), (20, 20), (5, 40)];
        let run = || {
            let mut data = create_texture_atlas(64, 0);
            for (i, (w, h)) in sizes.iter().enumerate() {
                let _ = pack(&mut data, &i.to_string(), &RgbaImage::new(*w, *h));
            }
            data.nodes
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_best_area_fit_prefers_tight_hole() {
        let mut data = create_texture_atlas(64, 0);
        // leaves a 16x48 strip to the right and a 64x16 strip below
        pack(&mut data, "big", &RgbaImage::new(48, 48)).unwrap();
        let node = pack(&mut data, "small", &RgbaImage::new(16, 16)).unwrap();
        assert_eq!((node.x, node.y), (48, 0));
    }

    #[test]
    fn test_uv_excludes_padding() {
        let mut data = create_texture_atlas(64, 2);
        let node = pack(&mut data, "a", &RgbaImage::new(20, 20)).unwrap();
        let uv = get_uv(&data, &node);
        assert_eq!(uv.min, Vector2::new(2.0 / 64.0, 2.0 / 64.0));
        assert_eq!(uv.max, Vector2::new(18.0 / 64.0, 18.0 / 64.0));
    }
}
