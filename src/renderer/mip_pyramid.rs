//! Mip pyramid generation for the finished atlas
//!
//! Level 0 is the atlas itself. Each following level halves both
//! dimensions until the next level would fall below `min_size` (never below
//! one pixel). Tiles carry a repeated border, so averaging across a tile edge
//! only blends that tile's own pixels for the first few levels.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Number of levels `build_pyramid` produces for a `width` x `height` image
pub fn level_count(width: u32, height: u32, min_size: u32) -> usize {
    let floor = min_size.max(1);
    let (mut w, mut h) = (width, height);
    let mut levels = 1;
    while w / 2 >= floor && h / 2 >= floor {
        w /= 2;
        h /= 2;
        levels += 1;
    }
    levels
}

/// Build the full mip chain. Pure: the same atlas always yields the same chain.
pub fn build_pyramid(atlas: &RgbaImage, min_size: u32) -> Vec<RgbaImage> {
    let count = level_count(atlas.width(), atlas.height(), min_size);
    let mut levels = Vec::with_capacity(count);
    levels.push(atlas.clone());

    for level in 1..count {
        let prev = &levels[level - 1];
        let next = imageops::resize(prev, prev.width() / 2, prev.height() / 2, FilterType::Triangle);
        levels.push(next);
    }

    log::debug!(
        "[mip_pyramid::build_pyramid] Built {} levels from {}x{}",
        levels.len(),
        atlas.width(),
        atlas.height()
    );
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_chain_halves_down_to_one_pixel() {
        let atlas = RgbaImage::from_pixel(256, 256, Rgba([10, 20, 30, 255]));
        let levels = build_pyramid(&atlas, 1);

        // 256, 128, 64, 32, 16, 8, 4, 2, 1
        assert_eq!(levels.len(), 9);
        for pair in levels.windows(2) {
            assert_eq!(pair[1].width(), pair[0].width() / 2);
            assert_eq!(pair[1].height(), pair[0].height() / 2);
        }
        assert_eq!(levels.last().map(|l| l.dimensions()), Some((1, 1)));
    }

    #[test]
    fn test_floor_stops_chain_early() {
        let atlas = RgbaImage::new(256, 256);
        let levels = build_pyramid(&atlas, 16);
        assert_eq!(levels.len(), 5);
        assert_eq!(levels[4].dimensions(), (16, 16));
    }

    #[test]
    fn test_non_square_stops_at_shorter_side() {
        assert_eq!(level_count(64, 4, 1), 3);
        assert_eq!(build_pyramid(&RgbaImage::new(64, 4), 1).len(), 3);
    }

    #[test]
    fn test_level_zero_is_the_atlas() {
        let atlas = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let levels = build_pyramid(&atlas, 1);
        assert_eq!(levels[0], atlas);
    }

    #[test]
    fn test_solid_colour_survives_downsampling() {
        let atlas = RgbaImage::from_pixel(32, 32, Rgba([200, 100, 50, 255]));
        for level in build_pyramid(&atlas, 1) {
            assert!(level.pixels().all(|p| *p == Rgba([200, 100, 50, 255])));
        }
    }

    #[test]
    fn test_pyramid_is_pure() {
        let atlas = RgbaImage::from_fn(64, 64, |x, y| Rgba([(x * 3) as u8, (y * 5) as u8, 9, 255]));
        assert_eq!(build_pyramid(&atlas, 1), build_pyramid(&atlas, 1));
    }
}
