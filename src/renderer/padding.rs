//! Tile border padding
//!
//! Tiles are surrounded by copies of their own edge pixels before packing so
//! that bilinear filtering and mip averaging at a tile's edge only ever read
//! that tile's colours.

use image::RgbaImage;

/// Transform that grows an image by a border on every side
pub trait PaddingTransform {
    fn repeat_border(&self, image: &RgbaImage, pad_x: u32, pad_y: u32) -> RgbaImage;
}

/// Replicates the nearest edge pixel into the border (clamp-to-edge)
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeRepeat;

impl PaddingTransform for EdgeRepeat {
    fn repeat_border(&self, image: &RgbaImage, pad_x: u32, pad_y: u32) -> RgbaImage {
        let (w, h) = image.dimensions();
        let out_w = w + pad_x * 2;
        let out_h = h + pad_y * 2;
        if w == 0 || h == 0 {
            return RgbaImage::new(out_w, out_h);
        }

        RgbaImage::from_fn(out_w, out_h, |x, y| {
            let sx = x.saturating_sub(pad_x).min(w - 1);
            let sy = y.saturating_sub(pad_y).min(h - 1);
            *image.get_pixel(sx, sy)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn quadrant_tile() -> RgbaImage {
        // 2x2, one colour per pixel
        RgbaImage::from_fn(2, 2, |x, y| Rgba([x as u8 * 100, y as u8 * 100, 7, 255]))
    }

    #[test]
    fn test_border_grows_image() {
        let padded = EdgeRepeat.repeat_border(&quadrant_tile(), 3, 1);
        assert_eq!(padded.dimensions(), (8, 4));
    }

    #[test]
    fn test_interior_is_unchanged() {
        let tile = quadrant_tile();
        let padded = EdgeRepeat.repeat_border(&tile, 2, 2);
        for (x, y, px) in tile.enumerate_pixels() {
            assert_eq!(padded.get_pixel(x + 2, y + 2), px);
        }
    }

    #[test]
    fn test_border_copies_nearest_edge() {
        let tile = quadrant_tile();
        let padded = EdgeRepeat.repeat_border(&tile, 2, 2);
        // corners take the corner pixel
        assert_eq!(padded.get_pixel(0, 0), tile.get_pixel(0, 0));
        assert_eq!(padded.get_pixel(5, 5), tile.get_pixel(1, 1));
        assert_eq!(padded.get_pixel(5, 0), tile.get_pixel(1, 0));
        // edges take the adjacent edge pixel
        assert_eq!(padded.get_pixel(0, 3), tile.get_pixel(0, 1));
        assert_eq!(padded.get_pixel(2, 5), tile.get_pixel(0, 1));
    }

    #[test]
    fn test_zero_padding_is_identity() {
        let tile = quadrant_tile();
        assert_eq!(EdgeRepeat.repeat_border(&tile, 0, 0), tile);
    }
}
