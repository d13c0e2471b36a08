use std::path::Path;

use anyhow::{Context, Result};

use tessel_engine::render::AtlasImage;

/// Decodes a tile-set atlas PNG into raw RGBA8 pixels.
pub fn load_png(path: &Path) -> Result<AtlasImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to load atlas image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    AtlasImage::new(width, height, img.into_raw())
}

/// Builds a 256×256 stand-in atlas: a 16×16 grid of flat-colored cells with
/// a darker border, so every tile id is visually distinct without shipping
/// an image file.
pub fn generate_fallback() -> AtlasImage {
    const SIZE: u32 = 256;
    const CELL: u32 = 16;

    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let id = (y / CELL) * 16 + (x / CELL);
            let (mut r, mut g, mut b) = cell_color(id as u8);
            if x % CELL == 0 || y % CELL == 0 || x % CELL == CELL - 1 || y % CELL == CELL - 1 {
                r /= 2;
                g /= 2;
                b /= 2;
            }
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }

    AtlasImage {
        width: SIZE,
        height: SIZE,
        pixels,
    }
}

/// Deterministic, reasonably scattered color per tile id.
fn cell_color(id: u8) -> (u8, u8, u8) {
    (
        id.wrapping_mul(97).wrapping_add(64),
        id.wrapping_mul(57).wrapping_add(96),
        id.wrapping_mul(193).wrapping_add(48),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_atlas_is_256_square_rgba() {
        let atlas = generate_fallback();
        assert_eq!(atlas.width, 256);
        assert_eq!(atlas.height, 256);
        assert_eq!(atlas.pixels.len(), 256 * 256 * 4);
    }

    #[test]
    fn fallback_atlas_is_opaque() {
        let atlas = generate_fallback();
        assert!(atlas.pixels.chunks(4).all(|px| px[3] == 255));
    }
}
