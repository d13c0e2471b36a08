/// Normalized width/height of one atlas cell. The atlas is a fixed 16×16
/// grid of equal-size sub-images, one per tile type.
pub const CELL_UV: f32 = 1.0 / 16.0;

/// Inset applied to every cell edge so bilinear filtering never samples a
/// neighboring cell.
pub const PAD_UV: f32 = 1.0 / 256.0;

/// A tile's sub-rectangle in atlas-normalized texture space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AtlasRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Maps a tile id to its padded atlas rectangle.
///
/// The low nibble selects the column, the high nibble the row. Infallible:
/// every `u8` lands in a valid cell. The expansion shader duplicates this
/// formula on the GPU; keep the two in sync.
#[inline]
pub fn tile_uv_rect(id: u8) -> AtlasRect {
    let col = (id & 15) as f32;
    let row = (id >> 4) as f32;
    let u0 = col * CELL_UV + PAD_UV;
    let v0 = row * CELL_UV + PAD_UV;
    let extent = CELL_UV - 2.0 * PAD_UV;
    AtlasRect {
        u0,
        v0,
        u1: u0 + extent,
        v1: v0 + extent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_zero_maps_to_first_cell() {
        let r = tile_uv_rect(0);
        assert_eq!(r.u0, PAD_UV);
        assert_eq!(r.v0, PAD_UV);
        assert_eq!(r.u1, CELL_UV - PAD_UV);
        assert_eq!(r.v1, CELL_UV - PAD_UV);
    }

    #[test]
    fn nibbles_select_column_and_row() {
        // id 0x21 -> column 1, row 2.
        let r = tile_uv_rect(0x21);
        assert_eq!(r.u0, CELL_UV + PAD_UV);
        assert_eq!(r.v0, 2.0 * CELL_UV + PAD_UV);
    }

    #[test]
    fn every_id_yields_a_proper_rect_inside_the_atlas() {
        let extent = CELL_UV - 2.0 * PAD_UV;
        for id in 0..=255u8 {
            let r = tile_uv_rect(id);
            assert!(r.u0 < r.u1 && r.v0 < r.v1, "id {id}");
            assert!(r.u0 >= 0.0 && r.v0 >= 0.0, "id {id}");
            assert!(r.u1 <= 1.0 && r.v1 <= 1.0, "id {id}");
            assert_eq!(r.u1 - r.u0, extent, "id {id}");
            assert_eq!(r.v1 - r.v0, extent, "id {id}");
        }
    }
}
