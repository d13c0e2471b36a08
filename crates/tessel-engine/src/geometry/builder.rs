use crate::map::{TileGrid, tile_uv_rect};

use super::TileVertex;

/// Local index pattern covering one quad with two triangles.
///
/// Refers to the quad's corner vertices in emission order: 0 = top-left,
/// 1 = top-right, 2 = bottom-left, 3 = bottom-right.
pub const QUAD_INDEX_PATTERN: [u32; 6] = [0, 1, 2, 1, 2, 3];

/// Vertex and index data for a whole grid, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMesh {
    pub vertices: Vec<TileVertex>,
    pub indices: Vec<u32>,
}

/// The four corner vertices of the tile at `(x, y)`.
///
/// Grid corner and atlas corner are paired top-left/top-right/bottom-left/
/// bottom-right; texture orientation depends on this correspondence.
#[inline]
fn quad_corners(x: u32, y: u32, id: u8) -> [TileVertex; 4] {
    let (x0, y0) = (x as f32, y as f32);
    let (x1, y1) = (x0 + 1.0, y0 + 1.0);
    let t = tile_uv_rect(id);
    [
        TileVertex { pos: [x0, y0], uv: [t.u0, t.v0] },
        TileVertex { pos: [x1, y0], uv: [t.u1, t.v0] },
        TileVertex { pos: [x0, y1], uv: [t.u0, t.v1] },
        TileVertex { pos: [x1, y1], uv: [t.u1, t.v1] },
    ]
}

/// Expands the grid into 4 vertices and 6 indices per tile.
///
/// Tiles are visited x-outer/y-inner; the per-tile index base advances by
/// exactly 4 per tile in the same traversal, keeping vertex emission and
/// index generation in lockstep.
pub fn build_mesh(grid: &TileGrid) -> TileMesh {
    let tile_count = grid.tile_count();
    let mut vertices = Vec::with_capacity(4 * tile_count);
    let mut indices = Vec::with_capacity(6 * tile_count);

    let mut base = 0u32;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            vertices.extend_from_slice(&quad_corners(x, y, grid.get(x, y)));
            indices.extend(QUAD_INDEX_PATTERN.iter().map(|&i| base + i));
            base += 4;
        }
    }

    TileMesh { vertices, indices }
}

/// Expands the grid into 6 unindexed vertices per tile (two triangles),
/// covering the same quads as [`build_mesh`] in the same traversal order.
///
/// This is the immediate strategy's per-frame emission path.
pub fn build_unindexed(grid: &TileGrid) -> Vec<TileVertex> {
    let mut vertices = Vec::with_capacity(6 * grid.tile_count());

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let corners = quad_corners(x, y, grid.get(x, y));
            vertices.extend(QUAD_INDEX_PATTERN.iter().map(|&i| corners[i as usize]));
        }
    }

    vertices
}

/// Packs the grid's cells, in storage order, 4 tile ids per little-endian
/// `u32` word for upload as a storage buffer (1 byte per tile).
///
/// The expansion shader recovers tile `i` as
/// `(word[i / 4] >> ((i % 4) * 8)) & 0xff` and derives the cell from `i` and
/// the grid width.
pub fn pack_tile_ids(grid: &TileGrid) -> Vec<u32> {
    grid.cells()
        .chunks(4)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u32, |word, (i, &id)| word | (id as u32) << (i * 8))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{CELL_UV, PAD_UV};

    fn grid(w: u32, h: u32) -> TileGrid {
        TileGrid::new(w, h).unwrap()
    }

    // ── cardinality ───────────────────────────────────────────────────────

    #[test]
    fn mesh_has_four_vertices_and_six_indices_per_tile() {
        let mesh = build_mesh(&grid(7, 5));
        assert_eq!(mesh.vertices.len(), 4 * 35);
        assert_eq!(mesh.indices.len(), 6 * 35);
    }

    #[test]
    fn every_index_is_in_range() {
        let mesh = build_mesh(&grid(6, 4));
        let len = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < len));
    }

    #[test]
    fn triangles_never_cross_tile_quads() {
        let mesh = build_mesh(&grid(5, 3));
        for tri in mesh.indices.chunks(3) {
            let quad = tri[0] / 4;
            assert!(tri.iter().all(|&i| i / 4 == quad), "triangle {tri:?}");
        }
    }

    #[test]
    fn index_bases_advance_by_four_in_pattern_order() {
        let mesh = build_mesh(&grid(3, 3));
        for (tile, chunk) in mesh.indices.chunks(6).enumerate() {
            let base = 4 * tile as u32;
            let expected: Vec<u32> = QUAD_INDEX_PATTERN.iter().map(|&i| base + i).collect();
            assert_eq!(chunk, expected.as_slice());
        }
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn build_is_idempotent() {
        let mut g = grid(8, 8);
        g.cells_mut()
            .iter_mut()
            .enumerate()
            .for_each(|(i, c)| *c = (i % 256) as u8);
        assert_eq!(build_mesh(&g), build_mesh(&g));
    }

    // ── geometry & texcoords ──────────────────────────────────────────────

    #[test]
    fn four_by_four_grid_end_to_end() {
        let mesh = build_mesh(&grid(4, 4));
        assert_eq!(mesh.vertices.len(), 64);
        assert_eq!(mesh.indices.len(), 96);

        // First tile: quad (0,0)-(1,1), atlas rect inset by the padding.
        let v = &mesh.vertices[..4];
        assert_eq!(v[0].pos, [0.0, 0.0]);
        assert_eq!(v[1].pos, [1.0, 0.0]);
        assert_eq!(v[2].pos, [0.0, 1.0]);
        assert_eq!(v[3].pos, [1.0, 1.0]);
        assert_eq!(v[0].uv, [1.0 / 256.0, 1.0 / 256.0]);
        assert_eq!(v[3].uv, [1.0 / 16.0 - 1.0 / 256.0, 1.0 / 16.0 - 1.0 / 256.0]);
    }

    #[test]
    fn corner_correspondence_is_preserved() {
        let mut g = grid(2, 2);
        g.set(1, 0, 0x35); // column 5, row 3
        let mesh = build_mesh(&g);

        // x-outer/y-inner traversal: tile (1,0) is the third quad.
        let v = &mesh.vertices[8..12];
        assert_eq!(v[0].pos, [1.0, 0.0]);
        let u0 = 5.0 * CELL_UV + PAD_UV;
        let v0 = 3.0 * CELL_UV + PAD_UV;
        assert_eq!(v[0].uv, [u0, v0]);
        assert_eq!(v[1].uv[1], v0); // top edge shares v
        assert_eq!(v[2].uv[0], u0); // left edge shares u
    }

    #[test]
    fn unindexed_expansion_matches_the_mesh() {
        let mut g = grid(3, 2);
        g.cells_mut().copy_from_slice(&[1, 2, 3, 4, 5, 6]);

        let mesh = build_mesh(&g);
        let flat = build_unindexed(&g);
        assert_eq!(flat.len(), 6 * g.tile_count());

        let resolved: Vec<TileVertex> = mesh
            .indices
            .iter()
            .map(|&i| mesh.vertices[i as usize])
            .collect();
        assert_eq!(flat, resolved);
    }

    // ── id packing ────────────────────────────────────────────────────────

    #[test]
    fn pack_tile_ids_is_little_endian_storage_order() {
        let g = TileGrid::from_cells(3, 2, vec![0x01, 0x02, 0x03, 0x04, 0x05, 0xff]).unwrap();
        assert_eq!(pack_tile_ids(&g), vec![0x04030201, 0x0000ff05]);
    }

    #[test]
    fn pack_tile_ids_word_count_rounds_up() {
        assert_eq!(pack_tile_ids(&grid(3, 3)).len(), 3); // 9 cells -> 3 words
        assert_eq!(pack_tile_ids(&grid(4, 2)).len(), 2);
    }
}
