use thiserror::Error;

/// Errors raised while constructing a [`TileGrid`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("cell count mismatch: {width}x{height} needs {expected} cells, got {actual}")]
    CellCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A 2D grid of tile-type ids, row-major with stride `width`.
///
/// The id is 8-bit by construction, which caps the distinct tile types at
/// 256 — exactly the capacity of the 16×16 atlas.
///
/// Cell access is on the geometry hot path and is therefore not
/// range-checked per call beyond debug assertions; callers keep `x`/`y`
/// inside the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl TileGrid {
    /// Creates a grid filled with tile id 0.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            // usize math: u32 × u32 overflows for large grids.
            cells: vec![0; width as usize * height as usize],
        })
    }

    /// Creates a grid from existing row-major cells.
    pub fn from_cells(width: u32, height: u32, cells: Vec<u8>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                width,
                height,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of tiles in the grid.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells in row-major storage order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.cells[x as usize + y as usize * self.width as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, id: u8) {
        debug_assert!(x < self.width && y < self.height);
        self.cells[x as usize + y as usize * self.width as usize] = id;
    }

    /// Mutable access to the raw cells, for bulk population.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_with_zero() {
        let grid = TileGrid::new(3, 2).unwrap();
        assert_eq!(grid.tile_count(), 6);
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn zero_width_is_rejected() {
        assert_eq!(
            TileGrid::new(0, 4),
            Err(GridError::InvalidDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(TileGrid::new(4, 0).is_err());
        assert!(TileGrid::from_cells(4, 0, vec![]).is_err());
    }

    #[test]
    fn from_cells_checks_length() {
        assert_eq!(
            TileGrid::from_cells(2, 2, vec![1, 2, 3]),
            Err(GridError::CellCountMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn huge_dimensions_do_not_overflow_the_cell_count() {
        // 65536 × 65536 wraps to 0 in u32; the count must be computed wide.
        assert_eq!(
            TileGrid::from_cells(65536, 65536, vec![]),
            Err(GridError::CellCountMismatch {
                width: 65536,
                height: 65536,
                expected: 1 << 32,
                actual: 0,
            })
        );
    }

    #[test]
    fn indexing_is_row_major() {
        let mut grid = TileGrid::new(4, 3).unwrap();
        grid.set(1, 2, 99);
        assert_eq!(grid.get(1, 2), 99);
        assert_eq!(grid.cells()[1 + 2 * 4], 99);
    }
}
