// Sprite-sheet grid slicing

use crate::core::Rect;
use crate::engine::assets::TextureHandle;

use super::ConfigError;

/// A sheet divided into a uniform `rows` x `cols` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetLayout {
    pub rows: u32,
    pub cols: u32,
}

impl SheetLayout {
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of cells in the grid
    pub fn cell_count(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// Size of one cell for a texture of the given size
    pub fn cell_size(&self, tex_w: u32, tex_h: u32) -> (u32, u32) {
        (tex_w / self.cols, tex_h / self.rows)
    }

    /// Pixel regions of every whole cell, row-major.
    ///
    /// Cells that would hang over the texture edge are skipped, as are all
    /// cells when the texture is smaller than the grid.
    pub fn frame_regions(&self, tex_w: u32, tex_h: u32) -> Vec<Rect> {
        let (cell_w, cell_h) = self.cell_size(tex_w, tex_h);
        if cell_w == 0 || cell_h == 0 {
            return Vec::new();
        }

        let mut regions = Vec::with_capacity(self.cell_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = col * cell_w;
                let y = row * cell_h;
                if x + cell_w > tex_w || y + cell_h > tex_h {
                    continue;
                }
                regions.push(Rect::new(x as i32, y as i32, cell_w as i32, cell_h as i32));
            }
        }
        regions
    }

    /// Pixel region of cell `index` (row-major)
    pub fn region(&self, index: usize, tex_w: u32, tex_h: u32) -> Option<Rect> {
        self.frame_regions(tex_w, tex_h).get(index).copied()
    }
}

/// One frame of a sprite sheet, as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef {
    pub sheet: TextureHandle,
    pub index: u16,
}

impl FrameRef {
    pub fn new(sheet: TextureHandle, index: u16) -> Self {
        Self { sheet, index }
    }

    /// Every frame of a sheet with `count` cells, in order
    pub fn sequence(sheet: TextureHandle, count: usize) -> Vec<Self> {
        (0..count).map(|i| Self::new(sheet, i as u16)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!(
            SheetLayout::new(0, 3),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 3 })
        );
        assert!(SheetLayout::new(4, 0).is_err());
    }

    #[test]
    fn test_vertical_strip() {
        let layout = SheetLayout::new(4, 1).unwrap();
        let regions = layout.frame_regions(64, 256);
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0], Rect::new(0, 0, 64, 64));
        assert_eq!(regions[3], Rect::new(0, 192, 64, 64));
    }

    #[test]
    fn test_row_major_order() {
        let layout = SheetLayout::new(2, 2).unwrap();
        let regions = layout.frame_regions(20, 20);
        assert_eq!(regions[1], Rect::new(10, 0, 10, 10));
        assert_eq!(regions[2], Rect::new(0, 10, 10, 10));
    }

    #[test]
    fn test_texture_smaller_than_grid() {
        let layout = SheetLayout::new(8, 1).unwrap();
        assert!(layout.frame_regions(32, 4).is_empty());
        assert_eq!(layout.region(0, 32, 4), None);
    }

    #[test]
    fn test_frame_sequence() {
        let sheet = TextureHandle::from_path("coin.png");
        let frames = FrameRef::sequence(sheet, 3);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].index, 2);
        assert_eq!(frames[2].sheet, sheet);
    }
}
