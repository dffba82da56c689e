// Static decoration layers

use crate::core::Rect;

use super::TileGrid;

/// One tile blit in level pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blit<T> {
    pub tile: T,
    pub dest: Rect,
}

/// A pre-computed list of tile blits covering a whole level
#[derive(Debug, Clone, PartialEq)]
pub struct StaticLayer<T> {
    pub width: i32,
    pub height: i32,
    pub blits: Vec<Blit<T>>,
}

impl<T: Copy> StaticLayer<T> {
    /// Layer with nothing to draw
    pub fn empty(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blits: Vec::new(),
        }
    }

    /// Place every occupied cell of `grid` at its tile position
    pub fn from_grid(grid: &TileGrid<T>, tile_size: i32) -> Self {
        let blits = grid
            .iter()
            .map(|(col, row, &tile)| Blit {
                tile,
                dest: Rect::new(
                    col as i32 * tile_size,
                    row as i32 * tile_size,
                    tile_size,
                    tile_size,
                ),
            })
            .collect();

        Self {
            width: grid.width() as i32 * tile_size,
            height: grid.height() as i32 * tile_size,
            blits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blits.is_empty()
    }

    /// Blits overlapping `view`, in placement order
    pub fn visible<'a>(&'a self, view: &'a Rect) -> impl Iterator<Item = &'a Blit<T>> + 'a {
        self.blits.iter().filter(move |blit| blit.dest.intersects(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tilemap::{decode, ColorTable, Rgba};
    use image::RgbaImage;

    #[test]
    fn test_layer_from_grid() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 1, image::Rgba([15, 15, 15, 255]));
        let table = ColorTable::new().with(Rgba::rgb(15, 15, 15), 'f');

        let layer = StaticLayer::from_grid(&decode(&image, &table), 32);
        assert_eq!(layer.width, 96);
        assert_eq!(layer.height, 64);
        assert_eq!(layer.blits.len(), 1);
        assert_eq!(layer.blits[0].dest, Rect::new(64, 32, 32, 32));
    }

    #[test]
    fn test_visible_filters_by_view() {
        let layer = StaticLayer {
            width: 128,
            height: 32,
            blits: vec![
                Blit { tile: 0u8, dest: Rect::new(0, 0, 32, 32) },
                Blit { tile: 1u8, dest: Rect::new(96, 0, 32, 32) },
            ],
        };
        let view = Rect::new(0, 0, 64, 32);
        let tiles: Vec<u8> = layer.visible(&view).map(|b| b.tile).collect();
        assert_eq!(tiles, vec![0]);
    }
}
