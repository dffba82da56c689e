// Pixel-indexed tile maps
//
// A level is authored as a small image where each pixel is one tile cell.
// Pixels are matched exactly against a colour table; anything unmatched is
// empty space.

mod grid;
mod layer;

pub use grid::{decode, decode_path, ColorTable, Rgba, TileGrid};
pub use layer::{Blit, StaticLayer};
