// Colour table lookup and grid decoding

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;
use log::debug;

use crate::engine::assets::{load_rgba, AssetError};

/// An exact RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

/// A rule matching colours by channel pattern rather than exact value
pub type ChannelRule<T> = fn(Rgba) -> Option<T>;

/// Maps exact colours to cell values.
///
/// Exact entries are tried first, then channel rules in insertion order.
#[derive(Debug, Clone)]
pub struct ColorTable<T> {
    exact: HashMap<Rgba, T>,
    rules: Vec<ChannelRule<T>>,
}

impl<T: Clone> ColorTable<T> {
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            rules: Vec::new(),
        }
    }

    /// Add an exact colour entry
    pub fn with(mut self, color: Rgba, value: T) -> Self {
        self.exact.insert(color, value);
        self
    }

    /// Add a channel-pattern rule
    pub fn with_rule(mut self, rule: ChannelRule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn lookup(&self, color: Rgba) -> Option<T> {
        if let Some(value) = self.exact.get(&color) {
            return Some(value.clone());
        }
        self.rules.iter().find_map(|rule| rule(color))
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.rules.is_empty()
    }
}

impl<T: Clone> Default for ColorTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable grid of decoded cells
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid<T> {
    width: u32,
    height: u32,
    cells: Vec<Option<T>>,
}

impl<T> TileGrid<T> {
    /// Width in cells
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, col: u32, row: u32) -> Option<&T> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[(row * self.width + col) as usize].as_ref()
    }

    /// Occupied cells as `(col, row, value)`, row-major
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let i = i as u32;
            cell.as_ref().map(|value| (i % width, i / width, value))
        })
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Decode an image into a grid, one cell per pixel.
///
/// Pixels are scanned row-major and matched exactly; unmatched colours leave
/// the cell empty.
pub fn decode<T: Clone>(image: &RgbaImage, table: &ColorTable<T>) -> TileGrid<T> {
    let (width, height) = image.dimensions();
    let mut cells = Vec::with_capacity((width * height) as usize);

    for row in 0..height {
        for col in 0..width {
            let pixel = Rgba(image.get_pixel(col, row).0);
            cells.push(table.lookup(pixel));
        }
    }

    let grid = TileGrid {
        width,
        height,
        cells,
    };
    debug!(
        "Decoded {}x{} grid with {} occupied cells",
        width,
        height,
        grid.occupied()
    );
    grid
}

/// Open an image file and decode it
pub fn decode_path<T: Clone>(path: &Path, table: &ColorTable<T>) -> Result<TileGrid<T>, AssetError> {
    let image = load_rgba(path)?;
    Ok(decode(&image, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba as Px;

    #[derive(Debug, Clone, PartialEq)]
    enum Cell {
        Wall,
        Coin,
        Marker(u8, u8),
    }

    fn table() -> ColorTable<Cell> {
        ColorTable::new()
            .with(Rgba::rgb(0, 0, 0), Cell::Wall)
            .with(Rgba::rgb(255, 216, 0), Cell::Coin)
            .with_rule(|c| (c.g() == 248).then(|| Cell::Marker(c.r(), c.b())))
    }

    #[test]
    fn test_exact_match_and_skip() {
        let mut image = RgbaImage::new(3, 1);
        image.put_pixel(0, 0, Px([0, 0, 0, 255]));
        image.put_pixel(1, 0, Px([255, 216, 0, 255]));
        image.put_pixel(2, 0, Px([1, 2, 3, 255]));

        let grid = decode(&image, &table());
        assert_eq!(grid.get(0, 0), Some(&Cell::Wall));
        assert_eq!(grid.get(1, 0), Some(&Cell::Coin));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.occupied(), 2);
    }

    #[test]
    fn test_no_tolerance() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Px([1, 0, 0, 255]));
        image.put_pixel(1, 0, Px([0, 0, 0, 254]));

        let grid = decode(&image, &table());
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_channel_rule() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Px([7, 248, 9, 255]));

        let grid = decode(&image, &table());
        assert_eq!(grid.get(0, 0), Some(&Cell::Marker(7, 9)));
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(1, 0, Px([0, 0, 0, 255]));
        image.put_pixel(0, 1, Px([0, 0, 0, 255]));

        let grid = decode(&image, &table());
        let cells: Vec<_> = grid.iter().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(cells, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_out_of_bounds_get() {
        let grid = decode(&RgbaImage::new(2, 2), &table());
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 5), None);
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode_path(Path::new("/no/such/level.png"), &table()).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
