// Axis-aligned pixel rectangles

use glam::Vec2;

/// Axis-aligned rectangle in integer pixel units.
///
/// `x`/`y` are the top-left corner; the y axis grows downward like the level
/// images it is decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose center sits at `center`
    pub fn from_center(center: (i32, i32), width: i32, height: i32) -> Self {
        Self::new(center.0 - width / 2, center.1 - height / 2, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn set_center(&mut self, center: (i32, i32)) {
        self.x = center.0 - self.width / 2;
        self.y = center.1 - self.height / 2;
    }

    pub fn center_vec(&self) -> Vec2 {
        let (x, y) = self.center();
        Vec2::new(x as f32, y as f32)
    }

    /// A rectangle with no area never collides with anything
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Strict overlap test; rectangles that merely share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow (or shrink, with negative amounts) around the center
    pub fn inflate(&self, dw: i32, dh: i32) -> Self {
        Self::new(
            self.x - dw / 2,
            self.y - dh / 2,
            self.width + dw,
            self.height + dh,
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Translate by a float offset, truncating toward zero
    pub fn offset_by(&self, offset: Vec2) -> Self {
        self.translate(offset.x as i32, offset.y as i32)
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}
