// Smoothed follow camera bounded to the level

use glam::Vec2;
use log::warn;

use crate::core::Rect;

/// Exponential smoothing factor applied per update
pub const SMOOTHING: f32 = 0.05;

/// Upper bound on `readjust` iterations
const MAX_READJUST_STEPS: usize = 10_000;

/// 2D follow camera.
///
/// `offset` is added to level coordinates to get screen coordinates, so it is
/// always in `[-(level - screen), 0]` per axis (or exactly 0 on an axis where
/// the level is smaller than the screen).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub smoothing: f32,
    level_size: Vec2,
    screen_size: Vec2,
}

impl Camera {
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            smoothing: SMOOTHING,
            level_size: screen_size,
            screen_size,
        }
    }

    /// Set the level extents. The current offset is re-clamped.
    pub fn set_level_size(&mut self, level_size: Vec2) {
        self.level_size = level_size;
        self.offset = self.clamped(self.offset);
    }

    pub fn level_size(&self) -> Vec2 {
        self.level_size
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// Offset that would put `center` in the middle of the screen
    pub fn target_for(&self, center: Vec2) -> Vec2 {
        self.screen_size / 2.0 - center
    }

    /// One smoothing step toward `center`, then clamp to the level
    pub fn update(&mut self, center: Vec2) {
        let target = self.target_for(center);
        let next = self.offset + (target - self.offset) * self.smoothing;
        self.offset = self.clamped(next);
    }

    /// Step repeatedly until the offset stops changing.
    ///
    /// Used on level entry so the view does not pan in from wherever it was.
    /// Returns the number of steps taken.
    pub fn readjust(&mut self, center: Vec2) -> usize {
        for step in 1..=MAX_READJUST_STEPS {
            let before = self.offset;
            self.update(center);
            if self.offset == before {
                return step;
            }
        }
        warn!(
            "Camera did not settle after {} steps, snapping to target",
            MAX_READJUST_STEPS
        );
        self.offset = self.clamped(self.target_for(center));
        MAX_READJUST_STEPS
    }

    fn clamped(&self, offset: Vec2) -> Vec2 {
        let min = -(self.level_size - self.screen_size).max(Vec2::ZERO);
        Vec2::new(
            offset.x.clamp(min.x, 0.0),
            offset.y.clamp(min.y, 0.0),
        )
    }

    /// Level-space rectangle currently on screen
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            -self.offset.x as i32,
            -self.offset.y as i32,
            self.screen_size.x as i32,
            self.screen_size.y as i32,
        )
    }

    /// Translate a level-space rectangle to screen space
    pub fn to_screen(&self, rect: Rect) -> Rect {
        rect.offset_by(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCREEN: Vec2 = Vec2::new(854.0, 480.0);

    #[test]
    fn test_single_step_smoothing() {
        let mut camera = Camera::new(SCREEN);
        camera.set_level_size(Vec2::new(4000.0, 2000.0));
        camera.update(Vec2::new(1427.0, 240.0));

        // target x = 427 - 1427 = -1000
        assert_relative_eq!(camera.offset.x, -50.0);
        assert_relative_eq!(camera.offset.y, 0.0);
    }

    #[test]
    fn test_offset_stays_in_bounds() {
        let mut camera = Camera::new(SCREEN);
        camera.set_level_size(Vec2::new(1000.0, 600.0));

        for center in [
            Vec2::new(-500.0, -500.0),
            Vec2::new(5000.0, 5000.0),
            Vec2::new(500.0, 300.0),
        ] {
            for _ in 0..500 {
                camera.update(center);
                assert!(camera.offset.x <= 0.0 && camera.offset.x >= -146.0);
                assert!(camera.offset.y <= 0.0 && camera.offset.y >= -120.0);
            }
        }
    }

    #[test]
    fn test_level_smaller_than_screen_pins_to_zero() {
        let mut camera = Camera::new(SCREEN);
        camera.set_level_size(Vec2::new(320.0, 240.0));
        camera.readjust(Vec2::new(300.0, 200.0));
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_readjust_converges() {
        let levels = [
            Vec2::new(854.0, 480.0),
            Vec2::new(3200.0, 1024.0),
            Vec2::new(10_000.0, 10_000.0),
            Vec2::new(100.0, 5000.0),
        ];
        for level in levels {
            let mut camera = Camera::new(SCREEN);
            camera.set_level_size(level);
            let steps = camera.readjust(level * 0.7);
            assert!(steps < MAX_READJUST_STEPS, "level {level:?}");

            let settled = camera.offset;
            camera.update(level * 0.7);
            assert_eq!(camera.offset, settled);
        }
    }

    #[test]
    fn test_readjust_reaches_clamped_target() {
        let mut camera = Camera::new(SCREEN);
        camera.set_level_size(Vec2::new(3200.0, 1024.0));
        camera.readjust(Vec2::new(3100.0, 1000.0));
        assert_relative_eq!(camera.offset.x, -(3200.0 - 854.0));
        assert_relative_eq!(camera.offset.y, -(1024.0 - 480.0));
    }

    #[test]
    fn test_visible_rect_and_to_screen() {
        let mut camera = Camera::new(SCREEN);
        camera.set_level_size(Vec2::new(3200.0, 1024.0));
        camera.offset = Vec2::new(-100.0, -20.0);

        assert_eq!(camera.visible_rect(), Rect::new(100, 20, 854, 480));
        assert_eq!(
            camera.to_screen(Rect::new(150, 60, 32, 32)),
            Rect::new(50, 40, 32, 32)
        );
    }
}
