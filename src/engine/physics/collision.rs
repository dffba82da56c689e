// Axis-separated rectangle collision

use crate::core::Rect;

/// The axis a resolution pass runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Outcome of resolving one axis of movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// The moving rectangle after snapping out of every obstacle
    pub rect: Rect,
    /// Velocity along the resolved axis after contact
    pub velocity: f32,
    /// At least one obstacle overlapped
    pub touched: bool,
    /// A downward move landed on top of an obstacle
    pub grounded: bool,
}

/// Push `moving` out of every obstacle it overlaps along `axis`.
///
/// The rectangle is expected to have already been advanced by `velocity`
/// along `axis`. Overlaps are detected against that advanced rectangle, then
/// each overlapping obstacle snaps the matching edge in iteration order, so
/// when several obstacles overlap at once the last one wins.
///
/// Call once for X, apply the result, then once for Y. Resolving both axes
/// from the same starting rectangle gets corners wrong.
///
/// Landing (`Y`, moving down) sets `grounded` and zeroes the velocity, as
/// does bumping a ceiling. Horizontal contact leaves the velocity alone.
/// Empty obstacles never overlap anything.
pub fn resolve<I>(moving: Rect, velocity: f32, axis: Axis, obstacles: I) -> CollisionResult
where
    I: IntoIterator<Item = Rect>,
{
    let mut result = CollisionResult {
        rect: moving,
        velocity,
        touched: false,
        grounded: false,
    };

    for obstacle in obstacles {
        if !moving.intersects(&obstacle) {
            continue;
        }
        result.touched = true;

        match axis {
            Axis::X => {
                if velocity > 0.0 {
                    result.rect.set_right(obstacle.left());
                } else if velocity < 0.0 {
                    result.rect.set_left(obstacle.right());
                }
            }
            Axis::Y => {
                if velocity > 0.0 {
                    result.rect.set_bottom(obstacle.top());
                    result.grounded = true;
                    result.velocity = 0.0;
                } else if velocity < 0.0 {
                    result.rect.set_top(obstacle.bottom());
                    result.velocity = 0.0;
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: Rect = Rect::new(0, 100, 320, 32);

    #[test]
    fn test_landing_from_above() {
        for vy in 1..=FLOOR.height {
            // Resting on the floor, then pulled vy pixels into it
            let body = Rect::new(50, 40, 32, 60).translate(0, vy);
            let result = resolve(body, vy as f32, Axis::Y, [FLOOR]);

            assert!(result.grounded, "vy {vy}");
            assert_eq!(result.velocity, 0.0);
            assert_eq!(result.rect.bottom(), FLOOR.top());
        }
    }

    #[test]
    fn test_ceiling_bump() {
        let ceiling = Rect::new(0, 0, 320, 32);
        let body = Rect::new(50, 20, 32, 60);
        let result = resolve(body, -8.0, Axis::Y, [ceiling]);

        assert!(!result.grounded);
        assert!(result.touched);
        assert_eq!(result.velocity, 0.0);
        assert_eq!(result.rect.top(), 32);
    }

    #[test]
    fn test_wall_from_left_and_right() {
        let wall = Rect::new(100, 0, 32, 200);

        let moving_right = resolve(Rect::new(75, 50, 32, 60), 5.0, Axis::X, [wall]);
        assert_eq!(moving_right.rect.right(), 100);
        assert_eq!(moving_right.velocity, 5.0);

        let moving_left = resolve(Rect::new(125, 50, 32, 60), -5.0, Axis::X, [wall]);
        assert_eq!(moving_left.rect.left(), 132);
    }

    #[test]
    fn test_no_overlap_is_untouched() {
        let body = Rect::new(0, 0, 32, 32);
        let result = resolve(body, 3.0, Axis::Y, [FLOOR]);
        assert!(!result.touched);
        assert!(!result.grounded);
        assert_eq!(result.rect, body);
        assert_eq!(result.velocity, 3.0);
    }

    #[test]
    fn test_zero_size_obstacle_is_noop() {
        let body = Rect::new(0, 90, 32, 32);
        let result = resolve(body, 4.0, Axis::Y, [Rect::new(10, 100, 0, 0)]);
        assert!(!result.touched);
        assert_eq!(result.rect, body);
    }

    #[test]
    fn test_last_overlap_wins() {
        let low = Rect::new(0, 110, 64, 32);
        let high = Rect::new(0, 100, 64, 32);
        let body = Rect::new(0, 60, 32, 60);

        let result = resolve(body, 10.0, Axis::Y, [high, low]);
        assert_eq!(result.rect.bottom(), 110);

        let result = resolve(body, 10.0, Axis::Y, [low, high]);
        assert_eq!(result.rect.bottom(), 100);
    }
}
