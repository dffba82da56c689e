// Per-tick velocity integration and collision stepping

use glam::Vec2;

use crate::core::Rect;
use crate::engine::physics::{resolve, Axis, Body};

/// Added to the velocity of every airborne body each tick
pub const GRAVITY: Vec2 = Vec2::new(0.0, 1.0);

/// What happened during one movement step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// The body came down onto an obstacle this tick
    pub landed: bool,
    /// Downward speed at the moment of landing
    pub impact: f32,
    /// Horizontal movement ran into something
    pub touched_x: bool,
}

/// Accelerate `body` downward unless it is standing on something
pub fn apply_gravity(body: &mut Body) {
    if !body.on_ground {
        body.vel += GRAVITY;
    }
}

/// Move `body` by its velocity, one axis at a time.
///
/// The horizontal move is resolved against each obstacle set in turn, then
/// the vertical move against `y_obstacles`. The body is assumed airborne
/// until the vertical pass lands it.
pub fn move_and_collide(body: &mut Body, x_sets: &[&[Rect]], y_obstacles: &[Rect]) -> StepReport {
    let mut report = StepReport::default();

    let vx = body.vel.x;
    body.rect.x += vx as i32;
    for obstacles in x_sets {
        let result = resolve(body.rect, vx, Axis::X, obstacles.iter().copied());
        body.rect = result.rect;
        report.touched_x |= result.touched;
    }

    body.on_ground = false;

    let vy = body.vel.y;
    body.rect.y += vy as i32;
    let result = resolve(body.rect, vy, Axis::Y, y_obstacles.iter().copied());
    body.rect = result.rect;
    body.vel.y = result.velocity;

    if result.grounded {
        body.on_ground = true;
        report.landed = true;
        report.impact = vy;
    }

    report
}
