// Tile-aligned kinematic physics
//
// No solver, no impulses: bodies move one axis at a time and get snapped out
// of whatever they overlap.

pub mod body;
mod collision;

pub use body::{Body, Facing};
pub use collision::{resolve, Axis, CollisionResult};
