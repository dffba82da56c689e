// Actors: the player and the enemies
//
// - Tuning constants per actor kind
// - State machine shared by every actor
// - Attack timing and combos
// - Keyed animation clips

pub mod animation;
pub mod combat;
pub mod enemy;
pub mod player;
pub mod state;
pub mod stats;

pub use animation::{AnimationSet, Clip, FacingOffsets};
pub use combat::{AttackTier, AttackTimers};
pub use enemy::Enemy;
pub use player::Player;
pub use state::{ActorState, ActorStateMachine};
pub use stats::ActorStats;
