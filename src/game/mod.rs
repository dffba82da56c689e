// Game rules on top of the engine
//
// Entities never call into the session directly. They report what should
// happen through `Effects` and the session applies it after each pass.

pub mod actors;
pub mod cutscene;
pub mod door;
pub mod effects;
pub mod entity;
pub mod gate;
pub mod items;
pub mod level;
pub mod motion;
pub mod palette;
pub mod particle;
pub mod session;
pub mod sounds;
pub mod sprites;

pub use level::Level;
pub use session::{GameEvent, Session, SessionSnapshot};
