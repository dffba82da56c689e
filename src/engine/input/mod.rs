// Input handling
//
// - `action`: game actions and default key bindings
// - `manager`: collects winit events and hands out one `InputFrame` per tick
//
// ```rust
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per tick
// let frame = input.take_frame();
// if frame.is_held(Action::MoveLeft) { /* ... */ }
// ```

pub mod action;
pub mod manager;

pub use action::{Action, InputSource};
pub use manager::{InputFrame, InputManager, MouseState};
