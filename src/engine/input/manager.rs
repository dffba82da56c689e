// Input manager - turns window events into per-tick input frames

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

use super::action::{default_bindings, Action, InputSource};

/// Mouse state for UI widgets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseState {
    pub position: Vec2,
    pub left_down: bool,
}

/// Everything the game reads from input in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Actions held down right now
    pub held: HashSet<Action>,
    /// Actions whose key went down since the previous frame
    pub pressed: HashSet<Action>,
    pub mouse: MouseState,
}

impl InputFrame {
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Frame with the given actions held (and freshly pressed)
    pub fn holding(actions: &[Action]) -> Self {
        let held: HashSet<Action> = actions.iter().copied().collect();
        Self {
            pressed: held.clone(),
            held,
            mouse: MouseState::default(),
        }
    }
}

/// Collects window events between ticks
#[derive(Debug)]
pub struct InputManager {
    bindings: HashMap<InputSource, Action>,
    held: HashSet<Action>,
    pressed: HashSet<Action>,
    mouse: MouseState,
}

impl InputManager {
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            held: HashSet::new(),
            pressed: HashSet::new(),
            mouse: MouseState::default(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            match event.state {
                ElementState::Pressed => {
                    // Key repeats are not new presses
                    if !event.repeat {
                        self.press(source);
                    }
                }
                ElementState::Released => self.release(source),
            }
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        let source = InputSource::mouse(button);
        let down = state == ElementState::Pressed;
        if button == MouseButton::Left {
            self.mouse.left_down = down;
        }
        if down {
            self.press(source);
        } else {
            self.release(source);
        }
    }

    /// Process cursor movement, in window pixels
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.mouse.position = Vec2::new(x as f32, y as f32);
    }

    pub fn press(&mut self, source: InputSource) {
        if let Some(&action) = self.bindings.get(&source) {
            if self.held.insert(action) {
                self.pressed.insert(action);
            }
        }
    }

    pub fn release(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.get(&source) {
            self.held.remove(action);
        }
    }

    /// Snapshot for this tick. Press edges are consumed.
    pub fn take_frame(&mut self) -> InputFrame {
        InputFrame {
            held: self.held.clone(),
            pressed: std::mem::take(&mut self.pressed),
            mouse: self.mouse,
        }
    }

    /// Drop all held keys, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
        self.mouse.left_down = false;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
