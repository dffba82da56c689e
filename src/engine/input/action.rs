// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    /// Jump, or walk through a door when standing in front of one
    Up,

    // Interaction
    Attack,
    /// Unlock the selected gate
    Interact,

    // Meta actions
    Pause,
    /// Menu/button clicks
    Click,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD)
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::Up),
        // Interaction
        (InputSource::key(KeyCode::Space), Action::Attack),
        (InputSource::key(KeyCode::KeyE), Action::Interact),
        // Meta
        (InputSource::key(KeyCode::Escape), Action::Pause),
        (InputSource::mouse(MouseButton::Left), Action::Click),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_default_bindings_cover_gameplay() {
        let bindings = default_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Up,
            Action::Attack,
            Action::Interact,
            Action::Pause,
        ] {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "{action:?} is unbound"
            );
        }
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let bindings = default_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in bindings"
            );
        }
    }
}
