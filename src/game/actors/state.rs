// Actor state machine

use super::combat::AttackTier;

/// What an actor is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Walking,
    /// In the air, moving upward
    Jumping,
    /// In the air, moving downward
    Falling,
    /// Swinging
    Attacking(AttackTier),
    /// Recovering from a hit
    Hurt,
    /// Playing out the death animation, or gone
    Dead,
}

impl ActorState {
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, Self::Attacking(_))
    }

    /// Whether the actor still responds to input or AI
    pub fn can_act(&self) -> bool {
        !matches!(self, Self::Dead)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Jumping => "jumping",
            Self::Falling => "falling",
            Self::Attacking(AttackTier::High) => "attacking_high",
            Self::Attacking(AttackTier::Low) => "attacking_low",
            Self::Hurt => "hurt",
            Self::Dead => "death",
        }
    }
}

/// Tracks the current and previous state and how long the current one has
/// lasted
#[derive(Debug, Clone, Default)]
pub struct ActorStateMachine {
    current: ActorState,
    previous: ActorState,
    ticks_in_state: u32,
}

impl ActorStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ActorState {
        self.current
    }

    pub fn previous_state(&self) -> ActorState {
        self.previous
    }

    pub fn ticks_in_state(&self) -> u32 {
        self.ticks_in_state
    }

    /// Check if the state changed on the last transition this tick
    pub fn just_changed(&self) -> bool {
        self.ticks_in_state == 0
    }

    /// Move to `next`. Dead is final; transitions out of it are ignored.
    pub fn transition(&mut self, next: ActorState) {
        if self.current == next || self.current == ActorState::Dead {
            return;
        }
        self.previous = self.current;
        self.current = next;
        self.ticks_in_state = 0;
    }

    /// Called once per simulation tick
    pub fn tick(&mut self) {
        self.ticks_in_state = self.ticks_in_state.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = ActorStateMachine::new();
        assert_eq!(sm.state(), ActorState::Idle);
    }

    #[test]
    fn test_transition_records_previous() {
        let mut sm = ActorStateMachine::new();
        sm.transition(ActorState::Walking);
        assert_eq!(sm.state(), ActorState::Walking);
        assert_eq!(sm.previous_state(), ActorState::Idle);
        assert!(sm.just_changed());

        sm.tick();
        assert!(!sm.just_changed());
        assert_eq!(sm.ticks_in_state(), 1);
    }

    #[test]
    fn test_same_state_keeps_timer() {
        let mut sm = ActorStateMachine::new();
        sm.transition(ActorState::Falling);
        sm.tick();
        sm.tick();
        sm.transition(ActorState::Falling);
        assert_eq!(sm.ticks_in_state(), 2);
    }

    #[test]
    fn test_dead_is_final() {
        let mut sm = ActorStateMachine::new();
        sm.transition(ActorState::Dead);
        sm.transition(ActorState::Idle);
        assert_eq!(sm.state(), ActorState::Dead);
        assert!(!sm.state().can_act());
    }

    #[test]
    fn test_state_queries() {
        assert!(ActorState::Jumping.is_airborne());
        assert!(!ActorState::Walking.is_airborne());
        assert!(ActorState::Attacking(AttackTier::Low).is_attacking());
        assert_eq!(ActorState::Attacking(AttackTier::High).name(), "attacking_high");
    }
}
