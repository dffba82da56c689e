// Attack and combo timers

use super::stats::{ActorStats, COMBO_WINDOW};

/// Which swing an attack uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackTier {
    High,
    Low,
}

/// Combo window state.
///
/// The window keeps reopening while an attack runs, so a second attack
/// started shortly after the first one ends becomes the low follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComboState {
    #[default]
    Idle,
    /// Window open with this many ticks left
    Open(i32),
    /// The running attack is the follow-up
    FollowUp,
}

/// What one attack tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackTick {
    /// Swing to show, if an attack is running
    pub tier: Option<AttackTier>,
    /// The weapon can damage this tick
    pub hitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackTimers {
    /// Ticks left in the running attack, 0 when idle
    pub remaining: i32,
    pub combo: ComboState,
}

impl AttackTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attacking(&self) -> bool {
        self.remaining > 0
    }

    /// Begin an attack unless one is already running
    pub fn try_start(&mut self, stats: &ActorStats) -> Option<AttackTier> {
        if self.remaining != 0 {
            return None;
        }
        self.remaining = stats.attack_time;

        match self.combo {
            ComboState::Open(_) => {
                self.combo = ComboState::FollowUp;
                Some(AttackTier::Low)
            }
            ComboState::Idle | ComboState::FollowUp => {
                self.combo = ComboState::Idle;
                Some(AttackTier::High)
            }
        }
    }

    /// Advance the attack and combo window by one tick
    pub fn tick(&mut self, stats: &ActorStats) -> AttackTick {
        let mut result = AttackTick::default();

        if self.remaining > 0 {
            result.tier = Some(match self.combo {
                ComboState::FollowUp => AttackTier::Low,
                _ => AttackTier::High,
            });
            if self.combo == ComboState::Idle {
                self.combo = ComboState::Open(COMBO_WINDOW);
            }
            self.remaining -= 1;
            result.hitting = stats.attack_is_active(self.remaining);
        }

        self.combo = match self.combo {
            ComboState::Open(n) if n > 1 => ComboState::Open(n - 1),
            ComboState::Open(_) => ComboState::Idle,
            ComboState::FollowUp if self.remaining == 0 => ComboState::Idle,
            other => other,
        };

        result
    }

    /// Enemy attack cycle: restart when idle, then count down unless hurt.
    /// Returns whether the attack can damage this tick.
    pub fn cycle(&mut self, stats: &ActorStats, hurt: bool) -> bool {
        if self.remaining == 0 {
            self.remaining = stats.attack_time;
        }
        if hurt {
            return false;
        }
        self.remaining -= 1;
        stats.attack_is_active(self.remaining)
    }
}
