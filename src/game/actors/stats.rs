// Actor tuning
//
// All durations are in simulation ticks, all speeds in pixels per tick.

/// Fixed tuning for one kind of actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorStats {
    /// Starting and maximum health
    pub max_health: i32,
    /// Horizontal walking speed
    pub speed: f32,
    /// Upward velocity applied on a jump
    pub jump_strength: f32,
    /// Length of one attack
    pub attack_time: i32,
    /// The attack hits while more than this many ticks remain
    pub attack_active_above: i32,
    /// Invulnerability after taking a hit
    pub hurt_time: i32,
    /// The hurt tint shows while at least this many hurt ticks remain
    pub tint_threshold: i32,
    /// Vertical kick applied when hit
    pub knockback: f32,
    /// Distance at which the actor starts chasing; 0 for the player
    pub aggro_range: f32,
    /// Score awarded on death
    pub score: u32,
}

pub const PLAYER_STATS: ActorStats = ActorStats {
    max_health: 13,
    speed: 5.0,
    jump_strength: 14.0,
    attack_time: 20,
    attack_active_above: 8,
    hurt_time: 40,
    tint_threshold: 15,
    knockback: 3.0,
    aggro_range: 0.0,
    score: 0,
};

pub const SNAKE_STATS: ActorStats = ActorStats {
    max_health: 4,
    speed: 2.0,
    jump_strength: 10.0,
    attack_time: 30,
    attack_active_above: 10,
    hurt_time: 20,
    tint_threshold: 5,
    knockback: 3.0,
    aggro_range: 400.0,
    score: 40,
};

pub const RAT_STATS: ActorStats = ActorStats {
    max_health: 3,
    score: 30,
    ..SNAKE_STATS
};

/// Ticks after the first attack during which a second one becomes the low
/// follow-up
pub const COMBO_WINDOW: i32 = 6;

/// Ticks the death animation runs for before the player is gone
pub const DEATH_TIME: i32 = 12;

/// Downward landing speed that makes an audible thud
pub const HARD_LANDING: f32 = 5.0;

impl ActorStats {
    /// Whether an attack with `remaining` ticks left can still hit
    pub fn attack_is_active(&self, remaining: i32) -> bool {
        remaining > self.attack_active_above
    }

    /// Whether a hurt actor with `remaining` ticks left is drawn tinted
    pub fn is_tinted(&self, remaining: i32) -> bool {
        remaining > 0 && remaining >= self.tint_threshold
    }
}
