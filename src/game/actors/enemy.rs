// Snakes and rats

use log::debug;

use crate::core::Rect;
use crate::engine::physics::{Body, Facing};
use crate::game::cutscene::Cutscene;
use crate::game::effects::{Effects, Visual};
use crate::game::entity::EntityId;
use crate::game::motion::{apply_gravity, move_and_collide};
use crate::game::palette::EnemyKind;
use crate::game::sounds::SoundCue;
use crate::game::sprites::{SheetId, SpriteLibrary};

use super::animation::{AnimationSet, Clip, FacingOffsets};
use super::combat::AttackTimers;
use super::player::Player;
use super::state::{ActorState, ActorStateMachine};
use super::stats::{ActorStats, RAT_STATS, SNAKE_STATS};

/// Body inset from the idle frame
const BODY_INSET: (i32, i32) = (-16, -16);
const OFFSETS: FacingOffsets = FacingOffsets::new((-8.0, -12.0), (-4.0, -12.0));

/// A chase step is taken on one roll in this many
const CHASE_ODDS: u32 = 10;
/// The body is removed once its hurt time drops to this with no health left
const DEATH_HURT_TIME: i32 = 10;

impl EnemyKind {
    pub fn stats(&self) -> ActorStats {
        match self {
            EnemyKind::Snake => SNAKE_STATS,
            EnemyKind::Rat => RAT_STATS,
        }
    }

    fn idle_sheet(&self) -> SheetId {
        match self {
            EnemyKind::Snake => SheetId::SnakeIdle,
            EnemyKind::Rat => SheetId::RatIdle,
        }
    }

    fn death_cue(&self) -> SoundCue {
        match self {
            EnemyKind::Snake => SoundCue::SnakeDeath,
            EnemyKind::Rat => SoundCue::RatDeath,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    pub stats: ActorStats,
    pub health: i32,
    state: ActorStateMachine,
    anims: AnimationSet<ActorState>,
    attack: AttackTimers,
    hurt_time: i32,
    tinted: bool,
}

impl Enemy {
    /// Enemy spawned from the level cell at `pos`. Snakes take the cell as
    /// their top-left corner, rats as their centre.
    pub fn new(id: EntityId, kind: EnemyKind, library: &SpriteLibrary, pos: (i32, i32)) -> Self {
        let sheet = kind.idle_sheet();
        let (width, height) = library.frame_size(sheet);
        let frame = match kind {
            EnemyKind::Snake => Rect::new(pos.0, pos.1, width, height),
            EnemyKind::Rat => Rect::from_center(pos, width, height),
        };
        let rect = frame.inflate(BODY_INSET.0, BODY_INSET.1);

        let anims = AnimationSet::new(
            ActorState::Idle,
            Clip::from_library(library, sheet, OFFSETS, true),
        );
        let stats = kind.stats();

        let mut enemy = Self {
            id,
            kind,
            body: Body::new(rect).with_facing(Facing::Left),
            stats,
            health: stats.max_health,
            state: ActorStateMachine::new(),
            anims,
            attack: AttackTimers::new(),
            hurt_time: 0,
            tinted: false,
        };
        enemy.anims.apply(&mut enemy.body);
        enemy
    }

    pub fn state(&self) -> ActorState {
        self.state.state()
    }

    pub fn hurt_time(&self) -> i32 {
        self.hurt_time
    }

    pub fn is_tinted(&self) -> bool {
        self.tinted
    }

    /// Run one tick of AI and physics. Returns true once the enemy is dead
    /// and should be removed.
    pub fn update(
        &mut self,
        player: &mut Player,
        platforms: &[Rect],
        gates: &[Rect],
        cutscene: &Cutscene,
        rng: &mut fastrand::Rng,
        fx: &mut Effects,
    ) -> bool {
        self.state.tick();

        if self.body.distance_to(&player.body.rect) <= self.stats.aggro_range {
            self.chase(player, cutscene, rng);

            let hitting = self.attack.cycle(&self.stats, self.hurt_time != 0);
            if hitting && self.body.image_rect.intersects(&player.body.image_rect) {
                player.damage(cutscene, fx);
            }
        } else {
            self.body.vel.x = 0.0;
        }

        apply_gravity(&mut self.body);
        move_and_collide(&mut self.body, &[platforms, gates], platforms);

        if self.hurt_time > 0 {
            self.hurt_time -= 1;
            self.tinted = self.stats.is_tinted(self.hurt_time);
        } else {
            self.tinted = false;
        }

        self.state.transition(self.motion_state());
        self.anims.apply(&mut self.body);

        if self.hurt_time <= DEATH_HURT_TIME && self.health == 0 {
            fx.sound(self.kind.death_cue());
            fx.particle(SheetId::Cloud, self.body.rect.center());
            player.score += self.stats.score;
            debug!("{:?} {:?} killed", self.kind, self.id);
            return true;
        }
        false
    }

    /// Step toward the player on a lucky roll, jumping if they are well above
    fn chase(&mut self, player: &Player, cutscene: &Cutscene, rng: &mut fastrand::Rng) {
        if cutscene.in_progress() {
            self.body.vel.x = 0.0;
        }
        let roll = rng.u32(1..=CHASE_ODDS);
        if roll != CHASE_ODDS || cutscene.in_progress() {
            return;
        }

        let target = player.body.rect;
        let own = self.body.rect;
        if target.x < own.x {
            self.body.vel.x = -self.stats.speed;
            self.body.facing = Facing::Left;
        } else if target.x > own.x {
            self.body.vel.x = self.stats.speed;
            self.body.facing = Facing::Right;
        } else {
            self.body.vel.x = 0.0;
        }

        let jump_height = (self.stats.aggro_range / 2.0) as i32;
        if target.y < own.y - jump_height && self.body.on_ground {
            self.body.vel.y = -self.stats.jump_strength;
        }
    }

    fn motion_state(&self) -> ActorState {
        if self.hurt_time > 0 {
            ActorState::Hurt
        } else if self.body.vel.y < 0.0 {
            ActorState::Jumping
        } else if !self.body.on_ground && self.body.vel.y > 1.0 {
            ActorState::Falling
        } else if self.body.vel.x != 0.0 {
            ActorState::Walking
        } else {
            ActorState::Idle
        }
    }

    /// Take one point of damage unless still recovering from the last one
    pub fn damage(&mut self, fx: &mut Effects) -> bool {
        if self.hurt_time != 0 || self.health <= 0 {
            return false;
        }
        self.health -= 1;
        fx.sound(SoundCue::EnemyHit);
        self.hurt_time = self.stats.hurt_time;
        self.body.vel.y -= self.stats.knockback;
        true
    }

    pub fn visual(&self) -> Option<Visual> {
        Some(Visual {
            frame: self.anims.current_frame()?,
            dest: self.body.draw_rect(),
            flip: self.body.facing.flip(),
            tint: self.tinted,
            center_x: self.body.rect.center_x(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::ManualClock;
    use crate::game::entity::IdAllocator;
    use std::rc::Rc;

    fn setup() -> (SpriteLibrary, IdAllocator) {
        let library = SpriteLibrary::new(Rc::new(ManualClock::new(0))).unwrap();
        (library, IdAllocator::new())
    }

    fn floor() -> Vec<Rect> {
        (0..40).map(|col| Rect::new(col * 32, 288, 32, 32)).collect()
    }

    #[test]
    fn test_spawn_geometry() {
        let (library, mut ids) = setup();
        let snake = Enemy::new(ids.next_id(), EnemyKind::Snake, &library, (64, 64));
        assert_eq!(snake.body.rect, Rect::new(72, 72, 48, 32));
        assert_eq!(snake.health, 4);

        let rat = Enemy::new(ids.next_id(), EnemyKind::Rat, &library, (64, 64));
        assert_eq!(rat.body.rect, Rect::new(40, 48, 48, 32));
        assert_eq!(rat.health, 3);
    }

    #[test]
    fn test_damage_cooldown() {
        let (library, mut ids) = setup();
        let mut snake = Enemy::new(ids.next_id(), EnemyKind::Snake, &library, (0, 0));
        let mut fx = Effects::new();

        assert!(snake.damage(&mut fx));
        assert_eq!(snake.health, 3);
        assert_eq!(snake.hurt_time(), 20);
        assert_eq!(snake.body.vel.y, -3.0);
        assert!(!snake.damage(&mut fx));
        assert_eq!(fx.sounds, vec![SoundCue::EnemyHit]);
    }

    #[test]
    fn test_idle_out_of_range() {
        let (library, mut ids) = setup();
        let mut player = Player::new(ids.next_id(), &library, (1200, 0));
        let mut rat = Enemy::new(ids.next_id(), EnemyKind::Rat, &library, (64, 200));
        rat.body.vel.x = 2.0;
        let mut rng = fastrand::Rng::with_seed(7);
        let platforms = floor();

        for _ in 0..30 {
            let dead = rat.update(
                &mut player,
                &platforms,
                &[],
                &Cutscene::new(),
                &mut rng,
                &mut Effects::new(),
            );
            assert!(!dead);
        }
        assert_eq!(rat.body.vel.x, 0.0);
        assert_eq!(rat.body.rect.bottom(), 288);
    }

    #[test]
    fn test_chases_player() {
        let (library, mut ids) = setup();
        let mut player = Player::new(ids.next_id(), &library, (300, 224));
        let mut snake = Enemy::new(ids.next_id(), EnemyKind::Snake, &library, (32, 248));
        let start = snake.body.rect.x;
        let mut rng = fastrand::Rng::with_seed(3);
        let platforms = floor();

        for _ in 0..100 {
            snake.update(
                &mut player,
                &platforms,
                &[],
                &Cutscene::new(),
                &mut rng,
                &mut Effects::new(),
            );
        }
        assert!(snake.body.rect.x > start);
        assert_eq!(snake.body.facing, Facing::Right);
    }

    #[test]
    fn test_frozen_during_cutscene() {
        let (library, mut ids) = setup();
        let mut player = Player::new(ids.next_id(), &library, (300, 224));
        let mut snake = Enemy::new(ids.next_id(), EnemyKind::Snake, &library, (32, 248));
        snake.body.vel.x = 2.0;
        let mut cutscene = Cutscene::new();
        cutscene.start(crate::game::cutscene::CutsceneRequest::GATE);
        let mut rng = fastrand::Rng::with_seed(3);

        snake.update(
            &mut player,
            &floor(),
            &[],
            &cutscene,
            &mut rng,
            &mut Effects::new(),
        );
        assert_eq!(snake.body.vel.x, 0.0);
    }

    #[test]
    fn test_death_awards_score() {
        let (library, mut ids) = setup();
        let mut player = Player::new(ids.next_id(), &library, (1200, 0));
        let mut snake = Enemy::new(ids.next_id(), EnemyKind::Snake, &library, (32, 248));
        snake.health = 1;
        snake.damage(&mut Effects::new());
        assert_eq!(snake.health, 0);

        let mut rng = fastrand::Rng::with_seed(1);
        let platforms = floor();
        let mut ticks = 0;
        let mut fx = Effects::new();
        while !snake.update(&mut player, &platforms, &[], &Cutscene::new(), &mut rng, &mut fx) {
            ticks += 1;
            assert!(ticks < 50);
        }
        // Hurt time 20 counts down to 10
        assert_eq!(ticks, 9);
        assert_eq!(player.score, 40);
        assert!(fx.sounds.contains(&SoundCue::SnakeDeath));
        assert_eq!(fx.particles.len(), 1);
        assert_eq!(fx.particles[0].sheet, SheetId::Cloud);
    }
}
