// The player character

use glam::Vec2;
use log::{debug, info};

use crate::core::Rect;
use crate::engine::input::{Action, InputFrame};
use crate::engine::physics::{Body, Facing};
use crate::game::cutscene::Cutscene;
use crate::game::effects::{Effects, Visual};
use crate::game::entity::EntityId;
use crate::game::gate::GATE_RANGE;
use crate::game::level::Level;
use crate::game::motion::{apply_gravity, move_and_collide};
use crate::game::sounds::SoundCue;
use crate::game::sprites::{SheetId, SpriteLibrary};

use super::animation::{AnimationSet, Clip, FacingOffsets};
use super::combat::{AttackTier, AttackTimers};
use super::state::{ActorState, ActorStateMachine};
use super::stats::{ActorStats, DEATH_TIME, HARD_LANDING, PLAYER_STATS};

/// Size of the player's idle frame; the body is this shrunk by `BODY_INSET`
const FRAME_SIZE: (i32, i32) = (64, 64);
const BODY_INSET: (i32, i32) = (-32, -4);

/// Walking frames that land a foot
const STEP_FRAMES: [usize; 2] = [0, 4];

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub stats: ActorStats,
    pub health: i32,
    pub score: u32,
    pub has_key: bool,
    /// False once the death animation has played out
    pub alive: bool,
    state: ActorStateMachine,
    anims: AnimationSet<ActorState>,
    attack: AttackTimers,
    hurt_time: i32,
    tinted: bool,
    death_time: i32,
    last_walk_frame: Option<usize>,
}

impl Player {
    /// Player whose idle frame has its top-left at `pos`
    pub fn new(id: EntityId, library: &SpriteLibrary, pos: (i32, i32)) -> Self {
        let rect = Rect::new(pos.0, pos.1, FRAME_SIZE.0, FRAME_SIZE.1)
            .inflate(BODY_INSET.0, BODY_INSET.1);

        let clip = |sheet, offsets, playing| Clip::from_library(library, sheet, offsets, playing);
        let anims = AnimationSet::new(
            ActorState::Idle,
            clip(
                SheetId::PlayerIdle,
                FacingOffsets::new((-24.0, -4.0), (-8.0, -4.0)),
                true,
            ),
        )
        .with_clip(
            ActorState::Walking,
            clip(
                SheetId::PlayerWalking,
                FacingOffsets::new((-24.0, -4.0), (0.0, -4.0)),
                true,
            ),
        )
        .with_clip(
            ActorState::Jumping,
            clip(
                SheetId::PlayerJumping,
                FacingOffsets::new((-40.0, -4.0), (-8.0, -4.0)),
                false,
            ),
        )
        .with_clip(
            ActorState::Falling,
            clip(
                SheetId::PlayerFalling,
                FacingOffsets::new((-40.0, -4.0), (-8.0, -4.0)),
                false,
            ),
        )
        .with_clip(
            ActorState::Attacking(AttackTier::High),
            clip(
                SheetId::PlayerAttackHigh,
                FacingOffsets::new((-64.0, -16.0), (-32.0, -16.0)),
                false,
            ),
        )
        .with_clip(
            ActorState::Attacking(AttackTier::Low),
            clip(
                SheetId::PlayerAttackLow,
                FacingOffsets::new((-64.0, -16.0), (-32.0, -16.0)),
                false,
            ),
        )
        .with_clip(
            ActorState::Dead,
            clip(SheetId::PlayerDeath, FacingOffsets::both((-32.0, -12.0)), false),
        );

        let mut player = Self {
            id,
            body: Body::new(rect).with_facing(Facing::Left),
            stats: PLAYER_STATS,
            health: PLAYER_STATS.max_health,
            score: 0,
            has_key: false,
            alive: true,
            state: ActorStateMachine::new(),
            anims,
            attack: AttackTimers::new(),
            hurt_time: 0,
            tinted: false,
            death_time: DEATH_TIME,
            last_walk_frame: None,
        };
        player.sync_animation();
        player
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

    pub fn is_dying(&self) -> bool {
        self.state() == ActorState::Dead && self.alive
    }

    pub fn center(&self) -> (i32, i32) {
        self.body.center()
    }

    pub fn center_vec(&self) -> Vec2 {
        self.body.rect.center_vec()
    }

    /// Teleport so the body is centred on `center`
    pub fn place_at(&mut self, center: (i32, i32)) {
        self.body.rect.set_center(center);
        self.sync_animation();
    }

    /// Restore health, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.stats.max_health);
    }

    pub fn is_hurt(&self) -> bool {
        self.health < self.stats.max_health
    }

    /// Run one simulation tick
    pub fn update(
        &mut self,
        input: &InputFrame,
        level: &mut Level,
        cutscene: &Cutscene,
        fx: &mut Effects,
    ) {
        self.state.tick();

        if cutscene.in_progress() {
            self.body.vel.x = 0.0;
        } else if self.health > 0 {
            self.handle_input(input, level, fx);
        }

        if !self.body.on_ground {
            apply_gravity(&mut self.body);
            if self.body.vel.y > 1.0 && !self.attack.is_attacking() {
                self.state.transition(ActorState::Falling);
            }
        }

        if self.health == 0 && self.alive && (self.body.on_ground || self.is_dying()) {
            self.tick_death(fx);
        }

        let gates = level.solid_gate_rects();
        let report = move_and_collide(
            &mut self.body,
            &[level.platform_rects(), gates.as_slice()],
            level.platform_rects(),
        );
        if report.landed && report.impact > HARD_LANDING {
            fx.sound(SoundCue::Step);
        }

        if self.hurt_time > 0 {
            self.hurt_time -= 1;
            self.tinted = self.stats.is_tinted(self.hurt_time);
        } else {
            self.tinted = false;
        }

        self.sync_animation();
    }

    fn handle_input(&mut self, input: &InputFrame, level: &mut Level, fx: &mut Effects) {
        let attacking = self.attack.is_attacking();

        if input.is_held(Action::Up) {
            let door = level
                .doors
                .iter()
                .position(|door| door.rect.intersects(&self.body.rect));

            if self.body.on_ground && !attacking && door.is_none() {
                self.body.vel.y = -self.stats.jump_strength;
            }
            if self.body.vel.y < 0.0 && !attacking {
                self.state.transition(ActorState::Jumping);
            }
            if let Some(index) = door {
                if self.faces(level.doors[index].rect.center_x()) {
                    fx.door_used = Some(index);
                }
            }
        }

        let left = input.is_held(Action::MoveLeft);
        let right = input.is_held(Action::MoveRight);
        if left {
            self.walk(Facing::Left, fx);
        }
        if right {
            self.walk(Facing::Right, fx);
        }
        if !(left || right) {
            self.body.vel.x = 0.0;
            if self.body.on_ground && self.body.vel.y >= 0.0 && !self.attack.is_attacking() {
                self.state.transition(ActorState::Idle);
            }
        }
        if self.state() != ActorState::Walking {
            self.last_walk_frame = None;
        }

        if input.is_held(Action::Attack) {
            if let Some(tier) = self.attack.try_start(&self.stats) {
                if let Some(timeline) = self.anims.timeline_mut(ActorState::Attacking(tier)) {
                    timeline.stop();
                    timeline.play();
                }
                fx.sound(SoundCue::Attack);
            }
        }

        let tick = self.attack.tick(&self.stats);
        if let Some(tier) = tick.tier {
            self.state.transition(ActorState::Attacking(tier));
            self.body.vel.x = 0.0;
            self.sync_animation();
        }
        if tick.hitting {
            for enemy in level.enemies.iter_mut() {
                if enemy.body.image_rect.intersects(&self.body.image_rect) {
                    enemy.damage(fx);
                }
            }
        }

        self.select_gate(input, level, fx);
    }

    fn walk(&mut self, facing: Facing, fx: &mut Effects) {
        self.body.vel.x = facing.sign() as f32 * self.stats.speed;
        self.body.facing = facing;

        // A jump started this tick still reads as grounded
        if !self.body.on_ground || self.body.vel.y < 0.0 || self.attack.is_attacking() {
            return;
        }
        self.state.transition(ActorState::Walking);

        let frame = self.anims.frame_index(ActorState::Walking);
        if frame != self.last_walk_frame {
            if let Some(index) = frame {
                if STEP_FRAMES.contains(&index) {
                    fx.sound(SoundCue::Step);
                }
            }
            self.last_walk_frame = frame;
        }
    }

    /// Highlight the closest gate in range and unlock it on `Interact`
    fn select_gate(&mut self, input: &InputFrame, level: &mut Level, fx: &mut Effects) {
        let mut in_range: Vec<(usize, f32)> = level
            .gates
            .iter()
            .enumerate()
            .map(|(i, gate)| (i, self.body.distance_to(&gate.rect)))
            .filter(|&(_, distance)| distance <= GATE_RANGE)
            .collect();
        in_range.sort_by(|a, b| a.1.total_cmp(&b.1));

        let Some(&(closest, _)) = in_range.first() else {
            return;
        };
        level.gates[closest].selected = true;
        for &(other, _) in &in_range[1..] {
            level.gates[other].selected = false;
        }

        if input.is_held(Action::Interact) && self.has_key {
            let gate = &mut level.gates[closest];
            if gate.selected && gate.is_locked() {
                gate.unlock(fx);
                self.has_key = false;
                info!("Gate {:?} unlocked", gate.id);
            }
        }
    }

    fn faces(&self, x: i32) -> bool {
        let own = self.body.rect.center_x();
        match self.body.facing {
            Facing::Right => x > own,
            Facing::Left => x < own,
        }
    }

    /// One tick of the death sequence. Once begun it runs every tick until
    /// the player is gone.
    fn tick_death(&mut self, fx: &mut Effects) {
        self.body.vel.x = 0.0;
        if !self.is_dying() {
            debug!("Player death sequence started");
        }
        self.state.transition(ActorState::Dead);

        if self.death_time > 0 {
            self.death_time -= 1;
        }
        if self.death_time % 2 == 0 {
            if let Some(timeline) = self.anims.timeline_mut(ActorState::Dead) {
                timeline.next_frame(1);
            }
        }
        if self.death_time == 0 {
            self.alive = false;
            fx.game_over = true;
            info!("Player died with score {}", self.score);
        }
    }

    /// Take one point of damage. Ignored during cutscenes, while still
    /// recovering from the last hit, and once out of health.
    pub fn damage(&mut self, cutscene: &Cutscene, fx: &mut Effects) -> bool {
        if cutscene.in_progress() || self.hurt_time != 0 || self.health <= 0 {
            return false;
        }
        self.health -= 1;
        fx.sound(SoundCue::PlayerHit);
        self.hurt_time = self.stats.hurt_time;
        if self.body.vel.y == 0.0 {
            self.body.vel.y -= self.stats.knockback;
        }
        debug!("Player hit, {} health left", self.health);
        true
    }

    fn sync_animation(&mut self) {
        self.anims.set(self.state.state());
        self.anims.apply(&mut self.body);
    }

    /// What to draw this tick
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
    use crate::game::cutscene::CutsceneRequest;
    use crate::game::door::Door;
    use crate::game::entity::IdAllocator;
    use crate::game::palette::PlatformKind;
    use std::rc::Rc;

    fn setup() -> (SpriteLibrary, IdAllocator) {
        let library = SpriteLibrary::new(Rc::new(ManualClock::new(0))).unwrap();
        (library, IdAllocator::new())
    }

    /// A 20x10 tile level with a floor along the bottom row
    fn floor_level(ids: &mut IdAllocator) -> Level {
        let mut level = Level::new("test", 640, 320);
        for col in 0..20 {
            level.add_platform(ids.next_id(), PlatformKind::Full, Rect::new(col * 32, 288, 32, 32));
        }
        level
    }

    /// Player standing on the floor of `floor_level`
    fn grounded_player(library: &SpriteLibrary, ids: &mut IdAllocator, level: &mut Level) -> Player {
        let mut player = Player::new(ids.next_id(), library, (200, 200));
        let cutscene = Cutscene::new();
        let mut fx = Effects::new();
        for _ in 0..40 {
            player.update(&InputFrame::default(), level, &cutscene, &mut fx);
            if player.body.on_ground {
                break;
            }
        }
        assert!(player.body.on_ground);
        player
    }

    #[test]
    fn test_spawn_geometry() {
        let (library, mut ids) = setup();
        let player = Player::new(ids.next_id(), &library, (32, 736));
        assert_eq!(player.body.rect, Rect::new(48, 738, 32, 60));
        assert_eq!(player.health, 13);
        assert!(player.alive);
        assert_eq!(player.body.facing, Facing::Left);
    }

    #[test]
    fn test_lands_on_floor() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let player = grounded_player(&library, &mut ids, &mut level);
        assert_eq!(player.body.rect.bottom(), 288);
    }

    #[test]
    fn test_walk_and_face() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let start = player.body.rect.x;

        let mut fx = Effects::new();
        let input = InputFrame::holding(&[Action::MoveRight]);
        player.update(&input, &mut level, &Cutscene::new(), &mut fx);

        assert_eq!(player.body.rect.x, start + 5);
        assert_eq!(player.body.facing, Facing::Right);
        assert_eq!(player.state(), ActorState::Walking);
        assert!(fx.sounds.contains(&SoundCue::Step));
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let input = InputFrame::holding(&[Action::Up]);
        let mut fx = Effects::new();

        player.update(&input, &mut level, &Cutscene::new(), &mut fx);
        assert_eq!(player.body.vel.y, -14.0);
        assert_eq!(player.state(), ActorState::Jumping);

        // Mid-air presses only feel gravity
        player.update(&input, &mut level, &Cutscene::new(), &mut fx);
        assert_eq!(player.body.vel.y, -13.0);
    }

    #[test]
    fn test_cutscene_freezes_input() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let start = player.body.rect.x;

        let mut cutscene = Cutscene::new();
        cutscene.start(CutsceneRequest::GATE);
        let input = InputFrame::holding(&[Action::MoveLeft, Action::Attack]);
        let mut fx = Effects::new();
        player.update(&input, &mut level, &cutscene, &mut fx);

        assert_eq!(player.body.rect.x, start);
        assert!(fx.sounds.is_empty());
    }

    #[test]
    fn test_attack_stops_movement() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let start = player.body.rect.x;

        let input = InputFrame::holding(&[Action::Attack, Action::MoveLeft]);
        let mut fx = Effects::new();
        player.update(&input, &mut level, &Cutscene::new(), &mut fx);

        assert_eq!(player.state(), ActorState::Attacking(AttackTier::High));
        assert_eq!(player.body.rect.x, start);
        assert!(fx.sounds.contains(&SoundCue::Attack));
    }

    #[test]
    fn test_damage_and_invulnerability() {
        let (library, mut ids) = setup();
        let mut player = Player::new(ids.next_id(), &library, (0, 0));
        let cutscene = Cutscene::new();
        let mut fx = Effects::new();

        assert!(player.damage(&cutscene, &mut fx));
        assert_eq!(player.health, 12);
        assert_eq!(player.body.vel.y, -3.0);
        assert!(!player.damage(&cutscene, &mut fx));
        assert_eq!(player.health, 12);
        assert_eq!(fx.sounds, vec![SoundCue::PlayerHit]);
    }

    #[test]
    fn test_no_damage_during_cutscene() {
        let (library, mut ids) = setup();
        let mut player = Player::new(ids.next_id(), &library, (0, 0));
        let mut cutscene = Cutscene::new();
        cutscene.start(CutsceneRequest::DOOR);
        assert!(!player.damage(&cutscene, &mut Effects::new()));
        assert_eq!(player.health, 13);
    }

    #[test]
    fn test_hurt_tint_window() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let cutscene = Cutscene::new();
        let mut fx = Effects::new();
        player.damage(&cutscene, &mut fx);

        let mut tinted_ticks = 0;
        for _ in 0..40 {
            player.update(&InputFrame::default(), &mut level, &cutscene, &mut fx);
            if player.is_tinted() {
                tinted_ticks += 1;
            }
        }
        // hurt_time 39 down to 15
        assert_eq!(tinted_ticks, 25);
        assert_eq!(player.hurt_time(), 0);
    }

    #[test]
    fn test_death_sequence() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let cutscene = Cutscene::new();

        player.health = 1;
        let mut fx = Effects::new();
        assert!(player.damage(&cutscene, &mut fx));
        assert_eq!(player.health, 0);

        let mut dead_at = None;
        let mut gone_at = None;
        let mut frames = Vec::new();
        let mut game_overs = 0;
        for tick in 0..40 {
            let mut fx = Effects::new();
            player.update(&InputFrame::default(), &mut level, &cutscene, &mut fx);
            if fx.game_over {
                game_overs += 1;
            }
            if dead_at.is_none() && player.state() == ActorState::Dead {
                dead_at = Some(tick);
            }
            if dead_at.is_some() {
                frames.push(player.anims.frame_index(ActorState::Dead).unwrap());
            }
            if !player.alive {
                gone_at = Some(tick);
                break;
            }
        }

        // Grounded when hit, so the countdown starts on the very next tick
        assert_eq!(dead_at, Some(0));
        assert_eq!(gone_at, Some(11));
        assert_eq!(frames.len() as i32, DEATH_TIME);
        assert_eq!(frames, vec![0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 5]);
        assert_eq!(game_overs, 1);
        assert_eq!(player.state(), ActorState::Dead);

        // Nothing more happens once gone
        let mut fx = Effects::new();
        player.update(&InputFrame::default(), &mut level, &cutscene, &mut fx);
        assert!(!fx.game_over);
    }

    #[test]
    fn test_tap_jump_stays_jumping_until_falling() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let cutscene = Cutscene::new();
        let mut fx = Effects::new();

        player.update(&InputFrame::holding(&[Action::Up]), &mut level, &cutscene, &mut fx);
        assert_eq!(player.state(), ActorState::Jumping);

        let mut falling_at = None;
        for tick in 1..30 {
            player.update(&InputFrame::default(), &mut level, &cutscene, &mut fx);
            if player.state() == ActorState::Falling {
                falling_at = Some(tick);
                break;
            }
            assert_eq!(player.state(), ActorState::Jumping, "tick {}", tick);
            assert!(!player.body.on_ground);
        }
        // -14 rises to +2 after 16 ticks of gravity
        assert_eq!(falling_at, Some(16));
        assert_eq!(player.body.vel.y, 2.0);
    }

    #[test]
    fn test_running_jump() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let start = player.body.rect.x;

        let input = InputFrame::holding(&[Action::Up, Action::MoveRight]);
        player.update(&input, &mut level, &Cutscene::new(), &mut Effects::new());

        assert_eq!(player.state(), ActorState::Jumping);
        assert_eq!(player.body.rect.x, start + 5);
    }

    #[test]
    fn test_no_jump_in_front_of_door() {
        let (library, mut ids) = setup();
        let mut level = floor_level(&mut ids);
        let mut player = grounded_player(&library, &mut ids, &mut level);
        let top = player.body.rect.y;
        level
            .doors
            .push(Door::new(ids.next_id(), 1, 2, &library, (player.body.rect.x, 224)));
        assert!(level.doors[0].rect.intersects(&player.body.rect));

        let input = InputFrame::holding(&[Action::Up]);
        player.update(&input, &mut level, &Cutscene::new(), &mut Effects::new());

        assert!(player.body.vel.y >= 0.0);
        assert_eq!(player.body.rect.y, top);
        assert_ne!(player.state(), ActorState::Jumping);
    }
}
