// One play-through: the level list, the player and everything that spans
// levels
//
// Each tick runs level entities, then the player, then applies the effects
// they collected. Drawing builds a back-to-front draw list from the result.

use std::cmp::Reverse;

use log::{info, warn};

use crate::core::{GameConfig, Rect};
use crate::engine::animation::Millis;
use crate::engine::assets::{AssetError, AssetLoader, TextureHandle};
use crate::engine::audio::AudioSink;
use crate::engine::input::{Action, InputFrame};
use crate::engine::renderer::{Banner, Camera, DirtyRects, DrawCommand, DrawList, Hud, LayerSlot};
use crate::engine::tilemap::StaticLayer;
use crate::game::actors::Player;
use crate::game::cutscene::Cutscene;
use crate::game::effects::{Effects, LevelChange, Visual};
use crate::game::entity::{EntityId, IdAllocator};
use crate::game::level::{resolve_door, Level};
use crate::game::palette::LayerTile;
use crate::game::sounds::{MusicCue, SoundCue, SoundLibrary};
use crate::game::sprites::SpriteLibrary;

/// Cell the player's idle frame starts in
const PLAYER_START_CELL: (i32, i32) = (1, 23);
/// Level entered when the session starts
const FIRST_LEVEL: usize = 1;

/// Something the shell may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameOver,
    Won,
    LevelChanged(usize),
}

/// Player progress at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub score: u32,
    pub health: i32,
    pub has_key: bool,
}

pub struct Session {
    levels: Vec<Level>,
    current: usize,
    player: Player,
    camera: Camera,
    cutscene: Cutscene,
    sounds: SoundLibrary,
    sprites: SpriteLibrary,
    ids: IdAllocator,
    rng: fastrand::Rng,
    paused: bool,
    game_over: bool,
    won: bool,
    dirty: DirtyRects<EntityId>,
    drawn: Vec<EntityId>,
}

impl Session {
    /// Load every configured level. Slot 0 of the level list is a
    /// placeholder so door ids and list indices agree.
    pub fn load(config: &GameConfig, sprites: SpriteLibrary) -> Result<Self, AssetError> {
        let loader = AssetLoader::new(&config.asset_root);
        let mut ids = IdAllocator::new();

        let mut levels = vec![Level::placeholder()];
        for name in &config.levels {
            levels.push(Level::load(&loader, name, &sprites, config.tile_size, &mut ids)?);
        }
        info!("Loaded {} levels", config.levels.len());

        Ok(Self::new(config, sprites, levels, ids, fastrand::Rng::new()))
    }

    /// Session over already-built levels, entering level 1 (or 0 if that is
    /// all there is)
    pub fn new(
        config: &GameConfig,
        sprites: SpriteLibrary,
        levels: Vec<Level>,
        mut ids: IdAllocator,
        mut rng: fastrand::Rng,
    ) -> Self {
        let start = (
            PLAYER_START_CELL.0 * config.tile_size,
            PLAYER_START_CELL.1 * config.tile_size,
        );
        let player = Player::new(ids.next_id(), &sprites, start);
        let sounds = SoundLibrary::new(config.effect_volume, config.music_volume, rng.fork());

        let mut session = Self {
            levels,
            current: 0,
            player,
            camera: Camera::new(config.screen_size()),
            cutscene: Cutscene::new(),
            sounds,
            sprites,
            ids,
            rng,
            paused: false,
            game_over: false,
            won: false,
            dirty: DirtyRects::new(),
            drawn: Vec::new(),
        };

        let first = FIRST_LEVEL.min(session.levels.len().saturating_sub(1));
        let center = session.player.center();
        session.change_level(LevelChange {
            level: first,
            center,
        });
        session
    }

    /// Start the background music
    pub fn start(&self, sink: &mut dyn AudioSink) {
        self.sounds.play_music(MusicCue::Main, sink);
    }

    /// Advance one tick of `dt` milliseconds
    pub fn update(
        &mut self,
        dt: Millis,
        input: &InputFrame,
        sink: &mut dyn AudioSink,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.just_pressed(Action::Pause) && !self.game_over {
            self.toggle_pause(sink);
        }
        if self.paused || self.game_over || self.won {
            return events;
        }

        let mut fx = Effects::new();
        self.levels[self.current].update(&mut self.player, &self.cutscene, &mut self.rng, &mut fx);
        self.apply(fx, sink, &mut events);

        let mut fx = Effects::new();
        self.player
            .update(input, &mut self.levels[self.current], &self.cutscene, &mut fx);
        if let Some(index) = fx.door_used.take() {
            self.enter_door(index, &mut fx);
        }
        self.apply(fx, sink, &mut events);

        self.cutscene.update(dt);
        self.camera.update(self.player.center_vec());
        events
    }

    fn toggle_pause(&mut self, sink: &mut dyn AudioSink) {
        self.paused = !self.paused;
        if self.paused {
            self.sounds.play(SoundCue::Pause, sink);
            sink.pause_all();
        } else {
            sink.resume_all();
            self.sounds.play(SoundCue::Unpause, sink);
        }
        info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Send the player through door `index` of the current level
    fn enter_door(&mut self, index: usize, fx: &mut Effects) {
        let Some(door) = self.levels[self.current].doors.get(index) else {
            return;
        };
        let (door_id, target) = (door.door_id, door.target);

        match resolve_door(&self.levels, target) {
            Some(destination) => {
                self.levels[self.current].doors[index].use_door(destination, fx);
            }
            None => warn!(
                "Door {} in {} leads to missing door {}",
                door_id, self.levels[self.current].name, target
            ),
        }
    }

    fn apply(&mut self, fx: Effects, sink: &mut dyn AudioSink, events: &mut Vec<GameEvent>) {
        for cue in fx.sounds {
            self.sounds.play(cue, sink);
        }
        for spawn in fx.particles {
            self.levels[self.current].spawn_particle(spawn, &self.sprites, &mut self.ids);
        }

        if fx.end_cutscene {
            self.cutscene.end();
        }
        if let Some(request) = fx.cutscene {
            self.cutscene.start(request);
        }

        if let Some(change) = fx.level_change {
            if self.change_level(change) {
                events.push(GameEvent::LevelChanged(change.level));
            }
        }

        if fx.won && !self.won {
            self.won = true;
            sink.stop_all();
            self.sounds.play_music(MusicCue::Win, sink);
            info!("Won with score {}", self.player.score);
            events.push(GameEvent::Won);
        }
        if fx.game_over && !self.game_over {
            self.game_over = true;
            sink.stop_all();
            self.sounds.play_music(MusicCue::GameOver, sink);
            info!("Game over with score {}", self.player.score);
            events.push(GameEvent::GameOver);
        }
    }

    fn change_level(&mut self, change: LevelChange) -> bool {
        let Some(level) = self.levels.get(change.level) else {
            warn!("No level {} to change to", change.level);
            return false;
        };
        self.current = change.level;
        self.camera.set_level_size(level.size());
        self.player.place_at(change.center);

        let steps = self.camera.readjust(self.player.center_vec());
        self.dirty.clear();
        self.drawn.clear();
        info!(
            "Entered level {} ({}), camera settled in {} steps",
            change.level, level.name, steps
        );
        true
    }

    /// Build this frame's draw list: background, doors and items, then the
    /// remaining sprites from right to left, foreground, overlay
    pub fn draw(&mut self) -> DrawList {
        let mut list = DrawList::new();
        let level = &self.levels[self.current];
        let view = self.camera.visible_rect();
        let screen = Rect::new(0, 0, view.width, view.height);

        list.push(DrawCommand::Layer {
            slot: LayerSlot::Background,
            tiles: layer_tiles(&level.background, &view, &self.camera),
        });
        self.dirty.mark(screen);

        let backdrop = level
            .doors
            .iter()
            .map(|door| (door.id, door.visual()))
            .chain(level.items.iter().map(|item| (item.id, item.visual())));

        let mut actors: Vec<(EntityId, Visual)> = level
            .gates
            .iter()
            .map(|gate| (gate.id, gate.visual()))
            .chain(
                level
                    .enemies
                    .iter()
                    .filter_map(|enemy| Some((enemy.id, enemy.visual()?))),
            )
            .chain(
                level
                    .particles
                    .iter()
                    .filter_map(|particle| Some((particle.id, particle.visual()?))),
            )
            .chain(self.player.visual().map(|visual| (self.player.id, visual)))
            .collect();
        actors.sort_by_key(|(_, visual)| Reverse(visual.center_x));

        let mut drawn = Vec::new();
        for (id, visual) in backdrop.chain(actors) {
            let dest = self.camera.to_screen(visual.dest);
            self.dirty.record(id, dest);
            drawn.push(id);
            list.push(DrawCommand::Sprite {
                frame: visual.frame,
                dest,
                flip: visual.flip,
                tint: visual.tint,
            });
        }
        for gone in self.drawn.iter().filter(|id| !drawn.contains(id)) {
            self.dirty.remove(gone);
        }
        self.drawn = drawn;

        list.push(DrawCommand::Layer {
            slot: LayerSlot::Foreground,
            tiles: layer_tiles(&level.foreground, &view, &self.camera),
        });
        self.dirty.mark(screen);

        list.push(DrawCommand::Overlay(self.hud()));
        list
    }

    pub fn hud(&self) -> Hud {
        let banner = if self.won {
            Some(Banner::Won)
        } else if self.game_over {
            Some(Banner::GameOver)
        } else if self.paused {
            Some(Banner::Paused)
        } else {
            None
        };

        Hud {
            health_frame: self.player.health.clamp(0, self.player.stats.max_health) as u16,
            score_text: Hud::score_text(self.player.score),
            has_key: self.player.has_key,
            fade_alpha: self.cutscene.alpha(),
            banner,
        }
    }

    /// Screen areas to repaint since the last call
    pub fn take_dirty(&mut self) -> Vec<Rect> {
        self.dirty.take()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.player.score,
            health: self.player.health,
            has_key: self.player.has_key,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn cutscene(&self) -> &Cutscene {
        &self.cutscene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn has_won(&self) -> bool {
        self.won
    }
}

/// Visible tiles of `layer` in screen space
fn layer_tiles(
    layer: &StaticLayer<LayerTile>,
    view: &Rect,
    camera: &Camera,
) -> Vec<(TextureHandle, Rect)> {
    layer
        .visible(view)
        .map(|blit| (blit.tile.texture(), camera.to_screen(blit.dest)))
        .collect()
}
