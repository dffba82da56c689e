// Levels decoded from spawn-map images

use glam::Vec2;
use log::{debug, info};

use crate::core::Rect;
use crate::engine::assets::{AssetError, AssetLoader, AssetType};
use crate::engine::tilemap::{decode, decode_path, StaticLayer, TileGrid};
use crate::game::actors::{Enemy, Player};
use crate::game::cutscene::Cutscene;
use crate::game::door::Door;
use crate::game::effects::{Effects, LevelChange, ParticleSpawn};
use crate::game::entity::{EntityId, IdAllocator};
use crate::game::gate::Gate;
use crate::game::items::Item;
use crate::game::palette::{entity_palette, layer_palette, LayerTile, Placement, PlatformKind};
use crate::game::particle::Particle;
use crate::game::sprites::SpriteLibrary;

/// Invisible solid ground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub id: EntityId,
    pub kind: PlatformKind,
    pub rect: Rect,
}

impl Platform {
    /// Platform filling `cell`, or its top half for `Upper`
    pub fn new(id: EntityId, kind: PlatformKind, cell: Rect) -> Self {
        let rect = match kind {
            PlatformKind::Full => cell,
            PlatformKind::Upper => Rect::new(cell.x, cell.y, cell.width, cell.height / 2),
        };
        Self { id, kind, rect }
    }
}

/// One level and everything living in it
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    /// Size in pixels
    pub width: i32,
    pub height: i32,
    pub background: StaticLayer<LayerTile>,
    pub foreground: StaticLayer<LayerTile>,
    pub platforms: Vec<Platform>,
    pub doors: Vec<Door>,
    pub gates: Vec<Gate>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    platform_rects: Vec<Rect>,
}

impl Level {
    /// Empty level of the given pixel size
    pub fn new(name: &str, width: i32, height: i32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            background: StaticLayer::empty(width, height),
            foreground: StaticLayer::empty(width, height),
            platforms: Vec::new(),
            doors: Vec::new(),
            gates: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            platform_rects: Vec::new(),
        }
    }

    /// Stand-in for slot 0 of the level list, so door ids line up with
    /// list indices
    pub fn placeholder() -> Self {
        Self::new("placeholder", 0, 0)
    }

    /// Build a level from a decoded spawn map, scanning rows top to bottom
    pub fn from_grid(
        name: &str,
        spawns: &TileGrid<Placement>,
        background: Option<StaticLayer<LayerTile>>,
        foreground: Option<StaticLayer<LayerTile>>,
        library: &SpriteLibrary,
        tile_size: i32,
        ids: &mut IdAllocator,
    ) -> Self {
        let width = spawns.width() as i32 * tile_size;
        let height = spawns.height() as i32 * tile_size;
        let mut level = Self::new(name, width, height);
        if let Some(layer) = background {
            level.background = layer;
        }
        if let Some(layer) = foreground {
            level.foreground = layer;
        }

        for (col, row, placement) in spawns.iter() {
            let pos = (col as i32 * tile_size, row as i32 * tile_size);
            let id = ids.next_id();
            match *placement {
                Placement::Platform(kind) => {
                    level.add_platform(id, kind, Rect::new(pos.0, pos.1, tile_size, tile_size))
                }
                Placement::Gate => level.gates.push(Gate::new(id, library, pos)),
                Placement::Enemy(kind) => level.enemies.push(Enemy::new(id, kind, library, pos)),
                Placement::Item(kind) => {
                    level.items.push(Item::new(id, kind, library, pos, tile_size))
                }
                Placement::Door { id: door_id, target } => {
                    level.doors.push(Door::new(id, door_id, target, library, pos))
                }
            }
        }
        level
    }

    /// Load `name` from the level directory together with its optional
    /// background and foreground layers
    pub fn load(
        loader: &AssetLoader,
        name: &str,
        library: &SpriteLibrary,
        tile_size: i32,
        ids: &mut IdAllocator,
    ) -> Result<Self, AssetError> {
        let spawns = decode_path(&loader.resolve_path(AssetType::Level, name), &entity_palette())?;
        let background = load_layer(loader, AssetType::BackgroundLayer, name, tile_size)?;
        let foreground = load_layer(loader, AssetType::ForegroundLayer, name, tile_size)?;

        let level = Self::from_grid(name, &spawns, background, foreground, library, tile_size, ids);
        info!(
            "Loaded {} ({}x{} px): {} platforms, {} doors, {} gates, {} items, {} enemies",
            name,
            level.width,
            level.height,
            level.platforms.len(),
            level.doors.len(),
            level.gates.len(),
            level.items.len(),
            level.enemies.len()
        );
        Ok(level)
    }

    pub fn add_platform(&mut self, id: EntityId, kind: PlatformKind, cell: Rect) {
        let platform = Platform::new(id, kind, cell);
        self.platform_rects.push(platform.rect);
        self.platforms.push(platform);
    }

    pub fn platform_rects(&self) -> &[Rect] {
        &self.platform_rects
    }

    /// Gates that still block movement
    pub fn solid_gate_rects(&self) -> Vec<Rect> {
        self.gates
            .iter()
            .filter(|gate| gate.is_solid())
            .map(|gate| gate.rect)
            .collect()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn spawn_particle(
        &mut self,
        spawn: ParticleSpawn,
        library: &SpriteLibrary,
        ids: &mut IdAllocator,
    ) {
        self.particles
            .push(Particle::new(ids.next_id(), spawn.sheet, library, spawn.at));
    }

    /// Update everything in the level except the player
    pub fn update(
        &mut self,
        player: &mut Player,
        cutscene: &Cutscene,
        rng: &mut fastrand::Rng,
        fx: &mut Effects,
    ) {
        for door in &mut self.doors {
            door.update(cutscene, fx);
        }
        for gate in &mut self.gates {
            gate.update(player, cutscene, fx);
        }
        self.items.retain_mut(|item| !item.update(player, fx));

        let gates = self.solid_gate_rects();
        let platforms = &self.platform_rects;
        self.enemies
            .retain_mut(|enemy| !enemy.update(player, platforms, &gates, cutscene, rng, fx));

        self.particles.retain(|particle| !particle.is_finished());
    }
}

fn load_layer(
    loader: &AssetLoader,
    asset_type: AssetType,
    name: &str,
    tile_size: i32,
) -> Result<Option<StaticLayer<LayerTile>>, AssetError> {
    let Some(image) = loader.load_optional_image(asset_type, name)? else {
        debug!("No {:?} for {}", asset_type, name);
        return Ok(None);
    };
    let grid = decode(&image, &layer_palette());
    Ok(Some(StaticLayer::from_grid(&grid, tile_size)))
}

/// Find where door `target` is. Every level is searched; when several doors
/// share the id the last one found wins.
pub fn resolve_door(levels: &[Level], target: u8) -> Option<LevelChange> {
    levels
        .iter()
        .enumerate()
        .flat_map(|(index, level)| {
            level
                .doors
                .iter()
                .filter(move |door| door.door_id == target)
                .map(move |door| LevelChange {
                    level: index,
                    center: door.rect.center(),
                })
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::ManualClock;
    use crate::game::palette::{ItemKind, DOOR_MARKER};
    use crate::game::sprites::SheetId;
    use image::{Rgba as Px, RgbaImage};
    use std::rc::Rc;

    fn library() -> SpriteLibrary {
        SpriteLibrary::new(Rc::new(ManualClock::new(0))).unwrap()
    }

    /// 4x3 map: a door and a coin on the middle row, floor below, with a
    /// half platform and a gate
    fn spawn_image() -> RgbaImage {
        let mut image = RgbaImage::new(4, 3);
        image.put_pixel(0, 1, Px([7, DOOR_MARKER, 9, 255]));
        image.put_pixel(2, 1, Px([255, 216, 0, 255]));
        image.put_pixel(3, 0, Px([128, 0, 255, 255]));
        image.put_pixel(1, 0, Px([20, 20, 20, 255]));
        for col in 0..4 {
            image.put_pixel(col, 2, Px([0, 0, 0, 255]));
        }
        image
    }

    fn build(ids: &mut IdAllocator) -> Level {
        let grid = decode(&spawn_image(), &entity_palette());
        Level::from_grid("test", &grid, None, None, &library(), 32, ids)
    }

    #[test]
    fn test_from_grid() {
        let mut ids = IdAllocator::new();
        let level = build(&mut ids);

        assert_eq!((level.width, level.height), (128, 96));
        assert_eq!(level.platforms.len(), 5);
        assert_eq!(level.doors.len(), 1);
        assert_eq!(level.doors[0].door_id, 7);
        assert_eq!(level.doors[0].target, 9);
        assert_eq!(level.doors[0].rect, Rect::new(0, 32, 64, 64));
        assert_eq!(level.items[0].kind, ItemKind::Coin);
        assert_eq!(level.gates.len(), 1);
        assert!(level.background.is_empty());
        assert_eq!(level.background.width, 128);
    }

    #[test]
    fn test_row_major_spawn_order() {
        let mut ids = IdAllocator::new();
        let level = build(&mut ids);
        // The half platform on row 0 is placed before the floor on row 2
        assert_eq!(level.platforms[0].kind, PlatformKind::Upper);
        assert_eq!(level.platforms[0].rect, Rect::new(32, 0, 32, 16));
        assert!(level.platforms[0].id < level.platforms[1].id);
    }

    #[test]
    fn test_gate_stops_being_solid() {
        let mut ids = IdAllocator::new();
        let mut level = build(&mut ids);
        assert_eq!(level.solid_gate_rects().len(), 1);
        level.gates[0].unlock(&mut Effects::new());
        assert!(level.solid_gate_rects().is_empty());
    }

    #[test]
    fn test_resolve_door_searches_all_levels() {
        let mut ids = IdAllocator::new();
        let library = library();
        let mut first = Level::new("a", 320, 320);
        first.doors.push(Door::new(ids.next_id(), 1, 2, &library, (0, 0)));
        let mut second = Level::new("b", 320, 320);
        second.doors.push(Door::new(ids.next_id(), 2, 1, &library, (64, 64)));
        second.doors.push(Door::new(ids.next_id(), 2, 1, &library, (128, 64)));
        let levels = vec![Level::placeholder(), first, second];

        assert_eq!(
            resolve_door(&levels, 1),
            Some(LevelChange {
                level: 1,
                center: (32, 32)
            })
        );
        assert_eq!(
            resolve_door(&levels, 2),
            Some(LevelChange {
                level: 2,
                center: (160, 96)
            })
        );
        assert_eq!(resolve_door(&levels, 3), None);
    }

    #[test]
    fn test_update_collects_pickups_and_particles() {
        let clock = Rc::new(ManualClock::new(0));
        let library = SpriteLibrary::new(clock.clone()).unwrap();
        let mut ids = IdAllocator::new();
        let grid = decode(&spawn_image(), &entity_palette());
        let mut level = Level::from_grid("test", &grid, None, None, &library, 32, &mut ids);

        let mut player = Player::new(ids.next_id(), &library, (0, 0));
        player.place_at((80, 48));
        let mut fx = Effects::new();
        level.update(
            &mut player,
            &Cutscene::new(),
            &mut fastrand::Rng::with_seed(1),
            &mut fx,
        );

        assert!(level.items.is_empty());
        assert_eq!(player.score, 10);
        for spawn in fx.particles.drain(..) {
            level.spawn_particle(spawn, &library, &mut ids);
        }
        assert_eq!(level.particles.len(), 1);

        clock.advance(SheetId::Star.info().frame_ms * 8);
        level.update(
            &mut player,
            &Cutscene::new(),
            &mut fastrand::Rng::with_seed(1),
            &mut Effects::new(),
        );
        assert!(level.particles.is_empty());
    }

    #[test]
    fn test_load_with_missing_layers() {
        let root = std::env::temp_dir().join(format!("ledge-runner-level-{}", std::process::id()));
        let loader = AssetLoader::new(&root);
        let path = loader.resolve_path(AssetType::Level, "level_test.png");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        spawn_image().save(&path).unwrap();

        let mut ids = IdAllocator::new();
        let level = Level::load(&loader, "level_test.png", &library(), 32, &mut ids).unwrap();
        assert_eq!(level.name, "level_test.png");
        assert_eq!(level.doors.len(), 1);
        assert!(level.foreground.is_empty());

        let missing = Level::load(&loader, "nope.png", &library(), 32, &mut ids);
        assert!(missing.is_err());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
