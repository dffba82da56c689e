// Sound effect and music catalog

use std::collections::HashMap;

use crate::engine::assets::SoundHandle;
use crate::engine::audio::{AudioSink, SoundBank};

/// One-shot effects the game requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Step,
    Attack,
    PlayerHit,
    EnemyHit,
    SnakeDeath,
    RatDeath,
    Coin,
    Key,
    Heart,
    DoorOpen,
    DoorClose,
    GateUnlock,
    GateOpen,
    Pause,
    Unpause,
}

impl SoundCue {
    pub const ALL: [SoundCue; 15] = [
        SoundCue::Step,
        SoundCue::Attack,
        SoundCue::PlayerHit,
        SoundCue::EnemyHit,
        SoundCue::SnakeDeath,
        SoundCue::RatDeath,
        SoundCue::Coin,
        SoundCue::Key,
        SoundCue::Heart,
        SoundCue::DoorOpen,
        SoundCue::DoorClose,
        SoundCue::GateUnlock,
        SoundCue::GateOpen,
        SoundCue::Pause,
        SoundCue::Unpause,
    ];

    /// Sound files for this cue, relative to the asset root
    pub fn files(&self) -> &'static [&'static str] {
        match self {
            SoundCue::Step => &[
                "sounds/entities/player/footstep00.ogg",
                "sounds/entities/player/footstep01.ogg",
                "sounds/entities/player/footstep02.ogg",
                "sounds/entities/player/footstep03.ogg",
                "sounds/entities/player/footstep04.ogg",
                "sounds/entities/player/footstep05.ogg",
                "sounds/entities/player/footstep06.ogg",
                "sounds/entities/player/footstep07.ogg",
                "sounds/entities/player/footstep08.ogg",
                "sounds/entities/player/footstep09.ogg",
            ],
            SoundCue::Attack => &["sounds/entities/player/attack1.wav"],
            SoundCue::PlayerHit => &["sounds/entities/player/hit.wav"],
            SoundCue::EnemyHit => &["sounds/entities/enemies/hit.wav"],
            SoundCue::SnakeDeath => &["sounds/entities/enemies/snake_death.ogg"],
            SoundCue::RatDeath => &["sounds/entities/enemies/rat_death.ogg"],
            SoundCue::Coin => &["sounds/entities/items/coin.wav"],
            SoundCue::Key => &["sounds/entities/items/key.wav"],
            SoundCue::Heart => &["sounds/entities/items/heart.wav"],
            SoundCue::DoorOpen => &[
                "sounds/entities/doors/open0.ogg",
                "sounds/entities/doors/open1.ogg",
            ],
            SoundCue::DoorClose => &[
                "sounds/entities/doors/close0.ogg",
                "sounds/entities/doors/close1.ogg",
                "sounds/entities/doors/close2.ogg",
                "sounds/entities/doors/close3.ogg",
            ],
            SoundCue::GateUnlock => &["sounds/entities/objects/gate_unlock.ogg"],
            SoundCue::GateOpen => &["sounds/entities/objects/gate_open.ogg"],
            SoundCue::Pause => &["sounds/ui/pause_in.wav"],
            SoundCue::Unpause => &["sounds/ui/pause_out.wav"],
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicCue {
    Main,
    GameOver,
    Win,
}

impl MusicCue {
    pub fn file(&self) -> &'static str {
        match self {
            MusicCue::Main => "sounds/music/main.ogg",
            MusicCue::GameOver => "sounds/music/gameover.ogg",
            MusicCue::Win => "sounds/music/win.ogg",
        }
    }

    /// Volume relative to full scale. The jingles are louder than the loop.
    pub fn volume(&self, base: f32) -> f32 {
        match self {
            MusicCue::Main => base,
            MusicCue::GameOver | MusicCue::Win => base * 3.0,
        }
    }

    pub fn handle(&self) -> SoundHandle {
        SoundHandle::from_path(self.file())
    }
}

/// Resolves cues to concrete sounds and forwards them to a sink
#[derive(Debug)]
pub struct SoundLibrary {
    banks: HashMap<SoundCue, SoundBank>,
    rng: fastrand::Rng,
    effect_volume: f32,
    music_volume: f32,
}

impl SoundLibrary {
    pub fn new(effect_volume: f32, music_volume: f32, rng: fastrand::Rng) -> Self {
        let banks = SoundCue::ALL
            .iter()
            .map(|&cue| (cue, SoundBank::new(cue.files())))
            .collect();

        Self {
            banks,
            rng,
            effect_volume,
            music_volume,
        }
    }

    pub fn bank(&self, cue: SoundCue) -> Option<&SoundBank> {
        self.banks.get(&cue)
    }

    /// Play a random variant of `cue`
    pub fn play(&mut self, cue: SoundCue, sink: &mut dyn AudioSink) {
        let Some(bank) = self.banks.get(&cue) else {
            return;
        };
        if let Some(sound) = bank.pick(&mut self.rng) {
            sink.play(sound, self.effect_volume);
        }
    }

    pub fn play_music(&self, cue: MusicCue, sink: &mut dyn AudioSink) {
        sink.play_music(cue.handle(), cue.volume(self.music_volume));
    }
}
