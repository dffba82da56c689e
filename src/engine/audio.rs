// Audio contract
//
// Playback itself belongs to the platform layer. The game only asks for
// sounds by handle and never waits on them.

use log::debug;

use super::assets::SoundHandle;

/// Something that can play sounds
pub trait AudioSink {
    /// Play a one-shot effect
    fn play(&mut self, sound: SoundHandle, volume: f32);

    /// Start a music track, replacing whatever music was playing
    fn play_music(&mut self, track: SoundHandle, volume: f32);

    /// Silence everything
    fn stop_all(&mut self);

    /// Freeze every channel
    fn pause_all(&mut self);

    /// Resume frozen channels
    fn resume_all(&mut self);
}

/// Interchangeable recordings of the same sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBank {
    variants: Vec<SoundHandle>,
}

impl SoundBank {
    /// Bank of the sound files at `paths` (relative to the asset root)
    pub fn new(paths: &[&str]) -> Self {
        Self {
            variants: paths.iter().map(|p| SoundHandle::from_path(p)).collect(),
        }
    }

    /// One variant picked at random
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<SoundHandle> {
        if self.variants.is_empty() {
            return None;
        }
        Some(self.variants[rng.usize(..self.variants.len())])
    }

    pub fn variants(&self) -> &[SoundHandle] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Sink that only logs requests
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, sound: SoundHandle, volume: f32) {
        debug!("play {:?} at {:.3}", sound.id(), volume);
    }

    fn play_music(&mut self, track: SoundHandle, volume: f32) {
        debug!("music {:?} at {:.3}", track.id(), volume);
    }

    fn stop_all(&mut self) {
        debug!("stop all audio");
    }

    fn pause_all(&mut self) {
        debug!("pause all audio");
    }

    fn resume_all(&mut self) {
        debug!("resume all audio");
    }
}

/// What a `RecordingSink` was asked to do
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioRequest {
    Play(SoundHandle, f32),
    Music(SoundHandle, f32),
    StopAll,
    PauseAll,
    ResumeAll,
}

/// Sink that remembers every request, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub requests: Vec<AudioRequest>,
}

#[cfg(test)]
impl RecordingSink {
    /// Number of one-shot plays of any variant in `bank`
    pub fn plays_of(&self, bank: &SoundBank) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, AudioRequest::Play(h, _) if bank.variants().contains(h)))
            .count()
    }
}

#[cfg(test)]
impl AudioSink for RecordingSink {
    fn play(&mut self, sound: SoundHandle, volume: f32) {
        self.requests.push(AudioRequest::Play(sound, volume));
    }

    fn play_music(&mut self, track: SoundHandle, volume: f32) {
        self.requests.push(AudioRequest::Music(track, volume));
    }

    fn stop_all(&mut self) {
        self.requests.push(AudioRequest::StopAll);
    }

    fn pause_all(&mut self) {
        self.requests.push(AudioRequest::PauseAll);
    }

    fn resume_all(&mut self) {
        self.requests.push(AudioRequest::ResumeAll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_bank() {
        let bank = SoundBank::new(&["a.ogg", "b.ogg", "c.ogg"]);
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let pick = bank.pick(&mut rng).unwrap();
            assert!(bank.variants().contains(&pick));
        }
    }

    #[test]
    fn test_empty_bank() {
        let bank = SoundBank::new(&[]);
        assert!(bank.is_empty());
        assert_eq!(bank.pick(&mut fastrand::Rng::with_seed(1)), None);
    }

    #[test]
    fn test_recording_sink() {
        let bank = SoundBank::new(&["hit.wav"]);
        let mut sink = RecordingSink::default();
        sink.play(bank.variants()[0], 0.5);
        sink.stop_all();
        assert_eq!(sink.plays_of(&bank), 1);
        assert_eq!(sink.requests[1], AudioRequest::StopAll);
    }
}
