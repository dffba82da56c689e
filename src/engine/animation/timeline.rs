// Wall-clock driven frame timeline

use std::fmt;
use std::rc::Rc;

use super::clock::{Clock, Millis};
use super::ConfigError;

/// Playback state of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// Immutable frame data shared between copies of a timeline
struct Track<H> {
    handles: Vec<H>,
    durations: Vec<Millis>,
    /// When each frame begins. One entry longer than `handles`; the last entry
    /// is the total duration.
    start_times: Vec<Millis>,
}

/// An ordered sequence of `(frame, duration)` pairs resolved against a clock.
///
/// Elapsed time is never accumulated tick by tick. It is recomputed from the
/// clock on every query as `base_elapsed + (now - anchor) * rate` while
/// playing, and frozen at `base_elapsed` while paused.
pub struct Timeline<H> {
    track: Rc<Track<H>>,
    clock: Rc<dyn Clock>,
    state: PlaybackState,
    looping: bool,
    rate: f64,
    visible: bool,
    /// Wall-clock time at which `base_elapsed` was valid
    anchor: Millis,
    /// Unscaled-by-wrap elapsed milliseconds at `anchor`
    base_elapsed: f64,
}

impl<H> Timeline<H> {
    /// Create a stopped timeline.
    ///
    /// Fails if `frames` is empty or any duration is not positive.
    pub fn new(
        frames: Vec<(H, Millis)>,
        looping: bool,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::EmptySequence);
        }

        let mut handles = Vec::with_capacity(frames.len());
        let mut durations = Vec::with_capacity(frames.len());
        let mut start_times = Vec::with_capacity(frames.len() + 1);
        start_times.push(0);

        for (index, (handle, duration)) in frames.into_iter().enumerate() {
            if duration <= 0 {
                return Err(ConfigError::NonPositiveDuration { index, duration });
            }
            let last = start_times[start_times.len() - 1];
            start_times.push(last + duration);
            handles.push(handle);
            durations.push(duration);
        }

        Ok(Self {
            track: Rc::new(Track {
                handles,
                durations,
                start_times,
            }),
            clock,
            state: PlaybackState::Stopped,
            looping,
            rate: 1.0,
            visible: true,
            anchor: 0,
            base_elapsed: 0.0,
        })
    }

    /// Create a timeline where every frame lasts `frame_time` milliseconds
    pub fn uniform(
        handles: Vec<H>,
        frame_time: Millis,
        looping: bool,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let frames = handles.into_iter().map(|h| (h, frame_time)).collect();
        Self::new(frames, looping, clock)
    }

    /// A stopped copy that shares this timeline's frames but keeps its own
    /// playback state
    pub fn share(&self) -> Self {
        Self {
            track: Rc::clone(&self.track),
            clock: Rc::clone(&self.clock),
            state: PlaybackState::Stopped,
            looping: self.looping,
            rate: self.rate,
            visible: true,
            anchor: 0,
            base_elapsed: 0.0,
        }
    }

    // --- Playback control ---

    /// Start or resume playback at the current clock time
    pub fn play(&mut self) {
        let now = self.clock.now_ms();
        self.play_at(now);
    }

    /// Start or resume playback as if `play` had been called at `at`.
    ///
    /// From `Stopped` playback restarts at frame 0. From `Paused` it resumes
    /// where it was frozen. A finished one-shot timeline restarts from the
    /// beginning.
    pub fn play_at(&mut self, at: Millis) {
        match self.state {
            PlaybackState::Playing => {
                if self.is_finished() {
                    self.restart_at(at);
                }
            }
            PlaybackState::Stopped => self.restart_at(at),
            PlaybackState::Paused => {
                if self.is_finished() {
                    self.restart_at(at);
                } else {
                    self.anchor = at;
                }
            }
        }
        self.state = PlaybackState::Playing;
    }

    /// Freeze on the current frame
    pub fn pause(&mut self) {
        let now = self.clock.now_ms();
        self.pause_at(now);
    }

    /// Freeze on the frame showing at `at`. Pausing a stopped timeline parks it
    /// on frame 0; pausing twice is a no-op.
    pub fn pause_at(&mut self, at: Millis) {
        match self.state {
            PlaybackState::Paused => return,
            PlaybackState::Playing => {
                self.base_elapsed = self.raw_elapsed_at(at);
                self.anchor = at;
            }
            PlaybackState::Stopped => self.restart_at(at),
        }
        self.state = PlaybackState::Paused;
    }

    /// Reset to frame 0 and stop
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Stopped {
            return;
        }
        self.state = PlaybackState::Stopped;
        self.base_elapsed = 0.0;
    }

    /// Pause if playing, otherwise play
    pub fn toggle_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    // --- Seeking ---

    /// Jump to `ms` into the timeline. Looping timelines wrap, one-shots clamp
    /// to `[0, total_duration]`. A timeline that is not playing ends up paused.
    pub fn seek_to_time(&mut self, ms: Millis) {
        let target = self.bound_elapsed(ms);
        let now = self.clock.now_ms();

        self.base_elapsed = target as f64;
        self.anchor = now;

        if self.state != PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Jump to the start of frame `n`. Looping timelines wrap the index,
    /// one-shots clamp it to the valid range.
    pub fn seek_to_frame(&mut self, n: i64) {
        let count = self.frame_count() as i64;
        let index = if self.looping {
            n.rem_euclid(count)
        } else {
            n.clamp(0, count - 1)
        };
        let start = self.track.start_times[index as usize];
        self.seek_to_time(start);
    }

    /// Move forward `jump` frames (backward if negative)
    pub fn next_frame(&mut self, jump: i64) {
        let current = self.current_index() as i64;
        self.seek_to_frame(current + jump);
    }

    /// Move backward `jump` frames (forward if negative)
    pub fn prev_frame(&mut self, jump: i64) {
        self.next_frame(-jump);
    }

    /// Step back `ms`, or to the very beginning when `None`
    pub fn rewind(&mut self, ms: Option<Millis>) {
        match ms {
            Some(ms) => {
                let elapsed = self.elapsed();
                self.seek_to_time(elapsed - ms);
            }
            None => self.seek_to_time(0),
        }
    }

    /// Step forward `ms`, or to the very end when `None`
    pub fn fast_forward(&mut self, ms: Option<Millis>) {
        match ms {
            Some(ms) => {
                let elapsed = self.elapsed();
                self.seek_to_time(elapsed + ms);
            }
            None => self.seek_to_time(self.total_duration()),
        }
    }

    // --- Settings ---

    /// Change the playback rate. Elapsed time is preserved across the change.
    pub fn set_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::InvalidRate(rate));
        }
        if self.state == PlaybackState::Playing {
            let now = self.clock.now_ms();
            self.base_elapsed = self.raw_elapsed_at(now);
            self.anchor = now;
        }
        self.rate = rate;
        Ok(())
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Toggle looping. Turning looping off mid-playback re-anchors so the
    /// remaining frames play out once instead of the timeline ending at once.
    pub fn set_looping(&mut self, looping: bool) {
        if self.looping && !looping && self.state != PlaybackState::Stopped {
            let now = self.clock.now_ms();
            self.base_elapsed = self.elapsed_at(now) as f64;
            self.anchor = now;
        }
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // --- Queries ---

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Milliseconds into the timeline, wrapped (looping) or clamped (one-shot)
    pub fn elapsed(&self) -> Millis {
        self.elapsed_at(self.clock.now_ms())
    }

    /// True iff the timeline does not loop and has played through every frame
    pub fn is_finished(&self) -> bool {
        !self.looping && self.elapsed() >= self.total_duration()
    }

    /// Index of the frame showing right now
    pub fn current_index(&self) -> usize {
        find_frame(&self.track.start_times, self.elapsed())
    }

    /// The frame showing right now
    pub fn current_frame(&self) -> &H {
        &self.track.handles[self.current_index()]
    }

    /// The frame to hand to the renderer, if anything should be drawn
    pub fn frame_to_draw(&self) -> Option<&H> {
        if !self.visible || self.state == PlaybackState::Stopped || self.is_finished() {
            return None;
        }
        Some(self.current_frame())
    }

    /// Frame `index`, ignoring playback state
    pub fn frame(&self, index: usize) -> Option<&H> {
        self.track.handles.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.track.handles.len()
    }

    pub fn durations(&self) -> &[Millis] {
        &self.track.durations
    }

    pub fn start_times(&self) -> &[Millis] {
        &self.track.start_times
    }

    pub fn total_duration(&self) -> Millis {
        self.track.start_times[self.track.start_times.len() - 1]
    }

    // --- Internals ---

    fn restart_at(&mut self, at: Millis) {
        self.base_elapsed = 0.0;
        self.anchor = at;
    }

    fn raw_elapsed_at(&self, now: Millis) -> f64 {
        match self.state {
            PlaybackState::Stopped => 0.0,
            PlaybackState::Playing => self.base_elapsed + (now - self.anchor) as f64 * self.rate,
            PlaybackState::Paused => self.base_elapsed,
        }
    }

    fn elapsed_at(&self, now: Millis) -> Millis {
        let raw = self.raw_elapsed_at(now).floor() as Millis;
        self.bound_elapsed(raw)
    }

    fn bound_elapsed(&self, ms: Millis) -> Millis {
        let total = self.total_duration();
        if self.looping {
            ms.rem_euclid(total)
        } else {
            ms.clamp(0, total)
        }
    }
}

impl<H> Clone for Timeline<H> {
    fn clone(&self) -> Self {
        Self {
            track: Rc::clone(&self.track),
            clock: Rc::clone(&self.clock),
            state: self.state,
            looping: self.looping,
            rate: self.rate,
            visible: self.visible,
            anchor: self.anchor,
            base_elapsed: self.base_elapsed,
        }
    }
}

impl<H> fmt::Debug for Timeline<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("frames", &self.frame_count())
            .field("total_duration", &self.total_duration())
            .field("state", &self.state)
            .field("looping", &self.looping)
            .field("rate", &self.rate)
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

/// Index of the frame active at `target` milliseconds.
///
/// `start_times` is the monotonic cumulative start array (first entry 0, last
/// entry the total duration). Returns the greatest `i` with
/// `start_times[i] <= target`, and the last frame for targets at or past the end.
pub fn find_frame(start_times: &[Millis], target: Millis) -> usize {
    if start_times.len() < 2 {
        return 0;
    }

    let last_frame = start_times.len() - 2;
    if target >= start_times[start_times.len() - 1] {
        return last_frame;
    }

    start_times
        .partition_point(|&start| start <= target)
        .saturating_sub(1)
        .min(last_frame)
}
