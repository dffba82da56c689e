// Time-windowed cutscene overlay
//
// A cutscene freezes player input and drives a black screen fade. It is
// polled every tick against its elapsed time rather than run as a coroutine.

use log::{debug, warn};

use crate::engine::animation::Millis;

/// Which cutscene is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutsceneKind {
    DoorTransition,
    GateUnlock,
}

/// A fade window: `len` milliseconds starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fade {
    pub start: Millis,
    pub len: Millis,
}

impl Fade {
    pub const NONE: Fade = Fade { start: 0, len: 0 };

    pub const fn new(start: Millis, len: Millis) -> Self {
        Self { start, len }
    }

    pub fn is_none(&self) -> bool {
        self.len <= 0
    }

    /// 0 at `start`, 255 at `start + len`
    fn ramp(&self, elapsed: Millis) -> u8 {
        let progress = (elapsed - self.start).clamp(0, self.len);
        (progress * 255 / self.len) as u8
    }
}

/// Parameters for starting a cutscene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutsceneRequest {
    pub kind: CutsceneKind,
    /// Requested length; `None` runs until ended explicitly
    pub duration: Option<Millis>,
    /// Screen goes dark over this window
    pub fade_out: Fade,
    /// Screen comes back over this window. A start of 0 means "end at the
    /// cutscene's end".
    pub fade_in: Fade,
}

impl CutsceneRequest {
    /// Fade out, switch level in the dark, fade back in
    pub const DOOR: CutsceneRequest = CutsceneRequest {
        kind: CutsceneKind::DoorTransition,
        duration: None,
        fade_out: Fade::new(200, 200),
        fade_in: Fade::new(500, 200),
    };

    /// Input freeze while the gate animates open
    pub const GATE: CutsceneRequest = CutsceneRequest {
        kind: CutsceneKind::GateUnlock,
        duration: Some(500),
        fade_out: Fade::NONE,
        fade_in: Fade::NONE,
    };
}

/// The single active cutscene slot. Starting a new one replaces the old.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cutscene {
    kind: Option<CutsceneKind>,
    elapsed: Millis,
    duration: Option<Millis>,
    fade_out: Fade,
    fade_in: Fade,
}

impl Cutscene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `request`. Returns false and leaves no cutscene running if any
    /// fade parameter is negative.
    ///
    /// The cutscene lasts at least as long as all fade parameters summed.
    pub fn start(&mut self, request: CutsceneRequest) -> bool {
        self.end();

        let CutsceneRequest {
            kind,
            duration,
            fade_out,
            fade_in,
        } = request;

        if [fade_out.start, fade_out.len, fade_in.start, fade_in.len]
            .iter()
            .any(|&v| v < 0)
        {
            warn!("Refusing to start {:?} cutscene with negative fades", kind);
            return false;
        }

        let fade_time = fade_out.start + fade_out.len + fade_in.start + fade_in.len;
        let duration = duration.unwrap_or(0).max(0).max(fade_time);

        let mut fade_in = fade_in;
        if !fade_in.is_none() && fade_in.start == 0 {
            fade_in.start = duration - fade_in.len;
        }

        self.kind = Some(kind);
        self.duration = (duration > 0).then_some(duration);
        self.fade_out = fade_out;
        self.fade_in = fade_in;
        debug!("Cutscene {:?} started ({:?} ms)", kind, self.duration);
        true
    }

    /// Advance by `dt` milliseconds, ending the cutscene once past its
    /// duration
    pub fn update(&mut self, dt: Millis) {
        if self.kind.is_none() {
            return;
        }
        self.elapsed += dt;
        if let Some(duration) = self.duration {
            if self.elapsed > duration {
                self.end();
            }
        }
    }

    pub fn end(&mut self) {
        if let Some(kind) = self.kind {
            debug!("Cutscene {:?} ended at {} ms", kind, self.elapsed);
        }
        *self = Self::default();
    }

    pub fn in_progress(&self) -> bool {
        self.kind.is_some()
    }

    pub fn kind(&self) -> Option<CutsceneKind> {
        self.kind
    }

    /// Milliseconds since start, 0 when idle
    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn duration(&self) -> Option<Millis> {
        self.duration
    }

    /// Overlay opacity: clear before the fade-out, ramping to black across
    /// it, black until the fade-in, ramping back to clear across it
    pub fn alpha(&self) -> u8 {
        if !self.in_progress() {
            return 0;
        }
        let elapsed = self.elapsed;

        if !self.fade_in.is_none() && elapsed >= self.fade_in.start {
            return 255 - self.fade_in.ramp(elapsed);
        }
        if !self.fade_out.is_none() && elapsed >= self.fade_out.start {
            return self.fade_out.ramp(elapsed);
        }
        0
    }
}
