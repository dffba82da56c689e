// Wall-clock sources for animation timing

use std::fmt;
use std::time::Instant;

#[cfg(test)]
use std::cell::Cell;

/// Milliseconds, used for both timestamps and durations
pub type Millis = i64;

/// A source of monotonic millisecond timestamps.
///
/// Timelines query the clock on every read, so animation time keeps flowing
/// even when simulation ticks are skipped.
pub trait Clock: fmt::Debug {
    fn now_ms(&self) -> Millis;
}

/// Real time, measured from when the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock for deterministic tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = clock.now_ms();
        assert!(b >= a + 5);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);
        clock.set(7);
        assert_eq!(clock.now_ms(), 7);
    }
}
