/// Frame pacing for the main loop
///
/// One simulation tick runs per rendered frame. The limiter sleeps away
/// whatever is left of the frame budget and reports how long the previous
/// frame really took.
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame-rate cap and timing state
#[derive(Debug)]
pub struct FrameLimiter {
    /// Minimum wall time per frame
    budget: Duration,

    /// Time the previous frame ended
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameLimiter {
    /// Create a limiter capped at `target_fps` (0 means uncapped)
    pub fn new(target_fps: u32) -> Self {
        let budget = if target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / target_fps as f64)
        };

        Self {
            budget,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Sleep until the frame budget is used up, then return the elapsed frame
    /// time in whole milliseconds
    pub fn tick(&mut self) -> i64 {
        let spent = self.last_frame_time.elapsed();
        if spent < self.budget {
            std::thread::sleep(self.budget - spent);
        }

        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.record(frame_time);

        frame_time.as_millis() as i64
    }

    fn record(&mut self, frame_time: Duration) {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg = total.as_secs_f32() / self.frame_times.len() as f32;

        self.current_fps = if avg > 0.0 { 1.0 / avg } else { 0.0 };
    }

    /// Minimum time per frame
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Rolling FPS estimate
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames ticked
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_budget_from_fps() {
        let limiter = FrameLimiter::new(120);
        assert_relative_eq!(limiter.budget().as_secs_f64(), 1.0 / 120.0, epsilon = 1e-9);
        assert_eq!(FrameLimiter::new(0).budget(), Duration::ZERO);
    }

    #[test]
    fn test_tick_respects_cap() {
        let mut limiter = FrameLimiter::new(100);
        let dt = limiter.tick();
        assert!(dt >= 10, "frame took {dt}ms");
        assert_eq!(limiter.frame_count(), 1);
    }

    #[test]
    fn test_fps_estimate() {
        let mut limiter = FrameLimiter::new(0);
        for _ in 0..10 {
            limiter.record(Duration::from_millis(20));
        }
        assert_relative_eq!(limiter.fps(), 50.0, epsilon = 0.01);
    }
}
