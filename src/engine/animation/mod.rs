// Time-based sprite animation
//
// - `clock`: wall-clock sources the timelines read from
// - `timeline`: frame sequencing with play/pause/stop, looping and rate
// - `sheet`: sprite-sheet grid slicing and frame handles

mod clock;
mod sheet;
mod timeline;

#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{Clock, Millis, SystemClock};
pub use sheet::{FrameRef, SheetLayout};
pub use timeline::{find_frame, PlaybackState, Timeline};

/// Invalid animation parameters. These come from authoring data, so they are
/// reported at construction time instead of being patched up at runtime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Timeline needs at least one frame")]
    EmptySequence,

    #[error("Frame {index} has non-positive duration {duration}ms")]
    NonPositiveDuration { index: usize, duration: Millis },

    #[error("Playback rate must be positive and finite, got {0}")]
    InvalidRate(f64),

    #[error("Sprite sheet grid must be at least 1x1, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NonPositiveDuration {
            index: 2,
            duration: 0,
        };
        assert_eq!(err.to_string(), "Frame 2 has non-positive duration 0ms");
        assert_eq!(
            ConfigError::EmptySequence.to_string(),
            "Timeline needs at least one frame"
        );
    }
}
