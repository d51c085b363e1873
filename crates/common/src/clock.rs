//! Frame timing utilities.
//!
//! Keypoint frames carry timestamps in seconds since the start of the
//! source. The analysis core only wants the elapsed time since the previous
//! frame, so this module provides:
//! - Converting frame timestamps into per-frame elapsed time
//! - Decimating a stream to a lower target frame rate

/// Turns a sequence of frame timestamps into elapsed-time deltas.
///
/// The first frame has no predecessor, so it is assigned `1 / fps`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Delta reported for the first frame.
    first_frame_delta: f64,

    /// Timestamp of the previously ticked frame.
    last_timestamp_secs: Option<f64>,
}

impl FrameClock {
    /// Create a clock for a source running at `fps`.
    pub fn new(fps: f64) -> Self {
        Self {
            first_frame_delta: 1.0 / fps,
            last_timestamp_secs: None,
        }
    }

    /// Elapsed seconds since the previous frame, advancing the clock.
    ///
    /// Out-of-order timestamps yield a non-positive delta; callers treat
    /// that as "no usable elapsed time" rather than an error.
    pub fn tick(&mut self, timestamp_secs: f64) -> f64 {
        let delta = match self.last_timestamp_secs {
            None => self.first_frame_delta,
            Some(last) => timestamp_secs - last,
        };
        if delta <= 0.0 {
            tracing::debug!(timestamp_secs, delta, "non-increasing frame timestamp");
        }
        self.last_timestamp_secs = Some(timestamp_secs);
        delta
    }
}

/// Keeps every N-th frame so a source approximates a target frame rate.
#[derive(Debug)]
pub struct FrameDecimator {
    step: usize,
    seen: usize,
}

impl FrameDecimator {
    /// Create a decimator from a source rate to a target rate.
    ///
    /// A missing or non-positive target keeps every frame.
    pub fn new(source_fps: f64, target_fps: Option<f64>) -> Self {
        let step = match target_fps {
            Some(target) if target > 0.0 && source_fps > 0.0 => {
                ((source_fps / target).round() as usize).max(1)
            }
            _ => 1,
        };
        Self { step, seen: 0 }
    }

    /// Returns true if the next frame should be kept.
    pub fn should_keep(&mut self) -> bool {
        let keep = self.seen % self.step == 0;
        self.seen += 1;
        keep
    }

    /// Number of source frames per kept frame.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Effective output frame rate for a given source rate.
    pub fn effective_fps(&self, source_fps: f64) -> f64 {
        source_fps / self.step as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_uses_frame_rate() {
        let mut clock = FrameClock::new(25.0);
        assert!((clock.tick(3.0) - 0.04).abs() < 1e-12);
        assert!((clock.tick(3.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_subsequent_ticks_use_timestamps() {
        let mut clock = FrameClock::new(30.0);
        clock.tick(0.0);
        assert!((clock.tick(0.5) - 0.5).abs() < 1e-12);
        assert!((clock.tick(0.75) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_backwards_timestamp_gives_negative_delta() {
        let mut clock = FrameClock::new(30.0);
        clock.tick(1.0);
        assert!(clock.tick(0.5) < 0.0);
    }

    #[test]
    fn test_decimator_step() {
        let mut dec = FrameDecimator::new(60.0, Some(30.0));
        assert_eq!(dec.step(), 2);
        let kept: Vec<bool> = (0..4).map(|_| dec.should_keep()).collect();
        assert_eq!(kept, vec![true, false, true, false]);
        assert!((dec.effective_fps(60.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_decimator_without_target_keeps_all() {
        let mut dec = FrameDecimator::new(30.0, None);
        assert!((0..5).all(|_| dec.should_keep()));

        let upsample = FrameDecimator::new(30.0, Some(120.0));
        assert_eq!(upsample.step(), 1);
    }
}
