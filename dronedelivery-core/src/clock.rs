use crate::tuning::FRAME_UNIT_MS;

/// Frame scheduler state. While scheduled, each `tick` yields the time since
/// the previous tick measured in 60 Hz frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_frame_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm the loop; the reference time is resampled so no gap is counted.
    pub fn start(&mut self, now_ms: f64) {
        self.last_frame_ms = Some(now_ms);
    }

    /// Cancel any pending frame.
    pub fn stop(&mut self) {
        self.last_frame_ms = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.last_frame_ms.is_some()
    }

    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let last = self.last_frame_ms.as_mut()?;
        // Timestamps are monotonic; a clock that steps back counts as no time.
        let delta = ((now_ms - *last) / FRAME_UNIT_MS).max(0.0);
        *last = now_ms;
        Some(delta as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_normalized_to_sixty_hertz() {
        let mut clock = FrameClock::new();
        clock.start(1000.0);
        let delta = clock.tick(1000.0 + 1000.0 / 60.0).unwrap();
        assert!((delta - 1.0).abs() < 1e-5);

        // A 30 Hz frame counts double.
        let delta = clock.tick(1000.0 + 3000.0 / 60.0).unwrap();
        assert!((delta - 2.0).abs() < 1e-5);
    }

    #[test]
    fn stopped_clock_yields_no_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(16.0), None);
        clock.start(0.0);
        clock.stop();
        assert!(!clock.is_scheduled());
        assert_eq!(clock.tick(16.0), None);
    }

    #[test]
    fn restart_discards_paused_gap() {
        let mut clock = FrameClock::new();
        clock.start(0.0);
        clock.tick(100.0);
        clock.stop();
        clock.start(60_000.0);
        let delta = clock.tick(60_000.0 + 1000.0 / 60.0).unwrap();
        assert!(delta < 1.01);
    }
}
