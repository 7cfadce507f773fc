//! Frame timing with smoothed FPS reporting.

use web_time::Instant;

/// Tracks per-frame delta time and a smoothed frames-per-second figure.
#[derive(Debug)]
pub struct FrameTiming {
    /// Last frame timestamp.
    last_frame: Instant,
    /// Smoothed FPS using an exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother).
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Create a frame timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance to the next frame, returning the elapsed delta time in
    /// seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        dt
    }

    /// Current smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_measures_elapsed_time() {
        let mut timing = FrameTiming::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let dt = timing.tick();
        assert!(dt >= 0.01);
        assert!(dt < 1.0);
    }

    #[test]
    fn test_fps_stays_finite() {
        let mut timing = FrameTiming::new();
        for _ in 0..5 {
            let _ = timing.tick();
        }
        assert!(timing.fps().is_finite());
        assert!(timing.fps() > 0.0);
    }
}
