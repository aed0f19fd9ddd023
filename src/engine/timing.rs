use std::time::Instant;

/// Smoothed FPS tracking for the overlay readout.
pub(crate) struct FrameTiming {
    last_frame: Instant,
    /// Exponential moving average of the instantaneous FPS.
    smoothed_fps: f32,
    smoothing: f32,
}

impl FrameTiming {
    pub(crate) fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call once per presented frame.
    pub(crate) fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    pub(crate) fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
