use foundation::time::Time;

/// Nominal animation step: one display refresh at 60 Hz.
pub const DEFAULT_DT_S: f64 = 1.0 / 60.0;

/// Phase advance per rendered frame; drives every pulse and rotation.
pub const DEFAULT_PHASE_STEP: f64 = 0.02;

/// Deterministic frame metadata.
///
/// Frames are counted, not timed: the animation phase depends only on how
/// many frames have been rendered, so a replay of N ticks lands on the same
/// picture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Engine time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}

/// Monotonic frame counter plus the animation phase derived from it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameClock {
    frame: Frame,
    phase: f64,
    phase_step: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_STEP)
    }
}

impl FrameClock {
    pub fn new(phase_step: f64) -> Self {
        Self {
            frame: Frame::new(0, DEFAULT_DT_S),
            phase: 0.0,
            phase_step: phase_step.abs(),
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advances to the next frame and returns the new phase.
    pub fn tick(&mut self) -> f64 {
        self.frame = self.frame.next();
        self.phase += self.phase_step;
        self.phase
    }
}
