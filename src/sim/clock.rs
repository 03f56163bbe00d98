//! Fixed-step clock
//!
//! Hosts deliver frames at whatever rate they manage; the simulation only
//! ever advances in whole `SIM_DT` steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's worth of time and return how many ticks to run
    ///
    /// Long frames are clamped to `MAX_FRAME_DT` and at most `MAX_SUBSTEPS`
    /// ticks run per frame; leftover time beyond one step is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
