//! Platform glue shared by drivers
//!
//! - Fixed timestep accumulator with a substep cap
//! - One-shot input latching between frames and ticks
//! - Quit requests honoured only at tick boundaries

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

/// Longest frame the accumulator will accept (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Collects device input between ticks
///
/// Held keys persist until released. Presses are latched until the next tick
/// consumes them, so a press shorter than a tick is never lost and never
/// repeats across substeps.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    input: TickInput,
    quit: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update held direction and fire keys
    pub fn set_held(&mut self, left: bool, right: bool, fire: bool) {
        self.input.left = left;
        self.input.right = right;
        self.input.fire_held = fire;
    }

    pub fn press_fire(&mut self) {
        self.input.fire = true;
    }

    pub fn press_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn press_start(&mut self) {
        self.input.start = true;
    }

    pub fn press_restart(&mut self) {
        self.input.restart = true;
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Input for the next tick; clears one-shot presses
    pub fn take(&mut self) -> TickInput {
        let input = self.input.clone();
        self.input.fire = false;
        self.input.pause = false;
        self.input.start = false;
        self.input.restart = false;
        input
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
    ticks: u64,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total ticks run by this stepper
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Leftover time not yet simulated, as a fraction of a tick
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    /// Feed one frame of wall time and run as many ticks as it covers
    ///
    /// Returns the number of ticks run. A pending quit request stops the loop
    /// before the next tick starts.
    pub fn advance(&mut self, frame_dt: f32, state: &mut GameState, latch: &mut InputLatch) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if latch.quit_requested() {
                break;
            }
            let input = latch.take();
            tick(state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;
        }

        // Drop the backlog once the cap is hit instead of carrying it forward
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
