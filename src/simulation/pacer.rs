//! Frame pacing and driver defaults.
//!
//! The solver itself is synchronous; an external animation scheduler
//! decides how many steps to take per displayed frame. [`StepPacer`]
//! implements that policy: a fractional speed multiplier accumulates
//! across frames and each frame runs ⌊accumulator⌋ steps, hard-capped so
//! a stalled tab cannot trigger an unbounded catch-up burst.

use crate::boundary::ChamberConditions;

/// Hard cap on solver steps per displayed frame.
pub const MAX_STEPS_PER_FRAME: usize = 10;

/// Driver-facing parameter set with the default jet configuration.
///
/// These seed the driver's controls, not the solver: the solver consumes
/// them through [`ChamberConditions`] and the per-step CFL argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JetParameters {
    /// Stagnation pressure, Pa.
    pub p_total: f64,
    /// Stagnation temperature, K.
    pub t_total: f64,
    /// Design inlet Mach number.
    pub mach: f64,
    /// Ambient pressure, Pa.
    pub p_ambient: f64,
    /// CFL number handed to each step.
    pub cfl: f64,
    /// Steps-per-frame multiplier.
    pub simulation_speed: f64,
}

impl Default for JetParameters {
    fn default() -> Self {
        Self {
            p_total: 350_000.0,
            t_total: 1000.0,
            mach: 2.0,
            p_ambient: 101_325.0,
            cfl: 0.5,
            simulation_speed: 1.0,
        }
    }
}

impl JetParameters {
    /// The chamber subset of the parameters.
    pub fn chamber(&self) -> ChamberConditions {
        ChamberConditions {
            p_total: self.p_total,
            t_total: self.t_total,
            mach: self.mach,
            p_ambient: self.p_ambient,
        }
    }
}

/// Fractional step accumulator with a per-frame cap.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepPacer {
    accumulator: f64,
}

impl StepPacer {
    /// Create a pacer with an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one frame at the given speed and return how many steps to
    /// run.
    ///
    /// The fractional remainder carries to the next frame. If the
    /// accumulated budget reaches [`MAX_STEPS_PER_FRAME`], the frame is
    /// capped there and the accumulator is dropped to zero, discarding
    /// the backlog.
    pub fn advance(&mut self, speed: f64) -> usize {
        self.accumulator += speed.max(0.0);
        let n = self.accumulator.floor() as usize;
        if n >= MAX_STEPS_PER_FRAME {
            self.accumulator = 0.0;
            MAX_STEPS_PER_FRAME
        } else {
            self.accumulator -= n as f64;
            n
        }
    }

    /// Pending fractional budget.
    pub fn pending(&self) -> f64 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_speed_steps_every_frame() {
        let mut pacer = StepPacer::new();
        for _ in 0..5 {
            assert_eq!(pacer.advance(1.0), 1);
        }
        assert!(pacer.pending() < 1e-12);
    }

    #[test]
    fn test_half_speed_alternates() {
        let mut pacer = StepPacer::new();
        let steps: Vec<usize> = (0..6).map(|_| pacer.advance(0.5)).collect();
        assert_eq!(steps, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_fractional_remainder_carries() {
        let mut pacer = StepPacer::new();
        assert_eq!(pacer.advance(2.5), 2);
        assert!((pacer.pending() - 0.5).abs() < 1e-12);
        assert_eq!(pacer.advance(2.5), 3);
        assert!(pacer.pending() < 1e-12);
    }

    #[test]
    fn test_cap_drops_backlog() {
        let mut pacer = StepPacer::new();
        assert_eq!(pacer.advance(25.0), MAX_STEPS_PER_FRAME);
        // The backlog is discarded, not carried.
        assert_eq!(pacer.pending(), 0.0);
        assert_eq!(pacer.advance(1.0), 1);
    }

    #[test]
    fn test_negative_speed_is_ignored() {
        let mut pacer = StepPacer::new();
        assert_eq!(pacer.advance(-2.0), 0);
        assert_eq!(pacer.pending(), 0.0);
    }

    #[test]
    fn test_default_parameters() {
        let params = JetParameters::default();
        assert_eq!(params.p_total, 350_000.0);
        assert_eq!(params.t_total, 1000.0);
        assert_eq!(params.mach, 2.0);
        assert_eq!(params.p_ambient, 101_325.0);
        assert_eq!(params.cfl, 0.5);
        assert_eq!(params.simulation_speed, 1.0);

        let chamber = params.chamber();
        assert_eq!(chamber, ChamberConditions::default());
    }
}
