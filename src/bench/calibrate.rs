//! Calibration: scale a pattern's loop count to the target wall-clock budget.

use crate::surface::{ScreenGeometry, Surface};

use super::constants::{CALIBRATION_LOOPS, MIN_CALIBRATION_NS, TARGET_RUNTIME_SECS};
use super::{Measurement, Pattern};

/// Loop count whose runtime extrapolates to the target duration, given that
/// `CALIBRATION_LOOPS` iterations took `calibration_ns`.
///
/// Implausibly small calibration timings (clock-resolution artifacts or an
/// inlined no-op) are floored before extrapolating, and the result is
/// clamped to something the loop counter can hold.
pub fn scale_loops(calibration_ns: i64) -> u32 {
    let ns = calibration_ns.max(MIN_CALIBRATION_NS) as u128;
    let loops = TARGET_RUNTIME_SECS as u128 * 1_000_000_000 * CALIBRATION_LOOPS as u128 / ns;
    loops.clamp(1, u32::MAX as u128) as u32
}

/// Calibrate `pattern`, then run and return its production pass.
///
/// The calibration pass's own measurement is discarded.
pub fn run_calibrated(
    pattern: &Pattern,
    geometry: &ScreenGeometry,
    fb: &mut Surface,
) -> Measurement {
    let calibration = (pattern.run)(CALIBRATION_LOOPS, geometry, fb);
    let loops = scale_loops(calibration.elapsed_ns);
    (pattern.run)(loops, geometry, fb)
}
