//! Progress ratio and ring geometry for limited mode.
//!
//! Derived from the counter state on every render; never persisted.

use super::model::{CounterState, Mode};
use std::f64::consts::PI;

/// Outer radius of the ring, in pixels.
pub const RING_RADIUS: f64 = 60.0;
/// Stroke width of the ring, in pixels.
pub const RING_STROKE: f64 = 6.0;

/// Fraction of the ceiling consumed, clamped to `[0, 1]`.
///
/// Always 0 in unlimited mode. A ceiling of 0 counts as fully consumed.
pub fn progress_ratio(state: &CounterState) -> f64 {
    if state.mode != Mode::Limited {
        return 0.0;
    }
    if state.max_limit == 0 {
        return 1.0;
    }
    (f64::from(state.count) / f64::from(state.max_limit)).clamp(0.0, 1.0)
}

/// SVG-style geometry for the circular progress indicator.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RingGeometry {
    pub radius: f64,
    pub stroke: f64,
    pub normalized_radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
    pub ratio: f64,
}

impl RingGeometry {
    /// Geometry for a given ratio; out-of-range ratios are clamped.
    pub fn for_ratio(ratio: f64) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        let normalized_radius = RING_RADIUS - RING_STROKE * 0.5;
        let circumference = 2.0 * PI * normalized_radius;
        Self {
            radius: RING_RADIUS,
            stroke: RING_STROKE,
            normalized_radius,
            circumference,
            dash_offset: circumference - ratio * circumference,
            ratio,
        }
    }

    /// Ring for the state, or `None` outside limited mode.
    pub fn for_state(state: &CounterState) -> Option<Self> {
        (state.mode == Mode::Limited).then(|| Self::for_ratio(progress_ratio(state)))
    }
}
