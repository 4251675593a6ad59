//! Final-rotation math for a targeted spin.

use rand::Rng;

use crate::{
    FULL_TURN, REFERENCE_TOP_ANGLE,
    config::{RotationDirection, WheelConfig},
    error::{Result, WheelError},
    geometry::{WheelLayout, normalize360},
};

/// Outcome of [`plan_spin`]: the signed rotation that lands `target` under the
/// pointer, plus the intermediate values it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub target: usize,
    pub segment_count: usize,
    pub sweep: f64,
    /// Random displacement inside the slice; `0.0` when stopping centered.
    pub offset: f64,
    /// Rotation within one turn that brings the landing point to the pointer,
    /// in `[0, 360)`.
    pub desired: f64,
    /// Full turns before settling.
    pub spins: f64,
    /// Signed final rotation in degrees, base offset included. Positive is
    /// clockwise.
    pub rotation: f64,
    pub base_offset: f64,
}

impl SpinPlan {
    /// Slice that ends up under the pointer once the wheel rests at
    /// `rotation`.
    pub fn landing_segment(&self) -> usize {
        match WheelLayout::new(self.segment_count) {
            Ok(layout) => layout.segment_under_pointer(self.rotation - self.base_offset),
            Err(_) => self.target,
        }
    }
}

/// Share of the sweep kept clear at each slice edge when jittering.
const EDGE_MARGIN: f64 = 1e-6;

/// Draws a stop offset uniformly from just inside `[-sweep / 2, sweep / 2]`.
///
/// The edges are excluded: an offset of exactly `-sweep / 2` rests the
/// pointer on the boundary owned by the next slice.
pub fn stop_offset<R: Rng>(sweep: f64, rng: &mut R) -> f64 {
    let half = sweep / 2.0 - sweep * EDGE_MARGIN;
    rng.random_range(-half..=half)
}

/// Computes the final rotation that stops `target` under the pointer.
///
/// Deterministic for a given random draw; `rng` is only consulted when the
/// configuration does not stop on the slice center. The result, applied from
/// a rotation of zero, travels `spins` full turns in the configured direction
/// before landing.
pub fn plan_spin<R: Rng>(config: &WheelConfig, target: usize, rng: &mut R) -> Result<SpinPlan> {
    let len = config.segment_count();
    if len == 0 {
        return Err(WheelError::EmptyWheel);
    }
    if target >= len {
        return Err(WheelError::TargetOutOfRange { index: target, len });
    }
    config.validate()?;

    let sweep = FULL_TURN / len as f64;
    let target_center = REFERENCE_TOP_ANGLE + sweep * target as f64;
    let mut desired = normalize360(REFERENCE_TOP_ANGLE - target_center);

    let offset = if config.stop_center_of_segment {
        0.0
    } else {
        stop_offset(sweep, rng)
    };
    desired = normalize360(desired + offset);

    let spins = config.spins();
    // Counter-clockwise travel must cover the complement of `desired` to
    // reach the same resting angle.
    let magnitude = FULL_TURN * spins
        + match config.rotation_direction {
            RotationDirection::Clockwise => desired,
            RotationDirection::CounterClockwise => normalize360(-desired),
        };
    let rotation = config.rotation_direction.sign() * magnitude + config.base_offset_degrees;

    Ok(SpinPlan {
        target,
        segment_count: len,
        sweep,
        offset,
        desired,
        spins,
        rotation,
        base_offset: config.base_offset_degrees,
    })
}
