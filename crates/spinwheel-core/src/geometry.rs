//! Angular layout of the wheel's segments.
//!
//! Everything here is pure. The same [`WheelLayout`] drives the render path,
//! the hit-test mapper and the overlay anchors, so a slice's drawn position and
//! its tappable region can never disagree.

use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    FULL_TURN, REFERENCE_TOP_ANGLE,
    error::{Result, WheelError},
};

/// Reduces an angle in degrees to `[0, 360)`.
///
/// Idempotent for every finite input. Non-finite input yields NaN.
pub fn normalize360(degrees: f64) -> f64 {
    let rem = degrees % FULL_TURN;
    let wrapped = if rem < 0.0 { rem + FULL_TURN } else { rem };
    // A tiny negative remainder rounds up to exactly one turn.
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Point in the wheel's local frame (+x right, +y down).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from the origin along `degrees`.
    pub fn polar(degrees: f64, distance: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(distance * cos, distance * sin)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of the point seen from the origin, in `[0, 360)`.
    pub fn angle(self) -> f64 {
        normalize360(self.y.atan2(self.x).to_degrees())
    }

    /// Rotates around the origin; positive angles turn clockwise on screen.
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Angular layout for a fixed number of segments.
///
/// Slice 0 is centered on [`REFERENCE_TOP_ANGLE`]; later slices follow
/// clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    count: usize,
    sweep: f64,
}

impl WheelLayout {
    pub fn new(segment_count: usize) -> Result<Self> {
        if segment_count == 0 {
            return Err(WheelError::DivisionUndefined);
        }
        Ok(Self {
            count: segment_count,
            sweep: FULL_TURN / segment_count as f64,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.count
    }

    /// Angular width of one slice.
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn slice_start(&self, index: usize) -> f64 {
        REFERENCE_TOP_ANGLE - self.sweep / 2.0 + index as f64 * self.sweep
    }

    pub fn slice_center(&self, index: usize) -> f64 {
        REFERENCE_TOP_ANGLE + index as f64 * self.sweep
    }

    pub fn slice_end(&self, index: usize) -> f64 {
        self.slice_start(index) + self.sweep
    }

    /// Point along the slice's center line at `fraction` of `radius`,
    /// relative to the wheel center.
    pub fn anchor(&self, index: usize, fraction: f64, radius: f64) -> Point {
        Point::polar(self.slice_center(index), radius * fraction)
    }

    /// One anchor per slice, in index order.
    pub fn anchors(&self, fraction: f64, radius: f64) -> impl Iterator<Item = Point> + '_ {
        (0..self.count).map(move |index| self.anchor(index, fraction, radius))
    }

    /// Slice boundaries, one per slice, starting with slice 0's leading edge.
    pub fn separator_angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |index| self.slice_start(index))
    }

    /// `count * (1 + per_slice_extra)` evenly spaced angles starting on slice
    /// 0's leading edge, so every boundary carries a point.
    pub fn corner_point_angles(&self, per_slice_extra: usize) -> impl Iterator<Item = f64> + '_ {
        let total = self.count * (1 + per_slice_extra);
        let step = FULL_TURN / total as f64;
        let first = self.slice_start(0);
        (0..total).map(move |i| first + i as f64 * step)
    }

    /// Index of the slice containing `layout_angle` in the unrotated wheel.
    ///
    /// Boundaries belong to the slice that starts there.
    pub fn segment_at_angle(&self, layout_angle: f64) -> usize {
        let offset = normalize360(layout_angle - self.slice_start(0));
        let index = (offset / self.sweep).floor() as usize;
        index.min(self.count - 1)
    }

    /// Index of the slice under the pointer once the wheel is rotated by
    /// `rotation` degrees.
    pub fn segment_under_pointer(&self, rotation: f64) -> usize {
        self.segment_at_angle(REFERENCE_TOP_ANGLE - rotation)
    }
}

/// Evenly spaced overlay anchors (avatars, badges) on a ring of
/// `ring_radius`, aligned with the slice centers of a `count`-segment wheel.
pub fn avatar_ring(count: usize, ring_radius: f64) -> Vec<Point> {
    WheelLayout::new(count)
        .map(|layout| layout.anchors(1.0, ring_radius).collect())
        .unwrap_or_default()
}
