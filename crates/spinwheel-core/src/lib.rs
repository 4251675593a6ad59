//! Geometry and spin-targeting engine for segmented prize wheels.
//!
//! The crate computes everything a host UI needs to draw and animate a wheel
//! that stops with a chosen segment under a fixed pointer:
//!
//! - [`geometry`]: per-segment angular layout and anchor points.
//! - [`spin`]: the final rotation that lands a target segment under the pointer.
//! - [`wheel`]: the rotation state machine (idle → rotating → completed/canceled).
//! - [`hit_test`]: mapping taps in the wheel frame back to segment indices.
//! - [`render`]: ordered draw primitives for the host's 2D surface.
//!
//! Angles are in degrees in a screen frame (+x right, +y down), measured
//! clockwise from +x. The pointer sits at [`REFERENCE_TOP_ANGLE`]. Nothing here
//! performs I/O; time is supplied by the host through [`Wheel::advance`].

pub mod config;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod hit_test;
pub mod render;
pub mod segment;
pub mod spin;
pub mod wheel;

pub use config::{
    CenterPointConfig, CornerColorMode, CornerPointsConfig, RotationDirection, SeparatorConfig,
    SpeedTier, StrokeConfig, TextOrientation, WheelConfig,
};
pub use easing::Easing;
pub use error::{Result, WheelError};
pub use geometry::{Point, WheelLayout, normalize360};
pub use hit_test::{hit_test, unrotate};
pub use render::{Fill, IconOverlay, Primitive, build_frame};
pub use segment::{Color, FontSpec, IconRef, Segment};
pub use spin::{SpinPlan, plan_spin};
pub use wheel::{
    NoopListener, RotationState, RotationStatus, SpinId, SpinTicket, Wheel, WheelListener,
};

/// One full turn, in degrees.
pub const FULL_TURN: f64 = 360.0;

/// Layout angle of the pointer: 12 o'clock in a y-down screen frame.
///
/// Slice 0 is centered on this angle in the unrotated wheel.
pub const REFERENCE_TOP_ANGLE: f64 = 270.0;
