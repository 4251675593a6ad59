//! Wheel configuration.
//!
//! All lengths are in the host's drawing units, all angles in degrees.
//! The configuration is a plain value: [`Wheel`](crate::Wheel) only lets the
//! host change it while no spin is in flight.

use std::{fmt, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    easing::Easing,
    error::{Result, WheelError},
    segment::{Color, Segment},
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// `+1.0` for clockwise (positive angles), `-1.0` otherwise.
    pub fn sign(self) -> f64 {
        match self {
            RotationDirection::Clockwise => 1.0,
            RotationDirection::CounterClockwise => -1.0,
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RotationDirection::Clockwise => "clockwise",
            RotationDirection::CounterClockwise => "counter-clockwise",
        };
        f.write_str(s)
    }
}

/// Named speed preset. Each tier maps to a base number of full turns.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeedTier {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedTier {
    /// Full turns before the wheel settles, before the speed multiplier and
    /// rounding in [`WheelConfig::spins`].
    pub const fn base_spins(self) -> f64 {
        match self {
            SpeedTier::Fast => 15.0,
            SpeedTier::Normal => 10.0,
            SpeedTier::Slow => 1.0,
        }
    }
}

/// How segment labels are rotated relative to their slice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextOrientation {
    /// Unrotated.
    #[default]
    Horizontal,
    /// Along the slice's radial angle.
    Vertical,
    /// Along the radial angle, flipped to read toward the center.
    VerticalToCenter,
    /// Alias of [`TextOrientation::Vertical`].
    VerticalToCorner,
}

impl TextOrientation {
    /// Label rotation for a slice whose center lies at `mid_angle`.
    pub fn label_rotation(self, mid_angle: f64) -> f64 {
        match self {
            TextOrientation::Horizontal => 0.0,
            TextOrientation::Vertical | TextOrientation::VerticalToCorner => mid_angle,
            TextOrientation::VerticalToCenter => mid_angle + 180.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeConfig {
    pub enabled: bool,
    /// Only the first entry is drawn; empty means black.
    pub colors: Vec<Color>,
    pub thickness: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            colors: vec![Color::BLACK],
            thickness: 4.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorConfig {
    pub enabled: bool,
    pub colors: Vec<Color>,
    pub thickness: f64,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            colors: vec![Color::BLACK],
            thickness: 2.0,
        }
    }
}

/// Color policy for the corner points ring.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CornerColorMode {
    /// Every point uses the first color.
    Fixed,
    /// Each point draws a color from the frame's random source.
    #[default]
    Random,
    /// Colors shift by one position every `color_change_interval`.
    Cycle,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CornerPointsConfig {
    pub enabled: bool,
    /// Extra points between two slice boundaries.
    pub per_slice_extra: usize,
    /// Empty means white.
    pub colors: Vec<Color>,
    pub color_mode: CornerColorMode,
    pub color_change_interval: Duration,
    /// Draws a translucent halo beneath each point.
    pub glow: bool,
    pub radius: f64,
}

impl Default for CornerPointsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            per_slice_extra: 1,
            colors: Vec::new(),
            color_mode: CornerColorMode::Random,
            color_change_interval: Duration::from_millis(500),
            glow: true,
            radius: 10.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CenterPointConfig {
    pub enabled: bool,
    pub color: Color,
    pub radius: f64,
}

impl Default for CenterPointConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::WHITE,
            radius: 40.0,
        }
    }
}

/// Everything that shapes a spin and its rendering.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfig {
    pub segments: Vec<Segment>,
    pub rotation_direction: RotationDirection,
    /// Default duration for [`Wheel::spin`](crate::Wheel::spin).
    pub spin_duration: Duration,
    pub speed_tier: SpeedTier,
    /// Scales the tier's base spins. Must be positive.
    pub speed_multiplier: f64,
    /// Stop on the exact slice center instead of a random point inside it.
    pub stop_center_of_segment: bool,
    pub easing: Easing,
    pub text_orientation: TextOrientation,
    /// Label distance from the center as a fraction of the radius.
    pub text_position_fraction: f64,
    pub text_size: f32,
    /// Icon distance from the center as a fraction of the radius.
    pub icon_position_fraction: f64,
    pub icon_size_multiplier: f64,
    pub background_color: Color,
    pub stroke: StrokeConfig,
    pub separator: SeparatorConfig,
    pub corner_points: CornerPointsConfig,
    pub center_point: CenterPointConfig,
    /// Correction between the host's wheel artwork and the layout, added to
    /// every final rotation. Keep at zero when drawing from
    /// [`build_frame`](crate::build_frame) output.
    pub base_offset_degrees: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            rotation_direction: RotationDirection::Clockwise,
            spin_duration: Duration::from_secs(5),
            speed_tier: SpeedTier::Normal,
            speed_multiplier: 1.0,
            stop_center_of_segment: false,
            easing: Easing::default(),
            text_orientation: TextOrientation::Horizontal,
            text_position_fraction: 0.7,
            text_size: 16.0,
            icon_position_fraction: 0.5,
            icon_size_multiplier: 1.0,
            background_color: Color::BLACK,
            stroke: StrokeConfig::default(),
            separator: SeparatorConfig::default(),
            corner_points: CornerPointsConfig::default(),
            center_point: CenterPointConfig::default(),
            base_offset_degrees: 0.0,
        }
    }
}

impl WheelConfig {
    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Full turns the wheel makes before settling: the tier's turns scaled by
    /// the multiplier, rounded to a whole number and at least one.
    ///
    /// A fractional turn would shift the resting angle away from the target.
    pub fn spins(&self) -> f64 {
        (self.speed_tier.base_spins() * self.speed_multiplier)
            .round()
            .max(1.0)
    }

    /// Checks every numeric field against its valid range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| Err(WheelError::InvalidConfiguration { reason });

        if self.spin_duration.is_zero() {
            return invalid("spin duration must be positive");
        }
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0) {
            return invalid("speed multiplier must be a positive finite number");
        }
        if !(0.0..=1.0).contains(&self.text_position_fraction) {
            return invalid("text position fraction must lie in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.icon_position_fraction) {
            return invalid("icon position fraction must lie in [0, 1]");
        }
        if !(self.icon_size_multiplier.is_finite() && self.icon_size_multiplier > 0.0) {
            return invalid("icon size multiplier must be positive");
        }
        if !(self.text_size.is_finite() && self.text_size > 0.0) {
            return invalid("text size must be positive");
        }
        if !self.base_offset_degrees.is_finite() {
            return invalid("base offset must be finite");
        }
        if !non_negative(self.stroke.thickness) || !non_negative(self.separator.thickness) {
            return invalid("stroke and separator thickness must be non-negative");
        }
        if !non_negative(self.corner_points.radius) || !non_negative(self.center_point.radius) {
            return invalid("point radii must be non-negative");
        }
        if self.corner_points.color_change_interval.is_zero() {
            return invalid("corner point color change interval must be positive");
        }
        Ok(())
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
