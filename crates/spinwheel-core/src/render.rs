//! Render descriptors.
//!
//! [`build_frame`] turns a configuration into an ordered list of primitives
//! for the host's 2D surface. Later primitives draw over earlier ones:
//!
//! 1. background disc
//! 2. stroke ring (optional)
//! 3. per segment, in index order: wedge, then label
//! 4. separators (optional)
//! 5. corner points (optional), each glow halo before its point
//! 6. center point (optional)
//!
//! Primitives live in the unrotated frame; the host applies the wheel's
//! rotation as a transform around `center`.

use std::time::Duration;

use rand::Rng;

use crate::{
    config::{CornerColorMode, CornerPointsConfig, WheelConfig},
    geometry::{Point, WheelLayout},
    segment::{Color, FontSpec, IconRef, Segment},
};

/// Base edge length of a segment icon before `icon_size_multiplier`.
pub const ICON_BASE_SIZE: f64 = 36.0;
/// Glow halo radius relative to its corner point.
pub const GLOW_RADIUS_SCALE: f64 = 1.5;
pub const GLOW_OPACITY: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Colors run from `center` outward to `radius`.
    RadialGradient {
        colors: Vec<Color>,
        center: Point,
        radius: f64,
    },
}

impl Fill {
    fn for_segment(segment: &Segment, center: Point, radius: f64) -> Self {
        match segment.background_colors.as_slice() {
            [] => Fill::Solid(Color::BLACK),
            [color] => Fill::Solid(*color),
            colors => Fill::RadialGradient {
                colors: colors.to_vec(),
                center,
                radius,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Background {
        center: Point,
        radius: f64,
        color: Color,
    },
    /// Stroked circle; `radius` is the stroke's center line.
    StrokeRing {
        center: Point,
        radius: f64,
        thickness: f64,
        color: Color,
    },
    /// Pie slice from `start_degrees` sweeping clockwise.
    Wedge {
        index: usize,
        center: Point,
        radius: f64,
        start_degrees: f64,
        sweep_degrees: f64,
        fill: Fill,
    },
    /// Label centered on `position`, rotated around it.
    Label {
        index: usize,
        text: String,
        position: Point,
        rotation_degrees: f64,
        color: Color,
        font: Option<FontSpec>,
        size: f32,
    },
    Separator {
        from: Point,
        to: Point,
        thickness: f64,
        color: Color,
    },
    CornerGlow {
        center: Point,
        radius: f64,
        color: Color,
    },
    CornerPoint {
        center: Point,
        radius: f64,
        color: Color,
    },
    CenterPoint {
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// Placement for a host-side icon view.
#[derive(Debug, Clone, PartialEq)]
pub struct IconOverlay {
    pub index: usize,
    pub icon: IconRef,
    pub center: Point,
    pub size: f64,
}

/// Builds the primitives for one frame of a wheel of `radius` around
/// `center`.
///
/// `clock` is the wheel's accumulated time and only matters for cycling
/// corner point colors; `rng` is only drawn from for random corner colors.
pub fn build_frame<R: Rng>(
    config: &WheelConfig,
    center: Point,
    radius: f64,
    clock: Duration,
    rng: &mut R,
) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(2 + config.segment_count() * 2);

    out.push(Primitive::Background {
        center,
        radius,
        color: config.background_color,
    });

    if config.stroke.enabled {
        let thickness = config.stroke.thickness;
        out.push(Primitive::StrokeRing {
            center,
            radius: radius - thickness / 2.0,
            thickness,
            color: config.stroke.colors.first().copied().unwrap_or(Color::BLACK),
        });
    }

    if let Ok(layout) = WheelLayout::new(config.segment_count()) {
        push_segments(&mut out, config, &layout, center, radius);

        if config.separator.enabled {
            let color = config
                .separator
                .colors
                .first()
                .copied()
                .unwrap_or(Color::BLACK);
            for angle in layout.separator_angles() {
                out.push(Primitive::Separator {
                    from: center,
                    to: center + Point::polar(angle, radius),
                    thickness: config.separator.thickness,
                    color,
                });
            }
        }

        if config.corner_points.enabled {
            push_corner_points(&mut out, &config.corner_points, &layout, center, radius, clock, rng);
        }
    }

    if config.center_point.enabled {
        out.push(Primitive::CenterPoint {
            center,
            radius: config.center_point.radius,
            color: config.center_point.color,
        });
    }

    out
}

fn push_segments(
    out: &mut Vec<Primitive>,
    config: &WheelConfig,
    layout: &WheelLayout,
    center: Point,
    radius: f64,
) {
    for (index, segment) in config.segments.iter().enumerate() {
        out.push(Primitive::Wedge {
            index,
            center,
            radius,
            start_degrees: layout.slice_start(index),
            sweep_degrees: layout.sweep(),
            fill: Fill::for_segment(segment, center, radius),
        });

        let mid = layout.slice_center(index);
        out.push(Primitive::Label {
            index,
            text: segment.text.clone(),
            position: center + layout.anchor(index, config.text_position_fraction, radius),
            rotation_degrees: config.text_orientation.label_rotation(mid),
            color: segment.text_color(),
            size: segment
                .font
                .as_ref()
                .map_or(config.text_size, |font| font.size),
            font: segment.font.clone(),
        });
    }
}

fn push_corner_points<R: Rng>(
    out: &mut Vec<Primitive>,
    corner: &CornerPointsConfig,
    layout: &WheelLayout,
    center: Point,
    radius: f64,
    clock: Duration,
    rng: &mut R,
) {
    let palette: &[Color] = if corner.colors.is_empty() {
        &[Color::WHITE]
    } else {
        &corner.colors
    };
    let phase = cycle_phase(clock, corner.color_change_interval);
    let distance = radius - corner.radius * 2.0;

    for (i, angle) in layout.corner_point_angles(corner.per_slice_extra).enumerate() {
        let color = match corner.color_mode {
            CornerColorMode::Fixed => palette[0],
            CornerColorMode::Random => palette[rng.random_range(0..palette.len())],
            CornerColorMode::Cycle => palette[(i + phase) % palette.len()],
        };
        let point = center + Point::polar(angle, distance);
        if corner.glow {
            out.push(Primitive::CornerGlow {
                center: point,
                radius: corner.radius * GLOW_RADIUS_SCALE,
                color: color.with_opacity(GLOW_OPACITY),
            });
        }
        out.push(Primitive::CornerPoint {
            center: point,
            radius: corner.radius,
            color,
        });
    }
}

fn cycle_phase(clock: Duration, interval: Duration) -> usize {
    // `build_frame` is public and may see a config that never went through
    // `WheelConfig::validate`.
    if interval.is_zero() {
        return 0;
    }
    (clock.as_nanos() / interval.as_nanos()) as usize
}

/// Icon placements for segments that carry one.
pub fn icon_overlays(config: &WheelConfig, center: Point, radius: f64) -> Vec<IconOverlay> {
    let Ok(layout) = WheelLayout::new(config.segment_count()) else {
        return Vec::new();
    };
    let size = ICON_BASE_SIZE * config.icon_size_multiplier;
    config
        .segments
        .iter()
        .enumerate()
        .filter_map(|(index, segment)| {
            let icon = segment.icon.clone()?;
            Some(IconOverlay {
                index,
                icon,
                center: center + layout.anchor(index, config.icon_position_fraction, radius),
                size,
            })
        })
        .collect()
}
