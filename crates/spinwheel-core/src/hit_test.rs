//! Tap → segment mapping.
//!
//! Points are expressed relative to the wheel center in the unrotated frame.
//! Hosts that co-rotate their overlays with the wheel can pass taps straight
//! through; hosts that receive raw taps on the rotated wheel undo the rotation
//! first with [`unrotate`] (or use [`Wheel::hit_test`](crate::Wheel::hit_test),
//! which does so with the wheel's current angle).

use crate::geometry::{Point, WheelLayout};

/// Segment under `point`, or `None` outside the wheel or on an empty wheel.
pub fn hit_test(point: Point, radius: f64, segment_count: usize) -> Option<usize> {
    let layout = WheelLayout::new(segment_count).ok()?;
    // Written so a NaN length falls outside.
    if !(point.length() <= radius) {
        return None;
    }
    Some(layout.segment_at_angle(point.angle()))
}

/// Undoes a wheel rotation of `rotation_degrees` applied around the center.
pub fn unrotate(point: Point, rotation_degrees: f64) -> Point {
    point.rotated(-rotation_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_the_wheel_is_slice_zero() {
        assert_eq!(hit_test(Point::new(0.0, -50.0), 100.0, 12), Some(0));
        assert_eq!(hit_test(Point::new(0.0, -100.0), 100.0, 12), Some(0));
    }

    #[test]
    fn slices_follow_clockwise() {
        // 3 o'clock is a quarter turn past the top.
        assert_eq!(hit_test(Point::new(80.0, 0.0), 100.0, 4), Some(1));
        assert_eq!(hit_test(Point::new(0.0, 80.0), 100.0, 4), Some(2));
        assert_eq!(hit_test(Point::new(-80.0, 0.0), 100.0, 4), Some(3));
    }

    #[test]
    fn outside_or_empty_is_none() {
        assert_eq!(hit_test(Point::new(0.0, -101.0), 100.0, 12), None);
        assert_eq!(hit_test(Point::new(0.0, -10.0), 100.0, 0), None);
        assert_eq!(hit_test(Point::new(f64::NAN, 0.0), 100.0, 3), None);
    }

    #[test]
    fn center_resolves_to_a_valid_slice() {
        let index = hit_test(Point::ORIGIN, 100.0, 5).unwrap();
        assert!(index < 5);
    }

    #[test]
    fn unrotate_restores_layout_position() {
        let layout = WheelLayout::new(8).unwrap();
        for rotation in [0.0, 45.0, 123.0, -720.5, 3870.0] {
            for index in 0..8 {
                let on_screen = layout.anchor(index, 0.6, 100.0).rotated(rotation);
                let local = unrotate(on_screen, rotation);
                assert_eq!(hit_test(local, 100.0, 8), Some(index));
            }
        }
    }
}
