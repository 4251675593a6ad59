//! Randomized checks of the angle math and spin targeting.

mod common;

use std::time::Duration;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use spinwheel_core::{
    Point, REFERENCE_TOP_ANGLE, RotationDirection, SpeedTier, Wheel, WheelConfig, WheelLayout,
    hit_test, normalize360, plan_spin,
};

fn direction() -> impl Strategy<Value = RotationDirection> {
    prop_oneof![
        Just(RotationDirection::Clockwise),
        Just(RotationDirection::CounterClockwise),
    ]
}

fn tier() -> impl Strategy<Value = SpeedTier> {
    prop_oneof![
        Just(SpeedTier::Slow),
        Just(SpeedTier::Normal),
        Just(SpeedTier::Fast),
    ]
}

fn count_and_target() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=64).prop_flat_map(|count| (Just(count), 0..count))
}

fn config(
    count: usize,
    direction: RotationDirection,
    tier: SpeedTier,
    multiplier: f64,
    centered: bool,
) -> WheelConfig {
    WheelConfig {
        rotation_direction: direction,
        speed_tier: tier,
        speed_multiplier: multiplier,
        stop_center_of_segment: centered,
        spin_duration: Duration::from_millis(200),
        ..WheelConfig::with_segments(common::segments(count))
    }
}

proptest! {
    #[test]
    fn normalize_is_a_projection(degrees in -1.0e9f64..1.0e9) {
        let once = normalize360(degrees);
        prop_assert!((0.0..360.0).contains(&once));
        prop_assert_eq!(normalize360(once), once);
    }

    #[test]
    fn plans_land_on_the_target(
        (count, target) in count_and_target(),
        direction in direction(),
        tier in tier(),
        multiplier in 0.05f64..5.0,
        centered in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let config = config(count, direction, tier, multiplier, centered);
        let plan = plan_spin(&config, target, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(plan.landing_segment(), target);
        prop_assert!(plan.offset.abs() <= plan.sweep / 2.0);
        prop_assert!((0.0..360.0).contains(&plan.desired));
        match direction {
            RotationDirection::Clockwise => prop_assert!(plan.rotation > 0.0),
            RotationDirection::CounterClockwise => prop_assert!(plan.rotation < 0.0),
        }
        prop_assert!(plan.rotation.abs() >= 360.0 * plan.spins);
        prop_assert!(plan.spins >= 1.0 && plan.spins.fract() == 0.0);

        if centered {
            let layout = WheelLayout::new(count).unwrap();
            let resting = normalize360(REFERENCE_TOP_ANGLE - plan.rotation);
            let error = normalize360(resting - layout.slice_center(target));
            prop_assert!(error.min(360.0 - error) < 1e-6);
        }
    }

    #[test]
    fn consecutive_spins_deliver_their_targets(
        count in 1usize..=24,
        targets in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
        direction in direction(),
        tier in tier(),
        multiplier in 0.05f64..5.0,
        seed in any::<u64>(),
    ) {
        let config = config(count, direction, tier, multiplier, false);
        let mut wheel = Wheel::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for target in targets.iter().map(|index| index.index(count)) {
            let ticket = wheel.spin(target, &mut rng).unwrap();
            prop_assert_eq!(
                (ticket.end_angle - ticket.start_angle).signum(),
                direction.sign()
            );
            let delivered = common::run_to_completion(&mut wheel).unwrap();
            prop_assert_eq!(delivered, target);
            prop_assert_eq!(wheel.segment_under_pointer(), Some(target));
        }
    }

    #[test]
    fn extreme_jitter_draws_land_on_the_target(
        (count, target) in count_and_target(),
        direction in direction(),
        multiplier in 0.05f64..5.0,
        bits in prop_oneof![Just(0u64), Just(u64::MAX)],
    ) {
        let config = config(count, direction, SpeedTier::Normal, multiplier, false);
        let plan = plan_spin(&config, target, &mut common::FixedBits(bits)).unwrap();
        prop_assert!(plan.offset.abs() < plan.sweep / 2.0);
        prop_assert_eq!(plan.landing_segment(), target);
    }

    #[test]
    fn anchors_hit_their_own_slice(
        (count, index) in count_and_target(),
        fraction in 0.05f64..0.99,
        rotation in -10_000.0f64..10_000.0,
    ) {
        let layout = WheelLayout::new(count).unwrap();
        let anchor = layout.anchor(index, fraction, 100.0);
        prop_assert_eq!(hit_test::hit_test(anchor, 100.0, count), Some(index));

        let on_screen = anchor.rotated(rotation);
        let local = hit_test::unrotate(on_screen, rotation);
        prop_assert!(local.distance(anchor) < 1e-6);
        prop_assert_eq!(hit_test::hit_test(local, 100.0 + 1e-9, count), Some(index));
    }

    #[test]
    fn taps_outside_the_rim_miss(
        count in 1usize..=32,
        angle in 0.0f64..360.0,
        overshoot in 0.001f64..1_000.0,
    ) {
        let point = Point::polar(angle, 100.0 + overshoot);
        prop_assert_eq!(hit_test::hit_test(point, 100.0, count), None);
    }
}
