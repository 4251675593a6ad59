//! Rotation state machine.
//!
//! A [`Wheel`] owns its configuration and [`RotationState`], and runs at most
//! one spin at a time. The host drives time with [`Wheel::advance`]; the wheel
//! reports transitions through its [`WheelListener`].
//!
//! ```text
//! Idle ──request_spin──▶ Rotating ──advance (done)──▶ Completed
//!                          │  ▲                            │
//!                   cancel │  └──── request_spin ──────────┘
//!                          ▼
//!                       Canceled
//! ```
//!
//! A `request_spin` while rotating overrides the spin in flight: the old spin
//! is canceled (its completion never fires) before the new one starts.

use std::{fmt, time::Duration};

use rand::Rng;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    FULL_TURN,
    config::WheelConfig,
    error::{Result, WheelError},
    geometry::{Point, WheelLayout, normalize360},
    hit_test,
    render::{self, IconOverlay, Primitive},
    segment::Segment,
    spin::{self, SpinPlan},
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationStatus {
    #[default]
    Idle,
    Rotating,
    Completed,
    Canceled,
}

impl fmt::Display for RotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RotationStatus::Idle => "idle",
            RotationStatus::Rotating => "rotating",
            RotationStatus::Completed => "completed",
            RotationStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// Current rotation of a wheel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    /// Accumulated rotation in degrees. Never wrapped; apply it directly as
    /// the wheel's rotation transform.
    pub angle_degrees: f64,
    pub status: RotationStatus,
}

/// Notifications emitted by a [`Wheel`].
///
/// Both methods default to no-ops so listeners only implement what they need.
pub trait WheelListener {
    fn on_status_changed(&mut self, _status: RotationStatus) {}

    /// Fires once per spin that runs to completion, before the `Completed`
    /// status change.
    fn on_rotation_complete(&mut self, _index: usize, _segment: &Segment) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl WheelListener for NoopListener {}

/// Identifies one spin request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpinId(u64);

impl SpinId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spin#{}", self.0)
    }
}

/// Receipt for an accepted spin request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    pub id: SpinId,
    pub target: usize,
    pub plan: SpinPlan,
    pub start_angle: f64,
    pub end_angle: f64,
    pub duration: Duration,
    /// Spin that was in flight and got overridden by this request.
    pub superseded: Option<SpinId>,
}

#[derive(Debug, Clone, Copy)]
struct SpinAnimation {
    id: SpinId,
    target: usize,
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl SpinAnimation {
    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

pub struct Wheel {
    config: WheelConfig,
    state: RotationState,
    animation: Option<SpinAnimation>,
    next_spin: u64,
    /// Total time fed through `advance`; drives time-based decorations.
    clock: Duration,
    listener: Box<dyn WheelListener>,
}

impl fmt::Debug for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wheel")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("animation", &self.animation)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Wheel {
    /// Creates an idle wheel at rotation zero with no listener.
    pub fn new(config: WheelConfig) -> Result<Self> {
        Self::with_listener(config, NoopListener)
    }

    pub fn with_listener<L>(config: WheelConfig, listener: L) -> Result<Self>
    where
        L: WheelListener + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            state: RotationState::default(),
            animation: None,
            next_spin: 1,
            clock: Duration::ZERO,
            listener: Box::new(listener),
        })
    }

    /// Replaces the listener, returning the previous one.
    pub fn set_listener(&mut self, listener: Box<dyn WheelListener>) -> Box<dyn WheelListener> {
        std::mem::replace(&mut self.listener, listener)
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn angle(&self) -> f64 {
        self.state.angle_degrees
    }

    pub fn status(&self) -> RotationStatus {
        self.state.status
    }

    pub fn is_rotating(&self) -> bool {
        self.animation.is_some()
    }

    /// Spin currently in flight, if any.
    pub fn active_spin(&self) -> Option<SpinId> {
        self.animation.map(|anim| anim.id)
    }

    pub fn layout(&self) -> Result<WheelLayout> {
        WheelLayout::new(self.config.segment_count())
    }

    /// Changes the configuration. Rejected while a spin is in flight; an
    /// invalid result is discarded and the previous configuration kept.
    pub fn configure<F>(&mut self, update: F) -> Result<()>
    where
        F: FnOnce(&mut WheelConfig),
    {
        if self.is_rotating() {
            warn!("configuration change rejected: spin in flight");
            return Err(WheelError::Busy);
        }
        let mut next = self.config.clone();
        update(&mut next);
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Spins to `target` using the configured spin duration.
    pub fn spin<R: Rng>(&mut self, target: usize, rng: &mut R) -> Result<SpinTicket> {
        self.request_spin(target, self.config.spin_duration, rng)
    }

    /// Spins to a uniformly chosen segment.
    pub fn spin_random<R: Rng>(&mut self, rng: &mut R) -> Result<SpinTicket> {
        let len = self.config.segment_count();
        if len == 0 {
            debug!("random spin ignored: wheel has no segments");
            return Err(WheelError::EmptyWheel);
        }
        let target = rng.random_range(0..len);
        self.spin(target, rng)
    }

    /// Starts an eased transition that stops `target` under the pointer after
    /// `duration`.
    ///
    /// Validation happens before any state changes, so a rejected request
    /// leaves the wheel untouched. A request while rotating overrides the
    /// spin in flight.
    pub fn request_spin<R: Rng>(
        &mut self,
        target: usize,
        duration: Duration,
        rng: &mut R,
    ) -> Result<SpinTicket> {
        let len = self.config.segment_count();
        if len == 0 {
            debug!("spin request ignored: wheel has no segments");
            return Err(WheelError::EmptyWheel);
        }
        if target >= len {
            warn!(target, len, "spin request rejected: target out of range");
            return Err(WheelError::TargetOutOfRange { index: target, len });
        }
        if duration.is_zero() {
            return Err(WheelError::InvalidConfiguration {
                reason: "spin duration must be positive",
            });
        }
        let plan = spin::plan_spin(&self.config, target, rng)?;

        let superseded = self.interrupt();

        let start = self.state.angle_degrees;
        let end = rebase(start, plan.rotation, self.config.rotation_direction.sign());
        let id = SpinId(self.next_spin);
        self.next_spin += 1;

        self.animation = Some(SpinAnimation {
            id,
            target,
            from: start,
            to: end,
            duration,
            elapsed: Duration::ZERO,
        });
        info!(
            %id,
            target,
            start,
            end,
            duration_ms = duration.as_millis() as u64,
            "spin started"
        );
        self.set_status(RotationStatus::Rotating);

        Ok(SpinTicket {
            id,
            target,
            plan,
            start_angle: start,
            end_angle: end,
            duration,
            superseded,
        })
    }

    /// Advances the spin in flight by `dt`. Returns the index delivered to
    /// `on_rotation_complete` when this tick finishes the spin.
    pub fn advance(&mut self, dt: Duration) -> Option<usize> {
        self.clock += dt;
        let easing = self.config.easing;
        let anim = self.animation.as_mut()?;
        anim.elapsed = (anim.elapsed + dt).min(anim.duration);
        let eased = easing.apply(anim.progress());
        self.state.angle_degrees = anim.from + (anim.to - anim.from) * eased;

        if anim.is_done() {
            return Some(self.complete());
        }
        None
    }

    /// Stops the spin in flight at its current angle. No completion fires.
    ///
    /// Returns `false` when nothing was rotating.
    pub fn cancel(&mut self) -> bool {
        let Some(anim) = self.animation.take() else {
            debug!(status = %self.state.status, "cancel ignored: no spin in flight");
            return false;
        };
        info!(id = %anim.id, angle = self.state.angle_degrees, "spin canceled");
        self.set_status(RotationStatus::Canceled);
        true
    }

    /// Returns to rotation zero and `Idle` immediately.
    pub fn reset(&mut self) {
        if let Some(anim) = self.animation.take() {
            debug!(id = %anim.id, "reset dropped spin in flight");
        }
        self.state.angle_degrees = 0.0;
        self.set_status(RotationStatus::Idle);
    }

    /// Segment currently under the pointer.
    pub fn segment_under_pointer(&self) -> Option<usize> {
        let layout = self.layout().ok()?;
        Some(layout.segment_under_pointer(self.layout_rotation()))
    }

    /// Maps a tap in the wheel's local frame (relative to its center, before
    /// the rotation transform is undone) to a segment.
    pub fn hit_test(&self, point: Point, radius: f64) -> Option<usize> {
        let local = hit_test::unrotate(point, self.layout_rotation());
        hit_test::hit_test(local, radius, self.config.segment_count())
    }

    /// Draw primitives for the current frame, in the unrotated frame.
    pub fn frame<R: Rng>(&self, center: Point, radius: f64, rng: &mut R) -> Vec<Primitive> {
        render::build_frame(&self.config, center, radius, self.clock, rng)
    }

    /// Icon placements for the host's overlay views, in the unrotated frame.
    pub fn icon_overlays(&self, center: Point, radius: f64) -> Vec<IconOverlay> {
        render::icon_overlays(&self.config, center, radius)
    }

    fn layout_rotation(&self) -> f64 {
        self.state.angle_degrees - self.config.base_offset_degrees
    }

    fn complete(&mut self) -> usize {
        let Some(anim) = self.animation.take() else {
            return 0;
        };
        self.state.angle_degrees = anim.to;

        let target = anim.target;
        if let Some(resolved) = self.segment_under_pointer()
            && resolved != target
        {
            warn!(id = %anim.id, target, resolved, "spin settled on a slice boundary");
        }
        info!(id = %anim.id, target, angle = anim.to, "spin completed");

        self.state.status = RotationStatus::Completed;
        self.listener
            .on_rotation_complete(target, &self.config.segments[target]);
        self.listener.on_status_changed(RotationStatus::Completed);
        target
    }

    /// Cancels the spin in flight ahead of a new request.
    fn interrupt(&mut self) -> Option<SpinId> {
        let anim = self.animation.take()?;
        warn!(
            superseded = %anim.id,
            angle = self.state.angle_degrees,
            "concurrent spin override: canceling spin in flight"
        );
        self.set_status(RotationStatus::Canceled);
        Some(anim.id)
    }

    fn set_status(&mut self, status: RotationStatus) {
        self.state.status = status;
        self.listener.on_status_changed(status);
    }
}

/// End angle for a transition from `start` that rests at `rotation`
/// (mod 360) and travels strictly in the direction of `sign`.
fn rebase(start: f64, rotation: f64, sign: f64) -> f64 {
    let mut delta = rotation - normalize360(start);
    let travel = delta * sign;
    if travel <= 0.0 {
        let turns = (-travel / FULL_TURN).floor() + 1.0;
        delta += sign * FULL_TURN * turns;
    }
    start + delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebase_from_rest_keeps_the_plan() {
        assert_eq!(rebase(0.0, 3870.0, 1.0), 3870.0);
        assert_eq!(rebase(0.0, -3690.0, -1.0), -3690.0);
    }

    #[test]
    fn rebase_accumulates_across_spins() {
        let end = rebase(3870.0, 3630.0, 1.0);
        assert_eq!(end, 3870.0 + 3630.0 - 270.0);
        assert_eq!(normalize360(end), normalize360(3630.0));
    }

    #[test]
    fn rebase_always_travels_forward() {
        // Half a turn planned from a wheel resting at 300 degrees.
        let end = rebase(300.0, 180.0, 1.0);
        assert!(end > 300.0);
        assert_eq!(normalize360(end), 180.0);

        let end = rebase(-10.0, -100.0, -1.0);
        assert!(end < -10.0);
        assert_eq!(normalize360(end), normalize360(-100.0));
    }

    #[test]
    fn rebase_adds_a_turn_for_zero_travel() {
        assert_eq!(rebase(90.0, 90.0, 1.0), 450.0);
    }
}
