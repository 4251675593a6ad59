#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc, time::Duration};

use anyhow::{Result, bail};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use spinwheel_core::{RotationStatus, Segment, Wheel, WheelConfig, WheelListener};

pub const TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Status(RotationStatus),
    Complete { index: usize, id: u32 },
}

/// Listener that appends every notification to a shared log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn completions(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Complete { index, .. } => Some(*index),
                Event::Status(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl WheelListener for Recorder {
    fn on_status_changed(&mut self, status: RotationStatus) {
        self.events.borrow_mut().push(Event::Status(status));
    }

    fn on_rotation_complete(&mut self, index: usize, segment: &Segment) {
        self.events.borrow_mut().push(Event::Complete {
            index,
            id: segment.id,
        });
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random source that repeats one word, pinning every float draw to an end
/// of its range.
#[derive(Debug, Clone, Copy)]
pub struct FixedBits(pub u64);

impl RngCore for FixedBits {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let word = self.0.to_le_bytes();
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = word[i % 8];
        }
    }
}

pub fn segments(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| Segment::new(100 + i as u32, format!("prize {i}")))
        .collect()
}

/// A wheel with `count` segments and a recorder attached.
pub fn wheel(count: usize, update: impl FnOnce(&mut WheelConfig)) -> Result<(Wheel, Recorder)> {
    let mut config = WheelConfig::with_segments(segments(count));
    update(&mut config);
    let recorder = Recorder::default();
    let wheel = Wheel::with_listener(config, recorder.clone())?;
    Ok((wheel, recorder))
}

/// Ticks until the spin in flight finishes, returning the delivered index.
pub fn run_to_completion(wheel: &mut Wheel) -> Result<usize> {
    for _ in 0..100_000 {
        if let Some(index) = wheel.advance(TICK) {
            return Ok(index);
        }
    }
    bail!("spin never completed (status {})", wheel.status())
}
