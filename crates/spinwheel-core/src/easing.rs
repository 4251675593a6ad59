#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing curve applied to the spin transition.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    Linear,
    /// `p * (2 - p)`.
    EaseOutQuad,
    /// `1 - (1 - p)^3`; decelerates harder toward the end.
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Input outside the range is clamped.
    pub fn apply(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::EaseOutQuad => p * (2.0 - p),
            Easing::EaseOutCubic => {
                let inv = 1.0 - p;
                1.0 - inv * inv * inv
            }
        }
    }
}
