use thiserror::Error;

/// Errors reported by the wheel engine.
///
/// Every variant is recoverable: the wheel keeps its previous state and stays
/// usable after any of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    /// A spin was requested on a wheel with no segments.
    #[error("wheel has no segments")]
    EmptyWheel,

    /// A layout was requested for zero segments.
    #[error("segment layout is undefined for zero segments")]
    DivisionUndefined,

    /// The requested target is not a valid segment index.
    #[error("target segment {index} is out of range (wheel has {len} segments)")]
    TargetOutOfRange { index: usize, len: usize },

    /// A duration, multiplier or fraction is outside its valid range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },

    /// The configuration cannot change while a spin is in flight.
    #[error("configuration is locked while a spin is in flight")]
    Busy,
}

pub type Result<T, E = WheelError> = std::result::Result<T, E>;
