//! Error types for rejected inputs.

use thiserror::Error;

/// Inputs the engine refuses to apply. The previous valid state is always retained.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// The viewport size was NaN, infinite or negative.
    #[error("viewport size must be finite and non-negative, got {0}")]
    InvalidViewportSize(f64),

    /// The scroll position was NaN or infinite.
    #[error("scroll position must be finite, got {0}")]
    InvalidScrollPosition(f64),

    /// A measurement carried a non-finite or negative size, or non-finite margins.
    #[error("invalid measurement for item {index}: size {size}")]
    InvalidMeasurement { index: usize, size: f64 },

    /// The index does not exist in the current dataset.
    #[error("item {index} is out of range (total items: {total})")]
    IndexOutOfRange { index: usize, total: usize },

    /// A configuration knob was out of its domain.
    #[error("invalid option `{name}`: {value}")]
    InvalidOption { name: &'static str, value: f64 },
}

/// Result type for engine operations.
pub type Result<T> = core::result::Result<T, LayoutError>;
