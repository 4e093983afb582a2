//! Error types and result alias for the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Failures surfaced by the simulation core.
///
/// Construction rejects bad parameters before any state is created;
/// coordinate lookups reject out-of-range positions instead of clamping.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("coordinates ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_names_offending_coordinates() {
        let err = SimError::OutOfBounds {
            x: 7,
            y: 3,
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "coordinates (7, 3) outside 5x5 grid");
    }
}
