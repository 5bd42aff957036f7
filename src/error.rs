use thiserror::Error;

/// Error returned when a spline cannot be built from the given knots or a query cannot be answered.
///
/// # Example
/// ```
/// use natural_spline::{InvalidInputError, Spline};
///
/// let result = Spline::from_points(&[(1.0, 1.0)]);
/// assert_eq!(result.unwrap_err(), InvalidInputError::TooFewKnots { got: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// Fewer than two knots were given.
    #[error("Spline must have at least 2 knots, got {got}")]
    TooFewKnots { got: usize },

    /// x and y sequences have different lengths.
    #[error("x and y must have the same length, got {x_len} and {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// Knot coordinate is NaN or infinite.
    #[error("Knot {index} has a non-finite coordinate")]
    NonFiniteKnot { index: usize },

    /// Knot x is not strictly greater than the x of the knot before it.
    #[error("Knot {index} x is not strictly greater than its predecessor")]
    NotStrictlyIncreasing { index: usize },

    /// Query coordinate is NaN.
    #[error("Query x is NaN")]
    NanQuery,

    /// Query coordinate lies outside of the knot domain.
    #[error("x = {x} is out of range [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },

    /// Tridiagonal elimination met a zero or non-finite pivot.
    #[error("Error while solving set of equations")]
    DegenerateSystem,
}
