//! Natural cubic spline interpolation and extrapolation.
//!
//! The spline passes through every knot, is C² continuous and has zero second derivative at both
//! ends. Besides values it answers first and second derivatives, definite integrals and the
//! stationary points inside the knot domain, which makes it usable for locating local extrema of
//! sampled series such as prices.
//!
//! # Example
//! ```
//! use natural_spline::Spline;
//! use assert_approx_eq::assert_approx_eq;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let y = [10.0, 30.0, 50.0, -40.0, -60.0, 0.0, 10.0, 20.0];
//! let spline = Spline::from_xy(&x, &y).unwrap();
//!
//! assert_approx_eq!(0.0, spline.second_derivative_at(1.0).unwrap(), 1e-9);
//! assert_approx_eq!(0.0, spline.second_derivative_at(8.0).unwrap(), 1e-9);
//!
//! for x in spline.stationary_points() {
//!     assert_approx_eq!(0.0, spline.first_derivative_at(x).unwrap(), 1e-9);
//! }
//! assert!(spline.value_at(15.0).unwrap().is_finite());
//! ```

mod error;
mod knot;
mod polynomial;
mod segment;
mod spline;
mod stationary;
mod tridiagonal;

pub use error::InvalidInputError;
pub use knot::Knot;
pub use segment::Segment;
pub use spline::Spline;
pub use stationary::{StationaryKind, StationaryPoint, DEFAULT_STATIONARY_TOLERANCE};
