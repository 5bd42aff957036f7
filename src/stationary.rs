use tracing::trace;

use crate::spline::Spline;

/// Default absolute distance under which two stationary points are reported as one.
pub const DEFAULT_STATIONARY_TOLERANCE: f64 = 1e-9;

/// Relative slack, in segment widths, for accepting derivative roots that rounding pushed just
/// outside of their segment.
const SPAN_TOLERANCE: f64 = 1e-12;

/// Shape of the spline around a stationary point, judged by the sign of the second derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationaryKind {
    Minimum,
    Maximum,
    /// Second derivative vanishes as well, e.g. a horizontal inflection.
    Inflection,
}

/// Point of the knot domain where the first derivative of the spline vanishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryPoint {
    pub x: f64,
    pub value: f64,
    pub first_derivative: f64,
    pub second_derivative: f64,
}

impl StationaryPoint {
    pub fn kind(&self) -> StationaryKind {
        if self.second_derivative > 0.0 {
            StationaryKind::Minimum
        } else if self.second_derivative < 0.0 {
            StationaryKind::Maximum
        } else {
            StationaryKind::Inflection
        }
    }
}

impl Spline {
    /// Ascending `x` coordinates inside `[min_x, max_x]` where the first derivative is zero.
    /// Roots of the extrapolated boundary polynomials are never reported. Monotonic data usually
    /// gives an empty result.
    /// # Example
    /// ```
    /// use natural_spline::Spline;
    ///
    /// let rising = Spline::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0]).unwrap();
    /// assert!(rising.stationary_points().is_empty());
    /// ```
    pub fn stationary_points(&self) -> Vec<f64> {
        self.stationary_points_with_tolerance(DEFAULT_STATIONARY_TOLERANCE)
    }

    /// Like [Spline::stationary_points], merging points closer than `tolerance`.
    pub fn stationary_points_with_tolerance(&self, tolerance: f64) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .segments()
            .iter()
            .flat_map(|segment| {
                segment
                    .stationary_offsets(SPAN_TOLERANCE)
                    .into_iter()
                    .map(move |t| segment.start() + t)
            })
            .map(|x| x.clamp(self.min_x(), self.max_x()))
            .collect();

        points.sort_by(f64::total_cmp);
        points.dedup_by(|later, earlier| (*later - *earlier).abs() <= tolerance);

        trace!(count = points.len(), "found stationary points");
        points
    }

    /// Stationary points together with the spline value and derivatives at each of them.
    pub fn stationary_point_details(&self) -> Vec<StationaryPoint> {
        self.stationary_points()
            .into_iter()
            .filter_map(|x| {
                let (segment, t) = self.locate(x).ok()?;
                Some(StationaryPoint {
                    x,
                    value: segment.value(t),
                    first_derivative: segment.first_derivative(t),
                    second_derivative: segment.second_derivative(t),
                })
            })
            .collect()
    }
}
