use nalgebra::DVector;
use tracing::debug;

use crate::{
    error::InvalidInputError, knot::Knot, polynomial::Polynomial, segment::Segment,
    tridiagonal::Tridiagonal,
};

/// Relative deviation from the mean knot spacing under which knots count as uniformly spaced.
const UNIFORM_SPACING_TOLERANCE: f64 = 1e-12;

/// Natural cubic spline through a strictly increasing sequence of knots.
///
/// The spline is C² continuous and its second derivative vanishes at the first and the last
/// knot. It is immutable once built, so it can be shared between threads freely.
///
/// # Example
/// ```
/// use natural_spline::Spline;
/// use assert_approx_eq::assert_approx_eq;
///
/// let spline = Spline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
///
/// assert_approx_eq!(1.0, spline.value_at(1.0).unwrap(), 1e-12);
/// assert_approx_eq!(0.0, spline.second_derivative_at(2.0).unwrap(), 1e-12);
/// assert_approx_eq!(1.0, spline.stationary_points()[0], 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Spline {
    knots: Vec<Knot>,
    segments: Vec<Segment>,
    cumulative_integrals: Vec<f64>,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl Spline {
    /// Builds natural cubic spline from knots given in strictly increasing `x` order.
    /// Two knots give a straight line.
    /// # Errors
    /// - [InvalidInputError::TooFewKnots] for less than 2 knots,
    /// - [InvalidInputError::NonFiniteKnot] when any coordinate is NaN or infinite,
    /// - [InvalidInputError::NotStrictlyIncreasing] when knots are not sorted or share `x`,
    /// - [InvalidInputError::DegenerateSystem] when knot spacing overflows.
    /// ```
    /// use natural_spline::{InvalidInputError, Knot, Spline};
    ///
    /// let knots = vec![Knot::new(2.0, 1.0), Knot::new(1.0, 2.0)];
    /// let result = Spline::new(knots);
    ///
    /// assert_eq!(InvalidInputError::NotStrictlyIncreasing { index: 1 }, result.unwrap_err());
    /// ```
    pub fn new(knots: Vec<Knot>) -> Result<Self, InvalidInputError> {
        if knots.len() < 2 {
            debug!(knots = knots.len(), "rejecting spline with too few knots");
            return Err(InvalidInputError::TooFewKnots { got: knots.len() });
        }

        let number_of_segments = knots.len() - 1;
        let mut spline = Spline {
            min_x: knots[0].get_x(),
            max_x: knots[number_of_segments].get_x(),
            knots,
            segments: Vec::with_capacity(number_of_segments),
            cumulative_integrals: Vec::with_capacity(number_of_segments),
            is_knot_spacing_uniform: false,
        };

        spline.check_knots_spacing()?;
        spline.calculate_segments()?;
        spline.calculate_cumulative_integrals();

        debug!(
            knots = spline.knots.len(),
            uniform = spline.is_knot_spacing_uniform,
            "built natural cubic spline"
        );
        Ok(spline)
    }

    /// Builds spline from pairs of `(x, y)`.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, InvalidInputError> {
        Spline::new(points.iter().copied().map(Knot::from).collect())
    }

    /// Builds spline from separate `x` and `y` sequences of equal length.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, InvalidInputError> {
        if x.len() != y.len() {
            return Err(InvalidInputError::LengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        Spline::new(x.iter().zip(y).map(|(x, y)| Knot::new(*x, *y)).collect())
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn is_knot_spacing_uniform(&self) -> bool {
        self.is_knot_spacing_uniform
    }

    /// Value of the spline at `x`. Outside of the knot domain the boundary segment is extended.
    pub fn value_at(&self, x: f64) -> Result<f64, InvalidInputError> {
        let (segment, t) = self.locate(x)?;
        Ok(segment.value(t))
    }

    /// First derivative at `x`, extrapolated like [Spline::value_at].
    pub fn first_derivative_at(&self, x: f64) -> Result<f64, InvalidInputError> {
        let (segment, t) = self.locate(x)?;
        Ok(segment.first_derivative(t))
    }

    /// Second derivative at `x`, extrapolated like [Spline::value_at].
    pub fn second_derivative_at(&self, x: f64) -> Result<f64, InvalidInputError> {
        let (segment, t) = self.locate(x)?;
        Ok(segment.second_derivative(t))
    }

    /// Value of the spline at `x` restricted to the knot domain.
    /// # Errors
    /// [InvalidInputError::OutOfDomain] when `x` lies outside of `[min_x, max_x]`.
    pub fn interpolate(&self, x: f64) -> Result<f64, InvalidInputError> {
        if x.is_nan() {
            return Err(InvalidInputError::NanQuery);
        }
        if !self.is_in_range(x) {
            return Err(InvalidInputError::OutOfDomain { x, min: self.min_x, max: self.max_x });
        }
        self.value_at(x)
    }

    /// Values at every element of `x_values`. Previous segment is used as lookup hint, so sorted
    /// input is evaluated without searching.
    pub fn values_at(&self, x_values: &[f64]) -> Result<Vec<f64>, InvalidInputError> {
        let mut results = Vec::with_capacity(x_values.len());
        let mut index = 0;

        for x in x_values {
            if x.is_nan() {
                return Err(InvalidInputError::NanQuery);
            }
            index = self.find_segment_index_with_hint(index, *x);
            let segment = &self.segments[index];
            results.push(segment.value(x - segment.start()));
        }
        Ok(results)
    }

    /// Signed integral of the spline from `a` to `b`, extrapolated like [Spline::value_at].
    /// # Example
    /// ```
    /// use natural_spline::Spline;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let line = Spline::from_points(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]).unwrap();
    ///
    /// assert_approx_eq!(4.0, line.integrate(0.0, 2.0).unwrap(), 1e-12);
    /// assert_approx_eq!(-4.0, line.integrate(2.0, 0.0).unwrap(), 1e-12);
    /// ```
    pub fn integrate(&self, a: f64, b: f64) -> Result<f64, InvalidInputError> {
        if a.is_nan() || b.is_nan() {
            return Err(InvalidInputError::NanQuery);
        }
        Ok(self.antiderivative(b) - self.antiderivative(a))
    }

    pub(crate) fn locate(&self, x: f64) -> Result<(&Segment, f64), InvalidInputError> {
        if x.is_nan() {
            return Err(InvalidInputError::NanQuery);
        }
        let segment = &self.segments[self.find_segment_index(x)];
        Ok((segment, x - segment.start()))
    }

    /// Integral from `min_x` to `x`.
    fn antiderivative(&self, x: f64) -> f64 {
        let index = self.find_segment_index(x);
        let segment = &self.segments[index];
        self.cumulative_integrals[index] + segment.integral(x - segment.start())
    }

    fn check_knots_spacing(&mut self) -> Result<(), InvalidInputError> {
        if let Some(index) = self.knots.iter().position(|k| !k.is_finite()) {
            debug!(index, "rejecting non-finite knot");
            return Err(InvalidInputError::NonFiniteKnot { index });
        }

        let x_spacing_vec: Vec<f64> = self
            .knots
            .windows(2)
            .map(|w| w[1].get_x() - w[0].get_x())
            .collect();

        if let Some(index) = x_spacing_vec.iter().position(|spacing| *spacing <= 0.0) {
            debug!(index = index + 1, "rejecting knot not strictly increasing in x");
            return Err(InvalidInputError::NotStrictlyIncreasing { index: index + 1 });
        }

        if x_spacing_vec.iter().any(|spacing| !spacing.is_finite()) {
            debug!("rejecting knots with overflowing spacing");
            return Err(InvalidInputError::DegenerateSystem);
        }

        let mean_spacing = (self.max_x - self.min_x) / x_spacing_vec.len() as f64;
        self.is_knot_spacing_uniform = mean_spacing.is_finite()
            && x_spacing_vec
                .iter()
                .all(|spacing| (spacing - mean_spacing).abs() <= UNIFORM_SPACING_TOLERANCE * mean_spacing);

        Ok(())
    }

    /// Second derivatives at every knot. First and last rows pin them to zero; interior rows
    /// impose continuity of the first derivative.
    fn calculate_second_derivatives(&self) -> Result<DVector<f64>, InvalidInputError> {
        let size = self.knots.len();
        let mut system = Tridiagonal::zeros(size);
        let mut rhs = DVector::<f64>::zeros(size);

        system.set_row(0, 0.0, 1.0, 0.0);
        system.set_row(size - 1, 0.0, 1.0, 0.0);

        for i in 1..size - 1 {
            let (previous, current, next) = (&self.knots[i - 1], &self.knots[i], &self.knots[i + 1]);
            let h0 = current.get_x() - previous.get_x();
            let h1 = next.get_x() - current.get_x();

            system.set_row(i, h0, 2.0 * (h0 + h1), h1);
            rhs[i] = 6.0
                * ((next.get_y() - current.get_y()) / h1 - (current.get_y() - previous.get_y()) / h0);
        }

        system.solve(&rhs).ok_or(InvalidInputError::DegenerateSystem)
    }

    fn calculate_segments(&mut self) -> Result<(), InvalidInputError> {
        let second_derivatives = self.calculate_second_derivatives()?;

        for i in 0..self.knots.len() - 1 {
            let (k0, k1) = (&self.knots[i], &self.knots[i + 1]);
            let width = k1.get_x() - k0.get_x();
            let (m0, m1) = (second_derivatives[i], second_derivatives[i + 1]);

            let polynomial = Polynomial::new(
                k0.get_y(),
                (k1.get_y() - k0.get_y()) / width - width * (2.0 * m0 + m1) / 6.0,
                m0 / 2.0,
                (m1 - m0) / (6.0 * width),
            );
            self.segments.push(Segment::new(k0.get_x(), width, polynomial));
        }
        Ok(())
    }

    fn calculate_cumulative_integrals(&mut self) {
        let mut total = 0.0;
        for segment in &self.segments {
            self.cumulative_integrals.push(total);
            total += segment.integral(segment.width());
        }
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    /// Index of the segment used for `x`; values outside of the domain map to the boundary segments.
    fn find_segment_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_segment_index_uniform(x)
        } else {
            self.find_segment_index_bisect(x)
        }
    }

    fn find_segment_index_bisect(&self, x: f64) -> usize {
        let mut min = 0;
        let mut max = self.knots.len() - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].get_x() {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_segment_index_uniform(&self, x: f64) -> usize {
        let last = self.segments.len() - 1;
        let relative_x = (x - self.min_x) / (self.max_x - self.min_x);
        let guess = (relative_x * self.segments.len() as f64).floor();

        let mut index = if guess <= 0.0 {
            0
        } else if guess >= last as f64 {
            last
        } else {
            guess as usize
        };

        // floor of a rounded ratio can land one segment off near a knot
        if index > 0 && x < self.knots[index].get_x() {
            index -= 1;
        } else if index < last && x >= self.knots[index + 1].get_x() {
            index += 1;
        }
        index
    }

    fn find_segment_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if self.is_in_segment_range(index_hint, x) {
            return index_hint;
        }
        if index_hint + 1 < self.segments.len() && self.is_in_segment_range(index_hint + 1, x) {
            return index_hint + 1;
        }
        self.find_segment_index(x)
    }

    fn is_in_segment_range(&self, segment_index: usize, x: f64) -> bool {
        self.knots[segment_index].get_x() <= x && x < self.knots[segment_index + 1].get_x()
    }
}
