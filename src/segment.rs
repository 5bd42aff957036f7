use crate::polynomial::Polynomial;

/// Cubic piece of a [Spline](crate::Spline) covering `[start, start + width]`.
///
/// The polynomial is expressed in the local coordinate `t = x - start`:
/// `p(t) = a + b*t + c*t^2 + d*t^3`. All evaluation methods take `t`, not the global `x`, and accept
/// any `t`, including values outside of `[0, width]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: f64,
    width: f64,
    polynomial: Polynomial,
}

impl Segment {
    pub(crate) fn new(start: f64, width: f64, polynomial: Polynomial) -> Self {
        Segment { start, width, polynomial }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Coefficients `[a, b, c, d]` of the local polynomial.
    pub fn coefficients(&self) -> [f64; 4] {
        self.polynomial.coefficients()
    }

    pub fn value(&self, t: f64) -> f64 {
        self.polynomial.evaluate(t)
    }

    pub fn first_derivative(&self, t: f64) -> f64 {
        self.polynomial.first_derivative(t)
    }

    pub fn second_derivative(&self, t: f64) -> f64 {
        self.polynomial.second_derivative(t)
    }

    pub(crate) fn integral(&self, t: f64) -> f64 {
        self.polynomial.integral(t)
    }

    /// Local offsets in `[0, width]` where the first derivative vanishes, unsorted.
    pub(crate) fn stationary_offsets(&self, span_tolerance: f64) -> Vec<f64> {
        let slack = span_tolerance * self.width;
        self.polynomial
            .derivative_roots()
            .into_iter()
            .filter(|t| -slack <= *t && *t <= self.width + slack)
            .map(|t| t.clamp(0.0, self.width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let segment = Segment::new(2.0, 0.5, Polynomial::new(1.0, 0.0, 0.0, 0.0));

        assert_eq!(2.0, segment.start());
        assert_eq!(2.5, segment.end());
        assert_eq!(0.5, segment.width());
        assert_eq!([1.0, 0.0, 0.0, 0.0], segment.coefficients());
    }

    #[test]
    fn stationary_offsets_inside_span_only() {
        // p'(t) = 3(t - 1)(t - 3), only t = 1 lies in [0, 2]
        let segment = Segment::new(0.0, 2.0, Polynomial::new(0.0, 9.0, -6.0, 1.0));

        let offsets = segment.stationary_offsets(1e-12);

        assert_eq!(1, offsets.len());
        assert!((offsets[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stationary_offsets_on_boundary_are_clamped() {
        // p'(t) = 4 - 2t vanishes exactly at the segment end
        let segment = Segment::new(0.0, 2.0, Polynomial::new(0.0, 4.0, -1.0, 0.0));

        assert_eq!(vec![2.0], segment.stationary_offsets(1e-12));
    }
}
