/// Cubic `a + b*t + c*t^2 + d*t^3` in the local coordinate of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Polynomial {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Polynomial {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Polynomial { a, b, c, d }
    }

    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.a + t * (self.b + t * (self.c + t * self.d))
    }

    pub fn first_derivative(&self, t: f64) -> f64 {
        self.b + t * (2.0 * self.c + 3.0 * self.d * t)
    }

    pub fn second_derivative(&self, t: f64) -> f64 {
        2.0 * self.c + 6.0 * self.d * t
    }

    /// Integral over `[0, t]`, negative for negative `t`.
    pub fn integral(&self, t: f64) -> f64 {
        t * (self.a + t * (self.b / 2.0 + t * (self.c / 3.0 + t * self.d / 4.0)))
    }

    /// Real roots of the first derivative `b + 2c*t + 3d*t^2`, unsorted.
    ///
    /// A derivative that does not depend on `t` has no isolated roots, so nothing is returned for it
    /// even when it is identically zero.
    pub fn derivative_roots(&self) -> Vec<f64> {
        let quadratic = 3.0 * self.d;
        let linear = 2.0 * self.c;
        let constant = self.b;

        if quadratic == 0.0 {
            if linear == 0.0 {
                return Vec::new();
            }
            return vec![-constant / linear];
        }

        let discriminant = linear * linear - 4.0 * quadratic * constant;
        if discriminant < 0.0 {
            return Vec::new();
        }
        if discriminant == 0.0 {
            return vec![-linear / (2.0 * quadratic)];
        }

        // q never vanishes here: discriminant > 0 keeps |linear| + sqrt > 0
        let q = -0.5 * (linear + linear.signum() * discriminant.sqrt());
        vec![q / quadratic, constant / q]
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn evaluate() {
        let eps = 1e-6;
        let polynomial = Polynomial::new(1.0, 2.5, -0.25, 0.0);

        assert_approx_eq!(polynomial.evaluate(2.1), 5.1475, eps);
        assert_approx_eq!(polynomial.evaluate(-3.14), -9.3149, eps);
        assert_approx_eq!(polynomial.evaluate(0.0), 1.0, eps);
    }

    #[test]
    fn derivatives() {
        let eps = 1e-9;
        // 1 - 2t + 0.5t^2 + t^3
        let polynomial = Polynomial::new(1.0, -2.0, 0.5, 1.0);

        assert_approx_eq!(polynomial.first_derivative(0.0), -2.0, eps);
        assert_approx_eq!(polynomial.first_derivative(2.0), -2.0 + 2.0 + 12.0, eps);
        assert_approx_eq!(polynomial.second_derivative(0.0), 1.0, eps);
        assert_approx_eq!(polynomial.second_derivative(-1.5), 1.0 - 9.0, eps);
    }

    #[test]
    fn integral() {
        let eps = 1e-9;
        // antiderivative of 3 + 2t + 3t^2 + 4t^3 is 3t + t^2 + t^3 + t^4
        let polynomial = Polynomial::new(3.0, 2.0, 3.0, 4.0);

        assert_approx_eq!(polynomial.integral(0.0), 0.0, eps);
        assert_approx_eq!(polynomial.integral(2.0), 6.0 + 4.0 + 8.0 + 16.0, eps);
        assert_approx_eq!(polynomial.integral(-1.0), -3.0 + 1.0 - 1.0 + 1.0, eps);
    }

    #[test]
    fn quadratic_derivative_roots() {
        let eps = 1e-12;
        // p'(t) = 3(t - 1)(t - 3) = 3t^2 - 12t + 9
        let polynomial = Polynomial::new(0.0, 9.0, -6.0, 1.0);

        let mut roots = polynomial.derivative_roots();
        roots.sort_by(f64::total_cmp);

        assert_eq!(2, roots.len());
        assert_approx_eq!(roots[0], 1.0, eps);
        assert_approx_eq!(roots[1], 3.0, eps);
    }

    #[test]
    fn double_and_missing_roots() {
        // p'(t) = 3t^2
        let double = Polynomial::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(vec![0.0], double.derivative_roots());

        // p'(t) = 3t^2 + 1
        let none = Polynomial::new(0.0, 1.0, 0.0, 1.0);
        assert!(none.derivative_roots().is_empty());
    }

    #[test]
    fn linear_and_constant_derivative_roots() {
        // p'(t) = 4 - 2t
        let linear = Polynomial::new(0.0, 4.0, -1.0, 0.0);
        assert_eq!(vec![2.0], linear.derivative_roots());

        let sloped_line = Polynomial::new(1.0, 5.0, 0.0, 0.0);
        assert!(sloped_line.derivative_roots().is_empty());

        let flat = Polynomial::new(1.0, 0.0, 0.0, 0.0);
        assert!(flat.derivative_roots().is_empty());
    }

    #[test]
    fn roots_without_cancellation() {
        // p'(t) = 3t^2 + 2e8 t + 3 has one root close to zero
        let polynomial = Polynomial::new(0.0, 3.0, 1e8, 1.0);

        for root in polynomial.derivative_roots() {
            assert!(polynomial.first_derivative(root).abs() < 1e-6 * (1.0 + root.abs() * 1e8));
        }
        let small = polynomial
            .derivative_roots()
            .into_iter()
            .map(f64::abs)
            .fold(f64::INFINITY, f64::min);
        assert_approx_eq!(small, 1.5e-8, 1e-15);
    }
}
