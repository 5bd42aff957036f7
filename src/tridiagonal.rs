use nalgebra::DVector;

/// Square tridiagonal matrix stored as three diagonals of equal length.
/// `lower[0]` and `upper[n - 1]` lie outside of the matrix and are ignored.
pub(crate) struct Tridiagonal {
    lower: DVector<f64>,
    diagonal: DVector<f64>,
    upper: DVector<f64>,
}

impl Tridiagonal {
    pub fn zeros(size: usize) -> Self {
        Tridiagonal {
            lower: DVector::zeros(size),
            diagonal: DVector::zeros(size),
            upper: DVector::zeros(size),
        }
    }

    pub fn size(&self) -> usize {
        self.diagonal.len()
    }

    /// Sets row `row` to `lower * u[row - 1] + diagonal * u[row] + upper * u[row + 1]`.
    pub fn set_row(&mut self, row: usize, lower: f64, diagonal: f64, upper: f64) {
        self.lower[row] = lower;
        self.diagonal[row] = diagonal;
        self.upper[row] = upper;
    }

    /// Solves the system with Thomas elimination, without pivoting.
    /// Returns `None` when a pivot is zero or not finite.
    pub fn solve(&self, rhs: &DVector<f64>) -> Option<DVector<f64>> {
        let size = self.size();
        if size == 0 || rhs.len() != size {
            return None;
        }

        let mut upper_prime = DVector::<f64>::zeros(size);
        let mut rhs_prime = DVector::<f64>::zeros(size);

        for row in 0..size {
            let (lower, previous_upper, previous_rhs) = if row == 0 {
                (0.0, 0.0, 0.0)
            } else {
                (self.lower[row], upper_prime[row - 1], rhs_prime[row - 1])
            };

            let pivot = self.diagonal[row] - lower * previous_upper;
            if pivot == 0.0 || !pivot.is_finite() {
                return None;
            }

            if row < size - 1 {
                upper_prime[row] = self.upper[row] / pivot;
            }
            rhs_prime[row] = (rhs[row] - lower * previous_rhs) / pivot;
        }

        let mut solution = rhs_prime;
        for row in (0..size - 1).rev() {
            solution[row] -= upper_prime[row] * solution[row + 1];
        }

        if solution.iter().all(|value| value.is_finite()) {
            Some(solution)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::DMatrix;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn dense(system: &Tridiagonal) -> DMatrix<f64> {
        let size = system.size();
        let mut matrix = DMatrix::<f64>::zeros(size, size);
        for row in 0..size {
            if row > 0 {
                matrix[(row, row - 1)] = system.lower[row];
            }
            matrix[(row, row)] = system.diagonal[row];
            if row < size - 1 {
                matrix[(row, row + 1)] = system.upper[row];
            }
        }
        matrix
    }

    #[test]
    fn small_system() {
        let eps = 1e-12;
        // [2 1 0; 1 3 1; 0 1 2] u = [3, 5, 3] has solution [1, 1, 1]
        let mut system = Tridiagonal::zeros(3);
        system.set_row(0, 0.0, 2.0, 1.0);
        system.set_row(1, 1.0, 3.0, 1.0);
        system.set_row(2, 1.0, 2.0, 0.0);

        let solution = system.solve(&DVector::from_vec(vec![3.0, 5.0, 3.0])).unwrap();

        for value in solution.iter() {
            assert_approx_eq!(*value, 1.0, eps);
        }
    }

    #[test]
    fn single_row() {
        let mut system = Tridiagonal::zeros(1);
        system.set_row(0, 0.0, 4.0, 0.0);

        let solution = system.solve(&DVector::from_vec(vec![2.0])).unwrap();

        assert_eq!(0.5, solution[0]);
    }

    #[test]
    fn matches_dense_lu_solve() {
        let eps = 1e-9;
        let mut rng = StdRng::seed_from_u64(7);

        for size in [2, 5, 17, 64] {
            let mut system = Tridiagonal::zeros(size);
            for row in 0..size {
                let lower = if row > 0 { rng.gen_range(0.1..2.0) } else { 0.0 };
                let upper = if row < size - 1 { rng.gen_range(0.1..2.0) } else { 0.0 };
                let diagonal = lower + upper + rng.gen_range(0.5..3.0);
                system.set_row(row, lower, diagonal, upper);
            }
            let rhs = DVector::from_fn(size, |_, _| rng.gen_range(-10.0..10.0));

            let thomas = system.solve(&rhs).unwrap();
            let reference = dense(&system).lu().solve(&rhs).unwrap();

            for row in 0..size {
                assert_approx_eq!(thomas[row], reference[row], eps);
            }
        }
    }

    #[test]
    fn zero_pivot_is_rejected() {
        let mut system = Tridiagonal::zeros(2);
        system.set_row(0, 0.0, 0.0, 1.0);
        system.set_row(1, 1.0, 1.0, 0.0);

        assert!(system.solve(&DVector::from_vec(vec![1.0, 1.0])).is_none());
    }

    #[test]
    fn mismatched_rhs_is_rejected() {
        let system = Tridiagonal::zeros(3);

        assert!(system.solve(&DVector::from_vec(vec![1.0, 1.0])).is_none());
    }
}
