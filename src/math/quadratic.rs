use super::is_zero::{IsZero, EPSILON};

#[derive(Debug, Clone, PartialEq)]
pub enum Roots {
    /// Degenerate (linear) case
    Single(f64),
    Double(f64),
    /// Two distinct real roots, ascending
    Reals([f64; 2]),
    /// Conjugate pair; real parts are never used downstream, so they are dropped
    Complex,
}

use Roots::*;

impl Roots {
    pub fn reals(&self) -> Vec<f64> {
        match self {
            Single(r) => vec![*r],
            Double(r) => vec![*r, *r],
            Reals(rs) => rs.to_vec(),
            Complex => vec![],
        }
    }
}

pub fn quadratic(a2: f64, a1: f64, a0: f64) -> Roots {
    if a2.is_zero() {
        if a1.is_zero() {
            // Constant polynomial, no roots
            Complex
        } else {
            Single(-a0 / a1)
        }
    } else {
        quadratic_scaled(a1 / a2, a0 / a2)
    }
}

/// Monic quadratic: x² + a1·x + a0
pub fn quadratic_scaled(a1: f64, a0: f64) -> Roots {
    let b = a1 / -2.;
    let bb = b * b;
    let d = bb - a0;
    // The subtraction cancels at a double root, so the zero test must scale
    // with the terms rather than use a fixed absolute threshold
    let eps = EPSILON * (bb + a0.abs()).max(1.);
    if d < -eps {
        Complex
    } else if d <= eps {
        Double(b)
    } else {
        let d = d.sqrt();
        Reals([b - d, b + d])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_reals() {
        // (x - 1)(x + 3) = x² + 2x - 3
        match quadratic(1., 2., -3.) {
            Reals([r0, r1]) => {
                assert_relative_eq!(r0, -3.);
                assert_relative_eq!(r1, 1.);
            }
            res => panic!("expected 2 roots: {:?}", res),
        }
    }

    #[test]
    fn double_root() {
        assert_eq!(quadratic(1., -4., 4.), Double(2.));
    }

    #[test]
    fn near_double_large() {
        // Discriminant terms are O(10¹²); the residual -0.1 is cancellation
        // noise, not a real complex pair
        match quadratic(1., -2e6, 1e12 + 0.1) {
            Double(r) => assert_relative_eq!(r, 1e6),
            res => panic!("expected double root: {:?}", res),
        }
    }

    #[test]
    fn complex_pair() {
        assert_eq!(quadratic(1., 0., 1.), Complex);
    }

    #[test]
    fn linear() {
        assert_eq!(quadratic(0., 2., -6.), Single(3.));
    }
}
