use std::f64::consts::TAU;

use log::debug;

use super::{is_zero::IsZero, quadratic};

#[derive(Debug, Clone, PartialEq)]
pub enum Roots {
    /// Leading coefficient ≈ 0
    Quadratic(quadratic::Roots),
    /// Three real roots (with multiplicity), ascending
    Reals([f64; 3]),
    /// One real root; the complex-conjugate pair is dropped
    Mixed(f64),
}

use Roots::*;

impl Roots {
    pub fn reals(&self) -> Vec<f64> {
        match self {
            Quadratic(q) => q.reals(),
            Reals(rs) => rs.to_vec(),
            Mixed(r) => vec![*r],
        }
    }
}

pub fn cubic(a3: f64, a2: f64, a1: f64, a0: f64) -> Roots {
    if a3.is_zero() {
        Quadratic(quadratic::quadratic(a2, a1, a0))
    } else {
        cubic_scaled(a2 / a3, a1 / a3, a0 / a3)
    }
}

/// Monic cubic: x³ + a2·x² + a1·x + a0
pub fn cubic_scaled(a2: f64, a1: f64, a0: f64) -> Roots {
    // Substitute x = y - a2/3, eliminating the quadratic term: y³ + py + q
    let s = a2 / -3.;
    let p = a1 + a2 * s;
    let q = s * s * s * -2. + s * a1 + a0;
    debug!("cubic_scaled: p {}, q {}", p, q);
    match cubic_depressed(p.zeroed(), q.zeroed()) {
        Reals(mut rs) => {
            for r in &mut rs {
                *r += s;
            }
            rs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            Reals(rs)
        }
        Mixed(r) => Mixed(r + s),
        Quadratic(q) => panic!("cubic_depressed returned quadratic::Roots: {:?}", q),
    }
}

/// Depressed cubic: y³ + py + q
pub fn cubic_depressed(p: f64, q: f64) -> Roots {
    if p.is_zero() {
        if q.is_zero() {
            Reals([0., 0., 0.])
        } else {
            Mixed(-q.cbrt())
        }
    } else if q.is_zero() {
        if p < 0. {
            let s = (-p).sqrt();
            Reals([-s, 0., s])
        } else {
            Mixed(0.)
        }
    } else if p.lt_zero() {
        let p3 = -p / 3.;
        let p3sq = p3.sqrt();
        // Dimensionless discriminant: |u| == 1 exactly at a double root. The
        // raw q²/4 + p³/27 cancels catastrophically there for large p and q,
        // so the branch test has to be made on a well-scaled quantity.
        let u = q / (-2. * p3 * p3sq);
        if (u.abs() - 1.).abs() <= 1e-9 {
            // One single and one double root, both rational in p, q
            let r0 = 3. * q / p;
            let r1 = -3. * q / (2. * p);
            let mut rs = [r0, r1, r1];
            rs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            Reals(rs)
        } else if u.abs() < 1. {
            // Three distinct real roots; trigonometric branch
            let r = 2. * p3sq;
            let theta = u.acos() / 3.;
            let mut rs = [
                r * theta.cos(),
                r * (theta - TAU / 3.).cos(),
                r * (theta - 2. * TAU / 3.).cos(),
            ];
            rs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            Reals(rs)
        } else {
            // One real root; |u| > 1 keeps the radicand positive
            let v = u.abs() + (u * u - 1.).sqrt();
            let m = v.cbrt();
            Mixed(u.signum() * (m + 1. / m) * p3sq)
        }
    } else {
        // p > 0: always one real root
        let p3 = p / 3.;
        let p3sq = p3.sqrt();
        let u = q / (-2. * p3 * p3sq);
        let v = u.abs() + (u * u + 1.).sqrt();
        let m = v.cbrt();
        Mixed(u.signum() * (m - 1. / m) * p3sq)
    }
}
